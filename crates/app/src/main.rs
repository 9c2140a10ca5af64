use std::io::{self, Read};

use api_types::split::SplitRequest;
use engine::Currency;

use crate::error::Result;

mod config;
mod error;
mod output;
mod request;

fn main() -> Result<()> {
    let (settings, invocation) = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "splitbill={level},engine={level}",
            level = settings.level
        ))
        .with_writer(io::stderr)
        .init();

    let fallback = Currency::try_from(settings.currency.as_str())?;
    let split_request = read_request(&invocation.input)?;
    let draft = request::build_draft(&split_request, fallback, invocation.commit)?;

    let allocation = if invocation.commit {
        match draft.commit() {
            Ok(allocation) => Some(allocation),
            Err(err) => {
                tracing::error!("split cannot be applied: {err}");
                return Err(err.into());
            }
        }
    } else {
        None
    };

    let response = request::report(&draft, allocation.as_ref());
    let stdout = io::stdout();
    output::write(&response, settings.format, &mut stdout.lock())?;
    Ok(())
}

fn read_request(input: &str) -> Result<SplitRequest> {
    let raw = if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };
    tracing::debug!(bytes = raw.len(), source = input, "read split request");
    Ok(serde_json::from_str(&raw)?)
}
