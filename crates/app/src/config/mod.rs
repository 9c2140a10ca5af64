use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/splitbill.toml";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Currency used when a request does not name one.
    pub currency: String,
    /// Log level for the `splitbill` and `engine` targets.
    pub level: String,
    pub format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            level: "warn".to_string(),
            format: OutputFormat::Text,
        }
    }
}

/// What to do on this run, as opposed to persistent settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Request file, `-` for stdin.
    pub input: String,
    pub commit: bool,
}

#[derive(Debug, Parser)]
#[command(name = "splitbill", about = "Work out who owes what for a shared expense")]
pub struct Args {
    /// JSON split request; `-` reads stdin.
    #[arg(default_value = "-")]
    input: String,
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override default currency (e.g. INR, EUR).
    #[arg(long)]
    currency: Option<String>,
    /// Override output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Override log level (e.g. debug).
    #[arg(long)]
    level: Option<String>,
    /// Validate the entries and print exact owed amounts.
    #[arg(long)]
    commit: bool,
}

pub fn load() -> Result<(AppConfig, Invocation)> {
    load_from(Args::parse())
}

pub fn load_from(args: Args) -> Result<(AppConfig, Invocation)> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SPLITBILL"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(currency) = args.currency {
        settings.currency = currency;
    }
    if let Some(format) = args.format {
        settings.format = format;
    }
    if let Some(level) = args.level {
        settings.level = level;
    }

    let invocation = Invocation {
        input: args.input,
        commit: args.commit,
    };
    Ok((settings, invocation))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> (AppConfig, Invocation) {
        let args = Args::try_parse_from(argv).unwrap();
        load_from(args).unwrap()
    }

    #[test]
    fn defaults_without_config_file() {
        let (settings, invocation) = parse(&["splitbill", "--config", "does/not/exist"]);
        assert_eq!(settings.format, OutputFormat::Text);
        assert_eq!(invocation.input, "-");
        assert!(!invocation.commit);
    }

    #[test]
    fn cli_overrides_settings() {
        let (settings, invocation) = parse(&[
            "splitbill",
            "--config",
            "does/not/exist",
            "--currency",
            "EUR",
            "--format",
            "csv",
            "--level",
            "debug",
            "--commit",
            "dinner.json",
        ]);
        assert_eq!(settings.currency, "EUR");
        assert_eq!(settings.format, OutputFormat::Csv);
        assert_eq!(settings.level, "debug");
        assert_eq!(
            invocation,
            Invocation {
                input: "dinner.json".to_string(),
                commit: true,
            }
        );
    }
}
