use std::io::Write;

use api_types::split::SplitResponse;
use serde::Serialize;

use crate::{config::OutputFormat, error::Result};

#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    name: &'a str,
    value: &'a str,
}

pub fn write(response: &SplitResponse, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(response, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, response)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => write_csv(response, out),
    }
}

fn write_text(response: &SplitResponse, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{} split of {}", response.method, response.total)?;
    let width = response
        .lines
        .iter()
        .map(|l| l.name.chars().count())
        .max()
        .unwrap_or(0);
    for line in &response.lines {
        writeln!(out, "  {:<width$}  {}", line.name, line.display)?;
    }
    writeln!(out, "{}", response.summary)?;

    if let Some(owed) = &response.owed {
        writeln!(out, "Owed ({}):", response.currency)?;
        for line in owed {
            writeln!(out, "  {:<width$}  {}", line.name, line.amount)?;
        }
    }
    Ok(())
}

/// One row per participant: the display value, or the owed amount once the
/// split is committed.
fn write_csv(response: &SplitResponse, out: &mut impl Write) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    match &response.owed {
        Some(owed) => {
            for line in owed {
                writer.serialize(CsvRow {
                    id: &line.id,
                    name: &line.name,
                    value: &line.amount,
                })?;
            }
        }
        None => {
            for line in &response.lines {
                writer.serialize(CsvRow {
                    id: &line.id,
                    name: &line.name,
                    value: &line.display,
                })?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}
