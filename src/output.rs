use anyhow::{anyhow, Result};
use std::io::Write;
use std::str::FromStr;
use swap_core::SwapRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Text,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "text" => Ok(OutputFormat::Text),
            other => Err(anyhow!("Unknown output format: '{}'", other)),
        }
    }
}

/// Divide an integer amount by `10^decimals` exactly, without floating point.
///
/// `format_units("1500000", 6)` is `"1.5"`.
pub fn format_units(raw: &str, decimals: u32) -> String {
    let digits = raw.trim_start_matches('0');
    let decimals = decimals as usize;

    if decimals == 0 {
        return if digits.is_empty() { "0".to_string() } else { digits.to_string() };
    }

    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');

    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    }
}

/// One line per swap, amounts scaled for reading
pub fn describe(record: &SwapRecord) -> String {
    format!(
        "{} {}: {} {} -> {} {}",
        record.timestamp.format("%Y-%m-%d %H:%M:%S"),
        record.tx_hash,
        format_units(&record.from_amount, record.from_decimals),
        record.from_symbol,
        format_units(&record.to_amount, record.to_decimals),
        record.to_symbol,
    )
}

pub fn write_records<W: Write>(records: &[SwapRecord], format: OutputFormat, mut writer: W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, records)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for record in records {
                csv_writer.serialize(record)?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Text => {
            for record in records {
                writeln!(writer, "{}", describe(record))?;
            }
        }
    }
    Ok(())
}
