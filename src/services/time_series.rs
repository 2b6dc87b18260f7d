use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use derive_getters::Getters;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;

use crate::{
    api::{AvIntradayBarDto, AvNumber},
    models::QuoteRecord,
};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, Default, Getters)]
pub struct ParsedSeries {
    records: Vec<QuoteRecord>,
    skipped: usize,
}

impl ParsedSeries {
    pub fn into_records(self) -> Vec<QuoteRecord> {
        self.records
    }
}

/// Returns `None` when the response has no usable time series. Entries that
/// fail to parse are logged and counted in `skipped`.
pub fn parse_time_series(data: &Value, symbol: &str, series_key: &str) -> Option<ParsedSeries> {
    let series = data.get(series_key)?.as_object()?;
    if series.is_empty() {
        return None;
    }

    let mut parsed = ParsedSeries::default();

    for (timestamp, values) in series {
        match parse_entry(symbol, timestamp, values) {
            Ok(record) => parsed.records.push(record),
            Err(err) => {
                warn!(
                    "Failed to parse data for timestamp {}: {:#}",
                    timestamp, err
                );
                parsed.skipped += 1;
            }
        }
    }

    Some(parsed)
}

pub fn parse_entry(symbol: &str, timestamp: &str, values: &Value) -> Result<QuoteRecord> {
    let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .with_context(|| format!("Failed to parse timestamp '{}'", timestamp))?;

    let bar = serde_json::from_value::<AvIntradayBarDto>(values.clone())
        .with_context(|| "Unexpected bar format")?;

    Ok(QuoteRecord::new(
        symbol.to_string(),
        timestamp,
        parse_decimal(bar.open().as_ref(), "open")?,
        parse_decimal(bar.high().as_ref(), "high")?,
        parse_decimal(bar.low().as_ref(), "low")?,
        parse_decimal(bar.close().as_ref(), "close")?,
        parse_volume(bar.volume().as_ref())?,
    ))
}

/// Missing fields count as zero.
pub fn parse_decimal(field: Option<&AvNumber>, field_name: &str) -> Result<Decimal> {
    let Some(field) = field else {
        return Ok(Decimal::ZERO);
    };

    let text = field.as_text();
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .with_context(|| format!("Failed to parse {} '{}'", field_name, text))
}

/// Text must be an integer literal; a JSON number may also be a float with no
/// fractional part.
pub fn parse_volume(field: Option<&AvNumber>) -> Result<i64> {
    let Some(field) = field else {
        return Ok(0);
    };

    if let AvNumber::Number(number) = field {
        if let Some(volume) = number.as_i64() {
            return Ok(volume);
        }
        if let Some(volume) = number.as_f64().filter(|v| v.fract() == 0.0 && v.abs() < 9.0e18) {
            return Ok(volume as i64);
        }
    }

    let text = field.as_text();
    text.parse::<i64>()
        .with_context(|| format!("Failed to parse volume '{}'", text))
}
