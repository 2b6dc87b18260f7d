use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Deserializer};

/// A numeric field of an intraday bar. The API sends strings, but plain JSON
/// numbers are accepted as well.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AvNumber {
    Text(String),
    Number(serde_json::Number),
}

/// An absent key falls back to `default`; a key that is present must hold a
/// string or a number, so an explicit `null` fails.
fn present<'de, D>(deserializer: D) -> Result<Option<AvNumber>, D::Error>
where
    D: Deserializer<'de>,
{
    AvNumber::deserialize(deserializer).map(Some)
}

impl AvNumber {
    pub fn as_text(&self) -> String {
        match self {
            AvNumber::Text(text) => text.trim().to_string(),
            AvNumber::Number(number) => number.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Getters, new)]
pub struct AvIntradayBarDto {
    #[serde(rename = "1. open", default, deserialize_with = "present")]
    open: Option<AvNumber>,
    #[serde(rename = "2. high", default, deserialize_with = "present")]
    high: Option<AvNumber>,
    #[serde(rename = "3. low", default, deserialize_with = "present")]
    low: Option<AvNumber>,
    #[serde(rename = "4. close", default, deserialize_with = "present")]
    close: Option<AvNumber>,
    #[serde(rename = "5. volume", default, deserialize_with = "present")]
    volume: Option<AvNumber>,
}
