use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::time_parse::{parse_net_time, parse_start_time};
use crate::error::{ChartError, ChartResult};

/// One entry of a datasport `results.json` export.
///
/// Only the fields the charts consume are kept. The export mixes strings and
/// numbers for the same field across events, so every field accepts either
/// and is stored as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultRecord {
    #[serde(rename = "msc", deserialize_with = "text_field")]
    pub placing: Option<String>,
    #[serde(rename = "czasnetto", deserialize_with = "text_field")]
    pub net_time: Option<String>,
    #[serde(rename = "start", deserialize_with = "text_field")]
    pub start_time: Option<String>,
    #[serde(rename = "nazwisko", deserialize_with = "text_field")]
    pub surname: Option<String>,
    #[serde(rename = "imie", deserialize_with = "text_field")]
    pub given_name: Option<String>,
    #[serde(rename = "numer", deserialize_with = "text_field")]
    pub bib: Option<String>,
    #[serde(rename = "katw", deserialize_with = "text_field")]
    pub category: Option<String>,
    #[serde(rename = "odleglosc", deserialize_with = "text_field")]
    pub distance: Option<String>,
}

impl ResultRecord {
    #[must_use]
    pub fn new(placing: &str, net_time: &str, start_time: &str) -> Self {
        Self {
            placing: non_empty(placing),
            net_time: non_empty(net_time),
            start_time: non_empty(start_time),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, surname: &str, given_name: &str) -> Self {
        self.surname = non_empty(surname);
        self.given_name = non_empty(given_name);
        self
    }

    #[must_use]
    pub fn with_bib(mut self, bib: &str) -> Self {
        self.bib = non_empty(bib);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = non_empty(category);
        self
    }

    #[must_use]
    pub fn with_distance(mut self, distance: &str) -> Self {
        self.distance = non_empty(distance);
        self
    }

    /// `"Surname Given"`, trimmed; empty when both parts are missing.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.surname.as_deref().unwrap_or(""),
            self.given_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_owned()
    }

    #[must_use]
    pub fn has_net_time(&self) -> bool {
        self.net_time
            .as_deref()
            .is_some_and(|value| !value.trim().is_empty())
    }

    /// Completed the race: a net time and a non-zero placing.
    #[must_use]
    pub fn is_finisher(&self) -> bool {
        let placed = self
            .placing
            .as_deref()
            .map(str::trim)
            .is_some_and(|value| !value.is_empty() && value != "0");
        placed && self.has_net_time()
    }

    #[must_use]
    pub fn net_seconds(&self) -> Option<f64> {
        self.net_time.as_deref().and_then(parse_net_time)
    }

    #[must_use]
    pub fn start_seconds(&self) -> Option<f64> {
        self.start_time.as_deref().and_then(parse_start_time)
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

fn text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Parses a `results.json` payload (a JSON array of result objects).
pub fn parse_results_json(input: &str) -> ChartResult<Vec<ResultRecord>> {
    serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse results json: {e}")))
}

/// Keeps entries with a non-empty net time.
#[must_use]
pub fn filter_finishers(records: &[ResultRecord]) -> Vec<ResultRecord> {
    records
        .iter()
        .filter(|record| record.has_net_time())
        .cloned()
        .collect()
}

/// Keeps entries whose distance field equals `distance` exactly.
#[must_use]
pub fn filter_by_distance(records: &[ResultRecord], distance: &str) -> Vec<ResultRecord> {
    records
        .iter()
        .filter(|record| record.distance.as_deref() == Some(distance))
        .cloned()
        .collect()
}
