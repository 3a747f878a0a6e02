use serde::{Deserialize, Serialize};

use crate::core::{CalloutConfig, ResultRecord};
use crate::error::{ChartError, ChartResult};

/// Highlights beyond this count are dropped.
pub const MAX_HIGHLIGHTS: usize = 10;

/// Identifies one runner to highlight.
///
/// The bib wins when both the key and the record carry one; otherwise the
/// runner is matched by display name (`"Surname Given"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightKey {
    pub bib: Option<String>,
    pub name: Option<String>,
}

impl HighlightKey {
    #[must_use]
    pub fn bib(bib: impl Into<String>) -> Self {
        Self {
            bib: Some(bib.into()),
            name: None,
        }
    }

    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            bib: None,
            name: Some(name.into()),
        }
    }

    /// Key for an existing record, carrying both its bib and its name.
    #[must_use]
    pub fn for_record(record: &ResultRecord) -> Self {
        let name = record.display_name();
        Self {
            bib: record.bib.clone(),
            name: (!name.is_empty()).then_some(name),
        }
    }

    /// Interprets free text: all digits is a bib, anything else a name.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
            Self::bib(text)
        } else {
            Self::name(text)
        }
    }

    #[must_use]
    pub fn matches(&self, record: &ResultRecord) -> bool {
        let record_bib = record
            .bib
            .as_deref()
            .map(str::trim)
            .filter(|bib| !bib.is_empty());
        if let (Some(bib), Some(record_bib)) = (self.bib.as_deref(), record_bib) {
            return bib.trim() == record_bib;
        }
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => record.display_name() == name,
            _ => false,
        }
    }
}

/// Parameters shared by every chart builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Histogram bucket width.
    pub bucket_size_seconds: f64,
    /// Restricts the charts to one distance (raw export value).
    pub distance: Option<String>,
    pub highlights: Vec<HighlightKey>,
    pub callout: CalloutConfig,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bucket_size_seconds: 60.0,
            distance: None,
            highlights: Vec::new(),
            callout: CalloutConfig::default(),
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub fn with_bucket_size_seconds(mut self, seconds: f64) -> Self {
        self.bucket_size_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_distance(mut self, distance: impl Into<String>) -> Self {
        self.distance = Some(distance.into());
        self
    }

    #[must_use]
    pub fn with_highlight(mut self, key: HighlightKey) -> Self {
        self.highlights.push(key);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.bucket_size_seconds.is_finite() || self.bucket_size_seconds <= 0.0 {
            return Err(ChartError::InvalidBucketSize(self.bucket_size_seconds));
        }
        self.callout.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn bucket_size_minutes(&self) -> f64 {
        self.bucket_size_seconds / 60.0
    }

    /// Serializes options to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize options: {e}")))
    }

    /// Deserializes options from JSON; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse options: {e}")))
    }
}
