use indexmap::IndexSet;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::ResultRecord;

/// Distance choice offered to the caller, e.g. for a distance filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceOption {
    /// Raw value as stored in the export (meters, e.g. `"21097.00"`).
    pub value: String,
    pub label: String,
}

/// Distinct distances present in `records`, sorted numerically.
///
/// Values that are not numbers sort after all numeric ones, in first-seen
/// order.
#[must_use]
pub fn unique_distances(records: &[ResultRecord]) -> Vec<DistanceOption> {
    let distinct: IndexSet<&str> = records
        .iter()
        .filter_map(|record| record.distance.as_deref())
        .filter(|value| !value.is_empty())
        .collect();

    let mut values: Vec<&str> = distinct.into_iter().collect();
    values.sort_by_key(|value| {
        let meters = parse_meters(value);
        (meters.is_none(), OrderedFloat(meters.unwrap_or(0.0)))
    });

    values
        .into_iter()
        .map(|value| DistanceOption {
            value: value.to_owned(),
            label: format_distance(value),
        })
        .collect()
}

/// Human label for a distance in meters; common race distances get names.
#[must_use]
pub fn format_distance(value: &str) -> String {
    let Some(meters) = parse_meters(value) else {
        return value.to_owned();
    };
    let km = meters / 1000.0;

    if (km - 42.195).abs() < 0.1 {
        format!("Marathon ({km:.2} km)")
    } else if (km - 21.0975).abs() < 0.1 {
        format!("Half Marathon ({km:.2} km)")
    } else if (km - 10.0).abs() < 0.1 {
        "10 km".to_owned()
    } else if (km - 5.0).abs() < 0.1 {
        "5 km".to_owned()
    } else {
        format!("{km:.2} km")
    }
}

pub(crate) fn parse_meters(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|meters| meters.is_finite())
}
