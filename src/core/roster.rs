use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::ResultRecord;
use crate::core::distance::parse_meters;

/// Maximum number of matches returned by [`search_roster`].
pub const ROSTER_SEARCH_LIMIT: usize = 50;

/// Searchable runner entry used when choosing highlights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerEntry {
    /// Position of the runner's record in the source slice.
    pub index: usize,
    pub name: String,
    pub bib: String,
    pub category: String,
    pub distance: String,
    /// `Name (Category) 21.10km #Bib`, omitting missing parts.
    pub display_name: String,
}

/// Builds the roster of named runners, sorted by name.
///
/// The distance is only shown in the display name when the records span
/// more than one distance.
#[must_use]
pub fn build_roster(records: &[ResultRecord]) -> Vec<RunnerEntry> {
    let distances: IndexSet<&str> = records
        .iter()
        .filter_map(|record| record.distance.as_deref())
        .filter(|value| !value.is_empty())
        .collect();
    let show_distance = distances.len() > 1;

    let mut roster: Vec<RunnerEntry> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let name = record.display_name();
            if name.is_empty() {
                return None;
            }
            let bib = record.bib.clone().unwrap_or_default();
            let category = record.category.clone().unwrap_or_default();
            let distance = record.distance.clone().unwrap_or_default();

            let mut parts = vec![name.clone()];
            if !category.is_empty() {
                parts.push(format!("({category})"));
            }
            if show_distance {
                if let Some(meters) = parse_meters(&distance) {
                    parts.push(format!("{:.2}km", meters / 1000.0));
                }
            }
            if !bib.is_empty() {
                parts.push(format!("#{bib}"));
            }

            Some(RunnerEntry {
                index,
                name,
                bib,
                category,
                distance,
                display_name: parts.join(" "),
            })
        })
        .collect();

    roster.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.index.cmp(&b.index)));
    roster
}

/// Case-insensitive match on display name or name, or substring match on
/// bib. Returns at most [`ROSTER_SEARCH_LIMIT`] entries; an empty term
/// matches nothing.
#[must_use]
pub fn search_roster<'a>(roster: &'a [RunnerEntry], term: &str) -> Vec<&'a RunnerEntry> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    roster
        .iter()
        .filter(|runner| {
            runner.display_name.to_lowercase().contains(&term)
                || runner.name.to_lowercase().contains(&term)
                || runner.bib.contains(&term)
        })
        .take(ROSTER_SEARCH_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ResultRecord> {
        vec![
            ResultRecord::new("2", "00:50:00,000", "08:00")
                .with_name("Nowak", "Ewa")
                .with_bib("17")
                .with_category("K30")
                .with_distance("10000.00"),
            ResultRecord::new("1", "00:40:00,000", "08:00")
                .with_name("Kowalski", "Jan")
                .with_bib("201")
                .with_distance("21097.00"),
            ResultRecord::new("0", "", ""),
        ]
    }

    #[test]
    fn roster_is_sorted_and_skips_unnamed_entries() {
        let roster = build_roster(&sample());
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].name, "Kowalski Jan");
        assert_eq!(roster[0].display_name, "Kowalski Jan 21.10km #201");
        assert_eq!(roster[1].display_name, "Nowak Ewa (K30) 10.00km #17");
        assert_eq!(roster[1].index, 0);
    }

    #[test]
    fn distance_hidden_for_single_distance_datasets() {
        let records = vec![
            ResultRecord::default()
                .with_name("Nowak", "Ewa")
                .with_bib("17")
                .with_distance("10000.00"),
        ];
        assert_eq!(build_roster(&records)[0].display_name, "Nowak Ewa #17");
    }

    #[test]
    fn search_matches_name_case_insensitively_and_bib() {
        let roster = build_roster(&sample());
        assert_eq!(search_roster(&roster, "NOWAK").len(), 1);
        assert_eq!(search_roster(&roster, "20")[0].bib, "201");
        assert!(search_roster(&roster, "   ").is_empty());
    }
}
