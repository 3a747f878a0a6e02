use tracing::{debug, warn};

use crate::core::ResultRecord;
use crate::error::{ChartError, ChartResult};

use super::chart_options::{MAX_HIGHLIGHTS, RenderOptions};

/// A finisher whose net time parsed.
#[derive(Debug, Clone, Copy)]
pub(super) struct TimedFinisher<'a> {
    pub record: &'a ResultRecord,
    pub net_seconds: f64,
    pub start_seconds: Option<f64>,
}

impl TimedFinisher<'_> {
    pub fn net_minutes(&self) -> f64 {
        self.net_seconds / 60.0
    }

    pub fn net_label(&self) -> &str {
        self.record.net_time.as_deref().unwrap_or("")
    }
}

/// A highlight resolved against the plotted finishers.
#[derive(Debug, Clone)]
pub(super) struct ResolvedHighlight {
    /// Position in the requested list; drives palette color and stagger.
    pub slot: usize,
    /// Position in the finisher slice the key matched.
    pub position: usize,
    pub label: String,
}

/// Applies the distance filter and keeps finishers with a parseable net
/// time, in input order.
pub(super) fn timed_finishers<'a>(
    records: &'a [ResultRecord],
    options: &RenderOptions,
) -> ChartResult<Vec<TimedFinisher<'a>>> {
    let finishers: Vec<&ResultRecord> = selected_finishers(records, options).collect();
    if finishers.is_empty() {
        return Err(ChartError::NoFinishers);
    }

    let timed: Vec<TimedFinisher<'a>> = finishers
        .iter()
        .copied()
        .filter_map(|record| {
            Some(TimedFinisher {
                record,
                net_seconds: record.net_seconds()?,
                start_seconds: record.start_seconds(),
            })
        })
        .collect();

    let skipped = finishers.len() - timed.len();
    debug!(
        records = records.len(),
        finishers = finishers.len(),
        skipped,
        "selected finishers"
    );
    if timed.is_empty() {
        return Err(ChartError::NoParseableTimes { field: "net time" });
    }
    Ok(timed)
}

/// Start times of every selected finisher, whether or not its net time
/// parsed.
pub(super) fn finisher_start_times<'a>(
    records: &'a [ResultRecord],
    options: &'a RenderOptions,
) -> impl Iterator<Item = f64> + 'a {
    selected_finishers(records, options).filter_map(ResultRecord::start_seconds)
}

fn selected_finishers<'a: 'o, 'o>(
    records: &'a [ResultRecord],
    options: &'o RenderOptions,
) -> impl Iterator<Item = &'a ResultRecord> + 'o {
    records
        .iter()
        .filter(move |record| match options.distance.as_deref() {
            Some(distance) => record.distance.as_deref() == Some(distance),
            None => true,
        })
        .filter(|record| record.is_finisher())
}

/// Keeps finishers that also carry a parseable start time.
pub(super) fn with_start_times<'a>(
    finishers: &[TimedFinisher<'a>],
) -> ChartResult<Vec<(TimedFinisher<'a>, f64)>> {
    let started: Vec<(TimedFinisher<'a>, f64)> = finishers
        .iter()
        .filter_map(|finisher| Some((*finisher, finisher.start_seconds?)))
        .collect();
    debug!(
        skipped = finishers.len() - started.len(),
        "filtered finishers without start time"
    );
    if started.is_empty() {
        return Err(ChartError::NoParseableTimes { field: "start time" });
    }
    Ok(started)
}

/// Matches requested highlights against `records` in order. Keys without a
/// match keep their slot so colors stay stable across charts.
pub(super) fn resolve_highlights<'a, I>(options: &RenderOptions, records: I) -> Vec<ResolvedHighlight>
where
    I: IntoIterator<Item = &'a ResultRecord>,
    I::IntoIter: Clone,
{
    if options.highlights.len() > MAX_HIGHLIGHTS {
        warn!(
            requested = options.highlights.len(),
            limit = MAX_HIGHLIGHTS,
            "too many highlights; extra entries are ignored"
        );
    }

    let records = records.into_iter();
    options
        .highlights
        .iter()
        .take(MAX_HIGHLIGHTS)
        .enumerate()
        .filter_map(|(slot, key)| {
            let found = records
                .clone()
                .position(|record| key.matches(record))
                .map(|position| ResolvedHighlight {
                    slot,
                    position,
                    label: label_for(key.name.as_deref(), records.clone().nth(position)),
                });
            if found.is_none() {
                debug!(slot, ?key, "highlight not among plotted finishers");
            }
            found
        })
        .collect()
}

fn label_for(key_name: Option<&str>, record: Option<&ResultRecord>) -> String {
    let name = record.map(ResultRecord::display_name).unwrap_or_default();
    if !name.is_empty() {
        return name;
    }
    if let Some(bib) = record.and_then(|record| record.bib.as_deref()) {
        return format!("#{bib}");
    }
    key_name.unwrap_or("").to_owned()
}
