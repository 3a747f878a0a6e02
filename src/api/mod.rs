//! Chart builders and the SVG entry points.

mod chart_canvas;
mod chart_data;
mod chart_options;
mod highlight_overlay;
mod net_time_histogram_frame_builder;
mod net_times_frame_builder;
mod start_bucket_histogram_frame_builder;
mod start_vs_finish_frame_builder;

pub use chart_options::{HighlightKey, MAX_HIGHLIGHTS, RenderOptions};
pub use net_time_histogram_frame_builder::build_net_time_histogram_frame;
pub use net_times_frame_builder::build_net_times_frame;
pub use start_bucket_histogram_frame_builder::build_start_bucket_histogram_frame;
pub use start_vs_finish_frame_builder::build_start_vs_finish_frame;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ResultRecord;
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer, SvgRenderer};

/// The four supported charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    /// Net time per finisher, in input order.
    NetTimes,
    NetTimeHistogram,
    /// Net time histogram stacked by start window.
    StartBucketHistogram,
    StartVsFinish,
}

impl ChartKind {
    pub const ALL: [Self; 4] = [
        Self::NetTimes,
        Self::NetTimeHistogram,
        Self::StartBucketHistogram,
        Self::StartVsFinish,
    ];

    /// File name stem used when writing the chart to disk.
    #[must_use]
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::NetTimes => "net-times",
            Self::NetTimeHistogram => "net-time-histogram",
            Self::StartBucketHistogram => "start-bucket-histogram",
            Self::StartVsFinish => "start-vs-finish",
        }
    }
}

/// Lays out `kind` as a backend-agnostic frame.
pub fn build_frame(
    kind: ChartKind,
    records: &[ResultRecord],
    options: &RenderOptions,
) -> ChartResult<RenderFrame> {
    match kind {
        ChartKind::NetTimes => build_net_times_frame(records, options),
        ChartKind::NetTimeHistogram => build_net_time_histogram_frame(records, options),
        ChartKind::StartBucketHistogram => build_start_bucket_histogram_frame(records, options),
        ChartKind::StartVsFinish => build_start_vs_finish_frame(records, options),
    }
}

/// Renders `kind` to a standalone SVG document.
pub fn render_svg(
    kind: ChartKind,
    records: &[ResultRecord],
    options: &RenderOptions,
) -> ChartResult<String> {
    let frame = build_frame(kind, records, options)?;
    let svg = SvgRenderer::default().render(&frame)?;
    debug!(?kind, bytes = svg.len(), "rendered svg");
    Ok(svg)
}

/// Renders every chart kind. Each entry fails independently, so a dataset
/// without start times still yields the net time charts.
pub fn render_all(
    records: &[ResultRecord],
    options: &RenderOptions,
) -> Vec<(ChartKind, ChartResult<String>)> {
    ChartKind::ALL
        .into_iter()
        .map(|kind| (kind, render_svg(kind, records, options)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;

    #[test]
    fn file_stems_are_unique() {
        let mut stems: Vec<_> = ChartKind::ALL.iter().map(|kind| kind.file_stem()).collect();
        stems.sort_unstable();
        stems.dedup();
        assert_eq!(stems.len(), ChartKind::ALL.len());
    }

    #[test]
    fn start_charts_fail_alone_without_start_times() {
        let records = vec![
            ResultRecord::new("1", "00:45:12,000", ""),
            ResultRecord::new("2", "00:46:30,500", ""),
        ];
        let results = render_all(&records, &RenderOptions::default());
        assert!(results[0].1.is_ok());
        assert!(results[1].1.is_ok());
        assert!(matches!(
            results[2].1,
            Err(ChartError::NoParseableTimes { field: "start time" })
        ));
        assert!(results[3].1.is_err());
    }
}
