use tracing::debug;

use crate::core::{
    BinLayout, COUNT_AXIS_DIVISIONS, Color, HistogramBin, LinearScale, Point, ResultRecord,
    bin_entries, choose_tick_interval, count_ticks, minutes_to_label, tick_values,
};
use crate::error::ChartResult;
use crate::render::{CanvasLayerKind, RectPrimitive, RenderFrame};

use super::chart_canvas::{CHART_HEIGHT, CHART_WIDTH, ChartCanvas, bucket_phrase};
use super::chart_data::{resolve_highlights, timed_finishers};
use super::chart_options::RenderOptions;
use super::highlight_overlay::{HighlightMark, push_highlights};

/// Histogram of net finish times in fixed-width buckets.
pub fn build_net_time_histogram_frame(
    records: &[ResultRecord],
    options: &RenderOptions,
) -> ChartResult<RenderFrame> {
    options.validate()?;
    let finishers = timed_finishers(records, options)?;
    let canvas = ChartCanvas::new(CHART_WIDTH, CHART_HEIGHT);
    let plot = canvas.plot;

    let layout = BinLayout::fit(
        finishers.iter().map(|finisher| finisher.net_minutes()),
        options.bucket_size_minutes(),
    )?;
    let bins: Vec<HistogramBin<usize>> = bin_entries(
        &layout,
        finishers
            .iter()
            .enumerate()
            .map(|(position, finisher)| (finisher.net_minutes(), position)),
    );
    let max_count = bins.iter().map(|bin| bin.count).max().unwrap_or(0).max(1) as f64;

    let x_scale = LinearScale::new(layout.min, layout.domain_end(), plot.left, plot.right);
    let y_scale = LinearScale::new(0.0, max_count, plot.bottom, plot.top);

    let mut frame = canvas.begin_frame(
        "Net finish time histogram",
        "Number of finishers per net finish time bucket",
    );

    let interval = choose_tick_interval(layout.min, layout.domain_end());
    push_time_axis_ticks(&canvas, &mut frame, &layout, x_scale, interval);
    push_count_axis_ticks(&canvas, &mut frame, y_scale, max_count);
    canvas.push_axes(&mut frame, 1.5);

    for bin in bins.iter().filter(|bin| bin.count > 0) {
        let x = x_scale.map(bin.start);
        let x_end = x_scale.map(bin.start + layout.width);
        let y = y_scale.map(bin.count as f64);
        frame.push(
            CanvasLayerKind::Series,
            RectPrimitive::new(x, y, (x_end - x - 1.0).max(1.0), plot.bottom - y, Color::SERIES)
                .with_tooltip(format!(
                    "{}-{}: {}",
                    minutes_to_label(bin.start),
                    minutes_to_label(bin.start + layout.width),
                    bin.count
                )),
        );
    }

    let marks: Vec<HighlightMark> =
        resolve_highlights(options, finishers.iter().map(|finisher| finisher.record))
            .into_iter()
            .map(|highlight| {
                let finisher = finishers[highlight.position];
                let bin = &bins[layout.index_of(finisher.net_minutes())];
                HighlightMark {
                    slot: highlight.slot,
                    point: Point::new(
                        x_scale.map(bin.start + layout.width / 2.0),
                        y_scale.map(bin.count as f64),
                    ),
                    tooltip: format!("{} - {}", highlight.label, finisher.net_label()),
                    label: highlight.label,
                }
            })
            .collect();
    push_highlights(&mut frame, plot, &marks, options.callout)?;

    canvas.push_axis_titles(
        &mut frame,
        &format!(
            "Net finish time ({} buckets, labels every {} min)",
            bucket_phrase(options.bucket_size_seconds),
            interval
        ),
        "Number of finishers",
    );
    canvas.push_attribution(&mut frame);

    debug!(
        finishers = finishers.len(),
        bins = bins.len(),
        max_count,
        "built net time histogram frame"
    );
    Ok(frame)
}

/// `HH:MM` ticks on multiples of `interval` across the bin domain.
pub(super) fn push_time_axis_ticks(
    canvas: &ChartCanvas,
    frame: &mut RenderFrame,
    layout: &BinLayout,
    x_scale: LinearScale,
    interval: f64,
) {
    for minutes in tick_values(layout.min, layout.domain_end(), interval) {
        canvas.push_x_tick(frame, x_scale.map(minutes), minutes_to_label(minutes));
    }
}

/// Count labels at evenly spaced values, rounded to whole finishers.
pub(super) fn push_count_axis_ticks(
    canvas: &ChartCanvas,
    frame: &mut RenderFrame,
    y_scale: LinearScale,
    max_count: f64,
) {
    let mut previous = None;
    for value in count_ticks(max_count, COUNT_AXIS_DIVISIONS) {
        let rounded = value.round();
        if previous == Some(rounded) {
            continue;
        }
        previous = Some(rounded);
        canvas.push_y_tick(frame, y_scale.map(rounded), format!("{}", rounded as u64));
    }
}
