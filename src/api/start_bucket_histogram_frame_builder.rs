use tracing::debug;

use crate::core::{
    BinLayout, Color, DEFAULT_START_WINDOWS, LinearScale, Point, ResultRecord, WindowPartition,
    choose_tick_interval, interpolate_color, minutes_to_label, stack_bins,
};
use crate::error::ChartResult;
use crate::render::{
    CanvasLayerKind, Definition, GradientStop, Paint, RectPrimitive, RenderFrame, TextAnchor,
    TextPrimitive,
};

use super::chart_canvas::{CHART_HEIGHT, CHART_WIDTH, ChartCanvas, bucket_phrase};
use super::chart_data::{
    finisher_start_times, resolve_highlights, timed_finishers, with_start_times,
};
use super::chart_options::RenderOptions;
use super::highlight_overlay::{HighlightMark, push_highlights};
use super::net_time_histogram_frame_builder::{push_count_axis_ticks, push_time_axis_ticks};

const GRADIENT_ID: &str = "startGradient";
const GRADIENT_STOPS: usize = 10;
const LEGEND_WIDTH_PX: f64 = 180.0;
const LEGEND_HEIGHT_PX: f64 = 12.0;
const LEGEND_RIGHT_INSET_PX: f64 = 220.0;

/// Net time histogram whose bars are split and colored by start window.
///
/// Start times are grouped into [`DEFAULT_START_WINDOWS`] equal windows over
/// the start range of every finisher, including those whose net time did not
/// parse. Each window maps onto the red to purple gradient. Segments stack
/// bottom-up in window order.
pub fn build_start_bucket_histogram_frame(
    records: &[ResultRecord],
    options: &RenderOptions,
) -> ChartResult<RenderFrame> {
    options.validate()?;
    let finishers = timed_finishers(records, options)?;
    let started = with_start_times(&finishers)?;
    let canvas = ChartCanvas::new(CHART_WIDTH, CHART_HEIGHT);
    let plot = canvas.plot;

    let layout = BinLayout::fit(
        started.iter().map(|(finisher, _)| finisher.net_minutes()),
        options.bucket_size_minutes(),
    )?;
    let partition =
        WindowPartition::fit(finisher_start_times(records, options), DEFAULT_START_WINDOWS)?;
    let bins = stack_bins(
        &layout,
        &partition,
        started
            .iter()
            .map(|(finisher, start)| (finisher.net_minutes(), *start)),
    );
    let max_count = bins.iter().map(|bin| bin.total).max().unwrap_or(0).max(1) as f64;

    let x_scale = LinearScale::new(layout.min, layout.domain_end(), plot.left, plot.right);
    let y_scale = LinearScale::new(0.0, max_count, plot.bottom, plot.top);

    let mut frame = canvas.begin_frame(
        "Net finish time histogram by start time",
        "Finishers per net time bucket, colored by start time",
    );
    frame.define(Definition::HorizontalGradient {
        id: GRADIENT_ID.to_owned(),
        stops: (0..=GRADIENT_STOPS)
            .map(|index| {
                let offset = index as f64 / GRADIENT_STOPS as f64;
                GradientStop {
                    offset,
                    color: interpolate_color(offset),
                }
            })
            .collect(),
    });

    let interval = choose_tick_interval(layout.min, layout.domain_end());
    push_time_axis_ticks(&canvas, &mut frame, &layout, x_scale, interval);
    push_count_axis_ticks(&canvas, &mut frame, y_scale, max_count);
    canvas.push_axes(&mut frame, 1.5);

    for bin in bins.iter().filter(|bin| bin.total > 0) {
        let x = x_scale.map(bin.start);
        let width = (x_scale.map(bin.start + layout.width) - x - 1.0).max(1.0);
        let finish_range = format!(
            "{}-{}",
            minutes_to_label(bin.start),
            minutes_to_label(bin.start + layout.width)
        );

        let mut below = 0usize;
        for segment in &bin.segments {
            let y_bottom = y_scale.map(below as f64);
            let y_top = y_scale.map((below + segment.count) as f64);
            below += segment.count;
            let color = interpolate_color(partition.normalized(segment.representative));
            frame.push(
                CanvasLayerKind::Series,
                RectPrimitive::new(x, y_top, width, (y_bottom - y_top).max(1.0), color)
                    .with_tooltip(format!(
                        "Finish {finish_range}\nStart bucket {}: {}",
                        segment.key + 1,
                        segment.count
                    )),
            );
        }
    }

    push_legend(&mut frame, &partition);

    let marks: Vec<HighlightMark> =
        resolve_highlights(options, started.iter().map(|(finisher, _)| finisher.record))
            .into_iter()
            .filter_map(|highlight| {
                let (finisher, start) = started[highlight.position];
                let bin = &bins[layout.index_of(finisher.net_minutes())];
                let center = bin.segment_center(partition.window_of(start))?;
                Some(HighlightMark {
                    slot: highlight.slot,
                    point: Point::new(
                        x_scale.map(bin.start + layout.width / 2.0),
                        y_scale.map(center),
                    ),
                    tooltip: format!("{} - {}", highlight.label, finisher.net_label()),
                    label: highlight.label,
                })
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
        finishers = started.len(),
        bins = bins.len(),
        start_windows = partition.count,
        "built start bucket histogram frame"
    );
    Ok(frame)
}

fn push_legend(frame: &mut RenderFrame, partition: &WindowPartition) {
    let x = f64::from(CHART_WIDTH) - 30.0 - LEGEND_RIGHT_INSET_PX;
    let y = 40.0;
    let range = partition.max - partition.min;

    frame.push(
        CanvasLayerKind::Legend,
        RectPrimitive::new(
            x,
            y,
            LEGEND_WIDTH_PX,
            LEGEND_HEIGHT_PX,
            Paint::Gradient(GRADIENT_ID.to_owned()),
        ),
    );
    frame.push(
        CanvasLayerKind::Legend,
        TextPrimitive::new("Earlier start", x, y - 6.0, 11.0, Color::AXIS, TextAnchor::Start),
    );
    frame.push(
        CanvasLayerKind::Legend,
        TextPrimitive::new(
            "Later start",
            x + LEGEND_WIDTH_PX,
            y - 6.0,
            11.0,
            Color::AXIS,
            TextAnchor::End,
        ),
    );

    for (fraction, anchor) in [
        (0.0, TextAnchor::Start),
        (0.5, TextAnchor::Middle),
        (1.0, TextAnchor::End),
    ] {
        frame.push(
            CanvasLayerKind::Legend,
            TextPrimitive::new(
                start_offset_label(range * fraction, range),
                x + LEGEND_WIDTH_PX * fraction,
                y + 24.0,
                10.0,
                Color::MUTED_TEXT,
                anchor,
            ),
        );
    }
}

/// Minutes for ranges over three minutes, seconds otherwise.
fn start_offset_label(offset_seconds: f64, range_seconds: f64) -> String {
    if range_seconds > 180.0 {
        format!("{}min", (offset_seconds / 60.0).round() as i64)
    } else {
        format!("{}s", offset_seconds.round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::start_offset_label;

    #[test]
    fn legend_labels_switch_units_at_three_minutes() {
        assert_eq!(start_offset_label(90.0, 180.0), "90s");
        assert_eq!(start_offset_label(900.0, 1800.0), "15min");
    }
}
