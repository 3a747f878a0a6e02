use tracing::debug;

use crate::core::{
    Color, LinearScale, Point, ResultRecord, choose_tick_interval, format_hms, format_offset,
    minutes_to_label, tick_values, value_extent,
};
use crate::error::ChartResult;
use crate::render::{CanvasLayerKind, CirclePrimitive, RenderFrame};

use super::chart_canvas::{CHART_WIDTH, ChartCanvas, TALL_CHART_HEIGHT, compact};
use super::chart_data::{resolve_highlights, timed_finishers, with_start_times};
use super::chart_options::RenderOptions;
use super::highlight_overlay::{HighlightMark, push_highlights};

const POINT_RADIUS_PX: f64 = 3.0;
const POINT_OPACITY: f64 = 0.6;
const GRID_COLOR: Color = Color::rgb(0xe0, 0xe0, 0xe0);

/// Scatter of net finish time (x) against start offset from the earliest
/// starter (y).
pub fn build_start_vs_finish_frame(
    records: &[ResultRecord],
    options: &RenderOptions,
) -> ChartResult<RenderFrame> {
    options.validate()?;
    let finishers = timed_finishers(records, options)?;
    let started = with_start_times(&finishers)?;
    let canvas = ChartCanvas::new(CHART_WIDTH, TALL_CHART_HEIGHT);
    let plot = canvas.plot;

    let (min_net, max_net) =
        value_extent(started.iter().map(|(finisher, _)| finisher.net_seconds))
            .unwrap_or((0.0, 0.0));
    let (first_start, last_start) =
        value_extent(started.iter().map(|(_, start)| *start)).unwrap_or((0.0, 0.0));
    let max_offset = last_start - first_start;

    let x_scale = LinearScale::new(min_net, max_net, plot.left, plot.right);
    let y_scale = LinearScale::new(0.0, max_offset, plot.bottom, plot.top);

    let mut frame = canvas.begin_frame(
        "Start time vs net finish time",
        "Net finish time of every finisher against their start offset",
    );

    let x_interval = choose_tick_interval(min_net / 60.0, max_net / 60.0);
    for minutes in tick_values(min_net / 60.0, max_net / 60.0, x_interval) {
        let x = x_scale.map(minutes * 60.0);
        canvas.push_vertical_grid(&mut frame, x, GRID_COLOR, 1.0);
        canvas.push_x_tick(&mut frame, x, minutes_to_label(minutes));
    }

    let max_offset_minutes = max_offset / 60.0;
    let short_wave = max_offset_minutes < 60.0;
    let y_interval = choose_tick_interval(0.0, max_offset_minutes);
    for minutes in tick_values(0.0, max_offset_minutes, y_interval) {
        let y = y_scale.map(minutes * 60.0);
        canvas.push_horizontal_grid(&mut frame, y, GRID_COLOR, 1.0);
        let label = if short_wave {
            format!("+{}", compact(minutes))
        } else {
            format!("+{}", minutes_to_label(minutes))
        };
        canvas.push_y_tick(&mut frame, y, label);
    }
    canvas.push_axes(&mut frame, 2.0);

    for (finisher, start) in &started {
        let offset = start - first_start;
        frame.push(
            CanvasLayerKind::Series,
            CirclePrimitive::new(
                x_scale.map(finisher.net_seconds),
                y_scale.map(offset),
                POINT_RADIUS_PX,
                Color::SERIES,
            )
            .with_opacity(POINT_OPACITY)
            .with_tooltip(format!(
                "{} - Start: {}, Net time: {}",
                finisher.record.display_name(),
                format_offset(offset),
                format_hms(finisher.net_seconds)
            )),
        );
    }

    let marks: Vec<HighlightMark> =
        resolve_highlights(options, started.iter().map(|(finisher, _)| finisher.record))
            .into_iter()
            .map(|highlight| {
                let (finisher, start) = started[highlight.position];
                let offset = start - first_start;
                HighlightMark {
                    slot: highlight.slot,
                    point: Point::new(x_scale.map(finisher.net_seconds), y_scale.map(offset)),
                    tooltip: format!(
                        "{} - Start: {}, Net time: {}",
                        highlight.label,
                        format_offset(offset),
                        format_hms(finisher.net_seconds)
                    ),
                    label: highlight.label,
                }
            })
            .collect();
    push_highlights(&mut frame, plot, &marks, options.callout)?;

    let y_title = if short_wave {
        "Start offset (minutes after first starter)"
    } else {
        "Start offset (hh:mm after first starter)"
    };
    canvas.push_axis_titles(&mut frame, "Net finish time", y_title);
    canvas.push_attribution(&mut frame);

    debug!(
        points = started.len(),
        max_offset_seconds = max_offset,
        "built start vs finish frame"
    );
    Ok(frame)
}
