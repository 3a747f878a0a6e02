use tracing::debug;

use crate::core::{
    COUNT_AXIS_DIVISIONS, Color, LinearScale, Point, ResultRecord, choose_tick_interval,
    count_ticks, minutes_to_label, tick_values, value_extent,
};
use crate::error::ChartResult;
use crate::render::{CanvasLayerKind, CirclePrimitive, RenderFrame};

use super::chart_canvas::{CHART_HEIGHT, CHART_WIDTH, ChartCanvas};
use super::chart_data::{resolve_highlights, timed_finishers};
use super::chart_options::RenderOptions;
use super::highlight_overlay::{HighlightMark, push_highlights};

const POINT_RADIUS_PX: f64 = 2.0;

/// Scatter of every finisher's net time against its position in the input.
pub fn build_net_times_frame(
    records: &[ResultRecord],
    options: &RenderOptions,
) -> ChartResult<RenderFrame> {
    options.validate()?;
    let finishers = timed_finishers(records, options)?;
    let canvas = ChartCanvas::new(CHART_WIDTH, CHART_HEIGHT);
    let plot = canvas.plot;

    let last_index = (finishers.len() - 1) as f64;
    let (min_seconds, max_seconds) =
        value_extent(finishers.iter().map(|finisher| finisher.net_seconds))
            .unwrap_or((0.0, 0.0));
    let x_scale = LinearScale::new(0.0, last_index, plot.left, plot.right);
    let y_scale = LinearScale::new(min_seconds, max_seconds, plot.bottom, plot.top);

    let mut frame = canvas.begin_frame(
        "Net finish times",
        "Net finish time of every finisher in file order",
    );

    let interval = choose_tick_interval(min_seconds / 60.0, max_seconds / 60.0);
    for minutes in tick_values(min_seconds / 60.0, max_seconds / 60.0, interval) {
        let y = y_scale.map(minutes * 60.0);
        canvas.push_horizontal_grid(&mut frame, y, Color::GRID, 0.5);
        canvas.push_y_tick(&mut frame, y, minutes_to_label(minutes));
    }
    let mut positions: Vec<f64> = count_ticks(last_index, COUNT_AXIS_DIVISIONS)
        .into_iter()
        .map(f64::round)
        .collect();
    positions.dedup();
    for position in positions {
        canvas.push_x_tick(
            &mut frame,
            x_scale.map(position),
            format!("{}", position as u64 + 1),
        );
    }
    canvas.push_axes(&mut frame, 1.5);

    for (index, finisher) in finishers.iter().enumerate() {
        frame.push(
            CanvasLayerKind::Series,
            CirclePrimitive::new(
                x_scale.map(index as f64),
                y_scale.map(finisher.net_seconds),
                POINT_RADIUS_PX,
                Color::SERIES,
            )
            .with_tooltip(format!(
                "{}. {} - {}",
                index + 1,
                finisher.record.display_name(),
                finisher.net_label()
            )),
        );
    }

    let marks: Vec<HighlightMark> =
        resolve_highlights(options, finishers.iter().map(|finisher| finisher.record))
            .into_iter()
            .map(|highlight| {
                let finisher = finishers[highlight.position];
                HighlightMark {
                    slot: highlight.slot,
                    point: Point::new(
                        x_scale.map(highlight.position as f64),
                        y_scale.map(finisher.net_seconds),
                    ),
                    tooltip: format!("{} - {}", highlight.label, finisher.net_label()),
                    label: highlight.label,
                }
            })
            .collect();
    push_highlights(&mut frame, plot, &marks, options.callout)?;

    canvas.push_axis_titles(
        &mut frame,
        "Participants (ordered as in file)",
        "Net finish time",
    );
    canvas.push_attribution(&mut frame);

    debug!(
        points = finishers.len(),
        highlights = marks.len(),
        "built net times frame"
    );
    Ok(frame)
}
