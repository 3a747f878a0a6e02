use crate::core::{CalloutConfig, Color, LabelSide, PlotArea, Point, highlight_color, place_callout};
use crate::error::ChartResult;
use crate::render::{
    CanvasLayerKind, CirclePrimitive, Definition, LinePrimitive, RenderFrame, TextAnchor,
    TextPrimitive,
};

const HIGHLIGHT_RADIUS_PX: f64 = 6.0;
const HIGHLIGHT_FONT_PX: f64 = 16.0;

/// One highlighted mark ready to be drawn.
#[derive(Debug, Clone)]
pub(super) struct HighlightMark {
    pub slot: usize,
    pub point: Point,
    pub label: String,
    pub tooltip: String,
}

/// Draws highlight dots, arrows and name labels above the series.
///
/// Each highlight gets its own arrow marker definition in its palette color.
pub(super) fn push_highlights(
    frame: &mut RenderFrame,
    plot: PlotArea,
    marks: &[HighlightMark],
    config: CalloutConfig,
) -> ChartResult<()> {
    for mark in marks {
        let color = highlight_color(mark.slot);
        let marker_id = format!("highlight-arrow-{}", mark.slot);
        if !frame
            .definitions
            .iter()
            .any(|definition| definition.id() == marker_id)
        {
            frame.define(Definition::ArrowMarker {
                id: marker_id.clone(),
                color,
            });
        }

        let callout = place_callout(mark.point, plot, mark.slot, config)?;

        frame.push(
            CanvasLayerKind::Highlight,
            CirclePrimitive::new(mark.point.x, mark.point.y, HIGHLIGHT_RADIUS_PX, color)
                .with_stroke(Color::WHITE, 2.0)
                .with_tooltip(mark.tooltip.clone()),
        );
        frame.push(
            CanvasLayerKind::Highlight,
            LinePrimitive::new(
                callout.arrow_start.x,
                callout.arrow_start.y,
                callout.arrow_end.x,
                callout.arrow_end.y,
                2.0,
                color,
            )
            .with_marker_end(marker_id),
        );

        let anchor = match callout.side() {
            LabelSide::Right => TextAnchor::Start,
            LabelSide::Left => TextAnchor::End,
        };
        if !mark.label.is_empty() {
            frame.push(
                CanvasLayerKind::Highlight,
                TextPrimitive::new(
                    mark.label.clone(),
                    callout.label.x,
                    callout.label.y,
                    HIGHLIGHT_FONT_PX,
                    color,
                    anchor,
                )
                .bold(),
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Viewport;
    use crate::render::Primitive;

    #[test]
    fn near_top_highlight_label_is_placed_to_the_side_inside_the_canvas() {
        let viewport = Viewport::new(1200, 600);
        let plot = PlotArea::new(70.0, 1170.0, 40.0, 530.0);
        let mut frame = RenderFrame::new(viewport);
        let marks = [HighlightMark {
            slot: 0,
            point: Point::new(600.0, 45.0),
            label: "Kowalski Jan".to_owned(),
            tooltip: "Kowalski Jan".to_owned(),
        }];
        push_highlights(&mut frame, plot, &marks, CalloutConfig::default()).expect("highlights");

        let label = frame
            .layer(CanvasLayerKind::Highlight)
            .iter()
            .find_map(|primitive| match primitive {
                Primitive::Text(text) => Some(text.clone()),
                _ => None,
            })
            .expect("label");
        assert!(viewport.contains(label.x, label.y));
        assert_eq!(label.anchor, TextAnchor::Start);
        assert!(label.x > 600.0);
        assert_eq!(frame.definitions.len(), 1);
    }
}
