use crate::core::{Color, Padding, PlotArea, Viewport};
use crate::render::{
    CanvasLayerKind, LinePrimitive, RectPrimitive, RenderFrame, TextAnchor, TextPrimitive,
};

pub(super) const CHART_WIDTH: u32 = 1200;
pub(super) const CHART_HEIGHT: u32 = 600;
pub(super) const TALL_CHART_HEIGHT: u32 = 800;

pub(super) const ATTRIBUTION_URL: &str =
    "https://bukowskiadam.github.io/datasport-results-analyzer/";
const WATERMARK_TEXT: &str = "bukowskiadam.github.io/datasport-results-analyzer";

const TICK_LENGTH_PX: f64 = 6.0;
const X_TICK_LABEL_OFFSET_PX: f64 = 22.0;
const Y_TICK_LABEL_GAP_PX: f64 = 10.0;
const TICK_FONT_PX: f64 = 12.0;
const AXIS_TITLE_FONT_PX: f64 = 14.0;

/// Canvas geometry shared by all chart builders plus the decorations every
/// chart carries (background, watermark, axes, titles, attribution).
#[derive(Debug, Clone, Copy)]
pub(super) struct ChartCanvas {
    pub viewport: Viewport,
    pub plot: PlotArea,
}

impl ChartCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        let viewport = Viewport::new(width, height);
        Self {
            viewport,
            plot: PlotArea::inset(viewport, Padding::default()),
        }
    }

    fn width(self) -> f64 {
        f64::from(self.viewport.width)
    }

    fn height(self) -> f64 {
        f64::from(self.viewport.height)
    }

    /// Starts a frame with the white background and the watermark grid.
    pub fn begin_frame(self, title: &str, description: &str) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport).with_title(title, description);
        frame.push(
            CanvasLayerKind::Background,
            RectPrimitive::new(0.0, 0.0, self.width(), self.height(), Color::WHITE),
        );

        for row in 1..=2 {
            for col in 1..=3 {
                let x = f64::from(col) * self.width() / 4.0;
                let y = f64::from(row) * self.height() / 3.0;
                frame.push(
                    CanvasLayerKind::Watermark,
                    TextPrimitive::new(WATERMARK_TEXT, x, y, 24.0, Color::BLACK, TextAnchor::Middle)
                        .with_opacity(0.03)
                        .rotated(-15.0),
                );
            }
        }
        frame
    }

    pub fn push_axes(self, frame: &mut RenderFrame, stroke_width: f64) {
        let plot = self.plot;
        frame.push(
            CanvasLayerKind::Axis,
            LinePrimitive::new(
                plot.left,
                plot.bottom,
                plot.right,
                plot.bottom,
                stroke_width,
                Color::AXIS,
            ),
        );
        frame.push(
            CanvasLayerKind::Axis,
            LinePrimitive::new(plot.left, plot.top, plot.left, plot.bottom, stroke_width, Color::AXIS),
        );
    }

    pub fn push_x_tick(self, frame: &mut RenderFrame, x: f64, label: String) {
        let plot = self.plot;
        frame.push(
            CanvasLayerKind::Axis,
            LinePrimitive::new(x, plot.bottom, x, plot.bottom + TICK_LENGTH_PX, 1.0, Color::AXIS),
        );
        frame.push(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                label,
                x,
                plot.bottom + X_TICK_LABEL_OFFSET_PX,
                TICK_FONT_PX,
                Color::AXIS,
                TextAnchor::Middle,
            ),
        );
    }

    pub fn push_y_tick(self, frame: &mut RenderFrame, y: f64, label: String) {
        let plot = self.plot;
        frame.push(
            CanvasLayerKind::Axis,
            LinePrimitive::new(plot.left - TICK_LENGTH_PX, y, plot.left, y, 1.0, Color::AXIS),
        );
        frame.push(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                label,
                plot.left - Y_TICK_LABEL_GAP_PX,
                y,
                TICK_FONT_PX,
                Color::AXIS,
                TextAnchor::End,
            )
            .middle_baseline(),
        );
    }

    pub fn push_horizontal_grid(self, frame: &mut RenderFrame, y: f64, color: Color, opacity: f64) {
        let plot = self.plot;
        frame.push(
            CanvasLayerKind::Grid,
            LinePrimitive::new(plot.left, y, plot.right, y, 1.0, color).with_opacity(opacity),
        );
    }

    pub fn push_vertical_grid(self, frame: &mut RenderFrame, x: f64, color: Color, opacity: f64) {
        let plot = self.plot;
        frame.push(
            CanvasLayerKind::Grid,
            LinePrimitive::new(x, plot.top, x, plot.bottom, 1.0, color).with_opacity(opacity),
        );
    }

    pub fn push_axis_titles(self, frame: &mut RenderFrame, x_title: &str, y_title: &str) {
        frame.push(
            CanvasLayerKind::Annotation,
            TextPrimitive::new(
                x_title,
                self.plot.center_x(),
                self.height() - 20.0,
                AXIS_TITLE_FONT_PX,
                Color::AXIS,
                TextAnchor::Middle,
            ),
        );
        frame.push(
            CanvasLayerKind::Annotation,
            TextPrimitive::new(
                y_title,
                20.0,
                self.height() / 2.0,
                AXIS_TITLE_FONT_PX,
                Color::AXIS,
                TextAnchor::Middle,
            )
            .rotated(-90.0),
        );
    }

    pub fn push_attribution(self, frame: &mut RenderFrame) {
        frame.push(
            CanvasLayerKind::Annotation,
            TextPrimitive::new(
                format!("Created with {ATTRIBUTION_URL}"),
                self.width() - 10.0,
                self.height() - 5.0,
                10.0,
                Color::MUTED_TEXT,
                TextAnchor::End,
            )
            .with_link(ATTRIBUTION_URL),
        );
    }
}

/// `"1-minute"`, `"2.5-minute"` or `"30-second"` for a bucket width.
pub(super) fn bucket_phrase(bucket_size_seconds: f64) -> String {
    if bucket_size_seconds < 60.0 {
        format!("{}-second", compact(bucket_size_seconds))
    } else {
        format!("{}-minute", compact(bucket_size_seconds / 60.0))
    }
}

/// Integers without a fraction, everything else with up to two decimals.
pub(super) fn compact(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}
