use crate::core::Color;
use crate::error::{ChartError, ChartResult};

/// Fill or stroke paint.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Reference to a gradient definition by id.
    Gradient(String),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::Solid(color)
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub opacity: Option<f64>,
    /// Id of an arrow marker drawn at the end point.
    pub marker_end: Option<String>,
}

impl LinePrimitive {
    #[must_use]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            opacity: None,
            marker_end: None,
        }
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    #[must_use]
    pub fn with_marker_end(mut self, marker_id: impl Into<String>) -> Self {
        self.marker_end = Some(marker_id.into());
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        validate_opacity(self.opacity)
    }
}

/// Draw command for one axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Paint,
    pub tooltip: Option<String>,
}

impl RectPrimitive {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64, fill: impl Into<Paint>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: fill.into(),
            tooltip: None,
        }
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "rect coordinates must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || self.width < 0.0 || !self.height.is_finite() || self.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Circle outline drawn around a mark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// Draw command for one filled circle in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Color,
    pub opacity: Option<f64>,
    pub stroke: Option<Stroke>,
    pub tooltip: Option<String>,
}

impl CirclePrimitive {
    #[must_use]
    pub fn new(cx: f64, cy: f64, radius: f64, fill: Color) -> Self {
        Self {
            cx,
            cy,
            radius,
            fill,
            opacity: None,
            stroke: None,
            tooltip: None,
        }
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(Stroke { color, width });
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.cx.is_finite() || !self.cy.is_finite() {
            return Err(ChartError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be finite and > 0".to_owned(),
            ));
        }
        validate_opacity(self.opacity)
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub anchor: TextAnchor,
    pub bold: bool,
    pub opacity: Option<f64>,
    /// Rotation in degrees around `(x, y)`.
    pub rotation_deg: Option<f64>,
    /// Vertically center the text on `y`.
    pub middle_baseline: bool,
    /// Wraps the text in a hyperlink.
    pub link: Option<String>,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        anchor: TextAnchor,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            anchor,
            bold: false,
            opacity: None,
            rotation_deg: None,
            middle_baseline: false,
            link: None,
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    #[must_use]
    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation_deg = Some(degrees);
        self
    }

    #[must_use]
    pub fn middle_baseline(mut self) -> Self {
        self.middle_baseline = true;
        self
    }

    #[must_use]
    pub fn with_link(mut self, href: impl Into<String>) -> Self {
        self.link = Some(href.into());
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        validate_opacity(self.opacity)
    }
}

/// One color stop of a linear gradient, offset in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

/// Reusable definitions referenced by id from primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    ArrowMarker { id: String, color: Color },
    HorizontalGradient { id: String, stops: Vec<GradientStop> },
}

impl Definition {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::ArrowMarker { id, .. } | Self::HorizontalGradient { id, .. } => id,
        }
    }
}

/// Any drawable primitive, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
    Text(TextPrimitive),
}

impl Primitive {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

impl From<LinePrimitive> for Primitive {
    fn from(line: LinePrimitive) -> Self {
        Self::Line(line)
    }
}

impl From<RectPrimitive> for Primitive {
    fn from(rect: RectPrimitive) -> Self {
        Self::Rect(rect)
    }
}

impl From<CirclePrimitive> for Primitive {
    fn from(circle: CirclePrimitive) -> Self {
        Self::Circle(circle)
    }
}

impl From<TextPrimitive> for Primitive {
    fn from(text: TextPrimitive) -> Self {
        Self::Text(text)
    }
}

fn validate_opacity(opacity: Option<f64>) -> ChartResult<()> {
    match opacity {
        Some(value) if !value.is_finite() || !(0.0..=1.0).contains(&value) => Err(
            ChartError::InvalidData("opacity must be finite and in [0, 1]".to_owned()),
        ),
        _ => Ok(()),
    }
}
