mod frame;
mod layer_stack;
mod null_renderer;
mod primitives;
mod svg;

pub use frame::{LayerPrimitives, RenderFrame};
pub use layer_stack::CanvasLayerKind;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Definition, GradientStop, LinePrimitive, Paint, Primitive, RectPrimitive,
    Stroke, TextAnchor, TextPrimitive,
};
pub use svg::SvgRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from record parsing and chart layout.
pub trait Renderer {
    type Output;

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<Self::Output>;
}
