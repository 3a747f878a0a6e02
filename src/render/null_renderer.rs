use crate::error::ChartResult;
use crate::render::{Primitive, RenderFrame, Renderer};

/// No-op renderer used by tests.
///
/// It still validates frame content and records what it would have drawn.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_line_count: usize,
    pub last_rect_count: usize,
    pub last_circle_count: usize,
    pub last_text_count: usize,
    pub last_definition_count: usize,
}

impl Renderer for NullRenderer {
    type Output = ();

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        *self = Self {
            last_definition_count: frame.definitions.len(),
            ..Self::default()
        };
        for primitive in frame.primitives() {
            match primitive {
                Primitive::Line(_) => self.last_line_count += 1,
                Primitive::Rect(_) => self.last_rect_count += 1,
                Primitive::Circle(_) => self.last_circle_count += 1,
                Primitive::Text(_) => self.last_text_count += 1,
            }
        }
        Ok(())
    }
}
