use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{CanvasLayerKind, Definition, Primitive};

/// Primitives painted together in one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub primitives: Vec<Primitive>,
}

/// Backend-agnostic scene for one chart.
///
/// Layers are kept in canonical paint order; primitives inside a layer keep
/// insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub title: String,
    pub description: String,
    pub definitions: Vec<Definition>,
    pub layers: Vec<LayerPrimitives>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            title: String::new(),
            description: String::new(),
            definitions: Vec::new(),
            layers: CanvasLayerKind::CANONICAL_ORDER
                .into_iter()
                .map(|kind| LayerPrimitives {
                    kind,
                    primitives: Vec::new(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.title = title.into();
        self.description = description.into();
        self
    }

    pub fn push(&mut self, kind: CanvasLayerKind, primitive: impl Into<Primitive>) {
        if let Some(layer) = self.layers.iter_mut().find(|layer| layer.kind == kind) {
            layer.primitives.push(primitive.into());
        }
    }

    pub fn define(&mut self, definition: Definition) {
        self.definitions.push(definition);
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> &[Primitive] {
        self.layers
            .iter()
            .find(|layer| layer.kind == kind)
            .map(|layer| layer.primitives.as_slice())
            .unwrap_or_default()
    }

    /// All primitives in paint order.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.layers.iter().flat_map(|layer| layer.primitives.iter())
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for (index, definition) in self.definitions.iter().enumerate() {
            if definition.id().is_empty() {
                return Err(ChartError::InvalidData(
                    "definition id must not be empty".to_owned(),
                ));
            }
            if self.definitions[..index]
                .iter()
                .any(|other| other.id() == definition.id())
            {
                return Err(ChartError::InvalidData(format!(
                    "duplicate definition id `{}`",
                    definition.id()
                )));
            }
        }

        for primitive in self.primitives() {
            primitive.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.primitives.is_empty())
    }
}
