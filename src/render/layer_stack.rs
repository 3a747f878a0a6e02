use serde::{Deserialize, Serialize};

/// Paint layers of a chart, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Watermark,
    Grid,
    Axis,
    Series,
    Legend,
    Highlight,
    Annotation,
}

impl CanvasLayerKind {
    /// Every layer in paint order.
    pub const CANONICAL_ORDER: [Self; 8] = [
        Self::Background,
        Self::Watermark,
        Self::Grid,
        Self::Axis,
        Self::Series,
        Self::Legend,
        Self::Highlight,
        Self::Annotation,
    ];

    #[must_use]
    pub fn paint_index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::CanvasLayerKind;

    #[test]
    fn highlights_paint_above_series_and_below_annotations() {
        let order = CanvasLayerKind::CANONICAL_ORDER;
        for (index, kind) in order.iter().enumerate() {
            assert_eq!(kind.paint_index(), index);
        }
        assert!(CanvasLayerKind::Series.paint_index() < CanvasLayerKind::Highlight.paint_index());
        assert!(
            CanvasLayerKind::Highlight.paint_index() < CanvasLayerKind::Annotation.paint_index()
        );
    }
}
