//! Arrow-and-label callouts for highlighted data points.
//!
//! A callout is placed diagonally up-right of its point by default. Points
//! close to the top of the plot get a side callout instead, and points close
//! to the right edge flip to the upper left. Every highlight is staggered
//! vertically by its index so neighboring callouts do not stack on top of
//! each other.

use serde::{Deserialize, Serialize};

use crate::core::{PlotArea, Point};
use crate::error::{ChartError, ChartResult};

/// Pixel constants driving callout placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalloutConfig {
    /// Extra vertical offset per highlight index.
    pub stagger_px: f64,
    /// Room needed above the point (before stagger) for a diagonal callout.
    pub min_space_above_px: f64,
    /// Room needed right of the point for an up-right callout.
    pub min_space_right_px: f64,
    pub diagonal_dx_px: f64,
    pub diagonal_dy_px: f64,
    /// Horizontal reach of a full side callout.
    pub side_dx_px: f64,
    /// Drop of the side callout tail below the point.
    pub side_drop_px: f64,
    /// Longest reach of a shortened callout.
    pub short_max_px: f64,
    /// Distance a shortened callout keeps from the plot edge.
    pub short_margin_px: f64,
    /// Rise of a shortened up-left callout.
    pub short_rise_px: f64,
    /// Gap between the arrow head and the point.
    pub standoff_px: f64,
    /// Gap between the arrow tail and the label.
    pub text_gap_px: f64,
    /// Baseline shift of side labels relative to the arrow tail.
    pub side_text_baseline_px: f64,
}

impl Default for CalloutConfig {
    fn default() -> Self {
        Self {
            stagger_px: 25.0,
            min_space_above_px: 50.0,
            min_space_right_px: 60.0,
            diagonal_dx_px: 60.0,
            diagonal_dy_px: 40.0,
            side_dx_px: 80.0,
            side_drop_px: 5.0,
            short_max_px: 60.0,
            short_margin_px: 10.0,
            short_rise_px: 20.0,
            standoff_px: 8.0,
            text_gap_px: 5.0,
            side_text_baseline_px: 4.0,
        }
    }
}

impl CalloutConfig {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.stagger_px, "stagger_px"),
            (self.min_space_above_px, "min_space_above_px"),
            (self.min_space_right_px, "min_space_right_px"),
            (self.diagonal_dx_px, "diagonal_dx_px"),
            (self.diagonal_dy_px, "diagonal_dy_px"),
            (self.side_dx_px, "side_dx_px"),
            (self.side_drop_px, "side_drop_px"),
            (self.short_max_px, "short_max_px"),
            (self.short_margin_px, "short_margin_px"),
            (self.short_rise_px, "short_rise_px"),
            (self.standoff_px, "standoff_px"),
            (self.text_gap_px, "text_gap_px"),
            (self.side_text_baseline_px, "side_text_baseline_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "callout config `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Which rule produced a callout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalloutPlacement {
    DiagonalUpRight,
    DiagonalUpLeft,
    ShortUpLeft,
    SideRight,
    SideLeft,
    ShortRight,
    ShortLeft,
}

impl CalloutPlacement {
    #[must_use]
    pub fn side(self) -> LabelSide {
        match self {
            Self::DiagonalUpRight | Self::SideRight | Self::ShortRight => LabelSide::Right,
            Self::DiagonalUpLeft | Self::ShortUpLeft | Self::SideLeft | Self::ShortLeft => {
                LabelSide::Left
            }
        }
    }

    #[must_use]
    pub fn is_side(self) -> bool {
        matches!(
            self,
            Self::SideRight | Self::SideLeft | Self::ShortRight | Self::ShortLeft
        )
    }
}

/// Side of the point the label sits on. Right-side labels start at their
/// anchor, left-side labels end at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Callout {
    pub placement: CalloutPlacement,
    pub arrow_start: Point,
    pub arrow_end: Point,
    pub label: Point,
}

impl Callout {
    #[must_use]
    pub fn side(&self) -> LabelSide {
        self.placement.side()
    }
}

/// Computes the callout for the highlight at `index` anchored on `point`.
pub fn place_callout(
    point: Point,
    plot: PlotArea,
    index: usize,
    config: CalloutConfig,
) -> ChartResult<Callout> {
    let config = config.validate()?;
    if !point.x.is_finite() || !point.y.is_finite() {
        return Err(ChartError::InvalidData(
            "callout anchor must be finite".to_owned(),
        ));
    }

    let Point { x, y } = point;
    let offset = index as f64 * config.stagger_px;
    let space_above = y - plot.top;
    let space_right = plot.right - x;
    let space_left = x - plot.left;
    let short_reach =
        |space: f64| (space - config.short_margin_px).clamp(0.0, config.short_max_px);

    let callout = if space_above < config.min_space_above_px + offset {
        let (placement, reach) =
            if space_right > space_left && space_right > config.side_dx_px {
                (CalloutPlacement::SideRight, config.side_dx_px)
            } else if space_left > config.side_dx_px {
                (CalloutPlacement::SideLeft, config.side_dx_px)
            } else if space_right > space_left {
                (CalloutPlacement::ShortRight, short_reach(space_right))
            } else {
                (CalloutPlacement::ShortLeft, short_reach(space_left))
            };
        side_callout(point, placement, reach, offset, config)
    } else if space_right < config.min_space_right_px {
        if space_left > config.diagonal_dx_px {
            diagonal_callout(
                point,
                CalloutPlacement::DiagonalUpLeft,
                config.diagonal_dx_px,
                config.diagonal_dy_px + offset,
                config,
            )
        } else {
            diagonal_callout(
                point,
                CalloutPlacement::ShortUpLeft,
                short_reach(space_left),
                config.short_rise_px + offset,
                config,
            )
        }
    } else {
        diagonal_callout(
            point,
            CalloutPlacement::DiagonalUpRight,
            config.diagonal_dx_px,
            config.diagonal_dy_px + offset,
            config,
        )
    };

    Ok(keep_inside_vertically(callout, plot, config))
}

fn direction(placement: CalloutPlacement) -> f64 {
    match placement.side() {
        LabelSide::Right => 1.0,
        LabelSide::Left => -1.0,
    }
}

fn side_callout(
    point: Point,
    placement: CalloutPlacement,
    reach: f64,
    offset: f64,
    config: CalloutConfig,
) -> Callout {
    let dir = direction(placement);
    let arrow_start = Point::new(
        point.x + dir * reach,
        point.y + config.side_drop_px + offset,
    );
    Callout {
        placement,
        arrow_start,
        arrow_end: Point::new(point.x + dir * config.standoff_px, point.y),
        label: Point::new(
            arrow_start.x + dir * config.text_gap_px,
            arrow_start.y + config.side_text_baseline_px,
        ),
    }
}

fn diagonal_callout(
    point: Point,
    placement: CalloutPlacement,
    reach: f64,
    rise: f64,
    config: CalloutConfig,
) -> Callout {
    let dir = direction(placement);
    let arrow_start = Point::new(point.x + dir * reach, point.y - rise);
    Callout {
        placement,
        arrow_start,
        arrow_end: Point::new(
            point.x + dir * config.standoff_px,
            point.y - config.standoff_px,
        ),
        label: Point::new(arrow_start.x + dir * config.text_gap_px, arrow_start.y),
    }
}

// Heavily staggered callouts near the bottom edge would otherwise push the
// label below the plot.
fn keep_inside_vertically(mut callout: Callout, plot: PlotArea, config: CalloutConfig) -> Callout {
    let baseline = if callout.placement.is_side() {
        config.side_text_baseline_px
    } else {
        0.0
    };
    let low = plot.top;
    let high = (plot.bottom - baseline).max(low);
    let clamped = callout.arrow_start.y.clamp(low, high);
    callout.arrow_start.y = clamped;
    callout.label.y = clamped + baseline;
    callout
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot() -> PlotArea {
        PlotArea::new(70.0, 1170.0, 40.0, 530.0)
    }

    #[test]
    fn open_space_places_callout_up_and_right() {
        let callout =
            place_callout(Point::new(400.0, 300.0), plot(), 0, CalloutConfig::default())
                .expect("placement");
        assert_eq!(callout.placement, CalloutPlacement::DiagonalUpRight);
        assert_eq!(callout.arrow_start, Point::new(460.0, 260.0));
        assert_eq!(callout.arrow_end, Point::new(408.0, 292.0));
        assert_eq!(callout.label, Point::new(465.0, 260.0));
        assert_eq!(callout.side(), LabelSide::Right);
    }

    #[test]
    fn stagger_raises_later_highlights() {
        let first = place_callout(Point::new(400.0, 300.0), plot(), 0, CalloutConfig::default())
            .expect("placement");
        let third = place_callout(Point::new(400.0, 300.0), plot(), 2, CalloutConfig::default())
            .expect("placement");
        assert_eq!(first.arrow_start.y - third.arrow_start.y, 50.0);
    }

    #[test]
    fn near_top_edge_uses_side_placement() {
        let callout = place_callout(Point::new(400.0, 60.0), plot(), 0, CalloutConfig::default())
            .expect("placement");
        assert_eq!(callout.placement, CalloutPlacement::SideRight);
        assert_eq!(callout.arrow_start, Point::new(480.0, 65.0));
        assert_eq!(callout.arrow_end, Point::new(408.0, 60.0));
        assert_eq!(callout.label, Point::new(485.0, 69.0));
    }

    #[test]
    fn near_top_right_corner_goes_left() {
        let callout =
            place_callout(Point::new(1150.0, 45.0), plot(), 1, CalloutConfig::default())
                .expect("placement");
        assert_eq!(callout.placement, CalloutPlacement::SideLeft);
        assert_eq!(callout.side(), LabelSide::Left);
        assert!(callout.label.x < 1150.0);
    }

    #[test]
    fn narrow_plot_shortens_side_arrow() {
        let narrow = PlotArea::new(100.0, 160.0, 40.0, 530.0);
        let callout = place_callout(Point::new(125.0, 50.0), narrow, 0, CalloutConfig::default())
            .expect("placement");
        assert_eq!(callout.placement, CalloutPlacement::ShortRight);
        assert_eq!(callout.arrow_start.x, 150.0);
    }

    #[test]
    fn right_edge_flips_to_upper_left() {
        let callout =
            place_callout(Point::new(1140.0, 300.0), plot(), 0, CalloutConfig::default())
                .expect("placement");
        assert_eq!(callout.placement, CalloutPlacement::DiagonalUpLeft);
        assert_eq!(callout.arrow_start, Point::new(1080.0, 260.0));
        assert_eq!(callout.label.x, 1075.0);
    }

    #[test]
    fn cramped_corner_uses_short_upper_left() {
        let narrow = PlotArea::new(100.0, 140.0, 40.0, 530.0);
        let callout = place_callout(Point::new(130.0, 300.0), narrow, 0, CalloutConfig::default())
            .expect("placement");
        assert_eq!(callout.placement, CalloutPlacement::ShortUpLeft);
        assert_eq!(callout.arrow_start, Point::new(110.0, 280.0));
    }

    #[test]
    fn rejects_invalid_config_and_anchor() {
        let config = CalloutConfig {
            stagger_px: f64::NAN,
            ..CalloutConfig::default()
        };
        assert!(place_callout(Point::new(1.0, 1.0), plot(), 0, config).is_err());
        assert!(
            place_callout(
                Point::new(f64::INFINITY, 1.0),
                plot(),
                0,
                CalloutConfig::default()
            )
            .is_err()
        );
    }
}
