use serde::{Deserialize, Serialize};

/// Affine map from a data domain onto a pixel range.
///
/// A degenerate domain (`domain_min == domain_max`) maps with a span of `1`
/// instead of dividing by zero. Output is never clamped, so values outside the
/// domain extrapolate linearly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    #[must_use]
    pub const fn new(domain_min: f64, domain_max: f64, range_min: f64, range_max: f64) -> Self {
        Self {
            domain_min,
            domain_max,
            range_min,
            range_max,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_max - self.domain_min;
        let span = if span == 0.0 { 1.0 } else { span };
        self.range_min + (value - self.domain_min) / span * (self.range_max - self.range_min)
    }
}

#[cfg(test)]
mod tests {
    use super::LinearScale;
    use approx::assert_relative_eq;

    #[test]
    fn maps_domain_ends_to_range_ends() {
        let scale = LinearScale::new(10.0, 110.0, 70.0, 1170.0);
        assert_relative_eq!(scale.map(10.0), 70.0);
        assert_relative_eq!(scale.map(110.0), 1170.0);
        assert_relative_eq!(scale.map(60.0), 620.0);
    }

    #[test]
    fn inverted_range_maps_larger_values_upwards() {
        let scale = LinearScale::new(0.0, 10.0, 530.0, 40.0);
        assert_relative_eq!(scale.map(0.0), 530.0);
        assert_relative_eq!(scale.map(10.0), 40.0);
    }

    #[test]
    fn degenerate_domain_uses_unit_span() {
        let scale = LinearScale::new(5.0, 5.0, 0.0, 100.0);
        assert_relative_eq!(scale.map(5.0), 0.0);
        assert_relative_eq!(scale.map(6.0), 100.0);
    }

    #[test]
    fn values_outside_domain_extrapolate() {
        let scale = LinearScale::new(0.0, 10.0, 0.0, 100.0);
        assert_relative_eq!(scale.map(11.0), 110.0);
        assert_relative_eq!(scale.map(-1.0), -10.0);
    }
}
