//! Linear value-to-pixel scales
//!
//! Time axes use the same scale over timestamps in seconds.

use serde::Serialize;

/// Linear mapping from a data domain onto a pixel range.
///
/// A degenerate domain (both ends equal) maps everything onto the first
/// range value, so a `[0, 0]` y-domain renders zero-height bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
    round: bool,
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self {
            domain,
            range,
            round: false,
        }
    }

    /// Scale whose output is rounded to whole pixels
    pub fn rounded(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self {
            domain,
            range,
            round: true,
        }
    }

    /// Same range, new domain
    pub fn with_domain(self, domain: [f64; 2]) -> Self {
        Self { domain, ..self }
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Smallest and largest pixel of the range
    pub fn range_extent(&self) -> (f64, f64) {
        let [a, b] = self.range;
        (a.min(b), a.max(b))
    }

    /// Domain value to pixel
    pub fn apply(&self, v: f64) -> f64 {
        let px = interpolate(v, self.domain, self.range);
        if self.round {
            px.round()
        } else {
            px
        }
    }

    /// Pixel to domain value
    pub fn invert(&self, px: f64) -> f64 {
        interpolate(px, self.range, self.domain)
    }
}

/// Multiply before dividing so whole-unit scales stay exact.
fn interpolate(x: f64, from: [f64; 2], to: [f64; 2]) -> f64 {
    let span = from[1] - from[0];
    if span == 0.0 {
        to[0]
    } else {
        to[0] + (x - from[0]) * (to[1] - to[0]) / span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_and_invert() {
        let x = LinearScale::rounded([-60.0, 150.0], [0.0, 210.0]);
        assert_eq!(x.apply(-60.0), 0.0);
        assert_eq!(x.apply(140.0), 200.0);
        assert_eq!(x.invert(60.0), 0.0);
        assert_eq!(x.invert(210.0), 150.0);
    }

    #[test]
    fn test_inverted_range_for_y() {
        let y = LinearScale::new([0.0, 50.0], [100.0, 0.0]);
        assert_eq!(y.apply(0.0), 100.0);
        assert_eq!(y.apply(50.0), 0.0);
        assert_eq!(y.apply(25.0), 50.0);
        assert_eq!(y.range_extent(), (0.0, 100.0));
    }

    #[test]
    fn test_degenerate_domain_maps_to_range_start() {
        let y = LinearScale::new([0.0, 0.0], [100.0, 0.0]);
        assert_eq!(y.apply(0.0), 100.0);
        assert_eq!(y.apply(7.0), 100.0);
    }

    #[test]
    fn test_rounding() {
        let x = LinearScale::rounded([0.0, 3.0], [0.0, 10.0]);
        assert_eq!(x.apply(1.0), 3.0);
        let x = LinearScale::new([0.0, 3.0], [0.0, 10.0]);
        assert!((x.apply(1.0) - 10.0 / 3.0).abs() < 1e-12);
    }
}
