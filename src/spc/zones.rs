//! Sigma-zone classification.
//!
//! The band between a chart's center line and its control limits is split
//! into three equal-width zones on each side:
//!
//! ```text
//!   UCL ─────────────  CL + 3σ     (beyond: A-extreme)
//!        zone A
//!       ─────────────  CL + 2σ
//!        zone B
//!       ─────────────  CL + 1σ
//!        zone C
//!   CL  ═════════════
//!        zone C
//!       ─────────────  CL - 1σ
//!        zone B
//!       ─────────────  CL - 2σ
//!        zone A
//!   LCL ─────────────  CL - 3σ     (beyond: A-extreme)
//! ```
//!
//! σ is recovered from the limits as `(UCL - CL) / 3`, never recomputed.

use serde::Serialize;

use super::chart::ControlLimits;

/// Distance band from the center line.
///
/// Ordered from the center outwards, so `band >= Band::B` reads as
/// "beyond one sigma".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Band {
    /// Within 1σ of CL (inclusive).
    C,
    /// Between 1σ and 2σ.
    B,
    /// Beyond 2σ, still inside the control limits.
    A,
    /// Outside the control limits.
    Beyond,
}

/// Side of the center line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Above,
    Below,
    /// Exactly on CL. Belongs to neither side.
    Center,
}

/// Zone label of one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Zone {
    pub band: Band,
    pub side: Side,
}

impl Zone {
    /// Classifies `value` against a chart's limits.
    ///
    /// Boundaries at exactly 1σ and 2σ fall into the inner band. A value
    /// exactly on UCL or LCL is zone A, not beyond.
    ///
    /// # Examples
    ///
    /// ```
    /// use spc_core::spc::{Band, ControlLimits, Side, Zone};
    ///
    /// let limits = ControlLimits { ucl: 13.0, cl: 10.0, lcl: 7.0 };
    /// assert_eq!(Zone::classify(10.5, &limits).band, Band::C);
    /// assert_eq!(Zone::classify(8.5, &limits).band, Band::B);
    /// assert_eq!(Zone::classify(8.5, &limits).side, Side::Below);
    /// assert_eq!(Zone::classify(12.5, &limits).band, Band::A);
    /// assert_eq!(Zone::classify(13.5, &limits).band, Band::Beyond);
    /// ```
    pub fn classify(value: f64, limits: &ControlLimits) -> Self {
        let side = if value > limits.cl {
            Side::Above
        } else if value < limits.cl {
            Side::Below
        } else {
            Side::Center
        };

        let band = if value > limits.ucl || value < limits.lcl {
            Band::Beyond
        } else {
            let sigma = limits.sigma();
            let distance = (value - limits.cl).abs();
            if distance <= sigma {
                Band::C
            } else if distance <= 2.0 * sigma {
                Band::B
            } else {
                Band::A
            }
        };

        Self { band, side }
    }

    /// True when the point lies beyond `band` (or in it) on `side`.
    pub(crate) fn at_least(&self, band: Band, side: Side) -> bool {
        self.side == side && self.band >= band
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> ControlLimits {
        ControlLimits {
            ucl: 28.0, // σ = 1.0
            cl: 25.0,
            lcl: 22.0,
        }
    }

    #[test]
    fn test_bands_above() {
        let l = limits();
        assert_eq!(Zone::classify(25.5, &l).band, Band::C);
        assert_eq!(Zone::classify(26.5, &l).band, Band::B);
        assert_eq!(Zone::classify(27.5, &l).band, Band::A);
        assert_eq!(Zone::classify(28.5, &l).band, Band::Beyond);
        assert_eq!(Zone::classify(28.5, &l).side, Side::Above);
    }

    #[test]
    fn test_bands_below() {
        let l = limits();
        assert_eq!(
            Zone::classify(24.5, &l),
            Zone {
                band: Band::C,
                side: Side::Below
            }
        );
        assert_eq!(Zone::classify(23.5, &l).band, Band::B);
        assert_eq!(Zone::classify(22.5, &l).band, Band::A);
        assert_eq!(Zone::classify(21.0, &l).band, Band::Beyond);
    }

    #[test]
    fn test_boundaries_belong_to_inner_band() {
        let l = limits();
        assert_eq!(Zone::classify(26.0, &l).band, Band::C);
        assert_eq!(Zone::classify(27.0, &l).band, Band::B);
        assert_eq!(Zone::classify(28.0, &l).band, Band::A);
        assert_eq!(Zone::classify(22.0, &l).band, Band::A);
    }

    #[test]
    fn test_center_point() {
        let z = Zone::classify(25.0, &limits());
        assert_eq!(z.band, Band::C);
        assert_eq!(z.side, Side::Center);
    }

    #[test]
    fn test_clamped_lower_limit() {
        // MR-style limits: LCL = 0 while CL - 3σ is negative.
        let l = ControlLimits {
            ucl: 6.534,
            cl: 2.0,
            lcl: 0.0,
        };
        // σ ≈ 1.511, so 0.0 is 2σ-ish below CL but still inside LCL.
        let z = Zone::classify(0.0, &l);
        assert_eq!(z.side, Side::Below);
        assert_ne!(z.band, Band::Beyond);
    }

    #[test]
    fn test_at_least() {
        let z = Zone {
            band: Band::A,
            side: Side::Above,
        };
        assert!(z.at_least(Band::B, Side::Above));
        assert!(z.at_least(Band::A, Side::Above));
        assert!(!z.at_least(Band::Beyond, Side::Above));
        assert!(!z.at_least(Band::B, Side::Below));
    }
}
