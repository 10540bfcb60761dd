//! Safe operating envelopes
//!
//! Each parameter struct saturates its fields into a fixed range. Clamping
//! is silent: it never fails and never produces a diagnostic; the executor
//! decides whether a saturation is worth a debug log.

use crate::sim::blackhole::BlackHoleParams;
use crate::sim::ohm::OhmParams;
use crate::sim::rc::RcParams;
use crate::sim::titration::TitrationParams;
use crate::sim::vsepr::ShapeId;

/// Closed numeric interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Nearest value inside the interval; NaN maps to `min`.
    pub fn saturate(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const RC_VOLTS: Bounds = Bounds::new(0.0, 12.0);
pub const RC_OHMS: Bounds = Bounds::new(10.0, 1e6);
pub const RC_FARADS: Bounds = Bounds::new(1e-9, 0.1);
/// Peak charging current ceiling in amperes
pub const RC_MAX_CURRENT: f64 = 0.1;

pub const OHM_OHMS: Bounds = Bounds::new(1.0, 1e6);
pub const OHM_VOLTS: Bounds = Bounds::new(0.1, 50.0);

pub const TITRATION_MOLAR: Bounds = Bounds::new(0.001, 1.0);
pub const TITRATION_ACID_ML: Bounds = Bounds::new(5.0, 200.0);

pub const BH_MASS: Bounds = Bounds::new(0.1, 10.0);
pub const BH_SPIN: Bounds = Bounds::new(0.0, 0.99);
pub const BH_ACCRETION: Bounds = Bounds::new(0.1, 5.0);

/// Saturation into a domain's safe envelope.
///
/// `clamped` must be idempotent: `x.clamped().clamped() == x.clamped()`.
pub trait SafeEnvelope: Sized {
    fn clamped(&self) -> Self;

    fn is_within_envelope(&self) -> bool;
}

impl SafeEnvelope for RcParams {
    /// The current ceiling is enforced by raising R, never by lowering V.
    fn clamped(&self) -> Self {
        let v = RC_VOLTS.saturate(self.v);
        let mut r = RC_OHMS.saturate(self.r);
        let c = RC_FARADS.saturate(self.c);
        if v / r > RC_MAX_CURRENT {
            r = r.max(v / RC_MAX_CURRENT);
        }
        Self { v, r, c }
    }

    fn is_within_envelope(&self) -> bool {
        RC_VOLTS.contains(self.v)
            && RC_OHMS.contains(self.r)
            && RC_FARADS.contains(self.c)
            && self.v / self.r <= RC_MAX_CURRENT + 1e-12
    }
}

impl SafeEnvelope for OhmParams {
    fn clamped(&self) -> Self {
        Self {
            r: OHM_OHMS.saturate(self.r),
            v_max: OHM_VOLTS.saturate(self.v_max),
        }
    }

    fn is_within_envelope(&self) -> bool {
        OHM_OHMS.contains(self.r) && OHM_VOLTS.contains(self.v_max)
    }
}

impl SafeEnvelope for TitrationParams {
    fn clamped(&self) -> Self {
        Self {
            acid_c: TITRATION_MOLAR.saturate(self.acid_c),
            acid_v: TITRATION_ACID_ML.saturate(self.acid_v),
            base_c: TITRATION_MOLAR.saturate(self.base_c),
            mark_equivalence: self.mark_equivalence,
        }
    }

    fn is_within_envelope(&self) -> bool {
        TITRATION_MOLAR.contains(self.acid_c)
            && TITRATION_ACID_ML.contains(self.acid_v)
            && TITRATION_MOLAR.contains(self.base_c)
    }
}

impl SafeEnvelope for BlackHoleParams {
    fn clamped(&self) -> Self {
        Self {
            mass: BH_MASS.saturate(self.mass),
            spin: BH_SPIN.saturate(self.spin),
            accretion: BH_ACCRETION.saturate(self.accretion),
        }
    }

    fn is_within_envelope(&self) -> bool {
        BH_MASS.contains(self.mass)
            && BH_SPIN.contains(self.spin)
            && BH_ACCRETION.contains(self.accretion)
    }
}

/// Geometry selections are a closed enumeration, always inside the envelope.
impl SafeEnvelope for ShapeId {
    fn clamped(&self) -> Self {
        *self
    }

    fn is_within_envelope(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rc_current_ceiling_raises_resistance() {
        let p = RcParams {
            v: 12.0,
            r: 10.0,
            c: 1e-3,
        }
        .clamped();
        assert_eq!(p.v, 12.0);
        assert!((p.r - 120.0).abs() < 1e-9);
        assert!(p.v / p.r <= RC_MAX_CURRENT + 1e-12);
    }

    #[test]
    fn test_rc_saturates_each_field() {
        let p = RcParams {
            v: 40.0,
            r: 1e9,
            c: 5.0,
        }
        .clamped();
        assert_eq!(p.v, 12.0);
        assert_eq!(p.r, 1e6);
        assert_eq!(p.c, 0.1);
    }

    #[test]
    fn test_nan_saturates_to_lower_bound() {
        let p = OhmParams {
            r: f64::NAN,
            v_max: 10.0,
        }
        .clamped();
        assert_eq!(p.r, 1.0);
    }

    #[test]
    fn test_titration_keeps_marker_flag() {
        let p = TitrationParams {
            acid_c: 3.0,
            acid_v: 1.0,
            base_c: 0.0,
            mark_equivalence: false,
        }
        .clamped();
        assert_eq!(p.acid_c, 1.0);
        assert_eq!(p.acid_v, 5.0);
        assert_eq!(p.base_c, 0.001);
        assert!(!p.mark_equivalence);
    }

    #[test]
    fn test_black_hole_spin_ceiling() {
        let p = BlackHoleParams {
            mass: 50.0,
            spin: 1.0,
            accretion: 0.0,
        }
        .clamped();
        assert_eq!(p.mass, 10.0);
        assert_eq!(p.spin, 0.99);
        assert_eq!(p.accretion, 0.1);
        assert!(p.is_within_envelope());
    }

    #[test]
    fn test_defaults_are_inside_envelopes() {
        assert!(RcParams::default().is_within_envelope());
        assert!(OhmParams::default().is_within_envelope());
        assert!(TitrationParams::default().is_within_envelope());
        assert!(BlackHoleParams::default().is_within_envelope());
        assert!(ShapeId::default().is_within_envelope());
    }
}
