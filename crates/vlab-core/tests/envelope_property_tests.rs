#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use vlab_core::envelope::{SafeEnvelope, RC_MAX_CURRENT};
use vlab_core::sim::blackhole::BlackHoleParams;
use vlab_core::sim::ohm::OhmParams;
use vlab_core::sim::rc::RcParams;
use vlab_core::sim::titration::TitrationParams;
use vlab_core::sim::vsepr::ShapeId;

fn arb_rc() -> impl Strategy<Value = RcParams> {
    (any::<f64>(), any::<f64>(), any::<f64>()).prop_map(|(v, r, c)| RcParams { v, r, c })
}

fn arb_rc_in_range() -> impl Strategy<Value = RcParams> {
    (-5.0..20.0_f64, 1.0..2e6_f64, 1e-10..0.2_f64).prop_map(|(v, r, c)| RcParams { v, r, c })
}

fn arb_ohm() -> impl Strategy<Value = OhmParams> {
    (any::<f64>(), any::<f64>()).prop_map(|(r, v_max)| OhmParams { r, v_max })
}

fn arb_titration() -> impl Strategy<Value = TitrationParams> {
    (any::<f64>(), any::<f64>(), any::<f64>(), any::<bool>()).prop_map(
        |(acid_c, acid_v, base_c, mark_equivalence)| TitrationParams {
            acid_c,
            acid_v,
            base_c,
            mark_equivalence,
        },
    )
}

fn arb_black_hole() -> impl Strategy<Value = BlackHoleParams> {
    (any::<f64>(), any::<f64>(), any::<f64>()).prop_map(|(mass, spin, accretion)| {
        BlackHoleParams {
            mass,
            spin,
            accretion,
        }
    })
}

fn arb_shape() -> impl Strategy<Value = ShapeId> {
    prop::sample::select(ShapeId::ALL.to_vec())
}

proptest! {
    #[test]
    fn test_rc_clamp_is_idempotent(p in arb_rc()) {
        let once = p.clamped();
        prop_assert_eq!(once.clamped(), once);
        prop_assert!(once.is_within_envelope());
    }

    #[test]
    fn test_ohm_clamp_is_idempotent(p in arb_ohm()) {
        let once = p.clamped();
        prop_assert_eq!(once.clamped(), once);
        prop_assert!(once.is_within_envelope());
    }

    #[test]
    fn test_titration_clamp_is_idempotent(p in arb_titration()) {
        let once = p.clamped();
        prop_assert_eq!(once.clamped(), once);
        prop_assert!(once.is_within_envelope());
    }

    #[test]
    fn test_black_hole_clamp_is_idempotent(p in arb_black_hole()) {
        let once = p.clamped();
        prop_assert_eq!(once.clamped(), once);
        prop_assert!(once.is_within_envelope());
    }

    #[test]
    fn test_geometry_clamp_is_identity(id in arb_shape()) {
        prop_assert_eq!(id.clamped(), id);
    }

    #[test]
    fn test_rc_current_never_exceeds_ceiling(p in arb_rc()) {
        let safe = p.clamped();
        prop_assert!(safe.v / safe.r <= RC_MAX_CURRENT + 1e-12);
        prop_assert!(safe.initial_current() <= RC_MAX_CURRENT + 1e-12);
    }

    #[test]
    fn test_rc_current_ceiling_never_lowers_voltage(p in arb_rc_in_range()) {
        let safe = p.clamped();
        prop_assert_eq!(safe.v, p.v.clamp(0.0, 12.0));
    }

    #[test]
    fn test_rc_voltage_at_tau_is_one_minus_inverse_e(p in arb_rc_in_range()) {
        let safe = p.clamped();
        let expected = safe.v * (1.0 - (-1.0_f64).exp());
        prop_assert!((safe.capacitor_voltage(safe.tau()) - expected).abs() < 1e-3);
    }
}
