//! Strong-acid/strong-base titration
//!
//! Only the strong/strong case is modeled: no hydrolysis, so the curve
//! passes through exactly pH 7 at equivalence.

use serde::{Deserialize, Serialize};

use super::SampledSeries;

/// Moles of base within this distance of the initial acid moles count as
/// equivalence.
pub const EQUIVALENCE_TOLERANCE_MOL: f64 = 1e-12;

/// Acid concentration (mol/L), acid volume (mL), base concentration
/// (mol/L), and whether the equivalence point is marked on plots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TitrationParams {
    pub acid_c: f64,
    pub acid_v: f64,
    pub base_c: f64,
    pub mark_equivalence: bool,
}

impl Default for TitrationParams {
    fn default() -> Self {
        Self {
            acid_c: 0.1,
            acid_v: 50.0,
            base_c: 0.1,
            mark_equivalence: true,
        }
    }
}

impl TitrationParams {
    /// Initial moles of acid
    pub fn acid_moles(&self) -> f64 {
        self.acid_c * (self.acid_v / 1000.0)
    }

    /// Base volume (mL) at which moles of base equal initial moles of acid
    pub fn equivalence_volume(&self) -> f64 {
        self.acid_moles() / self.base_c * 1000.0
    }

    /// pH after adding `base_ml` of titrant.
    ///
    /// Acid-side values never exceed 7 and base-side values never drop
    /// below 7, so the curve is non-decreasing even a few picomoles from
    /// equivalence.
    pub fn ph(&self, base_ml: f64) -> f64 {
        let acid_l = self.acid_v / 1000.0;
        let base_l = base_ml / 1000.0;
        let n_acid = self.acid_moles();
        let n_base = self.base_c * base_l;
        let total_l = acid_l + base_l;

        if (n_base - n_acid).abs() < EQUIVALENCE_TOLERANCE_MOL {
            7.0
        } else if n_base < n_acid {
            let h = (n_acid - n_base) / total_l;
            (-h.log10()).min(7.0)
        } else {
            let oh = (n_base - n_acid) / total_l;
            (14.0 + oh.log10()).max(7.0)
        }
    }

    /// Upper end of the plotted base volume: 1.6·vEq bounded to [20, 200] mL.
    pub fn curve_extent(&self) -> f64 {
        (self.equivalence_volume() * 1.6).clamp(20.0, 200.0)
    }

    /// pH curve from 0 mL to [`curve_extent`](Self::curve_extent) with a
    /// step of at least 0.25 mL and at most ~200 intervals.
    pub fn sample_curve(&self) -> SampledSeries {
        let extent = self.curve_extent();
        let step = (extent / 200.0).max(0.25);
        let count = (extent / step + 1e-9).floor() as usize;
        let x_values: Vec<f64> = (0..=count).map(|i| i as f64 * step).collect();
        let y_values = x_values.iter().map(|&v| self.ph(v)).collect();
        SampledSeries {
            x_values,
            y_values,
            label: "pH".to_string(),
        }
    }
}

/// Shape check on a sampled curve: non-decreasing (tolerance 1e-6) and a
/// central-difference slope above 0.2 pH/mL around the first sample past
/// `v_eq`.
pub fn sanity_check(series: &SampledSeries, v_eq: f64) -> bool {
    let xs = &series.x_values;
    let ys = &series.y_values;
    if ys.windows(2).any(|w| w[1] < w[0] - 1e-6) {
        return false;
    }
    let Some(idx) = xs.iter().position(|&v| v > v_eq) else {
        return false;
    };
    if idx < 2 || idx + 3 > ys.len() {
        return false;
    }
    let slope = (ys[idx + 1] - ys[idx - 1]) / (xs[idx + 1] - xs[idx - 1]);
    slope > 0.2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalence_is_exactly_neutral() {
        let p = TitrationParams::default();
        assert!((p.equivalence_volume() - 50.0).abs() < 1e-9);
        assert_eq!(p.ph(p.equivalence_volume()), 7.0);
    }

    #[test]
    fn test_initial_ph_of_strong_acid() {
        let p = TitrationParams::default();
        assert!((p.ph(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_excess_base_is_basic() {
        let p = TitrationParams::default();
        // 10 mL excess of 0.1 M base in 110 mL total
        let expected = 14.0 + (0.001f64 / 0.11).log10();
        assert!((p.ph(60.0) - expected).abs() < 1e-9);
        assert!(p.ph(60.0) > 11.0);
    }

    #[test]
    fn test_monotonic_over_extended_range() {
        let p = TitrationParams {
            acid_c: 0.1,
            acid_v: 25.0,
            base_c: 0.1,
            mark_equivalence: false,
        };
        let v_eq = p.equivalence_volume();
        let mut prev = f64::NEG_INFINITY;
        let mut v = 0.0;
        while v <= v_eq * 1.6 {
            let ph = p.ph(v);
            assert!(ph >= prev - 1e-9, "pH dropped at {} mL", v);
            prev = ph;
            v += 0.5;
        }
    }

    #[test]
    fn test_sample_curve_passes_sanity_check() {
        let p = TitrationParams::default();
        let s = p.sample_curve();
        assert_eq!(s.label, "pH");
        assert_eq!(s.x_values[0], 0.0);
        assert!((s.x_values.last().copied().unwrap() - 80.0).abs() < 1e-9);
        assert!(sanity_check(&s, p.equivalence_volume()));
    }

    #[test]
    fn test_sanity_check_rejects_decreasing_curve() {
        let s = SampledSeries {
            x_values: vec![0.0, 1.0, 2.0, 3.0, 4.0],
            y_values: vec![1.0, 2.0, 1.0, 4.0, 5.0],
            label: "pH".to_string(),
        };
        assert!(!sanity_check(&s, 2.0));
    }
}
