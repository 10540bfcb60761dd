//! Ohm's-law I–V sweep

use serde::{Deserialize, Serialize};

use super::SampledSeries;

/// Fixed resistance (Ω) swept from 0 V to `v_max` (V).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhmParams {
    pub r: f64,
    pub v_max: f64,
}

impl Default for OhmParams {
    fn default() -> Self {
        Self {
            r: 1000.0,
            v_max: 10.0,
        }
    }
}

impl OhmParams {
    /// I = V/R
    pub fn current_at(&self, volts: f64) -> f64 {
        volts / self.r
    }

    /// V_i = Vmax·i/N, I_i = V_i/R for i in 0..=N
    pub fn sample_iv(&self, samples: usize) -> SampledSeries {
        SampledSeries::linspace("I vs V", 0.0, self.v_max, samples, |v| self.current_at(v))
    }
}
