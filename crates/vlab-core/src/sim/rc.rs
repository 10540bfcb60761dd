//! RC charging circuit

use serde::{Deserialize, Serialize};

use super::SampledSeries;

/// Source voltage (V), resistance (Ω) and capacitance (F).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RcParams {
    pub v: f64,
    pub r: f64,
    pub c: f64,
}

impl Default for RcParams {
    fn default() -> Self {
        Self {
            v: 5.0,
            r: 1000.0,
            c: 100e-6,
        }
    }
}

/// Which quantity an RC plot shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RcTarget {
    /// Capacitor voltage V_C(t)
    Voltage,
    /// Charging current I(t)
    Current,
}

impl RcTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            RcTarget::Voltage => "voltage",
            RcTarget::Current => "current",
        }
    }

    pub fn series_label(&self) -> &'static str {
        match self {
            RcTarget::Voltage => "V_C (V)",
            RcTarget::Current => "Current I (A)",
        }
    }
}

impl RcParams {
    /// Time constant τ = R·C in seconds
    pub fn tau(&self) -> f64 {
        self.r * self.c
    }

    /// V_C(t) = V·(1 − e^(−t/τ))
    pub fn capacitor_voltage(&self, t: f64) -> f64 {
        self.v * (1.0 - (-t / self.tau()).exp())
    }

    /// I(t) = (V/R)·e^(−t/τ)
    pub fn current(&self, t: f64) -> f64 {
        self.initial_current() * (-t / self.tau()).exp()
    }

    /// Peak current V/R at t = 0
    pub fn initial_current(&self) -> f64 {
        self.v / self.r
    }

    /// `samples + 1` points of the target over `[0, duration]`.
    pub fn sample(&self, target: RcTarget, duration: f64, samples: usize) -> SampledSeries {
        match target {
            RcTarget::Voltage => {
                SampledSeries::linspace(target.series_label(), 0.0, duration, samples, |t| {
                    self.capacitor_voltage(t)
                })
            }
            RcTarget::Current => {
                SampledSeries::linspace(target.series_label(), 0.0, duration, samples, |t| {
                    self.current(t)
                })
            }
        }
    }
}
