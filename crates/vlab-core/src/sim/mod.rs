//! Deterministic simulation models, one module per domain.
//!
//! Every model is a pure function of its parameter struct; sampled output
//! is returned as a [`SampledSeries`] and never stored as state.

pub mod blackhole;
pub mod ohm;
pub mod rc;
pub mod titration;
pub mod vsepr;

use serde::{Deserialize, Serialize};

/// Paired x/y samples with a display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledSeries {
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    pub label: String,
}

impl SampledSeries {
    /// `n + 1` evenly spaced samples of `f` over `[start, end]`.
    pub fn linspace(
        label: impl Into<String>,
        start: f64,
        end: f64,
        n: usize,
        f: impl Fn(f64) -> f64,
    ) -> Self {
        let n = n.max(1);
        let x_values: Vec<f64> = (0..=n)
            .map(|i| start + (end - start) * (i as f64) / (n as f64))
            .collect();
        let y_values = x_values.iter().map(|&x| f(x)).collect();
        Self {
            x_values,
            y_values,
            label: label.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.x_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_values.is_empty()
    }
}
