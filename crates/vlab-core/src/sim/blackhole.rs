//! Accretion-disk intensity profile
//!
//! Uses a linear ISCO proxy, `1 + 2·(1 − spin)` gravitational radii, not a
//! Kerr-metric derivation.

use serde::{Deserialize, Serialize};

use super::SampledSeries;

/// Outer edge of the sampled disk in gravitational radii
pub const DISK_OUTER_RADIUS: f64 = 30.0;

/// Mass (solar masses), dimensionless spin and accretion rate (arbitrary
/// units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlackHoleParams {
    pub mass: f64,
    pub spin: f64,
    pub accretion: f64,
}

impl Default for BlackHoleParams {
    fn default() -> Self {
        Self {
            mass: 5.0,
            spin: 0.7,
            accretion: 1.0,
        }
    }
}

impl BlackHoleParams {
    /// Inner disk edge
    pub fn isco_radius(&self) -> f64 {
        1.0 + (1.0 - self.spin) * 2.0
    }

    /// accretion · r⁻² · mass^−½
    pub fn intensity(&self, r: f64) -> f64 {
        self.accretion * r.powi(-2) * self.mass.powf(-0.5)
    }

    pub fn sample_disk(&self, samples: usize) -> SampledSeries {
        SampledSeries::linspace(
            "Disk intensity",
            self.isco_radius(),
            DISK_OUTER_RADIUS,
            samples,
            |r| self.intensity(r),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isco_proxy_shrinks_with_spin() {
        let slow = BlackHoleParams {
            spin: 0.0,
            ..BlackHoleParams::default()
        };
        let fast = BlackHoleParams {
            spin: 0.99,
            ..BlackHoleParams::default()
        };
        assert_eq!(slow.isco_radius(), 3.0);
        assert!(fast.isco_radius() < slow.isco_radius());
    }

    #[test]
    fn test_disk_profile_falls_off() {
        let p = BlackHoleParams::default();
        let s = p.sample_disk(200);
        assert_eq!(s.len(), 201);
        assert!((s.x_values[0] - p.isco_radius()).abs() < 1e-12);
        assert!((s.x_values[200] - DISK_OUTER_RADIUS).abs() < 1e-12);
        assert!(s.y_values.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_intensity_scaling() {
        let p = BlackHoleParams {
            mass: 4.0,
            spin: 0.5,
            accretion: 2.0,
        };
        assert!((p.intensity(2.0) - 0.25).abs() < 1e-12);
    }
}
