//! Per-domain lab state
//!
//! One parameter set per simulator, all persisting independently; exactly
//! one domain is active at a time.

use serde::{Deserialize, Serialize};

use crate::domain::DomainId;
use crate::envelope::SafeEnvelope;
use crate::sim::blackhole::BlackHoleParams;
use crate::sim::ohm::OhmParams;
use crate::sim::rc::RcParams;
use crate::sim::titration::TitrationParams;
use crate::sim::vsepr::ShapeId;

/// Every simulator's parameters plus the active domain.
///
/// `LabState::default()` is the process-start state: RC active, each
/// domain at its starter values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabState {
    pub active: DomainId,
    pub rc: RcParams,
    pub ohm: OhmParams,
    pub titration: TitrationParams,
    pub black_hole: BlackHoleParams,
    pub geometry: ShapeId,
}

impl Default for LabState {
    fn default() -> Self {
        Self {
            active: DomainId::Rc,
            rc: RcParams::default(),
            ohm: OhmParams::default(),
            titration: TitrationParams::default(),
            black_hole: BlackHoleParams::default(),
            geometry: ShapeId::default(),
        }
    }
}

impl LabState {
    /// Starter values with a different active domain.
    pub fn with_active(active: DomainId) -> Self {
        Self {
            active,
            ..Self::default()
        }
    }

    /// Restore the given domain to its starter values, leaving the others.
    pub fn reset_domain(&mut self, domain: DomainId) {
        match domain {
            DomainId::Rc => self.rc = RcParams::default(),
            DomainId::Ohm => self.ohm = OhmParams::default(),
            DomainId::Titration => self.titration = TitrationParams::default(),
            DomainId::BlackHole => self.black_hole = BlackHoleParams::default(),
            DomainId::Geometry => self.geometry = ShapeId::default(),
        }
    }

    /// Restore the active domain to its starter values.
    pub fn reset_active(&mut self) {
        self.reset_domain(self.active);
    }

    /// True when every domain's parameters lie inside their envelope.
    pub fn is_within_envelope(&self) -> bool {
        self.rc.is_within_envelope()
            && self.ohm.is_within_envelope()
            && self.titration.is_within_envelope()
            && self.black_hole.is_within_envelope()
            && self.geometry.is_within_envelope()
    }

    /// Saturate every domain into its envelope.
    pub fn clamped(&self) -> Self {
        Self {
            active: self.active,
            rc: self.rc.clamped(),
            ohm: self.ohm.clamped(),
            titration: self.titration.clamped(),
            black_hole: self.black_hole.clamped(),
            geometry: self.geometry,
        }
    }
}
