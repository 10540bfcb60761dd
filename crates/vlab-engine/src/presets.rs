//! Named starter configurations and example commands per domain

use serde::Serialize;

use vlab_core::errors::{Result, VlabError};
use vlab_core::sim::blackhole::BlackHoleParams;
use vlab_core::sim::ohm::OhmParams;
use vlab_core::sim::rc::RcParams;
use vlab_core::sim::titration::TitrationParams;
use vlab_core::sim::vsepr::ShapeId;
use vlab_core::{DomainId, LabState, SafeEnvelope};

/// Parameters a preset writes. Titration presets leave the equivalence
/// marker as it is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "domain", rename_all = "snake_case")]
pub enum PresetValues {
    Rc(RcParams),
    Ohm(OhmParams),
    Titration {
        acid_c: f64,
        acid_v: f64,
        base_c: f64,
    },
    BlackHole(BlackHoleParams),
    Geometry { id: ShapeId },
}

impl PresetValues {
    pub fn domain(&self) -> DomainId {
        match self {
            PresetValues::Rc(_) => DomainId::Rc,
            PresetValues::Ohm(_) => DomainId::Ohm,
            PresetValues::Titration { .. } => DomainId::Titration,
            PresetValues::BlackHole(_) => DomainId::BlackHole,
            PresetValues::Geometry { .. } => DomainId::Geometry,
        }
    }

    /// Write the values into `state` through the domain envelope.
    pub fn apply_to(&self, state: &mut LabState) {
        match *self {
            PresetValues::Rc(p) => state.rc = p.clamped(),
            PresetValues::Ohm(p) => state.ohm = p.clamped(),
            PresetValues::Titration {
                acid_c,
                acid_v,
                base_c,
            } => {
                state.titration = TitrationParams {
                    acid_c,
                    acid_v,
                    base_c,
                    mark_equivalence: state.titration.mark_equivalence,
                }
                .clamped()
            }
            PresetValues::BlackHole(p) => state.black_hole = p.clamped(),
            PresetValues::Geometry { id } => state.geometry = id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub values: PresetValues,
}

impl Preset {
    pub fn domain(&self) -> DomainId {
        self.values.domain()
    }
}

static PRESETS: [Preset; 11] = [
    Preset {
        title: "Slow cinematic charge",
        subtitle: "5 V · 1 kΩ · 100 µF",
        values: PresetValues::Rc(RcParams {
            v: 5.0,
            r: 1000.0,
            c: 100e-6,
        }),
    },
    Preset {
        title: "Fast burst",
        subtitle: "5 V · 200 Ω · 10 µF",
        values: PresetValues::Rc(RcParams {
            v: 5.0,
            r: 200.0,
            c: 10e-6,
        }),
    },
    Preset {
        title: "Voltage ramp",
        subtitle: "10 V · 2 kΩ · 220 µF",
        values: PresetValues::Rc(RcParams {
            v: 10.0,
            r: 2000.0,
            c: 220e-6,
        }),
    },
    Preset {
        title: "0.1 M / 50 mL",
        subtitle: "Classic strong acid-base",
        values: PresetValues::Titration {
            acid_c: 0.1,
            acid_v: 50.0,
            base_c: 0.1,
        },
    },
    Preset {
        title: "0.05 M micro",
        subtitle: "Delicate 25 mL run",
        values: PresetValues::Titration {
            acid_c: 0.05,
            acid_v: 25.0,
            base_c: 0.1,
        },
    },
    Preset {
        title: "1 kΩ sweep",
        subtitle: "10 V max safe",
        values: PresetValues::Ohm(OhmParams {
            r: 1000.0,
            v_max: 10.0,
        }),
    },
    Preset {
        title: "Lab PS",
        subtitle: "470 Ω · 8 V",
        values: PresetValues::Ohm(OhmParams {
            r: 470.0,
            v_max: 8.0,
        }),
    },
    Preset {
        title: "Tetrahedral",
        subtitle: "sp³ with 109.5°",
        values: PresetValues::Geometry {
            id: ShapeId::Tetrahedral,
        },
    },
    Preset {
        title: "Trigonal bipyramidal",
        subtitle: "sp³d with axial focus",
        values: PresetValues::Geometry {
            id: ShapeId::TrigonalBipyramidal,
        },
    },
    Preset {
        title: "Stellar remnant",
        subtitle: "5 M☉ · spin 0.2",
        values: PresetValues::BlackHole(BlackHoleParams {
            mass: 5.0,
            spin: 0.2,
            accretion: 1.0,
        }),
    },
    Preset {
        title: "Rapid Kerr",
        subtitle: "8 M☉ · spin 0.95",
        values: PresetValues::BlackHole(BlackHoleParams {
            mass: 8.0,
            spin: 0.95,
            accretion: 1.2,
        }),
    },
];

/// Every preset, grouped by domain in `DomainId::ALL` order.
pub fn all_presets() -> &'static [Preset] {
    &PRESETS
}

pub fn presets_for(domain: DomainId) -> impl Iterator<Item = &'static Preset> {
    PRESETS.iter().filter(move |p| p.domain() == domain)
}

/// Look up a preset by title, ignoring case and surrounding whitespace.
///
/// # Errors
///
/// `PresetNotFound` when the domain has no preset with that title.
pub fn find_preset(domain: DomainId, title: &str) -> Result<&'static Preset> {
    let wanted = title.trim();
    presets_for(domain)
        .find(|p| p.title.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| VlabError::PresetNotFound {
            domain: domain.as_str().to_string(),
            title: title.to_string(),
        })
}

/// A command that exercises the domain end to end.
pub fn example_command(domain: DomainId) -> &'static str {
    match domain {
        DomainId::Rc => "Set V = 5 V, R = 1 kΩ, C = 100 µF and plot capacitor voltage for 1 s",
        DomainId::Titration => "Run a strong-acid titration and mark the equivalence point",
        DomainId::Ohm => {
            "Set resistance to 1 kΩ and max voltage to 10 V, then plot the I-V curve"
        }
        DomainId::Geometry => "Explain tetrahedral hybridization and show the bond angles",
        DomainId::BlackHole => {
            "Simulate a black hole with mass 5 solar masses, spin 0.7, plot the accretion disk profile"
        }
    }
}
