//! Structured actions produced by the command parser
//!
//! Each variant is one operation on exactly one domain, except `Switch` and
//! `Reset`, which are domain-agnostic. Optional fields mean "leave unchanged".

use serde::{Deserialize, Serialize};

use crate::domain::DomainId;
use crate::sim::rc::RcTarget;
use crate::sim::vsepr::ShapeId;

/// A single executable step.
///
/// Actions are applied by [`execute`](crate::execute::execute) strictly in
/// the order the parser emitted them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ParsedAction {
    /// Make another domain active
    #[serde(rename = "switch")]
    Switch { to: DomainId },

    /// Restore the active domain's starter values
    #[serde(rename = "reset")]
    Reset,

    #[serde(rename = "rc.set")]
    RcSet {
        v: Option<f64>,
        r: Option<f64>,
        c: Option<f64>,
    },

    #[serde(rename = "rc.scale")]
    RcScale {
        v_mul: Option<f64>,
        r_mul: Option<f64>,
        c_mul: Option<f64>,
    },

    /// Sample V_C(t) or I(t) over `duration` seconds (default 1 s)
    #[serde(rename = "rc.plot")]
    RcPlot {
        target: RcTarget,
        duration: Option<f64>,
    },

    /// Point readout of V_C and I at `t` seconds
    #[serde(rename = "rc.measure")]
    RcMeasure { t: f64 },

    #[serde(rename = "ohm.set")]
    OhmSet { r: Option<f64>, v_max: Option<f64> },

    #[serde(rename = "ohm.scale")]
    OhmScale {
        r_mul: Option<f64>,
        v_max_mul: Option<f64>,
    },

    /// Sweep 0..=v_max and sample the I–V line
    #[serde(rename = "ohm.plot")]
    OhmPlot,

    /// Current at a single applied voltage
    #[serde(rename = "ohm.measure")]
    OhmMeasure { volts: f64 },

    #[serde(rename = "titr.set")]
    TitrationSet {
        acid_c: Option<f64>,
        acid_v: Option<f64>,
        base_c: Option<f64>,
    },

    #[serde(rename = "titr.scale")]
    TitrationScale {
        acid_c_mul: Option<f64>,
        acid_v_mul: Option<f64>,
        base_c_mul: Option<f64>,
    },

    /// Sample the full pH curve
    #[serde(rename = "titr.run")]
    TitrationRun,

    /// pH after `base_volume` mL of titrant
    #[serde(rename = "titr.measure")]
    TitrationMeasure { base_volume: f64 },

    /// Toggle the equivalence-point marker
    #[serde(rename = "titr.mark")]
    TitrationMark { on: bool },

    #[serde(rename = "bh.set")]
    BlackHoleSet {
        mass: Option<f64>,
        spin: Option<f64>,
        accretion: Option<f64>,
    },

    #[serde(rename = "bh.scale")]
    BlackHoleScale {
        mass_mul: Option<f64>,
        accretion_mul: Option<f64>,
    },

    /// Sample the disk intensity profile
    #[serde(rename = "bh.plot")]
    BlackHolePlot,

    #[serde(rename = "vsepr.select")]
    GeometrySelect { id: ShapeId },

    /// Summarize the selected shape and emit its bond-angle series
    #[serde(rename = "vsepr.describe")]
    GeometryDescribe,
}

impl ParsedAction {
    /// Domain the action operates on; `None` for `Switch` and `Reset`.
    pub fn domain(&self) -> Option<DomainId> {
        match self {
            ParsedAction::Switch { .. } | ParsedAction::Reset => None,
            ParsedAction::RcSet { .. }
            | ParsedAction::RcScale { .. }
            | ParsedAction::RcPlot { .. }
            | ParsedAction::RcMeasure { .. } => Some(DomainId::Rc),
            ParsedAction::OhmSet { .. }
            | ParsedAction::OhmScale { .. }
            | ParsedAction::OhmPlot
            | ParsedAction::OhmMeasure { .. } => Some(DomainId::Ohm),
            ParsedAction::TitrationSet { .. }
            | ParsedAction::TitrationScale { .. }
            | ParsedAction::TitrationRun
            | ParsedAction::TitrationMeasure { .. }
            | ParsedAction::TitrationMark { .. } => Some(DomainId::Titration),
            ParsedAction::BlackHoleSet { .. }
            | ParsedAction::BlackHoleScale { .. }
            | ParsedAction::BlackHolePlot => Some(DomainId::BlackHole),
            ParsedAction::GeometrySelect { .. } | ParsedAction::GeometryDescribe => {
                Some(DomainId::Geometry)
            }
        }
    }

    /// Stable kind tag, identical to the serialized `kind` field.
    pub fn kind(&self) -> &'static str {
        match self {
            ParsedAction::Switch { .. } => "switch",
            ParsedAction::Reset => "reset",
            ParsedAction::RcSet { .. } => "rc.set",
            ParsedAction::RcScale { .. } => "rc.scale",
            ParsedAction::RcPlot { .. } => "rc.plot",
            ParsedAction::RcMeasure { .. } => "rc.measure",
            ParsedAction::OhmSet { .. } => "ohm.set",
            ParsedAction::OhmScale { .. } => "ohm.scale",
            ParsedAction::OhmPlot => "ohm.plot",
            ParsedAction::OhmMeasure { .. } => "ohm.measure",
            ParsedAction::TitrationSet { .. } => "titr.set",
            ParsedAction::TitrationScale { .. } => "titr.scale",
            ParsedAction::TitrationRun => "titr.run",
            ParsedAction::TitrationMeasure { .. } => "titr.measure",
            ParsedAction::TitrationMark { .. } => "titr.mark",
            ParsedAction::BlackHoleSet { .. } => "bh.set",
            ParsedAction::BlackHoleScale { .. } => "bh.scale",
            ParsedAction::BlackHolePlot => "bh.plot",
            ParsedAction::GeometrySelect { .. } => "vsepr.select",
            ParsedAction::GeometryDescribe => "vsepr.describe",
        }
    }

    /// True for actions that produce a sampled series.
    pub fn is_plot(&self) -> bool {
        matches!(
            self,
            ParsedAction::RcPlot { .. }
                | ParsedAction::OhmPlot
                | ParsedAction::TitrationRun
                | ParsedAction::BlackHolePlot
        )
    }
}
