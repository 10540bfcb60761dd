//! Action executor
//!
//! Applies parsed actions in order against a [`LabState`]. Every write goes
//! through the domain's safe envelope; plots sample the state as it stands
//! after the earlier actions of the same command.

use serde::{Deserialize, Serialize};

use crate::actions::ParsedAction;
use crate::domain::DomainId;
use crate::envelope::{Bounds, SafeEnvelope};
use crate::errors::{Result, VlabError};
use crate::sim::rc::RcTarget;
use crate::sim::titration::sanity_check;
use crate::sim::vsepr::ShapeId;
use crate::sim::SampledSeries;
use crate::state::LabState;

/// Sample counts and plot-duration limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub rc_samples: usize,
    pub ohm_samples: usize,
    pub disk_samples: usize,
    pub default_duration_s: f64,
    pub min_duration_s: f64,
    pub max_duration_s: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            rc_samples: 600,
            ohm_samples: 300,
            disk_samples: 200,
            default_duration_s: 1.0,
            min_duration_s: 0.01,
            max_duration_s: 60.0,
        }
    }
}

impl SamplingConfig {
    /// Check sample counts are positive and the duration limits are ordered.
    ///
    /// # Errors
    ///
    /// Returns `VlabError::InvalidConfig` naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        let counts = [
            ("rc_samples", self.rc_samples),
            ("ohm_samples", self.ohm_samples),
            ("disk_samples", self.disk_samples),
        ];
        if let Some((key, _)) = counts.iter().find(|(_, n)| *n == 0) {
            return Err(VlabError::InvalidConfig {
                reason: format!("{} must be positive", key),
            });
        }
        let ordered = self.min_duration_s > 0.0
            && self.min_duration_s <= self.default_duration_s
            && self.default_duration_s <= self.max_duration_s;
        if !ordered {
            return Err(VlabError::InvalidConfig {
                reason: "durations must satisfy 0 < min_duration_s <= default_duration_s <= max_duration_s"
                    .to_string(),
            });
        }
        Ok(())
    }

    fn duration_bounds(&self) -> Bounds {
        Bounds::new(self.min_duration_s, self.max_duration_s)
    }
}

/// What a single action did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    Switched {
        to: DomainId,
    },
    Reset {
        domain: DomainId,
    },
    /// A set or scale action wrote new parameters
    Updated {
        domain: DomainId,
    },
    MarkerToggled {
        on: bool,
    },
    RcPlotted {
        target: RcTarget,
        duration: f64,
        duration_defaulted: bool,
        tau: f64,
    },
    RcMeasured {
        t: f64,
        voltage: f64,
        current: f64,
    },
    OhmPlotted {
        r: f64,
        v_max: f64,
    },
    OhmMeasured {
        volts: f64,
        current: f64,
    },
    TitrationPlotted {
        equivalence_volume: f64,
        marked: bool,
        sanity_passed: bool,
    },
    TitrationMeasured {
        base_volume: f64,
        ph: f64,
    },
    DiskPlotted {
        mass: f64,
        spin: f64,
        isco_radius: f64,
    },
    GeometrySelected {
        id: ShapeId,
    },
    GeometryDescribed {
        id: ShapeId,
    },
}

/// One executed action and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionReport {
    pub action: ParsedAction,
    pub effect: Effect,
    /// State or series changed as a result of this action
    pub changed: bool,
}

/// Result of running one command's actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    pub state: LabState,
    /// Last series produced by the command, if any
    pub series: Option<SampledSeries>,
    /// A switch or reset ran after the last plot; the caller's previous
    /// series is stale
    pub clears_series: bool,
    /// Number of actions executed
    pub applied: usize,
    pub reports: Vec<ActionReport>,
}

impl Execution {
    pub fn changed_anything(&self) -> bool {
        self.reports.iter().any(|r| r.changed)
    }
}

/// Execute `actions` against `state` with default sampling.
pub fn execute(actions: &[ParsedAction], state: LabState) -> Execution {
    execute_with(actions, state, &SamplingConfig::default())
}

/// Execute `actions` against `state` with explicit sampling limits.
pub fn execute_with(
    actions: &[ParsedAction],
    state: LabState,
    sampling: &SamplingConfig,
) -> Execution {
    let mut exec = Execution {
        state,
        series: None,
        clears_series: false,
        applied: 0,
        reports: Vec::with_capacity(actions.len()),
    };

    for action in actions {
        let (effect, changed) = apply_action(&mut exec, *action, sampling);
        exec.applied += 1;
        exec.reports.push(ActionReport {
            action: *action,
            effect,
            changed,
        });
    }

    tracing::debug!(
        actions = actions.len(),
        applied = exec.applied,
        active = exec.state.active.as_str(),
        "actions executed"
    );
    exec
}

/// Log when the envelope altered the requested parameters.
fn note_saturation<T: PartialEq + std::fmt::Debug>(domain: DomainId, requested: &T, clamped: &T) {
    if requested != clamped {
        tracing::debug!(
            domain = domain.as_str(),
            requested = ?requested,
            clamped = ?clamped,
            "value saturated into safe envelope"
        );
    }
}

/// Clamp `requested`, store it via `write`, and report whether it changed.
fn store<T>(
    exec: &mut Execution,
    domain: DomainId,
    requested: T,
    read: fn(&LabState) -> T,
    write: fn(&mut LabState, T),
) -> (Effect, bool)
where
    T: SafeEnvelope + PartialEq + std::fmt::Debug + Copy,
{
    let clamped = requested.clamped();
    note_saturation(domain, &requested, &clamped);
    let changed = read(&exec.state) != clamped;
    write(&mut exec.state, clamped);
    (Effect::Updated { domain }, changed)
}

fn emit(exec: &mut Execution, series: SampledSeries, kind: &str) {
    tracing::debug!(kind, samples = series.len(), "series sampled");
    exec.series = Some(series);
    exec.clears_series = false;
}

fn discard_series(exec: &mut Execution) {
    exec.series = None;
    exec.clears_series = true;
}

fn apply_action(
    exec: &mut Execution,
    action: ParsedAction,
    sampling: &SamplingConfig,
) -> (Effect, bool) {
    match action {
        ParsedAction::Switch { to } => {
            exec.state.active = to;
            discard_series(exec);
            (Effect::Switched { to }, true)
        }

        ParsedAction::Reset => {
            let domain = exec.state.active;
            exec.state.reset_active();
            discard_series(exec);
            (Effect::Reset { domain }, true)
        }

        ParsedAction::RcSet { v, r, c } => {
            let rc = exec.state.rc;
            let mut requested = rc;
            requested.v = v.unwrap_or(rc.v);
            requested.r = r.unwrap_or(rc.r);
            requested.c = c.unwrap_or(rc.c);
            store(exec, DomainId::Rc, requested, |s| s.rc, |s, p| s.rc = p)
        }

        ParsedAction::RcScale { v_mul, r_mul, c_mul } => {
            let rc = exec.state.rc;
            let mut requested = rc;
            requested.v = rc.v * v_mul.unwrap_or(1.0);
            requested.r = rc.r * r_mul.unwrap_or(1.0);
            requested.c = rc.c * c_mul.unwrap_or(1.0);
            store(exec, DomainId::Rc, requested, |s| s.rc, |s, p| s.rc = p)
        }

        ParsedAction::RcPlot { target, duration } => {
            let requested = duration.unwrap_or(sampling.default_duration_s);
            let duration_s = sampling.duration_bounds().saturate(requested);
            note_saturation(DomainId::Rc, &requested, &duration_s);
            let rc = exec.state.rc;
            let series = rc.sample(target, duration_s, sampling.rc_samples);
            emit(exec, series, "rc.plot");
            (
                Effect::RcPlotted {
                    target,
                    duration: duration_s,
                    duration_defaulted: duration.is_none(),
                    tau: rc.tau(),
                },
                true,
            )
        }

        ParsedAction::RcMeasure { t } => {
            let rc = exec.state.rc;
            (
                Effect::RcMeasured {
                    t,
                    voltage: rc.capacitor_voltage(t),
                    current: rc.current(t),
                },
                false,
            )
        }

        ParsedAction::OhmSet { r, v_max } => {
            let ohm = exec.state.ohm;
            let mut requested = ohm;
            requested.r = r.unwrap_or(ohm.r);
            requested.v_max = v_max.unwrap_or(ohm.v_max);
            store(exec, DomainId::Ohm, requested, |s| s.ohm, |s, p| s.ohm = p)
        }

        ParsedAction::OhmScale { r_mul, v_max_mul } => {
            let ohm = exec.state.ohm;
            let mut requested = ohm;
            requested.r = ohm.r * r_mul.unwrap_or(1.0);
            requested.v_max = ohm.v_max * v_max_mul.unwrap_or(1.0);
            store(exec, DomainId::Ohm, requested, |s| s.ohm, |s, p| s.ohm = p)
        }

        ParsedAction::OhmPlot => {
            let ohm = exec.state.ohm;
            emit(exec, ohm.sample_iv(sampling.ohm_samples), "ohm.plot");
            (
                Effect::OhmPlotted {
                    r: ohm.r,
                    v_max: ohm.v_max,
                },
                true,
            )
        }

        ParsedAction::OhmMeasure { volts } => {
            let ohm = exec.state.ohm;
            (
                Effect::OhmMeasured {
                    volts,
                    current: ohm.current_at(volts),
                },
                false,
            )
        }

        ParsedAction::TitrationSet {
            acid_c,
            acid_v,
            base_c,
        } => {
            let titration = exec.state.titration;
            let mut requested = titration;
            requested.acid_c = acid_c.unwrap_or(titration.acid_c);
            requested.acid_v = acid_v.unwrap_or(titration.acid_v);
            requested.base_c = base_c.unwrap_or(titration.base_c);
            store(
                exec,
                DomainId::Titration,
                requested,
                |s| s.titration,
                |s, p| s.titration = p,
            )
        }

        ParsedAction::TitrationScale {
            acid_c_mul,
            acid_v_mul,
            base_c_mul,
        } => {
            let titration = exec.state.titration;
            let mut requested = titration;
            requested.acid_c = titration.acid_c * acid_c_mul.unwrap_or(1.0);
            requested.acid_v = titration.acid_v * acid_v_mul.unwrap_or(1.0);
            requested.base_c = titration.base_c * base_c_mul.unwrap_or(1.0);
            store(
                exec,
                DomainId::Titration,
                requested,
                |s| s.titration,
                |s, p| s.titration = p,
            )
        }

        ParsedAction::TitrationMark { on } => {
            let changed = exec.state.titration.mark_equivalence != on;
            exec.state.titration.mark_equivalence = on;
            (Effect::MarkerToggled { on }, changed)
        }

        ParsedAction::TitrationRun => {
            let titration = exec.state.titration;
            let v_eq = titration.equivalence_volume();
            let series = titration.sample_curve();
            let sanity_passed = sanity_check(&series, v_eq);
            emit(exec, series, "titr.run");
            (
                Effect::TitrationPlotted {
                    equivalence_volume: v_eq,
                    marked: titration.mark_equivalence,
                    sanity_passed,
                },
                true,
            )
        }

        ParsedAction::TitrationMeasure { base_volume } => {
            let base_volume = base_volume.max(0.0);
            (
                Effect::TitrationMeasured {
                    base_volume,
                    ph: exec.state.titration.ph(base_volume),
                },
                false,
            )
        }

        ParsedAction::BlackHoleSet {
            mass,
            spin,
            accretion,
        } => {
            let bh = exec.state.black_hole;
            let mut requested = bh;
            requested.mass = mass.unwrap_or(bh.mass);
            requested.spin = spin.unwrap_or(bh.spin);
            requested.accretion = accretion.unwrap_or(bh.accretion);
            store(
                exec,
                DomainId::BlackHole,
                requested,
                |s| s.black_hole,
                |s, p| s.black_hole = p,
            )
        }

        ParsedAction::BlackHoleScale {
            mass_mul,
            accretion_mul,
        } => {
            let bh = exec.state.black_hole;
            let mut requested = bh;
            requested.mass = bh.mass * mass_mul.unwrap_or(1.0);
            requested.accretion = bh.accretion * accretion_mul.unwrap_or(1.0);
            store(
                exec,
                DomainId::BlackHole,
                requested,
                |s| s.black_hole,
                |s, p| s.black_hole = p,
            )
        }

        ParsedAction::BlackHolePlot => {
            let bh = exec.state.black_hole;
            emit(exec, bh.sample_disk(sampling.disk_samples), "bh.plot");
            (
                Effect::DiskPlotted {
                    mass: bh.mass,
                    spin: bh.spin,
                    isco_radius: bh.isco_radius(),
                },
                true,
            )
        }

        ParsedAction::GeometrySelect { id } => {
            let changed = exec.state.geometry != id;
            exec.state.geometry = id;
            (Effect::GeometrySelected { id }, changed)
        }

        ParsedAction::GeometryDescribe => {
            let id = exec.state.geometry;
            emit(exec, id.shape().bond_angle_series(), "vsepr.describe");
            (Effect::GeometryDescribed { id }, true)
        }
    }
}
