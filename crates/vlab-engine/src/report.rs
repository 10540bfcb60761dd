//! Console feedback rendering
//!
//! Turns executor reports and failure explanations into the lines an
//! operator sees, plus CSV export of the current series.

use serde::Serialize;

use vlab_core::units::format_ohms;
use vlab_core::{ActionReport, DomainId, Effect, FailureReport, SampledSeries};

/// How a line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Ok,
    Hint,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackLine {
    pub tone: Tone,
    pub text: String,
}

impl FeedbackLine {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Ok,
            text: text.into(),
        }
    }

    pub fn hint(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Hint,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for FeedbackLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Lines for every executed action, in execution order.
pub fn render_feedback(reports: &[ActionReport]) -> Vec<FeedbackLine> {
    let mut lines = Vec::new();
    for report in reports {
        render_report(report, &mut lines);
    }
    lines
}

fn render_report(report: &ActionReport, out: &mut Vec<FeedbackLine>) {
    match report.effect {
        Effect::Switched { to } => out.push(FeedbackLine::hint(format!("Switched to {}.", to.label()))),

        Effect::Reset { .. } => out.push(FeedbackLine::hint("Experiment reset to starter values.")),

        Effect::Updated { domain } => {
            if report.changed {
                out.push(FeedbackLine::ok(updated_message(domain)));
            }
        }

        Effect::MarkerToggled { on } => {
            if report.changed {
                let text = if on {
                    "Equivalence point will be marked."
                } else {
                    "Equivalence marker hidden."
                };
                out.push(FeedbackLine::ok(text));
            }
        }

        Effect::RcPlotted {
            target,
            duration,
            duration_defaulted,
            tau,
        } => {
            out.push(FeedbackLine::ok(format!(
                "Plotted {} for {:.2} s (τ={:.4} s).",
                target.as_str(),
                duration,
                tau
            )));
            if duration_defaulted {
                out.push(FeedbackLine::ok(format!(
                    "Assuming plot duration = {} s (default).",
                    duration
                )));
            }
        }

        Effect::RcMeasured {
            t,
            voltage,
            current,
        } => out.push(FeedbackLine::ok(format!(
            "Measurement at t={:.3} s → V_C={:.4} V, I={:.3e} A",
            t, voltage, current
        ))),

        Effect::OhmPlotted { r, v_max } => out.push(FeedbackLine::ok(format!(
            "Plotted I–V curve up to {:.2} V for R={}.",
            v_max,
            format_ohms(r)
        ))),

        Effect::OhmMeasured { volts, current } => out.push(FeedbackLine::ok(format!(
            "Measurement at V={:.3} V → I={:.3e} A",
            volts, current
        ))),

        Effect::TitrationPlotted {
            equivalence_volume,
            marked,
            sanity_passed,
        } => {
            if marked {
                out.push(FeedbackLine::ok(format!(
                    "Equivalence at ≈ {:.2} mL, pH ≈ 7",
                    equivalence_volume
                )));
            }
            out.push(if sanity_passed {
                FeedbackLine::ok("Curve passes analytic sanity checks (sigmoidal; jump near pH≈7).")
            } else {
                FeedbackLine::hint("Curve sanity check failed, parameters may be extreme.")
            });
        }

        Effect::TitrationMeasured { base_volume, ph } => out.push(FeedbackLine::ok(format!(
            "Measurement at {:.2} mL base → pH={:.3}",
            base_volume, ph
        ))),

        Effect::DiskPlotted { mass, spin, .. } => out.push(FeedbackLine::ok(format!(
            "Accretion disk profile for {:.1} M☉ black hole, spin {:.2}.",
            mass, spin
        ))),

        Effect::GeometrySelected { id } => {
            out.push(FeedbackLine::ok(format!("Selected {}.", id.shape().title)))
        }

        Effect::GeometryDescribed { id } => {
            let shape = id.shape();
            out.push(FeedbackLine::hint(format!(
                "{}: hybridization {}, ideal bond angle ≈ {}°, {}",
                shape.title, shape.hybridization, shape.bond_angle, shape.description
            )));
        }
    }
}

fn updated_message(domain: DomainId) -> &'static str {
    match domain {
        DomainId::Rc | DomainId::Ohm => "Updated circuit values.",
        DomainId::Titration => "Updated titration values.",
        DomainId::BlackHole => "Updated black hole parameters.",
        DomainId::Geometry => "Updated geometry.",
    }
}

/// Error lines for a command that applied nothing, plus the repair offer.
pub fn render_failure(report: &FailureReport) -> Vec<FeedbackLine> {
    let mut lines: Vec<FeedbackLine> = report
        .lines
        .iter()
        .map(|line| FeedbackLine::error(line.clone()))
        .collect();
    if let Some(suggestion) = &report.suggestion {
        lines.push(FeedbackLine::hint(format!("Fix it for me: {}", suggestion)));
    }
    lines
}

/// `series,x,y` rows with the label JSON-quoted.
pub fn series_csv(series: &SampledSeries) -> String {
    let label = serde_json::to_string(&series.label).unwrap_or_else(|_| "\"\"".to_string());
    let mut rows = Vec::with_capacity(series.len() + 1);
    rows.push("series,x,y".to_string());
    for (x, y) in series.x_values.iter().zip(&series.y_values) {
        rows.push(format!("{},{},{}", label, x, y));
    }
    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use vlab_core::{execute, parse, LabState};

    fn texts(command: &str, state: LabState) -> Vec<String> {
        let parsed = parse(command, state.active);
        let exec = execute(&parsed.actions, state);
        render_feedback(&exec.reports)
            .into_iter()
            .map(|l| l.text)
            .collect()
    }

    #[test]
    fn test_rc_set_and_plot_lines() {
        let lines = texts(
            "set V = 9 V and plot capacitor voltage",
            LabState::default(),
        );
        assert_eq!(
            lines,
            vec![
                "Updated circuit values.".to_string(),
                "Plotted voltage for 1.00 s (τ=0.1000 s).".to_string(),
                "Assuming plot duration = 1 s (default).".to_string(),
            ]
        );
    }

    #[test]
    fn test_unchanged_set_is_silent() {
        let lines = texts("set V = 5 V", LabState::default());
        assert!(lines.is_empty(), "unexpected lines: {lines:?}");
    }

    #[test]
    fn test_explicit_duration_has_no_default_note() {
        let lines = texts("plot current for 5 s", LabState::default());
        assert_eq!(lines, vec!["Plotted current for 5.00 s (τ=0.1000 s).".to_string()]);
    }

    #[test]
    fn test_titration_run_lines() {
        let lines = texts("run titration", LabState::with_active(DomainId::Titration));
        assert_eq!(lines[0], "Equivalence at ≈ 50.00 mL, pH ≈ 7");
        assert!(lines[1].starts_with("Curve passes analytic sanity checks"));
    }

    #[test]
    fn test_ohm_plot_line_formats_resistance() {
        let lines = texts("plot the i-v curve", LabState::with_active(DomainId::Ohm));
        assert_eq!(lines, vec!["Plotted I–V curve up to 10.00 V for R=1.000 kΩ.".to_string()]);
    }

    #[test]
    fn test_switch_uses_lab_label() {
        let lines = texts("simulate a black hole", LabState::default());
        assert_eq!(lines[0], "Switched to Black hole accretion.");
    }

    #[test]
    fn test_failure_lines_are_errors_with_fix_hint() {
        let report = FailureReport {
            kind: vlab_core::FailureKind::NotUnderstood,
            lines: vec!["I couldn't turn that into a simulation step.".to_string()],
            suggestion: Some("plot voltage".to_string()),
        };
        let lines = render_failure(&report);
        assert_eq!(lines[0].tone, Tone::Error);
        assert_eq!(lines[1], FeedbackLine::hint("Fix it for me: plot voltage"));
    }

    #[test]
    fn test_series_csv_quotes_label() {
        let series = SampledSeries {
            x_values: vec![0.0, 0.5],
            y_values: vec![1.0, 2.0],
            label: "V_C (V)".to_string(),
        };
        assert_eq!(
            series_csv(&series),
            "series,x,y\n\"V_C (V)\",0,1\n\"V_C (V)\",0.5,2"
        );
    }
}
