#![allow(clippy::unwrap_used, clippy::expect_used)]

// Integration tests for the Lab session: multi-command flows, presets,
// engine commands and cross-domain state persistence.

use vlab_core::sim::rc::RcTarget;
use vlab_core::{DomainId, Effect, FailureKind, ParsedAction};
use vlab_core_types::{CommandSource, RequestContext};
use vlab_engine::report::Tone;
use vlab_engine::{
    apply_engine_command, example_command, EngineCommand, EngineCommandResult, Lab, LabConfig,
};

fn texts(outcome: &vlab_engine::CommandOutcome) -> Vec<&str> {
    outcome.feedback.iter().map(|l| l.text.as_str()).collect()
}

// ---------------------------------------------------------------------------
// run_command
// ---------------------------------------------------------------------------

#[test]
fn test_set_and_plot_capacitor_voltage() {
    let mut lab = Lab::default();
    let outcome = lab
        .run_command("Set V = 5 V, R = 1 kΩ, C = 100 µF and plot capacitor voltage for 1 s")
        .unwrap();

    assert_eq!(outcome.execution.applied, 2);
    assert!(matches!(
        outcome.parse.actions[1],
        ParsedAction::RcPlot {
            target: RcTarget::Voltage,
            duration: Some(d)
        } if d == 1.0
    ));

    let series = lab.series().expect("voltage series");
    assert_eq!(series.label, "V_C (V)");
    let last = *series.y_values.last().unwrap();
    assert!(last > 4.99 && last <= 5.0, "V_C(1 s) = {last}");

    let lines = texts(&outcome);
    assert_eq!(
        lines[0],
        "Command → Set V = 5 V, R = 1 kΩ, C = 100 µF and plot capacitor voltage for 1 s"
    );
    assert!(lines.contains(&"Plotted voltage for 1.00 s (τ=0.1000 s)."));
    assert!(!lines.iter().any(|l| l.starts_with("Assuming")));
}

#[test]
fn test_double_resistance_then_plot_current() {
    let mut lab = Lab::default();
    let outcome = lab
        .run_command("double the resistance and plot current for 5 s")
        .unwrap();
    assert_eq!(lab.state().rc.r, 2000.0);
    assert_eq!(lab.series().unwrap().label, "Current I (A)");
    assert!(texts(&outcome).contains(&"Plotted current for 5.00 s (τ=0.2000 s)."));
}

#[test]
fn test_each_domain_keeps_its_values_across_switches() {
    let mut lab = Lab::default();
    lab.run_command("set R = 2 kΩ").unwrap();
    lab.run_command("simulate a black hole with mass 8 solar masses")
        .unwrap();
    assert_eq!(lab.active(), DomainId::BlackHole);
    assert_eq!(lab.state().black_hole.mass, 8.0);

    lab.run_command("set resistance to 3 kΩ")
        .unwrap();
    assert_eq!(lab.active(), DomainId::Rc);
    assert_eq!(lab.state().rc.r, 3000.0);
    assert_eq!(lab.state().black_hole.mass, 8.0);
}

#[test]
fn test_unsafe_voltage_is_saturated() {
    let mut lab = Lab::default();
    lab.run_command("set V = 50 V").unwrap();
    assert_eq!(lab.state().rc.v, 12.0);
    assert!(lab.state().is_within_envelope());
}

#[test]
fn test_reset_restores_only_active_domain() {
    let mut lab = Lab::default();
    lab.run_command("set R = 4.7 kΩ").unwrap();
    lab.run_command("run a titration with acid = 0.2 M").unwrap();
    assert_eq!(lab.state().titration.acid_c, 0.2);

    let outcome = lab.run_command("reset").unwrap();
    assert!(texts(&outcome).contains(&"Experiment reset to starter values."));
    assert_eq!(lab.state().titration.acid_c, 0.1);
    assert_eq!(lab.state().rc.r, 4700.0);
    assert!(lab.series().is_none());
}

#[test]
fn test_gibberish_reports_not_understood() {
    let mut lab = Lab::default();
    let outcome = lab.run_command("sing me a song").unwrap();
    let failure = outcome.failure.as_ref().unwrap();
    assert_eq!(failure.kind, FailureKind::NotUnderstood);
    assert!(outcome
        .feedback
        .iter()
        .skip(1)
        .all(|l| l.tone != Tone::Ok));
}

#[test]
fn test_typo_repair_round_trip() {
    let mut lab = Lab::default();
    let outcome = lab.run_command("plot volatge for 2 secs").unwrap();
    let suggestion = outcome.suggestion().expect("repair offered").to_string();
    assert!(suggestion.contains("voltage"), "suggestion: {suggestion}");

    let repaired = lab.run_repair(&suggestion).unwrap();
    assert!(!repaired.is_failure());
    assert!(repaired.feedback[0].text.starts_with("Fixing command to: "));
    assert_eq!(lab.history(), ["plot volatge for 2 secs"]);
}

#[test]
fn test_every_example_command_succeeds() {
    for domain in DomainId::ALL {
        let mut lab = Lab::default();
        let outcome = lab.run_command(example_command(domain)).unwrap();
        assert!(!outcome.is_failure(), "example for {domain} failed");
        assert_eq!(lab.active(), domain);
    }
}

#[test]
fn test_titration_example_marks_equivalence() {
    let mut lab = Lab::default();
    let outcome = lab.run_command(example_command(DomainId::Titration)).unwrap();
    assert!(outcome
        .execution
        .reports
        .iter()
        .any(|r| matches!(r.effect, Effect::TitrationPlotted { marked: true, .. })));
    assert!(texts(&outcome).contains(&"Equivalence at ≈ 50.00 mL, pH ≈ 7"));
}

#[test]
fn test_identical_sessions_are_deterministic() {
    let script = [
        "set V = 9 V",
        "double the capacitance",
        "plot current for 3 s",
        "switch to ohm's law and set resistance to 470 Ω",
        "plot the i-v curve",
    ];
    let mut a = Lab::default();
    let mut b = Lab::default();
    for line in script {
        let oa = a.run_command(line).unwrap();
        let ob = b.run_command(line).unwrap();
        assert_eq!(oa.parse, ob.parse);
        assert_eq!(oa.execution, ob.execution);
        assert_eq!(oa.feedback, ob.feedback);
    }
    assert_eq!(a.state(), b.state());
    assert_eq!(a.series(), b.series());
}

#[test]
fn test_sampling_config_drives_series_length() {
    let mut config = LabConfig::default();
    config.sampling.rc_samples = 50;
    let mut lab = Lab::new(config);
    lab.run_command("plot voltage").unwrap();
    assert_eq!(lab.series().unwrap().len(), 51);
}

// ---------------------------------------------------------------------------
// engine commands
// ---------------------------------------------------------------------------

#[test]
fn test_engine_command_run_keeps_context() {
    let mut lab = Lab::default();
    let context = RequestContext::new(CommandSource::Voice);
    let id = context.request_id.clone();
    let result = apply_engine_command(
        EngineCommand::Run {
            text: "plot voltage".to_string(),
            context,
        },
        &mut lab,
    )
    .unwrap();
    match result {
        EngineCommandResult::Command(outcome) => assert_eq!(outcome.request_id, id),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_engine_command_preset_then_reset() {
    let mut lab = Lab::default();
    apply_engine_command(
        EngineCommand::ApplyPreset {
            domain: DomainId::Ohm,
            title: "Lab PS".to_string(),
        },
        &mut lab,
    )
    .unwrap();
    assert_eq!(lab.active(), DomainId::Ohm);
    assert_eq!(lab.state().ohm.r, 470.0);

    let result = apply_engine_command(EngineCommand::Reset, &mut lab).unwrap();
    assert!(matches!(result, EngineCommandResult::Reset(DomainId::Ohm)));
    assert_eq!(lab.state().ohm.r, 1000.0);
}

#[test]
fn test_engine_command_switch() {
    let mut lab = Lab::default();
    let result = apply_engine_command(
        EngineCommand::Switch {
            to: DomainId::Geometry,
        },
        &mut lab,
    )
    .unwrap();
    assert!(matches!(result, EngineCommandResult::Switched(DomainId::Geometry)));
}

#[test]
fn test_engine_command_unknown_preset_is_error() {
    let mut lab = Lab::default();
    let err = apply_engine_command(
        EngineCommand::ApplyPreset {
            domain: DomainId::Titration,
            title: "Lab PS".to_string(),
        },
        &mut lab,
    )
    .unwrap_err();
    let ex: vlab_core::ExError = err.into();
    assert_eq!(ex.code(), "ERR_NOT_FOUND");
}
