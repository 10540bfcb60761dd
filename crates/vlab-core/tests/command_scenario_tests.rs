#![allow(clippy::unwrap_used, clippy::expect_used)]

use vlab_core::sim::rc::{RcParams, RcTarget};
use vlab_core::{
    classify, execute, explain_failure, parse, DomainId, Effect, FailureKind, LabState,
    ParsedAction,
};

#[test]
fn test_set_all_rc_fields_and_plot_voltage() {
    let state = LabState::default();
    let parsed = parse(
        "Set V = 5 V, R = 1 kΩ, C = 100 µF and plot capacitor voltage for 1 s",
        DomainId::Rc,
    );

    assert_eq!(parsed.actions.len(), 2);
    let ParsedAction::RcSet {
        v: Some(v),
        r: Some(r),
        c: Some(c),
    } = parsed.actions[0]
    else {
        panic!("expected a full RcSet, got {:?}", parsed.actions[0]);
    };
    assert_eq!(v, 5.0);
    assert_eq!(r, 1000.0);
    assert!((c - 1e-4).abs() < 1e-15);
    assert_eq!(
        parsed.actions[1],
        ParsedAction::RcPlot {
            target: RcTarget::Voltage,
            duration: Some(1.0)
        }
    );

    let exec = execute(&parsed.actions, state);
    assert!((exec.state.rc.tau() - 0.1).abs() < 1e-12);
    assert!((exec.state.rc.capacitor_voltage(0.1) - 3.1606).abs() < 1e-4);
    let series = exec.series.expect("voltage series");
    assert_eq!(series.label, "V_C (V)");
    assert_eq!(*series.x_values.last().unwrap(), 1.0);
}

#[test]
fn test_double_resistance_then_plot_current() {
    let state = LabState::default();
    assert_eq!(state.rc.r, 1000.0);

    let parsed = parse("double the resistance and plot current for 5 s", state.active);
    assert_eq!(
        parsed.actions,
        vec![
            ParsedAction::RcScale {
                v_mul: None,
                r_mul: Some(2.0),
                c_mul: None
            },
            ParsedAction::RcPlot {
                target: RcTarget::Current,
                duration: Some(5.0)
            },
        ]
    );

    let exec = execute(&parsed.actions, state);
    assert_eq!(exec.state.rc.r, 2000.0);
    match exec.reports[1].effect {
        Effect::RcPlotted {
            target, duration, ..
        } => {
            assert_eq!(target, RcTarget::Current);
            assert_eq!(duration, 5.0);
        }
        ref other => panic!("unexpected effect {:?}", other),
    }
}

#[test]
fn test_titration_vocabulary_beats_resistor_vocabulary() {
    let c = classify("titrate acid with a resistor and capacitor", DomainId::Rc);
    assert_eq!(c.inferred, Some(DomainId::Titration));
    assert!(c.switch_required);
}

#[test]
fn test_switching_domains_keeps_inactive_state() {
    let state = LabState::default();
    let first = execute(&parse("set R = 4.7 kΩ", DomainId::Rc).actions, state);
    assert_eq!(first.state.rc.r, 4700.0);

    let second = execute(
        &parse("plot the i-v curve up to 20 V", first.state.active).actions,
        first.state,
    );
    assert_eq!(second.state.active, DomainId::Ohm);
    assert_eq!(second.state.ohm.v_max, 20.0);
    assert_eq!(second.state.rc.r, 4700.0);
}

#[test]
fn test_unsafe_request_is_clamped_not_rejected() {
    let parsed = parse("set V = 12 V and R = 10 ohm", DomainId::Rc);
    let exec = execute(&parsed.actions, LabState::default());
    let RcParams { v, r, .. } = exec.state.rc;
    assert_eq!(v, 12.0);
    assert!((r - 120.0).abs() < 1e-9);
    assert!(exec.state.is_within_envelope());
}

#[test]
fn test_unreadable_literal_leaves_only_its_field_unchanged() {
    let state = LabState::default();
    let parsed = parse("set V = 9 V, C = 1e-4 F and plot voltage", state.active);

    assert_eq!(
        parsed.actions[0],
        ParsedAction::RcSet {
            v: Some(9.0),
            r: None,
            c: None
        }
    );
    assert_eq!(parsed.unparsed_issues.len(), 1);
    assert!(parsed.unparsed_issues[0].contains("C"));
    assert!(parsed.unparsed_issues[0].contains("1e-4 F"));

    let exec = execute(&parsed.actions, state);
    assert_eq!(exec.state.rc.v, 9.0);
    assert_eq!(exec.state.rc.c, state.rc.c);
    assert_eq!(exec.state.rc.r, state.rc.r);
    assert!(exec.series.is_some());
}

#[test]
fn test_gibberish_produces_failure_report_with_example() {
    let parsed = parse("make it sparkle", DomainId::Rc);
    let exec = execute(&parsed.actions, LabState::default());
    assert_eq!(exec.applied, 0);

    let report = explain_failure(&parsed);
    assert_eq!(report.kind, FailureKind::NotUnderstood);
    assert!(report.lines[1].starts_with("Try a command like:"));
}

#[test]
fn test_partial_understanding_echoes_fragments() {
    let parsed = parse("describe nothing", DomainId::Geometry);
    assert!(parsed.has_actions());

    let parsed = parse("set R = 2 kΩ", DomainId::Rc);
    assert_eq!(parsed.recognized_fragments, vec!["R = 2.000 kΩ".to_string()]);
}

#[test]
fn test_typo_command_suggests_repair_without_applying_it() {
    let state = LabState::default();
    let parsed = parse("plot the curent for 5 secs", state.active);
    assert!(parsed.actions.is_empty());
    assert_eq!(
        parsed.suggested_repair.as_deref(),
        Some("plot the current for 5 s")
    );

    let report = explain_failure(&parsed);
    assert_eq!(report.suggestion, parsed.suggested_repair);

    let repaired = parse(report.suggestion.as_deref().unwrap(), state.active);
    assert_eq!(
        repaired.actions,
        vec![ParsedAction::RcPlot {
            target: RcTarget::Current,
            duration: Some(5.0)
        }]
    );
}

#[test]
fn test_reset_restores_previously_active_domain_before_switch() {
    let mut state = LabState::default();
    state.rc.v = 9.0;
    state.titration.acid_c = 0.5;
    let exec = execute(&parse("reset and open the titration", state.active).actions, state);
    assert_eq!(exec.state.active, DomainId::Titration);
    assert_eq!(exec.state.rc.v, 5.0);
    assert_eq!(exec.state.titration.acid_c, 0.5);
}

#[test]
fn test_parse_and_execute_are_deterministic() {
    let commands = [
        "Set V = 5 V, R = 1 kΩ, C = 100 µF and plot capacitor voltage for 1 s",
        "Run a strong-acid titration and mark the equivalence point",
        "Simulate a black hole with mass 5 solar masses, spin 0.7, plot the accretion disk profile",
        "Explain tetrahedral hybridization and show the bond angles",
        "Set resistance to 1 kΩ and max voltage to 10 V, then plot the I-V curve",
        "plot curent",
    ];
    for command in commands {
        let state = LabState::default();
        let a = parse(command, state.active);
        let b = parse(command, state.active);
        assert_eq!(a, b, "parse differs for {:?}", command);
        assert_eq!(
            execute(&a.actions, state),
            execute(&b.actions, state),
            "execute differs for {:?}",
            command
        );
    }
}

#[test]
fn test_every_action_stays_within_one_domain() {
    let parsed = parse(
        "Simulate a black hole with mass 5 solar masses, spin 0.7, plot the accretion disk profile",
        DomainId::Rc,
    );
    let domains: Vec<_> = parsed.actions.iter().filter_map(|a| a.domain()).collect();
    assert!(domains.iter().all(|d| *d == DomainId::BlackHole));
}
