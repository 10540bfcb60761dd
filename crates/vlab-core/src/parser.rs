//! Free-text command parser
//!
//! Turns one operator command into an ordered list of [`ParsedAction`]s plus
//! diagnostics. Parsing never fails: anything not understood is reported in
//! the result instead.
//!
//! Within one command, actions are emitted by category: reset, domain
//! switch, parameter sets, scale phrases, marker toggles, plots,
//! measurements, and finally the default plot implied by `start`/`run`/`go`.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::actions::ParsedAction;
use crate::classifier::classify;
use crate::diagnostics::unreadable_issue;
use crate::domain::DomainId;
use crate::pattern::{CONNECTOR, NUM, SCALE, TIME_UNIT, VALUE};
use crate::repair::{repair_command, scan_typos};
use crate::sim::rc::RcTarget;
use crate::sim::vsepr::shapes;
use crate::units::{format_farads, format_ohms, parse_bare_float, scientific_at, UnitFamily};

/// Everything the parser understood, and what it did not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Actions in execution order
    pub actions: Vec<ParsedAction>,
    /// Human-readable echo of each extracted field or phrase
    pub recognized_fragments: Vec<String>,
    /// Suspected typos and unreadable values
    pub unparsed_issues: Vec<String>,
    /// Rewritten command, offered only when no action was produced
    pub suggested_repair: Option<String>,
}

impl ParseResult {
    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }
}

// Normalization
pattern! { fn thousands_re() = r"(\d),(\d{3})\b"; }
pattern! { fn separators_re() = r"[,;]+"; }

// Domain-agnostic
pattern! { fn reset_re() = r"\breset\b"; }
pattern! { fn start_re() = r"\b(?:start|run|go)\b"; }
pattern! {
    fn non_numeric_re() =
        r"(?i)\b(?P<name>v|r|c|voltage|resistance|capacitance|mass|spin|accretion)\s*[=:]\s*(?P<bad>[^\s\d.+\-][^\s]*)";
}
pattern! { fn duration_re() = format!(r"(?i)\bfor\s*(?P<val>{NUM})\s*{TIME_UNIT}"); }

// RC
pattern! { fn rc_v_re() = format!(r"(?i)\b(?:v|voltage)\b{CONNECTOR}{VALUE}"); }
pattern! { fn rc_r_re() = format!(r"(?i)\b(?:r|resistance)\b{CONNECTOR}{VALUE}"); }
pattern! { fn rc_c_re() = format!(r"(?i)\b(?:c|capacitance)\b{CONNECTOR}{VALUE}"); }
pattern! { fn rc_scale_re() = format!(r"{SCALE}(?P<q>resistance|capacitance|voltage)\b"); }
pattern! { fn rc_plot_re() = r"\bplot\b.*?\b(?P<target>current|voltage|vc)\b"; }
pattern! {
    fn rc_measure_re() =
        format!(r"(?i)\bmeasure\b.*?(?:\bt\s*[=:]?|\bat)\s*(?P<val>{NUM})\s*{TIME_UNIT}");
}

// Ohm's law
pattern! { fn ohm_r_re() = format!(r"(?i)\b(?:r|resistance)\b{CONNECTOR}{VALUE}"); }
pattern! { fn ohm_vmax_re() = format!(r"(?i)\bmax(?:imum)?\s+voltage\b{CONNECTOR}{VALUE}"); }
pattern! { fn ohm_up_to_re() = format!(r"(?i)\bup\s+to\s*(?P<val>{NUM}\s*v(?:olts?)?)\b"); }
pattern! { fn ohm_scale_re() = format!(r"{SCALE}(?P<q>resistance|max(?:imum)? voltage)\b"); }
pattern! {
    fn ohm_plot_re() =
        r"\bplot\b.*(?:\bi[-\s]?v\b|\bohm)|\bplot\s+(?:the\s+)?current\b.*\bvoltage\b|\bsweep\b";
}
pattern! {
    fn ohm_measure_re() = format!(r"(?i)\bmeasure\b.*?\bat\s*(?P<val>{NUM})\s*v(?:olts?)?\b");
}

// Titration
pattern! { fn acid_c_re() = format!(r"(?i)\bacid(?:\s+concentration)?\b{CONNECTOR}{VALUE}"); }
pattern! { fn acid_v_re() = format!(r"(?i)\bacid\b.*?\bvolume\b{CONNECTOR}{VALUE}"); }
pattern! {
    fn acid_v_of_re() =
        format!(r"(?i)(?P<val>{NUM}\s*(?:ml|milliliters?|millilitres?))\s+of\s+(?:the\s+)?acid\b");
}
pattern! { fn base_c_re() = format!(r"(?i)\bbase(?:\s+concentration)?\b{CONNECTOR}{VALUE}"); }
pattern! {
    fn titration_scale_re() =
        format!(r"{SCALE}(?P<q>acid concentration|acid volume|base concentration)\b");
}
pattern! { fn mark_re() = r"\bmark\b.*?\bequivalence"; }
pattern! { fn unmark_re() = r"\b(?:unmark|hide)\b.*?\bequivalence"; }
pattern! { fn titration_run_re() = r"\b(?:run|start)\b.*\btitrat|\bplot\b.*\bph\b"; }
pattern! {
    fn titration_measure_re() =
        format!(r"(?i)\b(?:measure|ph)\b.*?\bat\s*(?P<val>{NUM})\s*(?:ml|milliliters?|millilitres?)\b");
}

// Black hole
pattern! { fn bh_mass_re() = format!(r"(?i)\bmass\b{CONNECTOR}(?P<val>{NUM})"); }
pattern! { fn bh_spin_re() = format!(r"(?i)\bspin\b{CONNECTOR}(?P<val>{NUM})"); }
pattern! { fn bh_accretion_re() = format!(r"(?i)\baccretion(?:\s+rate)?\b{CONNECTOR}(?P<val>{NUM})"); }
pattern! { fn bh_scale_re() = format!(r"{SCALE}(?P<q>mass|accretion(?: rate)?)\b"); }
pattern! { fn bh_plot_re() = r"\b(?:plot|render|simulate)\b"; }

// Geometry
pattern! { fn describe_re() = r"\b(?:describe|explain|angle|show)"; }

/// The command in the two forms the rule sets match against.
struct Text<'a> {
    /// Separators normalized, original case; used for literal extraction
    normalized: &'a str,
    /// Lowercased `normalized`; used for keyword matching
    lower: &'a str,
}

/// Outcome of a single field lookup.
enum Field {
    Absent,
    Value(f64),
    Unreadable(String),
}

impl Field {
    fn or_else(self, f: impl FnOnce() -> Field) -> Field {
        match self {
            Field::Absent => f(),
            other => other,
        }
    }
}

/// Parse `text` against the current `active` domain.
pub fn parse(text: &str, active: DomainId) -> ParseResult {
    let normalized = normalize(text);
    let lower = normalized.to_lowercase();
    let text_forms = Text {
        normalized: &normalized,
        lower: &lower,
    };
    let mut out = ParseResult::default();

    if reset_re().is_match(&lower) {
        out.actions.push(ParsedAction::Reset);
    }

    let classification = classify(&lower, active);
    let domain = classification.effective(active);
    if classification.switch_required {
        out.actions.push(ParsedAction::Switch { to: domain });
    }

    match domain {
        DomainId::Rc => parse_rc(&text_forms, &mut out),
        DomainId::Ohm => parse_ohm(&text_forms, &mut out),
        DomainId::Titration => parse_titration(&text_forms, &mut out),
        DomainId::BlackHole => parse_black_hole(&text_forms, &mut out),
        DomainId::Geometry => parse_geometry(&text_forms, &mut out),
    }

    report_non_numeric(&text_forms, &mut out);
    out.unparsed_issues.extend(scan_typos(&lower));

    if out.actions.is_empty() {
        out.suggested_repair = repair_command(text);
    }

    tracing::debug!(
        domain = domain.as_str(),
        actions = out.actions.len(),
        issues = out.unparsed_issues.len(),
        "command parsed"
    );
    out
}

/// Join thousands separators, then turn `,`/`;` runs into ` and `.
fn normalize(text: &str) -> String {
    let mut joined = text.to_string();
    loop {
        let next = thousands_re().replace_all(&joined, "${1}${2}").into_owned();
        if next == joined {
            break;
        }
        joined = next;
    }
    separators_re().replace_all(&joined, " and ").into_owned()
}

/// Value assigned to a field, read with the family's unit parser.
///
/// A bare number is accepted only after an explicit connector and only
/// when it does not carry another family's unit.
fn assigned(re: &Regex, text: &str, family: UnitFamily) -> Field {
    let Some(caps) = re.captures(text) else {
        return Field::Absent;
    };
    let Some(fragment) = caps.name("val").map(|m| m.as_str().trim()) else {
        return Field::Absent;
    };
    if let Some(value) = family.parse(fragment) {
        return Field::Value(value);
    }
    let foreign_unit = UnitFamily::ALL
        .iter()
        .any(|other| *other != family && other.parse(fragment).is_some());
    if caps.name("conn").is_some() && !foreign_unit {
        if let Some(value) = parse_bare_float(fragment) {
            return Field::Value(value);
        }
    }
    Field::Unreadable(fragment.to_string())
}

/// Unit-less number following a field name.
fn number(re: &Regex, text: &str) -> Field {
    let Some(m) = re.captures(text).and_then(|caps| caps.name("val")) else {
        return Field::Absent;
    };
    if scientific_at(text, m.start()) {
        let token = text[m.start()..].split_whitespace().next().unwrap_or(m.as_str());
        return Field::Unreadable(token.to_string());
    }
    match parse_bare_float(m.as_str()) {
        Some(value) => Field::Value(value),
        None => Field::Unreadable(m.as_str().to_string()),
    }
}

/// Record a field lookup in the diagnostics and return its value.
fn take(out: &mut ParseResult, label: &str, field: Field, echo: fn(f64) -> String) -> Option<f64> {
    match field {
        Field::Value(value) => {
            out.recognized_fragments
                .push(format!("{} = {}", label, echo(value)));
            Some(value)
        }
        Field::Unreadable(fragment) => {
            out.unparsed_issues.push(unreadable_issue(label, &fragment));
            None
        }
        Field::Absent => None,
    }
}

/// Every `double|half <quantity>` phrase, in text order.
fn scale_phrases<'t>(re: &Regex, lower: &'t str) -> Vec<(f64, &'t str)> {
    re.captures_iter(lower)
        .filter_map(|caps| {
            let factor = match caps.name("op")?.as_str() {
                "double" | "twice" => 2.0,
                _ => 0.5,
            };
            Some((factor, caps.name("q")?.as_str()))
        })
        .collect()
}

fn scale_fragment(factor: f64, quantity: &str) -> String {
    let verb = if factor > 1.0 { "Double" } else { "Half" };
    format!("{} {}", verb, quantity)
}

/// Seconds from a `val` + `unit` capture pair.
fn seconds(caps: &regex::Captures<'_>) -> Option<f64> {
    let value = caps.name("val")?.as_str().parse::<f64>().ok()?;
    let unit = caps.name("unit")?.as_str().to_ascii_lowercase();
    if unit.starts_with('m') {
        Some(value / 1000.0)
    } else {
        Some(value)
    }
}

fn has_plot(out: &ParseResult) -> bool {
    out.actions.iter().any(ParsedAction::is_plot)
}

fn plain(value: f64) -> String {
    value.to_string()
}

fn volts(value: f64) -> String {
    format!("{} V", value)
}

fn molar(value: f64) -> String {
    format!("{} M", value)
}

fn milliliters(value: f64) -> String {
    format!("{} mL", value)
}

fn solar_masses(value: f64) -> String {
    format!("{} M☉", value)
}

fn parse_rc(text: &Text<'_>, out: &mut ParseResult) {
    let v = take(
        out,
        "V",
        assigned(rc_v_re(), text.normalized, UnitFamily::Volts),
        volts,
    );
    let r = take(
        out,
        "R",
        assigned(rc_r_re(), text.normalized, UnitFamily::Ohms),
        format_ohms,
    );
    let c = take(
        out,
        "C",
        assigned(rc_c_re(), text.normalized, UnitFamily::Farads),
        format_farads,
    );
    if v.is_some() || r.is_some() || c.is_some() {
        out.actions.push(ParsedAction::RcSet { v, r, c });
    }

    for (factor, quantity) in scale_phrases(rc_scale_re(), text.lower) {
        let action = match quantity {
            "resistance" => ParsedAction::RcScale {
                v_mul: None,
                r_mul: Some(factor),
                c_mul: None,
            },
            "capacitance" => ParsedAction::RcScale {
                v_mul: None,
                r_mul: None,
                c_mul: Some(factor),
            },
            _ => ParsedAction::RcScale {
                v_mul: Some(factor),
                r_mul: None,
                c_mul: None,
            },
        };
        out.actions.push(action);
        out.recognized_fragments
            .push(scale_fragment(factor, quantity));
    }

    if let Some(caps) = rc_plot_re().captures(text.lower) {
        let target = match caps.name("target").map(|m| m.as_str()) {
            Some("current") => RcTarget::Current,
            _ => RcTarget::Voltage,
        };
        let duration = duration_re()
            .captures(text.normalized)
            .and_then(|caps| seconds(&caps));
        out.actions.push(ParsedAction::RcPlot { target, duration });
        out.recognized_fragments.push(match duration {
            Some(d) => format!("Plot {} for {} s", target.as_str(), d),
            None => format!("Plot {}", target.as_str()),
        });
    }

    if let Some(t) = rc_measure_re()
        .captures(text.normalized)
        .and_then(|caps| seconds(&caps))
    {
        out.actions.push(ParsedAction::RcMeasure { t });
        out.recognized_fragments
            .push(format!("Measure at t = {} s", t));
    }

    if start_re().is_match(text.lower) && !has_plot(out) {
        out.actions.push(ParsedAction::RcPlot {
            target: RcTarget::Voltage,
            duration: None,
        });
    }
}

fn parse_ohm(text: &Text<'_>, out: &mut ParseResult) {
    let r = take(
        out,
        "R",
        assigned(ohm_r_re(), text.normalized, UnitFamily::Ohms),
        format_ohms,
    );
    let v_max = take(
        out,
        "Vmax",
        assigned(ohm_vmax_re(), text.normalized, UnitFamily::Volts)
            .or_else(|| assigned(ohm_up_to_re(), text.normalized, UnitFamily::Volts)),
        volts,
    );
    if r.is_some() || v_max.is_some() {
        out.actions.push(ParsedAction::OhmSet { r, v_max });
    }

    for (factor, quantity) in scale_phrases(ohm_scale_re(), text.lower) {
        let action = if quantity == "resistance" {
            ParsedAction::OhmScale {
                r_mul: Some(factor),
                v_max_mul: None,
            }
        } else {
            ParsedAction::OhmScale {
                r_mul: None,
                v_max_mul: Some(factor),
            }
        };
        out.actions.push(action);
        out.recognized_fragments
            .push(scale_fragment(factor, quantity));
    }

    if ohm_plot_re().is_match(text.lower) {
        out.actions.push(ParsedAction::OhmPlot);
        out.recognized_fragments.push("Plot I-V".to_string());
    }

    if let Some(volts) = ohm_measure_re()
        .captures(text.normalized)
        .and_then(|caps| caps.name("val")?.as_str().parse::<f64>().ok())
    {
        out.actions.push(ParsedAction::OhmMeasure { volts });
        out.recognized_fragments
            .push(format!("Measure current at {} V", volts));
    }

    if start_re().is_match(text.lower) && !has_plot(out) {
        out.actions.push(ParsedAction::OhmPlot);
    }
}

fn parse_titration(text: &Text<'_>, out: &mut ParseResult) {
    let acid_c = take(
        out,
        "Acid",
        assigned(acid_c_re(), text.normalized, UnitFamily::Molar),
        molar,
    );
    let acid_v = take(
        out,
        "Acid volume",
        assigned(acid_v_re(), text.normalized, UnitFamily::Milliliters)
            .or_else(|| assigned(acid_v_of_re(), text.normalized, UnitFamily::Milliliters)),
        milliliters,
    );
    let base_c = take(
        out,
        "Base",
        assigned(base_c_re(), text.normalized, UnitFamily::Molar),
        molar,
    );
    if acid_c.is_some() || acid_v.is_some() || base_c.is_some() {
        out.actions.push(ParsedAction::TitrationSet {
            acid_c,
            acid_v,
            base_c,
        });
    }

    for (factor, quantity) in scale_phrases(titration_scale_re(), text.lower) {
        let action = match quantity {
            "acid concentration" => ParsedAction::TitrationScale {
                acid_c_mul: Some(factor),
                acid_v_mul: None,
                base_c_mul: None,
            },
            "acid volume" => ParsedAction::TitrationScale {
                acid_c_mul: None,
                acid_v_mul: Some(factor),
                base_c_mul: None,
            },
            _ => ParsedAction::TitrationScale {
                acid_c_mul: None,
                acid_v_mul: None,
                base_c_mul: Some(factor),
            },
        };
        out.actions.push(action);
        out.recognized_fragments
            .push(scale_fragment(factor, quantity));
    }

    // "unmark" contains "mark"; the negative form wins
    if unmark_re().is_match(text.lower) {
        out.actions.push(ParsedAction::TitrationMark { on: false });
        out.recognized_fragments
            .push("Hide equivalence point".to_string());
    } else if mark_re().is_match(text.lower) {
        out.actions.push(ParsedAction::TitrationMark { on: true });
        out.recognized_fragments
            .push("Mark equivalence point".to_string());
    }

    if titration_run_re().is_match(text.lower) {
        out.actions.push(ParsedAction::TitrationRun);
        out.recognized_fragments.push("Run titration".to_string());
    }

    if let Some(base_volume) = titration_measure_re()
        .captures(text.normalized)
        .and_then(|caps| caps.name("val")?.as_str().parse::<f64>().ok())
    {
        out.actions
            .push(ParsedAction::TitrationMeasure { base_volume });
        out.recognized_fragments
            .push(format!("Measure pH at {} mL", base_volume));
    }

    if start_re().is_match(text.lower) && !has_plot(out) {
        out.actions.push(ParsedAction::TitrationRun);
    }
}

fn parse_black_hole(text: &Text<'_>, out: &mut ParseResult) {
    let mass = take(out, "Mass", number(bh_mass_re(), text.normalized), solar_masses);
    let spin = take(out, "Spin", number(bh_spin_re(), text.normalized), plain);
    let accretion = take(
        out,
        "Accretion",
        number(bh_accretion_re(), text.normalized),
        plain,
    );
    if mass.is_some() || spin.is_some() || accretion.is_some() {
        out.actions.push(ParsedAction::BlackHoleSet {
            mass,
            spin,
            accretion,
        });
    }

    for (factor, quantity) in scale_phrases(bh_scale_re(), text.lower) {
        let action = if quantity == "mass" {
            ParsedAction::BlackHoleScale {
                mass_mul: Some(factor),
                accretion_mul: None,
            }
        } else {
            ParsedAction::BlackHoleScale {
                mass_mul: None,
                accretion_mul: Some(factor),
            }
        };
        out.actions.push(action);
        out.recognized_fragments
            .push(scale_fragment(factor, quantity));
    }

    if bh_plot_re().is_match(text.lower) {
        out.actions.push(ParsedAction::BlackHolePlot);
        out.recognized_fragments
            .push("Plot accretion disk".to_string());
    }

    if start_re().is_match(text.lower) && !has_plot(out) {
        out.actions.push(ParsedAction::BlackHolePlot);
    }
}

fn parse_geometry(text: &Text<'_>, out: &mut ParseResult) {
    let selected = shapes().iter().find(|shape| {
        let id = shape.id.as_str();
        mentions(text.lower, &id.replace('_', " "))
            || mentions(text.lower, id)
            || mentions(text.lower, &shape.title_stem())
    });
    if let Some(shape) = selected {
        out.actions.push(ParsedAction::GeometrySelect { id: shape.id });
        out.recognized_fragments
            .push(format!("Select geometry {}", shape.title));
    }

    if describe_re().is_match(text.lower) {
        out.actions.push(ParsedAction::GeometryDescribe);
        out.recognized_fragments
            .push("Describe geometry".to_string());
    }
}

/// Whether `phrase` occurs in `text` as whole words: `linear` is found in
/// "make it linear" but not in "nonlinear".
fn mentions(text: &str, phrase: &str) -> bool {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    text.match_indices(phrase).any(|(at, _)| {
        let before = text[..at].chars().next_back();
        let after = text[at + phrase.len()..].chars().next();
        !before.is_some_and(is_word) && !after.is_some_and(is_word)
    })
}

/// `V = abc`-style assignments whose value is not a number at all.
fn report_non_numeric(text: &Text<'_>, out: &mut ParseResult) {
    for caps in non_numeric_re().captures_iter(text.normalized) {
        if let (Some(name), Some(bad)) = (caps.name("name"), caps.name("bad")) {
            out.unparsed_issues
                .push(unreadable_issue(name.as_str(), bad.as_str()));
        }
    }
}
