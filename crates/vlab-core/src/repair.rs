//! Typo detection and command repair
//!
//! Both work from one fixed dictionary of common misspellings. Detection is
//! reported alongside any parse; repair is only offered when nothing parsed
//! and is never applied automatically.

use std::sync::OnceLock;

use regex::Regex;

use crate::diagnostics::typo_issue;

/// `(misspelling, correction)` pairs, scanned in this order.
pub const TYPO_HINTS: &[(&str, &str)] = &[
    ("curent", "current"),
    ("volatge", "voltage"),
    ("resistence", "resistance"),
    ("capitance", "capacitance"),
    ("capacitence", "capacitance"),
    ("milisecond", "millisecond"),
];

pattern! { fn seconds_word_re() = r"(?i)\b(?:seconds?|secs?)\b"; }
pattern! { fn ascii_micro_farad_re() = r"(?P<pre>^|[\d\s])u[fF]\b"; }
pattern! { fn whitespace_re() = r"\s+"; }

fn typo_res() -> &'static [(Regex, &'static str)] {
    static CELL: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    CELL.get_or_init(|| {
        TYPO_HINTS
            .iter()
            .map(|(miss, fix)| {
                let re = Regex::new(&format!("(?i){}", regex::escape(miss)))
                    .expect("static pattern compiles");
                (re, *fix)
            })
            .collect()
    })
}

/// Issue lines for every dictionary misspelling found in `lower`.
pub fn scan_typos(lower: &str) -> Vec<String> {
    TYPO_HINTS
        .iter()
        .filter(|(miss, _)| lower.contains(miss))
        .map(|(miss, fix)| typo_issue(miss, fix))
        .collect()
}

/// Suggested rewrite of `text`, or `None` when the rewrite changes nothing.
///
/// Applies the dictionary corrections, shortens second spellings to `s`,
/// turns ASCII `uF` into `µF` and collapses whitespace.
pub fn repair_command(text: &str) -> Option<String> {
    let mut next = text.to_string();
    for (re, fix) in typo_res() {
        next = re.replace_all(&next, *fix).into_owned();
    }
    next = seconds_word_re().replace_all(&next, "s").into_owned();
    next = ascii_micro_farad_re()
        .replace_all(&next, "${pre}µF")
        .into_owned();
    next = whitespace_re().replace_all(&next, " ").into_owned();

    let next = next.trim();
    if next == text.trim() {
        None
    } else {
        Some(next.to_string())
    }
}
