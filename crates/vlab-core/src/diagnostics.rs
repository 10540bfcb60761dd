//! Diagnostic taxonomy and failure explanation
//!
//! Nothing here is an error: diagnostics travel inside [`ParseResult`] and
//! are turned into operator-facing lines when a command produced no action.

use serde::{Deserialize, Serialize};

use crate::parser::ParseResult;

const TYPO_PREFIX: &str = "possible typo in";
const UNREADABLE_PREFIX: &str = "could not read a value for";

/// Example shown when nothing in a command was understood.
pub const EXAMPLE_COMMAND: &str =
    "set V = 5 V, R = 1 kΩ, C = 100 µF and plot capacitor voltage for 1 s";

/// Kinds of diagnostic a command can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// No action at all was produced
    ParseFailure,
    /// A suspected misspelling; other actions still apply
    UnrecognizedFragment,
    /// A field value could not be read; the field keeps its previous value
    InvalidNumericLiteral,
    /// A value was saturated into its safe envelope (logged, never shown)
    ClampSaturation,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::ParseFailure => "parse_failure",
            DiagnosticKind::UnrecognizedFragment => "unrecognized_fragment",
            DiagnosticKind::InvalidNumericLiteral => "invalid_numeric_literal",
            DiagnosticKind::ClampSaturation => "clamp_saturation",
        }
    }

    /// Kind of an entry in [`ParseResult::unparsed_issues`].
    pub fn of_issue(issue: &str) -> Self {
        if issue.starts_with(UNREADABLE_PREFIX) {
            DiagnosticKind::InvalidNumericLiteral
        } else {
            DiagnosticKind::UnrecognizedFragment
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn typo_issue(miss: &str, fix: &str) -> String {
    format!("{} \"{}\" → \"{}\"", TYPO_PREFIX, miss, fix)
}

pub(crate) fn unreadable_issue(label: &str, fragment: &str) -> String {
    format!("{} {} from \"{}\"", UNREADABLE_PREFIX, label, fragment)
}

/// Whether any part of a failed command was understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Some fields or phrases were recognized, but nothing actionable
    Unactionable,
    /// Nothing was recognized
    NotUnderstood,
}

/// Operator-facing explanation of a command that produced no action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    pub kind: FailureKind,
    pub lines: Vec<String>,
    /// Repaired command text, offered but never applied automatically
    pub suggestion: Option<String>,
}

/// Explain why `result` produced nothing to execute.
pub fn explain_failure(result: &ParseResult) -> FailureReport {
    let mut lines = Vec::new();
    let kind = if result.recognized_fragments.is_empty() {
        lines.push("I couldn't turn that into a simulation step.".to_string());
        lines.push(format!("Try a command like: {}.", EXAMPLE_COMMAND));
        FailureKind::NotUnderstood
    } else {
        lines.push("I think you said:".to_string());
        lines.extend(
            result
                .recognized_fragments
                .iter()
                .map(|fragment| format!("• {}", fragment)),
        );
        match result.unparsed_issues.first() {
            Some(issue) => lines.push(format!("I couldn't understand part of it ({}).", issue)),
            None => lines.push("I couldn't understand the rest of that command.".to_string()),
        }
        FailureKind::Unactionable
    };

    FailureReport {
        kind,
        lines,
        suggestion: result.suggested_repair.clone(),
    }
}
