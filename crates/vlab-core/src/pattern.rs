//! Lazily compiled, process-wide regular expressions.

/// Declare a function returning a `&'static Regex` compiled on first use.
///
/// The pattern expression (a literal or a `format!` built from the shared
/// fragments below) is evaluated once; a compile failure is a programming
/// error caught by the first test touching the pattern.
macro_rules! pattern {
    ($(#[$meta:meta])* $vis:vis fn $name:ident() = $re:expr;) => {
        $(#[$meta])*
        $vis fn $name() -> &'static regex::Regex {
            static CELL: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            CELL.get_or_init(|| regex::Regex::new(&$re).expect("static pattern compiles"))
        }
    };
}

/// Signed decimal literal without exponent, as a capture-free fragment.
pub(crate) const NUM: &str = r"[-+]?\d*\.?\d+";

/// Optional assignment connector between a quantity name and its value:
/// `R = 1 kΩ`, `R: 1 kΩ`, `resistance to 1 kΩ`, `mass of 5`, `spin is 0.7`.
/// Captured as `conn` so callers can tell explicit assignments apart.
pub(crate) const CONNECTOR: &str = r"\s*(?P<conn>=|:|\bto\b|\bof\b|\bis\b)?\s*";

/// A literal plus up to two trailing unit-ish tokens, captured as `val`:
/// `1 kΩ`, `2k ohm`, `100 µF and`. An exponent stays attached to the
/// literal (`1e-4 F`) so callers can reject it as a whole.
pub(crate) const VALUE: &str =
    r"(?P<val>[-+]?\d*\.?\d+(?:[eE][-+]?\d*)?(?:\s*[^\s\d,;=:]+){0,2})";

/// Leading `double`/`half` verb of a scale phrase, captured as `op`.
pub(crate) const SCALE: &str = r"\b(?P<op>double|twice|half|halve)\b(?:\s+the)?\s+";

/// Second or millisecond suffix of a duration.
pub(crate) const TIME_UNIT: &str = r"(?P<unit>ms|milliseconds?|millisecs?|s|secs?|seconds?)\b";
