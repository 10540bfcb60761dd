//! Unit-aware numeric extraction
//!
//! Each family recognizes a decimal literal, an optional metric prefix and
//! the unit symbol, and returns the value in the family's base unit (V, Ω,
//! F, mol/L, mL). Prefix sets differ per family on purpose: ohms never read
//! a lowercase `m` as milli (it would collide with `M` = mega), farads never
//! read `M` at all.

use serde::{Deserialize, Serialize};

use crate::pattern::NUM;

/// Unit family expected for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitFamily {
    Volts,
    Ohms,
    Farads,
    Molar,
    Milliliters,
}

impl UnitFamily {
    pub const ALL: [UnitFamily; 5] = [
        UnitFamily::Volts,
        UnitFamily::Ohms,
        UnitFamily::Farads,
        UnitFamily::Molar,
        UnitFamily::Milliliters,
    ];

    /// Extract the first `<number>[prefix]<unit>` in `text`.
    pub fn parse(&self, text: &str) -> Option<f64> {
        match self {
            UnitFamily::Volts => parse_volts(text),
            UnitFamily::Ohms => parse_ohms(text),
            UnitFamily::Farads => parse_farads(text),
            UnitFamily::Molar => parse_molar(text),
            UnitFamily::Milliliters => parse_milliliters(text),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnitFamily::Volts => "V",
            UnitFamily::Ohms => "Ω",
            UnitFamily::Farads => "F",
            UnitFamily::Molar => "M",
            UnitFamily::Milliliters => "mL",
        }
    }
}

pattern! { fn volts_re() = format!(r"(?i)({NUM})\s*(?:volts?|v)\b"); }
pattern! { fn ohm_word_re() = r"(?i)ohms?"; }
pattern! { fn ohms_re() = format!(r"({NUM})\s*(n|u|µ|μ|k|K|M)?\s*Ω"); }
pattern! { fn micro_word_re() = r"(?i)micro"; }
pattern! { fn farads_re() = format!(r"({NUM})\s*(n|u|µ|μ|m)?\s*(?:[Ff]arads?|F|f)\b"); }
pattern! { fn molar_re() = format!(r"(?i)({NUM})\s*(?:mol/l|molar|m)\b"); }
pattern! { fn milliliters_re() = format!(r"(?i)({NUM})\s*(milli-?lit(?:er|re)s?|ml|lit(?:er|re)s?|l)\b"); }
pattern! { fn leading_float_re() = format!(r"^\s*({NUM})"); }
pattern! { fn exponent_head_re() = r"\d\.?[eE][-+]?$"; }
pattern! { fn exponent_tail_re() = format!(r"^\s*{NUM}[eE][-+]?\d"); }

fn prefix_multiplier(prefix: &str) -> f64 {
    match prefix {
        "n" => 1e-9,
        "u" | "µ" | "μ" => 1e-6,
        "m" => 1e-3,
        "k" | "K" => 1e3,
        "M" => 1e6,
        _ => 1.0,
    }
}

/// The captured literal, unless it belongs to a number in scientific
/// notation within `text`.
fn literal(text: &str, caps: &regex::Captures<'_>) -> Option<f64> {
    let m = caps.get(1)?;
    if scientific_at(text, m.start()) {
        return None;
    }
    m.as_str().parse::<f64>().ok()
}

/// `5 V`, `5V`, `12 volts`
pub fn parse_volts(text: &str) -> Option<f64> {
    let caps = volts_re().captures(text)?;
    literal(text, &caps)
}

/// `2 kΩ`, `1 MΩ`, `470 ohms`, `2k ohm`. A lowercase `m` is not a prefix,
/// so `1 mΩ` does not match.
pub fn parse_ohms(text: &str) -> Option<f64> {
    let normalized = ohm_word_re().replace_all(text, "Ω").replace('\u{2126}', "Ω");
    let caps = ohms_re().captures(&normalized)?;
    let value = literal(&normalized, &caps)?;
    let prefix = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    Some(value * prefix_multiplier(prefix))
}

/// `100 µF`, `100 uF`, `10 nF`, `2.2 mF`, `47 microfarads`. Uppercase `M`
/// is not a prefix.
pub fn parse_farads(text: &str) -> Option<f64> {
    let normalized = micro_word_re().replace_all(text, "µ");
    let caps = farads_re().captures(&normalized)?;
    let value = literal(&normalized, &caps)?;
    let prefix = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    Some(value * prefix_multiplier(prefix))
}

/// `0.1 M`, `0.1 mol/L`, `0.05 molar`
pub fn parse_molar(text: &str) -> Option<f64> {
    let caps = molar_re().captures(text)?;
    literal(text, &caps)
}

/// `25 mL`, `25 milliliters`, `0.5 L` (returned as mL)
pub fn parse_milliliters(text: &str) -> Option<f64> {
    let caps = milliliters_re().captures(text)?;
    let value = literal(text, &caps)?;
    let unit = caps.get(2).map(|m| m.as_str().to_ascii_lowercase())?;
    if unit.starts_with("ml") || unit.starts_with("milli") {
        Some(value)
    } else {
        Some(value * 1000.0)
    }
}

/// Leading decimal literal of a fragment, ignoring anything after it.
pub fn parse_bare_float(text: &str) -> Option<f64> {
    let caps = leading_float_re().captures(text)?;
    literal(text, &caps)
}

/// Whether the literal at byte `start` of `text` is written in, or is the
/// tail of, scientific notation (`1e-4`, `2.5E3`). Such literals are not
/// read at all: the unit patterns would otherwise pick up only the
/// mantissa or only the exponent.
pub fn scientific_at(text: &str, start: usize) -> bool {
    let (head, tail) = text.split_at(start.min(text.len()));
    exponent_head_re().is_match(head) || exponent_tail_re().is_match(tail)
}

/// Unit-aware parse with the bare-number fallback.
///
/// Returns `None` when neither succeeds; the caller then leaves the field
/// unchanged.
pub fn parse_field(text: &str, family: UnitFamily) -> Option<f64> {
    family.parse(text).or_else(|| parse_bare_float(text))
}

/// `1.000 kΩ`, `2.200 MΩ`, `470 Ω`
pub fn format_ohms(r: f64) -> String {
    if r >= 1e6 {
        format!("{:.3} MΩ", r / 1e6)
    } else if r >= 1e3 {
        format!("{:.3} kΩ", r / 1e3)
    } else {
        format!("{:.0} Ω", r)
    }
}

/// `2.20 mF`, `100.0 µF`, `10.0 nF`
pub fn format_farads(c: f64) -> String {
    if c >= 1e-3 {
        format!("{:.2} mF", c * 1e3)
    } else if c >= 1e-6 {
        format!("{:.1} µF", c * 1e6)
    } else if c >= 1e-9 {
        format!("{:.1} nF", c * 1e9)
    } else {
        format!("{:.2e} F", c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * b.abs().max(1.0)
    }

    #[test]
    fn test_ohm_prefixes() {
        assert_eq!(parse_ohms("2 kΩ"), Some(2000.0));
        assert_eq!(parse_ohms("1 MΩ"), Some(1e6));
        assert_eq!(parse_ohms("470 ohms"), Some(470.0));
        assert_eq!(parse_ohms("2k ohm"), Some(2000.0));
        assert_eq!(parse_ohms("3 KOhm"), Some(3000.0));
        assert_eq!(parse_ohms("10 \u{2126}"), Some(10.0));
    }

    #[test]
    fn test_ohms_reject_lowercase_milli() {
        assert_eq!(parse_ohms("1 mΩ"), None);
        // falls through to the bare-number parse
        assert_eq!(parse_field("1 mΩ", UnitFamily::Ohms), Some(1.0));
    }

    #[test]
    fn test_farad_prefixes() {
        assert!(close(parse_farads("100 µF").unwrap(), 1e-4));
        assert!(close(parse_farads("100 uF").unwrap(), 1e-4));
        assert!(close(parse_farads("100 μF").unwrap(), 1e-4));
        assert!(close(parse_farads("10nF").unwrap(), 1e-8));
        assert!(close(parse_farads("2.2 mF").unwrap(), 2.2e-3));
        assert!(close(parse_farads("47 microfarads").unwrap(), 47e-6));
        assert_eq!(parse_farads("1 F"), Some(1.0));
    }

    #[test]
    fn test_farads_ignore_mega() {
        assert_eq!(parse_farads("1 MF"), None);
    }

    #[test]
    fn test_volts() {
        assert_eq!(parse_volts("V = 5 V"), Some(5.0));
        assert_eq!(parse_volts("12volts"), Some(12.0));
        assert_eq!(parse_volts("no voltage here"), None);
    }

    #[test]
    fn test_molar_and_milliliters() {
        assert_eq!(parse_molar("0.1 M"), Some(0.1));
        assert_eq!(parse_molar("0.2 mol/L"), Some(0.2));
        assert_eq!(parse_molar("25 mL"), None);
        assert_eq!(parse_milliliters("25 mL"), Some(25.0));
        assert_eq!(parse_milliliters("0.5 L"), Some(500.0));
    }

    #[test]
    fn test_no_match_and_bare_fallback() {
        assert_eq!(parse_ohms("resistance"), None);
        assert_eq!(parse_field("abc", UnitFamily::Volts), None);
        assert_eq!(parse_field("7.5 whatever", UnitFamily::Volts), Some(7.5));
        assert_eq!(parse_bare_float("  .5"), Some(0.5));
    }

    #[test]
    fn test_family_dispatch() {
        assert_eq!(UnitFamily::Ohms.parse("2 kΩ"), Some(2000.0));
        assert_eq!(UnitFamily::Milliliters.symbol(), "mL");
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_ohms(1000.0), "1.000 kΩ");
        assert_eq!(format_ohms(2.2e6), "2.200 MΩ");
        assert_eq!(format_ohms(470.0), "470 Ω");
        assert_eq!(format_farads(100e-6), "100.0 µF");
        assert_eq!(format_farads(2.2e-3), "2.20 mF");
        assert_eq!(format_farads(10e-9), "10.0 nF");
    }
}
