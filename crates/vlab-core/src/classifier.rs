//! Domain inference from command vocabulary
//!
//! Predicates are checked in a fixed priority order and the first match
//! wins, so "acid" beats "resistance" even when both appear.

use regex::Regex;

use crate::domain::DomainId;

pattern! { fn titration_re() = r"(?i)titr|acid|\bph\b|equivalence|neutrali[sz]"; }
pattern! {
    fn geometry_re() =
        r"(?i)vsepr|geometry|hybrid|bond angle|molecul|tetrahedral|octahedral|trigonal|bipyramidal";
}
pattern! {
    fn black_hole_re() =
        r"(?i)black hole|event horizon|accretion|\bdisk\b|relativity|\bisco\b|\bkerr\b|schwarzschild";
}
pattern! { fn ohm_re() = r"(?i)\bohm(?:'s|’s|s)?\s+law\b|\bi[-\s]?v\b"; }
pattern! {
    fn rc_re() = r"(?i)\brc\b|resistor|resistance|capacitor|capacitance|voltage|current";
}
pattern! { fn create_re() = r"(?i)\bcreate\b"; }

/// Ordered `(domain, predicate)` pairs, highest priority first.
fn predicates() -> [(DomainId, &'static Regex); 5] {
    [
        (DomainId::Titration, titration_re()),
        (DomainId::Geometry, geometry_re()),
        (DomainId::BlackHole, black_hole_re()),
        (DomainId::Ohm, ohm_re()),
        (DomainId::Rc, rc_re()),
    ]
}

/// Outcome of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Domain the command addresses, if any vocabulary matched
    pub inferred: Option<DomainId>,
    /// `inferred` is set and differs from the active domain
    pub switch_required: bool,
}

impl Classification {
    /// Domain the command's rule set should run against.
    pub fn effective(&self, active: DomainId) -> DomainId {
        self.inferred.unwrap_or(active)
    }
}

/// Decide which domain `text` addresses.
///
/// A bare `create` with no domain vocabulary is a weak hint toward the
/// active domain and never requires a switch.
pub fn classify(text: &str, active: DomainId) -> Classification {
    let inferred = predicates()
        .into_iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(domain, _)| domain)
        .or_else(|| create_re().is_match(text).then_some(active));

    Classification {
        inferred,
        switch_required: inferred.is_some_and(|d| d != active),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titration_beats_resistor_vocabulary() {
        let c = classify("titrate the acid through a resistor", DomainId::Rc);
        assert_eq!(c.inferred, Some(DomainId::Titration));
        assert!(c.switch_required);
    }

    #[test]
    fn test_geometry_beats_black_hole() {
        let c = classify("tetrahedral molecule near a black hole", DomainId::Rc);
        assert_eq!(c.inferred, Some(DomainId::Geometry));
    }

    #[test]
    fn test_ohms_law_vocabulary() {
        assert_eq!(
            classify("plot the i-v curve", DomainId::Rc).inferred,
            Some(DomainId::Ohm)
        );
        assert_eq!(
            classify("ohm's law sweep", DomainId::Rc).inferred,
            Some(DomainId::Ohm)
        );
    }

    #[test]
    fn test_bare_ohm_unit_is_not_ohm_domain() {
        let c = classify("set r = 2 kohm", DomainId::Rc);
        assert_eq!(c.inferred, None);
        assert!(!c.switch_required);
    }

    #[test]
    fn test_graph_does_not_mean_ph() {
        let c = classify("graph it", DomainId::Ohm);
        assert_eq!(c.inferred, None);
    }

    #[test]
    fn test_same_domain_needs_no_switch() {
        let c = classify("plot capacitor voltage", DomainId::Rc);
        assert_eq!(c.inferred, Some(DomainId::Rc));
        assert!(!c.switch_required);
    }

    #[test]
    fn test_create_is_weak_hint_for_active_domain() {
        let c = classify("create something", DomainId::BlackHole);
        assert_eq!(c.inferred, Some(DomainId::BlackHole));
        assert!(!c.switch_required);
        assert_eq!(c.effective(DomainId::BlackHole), DomainId::BlackHole);
    }

    #[test]
    fn test_no_vocabulary_defers_to_active() {
        let c = classify("go", DomainId::Geometry);
        assert_eq!(c.inferred, None);
        assert_eq!(c.effective(DomainId::Geometry), DomainId::Geometry);
    }
}
