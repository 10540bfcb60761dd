//! Simulator domain identifiers

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::VlabError;

/// One of the five independent simulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainId {
    /// RC charging circuit
    #[serde(rename = "rc")]
    Rc,
    /// Strong-acid/strong-base titration
    #[serde(rename = "titr")]
    Titration,
    /// Ohm's-law I–V sweep
    #[serde(rename = "ohm")]
    Ohm,
    /// VSEPR molecular geometry
    #[serde(rename = "vsepr")]
    Geometry,
    /// Accretion-disk profile around a black hole
    #[serde(rename = "bh")]
    BlackHole,
}

impl DomainId {
    pub const ALL: [DomainId; 5] = [
        DomainId::Rc,
        DomainId::Titration,
        DomainId::Ohm,
        DomainId::Geometry,
        DomainId::BlackHole,
    ];

    /// Stable short identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainId::Rc => "rc",
            DomainId::Titration => "titr",
            DomainId::Ohm => "ohm",
            DomainId::Geometry => "vsepr",
            DomainId::BlackHole => "bh",
        }
    }

    /// Human-readable lab name
    pub fn label(&self) -> &'static str {
        match self {
            DomainId::Rc => "RC circuit",
            DomainId::Titration => "Acid-base titration",
            DomainId::Ohm => "Ohm's law",
            DomainId::Geometry => "VSEPR geometry",
            DomainId::BlackHole => "Black hole accretion",
        }
    }
}

impl std::fmt::Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DomainId {
    type Err = VlabError;

    /// Accepts the short id or a few long spellings, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rc" => Ok(DomainId::Rc),
            "titr" | "titration" => Ok(DomainId::Titration),
            "ohm" | "ohms" => Ok(DomainId::Ohm),
            "vsepr" | "geometry" => Ok(DomainId::Geometry),
            "bh" | "blackhole" | "black_hole" => Ok(DomainId::BlackHole),
            _ => Err(VlabError::UnknownDomain {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_short_ids() {
        for domain in DomainId::ALL {
            assert_eq!(domain.as_str().parse::<DomainId>().unwrap(), domain);
        }
    }

    #[test]
    fn test_long_spellings() {
        assert_eq!("Titration".parse::<DomainId>().unwrap(), DomainId::Titration);
        assert_eq!("black_hole".parse::<DomainId>().unwrap(), DomainId::BlackHole);
    }

    #[test]
    fn test_unknown_domain_is_error() {
        let err = "optics".parse::<DomainId>().unwrap_err();
        assert_eq!(
            err,
            VlabError::UnknownDomain {
                value: "optics".to_string()
            }
        );
    }

    #[test]
    fn test_serde_uses_short_ids() {
        let json = serde_json::to_string(&DomainId::BlackHole).unwrap();
        assert_eq!(json, "\"bh\"");
    }
}
