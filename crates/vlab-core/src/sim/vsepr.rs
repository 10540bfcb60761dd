//! VSEPR molecular geometry table
//!
//! Pure lookup: each shape carries its title, hybridization, ideal bond
//! angle and ligand positions around a central atom at the origin.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::SampledSeries;
use crate::errors::VlabError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeId {
    Linear,
    TrigonalPlanar,
    #[default]
    Tetrahedral,
    TrigonalBipyramidal,
    Octahedral,
}

impl ShapeId {
    pub const ALL: [ShapeId; 5] = [
        ShapeId::Linear,
        ShapeId::TrigonalPlanar,
        ShapeId::Tetrahedral,
        ShapeId::TrigonalBipyramidal,
        ShapeId::Octahedral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeId::Linear => "linear",
            ShapeId::TrigonalPlanar => "trigonal_planar",
            ShapeId::Tetrahedral => "tetrahedral",
            ShapeId::TrigonalBipyramidal => "trigonal_bipyramidal",
            ShapeId::Octahedral => "octahedral",
        }
    }

    pub fn shape(&self) -> &'static Shape {
        match self {
            ShapeId::Linear => &SHAPES[0],
            ShapeId::TrigonalPlanar => &SHAPES[1],
            ShapeId::Tetrahedral => &SHAPES[2],
            ShapeId::TrigonalBipyramidal => &SHAPES[3],
            ShapeId::Octahedral => &SHAPES[4],
        }
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeId {
    type Err = VlabError;

    /// Accepts `trigonal_planar`, `trigonal planar` or `trigonal-planar`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        ShapeId::ALL
            .into_iter()
            .find(|id| id.as_str() == key)
            .ok_or_else(|| VlabError::UnknownShape {
                value: s.to_string(),
            })
    }
}

/// One ligand position relative to the central atom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ligand {
    pub id: &'static str,
    pub xyz: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    pub id: ShapeId,
    pub title: &'static str,
    pub electron_pairs: u8,
    pub lone_pairs: u8,
    pub hybridization: &'static str,
    /// Ideal bond angle in degrees
    pub bond_angle: f64,
    pub ligands: &'static [Ligand],
    pub description: &'static str,
}

impl Shape {
    /// Lowercased title without the `(AXn)` suffix, e.g. `trigonal planar`.
    pub fn title_stem(&self) -> String {
        self.title
            .split('(')
            .next()
            .unwrap_or(self.title)
            .trim()
            .to_lowercase()
    }

    /// Flat two-point series at the ideal bond angle.
    pub fn bond_angle_series(&self) -> SampledSeries {
        SampledSeries {
            x_values: vec![0.0, 1.0],
            y_values: vec![self.bond_angle, self.bond_angle],
            label: format!("Bond angle ≈ {}°", self.bond_angle),
        }
    }
}

/// Full table, in `ShapeId::ALL` order.
pub fn shapes() -> &'static [Shape] {
    &SHAPES
}

const R: f64 = 2.0;
// R·sin(120°)
const R_SIN_120: f64 = 1.732_050_807_568_877_2;

static SHAPES: [Shape; 5] = [
    Shape {
        id: ShapeId::Linear,
        title: "Linear (AX₂)",
        electron_pairs: 2,
        lone_pairs: 0,
        hybridization: "sp",
        bond_angle: 180.0,
        ligands: &[
            Ligand { id: "A1", xyz: [-R, 0.0, 0.0] },
            Ligand { id: "A2", xyz: [R, 0.0, 0.0] },
        ],
        description: "Two electron groups. Example: CO₂.",
    },
    Shape {
        id: ShapeId::TrigonalPlanar,
        title: "Trigonal planar (AX₃)",
        electron_pairs: 3,
        lone_pairs: 0,
        hybridization: "sp²",
        bond_angle: 120.0,
        ligands: &[
            Ligand { id: "A1", xyz: [R, 0.0, 0.0] },
            Ligand { id: "A2", xyz: [-R / 2.0, R_SIN_120, 0.0] },
            Ligand { id: "A3", xyz: [-R / 2.0, -R_SIN_120, 0.0] },
        ],
        description: "Three electron groups in one plane. Example: BF₃.",
    },
    Shape {
        id: ShapeId::Tetrahedral,
        title: "Tetrahedral (AX₄)",
        electron_pairs: 4,
        lone_pairs: 0,
        hybridization: "sp³",
        bond_angle: 109.5,
        ligands: &[
            Ligand { id: "A1", xyz: [R, 0.0, 0.0] },
            Ligand { id: "A2", xyz: [-R / 3.0, R * 0.94, 0.0] },
            Ligand { id: "A3", xyz: [-R / 3.0, -R * 0.47, R * 0.82] },
            Ligand { id: "A4", xyz: [-R / 3.0, -R * 0.47, -R * 0.82] },
        ],
        description: "Four bonding pairs. Example: CH₄.",
    },
    Shape {
        id: ShapeId::TrigonalBipyramidal,
        title: "Trigonal bipyramidal (AX₅)",
        electron_pairs: 5,
        lone_pairs: 0,
        hybridization: "sp³d",
        bond_angle: 120.0,
        ligands: &[
            Ligand { id: "A1", xyz: [0.0, 0.0, R * 1.2] },
            Ligand { id: "A2", xyz: [0.0, 0.0, -R * 1.2] },
            Ligand { id: "A3", xyz: [R, 0.0, 0.0] },
            Ligand { id: "A4", xyz: [-R / 2.0, R_SIN_120, 0.0] },
            Ligand { id: "A5", xyz: [-R / 2.0, -R_SIN_120, 0.0] },
        ],
        description: "Five electron groups with axial and equatorial positions. Example: PCl₅.",
    },
    Shape {
        id: ShapeId::Octahedral,
        title: "Octahedral (AX₆)",
        electron_pairs: 6,
        lone_pairs: 0,
        hybridization: "sp³d²",
        bond_angle: 90.0,
        ligands: &[
            Ligand { id: "A1", xyz: [R, 0.0, 0.0] },
            Ligand { id: "A2", xyz: [-R, 0.0, 0.0] },
            Ligand { id: "A3", xyz: [0.0, R, 0.0] },
            Ligand { id: "A4", xyz: [0.0, -R, 0.0] },
            Ligand { id: "A5", xyz: [0.0, 0.0, R] },
            Ligand { id: "A6", xyz: [0.0, 0.0, -R] },
        ],
        description: "Six bonding pairs around the central atom. Example: SF₆.",
    },
];
