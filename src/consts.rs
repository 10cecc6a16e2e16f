//! Geometry constants shared by templates, hit-testing, and rendering.
//!
//! Everything visual is proportional to one number: the base bond length.
//! [`Consts::new`] derives the concrete radii, widths, and the 24 compass
//! direction vectors from it once; the host configures the length before any
//! template is generated and the derived values never change afterwards.

#[cfg(test)]
#[path = "consts_test.rs"]
mod consts_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Vector;

// ── Fixed ratios (relative to the bond length) ──────────────────

/// Bond stroke width to bond length. 0.04 corresponds to the ACS settings in
/// ChemDraw.
pub const WIDTH_TO_LENGTH: f64 = 0.04;

/// Angular spacing of the preset directions, in degrees.
pub const FREQ: f64 = 15.0;

/// Inward offset of a drawn bond end that touches a labeled atom.
pub const PUSH: f64 = 0.3;

/// Default angle between two bonds, in degrees.
pub const ANGLE: f64 = 120.0;

/// Maximum number of bonds attachable to one atom.
pub const MAX_BONDS: usize = 10;

/// Half-distance between the two lines of a double bond.
pub const BETWEEN_DBL_BONDS: f64 = 0.065;

/// Half-width of the invisible hit rectangle around a bond.
pub const BOND_FOCUS: f64 = 0.15;

/// Shortening applied to the offset line of 'left'/'right' double bonds.
pub const DBL_BOND_CORR: f64 = 0.05;

/// Control-point offset factor for the wavy 'undefined' bond.
pub const UNDEF_BOND: f64 = 1.5 * BETWEEN_DBL_BONDS;

/// Half-distance between the outer lines of a triple bond.
pub const BETWEEN_TRP_BONDS: f64 = 0.1;

/// Arrowhead half-spread.
pub const ARROW_SIZE: f64 = 0.065;

/// Where along the shaft the arrowhead base sits.
pub const ARROW_START: f64 = 0.85;

/// Aromatic circle radius to bond length.
const AROMATIC_TO_LENGTH: f64 = 0.45;

/// Atom hit-circle radius to bond length.
const CIRC_TO_LENGTH: f64 = 0.17;

/// The default base bond length when the host configures nothing.
pub const DEFAULT_BOND_LENGTH: f64 = 20.0;

// ── Directions ──────────────────────────────────────────────────

/// The 24 preset compass directions, clockwise from north, 15 degrees apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    N,
    Ne1,
    Ne2,
    Ne3,
    Ne4,
    Ne5,
    E,
    Se1,
    Se2,
    Se3,
    Se4,
    Se5,
    S,
    Sw1,
    Sw2,
    Sw3,
    Sw4,
    Sw5,
    W,
    Nw1,
    Nw2,
    Nw3,
    Nw4,
    Nw5,
}

impl Direction {
    /// All directions in clockwise order starting at north.
    pub const ALL: [Self; 24] = [
        Self::N,
        Self::Ne1,
        Self::Ne2,
        Self::Ne3,
        Self::Ne4,
        Self::Ne5,
        Self::E,
        Self::Se1,
        Self::Se2,
        Self::Se3,
        Self::Se4,
        Self::Se5,
        Self::S,
        Self::Sw1,
        Self::Sw2,
        Self::Sw3,
        Self::Sw4,
        Self::Sw5,
        Self::W,
        Self::Nw1,
        Self::Nw2,
        Self::Nw3,
        Self::Nw4,
        Self::Nw5,
    ];

    /// Compass name, e.g. `"NE3"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::Ne1 => "NE1",
            Self::Ne2 => "NE2",
            Self::Ne3 => "NE3",
            Self::Ne4 => "NE4",
            Self::Ne5 => "NE5",
            Self::E => "E",
            Self::Se1 => "SE1",
            Self::Se2 => "SE2",
            Self::Se3 => "SE3",
            Self::Se4 => "SE4",
            Self::Se5 => "SE5",
            Self::S => "S",
            Self::Sw1 => "SW1",
            Self::Sw2 => "SW2",
            Self::Sw3 => "SW3",
            Self::Sw4 => "SW4",
            Self::Sw5 => "SW5",
            Self::W => "W",
            Self::Nw1 => "NW1",
            Self::Nw2 => "NW2",
            Self::Nw3 => "NW3",
            Self::Nw4 => "NW4",
            Self::Nw5 => "NW5",
        }
    }

    /// Position in [`Direction::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|d| *d == self).unwrap_or(0)
    }

    /// The direction pointing the opposite way (half a turn around the dial).
    #[must_use]
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() / 2) % Self::ALL.len()]
    }

    /// Looks a direction up by its compass name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.name() == name)
    }
}

// ── Derived constants ───────────────────────────────────────────

/// Concrete geometry derived once from the configured base bond length.
#[derive(Debug, Clone)]
pub struct Consts {
    /// The base bond length in SVG user units.
    pub bond_length: f64,
    /// Bond stroke width, pre-rounded to two decimals for the style block.
    pub bond_width: f64,
    /// Radius of the hit/hover circle around an atom.
    pub circ_r: f64,
    /// Radius of an aromatic ring circle.
    pub aromatic_r: f64,
    bonds: [Vector; 24],
}

impl Consts {
    /// Derives all constants from `bond_length`.
    #[must_use]
    pub fn new(bond_length: f64) -> Self {
        let mut bonds = [Vector::zero(); 24];
        let mut vector = Vector::new(0.0, -bond_length);
        for slot in &mut bonds {
            *slot = vector;
            vector = vector.rotate_cw(FREQ);
        }
        Self {
            bond_length,
            bond_width: (bond_length * WIDTH_TO_LENGTH * 100.0).round() / 100.0,
            circ_r: bond_length * CIRC_TO_LENGTH,
            aromatic_r: bond_length * AROMATIC_TO_LENGTH,
            bonds,
        }
    }

    /// The bond vector for a compass direction, at full bond length.
    #[must_use]
    pub fn bond_vector(&self, direction: Direction) -> Vector {
        self.bonds[direction.index()]
    }

    /// All 24 bond vectors in clockwise order starting at north.
    #[must_use]
    pub fn bond_vectors(&self) -> &[Vector; 24] {
        &self.bonds
    }

    /// The vector one bond length south, the fallback direction for a bare
    /// atom.
    #[must_use]
    pub fn bond_south(&self) -> Vector {
        self.bond_vector(Direction::S)
    }

    /// The vector one bond length east, the default arrow direction.
    #[must_use]
    pub fn bond_east(&self) -> Vector {
        self.bond_vector(Direction::E)
    }
}

impl Default for Consts {
    fn default() -> Self {
        Self::new(DEFAULT_BOND_LENGTH)
    }
}
