//! Pre-built structure templates, one variant per compass direction.
//!
//! Recomputing ring geometry on every mouse move would be wasteful and
//! drift-prone, so each shape the user can draw (a bond type, a ring size) is
//! generated once into a [`StructureCluster`]: 24 ready template structures,
//! one per preset direction. At interaction time the cluster picks the
//! variant whose direction lies closest to the drag vector, or its default
//! when the drag was too short to mean anything.

#[cfg(test)]
#[path = "templates_test.rs"]
mod templates_test;

use crate::consts::{Consts, Direction, FREQ};
use crate::doc::{Arrow, ArrowType, Atom, AttachedBond, Bond, BondSide, BondType, Member, Structure};
use crate::geometry::{self, Vector};

// ── Descriptors ─────────────────────────────────────────────────

/// Static description of a ring shape, used only to build clusters.
#[derive(Debug, Clone, Copy)]
pub struct RingTemplate {
    pub name: &'static str,
    pub ring_size: usize,
    /// Interior angle between two ring bonds, in degrees.
    pub angle: f64,
    /// Every Nth bond is double, counted from the first.
    pub double_every: Option<usize>,
    /// Aromatic rings suppress the double bonds and draw a circle instead.
    pub aromatic: bool,
}

/// Static description of a plain bond shape.
#[derive(Debug, Clone, Copy)]
pub struct BondTemplate {
    pub name: &'static str,
    pub kind: BondType,
    pub multiplicity: u8,
}

/// Every ring the structure menu offers.
pub const RING_TEMPLATES: [RingTemplate; 10] = [
    RingTemplate { name: "cyclopropane", ring_size: 3, angle: 60.0, double_every: None, aromatic: false },
    RingTemplate { name: "cyclobutane", ring_size: 4, angle: 90.0, double_every: None, aromatic: false },
    RingTemplate { name: "cyclopentane", ring_size: 5, angle: 108.0, double_every: None, aromatic: false },
    RingTemplate { name: "cyclopentadiene", ring_size: 5, angle: 108.0, double_every: Some(2), aromatic: false },
    RingTemplate { name: "cyclohexane", ring_size: 6, angle: 120.0, double_every: None, aromatic: false },
    RingTemplate { name: "benzene", ring_size: 6, angle: 120.0, double_every: Some(2), aromatic: true },
    RingTemplate { name: "benzeneAlt", ring_size: 6, angle: 120.0, double_every: Some(2), aromatic: false },
    RingTemplate { name: "cycloheptane", ring_size: 7, angle: 128.57, double_every: None, aromatic: false },
    RingTemplate { name: "cyclooctane", ring_size: 8, angle: 135.0, double_every: None, aromatic: false },
    RingTemplate { name: "cyclononane", ring_size: 9, angle: 140.0, double_every: None, aromatic: false },
];

/// Every plain bond the structure menu offers.
pub const BOND_TEMPLATES: [BondTemplate; 6] = [
    BondTemplate { name: "single", kind: BondType::Single, multiplicity: 1 },
    BondTemplate { name: "wedge", kind: BondType::Wedge, multiplicity: 1 },
    BondTemplate { name: "dash", kind: BondType::Dash, multiplicity: 1 },
    BondTemplate { name: "undefined", kind: BondType::Undefined, multiplicity: 1 },
    BondTemplate { name: "double", kind: BondType::Double, multiplicity: 2 },
    BondTemplate { name: "triple", kind: BondType::Triple, multiplicity: 3 },
];

// ── Clusters ────────────────────────────────────────────────────

/// A named bundle of template structures, one per compass direction.
#[derive(Debug, Clone)]
pub struct StructureCluster {
    pub name: String,
    pub defs: Vec<Structure>,
    /// 0 for acyclic (plain bond) clusters.
    pub ring_size: usize,
    /// Interior ring angle; 0 for acyclic clusters.
    pub angle: f64,
    /// Bond multiplicity for acyclic clusters.
    pub multiplicity: u8,
    pub double_every: Option<usize>,
    pub aromatic: bool,
}

impl StructureCluster {
    /// Builds the 24-direction cluster for a plain bond template.
    #[must_use]
    pub fn bond(template: &BondTemplate, consts: &Consts) -> Self {
        Self {
            name: template.name.to_owned(),
            defs: generate_bonds(template.kind, template.multiplicity, consts),
            ring_size: 0,
            angle: 0.0,
            multiplicity: template.multiplicity,
            double_every: None,
            aromatic: false,
        }
    }

    /// Builds the 24-direction cluster for a ring template.
    #[must_use]
    pub fn ring(template: &RingTemplate, consts: &Consts) -> Self {
        Self {
            name: template.name.to_owned(),
            defs: generate_rings(template.angle, template.ring_size, template.double_every, template.aromatic, consts),
            ring_size: template.ring_size,
            angle: template.angle,
            multiplicity: 1,
            double_every: template.double_every,
            aromatic: template.aromatic,
        }
    }

    /// Builds the cluster for any template name from either catalog.
    #[must_use]
    pub fn by_name(name: &str, consts: &Consts) -> Option<Self> {
        if let Some(template) = BOND_TEMPLATES.iter().find(|t| t.name == name) {
            return Some(Self::bond(template, consts));
        }
        RING_TEMPLATES
            .iter()
            .find(|t| t.name == name)
            .map(|template| Self::ring(template, consts))
    }

    /// The variant used when the drag carries no direction of its own.
    #[must_use]
    pub fn default_structure(&self) -> &Structure {
        &self.defs[0]
    }

    /// Picks the variant for a `down -> up` drag: the default when the drag
    /// stayed within the atom circle, otherwise the def whose named direction
    /// is closest to the drag vector.
    #[must_use]
    pub fn structure_for_drag(&self, down: Vector, up: Vector, consts: &Consts) -> &Structure {
        if geometry::inside_circle(down, up, consts.circ_r) {
            return self.default_structure();
        }
        let closest = geometry::closest_vector(down, up, consts.bond_vectors());
        self.defs
            .iter()
            .find(|def| match Direction::from_name(&def.name) {
                Some(direction) => geometry::compare_vectors(consts.bond_vector(direction), closest, 5),
                None => false,
            })
            .unwrap_or_else(|| self.default_structure())
    }

    /// The bond type this cluster draws, for acyclic clusters.
    #[must_use]
    pub fn bond_type(&self) -> Option<BondType> {
        let root = self.default_structure().root_atoms().next()?;
        root.bonds.first().map(|bond| bond.kind)
    }
}

/// A bundle of arrow templates, one per compass direction.
#[derive(Debug, Clone)]
pub struct ArrowCluster {
    pub kind: ArrowType,
    pub defs: Vec<Arrow>,
}

impl ArrowCluster {
    /// Builds the cluster for an arrow type in all preset directions.
    #[must_use]
    pub fn new(kind: ArrowType, consts: &Consts) -> Self {
        let north = consts.bond_vector(Direction::N);
        let mut vectors = geometry::possible_vectors(north, FREQ);
        vectors.push(north);
        let defs = vectors.into_iter().map(|v| Arrow::new(kind, v)).collect();
        Self { kind, defs }
    }

    /// Looks an arrow type up by its serialized name.
    #[must_use]
    pub fn by_name(name: &str, consts: &Consts) -> Option<Self> {
        let kind = match name {
            "one-way-arrow" => ArrowType::OneWayArrow,
            "two-way-arrow" => ArrowType::TwoWayArrow,
            "equilibrium-arrow" => ArrowType::EquilibriumArrow,
            _ => return None,
        };
        Some(Self::new(kind, consts))
    }

    /// A fresh arrow for a `down -> up` drag: pointing east when the drag
    /// stayed within the atom circle, otherwise along the closest preset
    /// direction.
    #[must_use]
    pub fn arrow_for_drag(&self, down: Vector, up: Vector, consts: &Consts) -> Arrow {
        if geometry::inside_circle(down, up, consts.circ_r) {
            return Arrow::new(self.kind, consts.bond_east());
        }
        let candidates: Vec<Vector> = self.defs.iter().map(|arrow| arrow.relative_end).collect();
        let vector = geometry::closest_vector(down, up, &candidates);
        Arrow::new(self.kind, vector)
    }
}

// ── Generators ──────────────────────────────────────────────────

/// A single bond of the given type pointing along `vector`, with the far
/// atom's incoming entry already recorded.
#[must_use]
pub fn generate_bond(vector: Vector, kind: BondType, multiplicity: u8) -> Bond {
    let mut atom = Atom::new(vector);
    atom.attach(BondSide::In, AttachedBond { direction: vector, multiplicity });
    Bond::new(kind, atom)
}

/// One 2-atom structure per compass direction: root at the origin, one bond
/// of the given type to a child placed at the direction vector.
#[must_use]
pub fn generate_bonds(kind: BondType, multiplicity: u8, consts: &Consts) -> Vec<Structure> {
    Direction::ALL
        .iter()
        .map(|&direction| {
            let vector = consts.bond_vector(direction);
            let mut root = Atom::new(Vector::zero());
            root.attach(BondSide::Out, AttachedBond { direction: vector, multiplicity });
            root.add_bond(generate_bond(vector, kind, multiplicity));
            let mut structure = Structure::named(direction.name());
            structure.add_member(Member::Atom(root));
            structure
        })
        .collect()
}

/// The closing attachment a ring arm reports back for its first atom.
#[derive(Debug, Clone, Copy)]
pub struct RingClosure {
    /// Direction of the closing bond, pointing at the first atom.
    pub direction: Vector,
    pub multiplicity: u8,
}

/// Extends a ring arm from `atom` until `depth` reaches 1.
///
/// Each step rotates the previous relative vector clockwise by
/// `180 - angle` degrees. With a `double_every` pattern, bond `index` is
/// double when `index % every == 0`, and the closing bond always is; when
/// `aromatic`, those bonds keep the `single` drawn type (the circle
/// decoration stands in for them) while the recorded multiplicity stays 2.
/// The final atom is the orphan marker: it closes the ring onto the first
/// atom and is never rendered. The returned closure must be attached to the
/// first atom's incoming list by the caller.
pub fn extend_ring(
    atom: &mut Atom,
    depth: usize,
    angle: f64,
    double_every: Option<usize>,
    aromatic: bool,
    index: usize,
) -> RingClosure {
    let rot_vect = atom.coords.rotate_cw(180.0 - angle);
    let mut multiplicity = 1;
    let mut kind = BondType::Single;
    if let Some(every) = double_every {
        if index % every == 0 || depth == 1 {
            multiplicity = 2;
            kind = if aromatic { BondType::Single } else { BondType::DoubleLeft };
        }
    }

    atom.attach(BondSide::Out, AttachedBond { direction: rot_vect, multiplicity });
    if depth == 1 {
        atom.orphan = true;
        return RingClosure { direction: atom.coords, multiplicity };
    }

    let mut new_atom = Atom::new(rot_vect);
    new_atom.attach(BondSide::In, AttachedBond { direction: rot_vect, multiplicity });
    atom.add_bond(Bond::new(kind, new_atom));
    let last = atom.bonds.len() - 1;
    extend_ring(&mut atom.bonds[last].atom, depth - 1, angle, double_every, aromatic, index + 1)
}

/// One closed ring per compass direction.
///
/// Each ring structure is named after the *opposite* direction: the first
/// bond leaves the origin along the opposite direction's vector rotated
/// counter-clockwise by half the interior angle, so the ring body grows away
/// from the drag.
#[must_use]
pub fn generate_rings(
    angle: f64,
    ring_size: usize,
    double_every: Option<usize>,
    aromatic: bool,
    consts: &Consts,
) -> Vec<Structure> {
    Direction::ALL
        .iter()
        .map(|&direction| {
            let opposite = direction.opposite();
            let bond = consts.bond_vector(opposite);
            let rot_vect = bond.rotate_ccw(angle / 2.0);

            let mut first = Atom::new(Vector::zero());
            first.attach(BondSide::Out, AttachedBond { direction: rot_vect, multiplicity: 1 });
            let mut next = Atom::new(rot_vect);
            next.attach(BondSide::In, AttachedBond { direction: rot_vect, multiplicity: 1 });
            first.add_bond(Bond::new(BondType::Single, next));
            let closure = extend_ring(&mut first.bonds[0].atom, ring_size, angle, double_every, aromatic, 2);
            first.attach(BondSide::In, AttachedBond { direction: closure.direction, multiplicity: closure.multiplicity });

            let mut structure = Structure::named(opposite.name());
            structure.aromatic = aromatic;
            structure.add_member(Member::Atom(first));
            structure
        })
        .collect()
}
