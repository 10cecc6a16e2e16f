//! Hit-testing: mapping a mouse coordinate back onto the document.
//!
//! All three lookups walk the member list depth-first, accumulating absolute
//! positions by summing relative offsets along the path, and return id-based
//! hit records the mutation engine can resolve later — never references into
//! the structure, so a hit survives the deep-copy that every gesture starts
//! with.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{BOND_FOCUS, Consts};
use crate::doc::{Arrow, ArrowId, Atom, AtomId, Member, Structure};
use crate::geometry::{self, Vector};

/// An atom found under the cursor.
#[derive(Debug, Clone, Copy)]
pub struct AtomHit {
    pub atom: AtomId,
    /// Absolute position of the hit atom.
    pub abs_pos: Vector,
    /// The atom owning the bond that leads here; `None` for roots.
    pub prev: Option<AtomId>,
    /// Root atom of the subtree the hit atom belongs to.
    pub root: AtomId,
    /// A second atom occupies the same point (ring closures legitimately
    /// place two atoms on one vertex).
    pub has_duplicate: bool,
}

/// A bond found under the cursor.
#[derive(Debug, Clone, Copy)]
pub struct BondHit {
    pub start_atom: AtomId,
    pub end_atom: AtomId,
    /// Absolute position of the bond's far atom.
    pub end_abs_pos: Vector,
}

/// Which part of an arrow was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowPart {
    Start,
    End,
    Middle,
}

/// An arrow found under the cursor.
#[derive(Debug, Clone, Copy)]
pub struct ArrowHit {
    pub arrow: ArrowId,
    /// Absolute position of the arrow's start.
    pub start_abs_pos: Vector,
    pub part: ArrowPart,
}

/// Finds the first atom whose hit circle contains `position`.
///
/// The walk deliberately continues after the first match: a second atom on
/// the same point sets `has_duplicate`, which deletion needs to clean up
/// ring-closure twins.
#[must_use]
pub fn atom_at(structure: &Structure, position: Vector, consts: &Consts) -> Option<AtomHit> {
    struct Search {
        position: Vector,
        circ_r: f64,
        root: AtomId,
        found: Option<AtomHit>,
    }

    impl Search {
        fn check(&mut self, atom: &Atom, parent_pos: Vector, prev: Option<AtomId>) {
            let abs_pos = parent_pos.add(atom.coords);
            if geometry::inside_circle(abs_pos, self.position, self.circ_r) {
                match &mut self.found {
                    Some(hit) => hit.has_duplicate = true,
                    None => {
                        self.found = Some(AtomHit {
                            atom: atom.id,
                            abs_pos,
                            prev,
                            root: self.root,
                            has_duplicate: false,
                        });
                    }
                }
            }
            for bond in &atom.bonds {
                self.check(&bond.atom, abs_pos, Some(atom.id));
            }
        }
    }

    let mut search = Search {
        position,
        circ_r: consts.circ_r,
        root: AtomId::nil(),
        found: None,
    };
    for atom in structure.root_atoms() {
        search.root = atom.id;
        // Re-walk even after a match: later atoms may flag a duplicate.
        search.check(atom, structure.origin, None);
    }
    search.found
}

/// Finds the first bond whose focus rectangle contains `position`.
#[must_use]
pub fn bond_at(structure: &Structure, position: Vector, consts: &Consts) -> Option<BondHit> {
    fn check_bonds(atom: &Atom, pos: Vector, position: Vector, consts: &Consts) -> Option<BondHit> {
        for bond in &atom.bonds {
            let end_abs_pos = pos.add(bond.atom.coords);
            if geometry::inside_focus(pos, bond.atom.coords, position, BOND_FOCUS, consts.bond_length) {
                return Some(BondHit {
                    start_atom: atom.id,
                    end_atom: bond.atom.id,
                    end_abs_pos,
                });
            }
            if let Some(hit) = check_bonds(&bond.atom, end_abs_pos, position, consts) {
                return Some(hit);
            }
        }
        None
    }

    for atom in structure.root_atoms() {
        let abs_pos = structure.origin.add(atom.coords);
        if let Some(hit) = check_bonds(atom, abs_pos, position, consts) {
            return Some(hit);
        }
    }
    None
}

/// Finds the first arrow under `position`, distinguishing the start handle,
/// the end handle, and the shaft for the resize affordance.
#[must_use]
pub fn arrow_at(structure: &Structure, position: Vector, consts: &Consts) -> Option<ArrowHit> {
    for member in &structure.members {
        let Member::Arrow(arrow) = member else { continue };
        if let Some(hit) = check_arrow(arrow, structure.origin, position, consts) {
            return Some(hit);
        }
    }
    None
}

fn check_arrow(arrow: &Arrow, origin: Vector, position: Vector, consts: &Consts) -> Option<ArrowHit> {
    let start_abs_pos = origin.add(arrow.origin);
    let end_abs_pos = start_abs_pos.add(arrow.relative_end);
    let part = if geometry::inside_circle(start_abs_pos, position, consts.circ_r) {
        ArrowPart::Start
    } else if geometry::inside_circle(end_abs_pos, position, consts.circ_r) {
        ArrowPart::End
    } else if geometry::inside_focus(start_abs_pos, arrow.relative_end, position, BOND_FOCUS, consts.bond_length) {
        ArrowPart::Middle
    } else {
        return None;
    };
    Some(ArrowHit { arrow: arrow.id, start_abs_pos, part })
}
