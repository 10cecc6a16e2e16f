#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

use crate::doc::{ArrowType, AttachedBond, Bond, BondSide, BondType};
use crate::geometry::compare_vectors;

fn v(x: f64, y: f64) -> Vector {
    Vector::new(x, y)
}

fn consts() -> Consts {
    Consts::default()
}

/// A root atom at (100, 100) with one single bond east to a child.
fn two_atom_structure() -> (Structure, crate::doc::AtomId, crate::doc::AtomId) {
    let mut root = Atom::new(v(100.0, 100.0));
    root.attach(BondSide::Out, AttachedBond { direction: v(20.0, 0.0), multiplicity: 1 });
    let mut child = Atom::new(v(20.0, 0.0));
    child.attach(BondSide::In, AttachedBond { direction: v(20.0, 0.0), multiplicity: 1 });
    let root_id = root.id;
    let child_id = child.id;
    root.add_bond(Bond::new(BondType::Single, child));
    let mut structure = Structure::new();
    structure.add_member(Member::Atom(root));
    (structure, root_id, child_id)
}

// =============================================================
// atom_at
// =============================================================

#[test]
fn finds_a_root_atom_under_the_cursor() {
    let (structure, root_id, _) = two_atom_structure();
    let hit = atom_at(&structure, v(100.0, 100.0), &consts()).expect("hit");
    assert_eq!(hit.atom, root_id);
    assert_eq!(hit.root, root_id);
    assert!(hit.prev.is_none());
    assert!(!hit.has_duplicate);
    assert!(compare_vectors(hit.abs_pos, v(100.0, 100.0), 5));
}

#[test]
fn finds_a_child_atom_with_its_predecessor() {
    let (structure, root_id, child_id) = two_atom_structure();
    let hit = atom_at(&structure, v(120.0, 100.0), &consts()).expect("hit");
    assert_eq!(hit.atom, child_id);
    assert_eq!(hit.prev, Some(root_id));
    assert_eq!(hit.root, root_id);
    assert!(compare_vectors(hit.abs_pos, v(120.0, 100.0), 5));
}

#[test]
fn tolerates_clicks_within_the_atom_circle() {
    let (structure, root_id, _) = two_atom_structure();
    // CIRC_R is 3.4 at the default bond length.
    let hit = atom_at(&structure, v(102.0, 101.0), &consts()).expect("hit");
    assert_eq!(hit.atom, root_id);
    assert!(atom_at(&structure, v(105.0, 104.0), &consts()).is_none());
}

#[test]
fn misses_empty_space() {
    let (structure, _, _) = two_atom_structure();
    assert!(atom_at(&structure, v(300.0, 300.0), &consts()).is_none());
}

#[test]
fn flags_coincident_atoms_as_duplicates() {
    let (mut structure, _, child_id) = two_atom_structure();
    // A second root sitting exactly on the child's absolute position.
    structure.add_member(Member::Atom(Atom::new(v(120.0, 100.0))));
    let hit = atom_at(&structure, v(120.0, 100.0), &consts()).expect("hit");
    assert_eq!(hit.atom, child_id);
    assert!(hit.has_duplicate);
}

#[test]
fn accounts_for_the_structure_origin() {
    let (mut structure, root_id, _) = two_atom_structure();
    structure.origin = v(-50.0, 10.0);
    let hit = atom_at(&structure, v(50.0, 110.0), &consts()).expect("hit");
    assert_eq!(hit.atom, root_id);
}

// =============================================================
// bond_at
// =============================================================

#[test]
fn finds_a_bond_by_its_focus_rectangle() {
    let (structure, root_id, child_id) = two_atom_structure();
    let hit = bond_at(&structure, v(110.0, 100.0), &consts()).expect("hit");
    assert_eq!(hit.start_atom, root_id);
    assert_eq!(hit.end_atom, child_id);
    assert!(compare_vectors(hit.end_abs_pos, v(120.0, 100.0), 5));
}

#[test]
fn bond_focus_has_limited_width() {
    let (structure, _, _) = two_atom_structure();
    // Half-width is BOND_FOCUS * bond length = 3.
    assert!(bond_at(&structure, v(110.0, 102.5), &consts()).is_some());
    assert!(bond_at(&structure, v(110.0, 104.0), &consts()).is_none());
}

#[test]
fn bond_search_recurses_into_the_tree() {
    let (mut structure, _, child_id) = two_atom_structure();
    let mut grandchild = Atom::new(v(0.0, 20.0));
    grandchild.attach(BondSide::In, AttachedBond { direction: v(0.0, 20.0), multiplicity: 1 });
    let grandchild_id = grandchild.id;
    structure
        .atom_mut(child_id)
        .expect("child")
        .add_bond(Bond::new(BondType::Single, grandchild));

    let hit = bond_at(&structure, v(120.0, 110.0), &consts()).expect("hit");
    assert_eq!(hit.start_atom, child_id);
    assert_eq!(hit.end_atom, grandchild_id);
}

// =============================================================
// arrow_at
// =============================================================

fn arrow_structure() -> (Structure, crate::doc::ArrowId) {
    let mut structure = Structure::new();
    structure.origin = v(200.0, 200.0);
    let arrow = Arrow::new(ArrowType::OneWayArrow, v(40.0, 0.0));
    let id = arrow.id;
    structure.add_member(Member::Arrow(arrow));
    (structure, id)
}

#[test]
fn distinguishes_start_end_and_middle() {
    let (structure, id) = arrow_structure();
    let consts = consts();

    let start = arrow_at(&structure, v(200.0, 200.0), &consts).expect("start");
    assert_eq!(start.arrow, id);
    assert_eq!(start.part, ArrowPart::Start);
    assert!(compare_vectors(start.start_abs_pos, v(200.0, 200.0), 5));

    let end = arrow_at(&structure, v(240.0, 200.0), &consts).expect("end");
    assert_eq!(end.part, ArrowPart::End);

    let middle = arrow_at(&structure, v(220.0, 201.0), &consts).expect("middle");
    assert_eq!(middle.part, ArrowPart::Middle);
}

#[test]
fn arrow_misses_points_off_the_shaft() {
    let (structure, _) = arrow_structure();
    assert!(arrow_at(&structure, v(220.0, 210.0), &consts()).is_none());
    assert!(arrow_at(&structure, v(100.0, 100.0), &consts()).is_none());
}

#[test]
fn atoms_are_invisible_to_arrow_search() {
    let (structure, _, _) = two_atom_structure();
    assert!(arrow_at(&structure, v(100.0, 100.0), &consts()).is_none());
}
