#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

use crate::geometry::compare_vectors;

fn consts() -> Consts {
    Consts::default()
}

/// Atoms of a ring def in tree order, including the closing orphan.
fn ring_atoms(structure: &Structure) -> Vec<&Atom> {
    fn walk<'a>(atom: &'a Atom, out: &mut Vec<&'a Atom>) {
        out.push(atom);
        for bond in &atom.bonds {
            walk(&bond.atom, out);
        }
    }
    let mut atoms = Vec::new();
    for atom in structure.root_atoms() {
        walk(atom, &mut atoms);
    }
    atoms
}

/// Bonds of a def in tree order.
fn all_bonds(structure: &Structure) -> Vec<&Bond> {
    fn walk<'a>(atom: &'a Atom, out: &mut Vec<&'a Bond>) {
        for bond in &atom.bonds {
            out.push(bond);
            walk(&bond.atom, out);
        }
    }
    let mut bonds = Vec::new();
    for atom in structure.root_atoms() {
        walk(atom, &mut bonds);
    }
    bonds
}

/// Absolute position of an atom subtree's last atom (the orphan in rings).
fn last_atom_abs(structure: &Structure) -> Vector {
    fn walk(atom: &Atom, pos: Vector) -> Vector {
        let abs = pos.add(atom.coords);
        match atom.bonds.last() {
            Some(bond) => walk(&bond.atom, abs),
            None => abs,
        }
    }
    let root = structure.root_atoms().next().expect("ring def has a root");
    walk(root, structure.origin)
}

// =============================================================
// Bond generation
// =============================================================

#[test]
fn single_bonds_cover_all_twenty_four_directions() {
    let consts = consts();
    let defs = generate_bonds(BondType::Single, 1, &consts);
    assert_eq!(defs.len(), 24);

    for (def, direction) in defs.iter().zip(Direction::ALL) {
        assert_eq!(def.name, direction.name());
        let root = def.root_atoms().next().expect("two-atom def");
        assert!(compare_vectors(root.coords, Vector::zero(), 5));
        assert_eq!(root.bonds.len(), 1);
        let bond = &root.bonds[0];
        assert_eq!(bond.kind, BondType::Single);
        assert!(compare_vectors(bond.atom.coords, consts.bond_vector(direction), 5), "{}", def.name);
    }
}

#[test]
fn generated_bonds_record_both_attachments() {
    let consts = consts();
    let defs = generate_bonds(BondType::Double, 2, &consts);
    let def = &defs[6]; // east
    let root = def.root_atoms().next().expect("two-atom def");
    assert_eq!(root.attached.outgoing.len(), 1);
    assert_eq!(root.attached.outgoing[0].multiplicity, 2);
    assert!(compare_vectors(root.attached.outgoing[0].direction, consts.bond_east(), 5));
    let child = &root.bonds[0].atom;
    assert_eq!(child.attached.incoming.len(), 1);
    assert_eq!(child.attached.incoming[0].multiplicity, 2);
}

#[test]
fn generate_bond_builds_the_far_atom() {
    let bond = generate_bond(Vector::new(0.0, 20.0), BondType::Wedge, 1);
    assert_eq!(bond.kind, BondType::Wedge);
    assert!(compare_vectors(bond.atom.coords, Vector::new(0.0, 20.0), 5));
    assert_eq!(bond.atom.attached.incoming.len(), 1);
}

// =============================================================
// Ring generation
// =============================================================

#[test]
fn rings_close_onto_their_first_atom() {
    let consts = consts();
    for size in 3..=9 {
        let angle = 180.0 * (size as f64 - 2.0) / size as f64;
        let defs = generate_rings(angle, size, None, false, &consts);
        assert_eq!(defs.len(), 24);
        for def in &defs {
            let root_abs = def.origin.add(def.root_atoms().next().expect("root").coords);
            let orphan_abs = last_atom_abs(def);
            assert!(
                compare_vectors(orphan_abs, root_abs, 5),
                "ring of {size} in direction {} does not close",
                def.name
            );
        }
    }
}

#[test]
fn ring_defs_are_named_after_the_opposite_direction() {
    let consts = consts();
    let defs = generate_rings(120.0, 6, None, false, &consts);
    let names: Vec<&str> = defs.iter().map(|def| def.name.as_str()).collect();
    let expected: Vec<&str> = Direction::ALL.iter().map(|d| d.opposite().name()).collect();
    assert_eq!(names, expected);
}

#[test]
fn ring_has_size_plus_one_atoms_with_a_trailing_orphan() {
    let consts = consts();
    let defs = generate_rings(120.0, 6, None, false, &consts);
    let atoms = ring_atoms(&defs[0]);
    assert_eq!(atoms.len(), 7);
    assert!(atoms.last().expect("atoms").orphan);
    assert!(atoms.iter().take(6).all(|atom| !atom.orphan));
    assert_eq!(all_bonds(&defs[0]).len(), 6);
}

#[test]
fn ring_closure_direction_lands_on_the_first_atom_incoming_list() {
    let consts = consts();
    let defs = generate_rings(120.0, 6, None, false, &consts);
    let root = defs[0].root_atoms().next().expect("root");
    assert_eq!(root.attached.outgoing.len(), 1);
    assert_eq!(root.attached.incoming.len(), 1);
    let atoms = ring_atoms(&defs[0]);
    let orphan = atoms.last().expect("atoms");
    assert!(compare_vectors(root.attached.incoming[0].direction, orphan.coords, 5));
}

#[test]
fn benzene_suppresses_double_bonds_for_the_circle() {
    let consts = consts();
    let defs = generate_rings(120.0, 6, Some(2), true, &consts);
    let def = &defs[0];
    assert!(def.aromatic);

    // All drawn bonds stay single; the aromatic circle stands in for the
    // alternating doubles.
    assert!(all_bonds(def).iter().all(|bond| bond.kind == BondType::Single));

    // The multiplicity pattern is still recorded on exactly three real atoms.
    let atoms = ring_atoms(def);
    let doubled = atoms
        .iter()
        .filter(|atom| !atom.orphan && atom.attached.outgoing.iter().any(|b| b.multiplicity == 2))
        .count();
    assert_eq!(doubled, 3);
}

#[test]
fn benzene_alt_draws_alternating_double_bonds() {
    let consts = consts();
    let defs = generate_rings(120.0, 6, Some(2), false, &consts);
    let def = &defs[0];
    assert!(!def.aromatic);
    let kinds: Vec<BondType> = all_bonds(def).iter().map(|bond| bond.kind).collect();
    assert_eq!(
        kinds,
        [
            BondType::Single,
            BondType::DoubleLeft,
            BondType::Single,
            BondType::DoubleLeft,
            BondType::Single,
            BondType::DoubleLeft,
        ]
    );
}

#[test]
fn cyclopentadiene_pattern_follows_every_second_bond() {
    let consts = consts();
    let defs = generate_rings(108.0, 5, Some(2), false, &consts);
    let kinds: Vec<BondType> = all_bonds(&defs[0]).iter().map(|bond| bond.kind).collect();
    assert_eq!(
        kinds,
        [
            BondType::Single,
            BondType::DoubleLeft,
            BondType::Single,
            BondType::DoubleLeft,
            BondType::Single,
        ]
    );
}

// =============================================================
// Clusters
// =============================================================

#[test]
fn cluster_catalog_resolves_by_name() {
    let consts = consts();
    assert!(StructureCluster::by_name("single", &consts).is_some());
    assert!(StructureCluster::by_name("benzene", &consts).is_some());
    assert!(StructureCluster::by_name("cyclononane", &consts).is_some());
    assert!(StructureCluster::by_name("hexagon", &consts).is_none());
}

#[test]
fn bond_cluster_reports_its_bond_type() {
    let consts = consts();
    let cluster = StructureCluster::by_name("double", &consts).expect("double template");
    assert_eq!(cluster.bond_type(), Some(BondType::Double));
    assert_eq!(cluster.ring_size, 0);
    assert_eq!(cluster.multiplicity, 2);
}

#[test]
fn ring_cluster_carries_its_descriptor() {
    let consts = consts();
    let cluster = StructureCluster::by_name("benzene", &consts).expect("benzene template");
    assert_eq!(cluster.ring_size, 6);
    assert_eq!(cluster.angle, 120.0);
    assert!(cluster.aromatic);
    assert_eq!(cluster.double_every, Some(2));
    assert_eq!(cluster.defs.len(), 24);
}

#[test]
fn short_drag_picks_the_default_def() {
    let consts = consts();
    let cluster = StructureCluster::by_name("single", &consts).expect("single template");
    let down = Vector::new(50.0, 50.0);
    let up = Vector::new(51.0, 50.0); // within the atom circle
    let def = cluster.structure_for_drag(down, up, &consts);
    assert_eq!(def.name, cluster.default_structure().name);
    assert_eq!(def.name, "N");
}

#[test]
fn long_drag_snaps_to_the_nearest_direction() {
    let consts = consts();
    let cluster = StructureCluster::by_name("single", &consts).expect("single template");
    let down = Vector::new(50.0, 50.0);
    let up = Vector::new(90.0, 52.0); // roughly east
    let def = cluster.structure_for_drag(down, up, &consts);
    assert_eq!(def.name, "E");
}

#[test]
fn ring_drag_snaps_by_def_name() {
    let consts = consts();
    let cluster = StructureCluster::by_name("cyclohexane", &consts).expect("cyclohexane template");
    let down = Vector::new(0.0, 0.0);
    let up = Vector::new(0.0, 40.0); // south
    let def = cluster.structure_for_drag(down, up, &consts);
    assert_eq!(def.name, "S");
}

// =============================================================
// Arrow clusters
// =============================================================

#[test]
fn arrow_cluster_holds_a_full_turn_of_defs() {
    let consts = consts();
    let cluster = ArrowCluster::new(ArrowType::OneWayArrow, &consts);
    assert_eq!(cluster.defs.len(), 25);
}

#[test]
fn arrow_short_drag_defaults_east() {
    let consts = consts();
    let cluster = ArrowCluster::new(ArrowType::OneWayArrow, &consts);
    let arrow = cluster.arrow_for_drag(Vector::new(10.0, 10.0), Vector::new(10.5, 10.0), &consts);
    assert!(compare_vectors(arrow.relative_end, consts.bond_east(), 5));
    assert_eq!(arrow.kind, ArrowType::OneWayArrow);
}

#[test]
fn arrow_long_drag_snaps_to_the_nearest_preset() {
    let consts = consts();
    let cluster = ArrowCluster::new(ArrowType::EquilibriumArrow, &consts);
    let arrow = cluster.arrow_for_drag(Vector::new(10.0, 10.0), Vector::new(12.0, -60.0), &consts);
    assert!(compare_vectors(arrow.relative_end, consts.bond_vector(Direction::N), 5));
}

#[test]
fn arrow_cluster_by_name_matches_serialized_kinds() {
    let consts = consts();
    assert!(ArrowCluster::by_name("one-way-arrow", &consts).is_some());
    assert!(ArrowCluster::by_name("two-way-arrow", &consts).is_some());
    assert!(ArrowCluster::by_name("equilibrium-arrow", &consts).is_some());
    assert!(ArrowCluster::by_name("curly-arrow", &consts).is_none());
}
