//! Structural mutations behind every drawing gesture.
//!
//! Each operation takes the working copy of the committed [`Structure`]
//! (callers clone before calling; see the editor's copy-on-write cycle),
//! resolves the id-based hit records from [`crate::hit`], and edits the tree
//! in place. The invariant every function here maintains: whenever a bond is
//! added, removed, or retyped, both endpoints' attached-bond lists change in
//! the same operation.
//!
//! Failures are values. Hit lookups that resolve to nothing make the
//! operation a no-op; the one hard failure mode — an atom already at its
//! maximum bond count — surfaces as [`EditError::AtomFull`] before anything
//! is mutated.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use thiserror::Error;
use tracing::trace;

use crate::consts::{ANGLE, Consts, FREQ, MAX_BONDS};
use crate::doc::{
    Atom, AtomId, AttachedBond, Bond, BondSide, BondType, Label, Member, Selection, Structure,
    TextArea,
};
use crate::geometry::{self, Vector};
use crate::hit::{self, ArrowHit, ArrowPart, AtomHit, BondHit};
use crate::templates::{self, ArrowCluster, StructureCluster};

/// Why an edit was rejected. Nothing is mutated when one of these comes back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The atom already carries its maximum number of bonds.
    #[error("atom already carries the maximum of {0} bonds")]
    AtomFull(usize),
    /// The host asked for a template this build does not know.
    #[error("no template named `{0}`")]
    UnknownTemplate(String),
}

// ── Direction selection ─────────────────────────────────────────

/// Finds a direction for a new bond at `atom` that no existing bond occupies.
///
/// Starting from `vector`, rotates clockwise by `step` degrees until the
/// direction matches no attached bond to five decimals; incoming bonds are
/// rotated half a turn first, since their stored vectors point toward the
/// atom. Returns [`EditError::AtomFull`] when the atom is already at
/// `max_bonds`, or when a full turn finds no free slot.
pub fn free_direction(vector: Vector, atom: &Atom, step: f64, max_bonds: usize) -> Result<Vector, EditError> {
    if atom.attached.count() >= max_bonds {
        return Err(EditError::AtomFull(max_bonds));
    }
    let mut vector = vector;
    let attempts = (360.0 / step) as usize;
    for _ in 0..attempts {
        let collides = atom
            .attached
            .incoming
            .iter()
            .map(|bond| bond.direction.rotate_cw(180.0))
            .chain(atom.attached.outgoing.iter().map(|bond| bond.direction))
            .any(|occupied| geometry::compare_vectors(occupied, vector, 5));
        if !collides {
            return Ok(vector);
        }
        vector = vector.rotate_cw(step);
    }
    Err(EditError::AtomFull(max_bonds))
}

/// Bisects the existing in/out bond angles to pick where the next bond goes,
/// falling back to south for a bare atom, then resolves collisions by
/// rotation.
fn choose_direction_automatically(atom: &Atom, ring: bool, consts: &Consts) -> Result<Vector, EditError> {
    let first_in = atom.attached.incoming.first().map(|b| b.direction.normalized().scale(consts.bond_length));
    let first_out = atom.attached.outgoing.first().map(|b| b.direction.normalized().scale(consts.bond_length));

    let vect = match (first_in, first_out) {
        (Some(fi), Some(fo)) => {
            let angle = fi.normalized().dot(fo.normalized()).acos().to_degrees();
            let aux = fi.rotate_ccw((180.0 - angle) / 2.0);
            if geometry::compare_vectors(aux, fo, 5) {
                // The bisector landed on the outgoing bond; take the other side.
                fi.rotate_cw((180.0 - angle) / 2.0)
            } else {
                aux
            }
        }
        (Some(fi), None) => {
            if ring {
                fi
            } else {
                fi.rotate_ccw(ANGLE / 2.0)
            }
        }
        (None, Some(fo)) => fo.rotate_ccw(ANGLE),
        (None, None) => consts.bond_south(),
    };
    free_direction(vect, atom, FREQ, MAX_BONDS)
}

/// Uses the drag vector: raw when `free_angle`, otherwise snapped to the
/// closest of the presets rotated from the atom's reference bond.
fn choose_direction_manually(
    atom: &Atom,
    abs_pos: Vector,
    mouse: Vector,
    free_angle: bool,
    consts: &Consts,
) -> Vector {
    if free_angle {
        return mouse.subtract(abs_pos);
    }
    let first_in = atom.attached.incoming.first().map(|b| b.direction.normalized().scale(consts.bond_length));
    let first_out = atom.attached.outgoing.first().map(|b| b.direction.normalized().scale(consts.bond_length));
    let vect = match (first_in, first_out) {
        (Some(fi), Some(fo)) => {
            let angle = fi.normalized().dot(fo.normalized()).acos().to_degrees();
            fi.rotate_ccw((180.0 - angle) / 2.0)
        }
        (Some(fi), None) => fi,
        (None, Some(fo)) => fo,
        (None, None) => consts.bond_south(),
    };
    let possible = geometry::possible_vectors(vect, FREQ);
    geometry::closest_vector(abs_pos, mouse, &possible)
}

// ── Attach ──────────────────────────────────────────────────────

/// Attaches the chosen template (bond or ring) at an existing atom.
///
/// Direction comes from the drag when there was one, otherwise from the
/// bisector rules. A bond whose endpoint coincides with an existing atom
/// elsewhere in the structure grafts onto it: the new child becomes an
/// orphan marker pointed at the existing atom's exact offset (ring fusion by
/// coordinate coincidence).
pub fn modify_atom(
    structure: &mut Structure,
    atom_id: AtomId,
    root_id: AtomId,
    abs_pos: Vector,
    mouse: Vector,
    cluster: &StructureCluster,
    free_angle: bool,
    consts: &Consts,
) -> Result<(), EditError> {
    let ring = cluster.ring_size > 0;
    let vector = {
        let Some(atom) = structure.atom(atom_id) else { return Ok(()) };
        if geometry::inside_circle(abs_pos, mouse, consts.circ_r) {
            choose_direction_automatically(atom, ring, consts)?
        } else {
            choose_direction_manually(atom, abs_pos, mouse, free_angle, consts)
        }
    };
    trace!(ring, ?vector, "attaching template");

    let arom_center;
    if ring {
        let vector = vector.normalized().scale(consts.bond_length);
        arom_center = abs_pos.add(vector);
        // Adjust to the angle bisector so the ring body straddles the chosen
        // direction.
        let rot_vect = vector.rotate_ccw(cluster.angle / 2.0);
        let mut next = Atom::new(rot_vect);
        next.attach(BondSide::In, AttachedBond { direction: rot_vect, multiplicity: 1 });

        let Some(atom) = structure.atom_mut(atom_id) else { return Ok(()) };
        atom.add_bond(Bond::new(BondType::Single, next));
        atom.attach(BondSide::Out, AttachedBond { direction: rot_vect, multiplicity: 1 });
        let last = atom.bonds.len() - 1;
        let closure = templates::extend_ring(
            &mut atom.bonds[last].atom,
            cluster.ring_size,
            cluster.angle,
            cluster.double_every,
            cluster.aromatic,
            2,
        );
        atom.attach(BondSide::In, AttachedBond { direction: closure.direction, multiplicity: closure.multiplicity });
        atom.infer_label_anchor();
    } else {
        arom_center = abs_pos.add(vector);
        let kind = cluster.bond_type().unwrap_or(BondType::Single);
        let multiplicity = cluster.multiplicity;

        // Graft instead of duplicating when the endpoint lands on an atom.
        let target = hit::atom_at(structure, abs_pos.add(vector), consts);
        let (vector, graft) = match target {
            Some(found) => (found.abs_pos.subtract(abs_pos), Some(found.atom)),
            None => (vector, None),
        };

        let mut bond = templates::generate_bond(vector, kind, multiplicity);
        if let Some(found_id) = graft {
            bond.atom.orphan = true;
            if let Some(found) = structure.atom_mut(found_id) {
                found.attach(BondSide::In, AttachedBond { direction: vector, multiplicity });
            }
        }
        let Some(atom) = structure.atom_mut(atom_id) else { return Ok(()) };
        atom.add_bond(bond);
        atom.attach(BondSide::Out, AttachedBond { direction: vector, multiplicity });
        atom.infer_label_anchor();
    }

    if cluster.aromatic {
        structure.aromatic = true;
        structure.add_aromatic(crate::doc::AromaticMark { owner: root_id, center: arom_center });
    }
    Ok(())
}

/// First click on empty canvas: a fresh root atom at the click point, then
/// the same attach logic as clicking an existing atom.
pub fn add_structure_on_empty(
    structure: Option<Structure>,
    mouse: Vector,
    down: Vector,
    cluster: &StructureCluster,
    free_angle: bool,
    consts: &Consts,
) -> Result<Structure, EditError> {
    let mut structure = match structure {
        Some(structure) => structure,
        None => {
            let mut fresh = Structure::new();
            fresh.origin = down;
            fresh
        }
    };
    let coords = down.subtract(structure.origin);
    let atom = Atom::new(coords);
    let atom_id = atom.id;
    structure.add_member(Member::Atom(atom));
    modify_atom(&mut structure, atom_id, atom_id, down, mouse, cluster, free_angle, consts)?;
    Ok(structure)
}

// ── Modify bond ─────────────────────────────────────────────────

/// Cycles a clicked bond's type under the active structure tool.
///
/// Plain tools ride the single→double→triple ring, the double tool rotates
/// middle/left/right placement, wedge and dash toggle inversion, and the
/// undefined tool rewrites anything to undefined. Both endpoints' attached
/// multiplicities follow. Returns whether anything changed; a no-op edit
/// must not trigger a re-render or a cache push. Ring clusters never modify
/// an existing bond (fused-ring attachment is an unspecified extension
/// point).
pub fn modify_bond(structure: &mut Structure, hit: &BondHit, cluster: &StructureCluster) -> bool {
    if cluster.ring_size > 0 {
        return false;
    }
    let Some(chosen) = cluster.bond_type() else { return false };
    let Some(end_atom) = structure.atom(hit.end_atom) else { return false };
    let end_coords = end_atom.coords;
    let current = {
        let Some(start) = structure.atom(hit.start_atom) else { return false };
        let Some(bond) = start.bonds.iter().find(|b| b.atom.id == hit.end_atom) else { return false };
        bond.kind
    };

    let next = match chosen {
        BondType::Single => {
            let cycle = [BondType::Single, BondType::Double, BondType::Triple];
            match cycle.iter().position(|kind| *kind == current) {
                Some(index) => cycle[geometry::move_to_right(cycle.len(), index, 1)],
                None => cycle[0],
            }
        }
        BondType::Double => {
            let cycle = [BondType::Double, BondType::DoubleLeft, BondType::DoubleRight];
            match cycle.iter().position(|kind| *kind == current) {
                Some(index) => cycle[geometry::move_to_right(cycle.len(), index, 1)],
                None => cycle[0],
            }
        }
        BondType::Triple => BondType::Triple,
        BondType::Undefined => BondType::Undefined,
        BondType::Wedge | BondType::Dash => {
            let inverted = matches!(current, BondType::WedgeInverted | BondType::DashInverted);
            if inverted || current != chosen {
                chosen
            } else if chosen == BondType::Wedge {
                BondType::WedgeInverted
            } else {
                BondType::DashInverted
            }
        }
        _ => return false,
    };

    let multiplicity = next.multiplicity();
    if let Some(end) = structure.atom_mut(hit.end_atom) {
        end.set_attached_multiplicity(BondSide::In, end_coords, multiplicity);
    }
    if let Some(start) = structure.atom_mut(hit.start_atom) {
        start.set_attached_multiplicity(BondSide::Out, end_coords, multiplicity);
    }

    if next == current {
        return false;
    }
    if let Some(start) = structure.atom_mut(hit.start_atom) {
        if let Some(bond) = start.bonds.iter_mut().find(|b| b.atom.id == hit.end_atom) {
            bond.kind = next;
        }
    }
    true
}

// ── Delete ──────────────────────────────────────────────────────

/// Deletes an atom, re-rooting its children as top-level members at their
/// absolute positions rather than cascading the deletion. Recurses once when
/// the hit flagged a coincident duplicate, so ring-closure twins go together.
pub fn delete_atom(structure: &mut Structure, hit: &AtomHit, consts: &Consts) {
    trace!(atom = %hit.atom, via_bond = hit.prev.is_some(), "deleting atom");
    let origin = structure.origin;
    if let Some(prev_id) = hit.prev {
        let mut new_roots = Vec::new();
        if let Some(prev) = structure.atom_mut(prev_id) {
            if let Some(bond) = prev.take_bond_to(hit.atom) {
                prev.remove_attached(BondSide::Out, bond.atom.coords);
                for child_bond in bond.atom.bonds {
                    let mut child = child_bond.atom;
                    child.remove_attached(BondSide::In, child.coords);
                    child.coords = hit.abs_pos.add(child.coords).subtract(origin);
                    new_roots.push(Member::Atom(child));
                }
            }
        }
        structure.members.extend(new_roots);
    } else if let Some(index) = structure.members.iter().position(
        |member| matches!(member, Member::Atom(atom) if atom.id == hit.atom),
    ) {
        let Member::Atom(root) = structure.members.remove(index) else { return };
        let mut children = Vec::new();
        for child_bond in root.bonds {
            let mut child = child_bond.atom;
            child.remove_attached(BondSide::In, child.coords);
            child.coords = root.coords.add(child.coords);
            children.push(Member::Atom(child));
        }
        structure.members.splice(index..index, children);
    }

    if hit.has_duplicate {
        if let Some(duplicate) = hit::atom_at(structure, hit.abs_pos, consts) {
            delete_atom(structure, &duplicate, consts);
        }
    }
}

/// Deletes a bond, detaching the child subtree and re-rooting it at its
/// absolute position as a new top-level member.
pub fn delete_bond(structure: &mut Structure, hit: &BondHit) {
    let origin = structure.origin;
    let detached = {
        let Some(start) = structure.atom_mut(hit.start_atom) else { return };
        let Some(bond) = start.take_bond_to(hit.end_atom) else { return };
        let mut end = bond.atom;
        start.remove_attached(BondSide::Out, end.coords);
        end.remove_attached(BondSide::In, end.coords);
        end.coords = hit.end_abs_pos.subtract(origin);
        end
    };
    structure.members.push(Member::Atom(detached));
}

/// Removes an arrow from the member list.
pub fn delete_arrow(structure: &mut Structure, hit: &ArrowHit) {
    structure.remove_arrow(hit.arrow);
}

// ── Arrows, text, selection, movement ───────────────────────────

/// Drags an arrow's start or end handle: free with the modifier held,
/// otherwise snapped to the closest preset direction scaled so the arrow
/// keeps the drag's projected length ratio.
pub fn resize_arrow(structure: &mut Structure, hit: &ArrowHit, mouse: Vector, free_angle: bool) {
    let Some(arrow) = structure.arrow_mut(hit.arrow) else { return };
    let start_abs = hit.start_abs_pos;
    let mut move_vector = mouse.subtract(start_abs);
    let ratio = move_vector.length_ratio(arrow.relative_end);
    let end_abs = start_abs.add(arrow.relative_end);

    match hit.part {
        ArrowPart::Start => {
            if !free_angle {
                let possible = geometry::possible_vectors(arrow.relative_end.opposite(), FREQ);
                let closest = geometry::closest_vector(end_abs, mouse, &possible);
                move_vector = arrow.relative_end.add(closest.scale(ratio));
            }
            arrow.origin = arrow.origin.add(move_vector);
            arrow.relative_end = arrow.relative_end.subtract(move_vector);
        }
        ArrowPart::End => {
            if !free_angle {
                let possible = geometry::possible_vectors(arrow.relative_end, FREQ);
                let closest = geometry::closest_vector(end_abs, mouse, &possible);
                move_vector = arrow.relative_end.add(closest.scale(ratio));
            }
            arrow.relative_end = move_vector;
        }
        ArrowPart::Middle => {}
    }
}

/// Adds an arrow on empty space, creating the structure if the canvas was
/// empty.
#[must_use]
pub fn add_arrow_on_empty(
    structure: Option<Structure>,
    mouse: Vector,
    down: Vector,
    cluster: &ArrowCluster,
    consts: &Consts,
) -> Structure {
    match structure {
        None => {
            let mut fresh = Structure::new();
            fresh.origin = down;
            let arrow = cluster.arrow_for_drag(down, mouse, consts);
            fresh.add_member(Member::Arrow(arrow));
            fresh
        }
        Some(mut structure) => {
            let mut arrow = cluster.arrow_for_drag(down, mouse, consts);
            arrow.origin = down.subtract(structure.origin);
            structure.add_member(Member::Arrow(arrow));
            structure
        }
    }
}

/// Places a free-text member at the mouse-down point.
#[must_use]
pub fn add_text_area(structure: Option<Structure>, down: Vector, text: impl Into<String>) -> Structure {
    match structure {
        None => {
            let mut fresh = Structure::new();
            fresh.origin = down;
            fresh.add_member(Member::Text(TextArea::new(text, Vector::zero())));
            fresh
        }
        Some(mut structure) => {
            let origin = down.subtract(structure.origin);
            structure.add_member(Member::Text(TextArea::new(text, origin)));
            structure
        }
    }
}

/// Runs a selection drag: marks members inside the rectangle and appends the
/// transient selection member (the caller pops it on commit).
#[must_use]
pub fn make_selection(structure: Option<Structure>, mouse: Vector, down: Vector) -> Structure {
    let mut structure = match structure {
        Some(structure) => structure,
        None => {
            let mut fresh = Structure::new();
            fresh.origin = down;
            fresh
        }
    };
    let selection = Selection { origin: down.subtract(structure.origin), current: mouse };
    structure.select_within(&selection);
    structure.add_member(Member::Selection(selection));
    structure
}

/// Moves every selected member by the drag delta.
pub fn move_structure(structure: &mut Structure, mouse: Vector, down: Vector) {
    structure.move_selected(mouse.subtract(down));
}

// ── Labels ──────────────────────────────────────────────────────

/// Sets or replaces an atom's label. Re-applying a label with the same text
/// flips the anchoring side, so repeated clicks walk the text to the other
/// side of the vertex instead of doing nothing visible.
pub fn modify_label(structure: &mut Structure, atom_id: AtomId, label: Label) {
    let Some(atom) = structure.atom_mut(atom_id) else { return };
    let old = atom.label.take();
    atom.label = Some(label);
    atom.infer_label_anchor();
    if let Some(old) = old {
        let same_text = atom.label.as_ref().is_some_and(|current| current.text == old.text);
        if same_text {
            if let Some(current) = &mut atom.label {
                current.anchor = old.anchor.flipped();
            }
        }
    }
}

/// Clears an atom's label.
pub fn remove_label(structure: &mut Structure, atom_id: AtomId) {
    if let Some(atom) = structure.atom_mut(atom_id) {
        atom.label = None;
    }
}

/// Gives every bond-less, non-orphan atom a default carbon label so it stays
/// a visible vertex, and resets its stale attached directions. Runs after
/// every delete. Atoms coinciding with another atom keep their state: the
/// twin still carries the bonds.
pub fn label_single_atoms(structure: &mut Structure, consts: &Consts) {
    let origin = structure.origin;
    let candidates: Vec<(AtomId, Vector)> = structure
        .members
        .iter()
        .filter_map(|member| match member {
            Member::Atom(atom) if !atom.orphan && atom.bonds.is_empty() => {
                Some((atom.id, origin.add(atom.coords)))
            }
            _ => None,
        })
        .collect();

    for (id, abs_pos) in candidates {
        let has_duplicate = hit::atom_at(structure, abs_pos, consts).is_some_and(|h| h.has_duplicate);
        if has_duplicate {
            continue;
        }
        if let Some(atom) = structure.atom_mut(id) {
            if atom.label.is_none() {
                atom.label = Some(Label::new("C", 4));
            }
            atom.reset_attached();
        }
    }
}
