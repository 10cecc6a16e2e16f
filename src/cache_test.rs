#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

use crate::doc::{Atom, Member};
use crate::geometry::Vector;

fn structure_with_one_atom(x: f64) -> Structure {
    let mut structure = Structure::new();
    structure.add_member(Member::Atom(Atom::new(Vector::new(x, 0.0))));
    structure
}

fn first_atom_x(structure: &Structure) -> f64 {
    structure.root_atoms().next().expect("atom").coords.x
}

// =============================================================
// Basics
// =============================================================

#[test]
fn a_fresh_cache_is_an_empty_sheet() {
    let cache = StructureCache::new();
    assert!(cache.current().is_none());
    assert_eq!(cache.position(), 0);
    assert_eq!(cache.len(), 1);
    assert!(!cache.is_empty());
}

#[test]
fn commit_advances_to_the_new_snapshot() {
    let mut cache = StructureCache::new();
    cache.commit(Some(structure_with_one_atom(1.0)));
    assert_eq!(cache.position(), 1);
    assert_eq!(first_atom_x(cache.current().expect("current")), 1.0);
}

#[test]
fn undo_walks_back_to_the_empty_sheet() {
    let mut cache = StructureCache::new();
    cache.commit(Some(structure_with_one_atom(1.0)));
    cache.undo();
    assert!(cache.current().is_none());
    // Underflow is a no-op.
    cache.undo();
    assert_eq!(cache.position(), 0);
}

#[test]
fn redo_replays_an_undone_commit() {
    let mut cache = StructureCache::new();
    cache.commit(Some(structure_with_one_atom(1.0)));
    cache.undo();
    cache.redo();
    assert_eq!(first_atom_x(cache.current().expect("current")), 1.0);
    // Overflow is a no-op.
    cache.redo();
    assert_eq!(cache.position(), 1);
}

#[test]
fn committing_an_empty_sheet_is_a_valid_snapshot() {
    let mut cache = StructureCache::new();
    cache.commit(Some(structure_with_one_atom(1.0)));
    cache.commit(None);
    assert!(cache.current().is_none());
    cache.undo();
    assert!(cache.current().is_some());
}

// =============================================================
// Truncation and eviction
// =============================================================

#[test]
fn commit_truncates_the_redo_tail() {
    let mut cache = StructureCache::new();
    cache.commit(Some(structure_with_one_atom(1.0)));
    cache.commit(Some(structure_with_one_atom(2.0)));
    cache.undo();
    cache.commit(Some(structure_with_one_atom(3.0)));

    assert_eq!(first_atom_x(cache.current().expect("current")), 3.0);
    // The overwritten snapshot is gone; redo has nowhere to go.
    cache.redo();
    assert_eq!(first_atom_x(cache.current().expect("current")), 3.0);
    assert_eq!(cache.len(), 3);
}

#[test]
fn old_snapshots_fall_off_beyond_capacity() {
    let mut cache = StructureCache::new();
    for i in 0..12 {
        cache.commit(Some(structure_with_one_atom(f64::from(i))));
    }
    assert_eq!(cache.len(), 10);
    assert_eq!(first_atom_x(cache.current().expect("current")), 11.0);

    // Undoing to the very bottom no longer reaches the empty sheet.
    for _ in 0..20 {
        cache.undo();
    }
    assert_eq!(first_atom_x(cache.current().expect("current")), 2.0);
}
