//! Document model: the molecule graph and everything else on the sheet.
//!
//! A [`Structure`] is the aggregate root the editor commits and renders. Its
//! members are trees of [`Atom`]s (each atom exclusively owns its outgoing
//! [`Bond`]s, and each bond exclusively owns the atom at its far end),
//! reaction [`Arrow`]s, free-text [`TextArea`]s, and at most one transient
//! [`Selection`] during a drag. Atom coordinates are relative to the parent
//! atom (or to the structure origin for roots), so moving a subtree is a
//! single root translation.
//!
//! Atoms and arrows carry stable [`Uuid`] ids. Snapshots (`Clone`) preserve
//! them, which is what lets aromatic ring decorations and cached hit results
//! reference an object across the copy-on-write edit cycle.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{self, Quadrant, Vector};

/// Unique identifier for an atom.
pub type AtomId = Uuid;

/// Unique identifier for an arrow.
pub type ArrowId = Uuid;

// ── Bonds ───────────────────────────────────────────────────────

/// The drawn type of a bond. Multiplicity is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BondType {
    Single,
    Double,
    DoubleLeft,
    DoubleRight,
    Triple,
    Wedge,
    WedgeInverted,
    Dash,
    DashInverted,
    Undefined,
}

impl BondType {
    /// Chemical multiplicity: 1 for all single-line variants, 2 for doubles,
    /// 3 for triples.
    #[must_use]
    pub fn multiplicity(self) -> u8 {
        match self {
            Self::Double | Self::DoubleLeft | Self::DoubleRight => 2,
            Self::Triple => 3,
            _ => 1,
        }
    }
}

/// A typed edge to the atom it exclusively owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bond {
    pub kind: BondType,
    pub atom: Atom,
}

impl Bond {
    #[must_use]
    pub fn new(kind: BondType, atom: Atom) -> Self {
        Self { kind, atom }
    }
}

/// Whether an attached-bond entry describes an incoming or outgoing bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondSide {
    In,
    Out,
}

/// One direction/multiplicity pair already used at an atom.
///
/// Incoming entries store the vector pointing *toward* the atom, outgoing
/// entries the vector pointing away; collision checks rotate incoming
/// vectors half a turn before comparing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AttachedBond {
    pub direction: Vector,
    pub multiplicity: u8,
}

/// Every direction already occupied at an atom, for collision avoidance when
/// attaching new bonds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttachedBonds {
    pub incoming: Vec<AttachedBond>,
    pub outgoing: Vec<AttachedBond>,
}

impl AttachedBonds {
    #[must_use]
    pub fn side(&self, side: BondSide) -> &[AttachedBond] {
        match side {
            BondSide::In => &self.incoming,
            BondSide::Out => &self.outgoing,
        }
    }

    /// Total number of occupied directions.
    #[must_use]
    pub fn count(&self) -> usize {
        self.incoming.len() + self.outgoing.len()
    }
}

// ── Labels ──────────────────────────────────────────────────────

/// Which way label text grows from its atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelAnchor {
    /// Left to right: the atom symbol sits at the left edge of the text.
    #[default]
    Lr,
    /// Right to left: the text ends at the atom.
    Rl,
}

impl LabelAnchor {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Lr => Self::Rl,
            Self::Rl => Self::Lr,
        }
    }
}

/// A textual group attached to an atom, e.g. `"O"` or `"CH3"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    /// Valence ceiling used to infer implicit hydrogens; 0 for custom text.
    pub max_bonds: u8,
    pub anchor: LabelAnchor,
}

impl Label {
    #[must_use]
    pub fn new(text: impl Into<String>, max_bonds: u8) -> Self {
        Self { text: text.into(), max_bonds, anchor: LabelAnchor::default() }
    }

    /// A custom label typed by the user; no implicit hydrogens.
    #[must_use]
    pub fn custom(text: impl Into<String>) -> Self {
        Self::new(text, 0)
    }

    /// The built-in element labels and their maximum bond counts.
    #[must_use]
    pub fn predefined(symbol: &str) -> Option<Self> {
        let max_bonds = match symbol {
            "O" | "S" => 2,
            "P" | "N" => 3,
            "C" => 4,
            "F" | "Cl" | "Br" | "I" | "H" => 1,
            _ => return None,
        };
        Some(Self::new(symbol, max_bonds))
    }
}

// ── Atoms ───────────────────────────────────────────────────────

/// A vertex in the molecule graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Atom {
    pub id: AtomId,
    /// Offset from the parent atom, or from the structure origin for roots.
    pub coords: Vector,
    pub bonds: Vec<Bond>,
    pub label: Option<Label>,
    pub attached: AttachedBonds,
    pub selected: bool,
    /// Marks a ring-closure duplicate: a non-rendered atom sitting on top of
    /// an existing vertex, kept only to record the closing bond direction.
    pub orphan: bool,
}

impl Atom {
    #[must_use]
    pub fn new(coords: Vector) -> Self {
        Self {
            id: Uuid::new_v4(),
            coords,
            bonds: Vec::new(),
            label: None,
            attached: AttachedBonds::default(),
            selected: false,
            orphan: false,
        }
    }

    /// Records an occupied direction on one side.
    pub fn attach(&mut self, side: BondSide, bond: AttachedBond) {
        match side {
            BondSide::In => self.attached.incoming.push(bond),
            BondSide::Out => self.attached.outgoing.push(bond),
        }
    }

    /// Drops every attached entry on `side` matching `direction` to two
    /// decimal places.
    pub fn remove_attached(&mut self, side: BondSide, direction: Vector) {
        let list = match side {
            BondSide::In => &mut self.attached.incoming,
            BondSide::Out => &mut self.attached.outgoing,
        };
        list.retain(|bond| !geometry::compare_vectors(bond.direction, direction, 2));
    }

    /// Rewrites the multiplicity of every attached entry on `side` matching
    /// `direction` to two decimal places.
    pub fn set_attached_multiplicity(&mut self, side: BondSide, direction: Vector, multiplicity: u8) {
        let list = match side {
            BondSide::In => &mut self.attached.incoming,
            BondSide::Out => &mut self.attached.outgoing,
        };
        for bond in list.iter_mut() {
            if geometry::compare_vectors(bond.direction, direction, 2) {
                bond.multiplicity = multiplicity;
            }
        }
    }

    pub fn reset_attached(&mut self) {
        self.attached = AttachedBonds::default();
    }

    /// Removes and returns the bond leading to `child`, with its subtree.
    pub fn take_bond_to(&mut self, child: AtomId) -> Option<Bond> {
        let index = self.bonds.iter().position(|bond| bond.atom.id == child)?;
        Some(self.bonds.remove(index))
    }

    pub fn add_bond(&mut self, bond: Bond) {
        self.bonds.push(bond);
    }

    #[must_use]
    pub fn has_label(&self) -> bool {
        self.label.is_some()
    }

    /// Re-guesses which side label text should grow toward, from the
    /// east/west balance of the bonds already attached.
    pub fn infer_label_anchor(&mut self) {
        let mut count_e = 0;
        let mut count_w = 0;
        for bond in &self.attached.incoming {
            if bond.direction.x > 0.0 {
                count_e += 1;
            } else {
                count_w += 1;
            }
        }
        for bond in &self.attached.outgoing {
            if bond.direction.x < 0.0 {
                count_e += 1;
            } else {
                count_w += 1;
            }
        }
        let anchor = if count_e > count_w { LabelAnchor::Lr } else { LabelAnchor::Rl };
        if let Some(label) = &mut self.label {
            label.anchor = anchor;
        }
    }

    /// Marks this atom and every atom reachable through its bonds.
    pub fn select_tree(&mut self) {
        self.selected = true;
        for bond in &mut self.bonds {
            bond.atom.select_tree();
        }
    }

    /// Unmarks this atom and every atom reachable through its bonds.
    pub fn deselect_tree(&mut self) {
        self.selected = false;
        for bond in &mut self.bonds {
            bond.atom.deselect_tree();
        }
    }
}

// ── Arrows, text, selection ─────────────────────────────────────

/// Reaction arrow styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrowType {
    OneWayArrow,
    TwoWayArrow,
    EquilibriumArrow,
}

/// A directional edge outside the atom graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arrow {
    pub id: ArrowId,
    pub kind: ArrowType,
    /// Start point, relative to the structure origin.
    pub origin: Vector,
    /// Building vector from origin to tip.
    pub relative_end: Vector,
    pub selected: bool,
}

impl Arrow {
    #[must_use]
    pub fn new(kind: ArrowType, relative_end: Vector) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            origin: Vector::zero(),
            relative_end,
            selected: false,
        }
    }

    /// End point, relative to the structure origin.
    #[must_use]
    pub fn end(&self) -> Vector {
        self.origin.add(self.relative_end)
    }
}

/// Free text on the sheet; `_{...}` runs render as subscript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextArea {
    pub text: String,
    /// Relative to the structure origin.
    pub origin: Vector,
}

impl TextArea {
    #[must_use]
    pub fn new(text: impl Into<String>, origin: Vector) -> Self {
        Self { text: text.into(), origin }
    }
}

/// The transient marquee rectangle of a select drag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    /// Drag start, relative to the structure origin.
    pub origin: Vector,
    /// Live mouse position, absolute.
    pub current: Vector,
}

// ── Structure ───────────────────────────────────────────────────

/// Aromatic ring circle tied to the root atom of the substructure that owns
/// it, so it moves and dies together with that subtree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AromaticMark {
    pub owner: AtomId,
    /// Circle center, absolute.
    pub center: Vector,
}

/// One top-level member of a structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Member {
    Atom(Atom),
    Arrow(Arrow),
    Text(TextArea),
    Selection(Selection),
}

/// Running bounding box over absolute positions.
#[derive(Debug, Clone, Copy)]
pub struct MinMax {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for MinMax {
    fn default() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }
}

impl MinMax {
    pub fn update(&mut self, point: Vector) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    /// True until at least one point has been folded in.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x
    }
}

/// The aggregate root: everything currently drawn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Structure {
    pub name: String,
    /// Absolute placement of the whole structure.
    pub origin: Vector,
    pub members: Vec<Member>,
    pub aromatic: bool,
    pub aromatics: Vec<AromaticMark>,
}

impl Structure {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn add_member(&mut self, member: Member) {
        self.members.push(member);
    }

    /// Root atoms in member order.
    pub fn root_atoms(&self) -> impl Iterator<Item = &Atom> {
        self.members.iter().filter_map(|member| match member {
            Member::Atom(atom) => Some(atom),
            _ => None,
        })
    }

    /// Arrows in member order.
    pub fn arrows(&self) -> impl Iterator<Item = &Arrow> {
        self.members.iter().filter_map(|member| match member {
            Member::Arrow(arrow) => Some(arrow),
            _ => None,
        })
    }

    /// Finds an atom anywhere in the forest.
    #[must_use]
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        fn find(atom: &Atom, id: AtomId) -> Option<&Atom> {
            if atom.id == id {
                return Some(atom);
            }
            atom.bonds.iter().find_map(|bond| find(&bond.atom, id))
        }
        self.root_atoms().find_map(|atom| find(atom, id))
    }

    /// Finds an atom anywhere in the forest, mutably.
    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        fn find(atom: &mut Atom, id: AtomId) -> Option<&mut Atom> {
            if atom.id == id {
                return Some(atom);
            }
            atom.bonds.iter_mut().find_map(|bond| find(&mut bond.atom, id))
        }
        self.members.iter_mut().find_map(|member| match member {
            Member::Atom(atom) => find(atom, id),
            _ => None,
        })
    }

    /// Absolute position of an atom: the structure origin plus the relative
    /// offsets along its path.
    #[must_use]
    pub fn atom_abs_position(&self, id: AtomId) -> Option<Vector> {
        fn walk(atom: &Atom, pos: Vector, id: AtomId) -> Option<Vector> {
            let abs = pos.add(atom.coords);
            if atom.id == id {
                return Some(abs);
            }
            atom.bonds.iter().find_map(|bond| walk(&bond.atom, abs, id))
        }
        self.root_atoms().find_map(|atom| walk(atom, self.origin, id))
    }

    /// Finds an arrow by id, mutably.
    pub fn arrow_mut(&mut self, id: ArrowId) -> Option<&mut Arrow> {
        self.members.iter_mut().find_map(|member| match member {
            Member::Arrow(arrow) if arrow.id == id => Some(arrow),
            _ => None,
        })
    }

    /// Removes an arrow by id.
    pub fn remove_arrow(&mut self, id: ArrowId) {
        self.members.retain(|member| !matches!(member, Member::Arrow(arrow) if arrow.id == id));
    }

    /// Drops the trailing transient selection member, if present.
    pub fn pop_selection(&mut self) {
        if matches!(self.members.last(), Some(Member::Selection(_))) {
            self.members.pop();
        }
    }

    pub fn add_aromatic(&mut self, mark: AromaticMark) {
        self.aromatics.push(mark);
    }

    // ── Selection ────────────────────────────────────────────

    pub fn select_all(&mut self) {
        for member in &mut self.members {
            match member {
                Member::Atom(atom) => atom.select_tree(),
                Member::Arrow(arrow) => arrow.selected = true,
                _ => {}
            }
        }
    }

    pub fn deselect_all(&mut self) {
        for member in &mut self.members {
            match member {
                Member::Atom(atom) => atom.deselect_tree(),
                Member::Arrow(arrow) => arrow.selected = false,
                _ => {}
            }
        }
    }

    /// Marks every member whose bounding extremes fall inside the selection
    /// rectangle. "Inside" is quadrant-aware: the effective corners depend on
    /// which way the drag went.
    pub fn select_within(&mut self, selection: &Selection) {
        let rect_origin = self.origin.add(selection.origin);
        let rect_end = selection.current;
        let origin = self.origin;

        let mut marks: Vec<usize> = Vec::new();
        for (index, member) in self.members.iter().enumerate() {
            let extent = match member {
                Member::Atom(atom) => subtree_extent(atom, origin),
                Member::Arrow(arrow) => arrow_extent(arrow, origin),
                _ => continue,
            };
            let inside = inside_rect_x(rect_origin, rect_end, extent.min_x)
                && inside_rect_x(rect_origin, rect_end, extent.max_x)
                && inside_rect_y(rect_origin, rect_end, extent.min_y)
                && inside_rect_y(rect_origin, rect_end, extent.max_y);
            if inside {
                marks.push(index);
            }
        }
        for index in marks {
            match &mut self.members[index] {
                Member::Atom(atom) => atom.select_tree(),
                Member::Arrow(arrow) => arrow.selected = true,
                _ => {}
            }
        }
    }

    /// Members currently marked as selected (roots and arrows).
    #[must_use]
    pub fn selected_members(&self) -> Vec<&Member> {
        self.members
            .iter()
            .filter(|member| match member {
                Member::Atom(atom) => atom.selected,
                Member::Arrow(arrow) => arrow.selected,
                _ => false,
            })
            .collect()
    }

    /// Removes every selected member, along with aromatic marks owned by
    /// removed atom roots.
    pub fn delete_selected(&mut self) {
        let mut removed_roots: Vec<AtomId> = Vec::new();
        self.members.retain(|member| match member {
            Member::Atom(atom) => {
                if atom.selected {
                    removed_roots.push(atom.id);
                    false
                } else {
                    true
                }
            }
            Member::Arrow(arrow) => !arrow.selected,
            _ => true,
        });
        self.aromatics.retain(|mark| !removed_roots.contains(&mark.owner));
    }

    // ── Movement and alignment ───────────────────────────────

    /// Translates every selected member (and the aromatic marks keyed to
    /// moved atom roots) by `delta`.
    pub fn move_selected(&mut self, delta: Vector) {
        let mut moved_roots: Vec<AtomId> = Vec::new();
        for member in &mut self.members {
            match member {
                Member::Atom(atom) if atom.selected => {
                    atom.coords = atom.coords.add(delta);
                    moved_roots.push(atom.id);
                }
                Member::Arrow(arrow) if arrow.selected => {
                    arrow.origin = arrow.origin.add(delta);
                }
                _ => {}
            }
        }
        for mark in &mut self.aromatics {
            if moved_roots.contains(&mark.owner) {
                mark.center = mark.center.add(delta);
            }
        }
    }

    /// Bounding box over every selected member's absolute extremes.
    #[must_use]
    pub fn find_min_max(&self) -> MinMax {
        let mut min_max = MinMax::default();
        for member in &self.members {
            let extent = match member {
                Member::Atom(atom) if atom.selected => subtree_extent(atom, self.origin),
                Member::Arrow(arrow) if arrow.selected => arrow_extent(arrow, self.origin),
                _ => continue,
            };
            min_max.update(Vector::new(extent.min_x, extent.min_y));
            min_max.update(Vector::new(extent.max_x, extent.max_y));
        }
        min_max
    }

    /// Aligns selected members flush to the uppermost point. Returns whether
    /// any position actually changed.
    pub fn align_up(&mut self, min_y: f64) -> bool {
        self.align(Axis::Y, Extreme::Min, min_y)
    }

    /// Aligns selected members flush to the lowermost point.
    pub fn align_down(&mut self, max_y: f64) -> bool {
        self.align(Axis::Y, Extreme::Max, max_y)
    }

    /// Aligns selected members flush to the leftmost point.
    pub fn align_left(&mut self, min_x: f64) -> bool {
        self.align(Axis::X, Extreme::Min, min_x)
    }

    /// Aligns selected members flush to the rightmost point.
    pub fn align_right(&mut self, max_x: f64) -> bool {
        self.align(Axis::X, Extreme::Max, max_x)
    }

    fn align(&mut self, axis: Axis, extreme: Extreme, target: f64) -> bool {
        let origin = self.origin;
        let mut changed = false;
        let mut moves: Vec<(usize, Vector, Option<AtomId>)> = Vec::new();

        for (index, member) in self.members.iter().enumerate() {
            let extent = match member {
                Member::Atom(atom) if atom.selected => subtree_extent(atom, origin),
                Member::Arrow(arrow) if arrow.selected => arrow_extent(arrow, origin),
                _ => continue,
            };
            let current = match (axis, extreme) {
                (Axis::X, Extreme::Min) => extent.min_x,
                (Axis::X, Extreme::Max) => extent.max_x,
                (Axis::Y, Extreme::Min) => extent.min_y,
                (Axis::Y, Extreme::Max) => extent.max_y,
            };
            let d = target - current;
            let delta = match axis {
                Axis::X => Vector::new(d, 0.0),
                Axis::Y => Vector::new(0.0, d),
            };
            let owner = match member {
                Member::Atom(atom) => Some(atom.id),
                _ => None,
            };
            moves.push((index, delta, owner));
            if !geometry::compare_floats(d, 0.0, 5) {
                changed = true;
            }
        }

        for (index, delta, owner) in moves {
            match &mut self.members[index] {
                Member::Atom(atom) => atom.coords = atom.coords.add(delta),
                Member::Arrow(arrow) => arrow.origin = arrow.origin.add(delta),
                _ => {}
            }
            if let Some(owner) = owner {
                for mark in &mut self.aromatics {
                    if mark.owner == owner {
                        mark.center = mark.center.add(delta);
                    }
                }
            }
        }
        changed
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

#[derive(Clone, Copy)]
enum Extreme {
    Min,
    Max,
}

/// Absolute bounding box of an atom subtree rooted at `atom`.
fn subtree_extent(atom: &Atom, parent_abs: Vector) -> MinMax {
    fn walk(atom: &Atom, pos: Vector, min_max: &mut MinMax) {
        let abs = pos.add(atom.coords);
        min_max.update(abs);
        for bond in &atom.bonds {
            walk(&bond.atom, abs, min_max);
        }
    }
    let mut min_max = MinMax::default();
    walk(atom, parent_abs, &mut min_max);
    min_max
}

/// Absolute bounding box of an arrow's two endpoints.
fn arrow_extent(arrow: &Arrow, structure_origin: Vector) -> MinMax {
    let mut min_max = MinMax::default();
    min_max.update(structure_origin.add(arrow.origin));
    min_max.update(structure_origin.add(arrow.end()));
    min_max
}

fn inside_rect_x(origin: Vector, end: Vector, coord: f64) -> bool {
    match geometry::quadrant(origin, end) {
        Quadrant::First | Quadrant::Fourth => coord >= origin.x && coord <= end.x,
        Quadrant::Second | Quadrant::Third => coord <= origin.x && coord >= end.x,
    }
}

fn inside_rect_y(origin: Vector, end: Vector, coord: f64) -> bool {
    match geometry::quadrant(origin, end) {
        Quadrant::First | Quadrant::Second => coord <= origin.y && coord >= end.y,
        Quadrant::Third | Quadrant::Fourth => coord >= origin.y && coord <= end.y,
    }
}
