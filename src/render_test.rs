#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

use crate::doc::{
    Arrow, AromaticMark, ArrowType, Atom, AttachedBond, Bond, BondSide, Label, Selection,
    Structure, TextArea,
};

fn v(x: f64, y: f64) -> Vector {
    Vector::new(x, y)
}

fn consts() -> Consts {
    Consts::default()
}

/// Root at (100, 100) bonded east to a child at (120, 100).
fn single_bond_structure(kind: BondType) -> Structure {
    let mut root = Atom::new(v(100.0, 100.0));
    root.attach(BondSide::Out, AttachedBond { direction: v(20.0, 0.0), multiplicity: kind.multiplicity() });
    let mut child = Atom::new(v(20.0, 0.0));
    child.attach(BondSide::In, AttachedBond { direction: v(20.0, 0.0), multiplicity: kind.multiplicity() });
    root.add_bond(Bond::new(kind, child));
    let mut structure = Structure::new();
    structure.add_member(Member::Atom(root));
    structure
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

// =============================================================
// Styles
// =============================================================

#[test]
fn style_blocks_embed_the_derived_bond_width() {
    let consts = consts();
    let base = style_base(&consts);
    assert!(base.starts_with("<style type=\"text/css\">"));
    assert!(base.contains("stroke-width:0.80;"));
    assert!(base.contains("font-family:Arial;"));
    assert!(base.contains("font-size:18px;"));
    assert!(!base.contains("rect.focus"));
}

#[test]
fn expanded_style_adds_the_affordances() {
    let consts = consts();
    let expanded = style_expanded(&consts);
    assert!(expanded.contains("path.wedge{fill:black;}"));
    assert!(expanded.contains("rect.focus:hover{opacity:0.3;}"));
    assert!(expanded.contains("rect.selection{stroke:black;stroke-dasharray:10 5;fill:none;}"));
}

// =============================================================
// Paths
// =============================================================

#[test]
fn single_bond_renders_one_line() {
    let structure = single_bond_structure(BondType::Single);
    let svg = draw(&structure, "cmpd1", &consts());
    assert!(svg.element_full.contains("<path d='M 100.00 100.00 L 120.00 100.00'></path>"));
    assert!(svg.element_mini.contains("<path d='M 100.00 100.00 L 120.00 100.00'></path>"));
}

#[test]
fn labeled_endpoint_pushes_the_line_short() {
    let mut structure = single_bond_structure(BondType::Single);
    if let Member::Atom(root) = &mut structure.members[0] {
        root.label = Some(Label::predefined("O").expect("O"));
    }
    let svg = draw(&structure, "cmpd1", &consts());
    // PUSH * bond length = 6 units in from the labeled start.
    assert!(svg.element_full.contains("M 106.00 100.00 L 120.00 100.00"));
}

#[test]
fn wedge_bond_renders_a_classed_path() {
    let structure = single_bond_structure(BondType::Wedge);
    let svg = draw(&structure, "cmpd1", &consts());
    assert!(svg.element_full.contains("<path class='wedge'"));
}

#[test]
fn double_bond_renders_two_parallel_lines() {
    let structure = single_bond_structure(BondType::Double);
    let svg = draw(&structure, "cmpd1", &consts());
    assert!(svg.element_full.contains("M 100.00 101.30 L 120.00 101.30"));
    assert!(svg.element_full.contains("M 100.00 98.70 L 120.00 98.70"));
}

// =============================================================
// Circles and focus rects
// =============================================================

#[test]
fn atom_circles_appear_only_in_the_full_variant() {
    let structure = single_bond_structure(BondType::Single);
    let svg = draw(&structure, "cmpd1", &consts());
    assert_eq!(count(&svg.element_full, "<circle class='atom'"), 2);
    assert_eq!(count(&svg.element_mini, "<circle"), 0);
}

#[test]
fn labeled_and_selected_atoms_change_circle_class() {
    let mut structure = single_bond_structure(BondType::Single);
    if let Member::Atom(root) = &mut structure.members[0] {
        root.label = Some(Label::predefined("O").expect("O"));
        root.bonds[0].atom.selected = true;
    }
    let svg = draw(&structure, "cmpd1", &consts());
    assert_eq!(count(&svg.element_full, "<circle class='label'"), 1);
    assert_eq!(count(&svg.element_full, "<circle class='edit'"), 1);
}

#[test]
fn orphan_atoms_are_never_rendered() {
    let mut structure = single_bond_structure(BondType::Single);
    if let Member::Atom(root) = &mut structure.members[0] {
        root.bonds[0].atom.orphan = true;
    }
    let svg = draw(&structure, "cmpd1", &consts());
    assert_eq!(count(&svg.element_full, "<circle"), 1);
}

#[test]
fn focus_rects_appear_only_in_the_full_variant() {
    let structure = single_bond_structure(BondType::Single);
    let svg = draw(&structure, "cmpd1", &consts());
    assert_eq!(count(&svg.element_full, "<rect class='focus'"), 1);
    assert_eq!(count(&svg.element_mini, "<rect class='focus'"), 0);
    assert!(svg.element_full.contains("transform='rotate("));
}

// =============================================================
// Labels and implicit hydrogens
// =============================================================

#[test]
fn oxygen_with_one_bond_renders_oh() {
    let mut structure = single_bond_structure(BondType::Single);
    if let Member::Atom(root) = &mut structure.members[0] {
        let child = &mut root.bonds[0].atom;
        child.label = Some(Label::predefined("O").expect("O"));
        child.infer_label_anchor();
    }
    let svg = draw(&structure, "cmpd1", &consts());
    // The bond arrives from the west, so text grows east: OH, anchored lr.
    assert!(svg.element_full.contains("text-anchor='start'"));
    assert!(svg.element_full.contains("<tspan>O</tspan><tspan>H</tspan>"));
}

#[test]
fn oxygen_on_the_west_side_renders_ho() {
    let mut structure = single_bond_structure(BondType::Single);
    if let Member::Atom(root) = &mut structure.members[0] {
        root.label = Some(Label::predefined("O").expect("O"));
        root.infer_label_anchor();
    }
    let svg = draw(&structure, "cmpd1", &consts());
    // The bond leaves eastward, so text grows west: HO, anchored rl.
    assert!(svg.element_full.contains("text-anchor='end'"));
    assert!(svg.element_full.contains("<tspan>H</tspan><tspan>O</tspan>"));
}

#[test]
fn saturated_atom_renders_no_hydrogens() {
    let mut structure = single_bond_structure(BondType::Double);
    if let Member::Atom(root) = &mut structure.members[0] {
        let child = &mut root.bonds[0].atom;
        child.label = Some(Label::predefined("O").expect("O"));
    }
    let svg = draw(&structure, "cmpd1", &consts());
    assert!(svg.element_full.contains("<tspan>O</tspan></text>"));
    assert!(!svg.element_full.contains("<tspan>H</tspan>"));
}

#[test]
fn digits_render_as_subscripts() {
    let mut structure = single_bond_structure(BondType::Single);
    if let Member::Atom(root) = &mut structure.members[0] {
        root.bonds[0].atom.label = Some(Label::custom("CH3"));
    }
    let svg = draw(&structure, "cmpd1", &consts());
    assert!(svg.element_full.contains("<tspan class='sub' dy='4.5'>3</tspan>"));
}

#[test]
fn rl_custom_labels_invert_their_groups() {
    let mut structure = single_bond_structure(BondType::Single);
    if let Member::Atom(root) = &mut structure.members[0] {
        let mut label = Label::custom("OBn");
        label.anchor = LabelAnchor::Rl;
        root.bonds[0].atom.label = Some(label);
    }
    let svg = draw(&structure, "cmpd1", &consts());
    assert!(svg.element_full.contains("<tspan>B</tspan><tspan>n</tspan><tspan>O</tspan>"));
}

#[test]
fn labels_carry_their_atom_position_for_the_host() {
    let mut structure = single_bond_structure(BondType::Single);
    if let Member::Atom(root) = &mut structure.members[0] {
        root.label = Some(Label::predefined("N").expect("N"));
    }
    let svg = draw(&structure, "cmpd1", &consts());
    assert!(svg.element_full.contains("atomx='100.00' atomy='100.00'"));
    // lr labels shift 0.2 bond lengths west of the vertex.
    assert!(svg.element_full.contains("x='96.00' y='101.80'"));
}

// =============================================================
// Text areas, selection, aromatics
// =============================================================

#[test]
fn text_area_subscript_escape() {
    let mut structure = Structure::new();
    structure.add_member(Member::Text(TextArea::new("H_{2}O", v(10.0, 10.0))));
    let svg = draw(&structure, "cmpd1", &consts());
    assert!(svg.element_full.contains("<text class='text-area'"));
    assert!(
        svg.element_full.contains(
            "<tspan>H</tspan><tspan class='text-area-sub' dy='3.5'>2</tspan><tspan dy='-3.5'>O</tspan>"
        )
    );
    assert!(svg.element_mini.contains("<text class='text-area'"));
}

#[test]
fn selection_member_renders_a_marquee() {
    let mut structure = Structure::new();
    structure.add_member(Member::Selection(Selection { origin: v(10.0, 10.0), current: v(50.0, 40.0) }));
    let svg = draw(&structure, "cmpd1", &consts());
    assert!(svg.element_full.contains("<rect class='selection' x='10.00' y='10.00' width='40.00' height='30.00'"));
}

#[test]
fn aromatic_marks_render_circles_in_both_variants() {
    let mut structure = single_bond_structure(BondType::Single);
    structure.aromatic = true;
    let owner = structure.root_atoms().next().expect("root").id;
    structure.add_aromatic(AromaticMark { owner, center: v(110.0, 117.0) });
    let svg = draw(&structure, "cmpd1", &consts());
    assert!(svg.element_full.contains("<circle class='arom' cx='110.00' cy='117.00' r='9.00'"));
    assert!(svg.element_mini.contains("<circle class='tr-arom' cx='110.00' cy='117.00' r='9.00'"));
}

#[test]
fn arrows_render_shaft_heads_and_handles() {
    let mut structure = Structure::new();
    let mut arrow = Arrow::new(ArrowType::OneWayArrow, v(40.0, 0.0));
    arrow.origin = v(10.0, 10.0);
    structure.add_member(Member::Arrow(arrow));
    let svg = draw(&structure, "cmpd1", &consts());
    assert!(svg.element_full.contains("<path class='arrow'"));
    // Endpoint handles are editor affordances only.
    assert_eq!(count(&svg.element_full, "<circle class='atom'"), 2);
    assert_eq!(count(&svg.element_mini, "<circle"), 0);
}

// =============================================================
// Bounds and wrapping
// =============================================================

#[test]
fn min_max_tracks_every_visited_point() {
    let structure = single_bond_structure(BondType::Single);
    let svg = draw(&structure, "cmpd1", &consts());
    // Seeded with the structure origin at (0, 0).
    assert_eq!(svg.min_max.min_x, 0.0);
    assert_eq!(svg.min_max.min_y, 0.0);
    assert_eq!(svg.min_max.max_x, 120.0);
    assert_eq!(svg.min_max.max_y, 100.0);
}

#[test]
fn wrap_nests_group_and_svg_tags() {
    let structure = single_bond_structure(BondType::Single);
    let svg = draw(&structure, "cmpd1", &consts())
        .wrap(SvgVariant::Full, "g", &[])
        .wrap(SvgVariant::Full, "svg", &[]);
    assert!(svg.element_full.starts_with("<svg><g id='cmpd1'>"));
    assert!(svg.element_full.ends_with("</g></svg>"));
}

#[test]
fn wrap_with_attributes_serializes_them() {
    let structure = single_bond_structure(BondType::Single);
    let svg = draw(&structure, "cmpd1", &consts()).wrap(
        SvgVariant::Mini,
        "svg",
        &[("viewBox", "0 0 10 10".to_owned()), ("width", "100%".to_owned())],
    );
    assert!(svg.element_mini.starts_with("<svg viewBox='0 0 10 10' width='100%'>"));
}
