//! Serializes a [`Structure`] to SVG markup.
//!
//! One walk over the member list accumulates path, circle, label, rect, and
//! text fragments, then joins them into two markup variants: the *full*
//! editable version (hover circles, focus rectangles, selection marquee) and
//! the *mini* export version (geometry only). Both embed a `<style>` block so
//! the output depends on no external CSS. The walk also tracks the bounding
//! box over every absolute point it visits, which the export viewBox is
//! computed from.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;

use crate::consts::{Consts, PUSH};
use crate::doc::{Atom, BondType, LabelAnchor, Member, MinMax, Structure};
use crate::geometry::{self, Vector};
use crate::hit;
use crate::path::{self, DoublePlacement, FocusData, PathData, PathOp, RectData};

/// Label font size in px.
pub const FONT_SIZE: f64 = 18.0;
/// Label subscript font size in px.
pub const SUB_FONT_SIZE: f64 = 14.0;
/// Text-area font size in px.
pub const TEXT_AREA_FONT_SIZE: f64 = 14.0;
/// Text-area subscript font size in px.
pub const TEXT_AREA_SUB_FONT_SIZE: f64 = 10.0;
/// Font family for all text output.
pub const FONT: &str = "Arial";

/// Which of the two markup variants an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvgVariant {
    /// Editable rendering with interaction affordances.
    Full,
    /// Minified export rendering, geometry only.
    Mini,
}

/// Rendered markup in both variants, with the tracked bounding box.
#[derive(Debug, Clone)]
pub struct Svg {
    pub element_full: String,
    pub element_mini: String,
    pub id: String,
    pub min_max: MinMax,
}

impl Svg {
    /// Wraps one variant in a tag. A bare `g` automatically carries the id.
    #[must_use]
    pub fn wrap(mut self, variant: SvgVariant, el: &str, attrs: &[(&str, String)]) -> Self {
        let mut open = format!("<{el}");
        if el == "g" && attrs.is_empty() {
            write!(open, " id='{}'", self.id).unwrap_or_default();
        }
        for (key, value) in attrs {
            write!(open, " {key}='{value}'").unwrap_or_default();
        }
        open.push('>');
        let target = match variant {
            SvgVariant::Full => &mut self.element_full,
            SvgVariant::Mini => &mut self.element_mini,
        };
        *target = format!("{open}{target}</{el}>");
        self
    }
}

// ── Styles ──────────────────────────────────────────────────────

fn base_rules(consts: &Consts) -> String {
    let w = format!("{:.2}", consts.bond_width);
    [
        format!("path{{stroke:black;stroke-width:{w};fill:none;}}"),
        "path.wedge{fill:black;}".to_owned(),
        "path.arrow{fill:black;}".to_owned(),
        "path.arrow-eq{fill:none;}".to_owned(),
        format!("circle.arom{{stroke:black;stroke-width:{w};fill:none;}}"),
        format!("circle.tr-arom{{stroke:black;stroke-width:{w};fill:none;}}"),
        format!("text{{font-family:{FONT};cursor:default;font-size:{FONT_SIZE}px;}}"),
        format!("tspan.sub{{font-size:{SUB_FONT_SIZE}px;}}"),
        format!("text.text-area{{font-family:{FONT};cursor:default;font-size:{TEXT_AREA_FONT_SIZE}px;}}"),
        format!("tspan.text-area-sub{{font-size:{TEXT_AREA_SUB_FONT_SIZE}px;}}"),
    ]
    .concat()
}

fn expanded_rules(consts: &Consts) -> String {
    let w = format!("{:.2}", consts.bond_width);
    [
        "circle.atom:hover{opacity:0.3;}".to_owned(),
        format!("circle.arom:hover{{opacity:0.3;stroke:black;stroke-width:{w};fill:black;}}"),
        "rect.focus{opacity:0;stroke:black;}".to_owned(),
        "rect.focus:hover{opacity:0.3;}".to_owned(),
        "text.edit:hover{opacity:0.3;}".to_owned(),
        format!("circle.atom{{opacity:0;stroke:black;stroke-width:{w};}}"),
        "circle.edit{stroke:black;fill:none;}".to_owned(),
        "circle.label{opacity:0;}".to_owned(),
        "rect.selection{stroke:black;stroke-dasharray:10 5;fill:none;}".to_owned(),
    ]
    .concat()
}

/// The `<style>` block for export output: just what the molecule needs.
#[must_use]
pub fn style_base(consts: &Consts) -> String {
    format!("<style type=\"text/css\">{}</style>", base_rules(consts))
}

/// The `<style>` block for the editable output: base rules plus hover and
/// focus affordances.
#[must_use]
pub fn style_expanded(consts: &Consts) -> String {
    format!(
        "<style type=\"text/css\">{}{}</style>",
        base_rules(consts),
        expanded_rules(consts)
    )
}

// ── Fragments ───────────────────────────────────────────────────

struct CircleFragment {
    selected: bool,
    has_label: bool,
    orphan: bool,
    cx: f64,
    cy: f64,
    r: f64,
}

struct LabelFragment {
    text: String,
    anchor: LabelAnchor,
    label_x: f64,
    label_y: f64,
    atom_x: f64,
    atom_y: f64,
}

struct TextFragment {
    x: f64,
    y: f64,
    text: String,
}

struct Collected {
    paths: Vec<PathData>,
    circles: Vec<CircleFragment>,
    labels: Vec<LabelFragment>,
    rects: Vec<RectData>,
    focus: Vec<FocusData>,
    texts: Vec<TextFragment>,
    min_max: MinMax,
}

struct Collector<'a> {
    structure: &'a Structure,
    consts: &'a Consts,
    out: Collected,
}

impl<'a> Collector<'a> {
    fn new(structure: &'a Structure, consts: &'a Consts) -> Self {
        let mut min_max = MinMax::default();
        min_max.update(structure.origin);
        Self {
            structure,
            consts,
            out: Collected {
                paths: Vec::new(),
                circles: Vec::new(),
                labels: Vec::new(),
                rects: Vec::new(),
                focus: Vec::new(),
                texts: Vec::new(),
                min_max,
            },
        }
    }

    fn run(mut self) -> Collected {
        let structure = self.structure;
        let origin = structure.origin;
        for member in &structure.members {
            match member {
                Member::Selection(selection) => {
                    let abs_start = origin.add(selection.origin);
                    self.out.rects.push(path::calc_rect(abs_start, selection.current));
                }
                Member::Atom(atom) => {
                    let abs = origin.add(atom.coords);
                    self.push_label(abs, atom);
                    self.out.min_max.update(abs);
                    self.push_circle(abs, atom);
                    let push = atom.has_label();
                    self.out.paths.push(PathData::new(vec![PathOp::Move(abs)]));
                    let current = self.out.paths.len() - 1;
                    self.connect(abs, atom, current, push);
                }
                Member::Text(text) => {
                    let abs = origin.add(text.origin);
                    self.out.texts.push(TextFragment { x: abs.x, y: abs.y, text: text.text.clone() });
                    self.out.min_max.update(abs);
                }
                Member::Arrow(arrow) => {
                    let abs_start = origin.add(arrow.origin);
                    let abs_end = origin.add(arrow.end());
                    self.out.min_max.update(abs_start);
                    self.out.min_max.update(abs_end);
                    self.out.focus.push(path::calc_bond_focus(abs_start, abs_end, self.consts));
                    for point in [abs_start, abs_end] {
                        self.out.circles.push(CircleFragment {
                            selected: arrow.selected,
                            has_label: false,
                            orphan: false,
                            cx: point.x,
                            cy: point.y,
                            r: self.consts.circ_r,
                        });
                    }
                    self.out.paths.push(path::calc_arrow(abs_start, abs_end, arrow.kind, self.consts));
                }
            }
        }
        self.out
    }

    fn push_circle(&mut self, abs: Vector, atom: &Atom) {
        self.out.circles.push(CircleFragment {
            selected: atom.selected,
            has_label: atom.has_label(),
            orphan: atom.orphan,
            cx: abs.x,
            cy: abs.y,
            r: self.consts.circ_r,
        });
    }

    /// Walks an atom's bonds, extending the running path for plain single
    /// bonds and splitting off dedicated paths for every other type.
    fn connect(&mut self, prev_abs: Vector, atom: &'a Atom, current: usize, push: bool) {
        for (i, bond) in atom.bonds.iter().enumerate() {
            let abs = prev_abs.add(bond.atom.coords);
            self.out.min_max.update(abs);
            self.out.focus.push(path::calc_bond_focus(prev_abs, abs, self.consts));
            self.push_label(abs, &bond.atom);
            self.push_circle(abs, &bond.atom);
            let continuing = i == 0;
            self.draw_line(prev_abs, abs, bond.kind, &bond.atom, continuing, current, push);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_line(
        &mut self,
        prev_abs: Vector,
        abs: Vector,
        kind: BondType,
        atom: &'a Atom,
        continuing: bool,
        current: usize,
        push: bool,
    ) {
        let norm = abs.subtract(prev_abs).normalized().scale(self.consts.bond_length);
        let push_vector = prev_abs.add(norm.scale(PUSH));
        let new_push_vector = abs.subtract(norm.scale(PUSH));

        // An orphan closes a ring onto a real atom at the same point; the
        // push decision belongs to that atom's label.
        let new_push = if atom.orphan {
            hit::atom_at(self.structure, abs, self.consts)
                .and_then(|found| self.structure.atom(found.atom))
                .is_some_and(Atom::has_label)
        } else {
            atom.has_label()
        };

        let consts = self.consts;
        let mut next_current = current;
        match kind {
            BondType::Single => {
                if continuing {
                    let line = &mut self.out.paths[current];
                    if push {
                        line.ops.push(PathOp::Move(push_vector));
                    }
                    line.ops.push(PathOp::Line(if new_push { new_push_vector } else { abs }));
                } else {
                    let start = if push { push_vector } else { prev_abs };
                    let end = if new_push { new_push_vector } else { abs };
                    self.out.paths.push(PathData::new(vec![PathOp::Move(start), PathOp::Line(end)]));
                    next_current = self.out.paths.len() - 1;
                }
            }
            BondType::Double => {
                self.out.paths.push(path::calc_double_bond(DoublePlacement::Middle, prev_abs, abs, push, new_push, consts));
                next_current = self.begin_at(abs);
            }
            BondType::DoubleLeft => {
                self.out.paths.push(path::calc_double_bond(DoublePlacement::Left, prev_abs, abs, push, new_push, consts));
                next_current = self.begin_at(abs);
            }
            BondType::DoubleRight => {
                self.out.paths.push(path::calc_double_bond(DoublePlacement::Right, prev_abs, abs, push, new_push, consts));
                next_current = self.begin_at(abs);
            }
            BondType::Triple => {
                self.out.paths.push(path::calc_triple_bond(prev_abs, abs, push, new_push, consts));
                next_current = self.begin_at(abs);
            }
            BondType::Wedge => {
                self.out.paths.push(path::calc_wedge_bond(prev_abs, abs, push, new_push, false, consts));
                next_current = self.begin_at(abs);
            }
            BondType::WedgeInverted => {
                self.out.paths.push(path::calc_wedge_bond(prev_abs, abs, push, new_push, true, consts));
                next_current = self.begin_at(abs);
            }
            BondType::Dash => {
                self.out.paths.push(path::calc_dash_bond(prev_abs, abs, push, new_push, false, consts));
                next_current = self.begin_at(abs);
            }
            BondType::DashInverted => {
                self.out.paths.push(path::calc_dash_bond(prev_abs, abs, push, new_push, true, consts));
                next_current = self.begin_at(abs);
            }
            BondType::Undefined => {
                self.out.paths.push(path::calc_undefined_bond(prev_abs, abs, push, new_push, consts));
                next_current = self.begin_at(abs);
            }
        }
        self.connect(abs, atom, next_current, new_push);
    }

    fn begin_at(&mut self, abs: Vector) -> usize {
        self.out.paths.push(PathData::new(vec![PathOp::Move(abs)]));
        self.out.paths.len() - 1
    }

    /// Lays out an atom label, appending implicit hydrogens on the side the
    /// anchoring mode dictates.
    fn push_label(&mut self, abs: Vector, atom: &Atom) {
        let Some(label) = &atom.label else { return };
        let bonds_taken: i32 = atom
            .attached
            .incoming
            .iter()
            .chain(atom.attached.outgoing.iter())
            .map(|bond| i32::from(bond.multiplicity))
            .sum();
        let remaining = i32::from(label.max_bonds) - bonds_taken;
        let hydrogens = remaining.max(0);

        let text = if hydrogens > 0 {
            match label.anchor {
                LabelAnchor::Rl if hydrogens == 1 => format!("H{}", label.text),
                LabelAnchor::Rl => format!("H{hydrogens}{}", label.text),
                LabelAnchor::Lr if hydrogens == 1 => format!("{}H", label.text),
                LabelAnchor::Lr => format!("{}H{hydrogens}", label.text),
            }
        } else {
            match label.anchor {
                LabelAnchor::Rl => geometry::invert_group(&label.text),
                LabelAnchor::Lr => label.text.clone(),
            }
        };

        // Bare iodine is narrow; nudge it less than other symbols.
        let correct_x = match label.anchor {
            LabelAnchor::Rl => {
                if text == "I" { 0.07 } else { 0.2 }
            }
            LabelAnchor::Lr => {
                if text == "I" { -0.07 } else { -0.2 }
            }
        };
        let correct_y = 0.09;

        self.out.labels.push(LabelFragment {
            text,
            anchor: label.anchor,
            label_x: abs.x + correct_x * self.consts.bond_length,
            label_y: abs.y + correct_y * self.consts.bond_length,
            atom_x: abs.x,
            atom_y: abs.y,
        });
    }
}

// ── Markup generation ───────────────────────────────────────────

fn gen_rects(rects: &[RectData], full: &mut String, mini: &mut String) {
    for rect in rects {
        let aux = format!(
            "<rect class='{}' x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}'></rect>",
            rect.class, rect.x, rect.y, rect.width, rect.height
        );
        full.push_str(&aux);
        mini.push_str(&aux);
    }
}

fn gen_paths(paths: &[PathData], full: &mut String, mini: &mut String) {
    for path in paths {
        // A path that never grew past its starting move draws nothing.
        if path.ops.len() < 2 {
            continue;
        }
        let aux = match path.class {
            Some(class) => format!("<path class='{}' d='{}'></path>", class, path.to_attribute()),
            None => format!("<path d='{}'></path>", path.to_attribute()),
        };
        full.push_str(&aux);
        mini.push_str(&aux);
    }
}

fn gen_focus(focus: &[FocusData], consts: &Consts, full: &mut String) {
    let corner = 0.1 * consts.bond_length;
    for data in focus {
        let aux = format!(
            "<rect class='focus' x='{:.2}' y='{:.2}' rx='{corner:.2}' ry='{corner:.2}' width='{:.2}' height='{:.2}' transform='rotate({:.2}, {:.2}, {:.2})'></rect>",
            data.start.x, data.start.y, data.width, data.height, data.rotate, data.start.x, data.start.y
        );
        full.push_str(&aux);
    }
}

fn gen_circles(circles: &[CircleFragment], full: &mut String) {
    for circle in circles {
        if circle.orphan {
            continue;
        }
        let class = if circle.has_label {
            "label"
        } else if circle.selected {
            "edit"
        } else {
            "atom"
        };
        let aux = format!(
            "<circle class='{}' cx='{:.2}' cy='{:.2}' r='{:.2}'></circle>",
            class, circle.cx, circle.cy, circle.r
        );
        full.push_str(&aux);
    }
}

fn gen_labels(labels: &[LabelFragment], full: &mut String, mini: &mut String) {
    for label in labels {
        full.push_str(&gen_label_text("edit", label));
        mini.push_str(&gen_label_text("tr", label));
    }
}

fn gen_label_text(class: &str, label: &LabelFragment) -> String {
    let anchor = match label.anchor {
        LabelAnchor::Rl => "end",
        LabelAnchor::Lr => "start",
    };
    format!(
        "<text class='{class}' dy='0.2125em' x='{:.2}' y='{:.2}' atomx='{:.2}' atomy='{:.2}' text-anchor='{anchor}'>{}</text>",
        label.label_x,
        label.label_y,
        label.atom_x,
        label.atom_y,
        gen_label_tspans(&label.text)
    )
}

/// Digits in a chemical formula render as subscripts; the character after a
/// subscript run pops back up to the baseline.
fn gen_label_tspans(name: &str) -> String {
    let shift = FONT_SIZE * 0.25;
    let mut out = String::new();
    let mut preceded = false;
    for ch in name.chars() {
        if ch.is_ascii_digit() {
            write!(out, "<tspan class='sub' dy='{shift}'>{ch}</tspan>").unwrap_or_default();
            preceded = true;
        } else if preceded {
            write!(out, "<tspan dy='-{shift}'>{ch}</tspan>").unwrap_or_default();
            preceded = false;
        } else {
            write!(out, "<tspan>{ch}</tspan>").unwrap_or_default();
        }
    }
    out
}

fn gen_text_areas(texts: &[TextFragment], full: &mut String, mini: &mut String) {
    for text in texts {
        let aux = format!(
            "<text class='text-area' dy='0.2125em' x='{:.2}' y='{:.2}' textarea='true' text-anchor='lr'>{}</text>",
            text.x,
            text.y,
            gen_text_area_tspans(&text.text)
        );
        full.push_str(&aux);
        mini.push_str(&aux);
    }
}

/// Subscript runs in free text are delimited by a `_{...}` escape.
fn gen_text_area_tspans(text: &str) -> String {
    let shift = TEXT_AREA_FONT_SIZE * 0.25;
    let mut out = String::new();
    let mut preceded = false;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '_' && chars.peek() == Some(&'{') {
            chars.next();
            let mut sub = String::new();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                sub.push(c);
            }
            write!(out, "<tspan class='text-area-sub' dy='{shift}'>{sub}</tspan>").unwrap_or_default();
            preceded = true;
        } else if preceded {
            write!(out, "<tspan dy='-{shift}'>{ch}</tspan>").unwrap_or_default();
            preceded = false;
        } else {
            write!(out, "<tspan>{ch}</tspan>").unwrap_or_default();
        }
    }
    out
}

fn gen_aromatics(structure: &Structure, consts: &Consts, full: &mut String, mini: &mut String) {
    for mark in &structure.aromatics {
        full.push_str(&gen_aromatic_circle(mark.center, consts, "arom"));
        mini.push_str(&gen_aromatic_circle(mark.center, consts, "tr-arom"));
    }
}

fn gen_aromatic_circle(center: Vector, consts: &Consts, class: &str) -> String {
    format!(
        "<circle class='{class}' cx='{:.2}' cy='{:.2}' r='{:.2}'></circle>",
        center.x, center.y, consts.aromatic_r
    )
}

/// Renders a structure into both markup variants.
#[must_use]
pub fn draw(structure: &Structure, id: &str, consts: &Consts) -> Svg {
    let collected = Collector::new(structure, consts).run();

    let mut full = String::new();
    let mut mini = String::new();
    gen_rects(&collected.rects, &mut full, &mut mini);
    gen_paths(&collected.paths, &mut full, &mut mini);
    gen_focus(&collected.focus, consts, &mut full);
    gen_circles(&collected.circles, &mut full);
    gen_labels(&collected.labels, &mut full, &mut mini);
    gen_text_areas(&collected.texts, &mut full, &mut mini);
    if structure.aromatic {
        gen_aromatics(structure, consts, &mut full, &mut mini);
    }

    Svg {
        element_full: format!("{}{}", style_expanded(consts), full),
        element_mini: format!("{}{}", style_base(consts), mini),
        id: id.to_owned(),
        min_max: collected.min_max,
    }
}
