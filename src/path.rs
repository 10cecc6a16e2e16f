//! SVG path data for bonds, arrows, and the editor rectangles.
//!
//! Everything here is deterministic geometry: given two absolute endpoints
//! and a type, produce the ordered path commands that draw it. Push flags
//! shorten a bond at the labeled end so the line stops outside the label
//! glyph instead of stabbing through it; both ends carry their own flag.
//! All sizes are proportional to the configured bond length.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use crate::consts::{
    ARROW_SIZE, ARROW_START, BETWEEN_DBL_BONDS, BETWEEN_TRP_BONDS, BOND_FOCUS, Consts,
    DBL_BOND_CORR, PUSH, UNDEF_BOND,
};
use crate::doc::ArrowType;
use crate::geometry::{self, Quadrant, Vector};

/// One SVG path command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    Move(Vector),
    Line(Vector),
    /// Cubic Bezier: two control points, then the segment end.
    Cubic(Vector, Vector, Vector),
    /// Smooth continuation: second control point and the segment end.
    Smooth(Vector, Vector),
    Close,
}

/// An ordered command list plus the style class it renders under.
#[derive(Debug, Clone)]
pub struct PathData {
    pub class: Option<&'static str>,
    pub ops: Vec<PathOp>,
}

impl PathData {
    #[must_use]
    pub fn new(ops: Vec<PathOp>) -> Self {
        Self { class: None, ops }
    }

    #[must_use]
    pub fn with_class(class: &'static str, ops: Vec<PathOp>) -> Self {
        Self { class: Some(class), ops }
    }

    /// Serializes to the `d` attribute, coordinates at two decimals.
    #[must_use]
    pub fn to_attribute(&self) -> String {
        let mut out = String::new();
        for op in &self.ops {
            match op {
                PathOp::Move(p) => {
                    out.push_str(&format!("M {:.2} {:.2} ", p.x, p.y));
                }
                PathOp::Line(p) => {
                    out.push_str(&format!("L {:.2} {:.2} ", p.x, p.y));
                }
                PathOp::Cubic(c1, c2, end) => {
                    out.push_str(&format!(
                        "C {:.2} {:.2} , {:.2} {:.2} , {:.2} {:.2} ",
                        c1.x, c1.y, c2.x, c2.y, end.x, end.y
                    ));
                }
                PathOp::Smooth(c2, end) => {
                    out.push_str(&format!("S {:.2} {:.2} , {:.2} {:.2} ", c2.x, c2.y, end.x, end.y));
                }
                PathOp::Close => out.push_str("Z "),
            }
        }
        out.trim_end().to_owned()
    }
}

/// Placement of a double bond's second line relative to the main line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoublePlacement {
    /// Two lines straddling the true bond position.
    Middle,
    /// Second line on the counter-clockwise side (ring interior).
    Left,
    /// Second line on the clockwise side.
    Right,
}

/// A plain rectangle fragment (the selection marquee).
#[derive(Debug, Clone, Copy)]
pub struct RectData {
    pub class: &'static str,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Geometry of the invisible hover rectangle laid over a bond or arrow.
#[derive(Debug, Clone, Copy)]
pub struct FocusData {
    /// Top-left corner before rotation.
    pub start: Vector,
    /// Rotation around `start`, in degrees.
    pub rotate: f64,
    pub width: f64,
    pub height: f64,
}

// ── Arrows ──────────────────────────────────────────────────────

/// Path for a reaction arrow between two absolute points.
#[must_use]
pub fn calc_arrow(start: Vector, end: Vector, kind: ArrowType, consts: &Consts) -> PathData {
    let vect = end.subtract(start);
    let norm = vect.normalized().scale(consts.bond_length);
    let arrow_start = norm.scale(1.0 - ARROW_START);
    let perp_ccw = norm.perpendicular_ccw();
    let perp_cw = norm.perpendicular_cw();

    match kind {
        ArrowType::OneWayArrow => {
            let marker = end.subtract(arrow_start);
            let l1 = marker.add_scaled(perp_cw, ARROW_SIZE);
            let l2 = marker.add_scaled(perp_ccw, ARROW_SIZE);
            PathData::with_class(
                "arrow",
                vec![
                    PathOp::Move(start),
                    PathOp::Line(end),
                    PathOp::Move(marker),
                    PathOp::Line(l1),
                    PathOp::Line(end),
                    PathOp::Line(l2),
                    PathOp::Close,
                ],
            )
        }
        ArrowType::TwoWayArrow => {
            let end_marker = end.subtract(arrow_start);
            let start_marker = start.add(arrow_start);
            let l1 = end_marker.add_scaled(perp_cw, ARROW_SIZE);
            let l2 = end_marker.add_scaled(perp_ccw, ARROW_SIZE);
            let l3 = start_marker.add_scaled(perp_cw, ARROW_SIZE);
            let l4 = start_marker.add_scaled(perp_ccw, ARROW_SIZE);
            PathData::with_class(
                "arrow",
                vec![
                    PathOp::Move(start),
                    PathOp::Line(end),
                    PathOp::Move(end_marker),
                    PathOp::Line(l1),
                    PathOp::Line(end),
                    PathOp::Line(l2),
                    PathOp::Close,
                    PathOp::Move(start_marker),
                    PathOp::Line(l3),
                    PathOp::Line(start),
                    PathOp::Line(l4),
                    PathOp::Close,
                ],
            )
        }
        ArrowType::EquilibriumArrow => {
            let m1 = start.add_scaled(perp_cw, BETWEEN_DBL_BONDS);
            let l1 = end.add_scaled(perp_cw, BETWEEN_DBL_BONDS);
            let end_marker = l1.subtract(arrow_start);
            let l2 = end_marker.add_scaled(perp_cw, ARROW_SIZE);
            let m2 = end.add_scaled(perp_ccw, BETWEEN_DBL_BONDS);
            let l3 = start.add_scaled(perp_ccw, BETWEEN_DBL_BONDS);
            let start_marker = l3.add(arrow_start);
            let l4 = start_marker.add_scaled(perp_ccw, ARROW_SIZE);
            PathData::with_class(
                "arrow-eq",
                vec![
                    PathOp::Move(m1),
                    PathOp::Line(l1),
                    PathOp::Line(l2),
                    PathOp::Move(m2),
                    PathOp::Line(l3),
                    PathOp::Line(l4),
                ],
            )
        }
    }
}

// ── Bonds ───────────────────────────────────────────────────────

/// Two parallel lines for a double bond. Left/right placements keep the main
/// line at the true position, move the second line fully to one side, and
/// shorten it so it does not overshoot the ring vertices.
#[must_use]
pub fn calc_double_bond(
    placement: DoublePlacement,
    start: Vector,
    end: Vector,
    push: bool,
    new_push: bool,
    consts: &Consts,
) -> PathData {
    let vect = end.subtract(start).normalized().scale(consts.bond_length);
    let aux = vect.scale(PUSH);
    let perp_ccw = vect.perpendicular_ccw();
    let perp_cw = vect.perpendicular_cw();

    let mut m1 = start.add_scaled(perp_ccw, BETWEEN_DBL_BONDS);
    let mut l1 = end.add_scaled(perp_ccw, BETWEEN_DBL_BONDS);
    let mut m2 = start.add_scaled(perp_cw, BETWEEN_DBL_BONDS);
    let mut l2 = end.add_scaled(perp_cw, BETWEEN_DBL_BONDS);

    match placement {
        DoublePlacement::Right => {
            m2 = start.add_scaled(perp_cw, 2.0 * BETWEEN_DBL_BONDS);
            l2 = end.add_scaled(perp_cw, 2.0 * BETWEEN_DBL_BONDS);
        }
        DoublePlacement::Left => {
            m2 = start.add_scaled(perp_ccw, 2.0 * BETWEEN_DBL_BONDS);
            l2 = end.add_scaled(perp_ccw, 2.0 * BETWEEN_DBL_BONDS);
        }
        DoublePlacement::Middle => {}
    }

    let mut corr = Vector::zero();
    if placement != DoublePlacement::Middle {
        m1 = start;
        l1 = end;
        corr = l2.subtract(m2).scale(DBL_BOND_CORR);
        m2 = m2.add(corr);
        l2 = l2.subtract(corr);
    }

    if push {
        if placement == DoublePlacement::Middle {
            m1 = m1.add(aux);
            m2 = m2.add(aux);
        } else {
            m1 = m1.add(aux);
            m2 = m2.add(corr.scale(1.5));
        }
    }
    if new_push {
        if placement == DoublePlacement::Middle {
            l1 = l1.subtract(aux);
            l2 = l2.subtract(aux);
        } else {
            l1 = l1.subtract(aux);
            l2 = l2.subtract(corr.scale(1.5));
        }
    }

    PathData::new(vec![PathOp::Move(m1), PathOp::Line(l1), PathOp::Move(m2), PathOp::Line(l2)])
}

/// Three parallel lines for a triple bond, center one at the true position.
#[must_use]
pub fn calc_triple_bond(start: Vector, end: Vector, push: bool, new_push: bool, consts: &Consts) -> PathData {
    let vect = end.subtract(start).normalized().scale(consts.bond_length);
    let aux = vect.scale(PUSH);
    let perp_ccw = vect.perpendicular_ccw();
    let perp_cw = vect.perpendicular_cw();

    let mut m1 = start.add_scaled(perp_ccw, BETWEEN_TRP_BONDS);
    let mut l1 = end.add_scaled(perp_ccw, BETWEEN_TRP_BONDS);
    let mut m2 = start.add_scaled(perp_cw, BETWEEN_TRP_BONDS);
    let mut l2 = end.add_scaled(perp_cw, BETWEEN_TRP_BONDS);
    let mut center_start = start;
    let mut center_end = end;

    if push {
        m1 = m1.add(aux);
        m2 = m2.add(aux);
        center_start = center_start.add(aux);
    }
    if new_push {
        l1 = l1.subtract(aux);
        l2 = l2.subtract(aux);
        center_end = center_end.subtract(aux);
    }

    PathData::new(vec![
        PathOp::Move(m1),
        PathOp::Line(l1),
        PathOp::Move(center_start),
        PathOp::Line(center_end),
        PathOp::Move(m2),
        PathOp::Line(l2),
    ])
}

/// A filled triangle for a wedge bond: point at the start, base spread at
/// the end. Inverted swaps which end carries the base.
#[must_use]
pub fn calc_wedge_bond(
    start: Vector,
    end: Vector,
    push: bool,
    new_push: bool,
    inverted: bool,
    consts: &Consts,
) -> PathData {
    let vect = end.subtract(start).normalized().scale(consts.bond_length);
    let aux = vect.scale(PUSH);
    let perp_ccw = vect.perpendicular_ccw();
    let perp_cw = vect.perpendicular_cw();

    let mut start = start;
    let mut end = end;
    let mut l1 = end.add_scaled(perp_ccw, BETWEEN_DBL_BONDS);
    let mut l1_inv = start.add_scaled(perp_ccw, BETWEEN_DBL_BONDS);
    let mut l2 = end.add_scaled(perp_cw, BETWEEN_DBL_BONDS);
    let mut l2_inv = start.add_scaled(perp_cw, BETWEEN_DBL_BONDS);

    if push {
        start = start.add(aux);
        l1_inv = start.add_scaled(perp_ccw, BETWEEN_DBL_BONDS);
        l2_inv = start.add_scaled(perp_cw, BETWEEN_DBL_BONDS);
    }
    if new_push {
        end = end.subtract(aux);
        l1 = end.add_scaled(perp_ccw, BETWEEN_DBL_BONDS);
        l2 = end.add_scaled(perp_cw, BETWEEN_DBL_BONDS);
    }

    let ops = if inverted {
        vec![PathOp::Move(l1_inv), PathOp::Line(l2_inv), PathOp::Line(end), PathOp::Close]
    } else {
        vec![PathOp::Move(start), PathOp::Line(l1), PathOp::Line(l2), PathOp::Close]
    };
    PathData::with_class("wedge", ops)
}

/// A ladder of short perpendicular rungs for a dash bond, widths growing
/// linearly toward the far end (or shrinking, when inverted). Rung count is
/// derived from the length so dash density stays constant.
#[must_use]
pub fn calc_dash_bond(
    start: Vector,
    end: Vector,
    push: bool,
    new_push: bool,
    inverted: bool,
    consts: &Consts,
) -> PathData {
    let mut vect = end.subtract(start);
    let norm = vect.normalized().scale(consts.bond_length);
    let perp_ccw = norm.perpendicular_ccw();
    let perp_cw = norm.perpendicular_cw();
    let aux = norm.scale(PUSH);

    let max_init = 10.0 * vect.length() / consts.bond_length;
    let mut max = max_init;
    let mut factor = BETWEEN_DBL_BONDS / max;
    let mut factor_inv = BETWEEN_DBL_BONDS;
    let mut current_end = start;

    if push {
        current_end = start.add(aux);
        vect = vect.subtract(aux);
        max -= 0.2 * max_init;
    }
    if new_push {
        vect = vect.subtract(aux);
        max -= 0.2 * max_init;
    }

    let mut ops = vec![
        PathOp::Move(current_end.add_scaled(perp_ccw, factor)),
        PathOp::Line(current_end.add_scaled(perp_cw, factor)),
    ];
    let mut ops_inv = vec![
        PathOp::Move(current_end.add_scaled(perp_ccw, factor_inv)),
        PathOp::Line(current_end.add_scaled(perp_cw, factor_inv)),
    ];

    let max = max.round();
    let count = max as i64;
    for _ in 0..count.max(0) {
        factor += BETWEEN_DBL_BONDS / max;
        factor_inv -= BETWEEN_DBL_BONDS / max;
        current_end = current_end.add_scaled(vect, 1.0 / max);
        ops.push(PathOp::Move(current_end.add_scaled(perp_ccw, factor)));
        ops.push(PathOp::Line(current_end.add_scaled(perp_cw, factor)));
        ops_inv.push(PathOp::Move(current_end.add_scaled(perp_ccw, factor_inv)));
        ops_inv.push(PathOp::Line(current_end.add_scaled(perp_cw, factor_inv)));
    }

    PathData::new(if inverted { ops_inv } else { ops })
}

/// A continuous wavy line for an undefined bond: alternating-curvature cubic
/// segments, count forced even so the wave stays symmetric.
#[must_use]
pub fn calc_undefined_bond(start: Vector, end: Vector, push: bool, new_push: bool, consts: &Consts) -> PathData {
    let mut start = start;
    let mut vect = end.subtract(start);
    let norm = vect.normalized().scale(consts.bond_length);
    let perp_ccw = norm.perpendicular_ccw();
    let perp_cw = norm.perpendicular_cw();
    let aux = norm.scale(PUSH);

    let mut max_init = (10.0 * vect.length() / consts.bond_length).round();
    if max_init % 2.0 != 0.0 {
        max_init += 1.0;
    }
    let mut max = max_init;
    let mut sub_end = start.add_scaled(vect, 1.0 / max);
    let mut c1 = start.add_scaled(perp_cw, UNDEF_BOND);
    let mut c2 = sub_end.add_scaled(perp_cw, UNDEF_BOND);

    if push {
        start = start.add(aux);
        vect = vect.subtract(aux);
        max -= 0.2 * max_init;
        if max % 2.0 != 0.0 {
            max += 1.0;
        }
        sub_end = start.add_scaled(vect, 1.0 / max);
        c1 = start.add_scaled(perp_cw, UNDEF_BOND);
        c2 = sub_end.add_scaled(perp_cw, UNDEF_BOND);
    }
    if new_push {
        vect = vect.subtract(aux);
        max -= 0.2 * max_init;
        if max % 2.0 != 0.0 {
            max += 1.0;
        }
        sub_end = start.add_scaled(vect, 1.0 / max);
        c1 = start.add_scaled(perp_cw, UNDEF_BOND);
        c2 = sub_end.add_scaled(perp_cw, UNDEF_BOND);
    }

    let mut ops = vec![PathOp::Move(start), PathOp::Cubic(c1, c2, sub_end)];

    let max = max.round();
    let count = max as i64;
    let mut i = count - 1;
    while i > 0 {
        sub_end = sub_end.add_scaled(vect, 1.0 / max);
        let c2 = if i % 2 == 0 {
            sub_end.add_scaled(perp_cw, UNDEF_BOND)
        } else {
            sub_end.add_scaled(perp_ccw, UNDEF_BOND)
        };
        ops.push(PathOp::Smooth(c2, sub_end));
        i -= 1;
    }

    PathData::new(ops)
}

// ── Rectangles ──────────────────────────────────────────────────

/// The selection marquee rectangle between the drag's two corners,
/// normalized by quadrant so width and height stay non-negative.
#[must_use]
pub fn calc_rect(start: Vector, end: Vector) -> RectData {
    let (x, y, width, height) = match geometry::quadrant(start, end) {
        Quadrant::First => (start.x, end.y, end.x - start.x, start.y - end.y),
        Quadrant::Second => (end.x, end.y, start.x - end.x, start.y - end.y),
        Quadrant::Third => (end.x, start.y, start.x - end.x, end.y - start.y),
        Quadrant::Fourth => (start.x, start.y, end.x - start.x, end.y - start.y),
    };
    RectData {
        class: "selection",
        x,
        y,
        width: width.max(0.0),
        height: height.max(0.0),
    }
}

/// The invisible hover rectangle over a bond or arrow, as a corner plus a
/// rotation so the rect follows the edge at any angle.
#[must_use]
pub fn calc_bond_focus(prev_abs: Vector, abs: Vector, consts: &Consts) -> FocusData {
    let vect = abs.subtract(prev_abs);
    let norm = vect.normalized().scale(consts.bond_length);
    let perp_cw = norm.perpendicular_cw();
    FocusData {
        start: prev_abs.add_scaled(perp_cw, BOND_FOCUS),
        rotate: -geometry::angle_between(norm, Vector::new(1.0, 0.0)),
        height: norm.scale(BOND_FOCUS * 2.0).length(),
        width: vect.length(),
    }
}
