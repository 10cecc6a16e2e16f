//! Pure 2D vector math for the drawing plane.
//!
//! The coordinate system matches the SVG viewport: x grows right, y grows
//! *down*, angles are in degrees, and "clockwise" is what a viewer sees on
//! screen. Every position and direction in the crate is a [`Vector`].
//!
//! Equality is never exact. Repeated rotations accumulate floating-point
//! drift, so all collision and duplicate detection goes through
//! [`compare_vectors`] / [`compare_floats`], which round both operands to a
//! fixed number of decimal places first.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point or direction on the drawing plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

/// Quadrant of a drag vector, counted as on a clock face starting upper-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// dx > 0, dy < 0 (up-right on screen).
    First,
    /// dx < 0, dy < 0 (up-left).
    Second,
    /// dx < 0, dy > 0 (down-left).
    Third,
    /// Everything else, including degenerate zero-length drags.
    Fourth,
}

impl Vector {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The zero vector.
    #[must_use]
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self { x: self.x + other.x, y: self.y + other.y }
    }

    /// `self + factor * other`, the offset-along-a-direction workhorse.
    #[must_use]
    pub fn add_scaled(self, other: Self, factor: f64) -> Self {
        Self { x: self.x + factor * other.x, y: self.y + factor * other.y }
    }

    #[must_use]
    pub fn subtract(self, other: Self) -> Self {
        Self { x: self.x - other.x, y: self.y - other.y }
    }

    #[must_use]
    pub fn scale(self, scalar: f64) -> Self {
        Self { x: self.x * scalar, y: self.y * scalar }
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[must_use]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        Self { x: self.x / len, y: self.y / len }
    }

    /// Rotates clockwise on screen (y axis pointing down).
    #[must_use]
    pub fn rotate_cw(self, degrees: f64) -> Self {
        let rads = degrees.to_radians();
        Self {
            x: self.x * rads.cos() - self.y * rads.sin(),
            y: self.x * rads.sin() + self.y * rads.cos(),
        }
    }

    /// Rotates counter-clockwise on screen (y axis pointing down).
    #[must_use]
    pub fn rotate_ccw(self, degrees: f64) -> Self {
        let rads = degrees.to_radians();
        Self {
            x: self.x * rads.cos() + self.y * rads.sin(),
            y: self.y * rads.cos() - self.x * rads.sin(),
        }
    }

    /// Perpendicular vector, clockwise side.
    #[must_use]
    pub fn perpendicular_cw(self) -> Self {
        Self { x: self.y, y: -self.x }
    }

    /// Perpendicular vector, counter-clockwise side.
    #[must_use]
    pub fn perpendicular_ccw(self) -> Self {
        Self { x: -self.y, y: self.x }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        self.scale(-1.0)
    }

    /// `|self| / |other|`.
    #[must_use]
    pub fn length_ratio(self, other: Self) -> f64 {
        self.length() / other.length()
    }
}

/// Signed angle in degrees from `v1` to `v2` (east when `v2` is omitted by
/// passing `Vector::new(1.0, 0.0)`), via the atan2 difference.
#[must_use]
pub fn angle_between(v1: Vector, v2: Vector) -> f64 {
    let rads = v2.y.atan2(v2.x) - v1.y.atan2(v1.x);
    rads.to_degrees()
}

/// Compares two floats after rounding each to `precision` decimal places.
///
/// This fixed-decimal rounding (not an epsilon test) is load-bearing: two
/// coordinates count as the same point exactly when they round to the same
/// value, which keeps duplicate detection stable across call sites.
#[must_use]
pub fn compare_floats(a: f64, b: f64, precision: u32) -> bool {
    let scale = 10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    (a * scale).round() == (b * scale).round()
}

/// Compares both components of two vectors at the given decimal precision.
#[must_use]
pub fn compare_vectors(v1: Vector, v2: Vector, precision: u32) -> bool {
    compare_floats(v1.x, v2.x, precision) && compare_floats(v1.y, v2.y, precision)
}

/// Same as [`compare_vectors`] but tolerating absent operands, which hit
/// lookups produce routinely.
#[must_use]
pub fn compare_opt_vectors(v1: Option<Vector>, v2: Option<Vector>, precision: u32) -> bool {
    match (v1, v2) {
        (Some(a), Some(b)) => compare_vectors(a, b, precision),
        _ => false,
    }
}

/// Is `point` within (or on) the circle of radius `r` around `center`?
#[must_use]
pub fn inside_circle(center: Vector, point: Vector, r: f64) -> bool {
    point.subtract(center).length() <= r
}

/// Area of the triangle spanned by three absolute points.
#[must_use]
pub fn triangle_area(p1: Vector, p2: Vector, p3: Vector) -> f64 {
    let x = p1.x * (p2.y - p3.y);
    let y = p2.x * (p3.y - p1.y);
    let z = p3.x * (p1.y - p2.y);
    ((x + y + z) / 2.0).abs()
}

/// Area of the rectangle given by four corner points in order.
#[must_use]
pub fn rect_area(points: &[Vector; 4]) -> f64 {
    let v1 = points[1].subtract(points[0]);
    let v2 = points[2].subtract(points[1]);
    v1.length() * v2.length()
}

/// Is `point` inside the focus rectangle of a bond or arrow?
///
/// The edge runs from `start` along `delta`; the rectangle is centered on the
/// edge with half-width `factor * bond_length`. Membership is decided by the
/// sum-of-triangle-areas test: the four triangles from the point to the
/// corners tile the rectangle exactly (to two decimals) only when the point
/// is inside. This stays robust under rotation with no trigonometric branch
/// cases.
#[must_use]
pub fn inside_focus(start: Vector, delta: Vector, point: Vector, factor: f64, bond_length: f64) -> bool {
    let end = start.add(delta);
    let norm = delta.normalized().scale(bond_length);
    let perp_ccw = norm.perpendicular_ccw();
    let perp_cw = norm.perpendicular_cw();
    let corners = [
        start.add_scaled(perp_ccw, factor),
        start.add_scaled(perp_cw, factor),
        end.add_scaled(perp_cw, factor),
        end.add_scaled(perp_ccw, factor),
    ];

    let mut area = 0.0;
    for i in 0..corners.len() {
        let j = move_to_right(corners.len(), i, 1);
        area += triangle_area(point, corners[i], corners[j]);
    }
    compare_floats(area, rect_area(&corners), 2)
}

/// All rotations of `vector` in `step`-degree increments, one full turn.
#[must_use]
pub fn possible_vectors(vector: Vector, step: f64) -> Vec<Vector> {
    let count = (360.0 / step) as usize;
    let mut result = Vec::with_capacity(count);
    let mut current = vector;
    for _ in 0..count {
        current = current.rotate_cw(step);
        result.push(current);
    }
    result
}

/// Picks the candidate direction closest in angle to the drag `down -> up`.
///
/// Always returns an element of `candidates`; an exact match wins because its
/// angle is zero.
#[must_use]
pub fn closest_vector(down: Vector, up: Vector, candidates: &[Vector]) -> Vector {
    let drag = up.subtract(down);
    let mut min_angle = std::f64::consts::PI;
    let mut min_index = 0;
    for (i, candidate) in candidates.iter().enumerate() {
        let angle = candidate.normalized().dot(drag.normalized()).acos();
        if angle.abs() < min_angle {
            min_angle = angle.abs();
            min_index = i;
        }
    }
    candidates[min_index]
}

/// Which quadrant the `origin -> end` vector falls into.
#[must_use]
pub fn quadrant(origin: Vector, end: Vector) -> Quadrant {
    let x = end.x - origin.x;
    let y = end.y - origin.y;
    if x > 0.0 && y < 0.0 {
        Quadrant::First
    } else if x < 0.0 && y < 0.0 {
        Quadrant::Second
    } else if x < 0.0 && y > 0.0 {
        Quadrant::Third
    } else {
        Quadrant::Fourth
    }
}

/// Moves an index right by `d`, wrapping at `len` so arrays act circular.
#[must_use]
pub fn move_to_right(len: usize, index: usize, d: usize) -> usize {
    (index + d) % len
}

/// Moves an index left by `d`, wrapping below zero so arrays act circular.
#[must_use]
pub fn move_to_left(len: usize, index: usize, d: usize) -> usize {
    (index + len - d % len) % len
}

/// Reverses the token order of a chemical group, e.g. `"OBn"` -> `"BnO"` or
/// `"SCN"` -> `"NCS"`. A token is an uppercase letter plus any following
/// lowercase letters and digits; strings with no such tokens come back as-is.
#[must_use]
pub fn invert_group(group: &str) -> String {
    let mut tokens: Vec<String> = Vec::new();
    for ch in group.chars() {
        if ch.is_ascii_uppercase() || tokens.is_empty() {
            tokens.push(ch.to_string());
        } else if let Some(last) = tokens.last_mut() {
            last.push(ch);
        }
    }
    if tokens.is_empty() {
        return group.to_owned();
    }
    tokens.reverse();
    tokens.concat()
}
