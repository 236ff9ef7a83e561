//! The 2D projective geometric algebra
//!
//! `e0` (the first base vector) is the degenerate one. Points are bivectors
//! and lines are vectors: the outer product of two lines is their meeting
//! point, and the regressive product (`&`) of two points is the line joining
//! them.

use crate::{
    algebra::Metric,
    engine::{entity_struct, impl_entity, Convert, Numeric},
    symbolic::{Element, Multivector, Rational},
};

crate::define_algebra!(
    /// Planar projective space: `e0² = 0`, `e1² = e2² = 1`
    pub Pga2 => Metric::projective(2)
);

pub const E0: Element = 0b001;
pub const E1: Element = 0b010;
pub const E2: Element = 0b100;
pub const E01: Element = E0 | E1;
pub const E02: Element = E0 | E2;
pub const E12: Element = E1 | E2;

fn e(element: Element) -> Multivector<Pga2> {
    Multivector::e(element)
}

entity_struct!(
    /// Euclidean point, encoded as `y e01 - x e02 + e12`
    Point { x, y }
);

impl_entity!(Pga2, Point, |x, y| y * e(E01) - x * e(E02) + e(E12));

/// Points are normalized by their `e12` weight. A point at infinity yields
/// infinite or NaN coordinates
impl Convert<Pga2> for Point {
    fn convert(mv: Numeric<Pga2>) -> Self {
        let w = mv.get(E12);
        Point::new(-mv.get(E02) / w, mv.get(E01) / w)
    }
}

entity_struct!(
    /// The line `a x + b y + c = 0`, encoded as `c e0 + a e1 + b e2`
    Line { a, b, c }
);

impl_entity!(Pga2, Line, |a, b, c| c * e(E0) + a * e(E1) + b * e(E2));

impl Convert<Pga2> for Line {
    fn convert(mv: Numeric<Pga2>) -> Self {
        Line::new(mv.get(E1), mv.get(E2), mv.get(E0))
    }
}

entity_struct!(
    /// Point at infinity in the direction `(x, y)`: `y e01 - x e02`
    Direction { x, y }
);

impl_entity!(Pga2, Direction, |x, y| y * e(E01) - x * e(E02));

impl Convert<Pga2> for Direction {
    fn convert(mv: Numeric<Pga2>) -> Self {
        Direction::new(-mv.get(E02), mv.get(E01))
    }
}

/// A point with known coordinates, as a symbolic constant
pub fn point(x: impl Into<Rational>, y: impl Into<Rational>) -> Multivector<Pga2> {
    let (x, y): (Rational, Rational) = (x.into(), y.into());
    y * e(E01) - x * e(E02) + e(E12)
}

/// A line with known coefficients, as a symbolic constant
pub fn line(
    a: impl Into<Rational>,
    b: impl Into<Rational>,
    c: impl Into<Rational>,
) -> Multivector<Pga2> {
    let (a, b, c): (Rational, Rational, Rational) = (a.into(), b.into(), c.into());
    c * e(E0) + a * e(E1) + b * e(E2)
}

/// A direction with known coordinates, as a symbolic constant
pub fn direction(x: impl Into<Rational>, y: impl Into<Rational>) -> Multivector<Pga2> {
    let (x, y): (Rational, Rational) = (x.into(), y.into());
    y * e(E01) - x * e(E02)
}

/// The coordinates of a constant point. `None` if some coefficient depends
/// on the inputs or if the point is at infinity
pub fn cartesian_point(mv: &Multivector<Pga2>) -> Option<(Rational, Rational)> {
    let w = mv.constant_coeff(E12)?;
    if w.is_zero() {
        return None;
    }
    let x = -mv.constant_coeff(E02)? / w;
    let y = mv.constant_coeff(E01)? / w;
    Some((x, y))
}

/// The slope `-a / b` of a constant line. `None` for vertical lines
pub fn line_slope(mv: &Multivector<Pga2>) -> Option<Rational> {
    let b = mv.constant_coeff(E2)?;
    if b.is_zero() {
        return None;
    }
    Some(-mv.constant_coeff(E1)? / b)
}
