//! The 3D conformal geometric algebra
//!
//! The two extra dimensions are the null pair `no` (the origin) and `ni`
//! (the point at infinity), with `no · ni = -1`.

use crate::{
    algebra::Metric,
    engine::{entity_struct, impl_entity, Convert, Numeric},
    symbolic::{Element, Multivector, Rational},
};

crate::define_algebra!(
    /// Conformal model of 3D euclidean space
    pub Cga => Metric::conformal(3)
);

pub const E1: Element = 0b00001;
pub const E2: Element = 0b00010;
pub const E3: Element = 0b00100;
pub const NO: Element = 0b01000;
pub const NI: Element = 0b10000;

/// The origin
pub fn e_o() -> Multivector<Cga> {
    Multivector::e(NO)
}

/// The point at infinity
pub fn e_inf() -> Multivector<Cga> {
    Multivector::e(NI)
}

entity_struct!(
    /// Euclidean point, encoded as the null vector
    /// `x e1 + y e2 + z e3 + no + (x² + y² + z²)/2 ni`
    Point { x, y, z }
);

impl_entity!(Cga, Point, |x, y, z| {
    let half_norm_sq = (&x * &x + &y * &y + &z * &z) * Rational::ONE_HALF;
    x * Multivector::e(E1) + y * Multivector::e(E2) + z * Multivector::e(E3)
        + e_o()
        + half_norm_sq * e_inf()
});

/// Points are normalized by their `no` weight
impl Convert<Cga> for Point {
    fn convert(mv: Numeric<Cga>) -> Self {
        let w = mv.get(NO);
        Point::new(mv.get(E1) / w, mv.get(E2) / w, mv.get(E3) / w)
    }
}
