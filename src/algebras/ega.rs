//! The 3D euclidean geometric algebra

use crate::{
    algebra::Metric,
    engine::{entity_struct, impl_entity, Convert, Numeric},
    symbolic::{Element, Multivector},
};

crate::define_algebra!(
    /// 3D euclidean space: `e1`, `e2` and `e3` all square to 1
    pub Ega => Metric::euclidean(3)
);

/// A symbolic constant of this algebra
pub fn e(element: Element) -> Multivector<Ega> {
    Multivector::e(element)
}

entity_struct!(
    /// `x e1 + y e2 + z e3`
    Vector { x, y, z }
);

impl_entity!(Ega, Vector, |x, y, z| x * e(0b001) + y * e(0b010) + z * e(0b100));

impl Vector {
    /// Scale to unit length. A zero vector yields NaNs
    pub fn normalize(&mut self) {
        let l2_inv = 1.0 / (self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        self.x *= l2_inv;
        self.y *= l2_inv;
        self.z *= l2_inv;
    }
}

impl Convert<Ega> for Vector {
    fn convert(mv: Numeric<Ega>) -> Self {
        Vector::new(mv.get(0b001), mv.get(0b010), mv.get(0b100))
    }
}

entity_struct!(
    /// Rotation of some angle around the axis `(x, y, z)`, stored as the
    /// cosine and sine of the half angle. Encoded as
    /// `cos - sin * (z e12 - y e13 + x e23)`
    Rotor {
        cos_theta,
        sin_theta,
        x,
        y,
        z
    }
);

impl_entity!(Ega, Rotor, |cos_theta, sin_theta, x, y, z| {
    cos_theta - sin_theta * (z * e(0b011) - y * e(0b101) + x * e(0b110))
});

impl Rotor {
    /// Rotation of `theta` radians around the axis `(x, y, z)`
    pub fn from_angle(theta: f64, x: f64, y: f64, z: f64) -> Self {
        let (sin_theta, cos_theta) = (0.5 * theta).sin_cos();
        Rotor {
            cos_theta,
            sin_theta,
            x,
            y,
            z,
        }
    }

    /// Scale the axis to unit length. A zero axis yields NaNs
    pub fn normalize(&mut self) {
        let l2_inv = 1.0 / (self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        self.x *= l2_inv;
        self.y *= l2_inv;
        self.z *= l2_inv;
    }
}

impl Convert<Ega> for Rotor {
    /// The axis is normalized, unless the rotation is the identity, in which
    /// case `z` is picked
    fn convert(mv: Numeric<Ega>) -> Self {
        let (x, y, z) = (-mv.get(0b110), mv.get(0b101), -mv.get(0b011));
        let sin_theta = (x * x + y * y + z * z).sqrt();
        if sin_theta == 0.0 {
            return Rotor::new(mv.get(0), 0.0, 0.0, 0.0, 1.0);
        }
        Rotor::new(mv.get(0), sin_theta, x / sin_theta, y / sin_theta, z / sin_theta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn vector_encoding() {
        let v = Vector::new(1.0, 2.0, 3.0);
        let r = Engine::<Ega, _>::new((&v,))
            .compute(|(v,)| v.clone() * v)
            .reify::<f64>();
        assert_eq!(r.elements(), &[0]);
        assert_eq!(r.get(0), 14.0);
    }

    #[test]
    fn rotate_vector() {
        // A quarter turn around z sends x to y
        let r = Rotor::from_angle(FRAC_PI_2, 0.0, 0.0, 1.0);
        let v = Vector::new(1.0, 0.0, 0.0);
        let res: Vector = Engine::<Ega, _>::new((&r, &v))
            .compute(|(r, v)| r.conjugate(&v).g(1))
            .reify_as();
        assert_abs_diff_eq!(res.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(res.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(res.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn compose_rotors() {
        let r1 = Rotor::from_angle(0.3, 1.0, 0.0, 0.0);
        let r2 = Rotor::from_angle(0.4, 1.0, 0.0, 0.0);
        let r: Rotor = Engine::<Ega, _>::new((&r1, &r2))
            .compute(|(r1, r2)| r2 * r1)
            .reify_as();
        assert_abs_diff_eq!(r.cos_theta, 0.35f64.cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(r.sin_theta, 0.35f64.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(r.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn normalize() {
        let mut v = Vector::new(3.0, 0.0, 4.0);
        v.normalize();
        assert_abs_diff_eq!(v.x, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(v.z, 0.8, epsilon = 1e-12);
        let mut r = Rotor::new(1.0, 0.0, 0.0, 0.0, 0.0);
        r.normalize();
        assert!(r.x.is_nan());
        assert_eq!(r[0], 1.0);
    }
}
