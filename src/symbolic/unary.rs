//! Involutions, grade selections and duals over symbolic multivectors

use super::{grade, Element, Multivector, Rational};
use crate::{
    algebra::MetricAlgebra,
    grade_set::{Grade, GradeSet},
    graded::Graded,
};

fn sign_if(negate: bool) -> Rational {
    if negate {
        Rational::MINUS_ONE
    } else {
        Rational::ONE
    }
}

/// Sign such that `e ^ (sign * complement(e))` is the pseudoscalar: each
/// vector of the complement has to jump over the vectors of `e` with a
/// higher index
fn complement_sign(e: Element) -> Rational {
    let mut swaps = 0;
    let mut remaining = grade(e);
    let mut rest = e;
    while rest != 0 {
        if rest & 1 == 0 {
            swaps += remaining;
        } else {
            remaining -= 1;
        }
        rest >>= 1;
    }
    sign_if(swaps % 2 == 1)
}

macro_rules! grade_signs {
    ($($fn_name:ident ($g:ident) $negate:expr, $doc:literal),*) => {
        $(
            #[doc=$doc]
            pub fn $fn_name(self) -> Self {
                self.map_signs(|e| {
                    let $g = grade(e);
                    Some(sign_if($negate))
                })
            }
        )*
    };
}

impl<A: MetricAlgebra> Multivector<A> {
    grade_signs! {
        rev (g) (g * g.saturating_sub(1) / 2) % 2 == 1,
            "Reverse (dagger): reverses the order of the vectors of each blade",
        ginvol (g) g % 2 == 1,
            "Grade involution (main involution): negates odd grades",
        conj (g) (g * (g + 1) / 2) % 2 == 1,
            "Clifford conjugate. Same as `self.rev().ginvol()`"
    }

    /// Grade projection: keep only the grade `k`
    pub fn g(self, k: Grade) -> Self {
        self.gselect(|_| GradeSet::single(k))
    }

    /// Grade projection: select specific grades. `f` receives the grades
    /// currently present
    pub fn gselect(self, f: impl FnOnce(&GradeSet) -> GradeSet) -> Self {
        let present = self.grade_set().0;
        let wanted = f(&present);
        let res = self.map_signs(|e| wanted.contains(grade(e)).then_some(Rational::ONE));
        warn_if_emptied(!present.is_empty(), &res);
        res
    }

    /// Keep only the terms of the given elements
    pub fn select(self, elements: &[Element]) -> Self {
        let was_zero = self.is_zero();
        let res = self.map_signs(|e| elements.contains(&e).then_some(Rational::ONE));
        warn_if_emptied(!was_zero, &res);
        res
    }

    /// The single term of some element, as a multivector
    pub fn extract(self, element: Element) -> Self {
        self.select(&[element])
    }

    /// Scalar product. Just a shortcut for `(self.rev() * rhs).g(0)`
    pub fn scal(&self, rhs: &Self) -> Self {
        (self.clone().rev() * rhs).g(0)
    }

    /// Norm squared. Just a shortcut for `self.scal(self)`
    pub fn norm_sq(&self) -> Self {
        self.scal(self)
    }

    /// The unit pseudoscalar
    pub fn pseudoscalar() -> Self {
        Self::e(A::metric().pseudoscalar_element())
    }

    /// The inverse of the unit pseudoscalar, for non-degenerate metrics.
    /// Null pairs count as one negative direction each
    pub fn pseudoscalar_inverse() -> Self {
        let metric = A::metric();
        let d = metric.vec_space_dim();
        let flips = d * d.saturating_sub(1) / 2 + metric.negative_count();
        Self::pseudoscalar().scaled(sign_if(flips % 2 == 1))
    }

    /// Poincaré dual: maps each blade to its complement, with the sign making
    /// `e ^ e.dual()` equal to the pseudoscalar. Does not depend on the
    /// metric, so it works with degenerate ones
    pub fn dual(self) -> Self {
        let full = A::metric().pseudoscalar_element();
        let terms = self
            .terms()
            .iter()
            .map(|t| {
                super::Term::new(full ^ t.element(), t.monomials().to_vec())
                    .scaled(complement_sign(t.element()))
            })
            .collect();
        Self::from_terms(terms)
    }

    /// Polarity dual: contraction onto the inverse pseudoscalar
    pub fn polarity_dual(&self) -> Self {
        self >> Self::pseudoscalar_inverse()
    }

    /// Regressive product: the dual of the outer product of the duals
    pub fn regressive(&self, rhs: &Self) -> Self {
        !(!self ^ !rhs)
    }

    /// Sandwich product `self * subject * self.rev()`, eg. to apply a rotor
    /// or a motor to some object
    pub fn conjugate(&self, subject: &Self) -> Self {
        self * subject * self.clone().rev()
    }
}

fn warn_if_emptied<A: MetricAlgebra>(had_terms: bool, res: &Multivector<A>) {
    if had_terms && res.is_zero() {
        log::warn!("Selection removed all the terms of a non-zero multivector");
    }
}
