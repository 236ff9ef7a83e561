use super::{monomial::simplify_sum, Monomial, Rational, Tag};
use crate::grade_set::Grade;
use std::fmt;

/// A basis blade, as a bitmask over the basis vectors of the algebra. Bit `i`
/// set means that the `i`-th basis vector is part of the blade, and the blade
/// is the outer product of its vectors taken by increasing index:
/// - `0b000` is the scalar `1`
/// - `0b001` is `e1`, `0b010` is `e2`
/// - `0b011` is `e1^e2`, `0b111` is `e1^e2^e3`, etc.
pub type Element = u32;

/// Max number of basis vectors an [`Element`] can address
pub const MAX_DIM: usize = Element::BITS as usize;

/// The grade of a basis blade, ie. the number of vectors it contains
pub fn grade(e: Element) -> Grade {
    e.count_ones() as Grade
}

/// Iterate over the indices of the basis vectors contained in a blade, by
/// increasing index
pub fn iter_vectors(e: Element) -> impl Iterator<Item = usize> {
    (0..MAX_DIM).filter(move |&i| e & (1 << i) != 0)
}

/// A basis blade multiplied by a polynomial in the generators
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Term {
    pub(crate) element: Element,
    pub(crate) monomials: Vec<Monomial>,
}

impl Term {
    /// Build a term, simplifying its monomials
    pub fn new(element: Element, monomials: Vec<Monomial>) -> Self {
        Term {
            element,
            monomials: simplify_sum(monomials),
        }
    }

    /// A term with a constant coefficient
    pub fn constant(element: Element, coeff: Rational) -> Self {
        Term::new(element, vec![Monomial::constant(coeff)])
    }

    /// A term whose coefficient is a single generator
    pub fn generator(element: Element, tag: Tag) -> Self {
        Term::new(element, vec![Monomial::generator(Rational::ONE, tag)])
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn monomials(&self) -> &[Monomial] {
        &self.monomials
    }

    pub fn grade(&self) -> Grade {
        grade(self.element)
    }

    /// A term with no monomials is the zero of its basis element
    pub fn is_zero(&self) -> bool {
        self.monomials.is_empty()
    }

    /// Multiply all the coefficients by `k`
    pub fn scaled(mut self, k: Rational) -> Self {
        if k.is_zero() {
            self.monomials.clear();
        } else {
            for m in &mut self.monomials {
                m.coeff *= k;
            }
        }
        self
    }

    /// The polynomial product of the coefficients of two terms, still
    /// unsimplified
    pub(crate) fn coeff_product(&self, rhs: &Term) -> Vec<Monomial> {
        let mut res = Vec::with_capacity(self.monomials.len() * rhs.monomials.len());
        for l in &self.monomials {
            for r in &rhs.monomials {
                res.push(l.mul(r));
            }
        }
        res
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, m) in self.monomials.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{m}")?;
        }
        write!(f, ")*{:#b}", self.element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_macros::*;

    simple_eqs! {
        grade_of_scalar: grade(0) => 0,
        grade_of_trivector: grade(0b10101) => 3,
        vectors_in_blade: iter_vectors(0b10110).collect::<Vec<_>>() => vec![1, 2, 4],
        scaled_by_zero_is_zero: Term::constant(0b11, Rational::ONE).scaled(Rational::ZERO).is_zero() => true,
        zero_coeffs_are_dropped:
            Term::new(0b1, vec![Monomial::constant(Rational::ONE), Monomial::constant(Rational::MINUS_ONE)]).is_zero()
            => true
    }
}
