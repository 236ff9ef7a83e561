//! The products of basis blades
//!
//! Each product is given as a rule over pairs of basis blades. A multivector
//! product is the sum, over all pairs of terms, of the blade rule times the
//! product of the coefficients (see [`Multivector::product`](super::Multivector::product))

use super::{grade, Element, Rational};
use crate::{
    algebra::{Diagonalization, Metric, Sign},
    grade_set::GradeSet,
};
use std::collections::BTreeMap;

/// The bilinear products between multivectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductKind {
    /// `a * b`
    Geometric,
    /// `a ^ b`
    Exterior,
    /// `a | b`: grade `g(b) - g(a)` part of `a * b`
    LeftContraction,
    /// `a >> b`: each vector of `a` is contracted with its partner in `b`
    Contraction,
}

impl ProductKind {
    /// The product of two basis blades, as a sum of basis blades with
    /// rational coefficients. Empty if the product is zero
    pub fn blades(self, metric: &Metric, e1: Element, e2: Element) -> Vec<(Element, Rational)> {
        match self {
            ProductKind::Geometric => geometric(metric, e1, e2),
            ProductKind::Exterior => exterior(e1, e2).into_iter().collect(),
            ProductKind::LeftContraction => left_contraction(metric, e1, e2),
            ProductKind::Contraction => contraction(metric, e1, e2).into_iter().collect(),
        }
    }

    /// The grades this product can yield, given the grades of its operands
    pub fn grade_set(self, gs1: &GradeSet, gs2: &GradeSet) -> GradeSet {
        let mut res = GradeSet::empty();
        for k1 in gs1.iter() {
            for k2 in gs2.iter() {
                res = res
                    + match self {
                        ProductKind::Geometric => GradeSet::single(k1) * GradeSet::single(k2),
                        ProductKind::Exterior => GradeSet::outer(k1, k2),
                        ProductKind::LeftContraction | ProductKind::Contraction => {
                            if k2 >= k1 {
                                GradeSet::single(k2 - k1)
                            } else {
                                GradeSet::empty()
                            }
                        }
                    };
            }
        }
        res
    }
}

/// Mask of the basis vectors of index lower than `i`
fn below(i: usize) -> Element {
    ((1u64 << i) - 1) as Element
}

/// Index of the highest basis vector of a (non-scalar) blade
fn leading_index(e: Element) -> usize {
    (Element::BITS - 1 - e.leading_zeros()) as usize
}

fn parity(swaps: u32) -> Rational {
    if swaps & 1 == 0 {
        Rational::ONE
    } else {
        Rational::MINUS_ONE
    }
}

/// The sign obtained when sorting the vectors of `e1` followed by those of
/// `e2` into ascending order: each vector of `e1` has to jump over the
/// vectors of `e2` with a lower index
pub(crate) fn reordering_sign(e1: Element, e2: Element) -> Rational {
    let mut shifted = e1 >> 1;
    let mut sum = 0;
    while shifted != 0 {
        sum += (shifted & e2).count_ones();
        shifted >>= 1;
    }
    parity(sum)
}

fn exterior(e1: Element, e2: Element) -> Option<(Element, Rational)> {
    if e1 & e2 != 0 {
        None
    } else {
        Some((e1 | e2, reordering_sign(e1, e2)))
    }
}

/// Geometric product, when the vectors of `e1` can be processed one by one:
/// starting from the highest, each vector is either contracted with its
/// partner in the rhs, or wedged into it
fn geometric_sequential(metric: &Metric, e1: Element, e2: Element) -> Option<(Element, Rational)> {
    let (mut lhs, mut rhs, mut swaps) = (e1, e2, 0);
    while lhs != 0 {
        let i = leading_index(lhs);
        match metric.intercept(i, rhs) {
            None => {
                swaps += (rhs & below(i)).count_ones();
                rhs |= 1 << i;
            }
            Some((j, dot)) => {
                debug_assert_eq!(i, j, "Null pair reached the sequential product");
                swaps += (rhs & below(j)).count_ones();
                match dot {
                    Sign::Zero => return None,
                    Sign::Neg => swaps += 1,
                    Sign::Pos => {}
                }
                rhs &= !(1 << j);
            }
        }
        lhs &= !(1 << i);
    }
    Some((rhs, parity(swaps)))
}

fn geometric(metric: &Metric, e1: Element, e2: Element) -> Vec<(Element, Rational)> {
    match metric.diagonalization() {
        Some(diag) if metric.multi_term_gp(e1, e2) => {
            log::trace!("Diagonalizing the product of {e1:#b} and {e2:#b}");
            geometric_diagonalized(diag, e1, e2)
        }
        _ => geometric_sequential(metric, e1, e2).into_iter().collect(),
    }
}

/// Rewrites both blades in the orthogonal basis, multiplies them there and
/// rewrites the result in the original basis
fn geometric_diagonalized(diag: &Diagonalization, e1: Element, e2: Element) -> Vec<(Element, Rational)> {
    let lhs = change_basis(e1, |i| diag.forward(i));
    let rhs = change_basis(e2, |i| diag.forward(i));
    let mut in_base: BTreeMap<Element, Rational> = BTreeMap::new();
    for &(a, ka) in &lhs {
        for &(b, kb) in &rhs {
            if let Some((e, s)) = geometric_sequential(diag.base(), a, b) {
                *in_base.entry(e).or_default() += ka * kb * s;
            }
        }
    }
    let mut res: BTreeMap<Element, Rational> = BTreeMap::new();
    for (e, k) in in_base {
        if k.is_zero() {
            continue;
        }
        for (e2, k2) in change_basis(e, |i| diag.inverse(i)) {
            *res.entry(e2).or_default() += k * k2;
        }
    }
    res.into_iter().filter(|(_, k)| !k.is_zero()).collect()
}

/// The image of a blade under a linear map of the basis vectors, ie. the
/// outer product of the images of its vectors
fn change_basis<'a>(
    e: Element,
    image: impl Fn(usize) -> &'a [(usize, Rational)],
) -> Vec<(Element, Rational)> {
    let mut acc: BTreeMap<Element, Rational> = BTreeMap::from([(0, Rational::ONE)]);
    for i in super::iter_vectors(e) {
        let mut next: BTreeMap<Element, Rational> = BTreeMap::new();
        for (&blade, &c) in &acc {
            for &(k, a) in image(i) {
                if let Some((e, s)) = exterior(blade, 1 << k) {
                    *next.entry(e).or_default() += c * a * s;
                }
            }
        }
        next.retain(|_, k| !k.is_zero());
        acc = next;
    }
    acc.into_iter().collect()
}

fn left_contraction(metric: &Metric, e1: Element, e2: Element) -> Vec<(Element, Rational)> {
    if grade(e2) < grade(e1) {
        return vec![];
    }
    let target = grade(e2) - grade(e1);
    let mut res = geometric(metric, e1, e2);
    res.retain(|(e, _)| grade(*e) == target);
    res
}

fn contraction(metric: &Metric, e1: Element, e2: Element) -> Option<(Element, Rational)> {
    if e1 == 0 {
        return Some((e2, Rational::ONE));
    }
    if grade(e1) > grade(e2) {
        return None;
    }
    let (mut lhs, mut rhs, mut swaps) = (e1, e2, 0);
    while lhs != 0 {
        let i = leading_index(lhs);
        let (j, dot) = metric.intercept(i, rhs)?;
        swaps += (rhs & below(j)).count_ones();
        match dot {
            Sign::Zero => return None,
            Sign::Neg => swaps += 1,
            Sign::Pos => {}
        }
        lhs &= !(1 << i);
        rhs &= !(1 << j);
    }
    Some((rhs, parity(swaps)))
}
