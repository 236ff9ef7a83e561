//! Symbolic multivectors: sums of [`Term`]s over the basis blades of some
//! algebra

use super::{product::ProductKind, Element, Monomial, Rational, Tag, Term};
use crate::{
    algebra::{Metric, MetricAlgebra},
    grade_set::GradeSet,
    graded::{Graded, Owned},
};
use std::{fmt, marker::PhantomData};

/// A multivector whose coefficients are polynomials in the generators
///
/// Invariant: terms are sorted by element, each element appears at most once
/// and no term is zero. Every operation returns a value respecting it, so two
/// multivectors are equal iff they are structurally equal.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Multivector<A> {
    terms: Vec<Term>,
    _algebra: PhantomData<A>,
}

impl<A: MetricAlgebra> Multivector<A> {
    /// The multivector with no terms
    pub fn zero() -> Self {
        Multivector {
            terms: Vec::new(),
            _algebra: PhantomData,
        }
    }

    /// Build a multivector from arbitrary terms: terms of the same element are
    /// summed, and zero terms are dropped
    pub fn from_terms(mut terms: Vec<Term>) -> Self {
        let dim = A::metric().vec_space_dim();
        debug_assert!(
            terms.iter().all(|t| dim == super::MAX_DIM || t.element >> dim == 0),
            "Term outside of the algebra"
        );
        terms.sort_by_key(|t| t.element);
        let mut res: Vec<Term> = Vec::with_capacity(terms.len());
        let mut pending: Vec<Monomial> = Vec::new();
        let mut current: Option<Element> = None;
        for t in terms {
            if current != Some(t.element) {
                if let Some(e) = current {
                    res.push(Term::new(e, std::mem::take(&mut pending)));
                }
                current = Some(t.element);
            }
            pending.extend(t.monomials);
        }
        if let Some(e) = current {
            res.push(Term::new(e, pending));
        }
        res.retain(|t| !t.is_zero());
        Multivector {
            terms: res,
            _algebra: PhantomData,
        }
    }

    /// A constant scalar
    pub fn scalar(k: impl Into<Rational>) -> Self {
        Self::e(0).scaled(k.into())
    }

    pub fn one() -> Self {
        Self::e(0)
    }

    /// The basis blade `element`, with a coefficient of one
    pub fn e(element: Element) -> Self {
        let dim = A::metric().vec_space_dim();
        assert!(
            dim == super::MAX_DIM || element >> dim == 0,
            "Basis blade {element:#b} doesn't exist in an algebra of dimension {dim}"
        );
        Self::from_terms(vec![Term::constant(element, Rational::ONE)])
    }

    /// The `i`-th basis vector
    pub fn basis_vector(i: usize) -> Self {
        assert!(i < A::metric().vec_space_dim(), "No basis vector {i}");
        Self::e(1 << i)
    }

    /// The `D` first basis vectors, eg. `let [e1, e2, e3] = Multivector::basis_vectors();`
    pub fn basis_vectors<const D: usize>() -> [Self; D] {
        array_init::array_init(Self::basis_vector)
    }

    /// The basis blade `element` times the run-time scalar identified by `tag`
    pub fn generator(element: Element, tag: Tag) -> Self {
        Self::from_terms(vec![Term::generator(element, tag)])
    }

    pub fn metric() -> &'static Metric {
        A::metric()
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of non-zero terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_zero()
    }

    /// The elements that have a non-zero coefficient, in increasing order
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.terms.iter().map(|t| t.element)
    }

    /// The coefficient of some element, if it is non-zero
    pub fn term(&self, element: Element) -> Option<&Term> {
        self.terms
            .binary_search_by_key(&element, |t| t.element)
            .ok()
            .map(|i| &self.terms[i])
    }

    /// The coefficient of some element, if it doesn't depend on any
    /// generator. Absent elements have a zero coefficient
    pub fn constant_coeff(&self, element: Element) -> Option<Rational> {
        match self.term(element) {
            None => Some(Rational::ZERO),
            Some(t) => match t.monomials() {
                [m] if m.generators().is_empty() => Some(m.coeff()),
                _ => None,
            },
        }
    }

    /// Multiply all the coefficients by `k`
    pub fn scaled(self, k: Rational) -> Self {
        if k.is_zero() {
            return Self::zero();
        }
        Multivector {
            terms: self.terms.into_iter().map(|t| t.scaled(k)).collect(),
            _algebra: PhantomData,
        }
    }

    /// Apply a sign (or drop the term) per element. Elements are kept, so
    /// the result stays sorted
    pub(crate) fn map_signs(self, f: impl Fn(Element) -> Option<Rational>) -> Self {
        let terms = self
            .terms
            .into_iter()
            .filter_map(|t| {
                let k = f(t.element)?;
                Some(t.scaled(k))
            })
            .filter(|t| !t.is_zero())
            .collect();
        Multivector {
            terms,
            _algebra: PhantomData,
        }
    }

    /// Apply a blade-level rule to all the pairs of terms, and sum the results
    pub fn product(&self, kind: ProductKind, rhs: &Self) -> Self {
        let metric = A::metric();
        let mut terms = Vec::new();
        for l in &self.terms {
            for r in &rhs.terms {
                let blades = kind.blades(metric, l.element, r.element);
                if blades.is_empty() {
                    continue;
                }
                let coeffs = l.coeff_product(r);
                for (element, k) in blades {
                    terms.push(Term {
                        element,
                        monomials: coeffs.iter().map(|m| m.scaled(k)).collect(),
                    });
                }
            }
        }
        let res = Self::from_terms(terms);
        debug_assert!(
            kind.grade_set(&self.grade_set(), &rhs.grade_set())
                .includes(&res.grade_set()),
            "{kind:?} product yielded unexpected grades"
        );
        res
    }

    /// Geometric product
    pub fn gp(&self, rhs: &Self) -> Self {
        self.product(ProductKind::Geometric, rhs)
    }

    /// Outer (exterior) product
    pub fn wedge(&self, rhs: &Self) -> Self {
        self.product(ProductKind::Exterior, rhs)
    }

    /// Left contraction, as the grade `g(rhs) - g(lhs)` part of the geometric
    /// product
    pub fn left_contract(&self, rhs: &Self) -> Self {
        self.product(ProductKind::LeftContraction, rhs)
    }

    /// Contraction of the vectors of `self` onto their partners in `rhs`
    pub fn contract(&self, rhs: &Self) -> Self {
        self.product(ProductKind::Contraction, rhs)
    }

    fn sum(&self, rhs: &Self) -> Self {
        Self::from_terms(self.terms.iter().chain(&rhs.terms).cloned().collect())
    }

    fn difference(&self, rhs: &Self) -> Self {
        self.sum(&-rhs)
    }
}

impl<A: MetricAlgebra> Graded for Multivector<A> {
    type RefToGradeSet<'a> = Owned<GradeSet>;
    fn grade_set(&self) -> Self::RefToGradeSet<'_> {
        Owned(self.terms.iter().map(Term::grade).collect())
    }
}

macro_rules! multivector_binary_ops {
    ($($doc:literal $trait:ident $method:ident ($fn:ident)),*) => {
        $(
        #[doc=$doc]
        impl<A: MetricAlgebra> std::ops::$trait<&Multivector<A>> for &Multivector<A> {
            type Output = Multivector<A>;
            fn $method(self, rhs: &Multivector<A>) -> Multivector<A> {
                Multivector::$fn(self, rhs)
            }
        }
        #[doc=$doc]
        impl<A: MetricAlgebra> std::ops::$trait<Multivector<A>> for Multivector<A> {
            type Output = Multivector<A>;
            fn $method(self, rhs: Multivector<A>) -> Multivector<A> {
                Multivector::$fn(&self, &rhs)
            }
        }
        #[doc=$doc]
        impl<A: MetricAlgebra> std::ops::$trait<&Multivector<A>> for Multivector<A> {
            type Output = Multivector<A>;
            fn $method(self, rhs: &Multivector<A>) -> Multivector<A> {
                Multivector::$fn(&self, rhs)
            }
        }
        #[doc=$doc]
        impl<A: MetricAlgebra> std::ops::$trait<Multivector<A>> for &Multivector<A> {
            type Output = Multivector<A>;
            fn $method(self, rhs: Multivector<A>) -> Multivector<A> {
                Multivector::$fn(self, &rhs)
            }
        }
        )*
    };
}

multivector_binary_ops! {
    "Sum" Add add (sum),
    "Difference" Sub sub (difference),
    "Geometric product" Mul mul (gp),
    "Outer product" BitXor bitxor (wedge),
    "Left contraction" BitOr bitor (left_contract),
    "Contraction onto the partners of the left vectors" Shr shr (contract),
    "Regressive product" BitAnd bitand (regressive)
}

impl<A: MetricAlgebra> std::ops::Neg for Multivector<A> {
    type Output = Self;
    fn neg(self) -> Self {
        self.scaled(Rational::MINUS_ONE)
    }
}

impl<A: MetricAlgebra> std::ops::Neg for &Multivector<A> {
    type Output = Multivector<A>;
    fn neg(self) -> Multivector<A> {
        -self.clone()
    }
}

/// Poincaré dual
impl<A: MetricAlgebra> std::ops::Not for Multivector<A> {
    type Output = Self;
    fn not(self) -> Self {
        self.dual()
    }
}

/// Poincaré dual
impl<A: MetricAlgebra> std::ops::Not for &Multivector<A> {
    type Output = Multivector<A>;
    fn not(self) -> Multivector<A> {
        self.clone().dual()
    }
}

macro_rules! scalar_with_multivector_binary_ops {
    ($($t:ty),*) => {
        $(
        impl<A: MetricAlgebra> std::ops::Mul<$t> for Multivector<A> {
            type Output = Self;
            fn mul(self, rhs: $t) -> Self {
                self.scaled(rhs.into())
            }
        }
        impl<A: MetricAlgebra> std::ops::Mul<$t> for &Multivector<A> {
            type Output = Multivector<A>;
            fn mul(self, rhs: $t) -> Multivector<A> {
                self.clone().scaled(rhs.into())
            }
        }
        impl<A: MetricAlgebra> std::ops::Mul<Multivector<A>> for $t {
            type Output = Multivector<A>;
            fn mul(self, rhs: Multivector<A>) -> Multivector<A> {
                rhs.scaled(self.into())
            }
        }
        impl<A: MetricAlgebra> std::ops::Mul<&Multivector<A>> for $t {
            type Output = Multivector<A>;
            fn mul(self, rhs: &Multivector<A>) -> Multivector<A> {
                rhs.clone().scaled(self.into())
            }
        }
        impl<A: MetricAlgebra> std::ops::Add<$t> for Multivector<A> {
            type Output = Self;
            fn add(self, rhs: $t) -> Self {
                self + Multivector::scalar(rhs)
            }
        }
        impl<A: MetricAlgebra> std::ops::Add<Multivector<A>> for $t {
            type Output = Multivector<A>;
            fn add(self, rhs: Multivector<A>) -> Multivector<A> {
                Multivector::scalar(self) + rhs
            }
        }
        impl<A: MetricAlgebra> std::ops::Div<$t> for Multivector<A> {
            type Output = Self;
            /// Panics when dividing by zero
            fn div(self, rhs: $t) -> Self {
                let k: Rational = rhs.into();
                self.scaled(k.recip())
            }
        }
        )*
    };
}
scalar_with_multivector_binary_ops!(Rational, i64);

impl<A: MetricAlgebra> fmt::Display for Multivector<A> {
    /// Prints each term as its polynomial followed by the name of its
    /// element, eg. `(x0.0) e1 + (-1/2*x0.1^2) e1^e2`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("0");
        }
        let metric = A::metric();
        for (i, t) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            f.write_str("(")?;
            for (j, m) in t.monomials.iter().enumerate() {
                if j > 0 {
                    f.write_str(" + ")?;
                }
                write!(f, "{m}")?;
            }
            f.write_str(")")?;
            if t.element != 0 {
                write!(f, " {}", metric.basis_name(t.element))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_macros::*;

    crate::define_algebra!(E3 => Metric::euclidean(3));
    type MV = Multivector<E3>;

    fn x() -> MV {
        MV::generator(0b1, Tag::new(0, 0))
    }
    fn y() -> MV {
        MV::generator(0b1, Tag::new(0, 1))
    }

    simple_eqs! {
        zero_has_no_terms: MV::zero().len() => 0,
        sum_merges: (x() + x()).terms()[0].monomials().len() => 1,
        sum_cancels: (x() - x()).is_zero() => true,
        sorted_elements: (MV::e(0b110) + MV::e(0b1) + MV::one()).elements().collect::<Vec<_>>() => vec![0, 0b1, 0b110],
        scaled_by_int: x() * 2 => x() + x(),
        divided_by_int: (x() * 3) / 3 => x(),
        scalar_product_with_zero: MV::scalar(0).is_zero() => true,
        display: (MV::scalar(Rational::new(1, 2)) + x() - y() * 2).to_string()
            => "(1/2) + (x0.0 + -2*x0.1) e1".to_string(),
        display_zero: MV::zero().to_string() => "0".to_string(),
        grades: MV::one().grade_set().is_just(0) => true
    }

    #[test]
    fn basis_vectors() {
        let [e1, e2, e3] = MV::basis_vectors();
        assert_eq!(e1, MV::e(0b001));
        assert_eq!(e2, MV::e(0b010));
        assert_eq!(e3, MV::e(0b100));
        assert!(e3.is_k_vector(1));
    }

    #[test]
    #[should_panic]
    fn element_outside_algebra() {
        let _ = MV::e(0b1000);
    }

    #[test]
    fn term_lookup() {
        let mv = x() + MV::e(0b11);
        assert_eq!(mv.term(0b1).map(Term::monomials), Some(x().terms()[0].monomials()));
        assert!(mv.term(0b10).is_none());
        assert_eq!(mv.constant_coeff(0b11), Some(Rational::ONE));
        assert_eq!(mv.constant_coeff(0b10), Some(Rational::ZERO));
        assert_eq!(mv.constant_coeff(0b1), None);
    }
}
