//! Describe a geometric algebra over which computations may be done
//!
//! A [`Metric`] tells how many base vectors the underlying vector space has,
//! and how these base vectors multiply under the inner product. A
//! [`MetricAlgebra`] is a zero-sized type standing for one such metric, so
//! that multivectors of different algebras cannot be mixed up: doing so is a
//! type error.

use crate::{
    error::{GaError, Result},
    grade_set::{Grade, GradeSet},
    symbolic::{Element, Rational, MAX_DIM},
};
use std::fmt::Debug;

// # TYPES & TRAITS //

/// A geometric algebra known at the type level. Implement it with
/// [`define_algebra!`](crate::define_algebra)
pub trait MetricAlgebra:
    Copy + Clone + Debug + Default + PartialEq + Eq + std::hash::Hash + Send + Sync + 'static
{
    /// The metric of this algebra. Is built once and then shared
    fn metric() -> &'static Metric;
}

/// Declare a zero-sized type implementing [`MetricAlgebra`], eg.
///
/// ```
/// gasym::define_algebra!(pub Sta => gasym::algebra::Metric::signature(1, 3, 0));
/// ```
#[macro_export]
macro_rules! define_algebra {
    ($(#[$attr:meta])* $vis:vis $name:ident => $metric:expr) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::algebra::MetricAlgebra for $name {
            fn metric() -> &'static $crate::algebra::Metric {
                static METRIC: $crate::once_cell::sync::Lazy<$crate::algebra::Metric> =
                    $crate::once_cell::sync::Lazy::new(|| $metric);
                &METRIC
            }
        }
    };
}

/// Sign of the inner product of two base vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Pos,
    Neg,
    Zero,
}

impl Sign {
    pub fn to_rational(self) -> Rational {
        match self {
            Sign::Pos => Rational::ONE,
            Sign::Neg => Rational::MINUS_ONE,
            Sign::Zero => Rational::ZERO,
        }
    }
}

/// Two base vectors `a` and `b` that both square to zero, but whose inner
/// product is `dot` (eg. the origin and infinity of the conformal model)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullPair {
    pub a: usize,
    pub b: usize,
    pub dot: Sign,
}

impl NullPair {
    fn mask(&self) -> Element {
        (1 << self.a) | (1 << self.b)
    }
}

/// The inner product of the base vectors of some vector space, and derived
/// information used by the products
#[derive(Debug, Clone)]
pub struct Metric {
    squares: Vec<Sign>,
    null_pairs: Vec<NullPair>,
    /// For each base vector, the one base vector it has a nonzero inner
    /// product with (itself for orthogonal vectors)
    partner: Vec<usize>,
    names: Vec<String>,
    diag: Option<Box<Diagonalization>>,
}

/// A change of basis towards a metric where all base vectors are orthogonal.
/// Only exists for metrics having null pairs
#[derive(Debug, Clone)]
pub struct Diagonalization {
    base: Metric,
    /// `forward[i]` is base vector `i` expressed in the orthogonal basis
    forward: Vec<Vec<(usize, Rational)>>,
    /// `inverse[i]` is the `i`-th orthogonal vector expressed in the original
    /// basis
    inverse: Vec<Vec<(usize, Rational)>>,
}

impl Diagonalization {
    /// The orthogonal metric the products are computed in
    pub fn base(&self) -> &Metric {
        &self.base
    }

    pub fn forward(&self, i: usize) -> &[(usize, Rational)] {
        &self.forward[i]
    }

    pub fn inverse(&self, i: usize) -> &[(usize, Rational)] {
        &self.inverse[i]
    }
}

// # CONSTRUCTION //

impl Metric {
    /// A metric given the square of each base vector and the null pairs.
    /// Vectors that are part of a null pair must be declared as squaring to
    /// [`Sign::Zero`], and a null pair cannot have a zero inner product
    pub fn new(squares: Vec<Sign>, null_pairs: Vec<(usize, usize, Sign)>) -> Result<Self> {
        let dim = squares.len();
        if dim > MAX_DIM {
            return Err(GaError::DimensionTooLarge(dim));
        }
        let mut partner: Vec<usize> = (0..dim).collect();
        let mut pairs = Vec::with_capacity(null_pairs.len());
        for (a, b, dot) in null_pairs {
            if a >= dim || b >= dim {
                return Err(GaError::NullPairOutOfRange(a, b, dim));
            }
            for v in [a, b] {
                if partner[v] != v || a == b || dot == Sign::Zero {
                    return Err(GaError::NullPairOverlap(v));
                }
                if squares[v] != Sign::Zero {
                    return Err(GaError::NonNullPairVector(v));
                }
            }
            partner[a] = b;
            partner[b] = a;
            pairs.push(NullPair { a, b, dot });
        }
        let names = (1..=dim).map(|i| format!("e{i}")).collect();
        let mut metric = Metric {
            squares,
            null_pairs: pairs,
            partner,
            names,
            diag: None,
        };
        if !metric.null_pairs.is_empty() {
            metric.diag = Some(Box::new(metric.build_diagonalization()));
        }
        Ok(metric)
    }

    /// Change the names used when printing base vectors
    pub fn with_names(mut self, names: &[&str]) -> Result<Self> {
        if names.len() != self.vec_space_dim() {
            return Err(GaError::NameCountMismatch {
                expected: self.vec_space_dim(),
                got: names.len(),
            });
        }
        self.names = names.iter().map(|n| n.to_string()).collect();
        if let Some(d) = self.diag.as_mut() {
            d.base.names = self.names.clone();
        }
        Ok(self)
    }

    fn from_parts(squares: Vec<Sign>, null_pairs: Vec<(usize, usize, Sign)>, names: &[&str]) -> Self {
        assert!(
            squares.len() <= MAX_DIM,
            "A metric cannot have more than {MAX_DIM} base vectors"
        );
        match Metric::new(squares, null_pairs).and_then(|m| m.with_names(names)) {
            Ok(m) => m,
            Err(e) => panic!("Invalid builtin metric: {e}"),
        }
    }

    /// `p` vectors squaring to 1, then `q` to -1, then `r` to 0
    pub fn signature(p: usize, q: usize, r: usize) -> Self {
        let squares: Vec<_> = std::iter::repeat(Sign::Pos)
            .take(p)
            .chain(std::iter::repeat(Sign::Neg).take(q))
            .chain(std::iter::repeat(Sign::Zero).take(r))
            .collect();
        let names: Vec<_> = (1..=squares.len()).map(|i| format!("e{i}")).collect();
        let names: Vec<_> = names.iter().map(String::as_str).collect();
        Metric::from_parts(squares, vec![], &names)
    }

    /// The euclidean metric of dimension `n`. Panics if `n` is over [`MAX_DIM`]
    pub fn euclidean(n: usize) -> Self {
        Metric::signature(n, 0, 0)
    }

    /// Projective model of the `n`-dimensional euclidean space: a degenerate
    /// `e0` followed by `n` euclidean vectors
    pub fn projective(n: usize) -> Self {
        let squares: Vec<_> = std::iter::once(Sign::Zero)
            .chain(std::iter::repeat(Sign::Pos).take(n))
            .collect();
        let names: Vec<_> = (0..=n).map(|i| format!("e{i}")).collect();
        let names: Vec<_> = names.iter().map(String::as_str).collect();
        Metric::from_parts(squares, vec![], &names)
    }

    /// Conformal model of the `n`-dimensional euclidean space: `n` euclidean
    /// vectors, then the origin `no` and the infinity `ni`, with `no . ni = -1`
    pub fn conformal(n: usize) -> Self {
        let squares: Vec<_> = std::iter::repeat(Sign::Pos)
            .take(n)
            .chain([Sign::Zero, Sign::Zero])
            .collect();
        let mut names: Vec<_> = (1..=n).map(|i| format!("e{i}")).collect();
        names.push("no".into());
        names.push("ni".into());
        let names: Vec<_> = names.iter().map(String::as_str).collect();
        Metric::from_parts(squares, vec![(n, n + 1, Sign::Neg)], &names)
    }

    fn build_diagonalization(&self) -> Diagonalization {
        let dim = self.vec_space_dim();
        let mut squares = self.squares.clone();
        let mut forward: Vec<Vec<(usize, Rational)>> = (0..dim).map(|i| vec![(i, Rational::ONE)]).collect();
        let mut inverse = forward.clone();
        for p in &self.null_pairs {
            // e+ is stored at index a, e- at index b
            squares[p.a] = Sign::Pos;
            squares[p.b] = Sign::Neg;
            let d = p.dot.to_rational();
            let half = Rational::ONE_HALF;
            forward[p.a] = vec![(p.a, d * half), (p.b, -(d * half))];
            forward[p.b] = vec![(p.a, Rational::ONE), (p.b, Rational::ONE)];
            // d is +1 or -1, so 1/d == d
            inverse[p.a] = vec![(p.a, d), (p.b, half)];
            inverse[p.b] = vec![(p.a, -d), (p.b, half)];
        }
        let base = Metric {
            squares,
            null_pairs: vec![],
            partner: (0..dim).collect(),
            names: self.names.clone(),
            diag: None,
        };
        Diagonalization {
            base,
            forward,
            inverse,
        }
    }
}

// # QUERIES //

impl Metric {
    /// The dimensionality of the underlying vector space
    pub fn vec_space_dim(&self) -> usize {
        self.squares.len()
    }

    /// Number of grades in this algebra
    pub fn num_grades(&self) -> usize {
        self.vec_space_dim() + 1
    }

    /// The number of basis blades in this algebra
    pub fn algebraic_dim(&self) -> u64 {
        1u64 << self.vec_space_dim()
    }

    /// The number of basis blades of grade `k` (ie. the number of components of
    /// `k`-vectors in this algebra)
    pub fn grade_dim(&self, k: Grade) -> usize {
        n_choose_k(self.vec_space_dim(), k)
    }

    /// All the grades that exist in this algebra
    pub fn full_grade_set(&self) -> GradeSet {
        GradeSet::range(0, self.vec_space_dim())
    }

    /// The element of the unit pseudoscalar (all base vectors)
    pub fn pseudoscalar_element(&self) -> Element {
        if self.vec_space_dim() == MAX_DIM {
            Element::MAX
        } else {
            (1 << self.vec_space_dim()) - 1
        }
    }

    /// The square of base vector `i`
    pub fn square(&self, i: usize) -> Sign {
        self.squares[i]
    }

    /// Gram matrix
    pub fn dot(&self, i: usize, j: usize) -> Sign {
        if i == j {
            return self.squares[i];
        }
        self.null_pairs
            .iter()
            .find(|p| (p.a, p.b) == (i, j) || (p.a, p.b) == (j, i))
            .map_or(Sign::Zero, |p| p.dot)
    }

    /// If base vector `i` has a nonzero inner product with some base vector
    /// present in `blade`, return the index of that vector and the sign of
    /// the inner product. A degenerate vector present in `blade` is returned
    /// with [`Sign::Zero`]
    pub fn intercept(&self, i: usize, blade: Element) -> Option<(usize, Sign)> {
        let j = self.partner[i];
        if blade & (1 << j) == 0 {
            None
        } else {
            Some((j, self.dot(i, j)))
        }
    }

    /// Whether all base vectors are orthogonal
    pub fn is_diagonal(&self) -> bool {
        self.null_pairs.is_empty()
    }

    /// Whether the geometric product of `e1` and `e2` cannot be obtained by
    /// contracting or wedging the vectors of `e1` one by one into `e2`. That
    /// happens when both blades touch the same null pair, or when `e1`
    /// contains a whole null pair (its vectors are not orthogonal, so `e1` is
    /// not the geometric product of its vectors)
    pub fn multi_term_gp(&self, e1: Element, e2: Element) -> bool {
        self.null_pairs.iter().any(|p| {
            let m = p.mask();
            (e1 & m != 0 && e2 & m != 0) || e1 & m == m
        })
    }

    /// Number of directions squaring to -1 once the metric is diagonalized
    pub fn negative_count(&self) -> usize {
        self.squares.iter().filter(|s| **s == Sign::Neg).count() + self.null_pairs.len()
    }

    pub fn null_pairs(&self) -> &[NullPair] {
        &self.null_pairs
    }

    /// The change of basis to an orthogonal metric, if this metric isn't
    /// already diagonal
    pub fn diagonalization(&self) -> Option<&Diagonalization> {
        self.diag.as_deref()
    }

    /// Printable name of some basis blade, eg. `e1^e3`
    pub fn basis_name(&self, e: Element) -> String {
        if e == 0 {
            return "1".into();
        }
        crate::symbolic::iter_vectors(e)
            .map(|i| self.names.get(i).map_or_else(|| format!("e?{i}"), String::clone))
            .collect::<Vec<_>>()
            .join("^")
    }

    /// Iterate over all the basis blades of grade `k`, by increasing bitmask
    pub fn iter_basis_blades_of_grade(&self, k: Grade) -> impl Iterator<Item = Element> {
        let dim = self.vec_space_dim();
        (0..(1u64 << dim))
            .map(|e| e as Element)
            .filter(move |e| e.count_ones() as Grade == k)
    }
}

// # UTILITY FUNCTIONS //

/// Computes n! / (k! * (n-k)!)
pub(crate) const fn n_choose_k(n: Grade, k: Grade) -> usize {
    if k > n {
        return 0;
    }
    let mut res = 1;
    let mut i = 0;
    while i < k {
        res = res * (n - i) / (i + 1);
        i += 1;
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_macros::*;
    use rstest::*;

    #[fixture]
    fn cga() -> Metric {
        Metric::conformal(3)
    }

    simple_eqs! {
        choose_0: n_choose_k(5, 0) => 1,
        choose_2: n_choose_k(5, 2) => 10,
        choose_too_many: n_choose_k(2, 3) => 0,
        pseudoscalar_element: Metric::euclidean(3).pseudoscalar_element() => 0b111,
        blades_of_grade_2:
            Metric::euclidean(3).iter_basis_blades_of_grade(2).collect::<Vec<_>>() => vec![0b011, 0b101, 0b110],
        minkowski_negatives: Metric::signature(3, 1, 0).negative_count() => 1,
        cga_negatives: Metric::conformal(3).negative_count() => 1,
        names: Metric::conformal(3).basis_name(0b11001) => "e1^no^ni".to_string(),
        pga_names: Metric::projective(2).basis_name(0b101) => "e0^e2".to_string()
    }

    #[test]
    fn intercept_matches_squares() {
        let m = Metric::signature(2, 1, 1);
        let expected = [Sign::Pos, Sign::Pos, Sign::Neg, Sign::Zero];
        for (i, s) in expected.into_iter().enumerate() {
            assert_eq!(m.intercept(i, 1 << i), Some((i, s)));
            assert_eq!(m.intercept(i, 0b1111 & !(1 << i)), None);
        }
    }

    #[rstest]
    fn intercept_null_pairs(cga: Metric) {
        // no finds ni and vice versa, never themselves
        assert_eq!(cga.intercept(3, 0b11000), Some((4, Sign::Neg)));
        assert_eq!(cga.intercept(4, 0b01000), Some((3, Sign::Neg)));
        assert_eq!(cga.intercept(3, 0b01000), None);
        assert_eq!(cga.intercept(0, 0b11000), None);
    }

    #[rstest]
    fn multi_term(cga: Metric) {
        assert!(!cga.is_diagonal());
        assert!(cga.multi_term_gp(0b01000, 0b10000));
        assert!(cga.multi_term_gp(0b11000, 0b00001));
        assert!(!cga.multi_term_gp(0b00011, 0b11000));
        assert!(!cga.multi_term_gp(0b01000, 0b00111));
        assert!(!Metric::euclidean(3).multi_term_gp(0b111, 0b111));
    }

    #[rstest]
    fn diagonalization_is_orthogonal(cga: Metric) {
        let d = cga.diagonalization().unwrap();
        assert!(d.base().is_diagonal());
        assert_eq!(d.base().square(3), Sign::Pos);
        assert_eq!(d.base().square(4), Sign::Neg);
        assert_eq!(d.forward(0), &[(0, Rational::ONE)]);
    }

    #[test]
    fn invalid_metrics() {
        use Sign::*;
        assert_eq!(
            Metric::new(vec![Pos, Zero], vec![(1, 2, Neg)]).unwrap_err(),
            GaError::NullPairOutOfRange(1, 2, 2)
        );
        assert_eq!(
            Metric::new(vec![Pos, Zero, Zero], vec![(0, 1, Neg)]).unwrap_err(),
            GaError::NonNullPairVector(0)
        );
        assert_eq!(
            Metric::new(vec![Zero, Zero, Zero], vec![(0, 1, Neg), (1, 2, Neg)]).unwrap_err(),
            GaError::NullPairOverlap(1)
        );
        assert_eq!(
            Metric::new(vec![Pos; 33], vec![]).unwrap_err(),
            GaError::DimensionTooLarge(33)
        );
        assert!(Metric::euclidean(2).with_names(&["x"]).is_err());
    }
}
