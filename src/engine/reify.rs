//! Numeric multivectors, as obtained by reifying a plan

use crate::{
    algebra::MetricAlgebra,
    error::{GaError, Result},
    grade_set::GradeSet,
    graded::{Graded, Owned},
    symbolic::{grade, Element, MAX_DIM},
};
use std::{fmt, marker::PhantomData};

/// The floating point types a plan can be reified to
pub trait Scalar:
    Copy
    + fmt::Debug
    + PartialEq
    + PartialOrd
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Div<Output = Self>
    + std::ops::Neg<Output = Self>
    + std::ops::AddAssign
    + Send
    + Sync
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn from_f64(x: f64) -> Self;
    fn to_f64(self) -> f64;

    /// `self` to some small positive power, by repeated multiplication
    fn powu(self, n: u32) -> Self {
        (0..n).fold(Self::one(), |acc, _| acc * self)
    }
}

macro_rules! float_scalars {
    ($($t:ty),*) => {
        $(
        impl Scalar for $t {
            #[inline]
            fn zero() -> Self {
                0.0
            }
            #[inline]
            fn one() -> Self {
                1.0
            }
            #[inline]
            fn from_f64(x: f64) -> Self {
                x as $t
            }
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
        )*
    };
}
float_scalars!(f32, f64);

/// A multivector with concrete coefficients. Only the elements the plan it
/// comes from could produce are stored, sorted in increasing order
#[derive(Clone, Debug, PartialEq)]
pub struct Numeric<A, T = f64> {
    elements: Vec<Element>,
    coeffs: Vec<T>,
    _algebra: PhantomData<A>,
}

impl<A: MetricAlgebra, T: Scalar> Numeric<A, T> {
    /// Build a numeric multivector from elements and their coefficients, in
    /// any order
    pub fn from_parts(elements: Vec<Element>, coeffs: Vec<T>) -> Result<Self> {
        if elements.len() != coeffs.len() {
            return Err(GaError::LengthMismatch {
                elements: elements.len(),
                coefficients: coeffs.len(),
            });
        }
        let dim = A::metric().vec_space_dim();
        let mut pairs: Vec<(Element, T)> = elements.into_iter().zip(coeffs).collect();
        if let Some(&(element, _)) = pairs
            .iter()
            .find(|(e, _)| dim < MAX_DIM && e >> dim != 0)
        {
            return Err(GaError::ElementOutOfRange { element, dim });
        }
        pairs.sort_by_key(|(e, _)| *e);
        if let Some(w) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(GaError::DuplicateElement(w[0].0));
        }
        let (elements, coeffs) = pairs.into_iter().unzip();
        Ok(Self::from_sorted(elements, coeffs))
    }

    /// Elements must already be sorted and distinct
    pub(crate) fn from_sorted(elements: Vec<Element>, coeffs: Vec<T>) -> Self {
        debug_assert!(elements.windows(2).all(|w| w[0] < w[1]));
        Numeric {
            elements,
            coeffs,
            _algebra: PhantomData,
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn coefficients(&self) -> &[T] {
        &self.coeffs
    }

    pub fn coefficients_mut(&mut self) -> &mut [T] {
        &mut self.coeffs
    }

    /// The coefficient of some element. Zero if the element isn't stored
    pub fn get(&self, element: Element) -> T {
        match self.elements.binary_search(&element) {
            Ok(i) => self.coeffs[i],
            Err(_) => T::zero(),
        }
    }

    /// Number of stored coefficients
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over (element, coefficient) pairs
    pub fn iter(&self) -> impl Iterator<Item = (Element, T)> + '_ {
        self.elements.iter().copied().zip(self.coeffs.iter().copied())
    }
}

impl<A, T> std::ops::Index<usize> for Numeric<A, T> {
    type Output = T;
    fn index(&self, i: usize) -> &T {
        &self.coeffs[i]
    }
}

impl<A, T> std::ops::IndexMut<usize> for Numeric<A, T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.coeffs[i]
    }
}

impl<A, T> Graded for Numeric<A, T> {
    type RefToGradeSet<'a> = Owned<GradeSet> where Self: 'a;
    fn grade_set(&self) -> Self::RefToGradeSet<'_> {
        Owned(self.elements.iter().map(|e| grade(*e)).collect())
    }
}

/// Writes `x` with `sig` significant digits, switching to scientific
/// notation for large and small magnitudes, and without trailing zeros
fn write_general(f: &mut fmt::Formatter<'_>, x: f64, sig: usize) -> fmt::Result {
    if x == 0.0 || !x.is_finite() {
        return write!(f, "{x}");
    }
    let exp = x.abs().log10().floor() as i32;
    let s = if exp < -5 || exp >= sig as i32 {
        let s = format!("{:.*e}", sig - 1, x);
        match s.split_once('e') {
            Some((mantissa, e)) => format!("{}e{e}", trim_zeros(mantissa)),
            None => s,
        }
    } else {
        let decimals = (sig as i32 - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{x:.decimals$}")).to_string()
    };
    f.write_str(&s)
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

impl<A: MetricAlgebra, T: Scalar> fmt::Display for Numeric<A, T> {
    /// Prints eg. `0.992546 + 0.121869 e1^e2`, with 6 significant digits by
    /// default or with the given precision (`{:.2}`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("0");
        }
        let metric = A::metric();
        for (i, (e, c)) in self.iter().enumerate() {
            let mut c = c.to_f64();
            if i > 0 {
                if c < 0.0 {
                    f.write_str(" - ")?;
                    c = -c;
                } else {
                    f.write_str(" + ")?;
                }
            }
            match f.precision() {
                Some(p) => write!(f, "{c:.p$}")?,
                None => write_general(f, c, 6)?,
            }
            if e != 0 {
                write!(f, " {}", metric.basis_name(e))?;
            }
        }
        Ok(())
    }
}
