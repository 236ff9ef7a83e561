//! Exact rational coefficients. Floating point never enters the symbolic
//! phase: coefficients only become [`f64`] when a plan is built

use num_integer::Integer;
use std::{cmp::Ordering, fmt};

/// Unwraps a checked `i64` operation. Wrapping around would silently change
/// the value of a coefficient
fn checked(v: Option<i64>) -> i64 {
    v.unwrap_or_else(|| panic!("rational coefficient overflow"))
}

/// A signed fraction, always kept reduced with a positive denominator.
/// Arithmetic panics instead of overflowing
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    num: i64,
    den: i64,
}

impl Rational {
    pub const ZERO: Rational = Rational { num: 0, den: 1 };
    pub const ONE: Rational = Rational { num: 1, den: 1 };
    pub const MINUS_ONE: Rational = Rational { num: -1, den: 1 };
    pub const ONE_HALF: Rational = Rational { num: 1, den: 2 };
    pub const MINUS_ONE_HALF: Rational = Rational { num: -1, den: 2 };

    /// Build `num / den`. Panics if `den` is zero, like integer division does
    pub fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "Rational with a zero denominator");
        let g = num.gcd(&den);
        let (mut num, mut den) = (num / g, den / g);
        if den < 0 {
            num = checked(num.checked_neg());
            den = checked(den.checked_neg());
        }
        Rational { num, den }
    }

    pub const fn integer(n: i64) -> Self {
        Rational { num: n, den: 1 }
    }

    pub fn numer(&self) -> i64 {
        self.num
    }

    pub fn denom(&self) -> i64 {
        self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    pub fn is_one(&self) -> bool {
        self.num == 1 && self.den == 1
    }

    pub fn is_negative(&self) -> bool {
        self.num < 0
    }

    pub fn abs(self) -> Self {
        Rational {
            num: self.num.abs(),
            den: self.den,
        }
    }

    /// Multiplicative inverse. Panics on zero
    pub fn recip(self) -> Self {
        Rational::new(self.den, self.num)
    }

    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl Default for Rational {
    fn default() -> Self {
        Rational::ZERO
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational::integer(n)
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Rational::integer(n as i64)
    }
}

impl std::ops::Add for Rational {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let g = self.den.gcd(&rhs.den);
        let (l, r) = (self.den / g, rhs.den / g);
        let num = checked(self.num.checked_mul(r)).checked_add(checked(rhs.num.checked_mul(l)));
        Rational::new(checked(num), checked(self.den.checked_mul(r)))
    }
}

impl std::ops::Sub for Rational {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

impl std::ops::Mul for Rational {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        // Cross-reduce first to keep intermediate values small
        let g1 = self.num.gcd(&rhs.den);
        let g2 = rhs.num.gcd(&self.den);
        let (g1, g2) = (g1.max(1), g2.max(1));
        Rational::new(
            checked((self.num / g1).checked_mul(rhs.num / g2)),
            checked((self.den / g2).checked_mul(rhs.den / g1)),
        )
    }
}

impl std::ops::Div for Rational {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        self * rhs.recip()
    }
}

impl std::ops::Neg for Rational {
    type Output = Self;
    fn neg(self) -> Self {
        Rational {
            num: checked(self.num.checked_neg()),
            den: self.den,
        }
    }
}

impl std::ops::AddAssign for Rational {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::MulAssign for Rational {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.num as i128 * other.den as i128).cmp(&(other.num as i128 * self.den as i128))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_macros::*;

    const R: fn(i64, i64) -> Rational = Rational::new;

    simple_eqs! {
        reduces: R(6, -8) => R(-3, 4),
        denom_positive: R(1, -2).denom() => 2,
        add: R(1, 2) + R(1, 3) => R(5, 6),
        sub_to_zero: R(2, 4) - R(1, 2) => Rational::ZERO,
        mul_cross_reduces: R(2, 3) * R(9, 4) => R(3, 2),
        mul_by_zero: R(7, 3) * Rational::ZERO => Rational::ZERO,
        div: R(1, 6) / R(-1, 3) => R(-1, 2),
        ordering: R(-1, 2) < R(1, 3) => true,
        display_fraction: R(-5, 6).to_string() => "-5/6".to_string(),
        display_integer: R(4, 2).to_string() => "2".to_string(),
        to_float: R(1, 4).to_f64() => 0.25
    }

    #[test]
    #[should_panic]
    fn zero_denominator() {
        let _ = Rational::new(1, 0);
    }

    #[test]
    #[should_panic(expected = "rational coefficient overflow")]
    fn power_overflows() {
        let third = R(1, 3);
        let _ = (1..41).fold(third, |acc, _| acc * third);
    }

    #[test]
    #[should_panic(expected = "rational coefficient overflow")]
    fn sum_overflows() {
        let _ = Rational::integer(i64::MAX) + Rational::ONE;
    }

    #[test]
    fn large_denominators_still_add() {
        // The common denominator is not the plain product
        let big = 1 << 40;
        assert_eq!(R(1, 3 * big) + R(1, 6 * big), R(1, 2 * big));
    }
}
