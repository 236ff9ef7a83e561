//! Generators (placeholders for run-time scalars) and monomials built from them

use super::Rational;
use std::fmt;

/// Identifies a run-time scalar: which input of a computation it comes from,
/// and which field of that input it reads
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Tag {
    /// Position of the input in the tuple given to the engine
    pub slot: u32,
    /// Index of the field within that input
    pub field: u32,
}

impl Tag {
    pub const fn new(slot: u32, field: u32) -> Self {
        Tag { slot, field }
    }
}

/// A [`Tag`] raised to some positive power
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Generator {
    pub tag: Tag,
    pub degree: u32,
}

impl Generator {
    pub const fn new(tag: Tag, degree: u32) -> Self {
        Generator { tag, degree }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}.{}", self.tag.slot, self.tag.field)?;
        if self.degree > 1 {
            write!(f, "^{}", self.degree)?;
        }
        Ok(())
    }
}

/// A rational coefficient times a product of generators
///
/// Invariant: generators are sorted by tag and each tag appears at most once
/// (equal tags are merged by summing their degrees). Two monomials with the
/// same generators are "like" monomials and can be summed.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Monomial {
    pub(crate) coeff: Rational,
    pub(crate) gens: Vec<Generator>,
}

impl Monomial {
    /// A monomial without generators
    pub fn constant(coeff: Rational) -> Self {
        Monomial {
            coeff,
            gens: Vec::new(),
        }
    }

    /// Build a monomial, normalizing its generators
    pub fn new(coeff: Rational, gens: impl IntoIterator<Item = Generator>) -> Self {
        let mut gens: Vec<_> = gens.into_iter().filter(|g| g.degree > 0).collect();
        gens.sort_by_key(|g| g.tag);
        let mut merged: Vec<Generator> = Vec::with_capacity(gens.len());
        for g in gens {
            match merged.last_mut() {
                Some(last) if last.tag == g.tag => last.degree += g.degree,
                _ => merged.push(g),
            }
        }
        Monomial {
            coeff,
            gens: merged,
        }
    }

    /// `coeff * tag`
    pub fn generator(coeff: Rational, tag: Tag) -> Self {
        Monomial {
            coeff,
            gens: vec![Generator::new(tag, 1)],
        }
    }

    pub fn coeff(&self) -> Rational {
        self.coeff
    }

    pub fn generators(&self) -> &[Generator] {
        &self.gens
    }

    pub fn is_zero(&self) -> bool {
        self.coeff.is_zero()
    }

    /// Total degree, ie. the sum of the degrees of all generators
    pub fn degree(&self) -> u32 {
        self.gens.iter().map(|g| g.degree).sum()
    }

    /// Whether both monomials have exactly the same generators
    pub fn is_like(&self, other: &Monomial) -> bool {
        self.gens == other.gens
    }

    pub fn scaled(&self, k: Rational) -> Self {
        Monomial {
            coeff: self.coeff * k,
            gens: self.gens.clone(),
        }
    }

    /// Product of two monomials. Both generator lists are sorted, so they are
    /// merged in a single pass
    pub fn mul(&self, rhs: &Monomial) -> Monomial {
        let mut gens = Vec::with_capacity(self.gens.len() + rhs.gens.len());
        let (mut i, mut j) = (0, 0);
        while i < self.gens.len() && j < rhs.gens.len() {
            let (a, b) = (self.gens[i], rhs.gens[j]);
            if a.tag < b.tag {
                gens.push(a);
                i += 1;
            } else if b.tag < a.tag {
                gens.push(b);
                j += 1;
            } else {
                gens.push(Generator::new(a.tag, a.degree + b.degree));
                i += 1;
                j += 1;
            }
        }
        gens.extend_from_slice(&self.gens[i..]);
        gens.extend_from_slice(&rhs.gens[j..]);
        Monomial {
            coeff: self.coeff * rhs.coeff,
            gens,
        }
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.gens.is_empty() {
            return write!(f, "{}", self.coeff);
        }
        if self.coeff == Rational::MINUS_ONE {
            f.write_str("-")?;
        } else if !self.coeff.is_one() {
            write!(f, "{}*", self.coeff)?;
        }
        for (i, g) in self.gens.iter().enumerate() {
            if i > 0 {
                f.write_str("*")?;
            }
            write!(f, "{g}")?;
        }
        Ok(())
    }
}

/// Sums monomials, merging like ones and dropping those that cancel out. The
/// result is sorted by generators, which makes it canonical
pub(crate) fn simplify_sum(mut monomials: Vec<Monomial>) -> Vec<Monomial> {
    monomials.sort_by(|a, b| a.gens.cmp(&b.gens));
    let mut res: Vec<Monomial> = Vec::with_capacity(monomials.len());
    for m in monomials {
        match res.last_mut() {
            Some(last) if last.is_like(&m) => last.coeff += m.coeff,
            _ => {
                if let Some(last) = res.last() {
                    if last.is_zero() {
                        res.pop();
                    }
                }
                res.push(m)
            }
        }
    }
    if res.last().map_or(false, Monomial::is_zero) {
        res.pop();
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_macros::*;

    fn x() -> Tag {
        Tag::new(0, 0)
    }
    fn y() -> Tag {
        Tag::new(0, 1)
    }
    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d)
    }

    simple_eqs! {
        merges_same_tags:
            Monomial::new(Rational::ONE, [Generator::new(y(), 1), Generator::new(x(), 2), Generator::new(y(), 3)]).gens
            => vec![Generator::new(x(), 2), Generator::new(y(), 4)],
        mul_sums_degrees:
            Monomial::generator(r(1, 2), x()).mul(&Monomial::generator(r(2, 3), x()))
            => Monomial::new(r(1, 3), [Generator::new(x(), 2)]),
        mul_keeps_order:
            Monomial::generator(Rational::ONE, y()).mul(&Monomial::generator(Rational::ONE, x())).gens
            => vec![Generator::new(x(), 1), Generator::new(y(), 1)],
        like_monomials_sum_exactly:
            simplify_sum(vec![Monomial::generator(r(1, 2), x()), Monomial::generator(r(1, 3), x())])
            => vec![Monomial::generator(r(5, 6), x())],
        cancelling_monomials_vanish:
            simplify_sum(vec![
                Monomial::generator(r(1, 2), x()),
                Monomial::constant(Rational::ONE),
                Monomial::generator(r(-1, 2), x()),
            ])
            => vec![Monomial::constant(Rational::ONE)],
        display: Monomial::new(r(-3, 2), [Generator::new(x(), 2), Generator::new(Tag::new(1, 0), 1)]).to_string()
            => "-3/2*x0.0^2*x1.0".to_string()
    }
}
