//! Represent the effect of geometric algebra primitives over the grades of the
//! multivectors

use bitvec::prelude::*;

/// Represents the set of grades that can be contained in some multivector. You
/// can think of it as the "type" of a multivector, which supports the same
/// operations actual multivectors do, by mirroring the effects those
/// operations have on multivector grades. Therefore, GradeSets can be added or
/// multiplied together, and this will yield the GradeSet of the multivector
/// obtained by addition/geometric multiplication of two multivectors.
///
/// GradeSets are also what grade selection works with: selecting grades of a
/// multivector keeps the terms whose grade is in some GradeSet.
#[derive(Debug, Eq, Clone)]
pub struct GradeSet(BitVec);

impl PartialEq for GradeSet {
    /// Allows equality between bitvecs of different lengths: tests if they are
    /// equal up to some trailing zeroes
    fn eq(&self, other: &Self) -> bool {
        let (small, big) = sort_by_len(&self.0, &other.0);
        big[0..small.len()] == small[..] && big[small.len()..].not_any()
    }
}

/// Grades are just regular positive integers. Alias introduced for clarity
pub type Grade = usize;

impl GradeSet {
    /// The `GradeSet` of _zero_. In GA, `0` is _polymorphic_: it's a scalar or
    /// any k-vector or linear combination of those at the same time. Whatever
    /// the grades contained in a multivector, it can _always_ be zero. And when
    /// a multivector has _no_ grades, then it can _only_ be zero.
    pub fn empty() -> Self {
        GradeSet(BitVec::new())
        // An empty bitvec is just treated as a bitvec full of zeroes
    }

    /// The grade of a k-vector
    pub fn single(k: Grade) -> Self {
        let mut v = bitvec![0; k + 1];
        v.set(k, true);
        GradeSet(v)
    }

    /// Grades ranging from x to y (incl)
    pub fn range(x: Grade, y: Grade) -> Self {
        let mut v = bitvec![0; y + 1];
        v[x..=y].fill(true);
        GradeSet(v)
    }

    /// Grades given as a bitmask: bit `k` set means grade `k` is in the set.
    /// `0b10111` is the set of grades 0, 1, 2 and 4
    pub fn from_mask(mask: u64) -> Self {
        (0..u64::BITS as Grade)
            .filter(|&k| mask & (1 << k) != 0)
            .collect()
    }

    /// Iterate over each grade present in the GradeSet
    pub fn iter(&self) -> impl Iterator<Item = Grade> + '_ {
        self.0.iter_ones()
    }

    /// Whether the GradeSet contains no grades. If so, the expression it is
    /// attached to can only be equal to zero
    pub fn is_empty(&self) -> bool {
        self.0.not_any()
    }

    /// Whether the GradeSet contains exactly one grade
    pub fn is_single(&self) -> bool {
        self.0.count_ones() == 1
    }

    /// Whether the GradeSet contains the grade k
    pub fn contains(&self, k: Grade) -> bool {
        match self.0.get(k) {
            None => false,
            Some(x) => *x,
        }
    }

    /// Whether the GradeSet contains only the grade k
    pub fn is_just(&self, k: Grade) -> bool {
        self.contains(k) && self.is_single()
    }

    /// Whether all the grades of `other` are in `self`
    pub fn includes(&self, other: &GradeSet) -> bool {
        other.iter().all(|k| self.contains(k))
    }

    /// Add a grade to the set
    pub fn add_grade(mut self, k: Grade) -> Self {
        if k >= self.0.len() {
            self.0.resize(k + 1, false);
        }
        self.0.set(k, true);
        self
    }

    /// Remove a grade from the set
    pub fn rm_grade(mut self, k: Grade) -> Self {
        if k < self.0.len() {
            self.0.set(k, false);
        }
        self
    }

    /// Select the grades contained in both `self` and `other`
    pub fn intersection(self, other: GradeSet) -> Self {
        self & other
    }

    /// The grades that the outer product of a k1-vector and a k2-vector can
    /// yield
    pub fn outer(k1: Grade, k2: Grade) -> Self {
        Self::single(k1 + k2)
    }
}

impl FromIterator<Grade> for GradeSet {
    fn from_iter<I: IntoIterator<Item = Grade>>(iter: I) -> Self {
        iter.into_iter().fold(GradeSet::empty(), GradeSet::add_grade)
    }
}

fn sort_by_len<T>(v1: T, v2: T) -> (T, T)
where
    T: std::borrow::Borrow<BitVec>,
{
    if v1.borrow().len() <= v2.borrow().len() {
        (v1, v2)
    } else {
        (v2, v1)
    }
}

impl std::ops::Add for GradeSet {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        rhs.iter().fold(self, GradeSet::add_grade)
    }
}

/// GradeSet intersection: select the grades contained in both `self` and `rhs`.
/// You can think of it as grade projection (extraction) performed on `self`,
/// using `rhs` as the set of grades to keep
impl std::ops::BitAnd for GradeSet {
    type Output = GradeSet;
    fn bitand(self, rhs: Self) -> Self::Output {
        self.iter().filter(|k| rhs.contains(*k)).collect()
    }
}

/// The grades yielded by the geometric product of two multivectors. O(N^3)
/// IMPLEMENTATION FOR NOW, though it is only used for bookkeeping while
/// building expressions, never when evaluating them
impl std::ops::Mul for GradeSet {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        let (small, big) = sort_by_len(self.0, rhs.0);
        if small.is_empty() || small.not_any() || big.not_any() {
            GradeSet::empty()
        } else {
            let mut res = bitvec![0; big.len() + small.len() - 1];
            for r in 0..res.len() {
                for i in small.iter_ones() {
                    for j in big.iter_ones() {
                        let m = (i as i64 - j as i64).abs();
                        if i + j >= r && m <= r as i64 && m % 2 == r as i64 % 2 {
                            res.set(r, true);
                        }
                    }
                }
            }
            GradeSet(res)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const S: fn(Grade) -> GradeSet = GradeSet::single;
    const E: fn() -> GradeSet = GradeSet::empty;

    macro_rules! test_eqs {
        ($($test_name:ident : $a:expr => $b:expr),*) => {
            $(
                #[test]
                fn $test_name() {
                    assert_eq!($a, $b);
                }
            )*
        }
    }

    #[test]
    fn neq() {
        assert_ne!(S(3), S(4))
    }

    test_eqs!(
        add_self_id: S(3) + S(3) => S(3),
        add_empty_id: S(3) + E() => S(3),
        mul_empty_absorb: S(3) * E() => E(),
        mul_vecs: S(1) * S(1) => S(0) + S(2),
        mul_scal_id: S(40) * S(0) => S(40),
        mul_bivec_quadvec: S(2) * S(4) => S(2) + S(4) + S(6),
        mul_trivec_quadvec: S(3) * S(4) => S(1) + S(3) + S(5) + S(7),
        mul_vec_rotor: S(1) * (S(0) + S(2)) => S(1) + S(3),
        range: GradeSet::range(4,6) => S(4) + S(5) + S(6),
        intersect: GradeSet::range(0,10) & GradeSet::range(4,6) => GradeSet::range(4,6),
        intersect_shorter_rhs: GradeSet::range(0,10) & S(2) => S(2),
        from_mask: GradeSet::from_mask(0b10111) => S(0) + S(1) + S(2) + S(4),
        includes: GradeSet::range(0, 4).includes(&(S(1) + S(3))) => true,
        not_includes: S(1).includes(&(S(1) + S(3))) => false,
        single_graded: (S(1) + S(1)).is_single() => true,
        not_single_graded: (S(1) + S(2)).is_single() => false,
        empty_not_single_graded: E().is_single() => false,
        removed: (S(1) + S(2)).rm_grade(2) => S(1),
        iter_grades: (S(1) + S(22) + S(10)).iter().collect::<Vec<_>>() => vec![1,10,22]
    );
}
