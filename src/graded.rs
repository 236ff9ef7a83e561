//! The [`Graded`] trait, for types that contain graded data or act as
//! placeholders for graded data

use crate::grade_set::*;

/// Just a newtype wrapper around any owned type, to provide a Deref
/// implementation that targets that type
pub struct Owned<T>(pub T);

impl<T> std::ops::Deref for Owned<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The trait for all objects from which we can query grades
pub trait Graded {
    /// Either some reference to a preexisting [`GradeSet`] (for Graded objects which do
    /// internally already have some GradeSet which can be reused read-only), or
    /// an [`Owned<GradeSet>`] (for Graded objects which do not directly hold on
    /// to a GradeSet and must reconstruct it on the fly)
    type RefToGradeSet<'a>: std::ops::Deref<Target = GradeSet> + 'a
    where
        Self: 'a;
    /// Get the GradeSet of the object
    fn grade_set(&self) -> Self::RefToGradeSet<'_>;

    /// Whether the object is a pure k-vector
    fn is_k_vector(&self, k: Grade) -> bool {
        self.grade_set().is_just(k)
    }
}

/// The identity implementation. A [`GradeSet`] just returns a reference to
/// itself
impl Graded for GradeSet {
    type RefToGradeSet<'a> = &'a Self;
    fn grade_set(&self) -> Self::RefToGradeSet<'_> {
        self
    }
}

impl<T: Graded> Graded for &T {
    type RefToGradeSet<'a> = T::RefToGradeSet<'a> where Self: 'a;
    fn grade_set(&self) -> Self::RefToGradeSet<'_> {
        (**self).grade_set()
    }
}

/// Scalars
impl Graded for f64 {
    type RefToGradeSet<'a> = Owned<GradeSet>;
    fn grade_set(&self) -> Self::RefToGradeSet<'_> {
        Owned(GradeSet::single(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_macros::*;

    fn is_k<G: Graded>(g: G, k: Grade) -> bool {
        g.is_k_vector(k)
    }

    simple_eqs! {
        scalar_is_grade_0: is_k(3.5f64, 0) => true,
        by_ref: is_k(&GradeSet::single(2), 2) => true,
        mixed: is_k(&&GradeSet::range(0, 2), 1) => false
    }
}
