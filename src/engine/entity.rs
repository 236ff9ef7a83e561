//! Bridging user data and symbolic multivectors
//!
//! An [`Entity`] is some geometric object stored as a flat list of `f64`
//! fields. When given to an [`Engine`](super::Engine), it is encoded as a
//! symbolic multivector in which each field is replaced by a generator: the
//! symbolic phase never sees the actual values.

use super::reify::{Numeric, Scalar};
use crate::{
    algebra::MetricAlgebra,
    symbolic::{Multivector, Tag},
};

/// An object that can be used as an input of a computation
pub trait Entity<A: MetricAlgebra> {
    /// How many `f64`s [`Entity::write_fields`] pushes
    fn field_count(&self) -> usize;

    /// Push the run-time values of the fields
    fn write_fields(&self, out: &mut Vec<f64>);

    /// The symbolic multivector standing for this entity, when it is the
    /// input number `slot` of a computation. Field `i` must be represented by
    /// the generator `Tag::new(slot, i)`
    fn encode(&self, slot: u32) -> Multivector<A>;
}

/// An object that can be built back from the result of a computation
pub trait Convert<A: MetricAlgebra>: Sized {
    fn convert(mv: Numeric<A, f64>) -> Self;
}

/// The `N` first fields of input `slot`, each as a scalar generator
pub fn fields<A: MetricAlgebra, const N: usize>(slot: u32) -> [Multivector<A>; N] {
    array_init::array_init(|i| Multivector::generator(0, Tag::new(slot, i as u32)))
}

/// A run-time scalar
impl<A: MetricAlgebra> Entity<A> for f64 {
    fn field_count(&self) -> usize {
        1
    }

    fn write_fields(&self, out: &mut Vec<f64>) {
        out.push(*self);
    }

    fn encode(&self, slot: u32) -> Multivector<A> {
        let [x] = fields(slot);
        x
    }
}

/// Each stored element gets its own generator. Elements that are not stored
/// are known to be zero
impl<A: MetricAlgebra, T: Scalar> Entity<A> for Numeric<A, T> {
    fn field_count(&self) -> usize {
        self.len()
    }

    fn write_fields(&self, out: &mut Vec<f64>) {
        out.extend(self.coefficients().iter().map(|c| c.to_f64()));
    }

    fn encode(&self, slot: u32) -> Multivector<A> {
        let terms = self
            .elements()
            .iter()
            .enumerate()
            .map(|(i, e)| crate::symbolic::Term::generator(*e, Tag::new(slot, i as u32)))
            .collect();
        Multivector::from_terms(terms)
    }
}

impl<A: MetricAlgebra> Convert<A> for Numeric<A, f64> {
    fn convert(mv: Numeric<A, f64>) -> Self {
        mv
    }
}

/// Declares a plain struct of `f64` fields, indexable by field position
macro_rules! entity_struct {
    ($(#[$attr:meta])* $name:ident { $($(#[$fattr:meta])* $field:ident),* }) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Default)]
        pub struct $name {
            $($(#[$fattr])* pub $field: f64),*
        }

        impl $name {
            pub const FIELD_COUNT: usize = [$(stringify!($field)),*].len();

            pub fn new($($field: f64),*) -> Self {
                $name { $($field),* }
            }

            fn fields(&self) -> [f64; $name::FIELD_COUNT] {
                [$(self.$field),*]
            }
        }

        impl std::ops::Index<usize> for $name {
            type Output = f64;
            fn index(&self, i: usize) -> &f64 {
                let fields: [&f64; $name::FIELD_COUNT] = [$(&self.$field),*];
                fields[i]
            }
        }

        impl std::ops::IndexMut<usize> for $name {
            fn index_mut(&mut self, i: usize) -> &mut f64 {
                let fields: [&mut f64; $name::FIELD_COUNT] = [$(&mut self.$field),*];
                fields.into_iter().nth(i).unwrap_or_else(|| {
                    panic!("{} has {} fields, got index {i}", stringify!($name), Self::FIELD_COUNT)
                })
            }
        }
    };
}
#[allow(unused_imports)]
pub(crate) use entity_struct;

/// Implements [`Entity`] for a struct declared with `entity_struct!`, given
/// how to build its symbolic form from its fields
macro_rules! impl_entity {
    ($alg:ty, $name:ident, |$($field:ident),*| $encoding:expr) => {
        impl $crate::engine::Entity<$alg> for $name {
            fn field_count(&self) -> usize {
                Self::FIELD_COUNT
            }

            fn write_fields(&self, out: &mut Vec<f64>) {
                out.extend(self.fields());
            }

            fn encode(&self, slot: u32) -> $crate::symbolic::Multivector<$alg> {
                let [$($field),*] = $crate::engine::fields::<$alg, { $name::FIELD_COUNT }>(slot);
                $encoding
            }
        }
    };
}
#[allow(unused_imports)]
pub(crate) use impl_entity;
