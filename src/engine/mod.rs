//! Running symbolic computations over run-time inputs
//!
//! Computing with `gasym` goes through 3 states:
//!
//! - **Symbolic**: the inputs given to an [`Engine`] are encoded as symbolic
//!   multivectors, whose coefficients are generators instead of values. The
//!   closure given to [`Engine::compute`] combines them, and every product,
//!   dual or grade selection is simplified right away.
//! - **Planned**: the symbolic result is lowered to a [`Plan`], which just
//!   lists which products of input values to sum for each element of the
//!   result. Plans can be cached, see [`Engine::compute_cached`].
//! - **Reified**: [`Computation::reify`] evaluates the plan over the actual
//!   input values, yielding a [`Numeric`] multivector (or a user type, via
//!   [`Computation::reify_as`]).
//!
//! ```
//! use gasym::{algebras::ega::*, engine::Engine, symbolic::Multivector};
//!
//! let v = Vector::new(1.0, 2.0, 3.0);
//! let r = Engine::<Ega, _>::new((&v,))
//!     .compute(|(v,)| v.clone() * v)
//!     .reify::<f64>();
//! assert_eq!(r.get(0), 14.0);
//! ```

mod entity;
mod plan;
mod reify;

pub use entity::*;
pub use plan::*;
pub use reify::*;

use crate::{algebra::MetricAlgebra, symbolic::Multivector, symbolic::Term};
use std::{
    any::{Any, TypeId},
    cell::RefCell,
    collections::HashMap,
    marker::PhantomData,
    sync::Arc,
};

/// A tuple of references to entities, usable as the inputs of an [`Engine`]
pub trait Inputs<A: MetricAlgebra> {
    /// The symbolic form of the inputs: a tuple of multivectors
    type Symbolic;

    /// Encode each input for its position in the tuple
    fn encode(&self) -> Self::Symbolic;

    /// Identifies the shape of the inputs, for plan caching
    fn shape(symbolic: &Self::Symbolic) -> Vec<Vec<Term>>;

    /// Flatten the values of all inputs. Returns the position of the first
    /// field of each input
    fn write_values(&self, out: &mut Vec<f64>) -> Vec<usize>;
}

macro_rules! tuple_inputs {
    (@mv $A:ident $E:ident) => { Multivector<$A> };
    ($($E:ident $idx:tt),+) => {
        impl<'a, A: MetricAlgebra, $($E: Entity<A>),+> Inputs<A> for ($(&'a $E,)+) {
            type Symbolic = ($(tuple_inputs!(@mv A $E),)+);

            fn encode(&self) -> Self::Symbolic {
                ($(self.$idx.encode($idx),)+)
            }

            fn shape(symbolic: &Self::Symbolic) -> Vec<Vec<Term>> {
                vec![$(symbolic.$idx.terms().to_vec()),+]
            }

            fn write_values(&self, out: &mut Vec<f64>) -> Vec<usize> {
                let mut offsets = Vec::new();
                $(
                    offsets.push(out.len());
                    self.$idx.write_fields(out);
                    debug_assert_eq!(out.len() - offsets[$idx], self.$idx.field_count());
                )+
                offsets
            }
        }
    };
}

tuple_inputs!(E0 0);
tuple_inputs!(E0 0, E1 1);
tuple_inputs!(E0 0, E1 1, E2 2);
tuple_inputs!(E0 0, E1 1, E2 2, E3 3);
tuple_inputs!(E0 0, E1 1, E2 2, E3 3, E4 4);
tuple_inputs!(E0 0, E1 1, E2 2, E3 3, E4 4, E5 5);
tuple_inputs!(E0 0, E1 1, E2 2, E3 3, E4 4, E5 5, E6 6);
tuple_inputs!(E0 0, E1 1, E2 2, E3 3, E4 4, E5 5, E6 6, E7 7);

/// What a computation can return: a multivector or a tuple of multivectors
pub trait Output<A: MetricAlgebra> {
    type Plans: Send + Sync + 'static;
    fn plan(self, offsets: &[usize]) -> Self::Plans;
}

impl<A: MetricAlgebra> Output<A> for Multivector<A> {
    type Plans = Plan<A>;
    fn plan(self, offsets: &[usize]) -> Plan<A> {
        Plan::build(&self, offsets)
    }
}

/// Evaluating plans into numeric values
pub trait Reify<T: Scalar> {
    type Output;
    fn reify(&self, values: &[f64]) -> Self::Output;
}

impl<A: MetricAlgebra, T: Scalar> Reify<T> for Plan<A> {
    type Output = Numeric<A, T>;
    fn reify(&self, values: &[f64]) -> Numeric<A, T> {
        self.eval(values)
    }
}

macro_rules! tuple_outputs {
    ($($O:ident $idx:tt),+) => {
        impl<A: MetricAlgebra, $($O: Output<A>),+> Output<A> for ($($O,)+) {
            type Plans = ($($O::Plans,)+);
            fn plan(self, offsets: &[usize]) -> Self::Plans {
                ($(self.$idx.plan(offsets),)+)
            }
        }

        impl<T: Scalar, $($O: Reify<T>),+> Reify<T> for ($($O,)+) {
            type Output = ($($O::Output,)+);
            fn reify(&self, values: &[f64]) -> Self::Output {
                ($(self.$idx.reify(values),)+)
            }
        }
    };
}

tuple_outputs!(O0 0, O1 1);
tuple_outputs!(O0 0, O1 1, O2 2);
tuple_outputs!(O0 0, O1 1, O2 2, O3 3);

/// Binds run-time inputs to a computation over the algebra `A`
pub struct Engine<A, I> {
    inputs: I,
    _algebra: PhantomData<A>,
}

/// The result of [`Engine::compute`]: plans along with the input values
/// they will be evaluated over
#[derive(Debug, Clone)]
pub struct Computation<P> {
    plans: Arc<P>,
    values: Vec<f64>,
}

type PlanCache = HashMap<(TypeId, Vec<Vec<Term>>), Arc<dyn Any + Send + Sync>>;

thread_local! {
    static PLANS: RefCell<PlanCache> = RefCell::new(HashMap::new());
}

impl<A: MetricAlgebra, I: Inputs<A>> Engine<A, I> {
    pub fn new(inputs: I) -> Self {
        Engine {
            inputs,
            _algebra: PhantomData,
        }
    }

    fn values(&self) -> (Vec<f64>, Vec<usize>) {
        let mut values = Vec::new();
        let offsets = self.inputs.write_values(&mut values);
        (values, offsets)
    }

    /// Run `f` over the symbolic forms of the inputs, and plan its result
    pub fn compute<F, O>(&self, f: F) -> Computation<O::Plans>
    where
        F: FnOnce(I::Symbolic) -> O,
        O: Output<A>,
    {
        let (values, offsets) = self.values();
        let plans = f(self.inputs.encode()).plan(&offsets);
        Computation {
            plans: Arc::new(plans),
            values,
        }
    }

    /// Like [`Engine::compute`], but the plan is kept in a thread-local cache
    /// keyed by the type of `f` and the shape of the inputs. The next calls
    /// with the same closure and inputs of the same shape skip the symbolic
    /// phase. A closure that captures something is not a valid key: it is
    /// planned every time, as with [`Engine::compute`]
    pub fn compute_cached<F, O>(&self, f: F) -> Computation<O::Plans>
    where
        F: FnOnce(I::Symbolic) -> O + 'static,
        O: Output<A>,
    {
        if std::mem::size_of::<F>() != 0 {
            log::debug!("Closure captures its environment, not caching its plan");
            return self.compute(f);
        }
        let (values, offsets) = self.values();
        let symbolic = self.inputs.encode();
        let key = (TypeId::of::<F>(), I::shape(&symbolic));
        let cached = PLANS.with(|cache| cache.borrow().get(&key).cloned());
        let plans = match cached.and_then(|p| p.downcast::<O::Plans>().ok()) {
            Some(plans) => {
                log::trace!("Reusing a cached plan");
                plans
            }
            None => {
                let plans = Arc::new(f(symbolic).plan(&offsets));
                let stored: Arc<dyn Any + Send + Sync> = plans.clone();
                PLANS.with(|cache| {
                    cache.borrow_mut().insert(key, stored);
                });
                plans
            }
        };
        Computation { plans, values }
    }
}

impl<P> Computation<P> {
    pub fn plans(&self) -> &P {
        &self.plans
    }

    /// The flattened values of the inputs
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Evaluate the plans
    pub fn reify<T: Scalar>(&self) -> P::Output
    where
        P: Reify<T>,
    {
        self.plans.reify(&self.values)
    }
}

impl<A: MetricAlgebra> Computation<Plan<A>> {
    /// Evaluate the plan and convert the result into some user type
    pub fn reify_as<R: Convert<A>>(&self) -> R {
        R::convert(self.reify::<f64>())
    }
}

/// Remove all the plans cached on the current thread
pub fn clear_plan_cache() {
    PLANS.with(|cache| cache.borrow_mut().clear());
}

/// Number of plans cached on the current thread
pub fn cached_plan_count() -> usize {
    PLANS.with(|cache| cache.borrow().len())
}
