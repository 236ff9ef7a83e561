//! Plans: what remains of a symbolic multivector once all the symbolic work
//! is done
//!
//! A [`Plan`] only contains, for each element of the result, a list of
//! products of input values to sum. Evaluating it involves no branching
//! and no symbolic data.

use super::reify::{Numeric, Scalar};
use crate::{
    algebra::MetricAlgebra,
    symbolic::{Element, Multivector},
};
use std::marker::PhantomData;

/// `coeff * Π values[index]^exponent`
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub coeff: f64,
    /// (index in the flat input values, exponent)
    pub factors: Vec<(usize, u32)>,
}

impl Instruction {
    fn eval<T: Scalar>(&self, values: &[f64]) -> T {
        self.factors
            .iter()
            .fold(T::from_f64(self.coeff), |acc, &(i, n)| {
                acc * T::from_f64(values[i]).powu(n)
            })
    }
}

/// The coefficient of one element of the result, as a sum of instructions
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub element: Element,
    pub instructions: Vec<Instruction>,
}

/// The lowered form of a [`Multivector`]. Immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct Plan<A> {
    components: Vec<Component>,
    _algebra: PhantomData<A>,
}

impl<A: MetricAlgebra> Plan<A> {
    /// Lower a symbolic multivector. `offsets[s]` is the position in the flat
    /// input values of the first field of input `s`
    pub fn build(mv: &Multivector<A>, offsets: &[usize]) -> Self {
        let components: Vec<Component> = mv
            .terms()
            .iter()
            .map(|t| Component {
                element: t.element(),
                instructions: t
                    .monomials()
                    .iter()
                    .map(|m| Instruction {
                        coeff: m.coeff().to_f64(),
                        factors: m
                            .generators()
                            .iter()
                            .map(|g| {
                                let slot = g.tag.slot as usize;
                                debug_assert!(slot < offsets.len(), "Generator {g} has no input");
                                (offsets[slot] + g.tag.field as usize, g.degree)
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        let plan = Plan {
            components,
            _algebra: PhantomData,
        };
        log::debug!(
            "Built a plan of {} components and {} instructions",
            plan.components.len(),
            plan.instruction_count()
        );
        plan
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The elements the result will have, in increasing order
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.components.iter().map(|c| c.element)
    }

    pub fn instruction_count(&self) -> usize {
        self.components.iter().map(|c| c.instructions.len()).sum()
    }

    /// Multiply-accumulate the instructions over concrete input values
    pub fn eval<T: Scalar>(&self, values: &[f64]) -> Numeric<A, T> {
        let coeffs = self
            .components
            .iter()
            .map(|c| {
                c.instructions
                    .iter()
                    .fold(T::zero(), |acc, ins| acc + ins.eval::<T>(values))
            })
            .collect();
        Numeric::from_sorted(self.elements().collect(), coeffs)
    }
}
