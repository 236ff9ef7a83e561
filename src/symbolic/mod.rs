//! The symbolic representation of multivectors used during the build phase
//!
//! Coefficients are polynomials with exact rational coefficients over
//! generators. A generator stands for some run-time scalar which is not known
//! while the expression is being simplified. Products, duals and grade
//! selections all act on this representation, so that when a plan is built,
//! all the structure of the result (which basis blades survive, with which
//! polynomial) is already known.

mod monomial;
mod multivector;
mod product;
mod rational;
mod term;
mod unary;

pub use monomial::*;
pub use multivector::*;
pub use product::ProductKind;
pub use rational::*;
pub use term::*;
