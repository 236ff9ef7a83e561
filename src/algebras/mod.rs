//! Ready-made algebras, along with some entities to feed them with
//!
//! Each submodule declares its algebra with [`define_algebra`](crate::define_algebra)
//! and the geometric objects that are usually given to it as inputs.

pub mod cga;
pub mod ega;
pub mod pga2;
