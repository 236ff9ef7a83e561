/*!
# Geometric Algebra, simplified symbolically

Write geometric algebra expressions over some metric, and let `gasym`
reduce them to the bare arithmetic they amount to before any actual number
is read.

The algebra in use (dimension and metric) is a type parameter: a zero-sized
marker implementing [`algebra::MetricAlgebra`], usually declared with
[`define_algebra`]. Mixing multivectors of two algebras is therefore a type
error. A few common algebras come with the `algebras` feature, in
[`algebras`].

Computing with `gasym` goes through 3 states:

- 1: **Symbolic**. The inputs (any [`engine::Entity`]) are encoded as
  [`symbolic::Multivector`]s whose coefficients are polynomials over
  _generators_, one per run-time field of the inputs. The user closure
  combines them with the usual operators (`*` geometric product, `^` outer
  product, `|` left contraction, `>>` contraction, `&` regressive product,
  `!` dual), and every operation is simplified right away with exact
  rational arithmetic: blades cancel, grades vanish, null vectors square to
  zero. Nothing here reads the actual data.
- 2: **Planned**. What remains is lowered to a [`engine::Plan`]: for each
  blade of the result, a sum of products of input values. Since this only
  depends on the structure of the inputs and not on their values, plans can
  be cached and reused ([`Engine::compute_cached`]).
- 3: **Reified**. The plan is evaluated over the actual input values, with
  no branching and no symbolic data left, yielding a [`Numeric`]
  multivector or any type implementing [`engine::Convert`].

```
use gasym::{algebras::cga::*, Engine};

let (p1, p2) = (Point::new(1.0, 2.0, 3.0), Point::new(4.0, 6.0, 3.0));
let d = Engine::<Cga, _>::new((&p1, &p2))
    .compute(|(p1, p2)| p1.scal(&p2) * -2)
    .reify::<f64>();
assert_eq!(d.get(0), 25.0);
```
*/

pub mod algebra;
#[cfg(feature = "algebras")]
pub mod algebras;
pub mod engine;
pub mod error;
pub mod grade_set;
pub mod graded;
pub mod symbolic;

pub use algebra::{Metric, MetricAlgebra};
pub use engine::{Engine, Numeric};
pub use error::{GaError, Result};
pub use grade_set::{Grade, GradeSet};
pub use graded::Graded;
pub use symbolic::Multivector;

#[doc(hidden)]
pub use once_cell;
