use crate::symbolic::Element;
use thiserror::Error;

/// Errors raised when building metrics or numeric multivectors from user
/// data. Everything the symbolic engine does afterwards is infallible
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GaError {
    #[error("Metric of dimension {0} exceeds the {max} basis vectors an element can hold", max = crate::symbolic::MAX_DIM)]
    DimensionTooLarge(usize),
    #[error("Null pair ({0}, {1}) refers to a basis vector outside of a {2}-dimensional space")]
    NullPairOutOfRange(usize, usize, usize),
    #[error("Basis vector {0} appears in more than one null pair, or is paired with itself")]
    NullPairOverlap(usize),
    #[error("Basis vector {0} is part of a null pair but is declared with a nonzero square")]
    NonNullPairVector(usize),
    #[error("Expected {expected} names for the basis vectors, got {got}")]
    NameCountMismatch { expected: usize, got: usize },
    #[error("Got {elements} elements but {coefficients} coefficients")]
    LengthMismatch { elements: usize, coefficients: usize },
    #[error("Element {0:#b} is given twice")]
    DuplicateElement(Element),
    #[error("Element {element:#b} does not exist in a {dim}-dimensional algebra")]
    ElementOutOfRange { element: Element, dim: usize },
}

pub type Result<T> = std::result::Result<T, GaError>;
