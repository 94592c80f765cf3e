//! Spaces: sets of values with structure.
//!
//! Spaces describe the observations, actions and states of an environment.
//! They are used for introspection and validation; the environment dynamics never consult them
//! except to clip observations.
mod array;
mod index;
mod indexed_type;
mod interval;
#[cfg(test)]
pub mod testing;

pub use array::{ArraySpace, BoxSpace};
pub use index::IndexSpace;
pub use indexed_type::{Indexed, IndexedTypeSpace};
pub use interval::IntervalSpace;

use rand::distributions::Distribution;

/// A mathematical space
pub trait Space {
    type Element;

    /// Check whether a particular value is contained in the space.
    fn contains(&self, value: &Self::Element) -> bool;
}

/// A space containing finitely many elements.
pub trait FiniteSpace: Space {
    /// The number of elements in the space.
    fn size(&self) -> usize;

    /// Get the index of an element.
    fn to_index(&self, element: &Self::Element) -> usize;

    /// Try to convert an index to an element.
    ///
    /// Returns `None` if the index is invalid.
    fn from_index(&self, index: usize) -> Option<Self::Element>;
}

/// A space from which elements can be sampled.
pub trait SampleSpace: Space + Distribution<<Self as Space>::Element> {}
impl<S: Space + Distribution<<S as Space>::Element>> SampleSpace for S {}
