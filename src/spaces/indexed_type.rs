use super::{FiniteSpace, Space};
use rand::distributions::Distribution;
use rand::Rng;
use std::any;
use std::fmt;
use std::marker::PhantomData;

/// An indexed set of finitely many possiblities.
pub trait Indexed {
    /// The number of possible values this type can represent.
    const SIZE: usize;

    /// Convert into an index.
    fn as_index(&self) -> usize;

    /// Create from an index.
    fn from_index(index: usize) -> Option<Self>
    where
        Self: Sized;
}

/// A space defined over an indexed type.
pub struct IndexedTypeSpace<T> {
    element_type: PhantomData<fn() -> T>,
}

impl<T> IndexedTypeSpace<T> {
    pub const fn new() -> Self {
        Self {
            element_type: PhantomData,
        }
    }
}

impl<T> Default for IndexedTypeSpace<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for IndexedTypeSpace<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Copy for IndexedTypeSpace<T> {}

impl<T> PartialEq for IndexedTypeSpace<T> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T> Eq for IndexedTypeSpace<T> {}

impl<T> fmt::Debug for IndexedTypeSpace<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IndexedTypeSpace<{}>", any::type_name::<T>())
    }
}

impl<T: Indexed> fmt::Display for IndexedTypeSpace<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IndexedTypeSpace({})", T::SIZE)
    }
}

impl<T: Indexed> Space for IndexedTypeSpace<T> {
    type Element = T;

    fn contains(&self, _element: &Self::Element) -> bool {
        true
    }
}

impl<T: Indexed> FiniteSpace for IndexedTypeSpace<T> {
    fn size(&self) -> usize {
        T::SIZE
    }

    fn to_index(&self, element: &Self::Element) -> usize {
        T::as_index(element)
    }

    fn from_index(&self, index: usize) -> Option<Self::Element> {
        T::from_index(index)
    }
}

impl<T: Indexed> Distribution<T> for IndexedTypeSpace<T> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        T::from_index(rng.gen_range(0..T::SIZE)).expect("every index below SIZE is valid")
    }
}

#[cfg(test)]
mod trit {
    use super::Indexed;

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub enum Trit {
        Zero,
        One,
        Two,
    }

    impl Indexed for Trit {
        const SIZE: usize = 3;

        fn as_index(&self) -> usize {
            *self as usize
        }

        fn from_index(index: usize) -> Option<Self> {
            match index {
                0 => Some(Self::Zero),
                1 => Some(Self::One),
                2 => Some(Self::Two),
                _ => None,
            }
        }
    }
}
