//! Array space
use super::{IntervalSpace, Space};
use rand::distributions::Distribution;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::array;
use std::fmt;

/// A Cartesian product of `N` spaces of the same type (but not necessarily the same space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
// See <https://github.com/est31/serde-big-array/issues/12#issue-1115462786>
#[serde(bound(
    serialize = "for<'a> S: Serialize + Deserialize<'a>",
    deserialize = "S: Serialize + Deserialize<'de>"
))]
pub struct ArraySpace<S, const N: usize> {
    // Serde does not natively support const generics, BigArray provides a work-around impl
    #[serde(with = "BigArray")]
    inner_spaces: [S; N],
}

impl<S, const N: usize> ArraySpace<S, N> {
    pub const fn new(inner_spaces: [S; N]) -> Self {
        Self { inner_spaces }
    }

    pub const fn inner_spaces(&self) -> &[S; N] {
        &self.inner_spaces
    }
}

impl<S: Space, const N: usize> Space for ArraySpace<S, N> {
    type Element = [S::Element; N];

    fn contains(&self, value: &Self::Element) -> bool {
        self.inner_spaces
            .iter()
            .zip(value)
            .all(|(s, v)| s.contains(v))
    }
}

impl<S, const N: usize> Distribution<<Self as Space>::Element> for ArraySpace<S, N>
where
    S: Space + Distribution<S::Element>,
{
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> <Self as Space>::Element {
        array::from_fn(|i| self.inner_spaces[i].sample(rng))
    }
}

impl<S: fmt::Display, const N: usize> fmt::Display for ArraySpace<S, N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ArraySpace(")?;
        for (i, space) in self.inner_spaces.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", space)?;
        }
        write!(f, ")")
    }
}

/// A box of real vectors: independent closed bounds on each of `N` dimensions.
pub type BoxSpace<const N: usize> = ArraySpace<IntervalSpace<f64>, N>;

impl<const N: usize> ArraySpace<IntervalSpace<f64>, N> {
    /// Create a box from lower and upper bound vectors.
    ///
    /// # Panics
    /// If `low[i] > high[i]` for any `i`.
    pub fn from_bounds(low: [f64; N], high: [f64; N]) -> Self {
        Self::new(array::from_fn(|i| IntervalSpace::new(low[i], high[i])))
    }

    /// Lower bounds of each dimension.
    pub fn low(&self) -> [f64; N] {
        self.inner_spaces.map(|s| s.low)
    }

    /// Upper bounds of each dimension.
    pub fn high(&self) -> [f64; N] {
        self.inner_spaces.map(|s| s.high)
    }

    /// Clip each element of a vector into the bounds of its dimension.
    pub fn clip(&self, value: [f64; N]) -> [f64; N] {
        array::from_fn(|i| self.inner_spaces[i].clip(value[i]))
    }
}

#[cfg(test)]
mod space {
    use super::super::{testing, IndexSpace};
    use super::*;

    #[test]
    fn empty_contains_empty() {
        let space = ArraySpace::<IndexSpace, 0>::new([]);
        assert!(space.contains(&[]));
    }

    #[test]
    fn i3i4_contains_2_1() {
        let space = ArraySpace::new([IndexSpace::new(3), IndexSpace::new(4)]);
        assert!(space.contains(&[2, 1]));
    }

    #[test]
    fn i3i4_not_contains_2_4() {
        let space = ArraySpace::new([IndexSpace::new(3), IndexSpace::new(4)]);
        assert!(!space.contains(&[2, 4]));
    }

    #[test]
    fn i3i4_contains_samples() {
        let space = ArraySpace::new([IndexSpace::new(3), IndexSpace::new(4)]);
        testing::check_contains_samples(&space, 10);
    }

    #[test]
    fn display() {
        let space = ArraySpace::new([IndexSpace::new(3), IndexSpace::new(4)]);
        assert_eq!(
            space.to_string(),
            "ArraySpace(IndexSpace(3), IndexSpace(4))"
        );
    }
}
