//! `IntervalSpace` definition
use super::Space;
use num_traits::Float;
use rand::distributions::Distribution;
use rand::Rng;
use rand_distr::{Exp1, StandardNormal};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A closed interval of floating-point numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalSpace<T = f64> {
    pub low: T,
    pub high: T,
}

impl<T: PartialOrd> IntervalSpace<T> {
    pub fn new(low: T, high: T) -> Self {
        assert!(low <= high, "require low <= high");
        Self { low, high }
    }
}

impl<T: Float> IntervalSpace<T> {
    /// The interval `[-bound, bound]`.
    pub fn symmetric(bound: T) -> Self {
        Self::new(-bound, bound)
    }

    /// Clamp a value into the interval.
    ///
    /// NaN is passed through unchanged.
    pub fn clip(&self, value: T) -> T {
        if value < self.low {
            self.low
        } else if value > self.high {
            self.high
        } else {
            value
        }
    }
}

/// The default interval is the full real number line.
impl<T: Float> Default for IntervalSpace<T> {
    fn default() -> Self {
        Self {
            low: T::neg_infinity(),
            high: T::infinity(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for IntervalSpace<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IntervalSpace({}, {})", self.low, self.high)
    }
}

impl<T: Float> Space for IntervalSpace<T> {
    type Element = T;

    fn contains(&self, value: &Self::Element) -> bool {
        &self.low <= value && value <= &self.high && value.is_finite()
    }
}

impl<T: PartialOrd> PartialOrd for IntervalSpace<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.low == other.low && self.high == other.high {
            Some(Ordering::Equal)
        } else if self.low >= other.low && self.high <= other.high {
            Some(Ordering::Less)
        } else if self.low <= other.low && self.high >= other.high {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl Distribution<f64> for IntervalSpace<f64> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match (self.low.is_finite(), self.high.is_finite()) {
            // The width of a finite interval can still overflow (e.g. `±MAX`)
            (true, true) if (self.high - self.low).is_finite() => {
                rng.gen_range(self.low..=self.high)
            }
            (true, true) => {
                let value: f64 = StandardNormal.sample(rng);
                self.clip(value)
            }
            (true, false) => {
                let offset: f64 = Exp1.sample(rng);
                self.low + offset
            }
            (false, true) => {
                let offset: f64 = Exp1.sample(rng);
                self.high - offset
            }
            (false, false) => StandardNormal.sample(rng),
        }
    }
}

impl Distribution<f32> for IntervalSpace<f32> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match (self.low.is_finite(), self.high.is_finite()) {
            // The width of a finite interval can still overflow (e.g. `±MAX`)
            (true, true) if (self.high - self.low).is_finite() => {
                rng.gen_range(self.low..=self.high)
            }
            (true, true) => {
                let value: f32 = StandardNormal.sample(rng);
                self.clip(value)
            }
            (true, false) => {
                let offset: f32 = Exp1.sample(rng);
                self.low + offset
            }
            (false, true) => {
                let offset: f32 = Exp1.sample(rng);
                self.high - offset
            }
            (false, false) => StandardNormal.sample(rng),
        }
    }
}

#[cfg(test)]
mod space {
    use super::super::testing;
    use super::*;

    #[test]
    fn unit_contains_0() {
        let space = IntervalSpace::new(0.0, 1.0);
        assert!(space.contains(&0.0));
    }

    #[test]
    fn unit_contains_1() {
        let space = IntervalSpace::new(0.0, 1.0);
        assert!(space.contains(&1.0));
    }

    #[test]
    fn unit_not_contains_2() {
        let space = IntervalSpace::new(0.0, 1.0);
        assert!(!space.contains(&2.0));
    }

    #[test]
    fn unit_contains_samples() {
        let space = IntervalSpace::new(0.0, 1.0);
        testing::check_contains_samples(&space, 20);
    }

    #[test]
    fn unbounded_not_contains_inf() {
        let space = IntervalSpace::default();
        assert!(!space.contains(&f64::INFINITY));
    }

    #[test]
    fn unbounded_not_contains_nan() {
        let space = IntervalSpace::default();
        assert!(!space.contains(&f64::NAN));
    }

    #[test]
    fn unbounded_contains_samples() {
        let space = IntervalSpace::<f64>::default();
        testing::check_contains_samples(&space, 20);
    }

    #[test]
    fn max_bounded_contains_samples() {
        let space = IntervalSpace::symmetric(f64::MAX);
        testing::check_contains_samples(&space, 20);
    }

    #[test]
    fn half_contains_samples() {
        let space = IntervalSpace::new(2.0, f64::INFINITY);
        testing::check_contains_samples(&space, 20);
    }

    #[test]
    fn point_contains_samples() {
        let space = IntervalSpace::new(2.0, 2.0);
        testing::check_contains_samples(&space, 5);
    }

    #[test]
    fn f32_contains_samples() {
        let space = IntervalSpace::<f32>::new(-1.0, 3.0);
        testing::check_contains_samples(&space, 20);
    }

    #[test]
    #[should_panic]
    fn empty_interval_panics() {
        let _ = IntervalSpace::new(1.0, 0.0);
    }

    #[test]
    fn subset_lt() {
        assert!(IntervalSpace::new(0.0, 1.0) < IntervalSpace::new(-1.0, 1.0));
    }

    #[test]
    fn disjoint_incomparable() {
        assert_eq!(
            IntervalSpace::new(0.0, 1.0).partial_cmp(&IntervalSpace::new(2.0, 3.0)),
            None
        );
    }
}

#[cfg(test)]
mod clip {
    use super::*;

    #[test]
    fn inside_unchanged() {
        assert_eq!(IntervalSpace::new(-1.0, 1.0).clip(0.25), 0.25);
    }

    #[test]
    fn below_to_low() {
        assert_eq!(IntervalSpace::new(-1.0, 1.0).clip(-3.0), -1.0);
    }

    #[test]
    fn above_to_high() {
        assert_eq!(IntervalSpace::new(-1.0, 1.0).clip(3.0), 1.0);
    }

    #[test]
    fn infinity_to_high() {
        assert_eq!(IntervalSpace::symmetric(4.8).clip(f64::INFINITY), 4.8);
    }

    #[test]
    fn nan_passes_through() {
        assert!(IntervalSpace::new(-1.0, 1.0).clip(f64::NAN).is_nan());
    }
}
