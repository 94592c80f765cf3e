//! Logging statistics from simulation runs
//!
//! Environments never log; statistics are recorded by the simulation layer.
mod chunk;
mod chunk_by_counter;
mod chunk_by_time;
mod display;

pub use chunk::{ChunkLogger, ChunkSummary, Chunker, SummaryWriter};
pub use chunk_by_counter::ByCounter;
pub use chunk_by_time::ByTime;
pub use display::{DisplayBackend, DisplayLogger};

use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Identifier of a logged value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(Cow<'static, str>);

impl Id {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Id {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for Id {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A value that can be logged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Loggable {
    /// Increment a counter by the given amount.
    CounterIncrement(u64),
    /// A scalar value. Aggregate by taking means.
    Scalar(f64),
}

impl Loggable {
    /// The name of this variant
    pub const fn variant_name(&self) -> &'static str {
        match self {
            Self::CounterIncrement(_) => "CounterIncrement",
            Self::Scalar(_) => "Scalar",
        }
    }
}

impl From<f64> for Loggable {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

/// Error logging a value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogError {
    #[error("incompatible value type; previously {prev} now {now}")]
    IncompatibleValue {
        prev: &'static str,
        now: &'static str,
    },
}

/// Log statistics from a simulation run.
///
/// Values are logged in groups; a group is a set of values that logically belong to the same
/// point in time (all values from one environment step, for example).
pub trait StatsLogger {
    /// Start a new log group.
    fn group_start(&mut self);

    /// Log a value within the current group.
    ///
    /// # Returns
    /// An error if the value is structurally incompatible with previous values logged under the
    /// same ID. The value is not logged in that case.
    fn group_log(&mut self, id: Id, value: Loggable) -> Result<(), LogError>;

    /// End the current log group.
    fn group_end(&mut self);

    /// Write out any pending summaries.
    fn flush(&mut self);

    /// Log a single value as its own group.
    fn log(&mut self, id: Id, value: Loggable) -> Result<(), LogError> {
        self.group_start();
        let result = self.group_log(id, value);
        self.group_end();
        result
    }

    /// Log a scalar value.
    ///
    /// # Panics
    /// If a non-scalar value has previously been logged under the same name.
    fn log_scalar(&mut self, name: &'static str, value: f64) {
        self.log(name.into(), Loggable::Scalar(value))
            .expect("name previously used for a different kind of value")
    }

    /// Increment a counter.
    ///
    /// # Panics
    /// If a non-counter value has previously been logged under the same name.
    fn log_counter_increment(&mut self, name: &'static str, increment: u64) {
        self.log(name.into(), Loggable::CounterIncrement(increment))
            .expect("name previously used for a different kind of value")
    }
}

/// Logger that does nothing
impl StatsLogger for () {
    #[inline]
    fn group_start(&mut self) {}
    #[inline]
    fn group_log(&mut self, _: Id, _: Loggable) -> Result<(), LogError> {
        Ok(())
    }
    #[inline]
    fn group_end(&mut self) {}
    #[inline]
    fn flush(&mut self) {}
}

impl<T: StatsLogger + ?Sized> StatsLogger for &mut T {
    #[inline]
    fn group_start(&mut self) {
        T::group_start(self)
    }
    #[inline]
    fn group_log(&mut self, id: Id, value: Loggable) -> Result<(), LogError> {
        T::group_log(self, id, value)
    }
    #[inline]
    fn group_end(&mut self) {
        T::group_end(self)
    }
    #[inline]
    fn flush(&mut self) {
        T::flush(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_logger_accepts_anything() {
        let mut logger = ();
        logger.log_scalar("x", 1.0);
        logger.log_counter_increment("x", 1);
        assert_eq!(logger.log("x".into(), Loggable::Scalar(f64::NAN)), Ok(()));
    }

    #[test]
    fn id_display() {
        assert_eq!(Id::from("episode/length").to_string(), "episode/length");
        assert_eq!(Id::from(String::from("a")).as_str(), "a");
    }

    #[test]
    fn variant_names() {
        assert_eq!(Loggable::from(1.0).variant_name(), "Scalar");
        assert_eq!(
            Loggable::CounterIncrement(1).variant_name(),
            "CounterIncrement"
        );
    }
}
