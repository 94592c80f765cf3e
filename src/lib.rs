//! Partially observable reinforcement learning environments.
//!
//! Environments are pure: [`Environment::reset`] and [`Environment::step`] take an explicit
//! [`PrngKey`] and an immutable state value and return a new state.
//! Nothing is mutated and no global random state is used.
#![warn(clippy::cast_lossless)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::missing_const_for_fn)] // has some false positives
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::use_self)]
pub mod envs;
mod error;
pub mod logging;
mod prng;
pub mod simulation;
pub mod spaces;
pub mod utils;

pub use envs::{
    BuildEnv, CartPoleVariant, EnvStructure, Environment, NoisyStatelessCartPole, Transition,
};
pub use error::PopjymError;
pub use prng::{Prng, PrngKey};
pub use simulation::{run_episodes, Actor, Step};
