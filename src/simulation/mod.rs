//! Simulating actor-environment interaction
mod iter;

pub use iter::SimSteps;

use crate::envs::Environment;
use crate::logging::{LogError, StatsLogger};
use crate::spaces::SampleSpace;
use crate::PrngKey;
use serde::{Deserialize, Serialize};
use std::mem;

/// Selects actions given observations.
pub trait Actor<O, A> {
    /// Choose an action for the current observation.
    ///
    /// Any randomness must be drawn from `key`.
    fn act(&mut self, observation: &O, key: PrngKey) -> A;
}

impl<F, O, A> Actor<O, A> for F
where
    F: FnMut(&O, PrngKey) -> A,
{
    fn act(&mut self, observation: &O, key: PrngKey) -> A {
        self(observation, key)
    }
}

/// An actor that samples actions uniformly at random from an action space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RandomActor<AS> {
    action_space: AS,
}

impl<AS> RandomActor<AS> {
    pub const fn new(action_space: AS) -> Self {
        Self { action_space }
    }
}

impl<O, AS: SampleSpace> Actor<O, AS::Element> for RandomActor<AS> {
    fn act(&mut self, _: &O, key: PrngKey) -> AS::Element {
        self.action_space.sample(&mut key.rng())
    }
}

/// Description of an environment step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step<O, A> {
    /// The initial observation.
    pub observation: O,
    /// The action taken given the initial observation.
    pub action: A,
    /// The resulting reward.
    pub reward: f64,
    /// The next observation.
    ///
    /// If the step ended the episode then this is the first observation of the next episode.
    pub next_observation: O,
    /// Whether this step ended the episode.
    pub done: bool,
    /// Discount of the resulting state.
    pub discount: f64,
}

/// Summary of a completed episode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Number of steps in the episode.
    pub length: u64,
    /// Sum of rewards over the episode.
    pub total_reward: f64,
}

/// Run an actor in an environment for a number of episodes.
///
/// Episode statistics are logged to `logger`.
/// The environment and actor randomness are both derived from `key`.
///
/// # Returns
/// A summary of each episode in the order they finished,
/// or an error if `logger` rejects the logged statistics.
pub fn run_episodes<E, T, L>(
    env: E,
    params: E::Params,
    actor: T,
    key: PrngKey,
    num_episodes: usize,
    logger: L,
) -> Result<Vec<EpisodeSummary>, LogError>
where
    E: Environment,
    E::Observation: Clone,
    E::State: Clone,
    T: Actor<E::Observation, E::Action>,
    L: StatsLogger,
{
    let mut steps = SimSteps::new(env, params, actor, key, logger);
    let mut summaries = Vec::with_capacity(num_episodes);
    let mut current = EpisodeSummary::default();
    while summaries.len() < num_episodes {
        let step = steps.step()?;
        current.length += 1;
        current.total_reward += step.reward;
        if step.done {
            summaries.push(mem::take(&mut current));
        }
    }
    steps.logger.flush();
    Ok(summaries)
}
