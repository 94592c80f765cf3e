//! Wrapping an `Environment` with its current state
use super::{Environment, Transition};
use crate::PrngKey;

/// An [`Environment`] together with its parameters, current state and key.
///
/// Threads the key and state between calls so that callers do not have to.
/// Every call splits a fresh key from the stored one; the sequence of keys, and therefore the
/// whole trajectory, is determined by the initial key and the actions taken.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvWithState<E: Environment> {
    pub env: E,
    pub params: E::Params,
    key: PrngKey,
    observation: E::Observation,
    state: E::State,
}

impl<E: Environment> EnvWithState<E> {
    /// Create a stateful environment and reset it to the start of an episode.
    pub fn new(env: E, params: E::Params, key: PrngKey) -> Self {
        let (key, reset_key) = key.split();
        let (observation, state) = env.reset(reset_key, &params);
        Self {
            env,
            params,
            key,
            observation,
            state,
        }
    }

    /// Observation of the current state.
    pub const fn observation(&self) -> &E::Observation {
        &self.observation
    }

    /// The current state.
    pub const fn state(&self) -> &E::State {
        &self.state
    }

    /// Reset to the start of a new episode.
    pub fn reset(&mut self) -> &E::Observation {
        let reset_key = self.next_key();
        let (observation, state) = self.env.reset(reset_key, &self.params);
        self.observation = observation;
        self.state = state;
        &self.observation
    }

    /// Take a step, resetting automatically at the end of an episode.
    pub fn step(&mut self, action: &E::Action) -> Transition<E::Observation, E::State>
    where
        E::Observation: Clone,
        E::State: Clone,
    {
        let step_key = self.next_key();
        let transition = self.env.step(step_key, &self.state, action, &self.params);
        self.observation = transition.observation.clone();
        self.state = transition.state.clone();
        transition
    }

    fn next_key(&mut self) -> PrngKey {
        let (key, subkey) = self.key.split();
        self.key = key;
        subkey
    }
}
