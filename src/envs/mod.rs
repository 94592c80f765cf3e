//! Reinforcement learning environments
mod builders;
mod cartpole;
mod stateful;
#[cfg(test)]
pub mod testing;
mod variants;

pub use builders::{BuildEnv, BuildEnvError};
pub use cartpole::{
    CartPoleParams, CartPoleState, CartPoleStateSpace, NoisyStatelessCartPole,
    NoisyStatelessCartPoleConfig, Push,
};
pub use stateful::EnvWithState;
pub use variants::CartPoleVariant;

use crate::spaces::Space;
use crate::PrngKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The external structure of a reinforcement learning environment.
pub trait EnvStructure {
    /// Static parameters shared by every episode (physical constants, for example).
    type Params;
    type Observation;
    type Action;
    type State;

    type ObservationSpace: Space<Element = Self::Observation>;
    type ActionSpace: Space<Element = Self::Action>;
    type StateSpace: Space<Element = Self::State>;

    /// The default parameters of the environment.
    fn default_params(&self) -> Self::Params;

    /// Space containing all possible observations.
    ///
    /// This is not required to be tight:
    /// the space may contain elements that can never be produced as a state observation.
    fn observation_space(&self, params: &Self::Params) -> Self::ObservationSpace;

    /// The space of all possible actions.
    ///
    /// Every element in this space must be a valid action.
    fn action_space(&self, params: &Self::Params) -> Self::ActionSpace;

    /// Space describing the environment state. Used for introspection only.
    fn state_space(&self, params: &Self::Params) -> Self::StateSpace;

    /// A lower and upper bound on possible reward values.
    ///
    /// These bounds are not required to be tight but ideally will be as tight as possible.
    fn reward_range(&self) -> (f64, f64);

    /// Environment name.
    fn name(&self) -> &'static str;

    /// Number of possible actions.
    fn num_actions(&self) -> usize;
}

impl<E: EnvStructure + ?Sized> EnvStructure for &E {
    type Params = E::Params;
    type Observation = E::Observation;
    type Action = E::Action;
    type State = E::State;
    type ObservationSpace = E::ObservationSpace;
    type ActionSpace = E::ActionSpace;
    type StateSpace = E::StateSpace;

    fn default_params(&self) -> Self::Params {
        E::default_params(self)
    }
    fn observation_space(&self, params: &Self::Params) -> Self::ObservationSpace {
        E::observation_space(self, params)
    }
    fn action_space(&self, params: &Self::Params) -> Self::ActionSpace {
        E::action_space(self, params)
    }
    fn state_space(&self, params: &Self::Params) -> Self::StateSpace {
        E::state_space(self, params)
    }
    fn reward_range(&self) -> (f64, f64) {
        E::reward_range(self)
    }
    fn name(&self) -> &'static str {
        E::name(self)
    }
    fn num_actions(&self) -> usize {
        E::num_actions(self)
    }
}

/// A reinforcement learning environment.
///
/// This defines the environment dynamics and structure.
/// It does not internally manage state: every method is a pure function of its arguments.
/// All randomness comes from the explicit `key` argument so
/// the same inputs always produce the same outputs.
pub trait Environment: EnvStructure {
    /// Sample an initial observation and state.
    fn reset_env(&self, key: PrngKey, params: &Self::Params) -> (Self::Observation, Self::State);

    /// Perform a single state transition without resetting at the end of an episode.
    fn step_env(
        &self,
        key: PrngKey,
        state: &Self::State,
        action: &Self::Action,
        params: &Self::Params,
    ) -> Transition<Self::Observation, Self::State>;

    /// Sample an observation of a state.
    fn get_obs(&self, key: PrngKey, state: &Self::State, params: &Self::Params)
        -> Self::Observation;

    /// Whether the state ends the episode.
    fn is_terminal(&self, state: &Self::State, params: &Self::Params) -> bool;

    /// Discount applied to values bootstrapped from `state`.
    fn discount(&self, state: &Self::State, params: &Self::Params) -> f64 {
        if self.is_terminal(state, params) {
            0.0
        } else {
            1.0
        }
    }

    /// Sample an initial observation and state.
    #[inline]
    fn reset(&self, key: PrngKey, params: &Self::Params) -> (Self::Observation, Self::State) {
        self.reset_env(key, params)
    }

    /// Perform a state transition, resetting if the episode is done.
    ///
    /// When the transition is `done`, the observation and state of the returned transition are
    /// those of a freshly reset episode. The reward, `done` flag and info always describe the
    /// transition that was taken.
    fn step(
        &self,
        key: PrngKey,
        state: &Self::State,
        action: &Self::Action,
        params: &Self::Params,
    ) -> Transition<Self::Observation, Self::State> {
        let (step_key, reset_key) = key.split();
        let transition = self.step_env(step_key, state, action, params);
        if transition.done {
            let (observation, state) = self.reset_env(reset_key, params);
            Transition {
                observation,
                state,
                ..transition
            }
        } else {
            transition
        }
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn reset_env(&self, key: PrngKey, params: &Self::Params) -> (Self::Observation, Self::State) {
        E::reset_env(self, key, params)
    }

    fn step_env(
        &self,
        key: PrngKey,
        state: &Self::State,
        action: &Self::Action,
        params: &Self::Params,
    ) -> Transition<Self::Observation, Self::State> {
        E::step_env(self, key, state, action, params)
    }

    fn get_obs(
        &self,
        key: PrngKey,
        state: &Self::State,
        params: &Self::Params,
    ) -> Self::Observation {
        E::get_obs(self, key, state, params)
    }

    fn is_terminal(&self, state: &Self::State, params: &Self::Params) -> bool {
        E::is_terminal(self, state, params)
    }

    fn discount(&self, state: &Self::State, params: &Self::Params) -> f64 {
        E::discount(self, state, params)
    }
}

/// The result of an environment step.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition<O, S> {
    /// Observation of the resulting state.
    pub observation: O,
    /// The resulting state.
    pub state: S,
    /// Reward for this transition.
    pub reward: f64,
    /// Whether this transition ends the episode.
    pub done: bool,
    /// Auxiliary step information.
    pub info: StepInfo,
}

/// Auxiliary information about a step.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// `0.0` if the step ended the episode, otherwise `1.0`.
    pub discount: f64,
}

/// An integer action outside of the action space.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[error("invalid action {action}; expected an index less than {num_actions}")]
pub struct InvalidAction {
    pub action: usize,
    pub num_actions: usize,
}
