use super::{
    BuildEnv, BuildEnvError, EnvStructure, Environment, InvalidAction, StepInfo, Transition,
};
use crate::spaces::{BoxSpace, IndexSpace, Indexed, IndexedTypeSpace, IntervalSpace, Space};
use crate::PrngKey;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Configuration for the [`NoisyStatelessCartPole`] environment.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoisyStatelessCartPoleConfig {
    /// Standard deviation of the Gaussian noise added to each observed value.
    pub noise_sigma: f64,
    /// Maximum number of steps in an episode.
    pub max_steps_in_episode: usize,
}

impl Default for NoisyStatelessCartPoleConfig {
    fn default() -> Self {
        Self {
            noise_sigma: 0.0,
            max_steps_in_episode: 200,
        }
    }
}

impl BuildEnv for NoisyStatelessCartPoleConfig {
    type Environment = NoisyStatelessCartPole;

    fn build_env(&self) -> Result<Self::Environment, BuildEnvError> {
        if !(self.noise_sigma.is_finite() && self.noise_sigma >= 0.0) {
            return Err(BuildEnvError::InvalidNoiseSigma(self.noise_sigma));
        }
        if self.max_steps_in_episode == 0 {
            return Err(BuildEnvError::ZeroEpisodeLength);
        }
        Ok(NoisyStatelessCartPole::new(
            self.noise_sigma,
            self.max_steps_in_episode,
        ))
    }
}

/// Noisy stateless Cart-Pole environment
///
/// Consists of a simulated cart on a track with a vertical pole attached by a hinge on the top.
/// The goal is to keep the pole upright by applying left and right forces to the cart.
///
/// The agent observes only the cart position and the pole angle, without velocities,
/// each perturbed by independent Gaussian noise with standard deviation `noise_sigma`.
/// Episodes end when the cart or pole leave their bounds or after `max_steps_in_episode` steps.
///
/// Each surviving step is rewarded with `1 / max_steps_in_episode` so that a full-length
/// episode has a return of 1. A step taken from an already terminal state is rewarded `-1`.
/// The reward of a step depends on whether the state *before* the step was terminal.
///
/// The dynamics and default constants are those of the
/// [OpenAI Gym][gym_cartpole] [CartPole-v1 environment][cartpole_source],
/// integrated with the forward Euler method.
///
/// [gym_cartpole]: https://gym.openai.com/envs/CartPole-v1/
/// [cartpole_source]: https://github.com/openai/gym/blob/master/gym/envs/classic_control/cartpole.py
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoisyStatelessCartPole {
    noise_sigma: f64,
    max_steps_in_episode: usize,
}

impl NoisyStatelessCartPole {
    /// Create a new environment without validating the arguments.
    ///
    /// Use [`NoisyStatelessCartPoleConfig`] for a checked constructor.
    pub const fn new(noise_sigma: f64, max_steps_in_episode: usize) -> Self {
        Self {
            noise_sigma,
            max_steps_in_episode,
        }
    }

    pub const fn noise_sigma(&self) -> f64 {
        self.noise_sigma
    }

    pub const fn max_steps_in_episode(&self) -> usize {
        self.max_steps_in_episode
    }

    /// Reward for surviving a step.
    #[allow(clippy::cast_precision_loss)]
    fn step_reward(&self) -> f64 {
        1.0 / self.max_steps_in_episode as f64
    }
}

impl Default for NoisyStatelessCartPole {
    fn default() -> Self {
        Self::new(0.0, 200)
    }
}

/// A force applied to the cart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Push {
    Left,
    Right,
}

impl Indexed for Push {
    const SIZE: usize = 2;

    fn as_index(&self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Left),
            1 => Some(Self::Right),
            _ => None,
        }
    }
}

impl TryFrom<usize> for Push {
    type Error = InvalidAction;

    fn try_from(action: usize) -> Result<Self, Self::Error> {
        Self::from_index(action).ok_or(InvalidAction {
            action,
            num_actions: Self::SIZE,
        })
    }
}

impl From<Push> for usize {
    fn from(push: Push) -> Self {
        push.as_index()
    }
}

/// Physical constants for the [`NoisyStatelessCartPole`] environment.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartPoleParams {
    /// Downward acceleration of gravity (m/s^2)
    pub gravity: f64,
    /// Mass of the cart (kg)
    pub masscart: f64,
    /// Mass of the pole (kg)
    pub masspole: f64,
    /// Half the length of the pole (m)
    pub length: f64,
    /// Magnitude of the force (N) applied by actions.
    pub force_mag: f64,
    /// Simulation time step (s)
    pub tau: f64,
    /// Maximum absolute pole angle from vertical (radians) before the episode is ended.
    pub theta_threshold_radians: f64,
    /// Maximum absolute position (meters) before the episode is ended.
    pub x_threshold: f64,
}

impl Default for CartPoleParams {
    fn default() -> Self {
        // Defaults from the OpenAI CartPole-v1 environment
        Self {
            gravity: 9.8,
            masscart: 1.0,
            masspole: 0.1,
            length: 0.5,
            force_mag: 10.0,
            tau: 0.02,
            theta_threshold_radians: 12.0 * 2.0 * PI / 360.0, // 12 degrees
            x_threshold: 2.4,
        }
    }
}

impl CartPoleParams {
    /// Combined mass of the cart and pole (kg)
    pub fn total_mass(&self) -> f64 {
        self.masscart + self.masspole
    }

    /// `masspole * length`
    pub fn polemass_length(&self) -> f64 {
        self.masspole * self.length
    }

    /// Simulate the state for one time step with an applied force on the cart (in N).
    ///
    /// The episode step counter is not modified.
    fn next_state(&self, state: &CartPoleState, force: f64) -> CartPoleState {
        let total_mass = self.total_mass();
        let polemass_length = self.polemass_length();
        let (sin_theta, cos_theta) = state.theta.sin_cos();

        let temp = (force + polemass_length * state.theta_dot * state.theta_dot * sin_theta)
            / total_mass;
        let theta_acc = (self.gravity * sin_theta - cos_theta * temp)
            / (self.length * (4.0 / 3.0 - self.masspole * cos_theta * cos_theta / total_mass));
        let x_acc = temp - polemass_length * theta_acc * cos_theta / total_mass;

        // Forward Euler: positions are updated with the velocities from the start of the step
        CartPoleState {
            x: state.x + self.tau * state.x_dot,
            x_dot: state.x_dot + self.tau * x_acc,
            theta: state.theta + self.tau * state.theta_dot,
            theta_dot: state.theta_dot + self.tau * theta_acc,
            time: state.time,
        }
    }
}

/// State of the [`NoisyStatelessCartPole`] environment.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartPoleState {
    /// Cart position from the track midpoint (m).
    pub x: f64,
    /// Cart velocity (m/s).
    pub x_dot: f64,
    /// Angle of the pole from vertical (radians).
    pub theta: f64,
    /// Pole angular velocity about the hinge (radians / s).
    pub theta_dot: f64,
    /// Number of steps taken in the current episode.
    pub time: usize,
}

/// [`NoisyStatelessCartPole`] state space.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartPoleStateSpace {
    pub x: IntervalSpace,
    pub x_dot: IntervalSpace,
    pub theta: IntervalSpace,
    pub theta_dot: IntervalSpace,
    pub time: IndexSpace,
}

impl Space for CartPoleStateSpace {
    type Element = CartPoleState;

    fn contains(&self, value: &Self::Element) -> bool {
        self.x.contains(&value.x)
            && self.x_dot.contains(&value.x_dot)
            && self.theta.contains(&value.theta)
            && self.theta_dot.contains(&value.theta_dot)
            && self.time.contains(&value.time)
    }
}

impl Distribution<CartPoleState> for CartPoleStateSpace {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> CartPoleState {
        CartPoleState {
            x: self.x.sample(rng),
            x_dot: self.x_dot.sample(rng),
            theta: self.theta.sample(rng),
            theta_dot: self.theta_dot.sample(rng),
            time: self.time.sample(rng),
        }
    }
}

impl EnvStructure for NoisyStatelessCartPole {
    type Params = CartPoleParams;
    type Observation = [f64; 2];
    type Action = Push;
    type State = CartPoleState;
    type ObservationSpace = BoxSpace<2>;
    type ActionSpace = IndexedTypeSpace<Push>;
    type StateSpace = CartPoleStateSpace;

    fn default_params(&self) -> Self::Params {
        CartPoleParams::default()
    }

    /// Box bounding the observed cart position and pole angle.
    ///
    /// # Panics
    /// If either threshold in `params` is negative or NaN.
    fn observation_space(&self, params: &Self::Params) -> Self::ObservationSpace {
        BoxSpace::new([
            IntervalSpace::symmetric(2.0 * params.x_threshold),
            IntervalSpace::symmetric(2.0 * params.theta_threshold_radians),
        ])
    }

    fn action_space(&self, _: &Self::Params) -> Self::ActionSpace {
        IndexedTypeSpace::new()
    }

    fn state_space(&self, params: &Self::Params) -> Self::StateSpace {
        CartPoleStateSpace {
            x: IntervalSpace::symmetric(2.0 * params.x_threshold),
            x_dot: IntervalSpace::symmetric(f64::MAX),
            theta: IntervalSpace::symmetric(2.0 * params.theta_threshold_radians),
            theta_dot: IntervalSpace::symmetric(f64::MAX),
            time: IndexSpace::new(self.max_steps_in_episode),
        }
    }

    fn reward_range(&self) -> (f64, f64) {
        (-1.0, self.step_reward())
    }

    fn name(&self) -> &'static str {
        "CartPole-v1"
    }

    fn num_actions(&self) -> usize {
        Push::SIZE
    }
}

impl Environment for NoisyStatelessCartPole {
    fn reset_env(&self, key: PrngKey, params: &Self::Params) -> (Self::Observation, Self::State) {
        // All physical values are sampled from the same range
        let dist = Uniform::new(-0.05, 0.05);
        let mut rng = key.rng();
        let state = CartPoleState {
            x: dist.sample(&mut rng),
            x_dot: dist.sample(&mut rng),
            theta: dist.sample(&mut rng),
            theta_dot: dist.sample(&mut rng),
            time: 0,
        };
        let (obs_key, _) = key.split();
        (self.get_obs(obs_key, &state, params), state)
    }

    fn step_env(
        &self,
        key: PrngKey,
        state: &Self::State,
        action: &Self::Action,
        params: &Self::Params,
    ) -> Transition<Self::Observation, Self::State> {
        let prev_terminal = self.is_terminal(state, params);
        let force = match action {
            Push::Left => -params.force_mag,
            Push::Right => params.force_mag,
        };
        let next_state = CartPoleState {
            time: state.time + 1,
            ..params.next_state(state, force)
        };
        let reward = if prev_terminal {
            -1.0
        } else {
            self.step_reward()
        };
        let done = self.is_terminal(&next_state, params);
        Transition {
            observation: self.get_obs(key, &next_state, params),
            state: next_state,
            reward,
            done,
            info: StepInfo {
                discount: self.discount(&next_state, params),
            },
        }
    }

    fn get_obs(
        &self,
        key: PrngKey,
        state: &Self::State,
        params: &Self::Params,
    ) -> Self::Observation {
        let mut rng = key.rng();
        let x_noise: f64 = rng.sample(StandardNormal);
        let theta_noise: f64 = rng.sample(StandardNormal);
        // Unchecked bounds; a NaN threshold leaves the value unclipped
        let x_bound = 2.0 * params.x_threshold;
        let theta_bound = 2.0 * params.theta_threshold_radians;
        [
            IntervalSpace {
                low: -x_bound,
                high: x_bound,
            }
            .clip(state.x + x_noise * self.noise_sigma),
            IntervalSpace {
                low: -theta_bound,
                high: theta_bound,
            }
            .clip(state.theta + theta_noise * self.noise_sigma),
        ]
    }

    fn is_terminal(&self, state: &Self::State, params: &Self::Params) -> bool {
        state.x < -params.x_threshold
            || state.x > params.x_threshold
            || state.theta < -params.theta_threshold_radians
            || state.theta > params.theta_threshold_radians
            || state.time >= self.max_steps_in_episode
    }
}
