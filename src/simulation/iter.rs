use super::{Actor, Step};
use crate::envs::{EnvWithState, Environment};
use crate::logging::{LogError, Loggable, StatsLogger};
use crate::PrngKey;
use std::iter::FusedIterator;

/// Actor-environment simulation steps.
///
/// An infinite iterator over the steps of consecutive episodes.
/// The environment is reset automatically at the end of each episode.
///
/// Logs
/// * `step/reward` and `step/count` on every step,
/// * `episode/reward`, `episode/length` and `episode/count` at the end of each episode.
pub struct SimSteps<E, T, L>
where
    E: Environment,
{
    pub env: EnvWithState<E>,
    pub actor: T,
    pub logger: L,

    key: PrngKey,
    episode_reward: f64,
    episode_length: u64,
}

impl<E, T, L> SimSteps<E, T, L>
where
    E: Environment,
{
    pub fn new(env: E, params: E::Params, actor: T, key: PrngKey, logger: L) -> Self {
        let [env_key, actor_key] = key.split_n();
        Self {
            env: EnvWithState::new(env, params, env_key),
            actor,
            logger,
            key: actor_key,
            episode_reward: 0.0,
            episode_length: 0,
        }
    }
}

impl<E, T, L> SimSteps<E, T, L>
where
    E: Environment,
    E::Observation: Clone,
    E::State: Clone,
    T: Actor<E::Observation, E::Action>,
    L: StatsLogger,
{
    /// Execute one environment step.
    ///
    /// # Returns
    /// The step, or an error if the logger rejects the step statistics.
    /// The environment advances even if logging fails.
    pub fn step(&mut self) -> Result<Step<E::Observation, E::Action>, LogError> {
        let (key, actor_key) = self.key.split();
        self.key = key;

        let observation = self.env.observation().clone();
        let action = self.actor.act(&observation, actor_key);
        let transition = self.env.step(&action);

        self.episode_reward += transition.reward;
        self.episode_length += 1;
        self.logger.group_start();
        let logged = self.log_step(transition.reward, transition.done);
        self.logger.group_end();
        if transition.done {
            self.episode_reward = 0.0;
            self.episode_length = 0;
        }
        logged?;

        Ok(Step {
            observation,
            action,
            reward: transition.reward,
            next_observation: transition.observation,
            done: transition.done,
            discount: transition.info.discount,
        })
    }

    fn log_step(&mut self, reward: f64, done: bool) -> Result<(), LogError> {
        self.logger
            .group_log("step/reward".into(), Loggable::Scalar(reward))?;
        self.logger
            .group_log("step/count".into(), Loggable::CounterIncrement(1))?;
        if done {
            self.logger.group_log(
                "episode/reward".into(),
                Loggable::Scalar(self.episode_reward),
            )?;
            self.logger.group_log(
                "episode/length".into(),
                Loggable::Scalar(self.episode_length as f64),
            )?;
            // Logged last; `ByCounter` flushes once the counter is seen
            self.logger
                .group_log("episode/count".into(), Loggable::CounterIncrement(1))?;
        }
        Ok(())
    }
}

impl<E, T, L> Iterator for SimSteps<E, T, L>
where
    E: Environment,
    E::Observation: Clone,
    E::State: Clone,
    T: Actor<E::Observation, E::Action>,
    L: StatsLogger,
{
    type Item = Result<Step<E::Observation, E::Action>, LogError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.step())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // infinite
        (usize::MAX, None)
    }
}

impl<E, T, L> FusedIterator for SimSteps<E, T, L>
where
    E: Environment,
    E::Observation: Clone,
    E::State: Clone,
    T: Actor<E::Observation, E::Action>,
    L: StatsLogger,
{
}
