//! Environment testing utilities
use super::{EnvWithState, Environment};
use crate::simulation::{Actor, RandomActor};
use crate::spaces::{SampleSpace, Space};
use crate::PrngKey;

/// Run an environment with a random actor and check that invariants are satisfied.
///
/// Checks that observations, actions and states stay within their spaces,
/// rewards stay within the reward range,
/// and the discount is `0` exactly on the steps that end an episode.
pub fn check_structured_env<E>(env: &E, params: &E::Params, num_steps: u64, seed: u64)
where
    E: Environment,
    E::Params: Clone,
    E::Observation: Clone,
    E::State: Clone,
    E::ActionSpace: SampleSpace,
{
    let observation_space = env.observation_space(params);
    let action_space = env.action_space(params);
    let state_space = env.state_space(params);
    let (min_reward, max_reward) = env.reward_range();
    assert!(min_reward <= max_reward);

    let [env_key, mut actor_key] = PrngKey::new(seed).split_n();
    let mut actor = RandomActor::new(env.action_space(params));
    let mut stateful = EnvWithState::new(env, params.clone(), env_key);
    assert!(observation_space.contains(stateful.observation()));
    assert!(state_space.contains(stateful.state()));

    for _ in 0..num_steps {
        let (next_key, key) = actor_key.split();
        actor_key = next_key;
        let action = actor.act(stateful.observation(), key);
        assert!(action_space.contains(&action));

        let transition = stateful.step(&action);
        assert!(transition.reward >= min_reward);
        assert!(transition.reward <= max_reward);
        assert!(observation_space.contains(&transition.observation));
        assert!(state_space.contains(&transition.state));
        if transition.done {
            assert_eq!(transition.info.discount, 0.0);
        } else {
            assert_eq!(transition.info.discount, 1.0);
            assert!(!env.is_terminal(&transition.state, params));
        }
    }
}
