//! Named cart-pole presets
use super::{BuildEnv, BuildEnvError, NoisyStatelessCartPole, NoisyStatelessCartPoleConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Preset configurations of [`NoisyStatelessCartPole`].
///
/// The stateless variants differ in episode length;
/// the noisy variants differ in observation noise.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CartPoleVariant {
    StatelessCartPoleEasy,
    StatelessCartPoleMedium,
    StatelessCartPoleHard,
    NoisyStatelessCartPoleEasy,
    NoisyStatelessCartPoleMedium,
    NoisyStatelessCartPoleHard,
}

impl CartPoleVariant {
    pub const ALL: [Self; 6] = [
        Self::StatelessCartPoleEasy,
        Self::StatelessCartPoleMedium,
        Self::StatelessCartPoleHard,
        Self::NoisyStatelessCartPoleEasy,
        Self::NoisyStatelessCartPoleMedium,
        Self::NoisyStatelessCartPoleHard,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::StatelessCartPoleEasy => "StatelessCartPoleEasy",
            Self::StatelessCartPoleMedium => "StatelessCartPoleMedium",
            Self::StatelessCartPoleHard => "StatelessCartPoleHard",
            Self::NoisyStatelessCartPoleEasy => "NoisyStatelessCartPoleEasy",
            Self::NoisyStatelessCartPoleMedium => "NoisyStatelessCartPoleMedium",
            Self::NoisyStatelessCartPoleHard => "NoisyStatelessCartPoleHard",
        }
    }

    pub const fn noise_sigma(self) -> f64 {
        match self {
            Self::StatelessCartPoleEasy
            | Self::StatelessCartPoleMedium
            | Self::StatelessCartPoleHard => 0.0,
            Self::NoisyStatelessCartPoleEasy => 0.1,
            Self::NoisyStatelessCartPoleMedium => 0.2,
            Self::NoisyStatelessCartPoleHard => 0.3,
        }
    }

    pub const fn max_steps_in_episode(self) -> usize {
        match self {
            Self::StatelessCartPoleMedium => 400,
            Self::StatelessCartPoleHard => 600,
            Self::StatelessCartPoleEasy
            | Self::NoisyStatelessCartPoleEasy
            | Self::NoisyStatelessCartPoleMedium
            | Self::NoisyStatelessCartPoleHard => 200,
        }
    }

    pub const fn config(self) -> NoisyStatelessCartPoleConfig {
        NoisyStatelessCartPoleConfig {
            noise_sigma: self.noise_sigma(),
            max_steps_in_episode: self.max_steps_in_episode(),
        }
    }

    /// Build the environment.
    ///
    /// Presets are always valid so this cannot fail.
    pub const fn build(self) -> NoisyStatelessCartPole {
        NoisyStatelessCartPole::new(self.noise_sigma(), self.max_steps_in_episode())
    }
}

impl BuildEnv for CartPoleVariant {
    type Environment = NoisyStatelessCartPole;

    fn build_env(&self) -> Result<Self::Environment, BuildEnvError> {
        Ok(self.build())
    }
}

impl fmt::Display for CartPoleVariant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CartPoleVariant {
    type Err = BuildEnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.name() == s)
            .ok_or_else(|| BuildEnvError::UnknownVariant(s.into()))
    }
}
