//! Environment builder traits
use super::Environment;
use thiserror::Error;

/// Build an [`Environment`].
///
/// # Design Discussion
/// Environment is an associated trait rather than a generic parameter to facilitate
/// reproducibility: a given environment configuration can construct exactly one environment.
/// The user does not need to store the environment type.
pub trait BuildEnv {
    /// Type of environment to build
    type Environment: Environment;

    /// Build an environment instance.
    fn build_env(&self) -> Result<Self::Environment, BuildEnvError>;
}

/// Error building an environment
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildEnvError {
    #[error("noise sigma must be finite and non-negative, got {0}")]
    InvalidNoiseSigma(f64),
    #[error("the maximum number of steps in an episode must be positive")]
    ZeroEpisodeLength,
    #[error("unknown environment variant {0:?}")]
    UnknownVariant(String),
}
