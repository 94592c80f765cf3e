//! Error type
use crate::envs::{BuildEnvError, InvalidAction};
use crate::logging::LogError;
use thiserror::Error;

/// Error from the popjym crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PopjymError {
    #[error("error building environment")]
    BuildEnv(#[from] BuildEnvError),
    #[error(transparent)]
    InvalidAction(#[from] InvalidAction),
    #[error("error logging statistics")]
    Log(#[from] LogError),
}
