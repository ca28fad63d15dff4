//! Simulation-level errors.

use horde_core::AgentId;
use horde_nav::NavError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation has no agents")]
    NoAgents,

    #[error("tick duration must be positive, got {0}")]
    InvalidTickDuration(f32),

    #[error("no agent with id {0}")]
    UnknownAgent(AgentId),

    #[error(transparent)]
    Nav(#[from] NavError),
}

pub type SimResult<T> = Result<T, SimError>;
