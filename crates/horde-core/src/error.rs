//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `HordeError` via `From` impls or wrap it as one variant.  Note that a
//! *missing collaborator* (no navigation handle, no animator) is not an
//! error anywhere in this workspace — those degrade to silent no-ops by
//! design.  Errors cover genuine construction, configuration, and IO
//! failures only.

use thiserror::Error;

use crate::{AgentId, WaypointId};

/// The top-level error type for `horde-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum HordeError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("waypoint {0} is out of range for the network")]
    WaypointOutOfRange(WaypointId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `horde-*` crates.
pub type HordeResult<T> = Result<T, HordeError>;
