//! Navigation-subsystem error type.

use thiserror::Error;

use horde_core::WaypointId;

/// Errors produced by `horde-nav`.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("waypoint network has no waypoints")]
    EmptyNetwork,

    #[error("waypoint {0} not in network")]
    WaypointOutOfRange(WaypointId),
}

pub type NavResult<T> = Result<T, NavError>;
