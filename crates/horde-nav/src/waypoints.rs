//! Patrol waypoint networks and per-agent traversal cursors.

use horde_core::{AgentRng, Vec3, WaypointId};

use crate::error::{NavError, NavResult};

/// A shared, immutable ring of patrol points.
///
/// Agents never mutate the network; each carries its own [`WaypointCursor`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaypointNetwork {
    points: Vec<Vec3>,
}

impl WaypointNetwork {
    /// Build a network.  At least one waypoint is required.
    pub fn from_points(points: Vec<Vec3>) -> NavResult<WaypointNetwork> {
        if points.is_empty() {
            return Err(NavError::EmptyNetwork);
        }
        Ok(WaypointNetwork { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn position(&self, id: WaypointId) -> NavResult<Vec3> {
        self.points
            .get(id.index())
            .copied()
            .ok_or(NavError::WaypointOutOfRange(id))
    }
}

/// One agent's place in a waypoint network.
///
/// Two traversal modes:
/// - sequential: `0, 1, …, n-1, 0, …`
/// - random patrol: uniform draw that never repeats the current index when
///   the network has more than one waypoint.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaypointCursor {
    current:       WaypointId,
    random_patrol: bool,
}

impl WaypointCursor {
    pub fn new(start: WaypointId, random_patrol: bool) -> WaypointCursor {
        WaypointCursor { current: start, random_patrol }
    }

    /// Start at a uniformly drawn waypoint.  Gives patrolling crowds an
    /// uncorrelated spread across the network.
    pub fn random_start(network: &WaypointNetwork, random_patrol: bool, rng: &mut AgentRng) -> WaypointCursor {
        let start = WaypointId(rng.gen_range(0..network.len() as u32));
        WaypointCursor { current: start, random_patrol }
    }

    pub fn current(&self) -> WaypointId {
        self.current
    }

    pub fn position(&self, network: &WaypointNetwork) -> NavResult<Vec3> {
        network.position(self.current)
    }

    /// Advance to the next waypoint and return it.
    pub fn advance(&mut self, network: &WaypointNetwork, rng: &mut AgentRng) -> WaypointId {
        let n = network.len() as u32;
        if n == 0 {
            self.current = WaypointId::INVALID;
            return self.current;
        }

        self.current = if self.random_patrol && n > 1 {
            // Redraw until the index changes; with n ≥ 2 this terminates
            // with probability 1 and in practice within a draw or two.
            loop {
                let next = WaypointId(rng.gen_range(0..n));
                if next != self.current {
                    break next;
                }
            }
        } else if !self.current.is_valid() {
            WaypointId(0)
        } else {
            WaypointId((self.current.0 + 1) % n)
        };
        self.current
    }
}
