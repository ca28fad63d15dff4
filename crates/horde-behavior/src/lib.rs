//! `horde-behavior` — the six behavioral states and their contract.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`context`] | `AgentContext` — everything a state may read or request     |
//! | [`state`]   | `AgentState` trait                                          |
//! | [`idle`]    | dwell, then patrol; defers to any threat                    |
//! | [`patrol`]  | waypoint walking with turn-on-spot escalation               |
//! | [`alerted`] | stationary scanning, intelligence-weighted turning          |
//! | [`pursuit`] | chase with distance-scaled re-pathing and a give-up clock   |
//! | [`attack`]  | melee engagement with eased look-at IK                      |
//! | [`feeding`] | satisfaction replenishment at a food source                 |
//!
//! # Design notes
//!
//! States are plain structs owning their tunables and timers.  They never
//! hold a reference to the agent: every hook re-borrows an `&mut dyn
//! AgentContext`, so a state cannot outlive or alias the body it drives.
//! All decisions are expressed through the context as *intent* (speed,
//! destination, seeking direction); the controller owns applying intent to
//! the navigation and animation seams.
//!
//! Threat deference is uniform across states: a sighted player always wins,
//! then lights, then sounds, then food — each state consults the slots at
//! the top of its `on_update` in that order.

pub mod alerted;
pub mod attack;
pub mod context;
pub mod feeding;
pub mod idle;
pub mod patrol;
pub mod pursuit;
pub mod state;


pub use alerted::AlertedState;
pub use attack::AttackState;
pub use context::AgentContext;
pub use feeding::FeedingState;
pub use idle::IdleState;
pub use patrol::PatrolState;
pub use pursuit::PursuitState;
pub use state::AgentState;
