//! `horde-trace` — CSV traces of simulation runs.
//!
//! # Crate layout
//!
//! | Module       | Contents                                           |
//! |--------------|----------------------------------------------------|
//! | [`writer`]   | `TraceWriter` trait, `CsvTraceWriter`              |
//! | [`observer`] | `SimTraceObserver` — plugs a writer into the loop  |
//! | [`error`]    | `TraceError`                                       |
//!
//! Because runs are deterministic, the two CSVs fully identify a run: diff
//! `state_transitions.csv` across two builds and any behavioral change shows
//! up as a changed row.

pub mod error;
pub mod observer;
pub mod writer;

#[cfg(test)]
mod tests;

pub use error::{TraceError, TraceResult};
pub use observer::SimTraceObserver;
pub use writer::{CsvTraceWriter, TraceWriter};
