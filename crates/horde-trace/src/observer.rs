//! Bridge from the simulation's observer hooks to a trace writer.

use horde_core::Tick;
use horde_sim::{AgentSnapshot, SimObserver, StateTransition};

use crate::error::TraceError;
use crate::writer::TraceWriter;

/// Streams transitions and snapshots into a [`TraceWriter`].
///
/// Observer hooks can't return errors, so the first write failure is stored
/// and all further writes are skipped; check [`take_error`] (or use
/// [`finish`]) after the run.
///
/// [`take_error`]: SimTraceObserver::take_error
/// [`finish`]: SimTraceObserver::finish
pub struct SimTraceObserver<W> {
    writer: W,
    error:  Option<TraceError>,
}

impl<W: TraceWriter> SimTraceObserver<W> {
    pub fn new(writer: W) -> SimTraceObserver<W> {
        SimTraceObserver { writer, error: None }
    }

    /// The first error hit during the run, if any.
    pub fn take_error(&mut self) -> Option<TraceError> {
        self.error.take()
    }

    /// Consume the observer, surfacing any stored error.
    pub fn finish(mut self) -> Result<W, TraceError> {
        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(self.writer),
        }
    }

    fn record(&mut self, result: Result<(), TraceError>) {
        if self.error.is_none() {
            if let Err(error) = result {
                self.error = Some(error);
            }
        }
    }
}

impl<W: TraceWriter> SimObserver for SimTraceObserver<W> {
    fn on_transition(&mut self, transition: &StateTransition) {
        if self.error.is_some() {
            return;
        }
        let result = self.writer.write_transition(transition);
        self.record(result);
    }

    fn on_snapshot(&mut self, snapshot: &AgentSnapshot) {
        if self.error.is_some() {
            return;
        }
        let result = self.writer.write_snapshot(snapshot);
        self.record(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        if self.error.is_some() {
            return;
        }
        let result = self.writer.finish();
        self.record(result);
    }
}
