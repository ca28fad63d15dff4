//! The trace sink trait and its CSV implementation.

use std::fs::File;
use std::path::Path;

use horde_sim::{AgentSnapshot, StateTransition};

use crate::error::TraceResult;

/// Where trace rows go.  Writers may buffer; `finish` flushes.
pub trait TraceWriter {
    fn write_transition(&mut self, transition: &StateTransition) -> TraceResult<()>;
    fn write_snapshot(&mut self, snapshot: &AgentSnapshot) -> TraceResult<()>;
    fn finish(&mut self) -> TraceResult<()>;
}

/// Writes two CSV files into a directory:
///
/// - `state_transitions.csv` — `tick,agent,from,to`
/// - `agent_snapshots.csv` — one row per agent per trace interval
///
/// Rows arrive in observer order, so both files are sorted by tick and,
/// within a tick, by agent id — ready for diffing across runs.
pub struct CsvTraceWriter {
    transitions: csv::Writer<File>,
    snapshots:   csv::Writer<File>,
}

impl CsvTraceWriter {
    pub fn create(dir: &Path) -> TraceResult<CsvTraceWriter> {
        std::fs::create_dir_all(dir)?;

        let mut transitions = csv::Writer::from_path(dir.join("state_transitions.csv"))?;
        transitions.write_record(["tick", "agent", "from", "to"])?;

        let mut snapshots = csv::Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record([
            "tick",
            "agent",
            "state",
            "x",
            "y",
            "z",
            "health",
            "satisfaction",
            "speed",
            "bone_control",
        ])?;

        Ok(CsvTraceWriter { transitions, snapshots })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_transition(&mut self, t: &StateTransition) -> TraceResult<()> {
        self.transitions.write_record([
            t.tick.0.to_string(),
            t.agent.0.to_string(),
            t.from.to_string(),
            t.to.to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshot(&mut self, s: &AgentSnapshot) -> TraceResult<()> {
        self.snapshots.write_record([
            s.tick.0.to_string(),
            s.agent.0.to_string(),
            s.state.to_string(),
            format!("{:.3}", s.position.x),
            format!("{:.3}", s.position.y),
            format!("{:.3}", s.position.z),
            s.health.to_string(),
            format!("{:.4}", s.satisfaction),
            format!("{:.3}", s.speed),
            format!("{:?}", s.bone_control),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> TraceResult<()> {
        self.transitions.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
