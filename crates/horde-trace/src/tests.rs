use std::io;

use horde_core::{AgentId, BoneControl, SimConfig, StateKind, Tick, Vec3};
use horde_sense::StaticScene;
use horde_sim::{AgentSnapshot, AgentSpawn, SimBuilder, SimObserver, StateTransition};

use crate::error::{TraceError, TraceResult};
use crate::observer::SimTraceObserver;
use crate::writer::{CsvTraceWriter, TraceWriter};

fn v(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3 { x, y, z }
}

fn transition(tick: u64, agent: u32, from: StateKind, to: StateKind) -> StateTransition {
    StateTransition { tick: Tick(tick), agent: AgentId(agent), from, to }
}

mod csv_writer {
    use super::*;

    #[test]
    fn rows_round_trip_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvTraceWriter::create(dir.path()).unwrap();

        writer
            .write_transition(&transition(5, 2, StateKind::Patrol, StateKind::Alerted))
            .unwrap();
        writer
            .write_snapshot(&AgentSnapshot {
                tick:         Tick(10),
                agent:        AgentId(2),
                state:        StateKind::Alerted,
                position:     v(1.0, 0.0, 2.5),
                health:       90,
                satisfaction: 0.75,
                speed:        0.0,
                bone_control: BoneControl::Animated,
            })
            .unwrap();
        writer.finish().unwrap();

        let transitions =
            std::fs::read_to_string(dir.path().join("state_transitions.csv")).unwrap();
        let mut lines = transitions.lines();
        assert_eq!(lines.next(), Some("tick,agent,from,to"));
        assert_eq!(lines.next(), Some("5,2,Patrol,Alerted"));

        let snapshots = std::fs::read_to_string(dir.path().join("agent_snapshots.csv")).unwrap();
        let mut lines = snapshots.lines();
        assert_eq!(
            lines.next(),
            Some("tick,agent,state,x,y,z,health,satisfaction,speed,bone_control")
        );
        assert_eq!(lines.next(), Some("10,2,Alerted,1.000,0.000,2.500,90,0.7500,0.000,Animated"));
    }
}

mod observer {
    use super::*;

    #[test]
    fn a_full_run_lands_in_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CsvTraceWriter::create(dir.path()).unwrap();
        let mut observer = SimTraceObserver::new(writer);

        let mut sim = SimBuilder::new(StaticScene::new())
            .with_config(SimConfig {
                tick_duration_secs: 0.1,
                total_ticks: 30,
                seed: 4,
                num_threads: None,
                trace_interval_ticks: 10,
            })
            .with_waypoints(vec![v(0.0, 0.0, 20.0), v(20.0, 0.0, 20.0)])
            .spawn(AgentSpawn::at(Vec3::ZERO))
            .spawn(AgentSpawn::at(v(5.0, 0.0, 0.0)))
            .build()
            .unwrap();
        sim.run(&mut observer);
        observer.finish().unwrap();

        let transitions =
            std::fs::read_to_string(dir.path().join("state_transitions.csv")).unwrap();
        // Both agents enter Idle on the first tick.
        assert!(transitions.contains("1,0,None,Idle"));
        assert!(transitions.contains("1,1,None,Idle"));

        let snapshots = std::fs::read_to_string(dir.path().join("agent_snapshots.csv")).unwrap();
        // Snapshots at ticks 10, 20, 30 for two agents, plus the header.
        assert_eq!(snapshots.lines().count(), 7);
    }

    struct FailingWriter;

    impl TraceWriter for FailingWriter {
        fn write_transition(&mut self, _: &StateTransition) -> TraceResult<()> {
            Err(TraceError::Io(io::Error::other("disk full")))
        }

        fn write_snapshot(&mut self, _: &AgentSnapshot) -> TraceResult<()> {
            Ok(())
        }

        fn finish(&mut self) -> TraceResult<()> {
            Ok(())
        }
    }

    #[test]
    fn the_first_write_error_is_kept_and_surfaced() {
        let mut observer = SimTraceObserver::new(FailingWriter);
        observer.on_transition(&transition(1, 0, StateKind::None, StateKind::Idle));
        observer.on_transition(&transition(2, 0, StateKind::Idle, StateKind::Patrol));

        let err = observer.take_error();
        assert!(matches!(err, Some(TraceError::Io(_))));
        // Taken once, it is gone.
        assert!(observer.take_error().is_none());
        assert!(observer.finish().is_ok());
    }
}
