use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use fire_escape_core::{CellCoord, Direction, Event};
use fire_escape_system_planner::plan_escape;
use fire_escape_system_simulation::{SimulationState, TurnSimulator};
use fire_escape_world::{query, Grid, World};

const BOARD: [&str; 5] = [
    "D.....",
    ".##.#.",
    "......",
    ".#..#.",
    "F...#S",
];

#[test]
fn deterministic_replay_produces_identical_logs() {
    let first = replay();
    let second = replay();

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(
        first.fingerprint(),
        second.fingerprint(),
        "fingerprint mismatch between identical replays"
    );
    assert!(!first.events.is_empty());
    assert!(first.state.is_terminal());
}

#[test]
fn replay_log_records_every_turn_in_order() {
    let outcome = replay();

    let moves: Vec<Direction> = outcome
        .events
        .iter()
        .filter_map(|event| match event {
            Event::AgentMoved { direction, .. } | Event::AgentBlocked { direction, .. } => {
                Some(*direction)
            }
            _ => None,
        })
        .collect();
    assert!(outcome.directions.starts_with(&moves));

    let first_fire = outcome
        .events
        .iter()
        .position(|event| matches!(event, Event::CellIgniting { .. }));
    let first_move = outcome
        .events
        .iter()
        .position(|event| matches!(event, Event::AgentMoved { .. }));
    if let (Some(fire), Some(step)) = (first_fire, first_move) {
        assert!(fire < step, "fire must spread before the agent moves");
    }

    assert!(outcome.events.contains(&Event::CellIgniting {
        cell: CellCoord::new(0, 3),
    }));
}

fn replay() -> ReplayOutcome {
    let mut world = World::from_grid(&Grid::from_rows(&BOARD).expect("valid grid"));
    let directions = plan_escape(&mut world);
    let mut simulator = TurnSimulator::new();
    let mut events = Vec::new();

    let _ = simulator.run(&mut world, &directions, &mut events);

    ReplayOutcome {
        directions,
        events,
        state: simulator.state(),
        board: query::render(&world),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    directions: Vec<Direction>,
    events: Vec<Event>,
    state: SimulationState,
    board: String,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
