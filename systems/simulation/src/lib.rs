#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn simulator that races the agent against the spreading fire.
//!
//! Each turn issues the same three world commands in a fixed order: pending
//! ignitions burn, the fire spreads one ring outward, then the agent takes the
//! next planned step. Loss checks run before the agent moves, so an exit that
//! catches fire ends the scenario even if the agent stands right next to it.

use fire_escape_core::{Command, Direction, Event, Outcome};
use fire_escape_system_planner::plan_escape;
use fire_escape_world::{self as world, World};
use tracing::debug;

/// Lifecycle of a single scenario.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SimulationState {
    /// Turns are still being played.
    #[default]
    Running,
    /// The agent reached the exit.
    Won,
    /// The fire reached the exit or the agent, or the plan ran out.
    Lost,
}

impl SimulationState {
    /// Reports whether no further turns will be played.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Final outcome once the scenario has finished.
    #[must_use]
    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Running => None,
            Self::Won => Some(Outcome::Won),
            Self::Lost => Some(Outcome::Lost),
        }
    }
}

/// Drives a world turn by turn along a list of planned directions.
#[derive(Clone, Debug, Default)]
pub struct TurnSimulator {
    state: SimulationState,
    turn: u32,
}

impl TurnSimulator {
    /// Creates a simulator that has not played any turn yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SimulationState {
        self.state
    }

    /// Number of turns played so far.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Plays one turn in which the agent attempts to step in `direction`.
    ///
    /// Every event the world reports is appended to `out_events`. Once the
    /// simulator reached a terminal state further calls leave the world alone.
    pub fn step(
        &mut self,
        world: &mut World,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> SimulationState {
        if self.state.is_terminal() {
            return self.state;
        }
        self.turn += 1;
        let first_event = out_events.len();

        world::apply(world, Command::IgniteFire, out_events);
        world::apply(world, Command::SpreadFire, out_events);
        self.handle(&out_events[first_event..]);

        if !self.state.is_terminal() {
            let before_move = out_events.len();
            world::apply(world, Command::MoveAgent { direction }, out_events);
            self.handle(&out_events[before_move..]);
        }

        debug!(
            turn = self.turn,
            direction = %direction.symbol(),
            state = ?self.state,
            events = out_events.len() - first_event,
            "turn resolved"
        );
        self.state
    }

    /// Plays one turn per direction until the scenario ends.
    ///
    /// Running out of directions without reaching the exit counts as a loss,
    /// and so does an empty plan.
    pub fn run(
        &mut self,
        world: &mut World,
        directions: &[Direction],
        out_events: &mut Vec<Event>,
    ) -> Outcome {
        for direction in directions {
            if self.step(world, *direction, out_events).is_terminal() {
                break;
            }
        }

        if !self.state.is_terminal() {
            debug!(turn = self.turn, "plan exhausted before reaching the exit");
            self.state = SimulationState::Lost;
        }

        self.state.outcome().unwrap_or(Outcome::Lost)
    }

    fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::ExitEngulfed { .. } | Event::AgentEngulfed { .. } => {
                    self.state = SimulationState::Lost;
                    return;
                }
                Event::ExitReached { .. } => {
                    self.state = SimulationState::Won;
                    return;
                }
                Event::FireIgnited { .. }
                | Event::CellIgniting { .. }
                | Event::AgentMoved { .. }
                | Event::AgentBlocked { .. }
                | Event::AgentStranded => {}
            }
        }
    }
}

/// Plans an escape for `world` and simulates it to completion.
#[must_use]
pub fn run_scenario(mut world: World) -> Outcome {
    let directions = plan_escape(&mut world);
    let mut events = Vec::new();
    let mut simulator = TurnSimulator::new();
    let outcome = simulator.run(&mut world, &directions, &mut events);
    debug!(
        planned = directions.len(),
        turns = simulator.turn(),
        events = events.len(),
        outcome = %outcome.symbol(),
        "scenario finished"
    );
    outcome
}
