#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Fire Escape engine.
//!
//! This crate defines the message surface that connects the authoritative
//! board, the pure systems and the adapters. Systems submit [`Command`] values
//! describing the next phase of a turn, the world executes those commands via
//! its `apply` entry point, and then reports [`Event`] values that systems
//! react to deterministically.

use serde::{Deserialize, Serialize};

/// Largest number of rows or columns accepted for a single maze.
pub const MAX_GRID_DIMENSION: u32 = 1000;

/// Commands that express all permissible board mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Turns every igniting cell into a burning cell.
    IgniteFire,
    /// Marks the cardinal neighbours of every burning cell as igniting.
    SpreadFire,
    /// Requests that the agent attempt a single step in the provided direction.
    MoveAgent {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// A cell that was igniting started burning.
    FireIgnited {
        /// Cell that caught fire.
        cell: CellCoord,
    },
    /// A cell next to the fire was marked as igniting.
    CellIgniting {
        /// Cell that will burn on the next turn.
        cell: CellCoord,
    },
    /// The fire reached the exit before the agent did.
    ExitEngulfed {
        /// Location of the exit.
        cell: CellCoord,
    },
    /// The fire reached the cell the agent was standing on.
    AgentEngulfed {
        /// Location of the agent when the fire arrived.
        cell: CellCoord,
    },
    /// The agent stood next to the exit when it was asked to move.
    ExitReached {
        /// Cell occupied by the agent.
        from: CellCoord,
        /// Location of the exit.
        exit: CellCoord,
    },
    /// The agent moved between two cells.
    AgentMoved {
        /// Cell the agent occupied before moving.
        from: CellCoord,
        /// Cell the agent occupies after the move.
        to: CellCoord,
        /// Direction of the step.
        direction: Direction,
    },
    /// The agent left its cell but the destination could not be entered.
    AgentBlocked {
        /// Cell the agent tried to leave.
        from: CellCoord,
        /// Direction of the rejected step.
        direction: Direction,
    },
    /// No cell on the board carries the agent any more.
    AgentStranded,
}

/// Mutually exclusive state of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellLabel {
    /// Free floor.
    Empty,
    /// Start position of the agent, and later its current position.
    Agent,
    /// The exit the agent tries to reach.
    Exit,
    /// Fire origin, or any cell that has caught fire since.
    Burning,
    /// Cell that catches fire on the next turn.
    Igniting,
    /// Cell the agent has already left.
    Visited,
    /// Static obstacle that the agent can never enter.
    Wall,
}

impl CellLabel {
    /// Parses a label from its text symbol.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Empty),
            'D' => Some(Self::Agent),
            'S' => Some(Self::Exit),
            'F' => Some(Self::Burning),
            'A' => Some(Self::Igniting),
            'L' => Some(Self::Visited),
            '#' => Some(Self::Wall),
            _ => None,
        }
    }

    /// Text symbol used to render the label.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Agent => 'D',
            Self::Exit => 'S',
            Self::Burning => 'F',
            Self::Igniting => 'A',
            Self::Visited => 'L',
            Self::Wall => '#',
        }
    }

    /// Reports whether the agent may step onto a cell carrying this label.
    #[must_use]
    pub const fn is_traversable(self) -> bool {
        matches!(self, Self::Empty | Self::Exit)
    }
}

/// Movement directions available to the agent.
///
/// Rows grow "upwards": `Up` moves toward increasing row indices, which is a
/// vertex index delta of `+width`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing row indices.
    Up,
    /// Movement toward decreasing row indices.
    Down,
}

impl Direction {
    /// Single-character symbol describing the direction.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Right => 'R',
            Self::Left => 'L',
            Self::Up => 'U',
            Self::Down => 'D',
        }
    }
}

/// Terminal result of a scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The agent reached the exit.
    Won,
    /// The fire won the race, or the agent never reached the exit.
    Lost,
}

impl Outcome {
    /// Symbol reported for the outcome, `Y` for a win and `N` for a loss.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Won => 'Y',
            Self::Lost => 'N',
        }
    }
}

/// Index of a vertex inside a graph, equal to `row * width + column` for grids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

impl VertexId {
    /// Creates a new vertex identifier with the provided index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Retrieves the index wrapped by the identifier.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Computes the straight-line distance between two cell coordinates.
    #[must_use]
    pub fn euclidean_distance(self, other: CellCoord) -> f64 {
        let columns = f64::from(self.column().abs_diff(other.column()));
        let rows = f64::from(self.row().abs_diff(other.row()));
        (columns * columns + rows * rows).sqrt()
    }

    /// Returns the neighbouring cell one step away in `direction`, if it lies
    /// inside a grid of the provided dimensions.
    #[must_use]
    pub fn step(self, direction: Direction, columns: u32, rows: u32) -> Option<CellCoord> {
        let (column, row) = match direction {
            Direction::Right => (self.column.checked_add(1)?, self.row),
            Direction::Left => (self.column.checked_sub(1)?, self.row),
            Direction::Up => (self.column, self.row.checked_add(1)?),
            Direction::Down => (self.column, self.row.checked_sub(1)?),
        };

        if column < columns && row < rows {
            Some(CellCoord::new(column, row))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, CellLabel, Direction, Outcome};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn euclidean_distance_matches_expectation() {
        let origin = CellCoord::new(0, 0);
        let destination = CellCoord::new(3, 4);
        assert!((origin.euclidean_distance(destination) - 5.0).abs() < f64::EPSILON);
        assert!((destination.euclidean_distance(destination)).abs() < f64::EPSILON);
    }

    #[test]
    fn euclidean_distance_is_root_of_squared_offsets() {
        let origin = CellCoord::new(0, 0);
        for column in 0..60_u32 {
            for row in 0..60_u32 {
                let expected = f64::from(column * column + row * row).sqrt();
                let actual = origin.euclidean_distance(CellCoord::new(column, row));
                assert_eq!(actual.to_bits(), expected.to_bits(), "({column}, {row})");
            }
        }
    }

    #[test]
    fn step_respects_grid_bounds() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.step(Direction::Left, 3, 3), None);
        assert_eq!(corner.step(Direction::Down, 3, 3), None);
        assert_eq!(
            corner.step(Direction::Right, 3, 3),
            Some(CellCoord::new(1, 0))
        );
        assert_eq!(corner.step(Direction::Up, 3, 3), Some(CellCoord::new(0, 1)));

        let far = CellCoord::new(2, 2);
        assert_eq!(far.step(Direction::Right, 3, 3), None);
        assert_eq!(far.step(Direction::Up, 3, 3), None);
    }

    #[test]
    fn labels_parse_their_own_symbols() {
        for label in [
            CellLabel::Empty,
            CellLabel::Agent,
            CellLabel::Exit,
            CellLabel::Burning,
            CellLabel::Igniting,
            CellLabel::Visited,
            CellLabel::Wall,
        ] {
            assert_eq!(CellLabel::from_symbol(label.symbol()), Some(label));
        }
        assert_eq!(CellLabel::from_symbol('x'), None);
    }

    #[test]
    fn only_empty_and_exit_are_traversable() {
        assert!(CellLabel::Empty.is_traversable());
        assert!(CellLabel::Exit.is_traversable());
        assert!(!CellLabel::Agent.is_traversable());
        assert!(!CellLabel::Burning.is_traversable());
        assert!(!CellLabel::Igniting.is_traversable());
        assert!(!CellLabel::Visited.is_traversable());
        assert!(!CellLabel::Wall.is_traversable());
    }

    #[test]
    fn outcome_round_trips_through_bincode() {
        let bytes = bincode::serialize(&Outcome::Won).expect("serialize");
        let restored: Outcome = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, Outcome::Won);
        assert_eq!(Outcome::Won.symbol(), 'Y');
        assert_eq!(Outcome::Lost.symbol(), 'N');
    }
}
