//! Validated maze layouts and the cardinal adjacency shared with the board.

use std::str::FromStr;

use fire_escape_core::{CellCoord, CellLabel, MAX_GRID_DIMENSION};
use thiserror::Error;

/// Reasons a maze layout may be rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The layout contained no rows, or its rows contained no cells.
    #[error("maze layout is empty")]
    EmptyGrid,
    /// The layout contained more rows than supported.
    #[error("maze has {rows} rows but at most {} are supported", MAX_GRID_DIMENSION)]
    TooManyRows {
        /// Number of rows supplied.
        rows: usize,
    },
    /// The layout contained more columns than supported.
    #[error("maze has {columns} columns but at most {} are supported", MAX_GRID_DIMENSION)]
    TooManyColumns {
        /// Number of columns supplied.
        columns: usize,
    },
    /// A row did not match the width of the first row.
    #[error("row {row} has {found} cells but {expected} were expected")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A cell used a symbol that is not allowed in maze input.
    #[error("unknown symbol '{symbol}' at column {}, row {}", .cell.column(), .cell.row())]
    UnknownSymbol {
        /// Offending character.
        symbol: char,
        /// Location of the offending character.
        cell: CellCoord,
    },
    /// One of the agent, fire or exit markers was absent.
    #[error("maze has no '{}' marker", .marker.symbol())]
    MissingMarker {
        /// Label whose marker is missing.
        marker: CellLabel,
    },
    /// One of the agent, fire or exit markers appeared more than once.
    #[error(
        "maze has more than one '{}' marker (column {}, row {} and column {}, row {})",
        .marker.symbol(),
        .first.column(),
        .first.row(),
        .second.column(),
        .second.row()
    )]
    DuplicateMarker {
        /// Label whose marker is duplicated.
        marker: CellLabel,
        /// Location of the first occurrence.
        first: CellCoord,
        /// Location of the second occurrence.
        second: CellCoord,
    },
}

/// Rectangular maze layout holding exactly one agent, one fire and one exit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    labels: Vec<CellLabel>,
    agent: CellCoord,
    fire: CellCoord,
    exit: CellCoord,
}

impl Grid {
    /// Validates the provided rows and captures them as a grid.
    ///
    /// Row `r` of the input becomes grid row `r`; accepted symbols are `.`,
    /// `#`, `D` (agent), `F` (fire) and `S` (exit).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        if rows.len() > max_dimension() {
            return Err(GridError::TooManyRows { rows: rows.len() });
        }

        let Some(first) = rows.first() else {
            return Err(GridError::EmptyGrid);
        };
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(GridError::EmptyGrid);
        }
        if width > max_dimension() {
            return Err(GridError::TooManyColumns { columns: width });
        }

        let mut labels = Vec::with_capacity(width * rows.len());
        let mut markers = MarkerTracker::default();

        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row: row_index,
                    expected: width,
                    found,
                });
            }

            for (column_index, symbol) in row.chars().enumerate() {
                let cell = CellCoord::new(to_u32(column_index), to_u32(row_index));
                let label = input_label(symbol).ok_or(GridError::UnknownSymbol { symbol, cell })?;
                markers.record(label, cell)?;
                labels.push(label);
            }
        }

        let (agent, fire, exit) = markers.finish()?;

        Ok(Self {
            columns: to_u32(width),
            rows: to_u32(rows.len()),
            labels,
            agent,
            fire,
            exit,
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Label of the provided cell, if it lies inside the grid.
    #[must_use]
    pub fn label(&self, cell: CellCoord) -> Option<CellLabel> {
        index(self.columns, cell)
            .filter(|_| cell.column() < self.columns && cell.row() < self.rows)
            .and_then(|index| self.labels.get(index).copied())
    }

    /// Labels in row-major order.
    #[must_use]
    pub fn labels(&self) -> &[CellLabel] {
        &self.labels
    }

    /// Starting cell of the agent.
    #[must_use]
    pub const fn agent(&self) -> CellCoord {
        self.agent
    }

    /// Origin of the fire.
    #[must_use]
    pub const fn fire(&self) -> CellCoord {
        self.fire
    }

    /// Location of the exit.
    #[must_use]
    pub const fn exit(&self) -> CellCoord {
        self.exit
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parses a newline separated layout, ignoring surrounding whitespace.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = value
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        Self::from_rows(&rows)
    }
}

#[derive(Debug, Default)]
struct MarkerTracker {
    agent: Option<CellCoord>,
    fire: Option<CellCoord>,
    exit: Option<CellCoord>,
}

impl MarkerTracker {
    fn record(&mut self, label: CellLabel, cell: CellCoord) -> Result<(), GridError> {
        let slot = match label {
            CellLabel::Agent => &mut self.agent,
            CellLabel::Burning => &mut self.fire,
            CellLabel::Exit => &mut self.exit,
            _ => return Ok(()),
        };

        if let Some(first) = *slot {
            return Err(GridError::DuplicateMarker {
                marker: label,
                first,
                second: cell,
            });
        }

        *slot = Some(cell);
        Ok(())
    }

    fn finish(self) -> Result<(CellCoord, CellCoord, CellCoord), GridError> {
        let agent = self.agent.ok_or(GridError::MissingMarker {
            marker: CellLabel::Agent,
        })?;
        let fire = self.fire.ok_or(GridError::MissingMarker {
            marker: CellLabel::Burning,
        })?;
        let exit = self.exit.ok_or(GridError::MissingMarker {
            marker: CellLabel::Exit,
        })?;
        Ok((agent, fire, exit))
    }
}

fn input_label(symbol: char) -> Option<CellLabel> {
    match CellLabel::from_symbol(symbol)? {
        CellLabel::Igniting | CellLabel::Visited => None,
        label => Some(label),
    }
}

fn max_dimension() -> usize {
    usize::try_from(MAX_GRID_DIMENSION).unwrap_or(usize::MAX)
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Row-major offset of `cell` inside a grid that is `columns` cells wide.
pub(crate) fn index(columns: u32, cell: CellCoord) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    let width = usize::try_from(columns).ok()?;
    row.checked_mul(width)?.checked_add(column)
}

/// In-bounds cardinal neighbours of `cell`; diagonals are never produced.
pub(crate) fn cardinal_neighbors(
    cell: CellCoord,
    columns: u32,
    rows: u32,
) -> impl Iterator<Item = CellCoord> {
    let mut candidates = [None; 4];
    let mut count = 0;

    if let Some(row) = cell.row().checked_sub(1) {
        candidates[count] = Some(CellCoord::new(cell.column(), row));
        count += 1;
    }

    if let Some(column) = cell.column().checked_add(1) {
        if column < columns {
            candidates[count] = Some(CellCoord::new(column, cell.row()));
            count += 1;
        }
    }

    if let Some(row) = cell.row().checked_add(1) {
        if row < rows {
            candidates[count] = Some(CellCoord::new(cell.column(), row));
            count += 1;
        }
    }

    if let Some(column) = cell.column().checked_sub(1) {
        candidates[count] = Some(CellCoord::new(column, cell.row()));
        count += 1;
    }

    candidates.into_iter().take(count).flatten()
}
