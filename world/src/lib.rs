#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state management for Fire Escape.
//!
//! The board is a [`Graph`] whose vertex labels double as the live cell state.
//! Systems mutate it exclusively through [`apply`], which reports the outcome of
//! every command as [`Event`] values.

mod graph;
mod grid;

use fire_escape_core::{CellCoord, CellLabel, Command, Direction, Event, VertexId};

pub use graph::{Edge, Graph, GraphError, Vertex};
pub use grid::{Grid, GridError};

use grid::{cardinal_neighbors, index};

/// Cost assigned to every grid cell and every edge between neighbouring cells.
pub const UNIT_COST: u32 = 1;

/// Represents the authoritative state of a single scenario.
#[derive(Clone, Debug)]
pub struct World {
    graph: Graph,
    columns: u32,
    rows: u32,
}

impl World {
    /// Builds the board graph for a validated grid.
    ///
    /// Vertices are added in row-major order so that a vertex identifier equals
    /// `row * columns + column`. Every pair of cardinal neighbours is joined by
    /// two directed unit-weight edges.
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        let columns = grid.columns();
        let rows = grid.rows();
        let mut graph = Graph::with_capacity(grid.labels().len());

        for row in 0..rows {
            for column in 0..columns {
                let cell = CellCoord::new(column, row);
                let label = grid.label(cell).unwrap_or(CellLabel::Empty);
                let _ = graph.add_vertex(label, UNIT_COST, cell);
            }
        }

        for row in 0..rows {
            for column in 0..columns {
                let cell = CellCoord::new(column, row);
                let Some(source) = vertex_at(columns, rows, cell) else {
                    continue;
                };
                for destination in cardinal_neighbors(cell, columns, rows)
                    .filter_map(|neighbor| vertex_at(columns, rows, neighbor))
                {
                    // Every source vertex was added in the loop above.
                    let _ = graph.add_edge(source, destination, UNIT_COST);
                }
            }
        }

        Self {
            graph,
            columns,
            rows,
        }
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Read-only access to the board graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access to the board graph, used by searches to record their
    /// scratch state.
    #[must_use]
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    fn vertex_at(&self, cell: CellCoord) -> Option<VertexId> {
        vertex_at(self.columns, self.rows, cell)
    }

    fn label_at(&self, cell: CellCoord) -> Option<CellLabel> {
        self.vertex_at(cell).and_then(|id| self.graph.label(id))
    }

    fn cell_of(&self, id: VertexId) -> Option<CellCoord> {
        self.graph.vertex(id).map(Vertex::cell)
    }

    fn ignite(&mut self, out_events: &mut Vec<Event>) {
        for id in self.graph.vertices_labelled(CellLabel::Igniting) {
            let _ = self.graph.replace_label(id, CellLabel::Burning);
            if let Some(cell) = self.cell_of(id) {
                out_events.push(Event::FireIgnited { cell });
            }
        }
    }

    fn spread_fire(&mut self, out_events: &mut Vec<Event>) {
        for id in self.graph.vertices_labelled(CellLabel::Burning) {
            let Some(origin) = self.cell_of(id) else {
                continue;
            };

            for cell in cardinal_neighbors(origin, self.columns, self.rows) {
                let Some(neighbor) = self.vertex_at(cell) else {
                    continue;
                };
                if self.graph.label(neighbor) == Some(CellLabel::Burning) {
                    continue;
                }

                // Inspect the label before it is overwritten.
                match self.graph.replace_label(neighbor, CellLabel::Igniting) {
                    None | Some(CellLabel::Igniting) => {}
                    Some(CellLabel::Exit) => {
                        out_events.push(Event::CellIgniting { cell });
                        out_events.push(Event::ExitEngulfed { cell });
                    }
                    Some(CellLabel::Agent) => {
                        out_events.push(Event::CellIgniting { cell });
                        out_events.push(Event::AgentEngulfed { cell });
                    }
                    Some(_) => out_events.push(Event::CellIgniting { cell }),
                }
            }
        }
    }

    fn move_agent(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let Some(agent) = self.graph.find_label(CellLabel::Agent) else {
            out_events.push(Event::AgentStranded);
            return;
        };
        let Some(from) = self.cell_of(agent) else {
            out_events.push(Event::AgentStranded);
            return;
        };

        let exit = cardinal_neighbors(from, self.columns, self.rows)
            .find(|cell| self.label_at(*cell) == Some(CellLabel::Exit));
        if let Some(exit) = exit {
            out_events.push(Event::ExitReached { from, exit });
            return;
        }

        let _ = self.graph.replace_label(agent, CellLabel::Visited);

        let destination = from
            .step(direction, self.columns, self.rows)
            .and_then(|cell| self.vertex_at(cell).map(|id| (cell, id)))
            .filter(|(_, id)| self.graph.is_traversable(*id));

        match destination {
            Some((to, id)) => {
                let _ = self.graph.replace_label(id, CellLabel::Agent);
                out_events.push(Event::AgentMoved {
                    from,
                    to,
                    direction,
                });
            }
            None => out_events.push(Event::AgentBlocked { from, direction }),
        }
    }
}

impl From<&Grid> for World {
    fn from(grid: &Grid) -> Self {
        Self::from_grid(grid)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::IgniteFire => world.ignite(out_events),
        Command::SpreadFire => world.spread_fire(out_events),
        Command::MoveAgent { direction } => world.move_agent(direction, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use fire_escape_core::{CellCoord, CellLabel, VertexId};

    use super::{Graph, World};

    /// Provides read-only access to the board graph.
    #[must_use]
    pub fn graph(world: &World) -> &Graph {
        world.graph()
    }

    /// Board dimensions as `(columns, rows)`.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        (world.columns, world.rows)
    }

    /// Vertex currently carrying the agent, located by label scan.
    #[must_use]
    pub fn agent_vertex(world: &World) -> Option<VertexId> {
        world.graph.find_label(CellLabel::Agent)
    }

    /// Vertex carrying the exit, located by label scan.
    #[must_use]
    pub fn exit_vertex(world: &World) -> Option<VertexId> {
        world.graph.find_label(CellLabel::Exit)
    }

    /// Vertex that represents the provided cell, if it lies on the board.
    #[must_use]
    pub fn vertex_at(world: &World, cell: CellCoord) -> Option<VertexId> {
        world.vertex_at(cell)
    }

    /// Label of the provided cell, if it lies on the board.
    #[must_use]
    pub fn label_at(world: &World, cell: CellCoord) -> Option<CellLabel> {
        world.label_at(cell)
    }

    /// Number of cells carrying `label`.
    #[must_use]
    pub fn count_labelled(world: &World, label: CellLabel) -> usize {
        world
            .graph
            .iter()
            .filter(|vertex| vertex.label() == label)
            .count()
    }

    /// Renders the board as one line of label symbols per row.
    #[must_use]
    pub fn render(world: &World) -> String {
        let mut rendered = String::with_capacity(world.graph.len() + world.rows as usize);
        for (position, vertex) in world.graph.iter().enumerate() {
            if position > 0 && vertex.cell().column() == 0 {
                rendered.push('\n');
            }
            rendered.push(vertex.label().symbol());
        }
        rendered
    }
}

fn vertex_at(columns: u32, rows: u32, cell: CellCoord) -> Option<VertexId> {
    if cell.column() >= columns || cell.row() >= rows {
        return None;
    }
    index(columns, cell).map(VertexId::new)
}
