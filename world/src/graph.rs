//! Arena-backed weighted graph that doubles as the live board state.

use fire_escape_core::{CellCoord, CellLabel, VertexId};
use thiserror::Error;

/// Directed, weighted connection between two vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    source: VertexId,
    destination: VertexId,
    weight: u32,
}

impl Edge {
    /// Creates a new edge description.
    #[must_use]
    pub const fn new(source: VertexId, destination: VertexId, weight: u32) -> Self {
        Self {
            source,
            destination,
            weight,
        }
    }

    /// Vertex the edge leaves from.
    #[must_use]
    pub const fn source(&self) -> VertexId {
        self.source
    }

    /// Vertex the edge points to.
    #[must_use]
    pub const fn destination(&self) -> VertexId {
        self.destination
    }

    /// Cost of traversing the edge.
    #[must_use]
    pub const fn weight(&self) -> u32 {
        self.weight
    }
}

/// Single graph vertex together with its outgoing edges and search scratch state.
///
/// `distance_from_source`, `heuristic` and `predecessor` are owned by whichever
/// search ran last. `predecessor` is an index into the owning [`Graph`], never a
/// reference, so it stays valid while the vertex arena grows.
#[derive(Clone, Debug)]
pub struct Vertex {
    id: VertexId,
    label: CellLabel,
    base_cost: u32,
    cell: CellCoord,
    distance_from_source: Option<u32>,
    heuristic: f64,
    predecessor: Option<VertexId>,
    edges: Vec<Edge>,
}

impl Vertex {
    fn new(id: VertexId, label: CellLabel, base_cost: u32, cell: CellCoord) -> Self {
        Self {
            id,
            label,
            base_cost,
            cell,
            distance_from_source: None,
            heuristic: 0.0,
            predecessor: None,
            edges: Vec::new(),
        }
    }

    /// Identifier of the vertex, equal to its position in the graph.
    #[must_use]
    pub const fn id(&self) -> VertexId {
        self.id
    }

    /// Current label of the cell represented by the vertex.
    #[must_use]
    pub const fn label(&self) -> CellLabel {
        self.label
    }

    /// Cost assigned to the cell when the vertex was created.
    #[must_use]
    pub const fn base_cost(&self) -> u32 {
        self.base_cost
    }

    /// Grid cell represented by the vertex.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Best known cost from the last search origin, `None` while unreached.
    #[must_use]
    pub const fn distance_from_source(&self) -> Option<u32> {
        self.distance_from_source
    }

    /// Estimated remaining cost computed by the last guided search.
    #[must_use]
    pub const fn heuristic(&self) -> f64 {
        self.heuristic
    }

    /// Vertex that produced the current best distance, if any.
    #[must_use]
    pub const fn predecessor(&self) -> Option<VertexId> {
        self.predecessor
    }

    /// Outgoing edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Appends an outgoing edge without validating its destination.
    pub fn add_neighbor(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Marks the vertex as a search origin.
    pub fn mark_as_source(&mut self) {
        self.distance_from_source = Some(0);
        self.predecessor = None;
    }

    /// Records the heuristic estimate used by guided search.
    pub fn set_heuristic(&mut self, heuristic: f64) {
        self.heuristic = heuristic;
    }

    /// Lowers the distance to `candidate` when it improves on the current value.
    ///
    /// Returns `true` when the vertex was updated.
    pub fn relax(&mut self, candidate: u32, via: VertexId) -> bool {
        let improves = self
            .distance_from_source
            .map_or(true, |current| candidate < current);
        if improves {
            self.distance_from_source = Some(candidate);
            self.predecessor = Some(via);
        }
        improves
    }

    fn reset_search_state(&mut self) {
        self.distance_from_source = None;
        self.heuristic = 0.0;
        self.predecessor = None;
    }
}

/// Errors reported while mutating a [`Graph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The referenced vertex has not been added to the graph.
    #[error("vertex {} does not exist", .0.get())]
    UnknownVertex(VertexId),
}

/// Index-addressable collection of vertices.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for `capacity` vertices.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Appends a vertex whose identifier equals the current vertex count.
    pub fn add_vertex(&mut self, label: CellLabel, base_cost: u32, cell: CellCoord) -> VertexId {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(id, label, base_cost, cell));
        id
    }

    /// Appends a directed edge to the adjacency list of `source`.
    ///
    /// Only the source is checked. A destination outside the graph is kept as
    /// is and reported by the searches that later follow it.
    pub fn add_edge(
        &mut self,
        source: VertexId,
        destination: VertexId,
        weight: u32,
    ) -> Result<(), GraphError> {
        let vertex = self
            .vertex_mut(source)
            .ok_or(GraphError::UnknownVertex(source))?;
        vertex.add_neighbor(Edge::new(source, destination, weight));
        Ok(())
    }

    /// Number of vertices stored in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Reports whether the graph holds no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Reports whether `id` refers to a vertex of this graph.
    #[must_use]
    pub fn contains(&self, id: VertexId) -> bool {
        id.get() < self.vertices.len()
    }

    /// Retrieves the vertex with the provided identifier.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.get())
    }

    /// Retrieves mutable access to the vertex with the provided identifier.
    #[must_use]
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(id.get())
    }

    /// Iterator over all vertices in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Label of the vertex with the provided identifier.
    #[must_use]
    pub fn label(&self, id: VertexId) -> Option<CellLabel> {
        self.vertex(id).map(Vertex::label)
    }

    /// Overwrites the label of a vertex, returning the label it carried before.
    pub fn replace_label(&mut self, id: VertexId, label: CellLabel) -> Option<CellLabel> {
        self.vertex_mut(id)
            .map(|vertex| std::mem::replace(&mut vertex.label, label))
    }

    /// First vertex, in identifier order, that carries `label`.
    #[must_use]
    pub fn find_label(&self, label: CellLabel) -> Option<VertexId> {
        self.vertices
            .iter()
            .find(|vertex| vertex.label == label)
            .map(Vertex::id)
    }

    /// Identifiers of every vertex that carries `label`, in identifier order.
    #[must_use]
    pub fn vertices_labelled(&self, label: CellLabel) -> Vec<VertexId> {
        self.vertices
            .iter()
            .filter(|vertex| vertex.label == label)
            .map(Vertex::id)
            .collect()
    }

    /// Traversability predicate shared by the guided search and the agent.
    ///
    /// A vertex is traversable iff it exists and is either empty or the exit.
    #[must_use]
    pub fn is_traversable(&self, id: VertexId) -> bool {
        self.label(id).is_some_and(CellLabel::is_traversable)
    }

    /// Clears distances, heuristics and predecessors left by a previous search.
    pub fn reset_search_state(&mut self) {
        for vertex in &mut self.vertices {
            vertex.reset_search_state();
        }
    }
}
