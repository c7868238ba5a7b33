use std::{cmp::Ordering, collections::BinaryHeap, time::Instant};

use fire_escape_core::{CellCoord, VertexId};
use fire_escape_world::{Graph, Vertex};
use tracing::debug;

use crate::{elapsed_micros, SearchError};

/// Heuristic-guided (A*) search from `start` toward `end` over the live board.
///
/// Every vertex first receives the straight-line distance from its cell to the
/// cell of `end` as its heuristic. The frontier vertex with the smallest
/// `distance_from_source + heuristic` is expanded next (equal scores expand the
/// higher vertex index first) and appended to the result, so the returned
/// sequence is the expansion order rather than a predecessor chain. Neighbours
/// are only relaxed while they pass [`Graph::is_traversable`], which keeps the
/// search away from fire, walls and cells the agent already left.
///
/// The search stops as soon as `end` has been expanded. An empty result means
/// the frontier ran dry first, or that either endpoint is not in the graph.
pub fn find_guided_path(graph: &mut Graph, start: VertexId, end: VertexId) -> Vec<VertexId> {
    let started = Instant::now();

    let Some(goal) = graph.vertex(end).map(Vertex::cell) else {
        debug!(end = end.get(), "guided search target is not part of the graph");
        return Vec::new();
    };

    graph.reset_search_state();
    assign_heuristics(graph, goal);

    let Some(origin) = graph.vertex_mut(start) else {
        debug!(error = %SearchError::UnknownStart(start), "guided search skipped");
        return Vec::new();
    };
    origin.mark_as_source();
    let origin_score = origin.heuristic();

    let mut expanded = vec![false; graph.len()];
    let mut frontier = BinaryHeap::new();
    frontier.push(FrontierEntry {
        vertex: start,
        score: origin_score,
    });
    let mut path = Vec::new();

    while let Some(FrontierEntry { vertex: current, .. }) = frontier.pop() {
        let Some(done) = expanded.get_mut(current.get()) else {
            continue;
        };
        if *done {
            continue;
        }
        *done = true;
        path.push(current);

        if current == end {
            debug!(
                expanded = path.len(),
                elapsed_us = elapsed_micros(started.elapsed()),
                "guided search reached target"
            );
            return path;
        }

        let Some(vertex) = graph.vertex(current) else {
            continue;
        };
        let distance = vertex.distance_from_source().unwrap_or_default();
        let edges = vertex.edges().to_vec();

        for edge in edges {
            let neighbor = edge.destination();
            if !graph.is_traversable(neighbor) {
                continue;
            }
            if expanded.get(neighbor.get()).copied().unwrap_or(true) {
                continue;
            }

            let candidate = distance.saturating_add(edge.weight());
            if let Some(next) = graph.vertex_mut(neighbor) {
                if next.relax(candidate, current) {
                    frontier.push(FrontierEntry {
                        vertex: neighbor,
                        score: f64::from(candidate) + next.heuristic(),
                    });
                }
            }
        }
    }

    debug!(
        expanded = path.len(),
        elapsed_us = elapsed_micros(started.elapsed()),
        "guided search exhausted the frontier before the target"
    );
    Vec::new()
}

fn assign_heuristics(graph: &mut Graph, goal: CellCoord) {
    for index in 0..graph.len() {
        if let Some(vertex) = graph.vertex_mut(VertexId::new(index)) {
            let estimate = vertex.cell().euclidean_distance(goal);
            vertex.set_heuristic(estimate);
        }
    }
}

/// Frontier element ordered so that `BinaryHeap::pop` yields the lowest score,
/// and among equal scores the highest vertex index.
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    vertex: VertexId,
    score: f64,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}
