use std::{cmp::Reverse, collections::BinaryHeap, time::Instant};

use fire_escape_core::VertexId;
use fire_escape_world::{Graph, Vertex};
use tracing::{debug, warn};

use crate::{elapsed_micros, SearchError};

/// Uniform-cost (Dijkstra) search from `start` to `end`.
///
/// Every edge is followed regardless of cell labels. The unsettled vertex with
/// the smallest distance is settled first; equal distances are settled in
/// ascending vertex order, which decides between equally cheap routes. The
/// returned path runs from `start` to `end` inclusive and is rebuilt from the
/// recorded predecessors.
///
/// An empty path means `end` is unreachable, either endpoint lies outside the
/// graph, or some edge anywhere in the graph references a missing vertex.
pub fn find_shortest_path(graph: &mut Graph, start: VertexId, end: VertexId) -> Vec<VertexId> {
    let started = Instant::now();

    match settle_from(graph, start) {
        Ok(settled) => debug!(
            settled,
            elapsed_us = elapsed_micros(started.elapsed()),
            "uniform-cost search finished"
        ),
        Err(error) => {
            warn!(%error, "uniform-cost search aborted");
            return Vec::new();
        }
    }

    reconstruct_path(graph, start, end)
}

fn settle_from(graph: &mut Graph, start: VertexId) -> Result<usize, SearchError> {
    check_edges(graph)?;
    graph.reset_search_state();
    graph
        .vertex_mut(start)
        .ok_or(SearchError::UnknownStart(start))?
        .mark_as_source();

    let mut settled = vec![false; graph.len()];
    let mut settled_count = 0;
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse((0_u32, start)));

    while let Some(Reverse((distance, current))) = frontier.pop() {
        let Some(done) = settled.get_mut(current.get()) else {
            continue;
        };
        if *done {
            continue;
        }
        *done = true;
        settled_count += 1;

        let edges = graph
            .vertex(current)
            .map(|vertex| vertex.edges().to_vec())
            .unwrap_or_default();

        for edge in edges {
            let destination = edge.destination();
            let Some(neighbor) = graph.vertex_mut(destination) else {
                return Err(SearchError::DanglingEdge {
                    from: current,
                    to: destination,
                });
            };

            let candidate = distance.saturating_add(edge.weight());
            if neighbor.relax(candidate, current) {
                frontier.push(Reverse((candidate, destination)));
            }
        }
    }

    Ok(settled_count)
}

/// Reports the first edge, in vertex order, whose destination is missing.
/// Unreachable vertices are checked too.
fn check_edges(graph: &Graph) -> Result<(), SearchError> {
    for vertex in graph.iter() {
        if let Some(edge) = vertex
            .edges()
            .iter()
            .find(|edge| !graph.contains(edge.destination()))
        {
            return Err(SearchError::DanglingEdge {
                from: vertex.id(),
                to: edge.destination(),
            });
        }
    }
    Ok(())
}

fn reconstruct_path(graph: &Graph, start: VertexId, end: VertexId) -> Vec<VertexId> {
    let reached = graph
        .vertex(end)
        .and_then(Vertex::distance_from_source)
        .is_some();
    if !reached {
        return Vec::new();
    }

    let mut path = vec![end];
    let mut current = end;
    while current != start {
        let Some(previous) = graph.vertex(current).and_then(Vertex::predecessor) else {
            return Vec::new();
        };
        path.push(previous);
        if path.len() > graph.len() {
            return Vec::new();
        }
        current = previous;
    }

    path.reverse();
    path
}
