#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Path searches over the board graph.
//!
//! Both searches are free functions that take the graph explicitly and record
//! their scratch state (`distance_from_source`, `heuristic`, `predecessor`) on
//! its vertices. Each search clears the state left by the previous one before
//! it starts, so repeated runs over an unchanged graph are reproducible.

mod guided;
mod uniform_cost;

use std::time::Duration;

use fire_escape_core::VertexId;
use thiserror::Error;

pub use guided::find_guided_path;
pub use uniform_cost::find_shortest_path;

/// Structural problems that abort a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
enum SearchError {
    /// The search origin is not part of the graph.
    #[error("start vertex {} is not part of the graph", .0.get())]
    UnknownStart(VertexId),
    /// An edge points past the end of the vertex arena.
    #[error(
        "edge from vertex {} references vertex {} outside the graph",
        .from.get(),
        .to.get()
    )]
    DanglingEdge { from: VertexId, to: VertexId },
}

fn elapsed_micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}
