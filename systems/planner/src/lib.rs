#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement planning that turns a searched route into per-turn directions.

use fire_escape_core::{Direction, VertexId};
use fire_escape_system_pathfinding::find_guided_path;
use fire_escape_world::{query, World};
use tracing::debug;

/// Converts a vertex route into one direction per consecutive pair.
///
/// Vertex identifiers are row-major indices on a board `width` cells wide. A
/// step of `+1`/`-1` within the same row maps to [`Direction::Right`] and
/// [`Direction::Left`], a step of `+width`/`-width` to [`Direction::Up`] and
/// [`Direction::Down`]. The first step that matches none of these, including a
/// `±1` step that wraps onto another row, ends the plan early and the
/// directions gathered so far are returned.
#[must_use]
pub fn plan_moves(path: &[VertexId], width: u32) -> Vec<Direction> {
    let Ok(width) = usize::try_from(width) else {
        return Vec::new();
    };
    if width == 0 {
        return Vec::new();
    }

    let mut directions = Vec::with_capacity(path.len().saturating_sub(1));
    for step in path.windows(2) {
        match direction_between(step[0].get(), step[1].get(), width) {
            Some(direction) => directions.push(direction),
            None => {
                debug!(
                    from = step[0].get(),
                    to = step[1].get(),
                    planned = directions.len(),
                    "route contains a non-adjacent step"
                );
                break;
            }
        }
    }
    directions
}

/// Plans the agent's escape on the live board.
///
/// Runs the guided search from the agent's cell to the exit and converts the
/// result into directions. Returns an empty plan when either marker is
/// missing or no route exists.
#[must_use]
pub fn plan_escape(world: &mut World) -> Vec<Direction> {
    let (Some(agent), Some(exit)) = (query::agent_vertex(world), query::exit_vertex(world)) else {
        debug!("board lacks an agent or an exit, nothing to plan");
        return Vec::new();
    };

    let (columns, _) = query::dimensions(world);
    let path = find_guided_path(world.graph_mut(), agent, exit);
    let directions = plan_moves(&path, columns);
    debug!(
        route = path.len(),
        directions = directions.len(),
        "escape planned"
    );
    directions
}

fn direction_between(from: usize, to: usize, width: usize) -> Option<Direction> {
    let same_row = from / width == to / width;

    if same_row && to == from + 1 {
        Some(Direction::Right)
    } else if same_row && to + 1 == from {
        Some(Direction::Left)
    } else if to == from + width {
        Some(Direction::Up)
    } else if to + width == from {
        Some(Direction::Down)
    } else {
        None
    }
}
