use fire_escape_core::{CellLabel, Direction};
use fire_escape_system_planner::{plan_escape, plan_moves};
use fire_escape_system_pathfinding::find_guided_path;
use fire_escape_world::{query, Grid, World};

fn world_from(rows: &[&str]) -> World {
    World::from_grid(&Grid::from_rows(rows).expect("valid grid"))
}

#[test]
fn corridor_plan_heads_straight_for_the_exit() {
    let mut world = world_from(&["D...S......F"]);

    assert_eq!(plan_escape(&mut world), vec![Direction::Right; 4]);
}

#[test]
fn plan_turns_around_walls() {
    let mut world = world_from(&["D.", "#.", "FS"]);

    assert_eq!(
        plan_escape(&mut world),
        vec![Direction::Right, Direction::Up, Direction::Up]
    );
}

#[test]
fn boxed_in_agent_gets_no_plan() {
    let mut world = world_from(&["D#..", "#...", "..FS"]);

    assert!(plan_escape(&mut world).is_empty());
}

#[test]
fn plan_stops_where_the_search_backtracked() {
    let mut world = world_from(&["D..", ".#F", "..S"]);
    let agent = query::agent_vertex(&world).expect("agent");
    let exit = query::exit_vertex(&world).expect("exit");

    let route = find_guided_path(world.graph_mut(), agent, exit);
    assert_eq!(route.len(), 6);

    let directions = plan_moves(&route, 3);
    assert!(directions.len() < route.len() - 1);
    assert_eq!(plan_escape(&mut world), vec![Direction::Up]);
}

#[test]
fn planning_leaves_board_labels_untouched() {
    let mut world = world_from(&["D....", ".#.#.", "..F..", "....S"]);
    let before = query::render(&world);

    let directions = plan_escape(&mut world);

    assert!(!directions.is_empty());
    assert_eq!(query::render(&world), before);
    assert_eq!(query::count_labelled(&world, CellLabel::Agent), 1);
}

#[test]
fn plan_length_matches_route_without_jumps() {
    let layouts: [&[&str]; 3] = [
        &["D...S......F"],
        &["D.", "#.", "FS"],
        &["S....", ".....", "....D", "F...."],
    ];

    for layout in layouts {
        let mut world = world_from(layout);
        let agent = query::agent_vertex(&world).expect("agent");
        let exit = query::exit_vertex(&world).expect("exit");
        let (columns, _) = query::dimensions(&world);

        let route = find_guided_path(world.graph_mut(), agent, exit);
        let adjacent = route.windows(2).all(|pair| {
            let from = world.graph().vertex(pair[0]).expect("vertex").cell();
            let to = world.graph().vertex(pair[1]).expect("vertex").cell();
            from.manhattan_distance(to) == 1
        });

        if adjacent {
            assert_eq!(plan_moves(&route, columns).len(), route.len() - 1);
        } else {
            assert!(plan_moves(&route, columns).len() < route.len() - 1);
        }
    }
}
