use std::thread;
use std::time::Duration;

use tile_pathfinding::trace::Playback;
use tile_pathfinding::{CharGrid, Pathfinder, EARTH, LIFT, ROBOT};

// In this example the robot R walks to the lift L on the map below and the route is replayed
// one step per tick, the way the game's "solve" mode does it.
// - # marks a wall
// - * marks a rock
// - \ marks a lambda, which can be walked over

const MAP: &str = "\
#########
#R......#
#.###*#.#
#..\\#.#.#
###.#..L#
#########";

fn main() {
    let mut grid: CharGrid = MAP.parse().expect("map is well formed");
    let start = grid.find_symbol(ROBOT).expect("map has a robot");
    let lift = grid.find_symbol(LIFT).expect("map has a lift");
    print!("{}", grid);

    let result = Pathfinder::default()
        .find_path(&grid, start, lift)
        .expect("robot and lift are on the map");
    if !result.is_found() {
        println!("No route from {:?} to the lift", start);
        return;
    }
    println!(
        "Route of {} cells, {} cells expanded",
        result.len(),
        result.stats().expanded
    );

    let playback =
        Playback::new(result.path(), Duration::from_millis(100)).expect("path is connected");
    println!("Trace: {}", playback.trace());
    let mut robot = start;
    for step in playback {
        thread::sleep(step.delay);
        grid.set(robot, EARTH);
        grid.set(step.cell, ROBOT);
        robot = step.cell;
        println!("{}", step.mv);
    }
    print!("{}", grid);
}
