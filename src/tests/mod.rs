// Test modules for all components
pub mod test_agent;
pub mod test_trainer;

use crate::environment::maze::MazeRewards;
use crate::environment::Maze;

/// 5x5 maze with a single interior pillar:
///
/// ```text
/// #####
/// #...#
/// #.#.#
/// #...#
/// #####
/// ```
pub(crate) const SMALL_MAZE: &str = "#####\n#...#\n#.#.#\n#...#\n#####\n";

pub(crate) const REWARDS: MazeRewards = MazeRewards {
    goal: 10.0,
    wall: -10.0,
    step: -1.0,
};

pub(crate) fn small_maze() -> Maze {
    Maze::parse(SMALL_MAZE, REWARDS).unwrap()
}
