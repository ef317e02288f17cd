use super::Environment;
use crate::config::Config;
use crate::error::{Result, TabulaError};
use crate::{Action, Reward, State};
use std::path::Path;
use tracing::debug;

const WALL: char = '#';

/// `(row, col)` on the grid
pub type Position = (usize, usize);

/// Moves for actions 0..4: up, down, left, right
const MOVES: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Reward constants for the three kinds of cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeRewards {
    pub goal: Reward,
    pub wall: Reward,
    pub step: Reward,
}

impl MazeRewards {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(MazeRewards {
            goal: config.parse_value("ENV_GOAL_REWARD")?,
            wall: config.parse_value("ENV_DEAD_REWARD")?,
            step: config.parse_value("ENV_DEFAULT_REWARD")?,
        })
    }
}

/// Grid maze.
///
/// The agent starts at `(1, 1)` and must reach `(height - 2, width - 2)`.
/// Walking into a wall ends the episode as a failure; the outer border must be
/// walls so the agent can never leave the grid.
///
/// ```
/// use tabula::environment::{Environment, Maze, maze::MazeRewards};
///
/// let grid = "#####\n#...#\n#.#.#\n#...#\n#####";
/// let rewards = MazeRewards { goal: 10.0, wall: -10.0, step: -1.0 };
/// let mut maze = Maze::parse(grid, rewards).unwrap();
///
/// assert_eq!(maze.state(), Maze::pos_to_state((1, 1), 5));
/// maze.step(3); // right
/// maze.step(3);
/// maze.step(1); // down
/// maze.step(1);
/// assert!(maze.is_terminal() && maze.is_success());
/// ```
#[derive(Debug, Clone)]
pub struct Maze {
    rewards: MazeRewards,

    height: usize,
    width: usize,
    cells: Vec<Vec<char>>,

    start: Position,
    goal: Position,
    pos: Position,
}

impl Maze {
    /// Parse a grid, one row per line.
    pub fn parse(grid: &str, rewards: MazeRewards) -> Result<Self> {
        // only trailing newlines are dropped; a blank row inside the grid
        // fails the width check below
        let cells: Vec<Vec<char>> = grid
            .trim_end_matches(['\n', '\r'])
            .lines()
            .map(|line| line.trim_end_matches('\r').chars().collect())
            .collect();

        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);
        if height < 3 || width < 3 {
            return Err(TabulaError::invalid_maze(format!(
                "grid must be at least 3x3, got {}x{}",
                height, width
            )));
        }
        if let Some((row, line)) = cells.iter().enumerate().find(|(_, l)| l.len() != width) {
            return Err(TabulaError::invalid_maze(format!(
                "row {} has {} cells, expected {}",
                row,
                line.len(),
                width
            )));
        }

        let border_open = (0..height)
            .flat_map(|r| (0..width).map(move |c| (r, c)))
            .filter(|&(r, c)| r == 0 || c == 0 || r == height - 1 || c == width - 1)
            .find(|&(r, c)| cells[r][c] != WALL);
        if let Some((r, c)) = border_open {
            return Err(TabulaError::invalid_maze(format!(
                "border cell ({}, {}) is not a wall",
                r, c
            )));
        }

        let start = (1, 1);
        let goal = (height - 2, width - 2);
        for (name, (r, c)) in [("start", start), ("goal", goal)] {
            if cells[r][c] == WALL {
                return Err(TabulaError::invalid_maze(format!(
                    "{} cell ({}, {}) is a wall",
                    name, r, c
                )));
            }
        }

        Ok(Maze {
            rewards,
            height,
            width,
            cells,
            start,
            goal,
            pos: start,
        })
    }

    pub fn load<P: AsRef<Path>>(path: P, rewards: MazeRewards) -> Result<Self> {
        let path = path.as_ref();
        let grid = std::fs::read_to_string(path)?;
        let maze = Self::parse(&grid, rewards)?;
        debug!(path = %path.display(), height = maze.height, width = maze.width, "loaded maze");
        Ok(maze)
    }

    /// Read `ENV_MAZE_PATH` and the three reward keys.
    pub fn from_config(config: &Config) -> Result<Self> {
        let rewards = MazeRewards::from_config(config)?;
        Self::load(config.path("ENV_MAZE_PATH")?, rewards)
    }

    pub fn pos_to_state(pos: Position, width: usize) -> State {
        pos.0 * width + pos.1
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.cells[pos.0][pos.1] == WALL
    }

    fn is_goal(&self, pos: Position) -> bool {
        pos == self.goal
    }
}

impl Environment for Maze {
    fn state_space(&self) -> usize {
        self.height * self.width
    }

    fn action_space(&self) -> usize {
        MOVES.len()
    }

    fn state(&self) -> State {
        Maze::pos_to_state(self.pos, self.width)
    }

    fn reward(&self) -> Reward {
        if self.is_goal(self.pos) {
            self.rewards.goal
        } else if self.is_wall(self.pos) {
            self.rewards.wall
        } else {
            self.rewards.step
        }
    }

    fn info(&self) -> String {
        format!("{},{}", self.pos.0, self.pos.1)
    }

    fn step(&mut self, action: Action) {
        let (dr, dc) = MOVES[action];
        // stepping on from a border wall stays on the grid
        self.pos = (
            self.pos.0.saturating_add_signed(dr).min(self.height - 1),
            self.pos.1.saturating_add_signed(dc).min(self.width - 1),
        );
    }

    fn reset(&mut self) {
        self.pos = self.start;
    }

    fn is_terminal(&self) -> bool {
        self.is_goal(self.pos) || self.is_wall(self.pos)
    }

    fn is_success(&self) -> bool {
        self.is_goal(self.pos)
    }
}
