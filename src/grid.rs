//! Grid model: field bounds, robot position, wall segments and painted cells
//!
//! Walls are stored as pairs of corner coordinates. A wall blocks every cell
//! inside the inclusive rectangle spanned by its two endpoints, so a segment
//! that is degenerate in one axis still blocks the cells along that edge.

use crate::error::RobotError;
use indexmap::IndexSet;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default field size used when no snapshot is supplied
pub const DEFAULT_FIELD_SIZE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Cell::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A wall segment between two grid corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wall {
    pub from: Cell,
    pub to: Cell,
}

impl Wall {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Wall {
            from: Cell::new(x1, y1),
            to: Cell::new(x2, y2),
        }
    }

    /// Inclusive bounding-rectangle test
    pub fn blocks(&self, x: i32, y: i32) -> bool {
        let (min_x, max_x) = (self.from.x.min(self.to.x), self.from.x.max(self.to.x));
        let (min_y, max_y) = (self.from.y.min(self.to.y), self.from.y.max(self.to.y));
        (min_x..=max_x).contains(&x) && (min_y..=max_y).contains(&y)
    }
}

/// The four directions the robot can move or look in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    /// Unit vector, with y growing downwards
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Right => write!(f, "right"),
            Direction::Left => write!(f, "left"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Serializable snapshot of a grid, exchanged with callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridState {
    pub width: i32,
    pub height: i32,
    pub robot: Cell,
    pub walls: Vec<Wall>,
    pub painted: Vec<Cell>,
}

impl Default for GridState {
    fn default() -> Self {
        GridState {
            width: DEFAULT_FIELD_SIZE,
            height: DEFAULT_FIELD_SIZE,
            robot: Cell::new(0, 0),
            walls: Vec::new(),
            painted: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    robot: Cell,
    walls: IndexSet<Wall>,
    painted: IndexSet<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Grid::empty(DEFAULT_FIELD_SIZE, DEFAULT_FIELD_SIZE)
    }
}

impl Grid {
    /// Empty field with the robot in the top-left cell. Fails when the field
    /// has no cells to put the robot in.
    pub fn new(width: i32, height: i32) -> Result<Self, RobotError> {
        let grid = Grid::empty(width, height);
        if !grid.in_bounds(0, 0) {
            return Err(RobotError::InvalidRobotPlacement(0, 0));
        }
        Ok(grid)
    }

    fn empty(width: i32, height: i32) -> Self {
        Grid {
            width,
            height,
            robot: Cell::new(0, 0),
            walls: IndexSet::new(),
            painted: IndexSet::new(),
        }
    }

    pub fn from_state(state: GridState) -> Result<Self, RobotError> {
        let mut grid = Grid::empty(state.width, state.height);
        grid.load_state(
            state.width,
            state.height,
            state.robot,
            state.walls,
            state.painted,
        )?;
        Ok(grid)
    }

    /// Replace the whole grid state. The grid is left untouched on failure.
    pub fn load_state(
        &mut self,
        width: i32,
        height: i32,
        robot: Cell,
        walls: impl IntoIterator<Item = Wall>,
        painted: impl IntoIterator<Item = Cell>,
    ) -> Result<(), RobotError> {
        let candidate = Grid {
            width,
            height,
            robot,
            walls: walls.into_iter().collect(),
            painted: painted.into_iter().collect(),
        };

        if !candidate.is_cell_free(robot.x, robot.y) {
            return Err(RobotError::InvalidRobotPlacement(robot.x, robot.y));
        }

        debug!(
            "Loaded {}x{} field, robot at {}, {} walls, {} painted",
            width,
            height,
            robot,
            candidate.walls.len(),
            candidate.painted.len()
        );
        *self = candidate;
        Ok(())
    }

    pub fn dump_state(&self) -> GridState {
        GridState {
            width: self.width,
            height: self.height,
            robot: self.robot,
            walls: self.walls.iter().copied().collect(),
            painted: self.painted.iter().copied().collect(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn robot(&self) -> Cell {
        self.robot
    }

    pub fn walls(&self) -> impl Iterator<Item = &Wall> {
        self.walls.iter()
    }

    pub fn painted(&self) -> impl Iterator<Item = &Cell> {
        self.painted.iter()
    }

    pub fn is_painted(&self, x: i32, y: i32) -> bool {
        self.painted.contains(&Cell::new(x, y))
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// Add a wall; a wall covering the robot's cell is rejected
    pub fn add_wall(&mut self, wall: Wall) -> Result<(), RobotError> {
        if wall.blocks(self.robot.x, self.robot.y) {
            return Err(RobotError::InvalidRobotPlacement(self.robot.x, self.robot.y));
        }
        self.walls.insert(wall);
        Ok(())
    }

    /// Add the wall if absent, remove it otherwise. Returns true if the wall
    /// is present afterwards.
    pub fn toggle_wall(&mut self, wall: Wall) -> Result<bool, RobotError> {
        if self.walls.shift_remove(&wall) {
            return Ok(false);
        }
        self.add_wall(wall)?;
        Ok(true)
    }

    pub fn is_cell_free(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && !self.walls.iter().any(|wall| wall.blocks(x, y))
    }

    pub fn check_direction(&self, dx: i32, dy: i32) -> bool {
        let target = self.robot.offset(dx, dy);
        self.is_cell_free(target.x, target.y)
    }

    pub fn apply_move(&mut self, dx: i32, dy: i32) -> Result<Cell, RobotError> {
        let target = self.robot.offset(dx, dy);
        if !self.is_cell_free(target.x, target.y) {
            return Err(RobotError::BlockedMove(target.x, target.y));
        }
        trace!("Robot {} -> {}", self.robot, target);
        self.robot = target;
        Ok(target)
    }

    /// Paint the robot's cell; painting an already painted cell is a no-op
    pub fn paint_current_cell(&mut self) -> Cell {
        self.painted.insert(self.robot);
        self.robot
    }
}
