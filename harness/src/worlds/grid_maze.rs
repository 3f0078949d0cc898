//! `GridMaze`: a rectangular maze parsed from ASCII rows.
//!
//! Tiles: `#` wall, `.` open, `S` start (exactly one), `G` goal (any number,
//! including none). Moves are tried in the order Up, Down, Left, Right and
//! are offered only into open tiles. Mazes may contain cycles; the search
//! does no cycle detection, so revisits are bounded only by the depth limit.

use plumb_kernel::problem::Problem;

use crate::contract::World;

/// A grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    const ORDER: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// Typed failure for maze parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeParseError {
    /// No rows, or only empty rows.
    Empty,
    /// A row's width differs from the first row's.
    RaggedRow { row: usize, expected: usize, actual: usize },
    /// A character outside `#.SG`.
    UnknownTile { row: usize, col: usize, tile: char },
    /// No `S` tile.
    MissingStart,
    /// More than one `S` tile.
    DuplicateStart { first: Cell, second: Cell },
}

impl std::fmt::Display for MazeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "maze has no tiles"),
            Self::RaggedRow {
                row,
                expected,
                actual,
            } => write!(f, "row {row} has width {actual}, expected {expected}"),
            Self::UnknownTile { row, col, tile } => {
                write!(f, "unknown tile {tile:?} at row {row}, column {col}")
            }
            Self::MissingStart => write!(f, "maze has no start tile"),
            Self::DuplicateStart { first, second } => write!(
                f,
                "maze has two start tiles: ({}, {}) and ({}, {})",
                first.row, first.col, second.row, second.col
            ),
        }
    }
}

impl std::error::Error for MazeParseError {}

/// Parsed maze.
#[derive(Debug, Clone)]
pub struct GridMaze {
    width: usize,
    height: usize,
    open: Vec<bool>,
    goals: Vec<bool>,
    start: Cell,
}

impl GridMaze {
    /// Parse a maze from rows of tiles.
    ///
    /// # Errors
    ///
    /// Returns [`MazeParseError`] if the grid is empty or ragged, contains an
    /// unknown tile, or does not have exactly one start tile.
    pub fn parse(rows: &[&str]) -> Result<Self, MazeParseError> {
        let width = rows.first().map_or(0, |r| r.chars().count());
        if width == 0 {
            return Err(MazeParseError::Empty);
        }

        let mut open = Vec::with_capacity(width * rows.len());
        let mut goals = Vec::with_capacity(width * rows.len());
        let mut start: Option<Cell> = None;

        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != width {
                return Err(MazeParseError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
            for (col, tile) in line.chars().enumerate() {
                let cell = Cell { row, col };
                match tile {
                    '#' => {
                        open.push(false);
                        goals.push(false);
                    }
                    '.' => {
                        open.push(true);
                        goals.push(false);
                    }
                    'G' => {
                        open.push(true);
                        goals.push(true);
                    }
                    'S' => {
                        if let Some(first) = start {
                            return Err(MazeParseError::DuplicateStart {
                                first,
                                second: cell,
                            });
                        }
                        start = Some(cell);
                        open.push(true);
                        goals.push(false);
                    }
                    other => {
                        return Err(MazeParseError::UnknownTile {
                            row,
                            col,
                            tile: other,
                        })
                    }
                }
            }
        }

        let start = start.ok_or(MazeParseError::MissingStart)?;
        Ok(Self {
            width,
            height: rows.len(),
            open,
            goals,
            start,
        })
    }

    #[must_use]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row * self.width + cell.col
    }

    fn is_open(&self, cell: Cell) -> bool {
        self.open[self.index(cell)]
    }

    /// The cell reached by `mv`, if it stays inside the grid.
    fn neighbor(&self, cell: Cell, mv: Move) -> Option<Cell> {
        let (row, col) = match mv {
            Move::Up => (cell.row.checked_sub(1)?, cell.col),
            Move::Down => (cell.row + 1, cell.col),
            Move::Left => (cell.row, cell.col.checked_sub(1)?),
            Move::Right => (cell.row, cell.col + 1),
        };
        (row < self.height && col < self.width).then_some(Cell { row, col })
    }
}

impl Problem for GridMaze {
    type State = Cell;
    type Action = Move;

    fn initial_state(&self) -> Cell {
        self.start
    }

    fn actions(&self, state: &Cell) -> Vec<Move> {
        Move::ORDER
            .into_iter()
            .filter(|&mv| self.neighbor(*state, mv).is_some_and(|n| self.is_open(n)))
            .collect()
    }

    fn transition(&self, state: &Cell, action: &Move) -> Cell {
        // Actions only ever name open in-bounds neighbors.
        self.neighbor(*state, *action).unwrap_or(*state)
    }

    fn is_goal(&self, state: &Cell) -> bool {
        self.goals[self.index(*state)]
    }
}

impl World for GridMaze {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "grid_maze"
    }

    fn describe_state(&self, state: &Cell) -> String {
        format!("({},{})", state.row, state.col)
    }

    fn describe_action(&self, action: &Move) -> String {
        match action {
            Move::Up => "U".into(),
            Move::Down => "D".into(),
            Move::Left => "L".into(),
            Move::Right => "R".into(),
        }
    }
}
