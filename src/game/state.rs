use super::direction::Direction;

/// A cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this cell by a delta (no wrapping)
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance to another cell, ignoring wrap
    pub fn distance(&self, other: Cell) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The square, toroidal playing field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub size: i32,
}

impl Board {
    /// Board side length for a level: `max(3, 2 + level)`
    pub fn for_level(level: u8) -> Self {
        Self {
            size: (2 + level as i32).max(3),
        }
    }

    /// Total cell count
    pub fn total_cells(&self) -> i32 {
        self.size * self.size
    }

    /// Map a coordinate pair onto the board; crossing an edge re-enters
    /// from the opposite edge at the same orthogonal offset
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell {
            x: cell.x.rem_euclid(self.size),
            y: cell.y.rem_euclid(self.size),
        }
    }

    /// Center cell, the snake's starting position
    pub fn center(&self) -> Cell {
        Cell::new(self.size / 2, self.size / 2)
    }
}

/// The snake: body segments head-first, plus current heading
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Cell>,
    /// Current heading
    pub heading: Direction,
}

impl Snake {
    /// Create a new snake with the given head, heading, and length,
    /// body laid out behind the head (wrapped onto the board)
    pub fn new(board: Board, head: Cell, heading: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = heading.delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(board.wrap(prev.offset(-dx, -dy)));
        }

        Self { body, heading }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        *self.body.last().expect("snake has length >= 1")
    }

    /// Check whether a cell is occupied by any body segment, head and
    /// current tail included
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }
}

/// A transient power-up on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUp {
    pub cell: Cell,
    /// Remaining turns before the power-up expires
    pub ttl: u32,
}

/// How a level attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Died,
    Won,
}

/// Complete board snapshot for one level attempt.
///
/// The engine replaces the whole snapshot each turn; readers (renderer,
/// input loop) only ever see a fully resolved state.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub board: Board,
    pub snake: Snake,
    /// Absent only momentarily when the board saturates, immediately
    /// preceding a win
    pub fruit: Option<Cell>,
    pub power_up: Option<PowerUp>,
    pub hazards: Vec<Cell>,
    /// While positive, the renderer suppresses the tail-fade effect
    pub reveal: u32,
    pub score: u32,
    pub turns: u32,
    pub terminal: Option<Terminal>,
}

impl BoardState {
    /// Fresh state for a level attempt: snake at center, no fruit yet
    /// (the engine places it), no hazards or power-up
    pub fn new(board: Board, snake: Snake) -> Self {
        Self {
            board,
            snake,
            fruit: None,
            power_up: None,
            hazards: Vec::new(),
            reveal: 0,
            score: 0,
            turns: 0,
            terminal: None,
        }
    }

    /// Check whether a cell is occupied by anything at rest:
    /// snake, fruit, power-up, or hazard
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.snake.occupies(cell)
            || self.fruit == Some(cell)
            || self.power_up.map(|p| p.cell) == Some(cell)
            || self.hazards.contains(&cell)
    }

    /// Number of cells not occupied by snake, fruit, power-up, or hazard
    pub fn free_cells(&self) -> i32 {
        let occupied = self.snake.len() as i32
            + self.hazards.len() as i32
            + self.fruit.is_some() as i32
            + self.power_up.is_some() as i32;
        self.board.total_cells() - occupied
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }
}
