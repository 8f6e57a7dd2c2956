use rand::rngs::ThreadRng;
use rand::Rng;

use super::{
    config::GameConfig,
    direction::Direction,
    state::{Board, BoardState, Cell, PowerUp, Snake, Terminal},
};

/// A discrete event produced by one turn, consumed by the renderer,
/// audio cues, and the level controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The head advanced into a new cell
    Moved,
    /// The head landed on the fruit
    AteFruit,
    /// The head landed on the power-up
    PickedUp,
    /// The head entered a lethal cell (hazard or snake body)
    Died(Cell),
    /// The level was cleared
    Won,
}

impl Effect {
    /// Terminal effects halt the engine until it is reset
    pub fn is_terminal(&self) -> bool {
        matches!(self, Effect::Died(_) | Effect::Won)
    }
}

/// The turn-resolution engine.
///
/// Owns the current `BoardState` and replaces it wholesale on every turn,
/// so readers always see a fully resolved snapshot. Generic over the
/// random source so tests can substitute a seeded generator.
pub struct TurnEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    level: u8,
    rng: R,
    state: BoardState,
}

impl TurnEngine<ThreadRng> {
    pub fn new(config: GameConfig, level: u8) -> Self {
        Self::new_with_rng(config, level, rand::thread_rng())
    }
}

impl<R: Rng> TurnEngine<R> {
    pub fn new_with_rng(config: GameConfig, level: u8, mut rng: R) -> Self {
        let state = Self::fresh_state(&mut rng, &config, level);
        Self {
            config,
            level,
            rng,
            state,
        }
    }

    /// Current snapshot, read-only
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Replace the snapshot wholesale. Used to stage exact board layouts
    /// in tests; normal play only ever goes through `reset` and `step`.
    pub fn set_state(&mut self, state: BoardState) {
        self.state = state;
    }

    /// Rebuild the board for a level attempt: snake of initial length at
    /// the center heading right, fruit at a random free cell, everything
    /// else cleared
    pub fn reset(&mut self, level: u8) {
        self.level = level;
        self.state = Self::fresh_state(&mut self.rng, &self.config, level);
    }

    fn fresh_state(rng: &mut R, config: &GameConfig, level: u8) -> BoardState {
        let board = Board::for_level(level);
        let snake = Snake::new(
            board,
            board.center(),
            Direction::Right,
            config.initial_snake_length,
        );
        let mut state = BoardState::new(board, snake);
        state.fruit = Self::free_cell(rng, board, config.placement_attempts, |c| {
            state.snake.occupies(c)
        });
        state
    }

    /// Resolve one turn for the requested direction.
    ///
    /// Returns the ordered list of effects the turn produced. A terminal
    /// engine ignores the request, and an opposite-direction request with
    /// a snake longer than one cell is a complete no-op.
    pub fn step(&mut self, requested: Direction) -> Vec<Effect> {
        if self.state.is_terminal() {
            return Vec::new();
        }

        // Direction gate: instant reversal is rejected outright
        if requested.is_opposite(self.state.snake.heading) && self.state.snake.len() > 1 {
            return Vec::new();
        }

        let mut next = self.state.clone();
        let mut effects = Vec::new();
        next.snake.heading = requested;

        let (dx, dy) = requested.delta();
        let new_head = next.board.wrap(next.snake.head().offset(dx, dy));

        // Lethal check against the pre-pop snake: the current tail has not
        // been dropped yet, so a tail-chase move is lethal. Hazards first.
        if next.hazards.contains(&new_head) || next.snake.occupies(new_head) {
            next.terminal = Some(Terminal::Died);
            next.turns += 1;
            self.state = next;
            return vec![Effect::Died(new_head)];
        }

        // Advance: the head always enters the cell
        next.snake.body.insert(0, new_head);
        effects.push(Effect::Moved);

        let mut won = false;

        // Fruit resolution: growth keeps the tail, otherwise pop it.
        // A saturated board (nowhere left for fruit) is an immediate win.
        if next.fruit == Some(new_head) {
            next.score += 1;
            effects.push(Effect::AteFruit);
            let spawned =
                Self::free_cell(&mut self.rng, next.board, self.config.placement_attempts, |c| {
                    next.snake.occupies(c)
                        || next.hazards.contains(&c)
                        || next.power_up.map(|p| p.cell) == Some(c)
                });
            next.fruit = spawned;
            if next.fruit.is_none() {
                won = true;
                effects.push(Effect::Won);
            }
        } else {
            next.snake.body.pop();
        }

        // Power-up pickup: reveal runs for the post-growth snake length,
        // and spawning is suppressed for the rest of this turn
        let mut picked_up = false;
        if let Some(p) = next.power_up {
            if p.cell == new_head {
                next.reveal = next.snake.len() as u32;
                next.power_up = None;
                picked_up = true;
                effects.push(Effect::PickedUp);
            }
        }

        // Decay: the surviving power-up loses a turn of lifetime, the
        // reveal counter ticks down
        if let Some(p) = next.power_up.as_mut() {
            p.ttl -= 1;
        }
        if next.power_up.map(|p| p.ttl) == Some(0) {
            next.power_up = None;
        }
        if next.reveal > 0 {
            next.reveal -= 1;
        }

        // Win re-check: the level ends once free cells drop below the
        // threshold. Idempotent with the saturation win above.
        let threshold = self.win_threshold(next.board);
        if !won && next.free_cells() < threshold {
            won = true;
            effects.push(Effect::Won);
        }
        if won {
            next.terminal = Some(Terminal::Won);
        } else {
            // Stochastic spawns, power-up then hazard; a terminal turn
            // produces no further state changes
            self.maybe_spawn_powerup(&mut next, new_head, picked_up);
            self.maybe_spawn_hazard(&mut next);
        }

        next.turns += 1;
        self.state = next;
        effects
    }

    /// Free cells required to keep the level running
    fn win_threshold(&self, board: Board) -> i32 {
        (board.total_cells() as f64 * self.config.win_free_ratio).ceil() as i32
    }

    fn maybe_spawn_powerup(&mut self, next: &mut BoardState, head: Cell, picked_up: bool) {
        if self.level < self.config.powerup_min_level
            || next.power_up.is_some()
            || next.reveal > 0
            || next.snake.len() < self.config.powerup_min_length
        {
            return;
        }
        if !self.rng.gen_bool(self.config.powerup_chance) {
            return;
        }
        // A power-up never respawns on the turn it was picked up
        if picked_up {
            return;
        }
        let spawned =
            Self::free_cell(&mut self.rng, next.board, self.config.placement_attempts, |c| {
                next.snake.occupies(c) || next.fruit == Some(c) || next.hazards.contains(&c)
            });
        if let Some(cell) = spawned {
            // Lifetime scales with how far the snake has to travel
            let ttl = head.distance(cell).ceil().max(1.0) as u32 + self.config.powerup_ttl_bonus;
            next.power_up = Some(PowerUp { cell, ttl });
        }
    }

    fn maybe_spawn_hazard(&mut self, next: &mut BoardState) {
        if self.level < self.config.hazard_min_level
            || next.hazards.len() >= self.config.max_hazards(self.level)
        {
            return;
        }
        if !self.rng.gen_bool(self.config.hazard_chance) {
            return;
        }
        let spawned =
            Self::free_cell(&mut self.rng, next.board, self.config.placement_attempts, |c| {
                next.snake.occupies(c)
                    || next.fruit == Some(c)
                    || next.power_up.map(|p| p.cell) == Some(c)
                    || next.hazards.contains(&c)
            });
        if let Some(cell) = spawned {
            next.hazards.push(cell);
        }
    }

    /// Shared placement primitive: uniform rejection sampling against the
    /// occupancy predicate, falling back to a row-major scan for the first
    /// free cell. `None` means the board is fully occupied.
    fn free_cell<F>(rng: &mut R, board: Board, attempts: u32, occupied: F) -> Option<Cell>
    where
        F: Fn(Cell) -> bool,
    {
        for _ in 0..attempts {
            let cell = Cell::new(rng.gen_range(0..board.size), rng.gen_range(0..board.size));
            if !occupied(cell) {
                return Some(cell);
            }
        }
        for y in 0..board.size {
            for x in 0..board.size {
                let cell = Cell::new(x, y);
                if !occupied(cell) {
                    return Some(cell);
                }
            }
        }
        None
    }
}
