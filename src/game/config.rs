use serde::{Deserialize, Serialize};

/// Configuration for the game rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Initial length of the snake at the start of a life
    pub initial_snake_length: usize,
    /// Lives granted on a fresh start or explicit level selection
    pub starting_lives: u8,
    /// Highest selectable level
    pub max_level: u8,

    // Spawn rules
    /// Minimum level at which power-ups may spawn
    pub powerup_min_level: u8,
    /// Minimum snake length before a power-up may spawn
    pub powerup_min_length: usize,
    /// Per-turn probability of a power-up spawn once eligible
    pub powerup_chance: f64,
    /// Turns added to a power-up's distance-derived lifetime
    pub powerup_ttl_bonus: u32,
    /// Minimum level at which hazards may spawn
    pub hazard_min_level: u8,
    /// Per-turn probability of a hazard spawn once eligible
    pub hazard_chance: f64,

    // Board policy
    /// Fraction of cells that must stay free; dropping below ends the level
    pub win_free_ratio: f64,
    /// Rejection-sampling attempts before falling back to a board scan
    pub placement_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_snake_length: 1,
            starting_lives: 3,
            max_level: 10,
            powerup_min_level: 2,
            powerup_min_length: 10,
            powerup_chance: 0.25,
            powerup_ttl_bonus: 3,
            hazard_min_level: 3,
            hazard_chance: 0.12,
            win_free_ratio: 0.15,
            placement_attempts: 128,
        }
    }
}

impl GameConfig {
    /// Maximum number of hazards allowed on the board at the given level
    pub fn max_hazards(&self, level: u8) -> usize {
        level.saturating_sub(2) as usize
    }

    /// Config with all stochastic spawning disabled, for tests that need
    /// full control over board contents
    pub fn no_spawns() -> Self {
        Self {
            powerup_chance: 0.0,
            hazard_chance: 0.0,
            ..Default::default()
        }
    }
}
