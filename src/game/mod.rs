//! Core game logic: the turn-resolution engine and level controller.
//!
//! Everything here is pure state transition with no I/O or rendering
//! dependencies; the TUI layers consume read-only snapshots and effects.

pub mod config;
pub mod direction;
pub mod engine;
pub mod level;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{Effect, TurnEngine};
pub use level::{LevelController, Phase};
pub use state::{Board, BoardState, Cell, PowerUp, Snake, Terminal};
