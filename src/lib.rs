//! Torus Snake - turn-based snake on an edge-wrapping board
//!
//! This library provides:
//! - Core turn-resolution engine and level controller (game module)
//! - Key event translation (input module)
//! - TUI rendering (render module)
//! - Session metrics (metrics module)
//! - The interactive play mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
