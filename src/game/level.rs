use super::{config::GameConfig, engine::Effect};

/// Phase of the level/lives state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Died with lives remaining; acknowledging retries the same level
    LifeLost,
    /// Died with no lives remaining; acknowledging restarts at level 1
    GameOver,
    /// Won the level; acknowledging advances to the next one
    LevelCleared,
}

/// Owns level progression and remaining-lives bookkeeping.
///
/// Terminal phases are only left through `acknowledge` (an explicit
/// continue signal) or `select_level`; the controller never auto-advances.
#[derive(Debug, Clone)]
pub struct LevelController {
    level: u8,
    lives: u8,
    phase: Phase,
    starting_lives: u8,
    max_level: u8,
}

impl LevelController {
    pub fn new(config: &GameConfig, level: u8) -> Self {
        Self {
            level: level.clamp(1, config.max_level),
            lives: config.starting_lives,
            phase: Phase::Playing,
            starting_lives: config.starting_lives,
            max_level: config.max_level,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// React to the effects of a resolved turn
    pub fn observe(&mut self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::Died(_) => {
                    self.lives = self.lives.saturating_sub(1);
                    self.phase = if self.lives > 0 {
                        Phase::LifeLost
                    } else {
                        Phase::GameOver
                    };
                }
                Effect::Won => {
                    self.phase = Phase::LevelCleared;
                }
                _ => {}
            }
        }
    }

    /// Apply the continue signal. Returns the level the board should be
    /// rebuilt at, or `None` if there is nothing to acknowledge.
    ///
    /// Lives are refilled only on a full restart after game over; clearing
    /// a level carries the current count forward.
    pub fn acknowledge(&mut self) -> Option<u8> {
        let level = match self.phase {
            Phase::Playing => return None,
            Phase::LifeLost => self.level,
            Phase::GameOver => {
                self.lives = self.starting_lives;
                1
            }
            Phase::LevelCleared => (self.level + 1).min(self.max_level),
        };
        self.level = level;
        self.phase = Phase::Playing;
        Some(level)
    }

    /// Explicit level selection: clamps to the valid range, refills lives,
    /// and returns the level the board should be rebuilt at
    pub fn select_level(&mut self, level: u8) -> u8 {
        self.level = level.clamp(1, self.max_level);
        self.lives = self.starting_lives;
        self.phase = Phase::Playing;
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::Cell;

    fn controller_at(level: u8) -> LevelController {
        LevelController::new(&GameConfig::default(), level)
    }

    #[test]
    fn test_new_clamps_level() {
        assert_eq!(controller_at(0).level(), 1);
        assert_eq!(controller_at(5).level(), 5);
        assert_eq!(controller_at(99).level(), 10);
    }

    #[test]
    fn test_death_with_lives_left() {
        let mut ctrl = controller_at(4);
        ctrl.observe(&[Effect::Died(Cell::new(0, 0))]);

        assert_eq!(ctrl.phase(), Phase::LifeLost);
        assert_eq!(ctrl.lives(), 2);

        // Retry stays on the same level
        assert_eq!(ctrl.acknowledge(), Some(4));
        assert_eq!(ctrl.phase(), Phase::Playing);
        assert_eq!(ctrl.lives(), 2);
    }

    #[test]
    fn test_third_death_is_game_over() {
        let mut ctrl = controller_at(4);
        for _ in 0..2 {
            ctrl.observe(&[Effect::Died(Cell::new(0, 0))]);
            ctrl.acknowledge();
        }
        ctrl.observe(&[Effect::Died(Cell::new(0, 0))]);

        assert_eq!(ctrl.phase(), Phase::GameOver);
        assert_eq!(ctrl.lives(), 0);

        // Full restart: back to level 1 with fresh lives
        assert_eq!(ctrl.acknowledge(), Some(1));
        assert_eq!(ctrl.level(), 1);
        assert_eq!(ctrl.lives(), 3);
        assert_eq!(ctrl.phase(), Phase::Playing);
    }

    #[test]
    fn test_win_advances_without_refilling_lives() {
        let mut ctrl = controller_at(4);
        ctrl.observe(&[Effect::Died(Cell::new(0, 0))]);
        ctrl.acknowledge();
        ctrl.observe(&[Effect::Won]);

        assert_eq!(ctrl.phase(), Phase::LevelCleared);
        assert_eq!(ctrl.acknowledge(), Some(5));
        // Lives carry over across a cleared level
        assert_eq!(ctrl.lives(), 2);
    }

    #[test]
    fn test_win_at_top_level_stays_there() {
        let mut ctrl = controller_at(10);
        ctrl.observe(&[Effect::Won]);
        assert_eq!(ctrl.acknowledge(), Some(10));
    }

    #[test]
    fn test_select_level_clamps_and_refills() {
        let mut ctrl = controller_at(4);
        ctrl.observe(&[Effect::Died(Cell::new(0, 0))]);

        assert_eq!(ctrl.select_level(12), 10);
        assert_eq!(ctrl.lives(), 3);
        assert_eq!(ctrl.phase(), Phase::Playing);

        assert_eq!(ctrl.select_level(0), 1);
    }

    #[test]
    fn test_acknowledge_while_playing_is_noop() {
        let mut ctrl = controller_at(2);
        assert_eq!(ctrl.acknowledge(), None);
        assert_eq!(ctrl.phase(), Phase::Playing);
        assert_eq!(ctrl.lives(), 3);
    }

    #[test]
    fn test_non_terminal_effects_are_ignored() {
        let mut ctrl = controller_at(2);
        ctrl.observe(&[Effect::Moved, Effect::AteFruit, Effect::PickedUp]);
        assert_eq!(ctrl.phase(), Phase::Playing);
        assert_eq!(ctrl.lives(), 3);
    }
}
