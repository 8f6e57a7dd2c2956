use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{Effect, GameConfig, LevelController, Phase, TurnEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// How long after a death or win the terminal overlay is held back
const OVERLAY_DELAY: Duration = Duration::from_millis(1000);

/// Cancellable deadline for the deferred overlay reveal.
///
/// Purely cosmetic: inputs during the delay are ignored because the
/// engine is already terminal, not because of this timer.
#[derive(Debug, Default)]
struct OverlayTimer {
    deadline: Option<Instant>,
}

impl OverlayTimer {
    fn schedule(&mut self) {
        self.deadline = Some(Instant::now() + OVERLAY_DELAY);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn is_visible(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Interactive mode: one engine turn per accepted key press, rendering
/// decoupled on its own frame timer
pub struct HumanMode {
    engine: TurnEngine,
    controller: LevelController,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    overlay: OverlayTimer,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, level: u8) -> Self {
        let controller = LevelController::new(&config, level);
        let engine = TurnEngine::new(config, controller.level());

        Self {
            engine,
            controller,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            overlay: OverlayTimer::default(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame); turns are driven by input
        // events, never by the frame clock
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            self.engine.state(),
                            &self.controller,
                            &self.metrics,
                            self.overlay.is_visible(),
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(dir) => self.take_turn(dir),
                KeyAction::Continue => self.acknowledge(),
                KeyAction::SelectLevel(level) => self.restart_at(level),
                KeyAction::Restart => self.restart_at(self.controller.level()),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    /// One accepted direction input resolves exactly one turn
    fn take_turn(&mut self, dir: crate::game::Direction) {
        let effects = self.engine.step(dir);
        self.controller.observe(&effects);

        if effects.iter().any(|e| e.is_terminal()) {
            self.overlay.schedule();
            if effects.contains(&Effect::Won) {
                self.metrics.on_level_cleared(self.engine.state().score);
            }
            if self.controller.phase() == Phase::GameOver {
                self.metrics.on_game_over(self.engine.state().score);
            }
        }
    }

    /// Apply the continue signal to a terminal overlay, if any
    fn acknowledge(&mut self) {
        if let Some(level) = self.controller.acknowledge() {
            self.engine.reset(level);
            self.overlay.cancel();
            self.metrics.on_game_start();
        }
    }

    /// Explicit level selection or restart: lives refill, fresh board
    fn restart_at(&mut self, level: u8) {
        let level = self.controller.select_level(level);
        self.engine.reset(level);
        self.overlay.cancel();
        self.metrics.on_game_start();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
