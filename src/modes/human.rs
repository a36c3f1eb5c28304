use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use log::info;
use tokio::time::interval;

use super::{RENDER_INTERVAL, Tui, follow_period, restore_terminal, setup_terminal, tick_timer};
use crate::game::{Action, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Keyboard-controlled play of one of the engine variants
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut engine = GameEngine::new(config);
        let state = engine.reset().context("Failed to set up the game")?;

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;

        info!(
            "session over: {} games, high score {}",
            self.metrics.games_played, self.metrics.high_score
        );
        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks follow the grid's simulation period
        let mut period = self.state.grid.simulation_period();
        let mut tick = tick_timer(period);

        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick.tick() => {
                    if self.state.grid.take_tick() {
                        self.update_game()?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, self.engine.config(), &self.metrics);
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

            follow_period(&mut tick, &mut period, self.state.grid.simulation_period());
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply(action)?;
        }

        Ok(())
    }

    fn apply(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::GameAction(Action::Move(dir)) => {
                if self.state.grid.is_running() {
                    self.engine.queue_direction(&mut self.state, dir);
                }
            }
            KeyAction::GameAction(Action::Continue) => {}
            KeyAction::TogglePause => {
                if self.state.is_finished() {
                    self.reset_game()?;
                } else if self.state.grid.is_paused() {
                    self.state.grid.do_run();
                } else {
                    self.state.grid.do_pause();
                }
            }
            KeyAction::SingleStep => {
                if self.state.is_alive() {
                    self.state.grid.do_step();
                }
            }
            KeyAction::Restart => {
                self.reset_game()?;
            }
            KeyAction::ChangeColor => {
                self.engine.change_color(&mut self.state);
            }
            KeyAction::ToggleAutoColor => {
                self.engine.toggle_auto_color(&mut self.state);
            }
            KeyAction::LevelUp | KeyAction::LevelDown => {
                let delta = if action == KeyAction::LevelUp { 1 } else { -1 };
                if self.engine.change_level(delta, self.state.is_alive()) {
                    let title = self.state.title(self.engine.config());
                    self.state.grid.set_title(title);
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        let result = self
            .engine
            .step(&mut self.state, Action::Continue)
            .context("Game step failed")?;

        // Track game over
        if result.terminated {
            self.metrics.on_game_over(self.state.score, self.state.status);
        }

        Ok(())
    }

    fn reset_game(&mut self) -> Result<()> {
        self.state = self.engine.reset().context("Failed to restart the game")?;
        self.metrics.on_game_start();
        Ok(())
    }
}
