use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use log::info;
use tokio::time::interval;

use super::{RENDER_INTERVAL, Tui, follow_period, restore_terminal, setup_terminal, tick_timer};
use crate::game::{GameConfig, SnakeGrid, spawn_demo};
use crate::grid::SpriteStore;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// A self-driving snake on a bare grid; the grid's own simulation loop is
/// all there is.
pub struct DemoMode {
    grid: SnakeGrid,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl DemoMode {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let mut grid = SnakeGrid::with_seed(config.grid_width, config.grid_height, config.seed)
            .context("Failed to create the demo grid")?;
        grid.set_simulation_period(config.initial_period());

        let mut sprites = SpriteStore::default();
        spawn_demo(&mut grid, &mut sprites, config).context("Failed to spawn the demo snake")?;
        grid.set_title("Steps: 0 | Length: 1");
        grid.do_run();

        Ok(Self {
            grid,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        let result = self.run_demo_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;

        info!("demo stopped after {}", self.metrics.format_time());
        result
    }

    async fn run_demo_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut period = self.grid.simulation_period();
        let mut tick = tick_timer(period);
        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick.tick() => {
                    if self.grid.take_tick() {
                        self.grid.act_all();
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render_demo(frame, &self.grid, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            follow_period(&mut tick, &mut period, self.grid.simulation_period());
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::TogglePause => {
                if self.grid.is_paused() {
                    self.grid.do_run();
                } else {
                    self.grid.do_pause();
                }
            }
            KeyAction::SingleStep => self.grid.do_step(),
            KeyAction::Restart => {
                self.grid.do_reset();
                self.grid.do_run();
                self.metrics.on_game_start();
            }
            KeyAction::Quit => self.should_quit = true,
            // Steering and the game settings do not apply to the demo
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Piece;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(mode: &mut DemoMode, code: KeyCode) {
        mode.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn demo() -> DemoMode {
        DemoMode::new(&GameConfig::demo()).unwrap()
    }

    #[test]
    fn test_demo_starts_running_with_head_only() {
        let mode = demo();
        assert!(mode.grid.is_running());
        assert_eq!(mode.grid.number_of_actors(), 1);
        assert_eq!(mode.grid.title(), "Steps: 0 | Length: 1");
    }

    #[test]
    fn test_ticks_drive_the_snake() {
        let mut mode = demo();
        for _ in 0..3 {
            assert!(mode.grid.take_tick());
            mode.grid.act_all();
        }
        assert_eq!(mode.grid.number_of_actors_of(Piece::Body), 3);
        assert_eq!(mode.grid.title(), "Steps: 3 | Length: 4");
    }

    #[test]
    fn test_restart_returns_to_the_start() {
        let mut mode = demo();
        let start = GameConfig::demo().start_location();
        for _ in 0..5 {
            mode.grid.act_all();
        }

        press(&mut mode, KeyCode::Char('r'));
        assert!(mode.grid.is_running());
        assert_eq!(mode.grid.number_of_actors(), 1);
        let head = mode.grid.actors_of(Piece::Head)[0];
        assert_eq!(mode.grid.location(head), Some(start));
    }

    #[test]
    fn test_pause_step_and_quit() {
        let mut mode = demo();

        press(&mut mode, KeyCode::Char(' '));
        assert!(!mode.grid.take_tick());

        press(&mut mode, KeyCode::Char('n'));
        assert!(mode.grid.take_tick());
        assert!(mode.grid.is_paused());

        press(&mut mode, KeyCode::Up);
        assert!(!mode.should_quit);
        press(&mut mode, KeyCode::Esc);
        assert!(mode.should_quit);
    }
}
