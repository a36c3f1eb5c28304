use std::time::Duration;

use log::{debug, info};

use super::{
    action::{Action, Direction},
    config::{GameConfig, QueuePolicy},
    food::{relocate_food, spawn_food},
    state::{CollisionType, GameState, GameStatus, Piece, Skin, Snake, SnakeGrid},
};
use crate::grid::{GridError, Location, SpriteStore};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Points scored this step
    pub points: u32,
    /// The queued turn that took effect, if any
    pub turned: Option<Direction>,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether the board filled up this step
    pub won: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn finished() -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                ate_food: false,
                points: 0,
                turned: None,
                collision_type: None,
                won: false,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    skin: Skin,
    sprites: SpriteStore,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_sprites(config, SpriteStore::default())
    }

    pub fn with_sprites(config: GameConfig, sprites: SpriteStore) -> Self {
        let skin = Skin::for_variant(config.variant);
        Self {
            config,
            skin,
            sprites,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to its initial state on a fresh grid
    pub fn reset(&mut self) -> Result<GameState, GridError> {
        let config = &self.config;
        let mut grid =
            SnakeGrid::with_seed(config.grid_width, config.grid_height, config.seed)?;
        grid.set_simulation_period(config.initial_period());

        let cells = config.initial_body();
        let snake = Snake::spawn(
            &mut grid,
            &mut self.sprites,
            &self.skin,
            config.start_location(),
            cells.get(1..).unwrap_or_default(),
            config.start_direction,
            config.color_count,
        )?;
        let food = spawn_food(&mut grid, &mut self.sprites, &self.skin, config)?;

        let mut state = GameState::new(grid, snake, food);
        state.countdown = config.scoring.countdown_start();
        state.auto_change_color = config.auto_change_color;
        let title = state.title(config);
        state.grid.set_title(title);
        state.grid.do_run();

        info!(
            "new {:?} game on {}x{} (level {}, {:?} per tick)",
            config.variant,
            config.grid_width,
            config.grid_height,
            config.level,
            config.initial_period()
        );
        Ok(state)
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> Result<StepResult, GridError> {
        if !state.is_alive() {
            return Ok(StepResult::finished());
        }

        if let Action::Move(direction) = action {
            self.queue_direction(state, direction);
        }
        let turned = self.resolve_direction(state);

        let period = state.grid.simulation_period();
        self.advance_clocks(state, period);

        let mut info = StepInfo {
            ate_food: false,
            points: 0,
            turned,
            collision_type: None,
            won: false,
        };

        let head = state
            .snake
            .head_location(&state.grid)
            .ok_or(GridError::UnknownActor(state.snake.head))?;
        let (dx, dy) = state.snake.direction.delta();
        let next = head.offset(dx, dy);

        if let Some(collision) = self.check_collision(state, next) {
            info.collision_type = Some(collision);
            self.finish(state, GameStatus::Over(collision));
            return Ok(StepResult {
                terminated: true,
                info,
            });
        }

        state.snake.advance(&mut state.grid, next)?;

        if let Some(food) = state.food.filter(|&food| state.grid.location(food) == Some(next)) {
            info.ate_food = true;
            info.points = self.eat(state);

            if relocate_food(&mut state.grid, food, &self.config).is_none() {
                state.grid.remove_actor(food);
                state.food = None;
                info.won = true;
                self.finish(state, GameStatus::Won);
            }
        }

        let title = state.title(&self.config);
        state.grid.set_title(title);

        Ok(StepResult {
            terminated: !state.is_alive(),
            info,
        })
    }

    /// Add a turn to the direction queue.
    ///
    /// Returns false when the game is over or the queue is full.
    pub fn queue_direction(&self, state: &mut GameState, direction: Direction) -> bool {
        if !state.is_alive() {
            return false;
        }
        if let Some(capacity) = self.config.queue_capacity {
            if state.directions.len() >= capacity {
                debug!("direction queue full, dropped {direction:?}");
                return false;
            }
        }
        state.directions.push_back(direction);
        true
    }

    /// Show the snake in its next colour
    pub fn change_color(&self, state: &mut GameState) {
        let color = (state.snake.color + 1) % self.config.color_count.max(1);
        state.snake.set_color(&mut state.grid, color);
    }

    pub fn toggle_auto_color(&self, state: &mut GameState) {
        state.auto_change_color = !state.auto_change_color;
    }

    /// Move the level up or down by `delta`; the new rules apply from the
    /// next reset.
    ///
    /// Lowering the level is refused while a game is being played.
    pub fn change_level(&mut self, delta: i32, playing: bool) -> bool {
        if delta < 0 && playing {
            return false;
        }
        let level = self.config.level.saturating_add_signed(delta);
        let before = self.config.level;
        self.config.apply_level(level);
        if self.config.level != before {
            info!("level {} -> {}", before, self.config.level);
        }
        true
    }

    /// Pop queued turns per the queue policy and apply the first valid one.
    ///
    /// A turn is valid when it changes the heading without reversing it.
    fn resolve_direction(&self, state: &mut GameState) -> Option<Direction> {
        let current = state.snake.direction;
        let accepts = |d: Direction| d != current && !current.is_opposite(d);

        let accepted = match self.config.queue_policy {
            QueuePolicy::OnePerTick => state.directions.pop_front().filter(|&d| {
                let ok = accepts(d);
                if !ok {
                    debug!("ignored turn {d:?} while heading {current:?}");
                }
                ok
            }),
            QueuePolicy::UntilAccepted => {
                std::iter::from_fn(|| state.directions.pop_front()).find(|&d| accepts(d))
            }
        };

        if let Some(direction) = accepted {
            state.snake.set_direction(&mut state.grid, direction);
        }
        accepted
    }

    fn advance_clocks(&self, state: &mut GameState, period: Duration) {
        let before = state.elapsed;
        state.elapsed += period;
        state.steps += 1;

        let whole_seconds = state.elapsed.as_secs() - before.as_secs();
        state.score += whole_seconds as u32 * self.config.scoring.second_points();

        if self.config.scoring.is_countdown() {
            state.countdown -= period.as_secs_f64();
        }

        if let Some(speed_up) = self.config.speed_up {
            state.since_speed_up += period;
            if state.since_speed_up >= speed_up.interval() {
                state.since_speed_up = Duration::ZERO;
                let faster = speed_up.next_period(period);
                if faster != period {
                    state.grid.set_simulation_period(faster);
                    state.speed_percent =
                        speed_up.speed_percent(self.config.initial_period(), faster);
                    debug!("speed up to {faster:?} ({}%)", state.speed_percent);
                }
            }
        }
    }

    /// Check if moving the head to `next` causes a collision
    fn check_collision(&self, state: &GameState, next: Location) -> Option<CollisionType> {
        if !self.config.is_playable(next) {
            return Some(CollisionType::Wall);
        }

        // the last segment moves out of the way unless it blocks or the tail
        // is about to grow into its cell
        let tip_vacates = !self.config.tail_tip_blocks && state.snake.pending_growth == 0;
        let tip = state.snake.tail.last().copied();
        let hit = state
            .grid
            .collision_candidates_at(next, Some(Piece::Body))
            .into_iter()
            .any(|id| !(tip_vacates && Some(id) == tip));

        hit.then_some(CollisionType::SelfCollision)
    }

    /// Credit a meal; returns the points it earned
    fn eat(&self, state: &mut GameState) -> u32 {
        let scoring = &self.config.scoring;
        let points = scoring.food_points(state.speed_percent, state.countdown);
        state.score += points;
        state.foods_eaten += 1;
        state.snake.pending_growth += self.config.growth_per_food;
        state.countdown += scoring.countdown_bonus();

        if state.auto_change_color {
            self.change_color(state);
        }

        debug!(
            "food #{} eaten for {} points, {} segments to grow",
            state.foods_eaten, points, state.snake.pending_growth
        );
        points
    }

    fn finish(&self, state: &mut GameState, status: GameStatus) {
        state.status = status;
        state.directions.clear();
        state.grid.do_pause();
        let title = state.title(&self.config);
        state.grid.set_title(title);

        match status {
            GameStatus::Won => info!(
                "board full after {} steps, score {}",
                state.steps, state.score
            ),
            _ => info!(
                "game over ({:?}) after {} steps, score {}",
                status, state.steps, state.score
            ),
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
