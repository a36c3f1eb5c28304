use std::sync::Arc;

use log::warn;

use super::action::Direction;
use super::config::{GameConfig, Variant};
use super::state::{Piece, Skin, Snake, SnakeGrid};
use crate::grid::location::RIGHT;
use crate::grid::{Actor, ActorId, Behaviour, GridError, Sprite, SpriteStore};

/// Moves between turns
const TURN_EVERY: u32 = 4;
/// Moves between growth spurts
const GROW_EVERY: u32 = 4 * TURN_EVERY;

/// A snake that drives itself: it walks straight, turns right every few
/// moves and grows a segment now and then. Nothing can kill it.
pub struct DemoSnake {
    tail_length: usize,
    body_sprites: Vec<Arc<Sprite>>,
    snake: Option<Snake>,
    steps: u32,
}

impl DemoSnake {
    pub fn new(tail_length: usize, body_sprites: Vec<Arc<Sprite>>) -> Self {
        Self {
            tail_length,
            body_sprites,
            snake: None,
            steps: 0,
        }
    }

    /// Lays the starting tail straight behind (below) the head
    fn spawn_tail(&self, me: ActorId, grid: &mut SnakeGrid) -> Option<Snake> {
        let head = grid.location(me)?;
        let mut snake = Snake::from_parts(me, Direction::Up, self.body_sprites.clone());
        for i in 1..=self.tail_length as i32 {
            snake.add_segment(grid, head.offset(0, i));
        }
        Some(snake)
    }

    fn step(&mut self, me: ActorId, grid: &mut SnakeGrid) -> Result<(), GridError> {
        if self.snake.is_none() {
            self.snake = self.spawn_tail(me, grid);
        }
        let Some(snake) = self.snake.as_mut() else {
            return Err(GridError::UnknownActor(me));
        };

        let head = grid.location(me).ok_or(GridError::UnknownActor(me))?;
        let vacated = snake.tail_shift(grid, head)?;
        grid.move_actor(me)?;

        self.steps += 1;
        if self.steps % TURN_EVERY == 0 {
            if let Some(actor) = grid.actor_mut(me) {
                actor.turn(RIGHT);
            }
        }
        if self.steps % GROW_EVERY == 0 {
            if let Some(cell) = vacated {
                snake.add_segment(grid, cell);
            }
        }

        grid.set_title(format!("Steps: {} | Length: {}", self.steps, snake.len()));
        Ok(())
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }
}

impl Behaviour<Piece> for DemoSnake {
    fn act(&mut self, me: ActorId, grid: &mut SnakeGrid) {
        if let Err(err) = self.step(me, grid) {
            warn!("demo snake stalled: {err}");
        }
    }

    fn reset(&mut self, _me: ActorId, grid: &mut SnakeGrid) {
        if let Some(mut snake) = self.snake.take() {
            snake.remove_tail(grid);
        }
        self.steps = 0;
        grid.set_title("Steps: 0 | Length: 1");
    }
}

/// Puts a self-driving snake head on the grid; its tail appears on the first
/// tick.
pub fn spawn_demo(
    grid: &mut SnakeGrid,
    store: &mut SpriteStore,
    config: &GameConfig,
) -> Result<ActorId, GridError> {
    let skin = Skin::for_variant(Variant::Demo);
    let head = store.get(skin.head, skin.rotatable_head)?;
    let body = store.get(skin.body, false)?;

    let actor = Actor::new(Piece::Head, vec![head])
        .with_behaviour(DemoSnake::new(config.initial_tail_length, vec![body]));
    Ok(grid.add_actor_with_direction(
        actor,
        config.start_location(),
        config.start_direction.degrees(),
    ))
}
