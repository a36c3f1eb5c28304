use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use super::action::Direction;
use super::config::{GameConfig, Variant};
use crate::grid::{Actor, ActorId, GameGrid, GridError, Location, Sprite, SpriteStore};

/// What an actor on the snake grid is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Head,
    Body,
    Food,
}

pub type SnakeGrid = GameGrid<Piece>;

/// Sprite resource paths a variant draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skin {
    pub head: &'static str,
    pub body: &'static str,
    pub food: &'static str,
    /// Whether the head sprite turns with the heading
    pub rotatable_head: bool,
}

impl Skin {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self {
                head: "sprites/squarehead.png",
                body: "sprites/squarebody.png",
                food: "sprites/apple.png",
                rotatable_head: false,
            },
            Variant::Nibbles => Self {
                head: "sprites/snake_head.png",
                body: "sprites/snake_tail.png",
                food: "sprites/nibble.png",
                rotatable_head: true,
            },
            Variant::Sneaky => Self {
                head: "sprites/snake_head.png",
                body: "sprites/snake_tail.png",
                food: "sprites/mouse.png",
                rotatable_head: true,
            },
            Variant::Demo => Self {
                head: "sprites/snake_head.png",
                body: "sprites/snake_tail.png",
                food: "sprites/apple.png",
                rotatable_head: true,
            },
        }
    }
}

/// The snake in the game.
///
/// Positions live on the grid; the snake only knows which actors make it up.
#[derive(Debug, Clone)]
pub struct Snake {
    pub head: ActorId,
    /// Body segments, nearest to the head first
    pub tail: Vec<ActorId>,
    /// Current direction of movement
    pub direction: Direction,
    /// Segments still to be added, one per tick
    pub pending_growth: usize,
    /// Visible sprite frame of every piece
    pub color: usize,
    body_sprites: Vec<Arc<Sprite>>,
}

impl Snake {
    /// Places a snake on the grid, the body along `body_cells` behind the
    /// head.
    ///
    /// Each piece gets `frames` colour frames.
    pub fn spawn(
        grid: &mut SnakeGrid,
        store: &mut SpriteStore,
        skin: &Skin,
        head_cell: Location,
        body_cells: &[Location],
        direction: Direction,
        frames: usize,
    ) -> Result<Self, GridError> {
        let head_sprites = store.get_frames(skin.head, frames, skin.rotatable_head)?;
        let body_sprites = store.get_frames(skin.body, frames, false)?;

        let head = grid.add_actor_with_direction(
            Actor::new(Piece::Head, head_sprites),
            head_cell,
            direction.degrees(),
        );

        let mut snake = Self {
            head,
            tail: Vec::with_capacity(body_cells.len()),
            direction,
            pending_growth: 0,
            color: 0,
            body_sprites,
        };
        for &cell in body_cells {
            snake.add_segment(grid, cell);
        }
        Ok(snake)
    }

    /// A snake made of existing actors
    pub fn from_parts(head: ActorId, direction: Direction, body_sprites: Vec<Arc<Sprite>>) -> Self {
        Self {
            head,
            tail: Vec::new(),
            direction,
            pending_growth: 0,
            color: 0,
            body_sprites,
        }
    }

    /// Appends a body segment at `cell`, in the snake's current colour
    pub fn add_segment(&mut self, grid: &mut SnakeGrid, cell: Location) -> ActorId {
        let mut segment = Actor::new(Piece::Body, self.body_sprites.clone());
        segment.show(self.color);
        let id = grid.add_actor(segment, cell);
        self.tail.push(id);
        id
    }

    /// Number of pieces including the head
    pub fn len(&self) -> usize {
        self.tail.len() + 1
    }

    /// A snake always has a head
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn head_location(&self, grid: &SnakeGrid) -> Option<Location> {
        grid.location(self.head)
    }

    /// Cells of every piece, head first
    pub fn locations(&self, grid: &SnakeGrid) -> Vec<Location> {
        std::iter::once(self.head)
            .chain(self.tail.iter().copied())
            .filter_map(|id| grid.location(id))
            .collect()
    }

    /// Shift register over the tail: every segment takes the cell of the one
    /// ahead of it and the first segment takes `lead`.
    ///
    /// A pending growth segment is appended at the cell the last segment
    /// left. Returns that cell when it ends up free.
    pub fn tail_shift(
        &mut self,
        grid: &mut SnakeGrid,
        lead: Location,
    ) -> Result<Option<Location>, GridError> {
        let mut carry = lead;
        for &id in &self.tail {
            let previous = grid.location(id).ok_or(GridError::UnknownActor(id))?;
            grid.set_location(id, carry)?;
            carry = previous;
        }

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
            self.add_segment(grid, carry);
            Ok(None)
        } else {
            Ok(Some(carry))
        }
    }

    /// Shifts the tail behind the head and moves the head to `next`
    pub fn advance(&mut self, grid: &mut SnakeGrid, next: Location) -> Result<(), GridError> {
        let head = self
            .head_location(grid)
            .ok_or(GridError::UnknownActor(self.head))?;
        self.tail_shift(grid, head)?;
        grid.set_location(self.head, next)
    }

    /// Points the head actor at `direction`
    pub fn set_direction(&mut self, grid: &mut SnakeGrid, direction: Direction) {
        self.direction = direction;
        if let Some(head) = grid.actor_mut(self.head) {
            head.set_direction(direction.degrees());
        }
    }

    /// Shows colour frame `color` on every piece
    pub fn set_color(&mut self, grid: &mut SnakeGrid, color: usize) {
        self.color = color;
        for id in std::iter::once(self.head).chain(self.tail.iter().copied()) {
            if let Some(actor) = grid.actor_mut(id) {
                actor.show(color);
            }
        }
    }

    /// Takes every body segment off the grid
    pub fn remove_tail(&mut self, grid: &mut SnakeGrid) {
        for id in self.tail.drain(..) {
            grid.remove_actor(id);
        }
        self.pending_growth = 0;
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Over(CollisionType),
    /// No free cell left for the next food
    Won,
}

/// Complete game state
pub struct GameState {
    pub grid: SnakeGrid,
    pub snake: Snake,
    /// `None` once the board has filled up
    pub food: Option<ActorId>,
    /// Turns queued by the player, oldest first
    pub directions: VecDeque<Direction>,
    pub score: u32,
    pub foods_eaten: u32,
    pub steps: u32,
    /// Simulated play time, advanced by one tick period per step
    pub elapsed: Duration,
    /// Play time since the last speed-up
    pub since_speed_up: Duration,
    /// Seconds left on the countdown timer
    pub countdown: f64,
    pub speed_percent: u32,
    pub status: GameStatus,
    pub auto_change_color: bool,
}

impl GameState {
    pub fn new(grid: SnakeGrid, snake: Snake, food: Option<ActorId>) -> Self {
        Self {
            grid,
            snake,
            food,
            directions: VecDeque::new(),
            score: 0,
            foods_eaten: 0,
            steps: 0,
            elapsed: Duration::ZERO,
            since_speed_up: Duration::ZERO,
            countdown: 0.0,
            speed_percent: 0,
            status: GameStatus::Running,
            auto_change_color: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn is_finished(&self) -> bool {
        !self.is_alive()
    }

    pub fn food_location(&self) -> Option<Location> {
        self.food.and_then(|id| self.grid.location(id))
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, location: Location) -> bool {
        self.grid
            .actors_at(location, None)
            .iter()
            .any(|&id| {
                matches!(
                    self.grid.actor(id).map(|actor| actor.kind()),
                    Some(Piece::Head | Piece::Body)
                )
            })
    }

    /// The status line shown above the board
    pub fn title(&self, config: &GameConfig) -> String {
        let summary = match config.variant {
            Variant::Classic => {
                let interval = config.speed_up.map_or(0, |s| s.interval_secs);
                let remaining = interval.saturating_sub(self.since_speed_up.as_secs());
                format!(
                    "Score: {} | Apples: {} | Time: {} | Speed: {}%",
                    self.score, self.foods_eaten, remaining, self.speed_percent
                )
            }
            Variant::Nibbles => format!(
                "Score: {} | Nibbles: {} | Timer: {} secs | Level: {}",
                self.score, self.foods_eaten, self.countdown as i64, config.level
            ),
            Variant::Sneaky => format!(
                "Score: {} | Mice: {} | Time: {} secs",
                self.score,
                self.foods_eaten,
                self.elapsed.as_secs()
            ),
            Variant::Demo => format!("Steps: {} | Length: {}", self.steps, self.snake.len()),
        };

        match self.status {
            GameStatus::Running => summary,
            GameStatus::Over(_) => format!("GAME OVER ({summary})"),
            GameStatus::Won => format!("CONGRATULATIONS ({summary})"),
        }
    }
}
