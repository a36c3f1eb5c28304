use std::path::Path;
use std::time::Duration;

use anyhow::{bail, ensure, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::scoring::{ScoringRule, SpeedUp};
use crate::grid::{Location, MAX_GRID_SIDE};

/// Lowest selectable Nibbles level
pub const MIN_LEVEL: u32 = 1;
/// Highest selectable Nibbles level
pub const MAX_LEVEL: u32 = 10;

/// Which set of rules to play by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Colour cycling snake that speeds up over time
    Classic,
    /// Levelled snake scored against a countdown timer
    Nibbles,
    /// Walled arena with flat scoring
    Sneaky,
    /// Self-driving snake with no food
    Demo,
}

/// How queued turns are consumed each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueuePolicy {
    /// Take exactly one queued turn per tick, even if it is rejected
    OnePerTick,
    /// Keep taking queued turns until one is accepted or the queue is empty
    UntilAccepted,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub variant: Variant,
    /// Width of the game grid
    pub grid_width: i32,
    /// Height of the game grid
    pub grid_height: i32,
    /// Thickness of the deadly border; 0 means the grid edge is the wall
    pub wall_inset: i32,
    /// Head start cell, `None` for the grid centre
    pub start: Option<Location>,
    pub start_direction: Direction,
    /// Body segments behind the head at the start
    pub initial_tail_length: usize,
    /// Segments added per food eaten, one per tick
    pub growth_per_food: usize,
    /// Starting tick period in milliseconds
    pub period_ms: u64,
    pub speed_up: Option<SpeedUp>,
    pub scoring: ScoringRule,
    /// Maximum queued turns, `None` for unbounded
    pub queue_capacity: Option<usize>,
    pub queue_policy: QueuePolicy,
    /// Whether the last tail segment blocks the head even though it is
    /// about to move away
    pub tail_tip_blocks: bool,
    /// Number of snake colours to cycle through
    pub color_count: usize,
    pub auto_change_color: bool,
    pub level: u32,
    /// Seed for food placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl GameConfig {
    /// The colour-cycling snake on a 20x20 field
    pub fn classic() -> Self {
        Self {
            variant: Variant::Classic,
            grid_width: 20,
            grid_height: 20,
            wall_inset: 0,
            start: None,
            start_direction: Direction::Right,
            initial_tail_length: 3,
            growth_per_food: 2,
            period_ms: 180,
            speed_up: Some(SpeedUp {
                interval_secs: 5,
                step_ms: 2,
                min_period_ms: 80,
            }),
            scoring: ScoringRule::SpeedWeighted {
                base: 10,
                factor: 3.0,
            },
            queue_capacity: Some(5),
            queue_policy: QueuePolicy::OnePerTick,
            tail_tip_blocks: false,
            color_count: 4,
            auto_change_color: true,
            level: MIN_LEVEL,
            seed: None,
        }
    }

    /// Nibbles at the given level, clamped to `MIN_LEVEL..=MAX_LEVEL`
    pub fn nibbles(level: u32) -> Self {
        let mut config = Self {
            variant: Variant::Nibbles,
            grid_width: 25,
            grid_height: 25,
            wall_inset: 0,
            start: Some(Location::new(12, 12)),
            start_direction: Direction::Up,
            initial_tail_length: 9,
            growth_per_food: 0,
            period_ms: 0,
            speed_up: None,
            scoring: ScoringRule::Countdown {
                start_secs: 5.0,
                bonus_secs: 0.0,
            },
            queue_capacity: None,
            queue_policy: QueuePolicy::UntilAccepted,
            tail_tip_blocks: true,
            color_count: 1,
            auto_change_color: false,
            level: MIN_LEVEL,
            seed: None,
        };
        config.apply_level(level);
        config
    }

    /// A 41x41 grid whose outer ring is wall, leaving cells 1..=39 to play on
    pub fn sneaky() -> Self {
        Self {
            variant: Variant::Sneaky,
            grid_width: 41,
            grid_height: 41,
            wall_inset: 1,
            start: Some(Location::new(3, 1)),
            start_direction: Direction::Right,
            initial_tail_length: 2,
            growth_per_food: 1,
            period_ms: 100,
            speed_up: None,
            scoring: ScoringRule::Flat {
                per_food: 100,
                per_second: 1,
            },
            queue_capacity: Some(1),
            queue_policy: QueuePolicy::OnePerTick,
            tail_tip_blocks: true,
            color_count: 1,
            auto_change_color: false,
            level: MIN_LEVEL,
            seed: None,
        }
    }

    /// The self-driving snake; only grid size, start and period are used
    pub fn demo() -> Self {
        Self {
            variant: Variant::Demo,
            grid_width: 20,
            grid_height: 20,
            wall_inset: 0,
            start: Some(Location::new(10, 10)),
            start_direction: Direction::Up,
            initial_tail_length: 3,
            growth_per_food: 0,
            period_ms: 200,
            speed_up: None,
            scoring: ScoringRule::None,
            queue_capacity: Some(1),
            queue_policy: QueuePolicy::OnePerTick,
            tail_tip_blocks: true,
            color_count: 1,
            auto_change_color: false,
            level: MIN_LEVEL,
            seed: None,
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self::classic(),
            Variant::Nibbles => Self::nibbles(MIN_LEVEL),
            Variant::Sneaky => Self::sneaky(),
            Variant::Demo => Self::demo(),
        }
    }

    /// Classic rules on a custom grid size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Self::classic()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Sets the level, re-deriving the level-dependent Nibbles rules.
    ///
    /// Other variants only record the level.
    pub fn apply_level(&mut self, level: u32) {
        let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        self.level = level;
        if self.variant == Variant::Nibbles {
            self.period_ms = u64::from(80 - 5 * level);
            self.growth_per_food = (level / 2 + 8) as usize;
            self.scoring = ScoringRule::Countdown {
                start_secs: 5.0,
                bonus_secs: f64::from(level / 3 + 3),
            };
        }
    }

    pub fn initial_period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    pub fn start_location(&self) -> Location {
        self.start
            .unwrap_or_else(|| Location::new(self.grid_width / 2, self.grid_height / 2))
    }

    /// Top-left cell the snake may occupy
    pub fn playable_min(&self) -> Location {
        Location::new(self.wall_inset, self.wall_inset)
    }

    /// Bottom-right cell the snake may occupy
    pub fn playable_max(&self) -> Location {
        Location::new(
            self.grid_width - 1 - self.wall_inset,
            self.grid_height - 1 - self.wall_inset,
        )
    }

    pub fn is_playable(&self, location: Location) -> bool {
        let (min, max) = (self.playable_min(), self.playable_max());
        (min.x..=max.x).contains(&location.x) && (min.y..=max.y).contains(&location.y)
    }

    /// Cells of the starting snake, head first, laid out behind the head
    pub fn initial_body(&self) -> Vec<Location> {
        let head = self.start_location();
        let (dx, dy) = self.start_direction.delta();
        (0..=self.initial_tail_length as i32)
            .map(|i| head.offset(-dx * i, -dy * i))
            .collect()
    }

    /// Checks that the rules describe a playable game
    pub fn validate(&self) -> Result<()> {
        let side = 1..=MAX_GRID_SIDE;
        ensure!(
            side.contains(&self.grid_width) && side.contains(&self.grid_height),
            "grid sides must be between 1 and {} cells, got {}x{}",
            MAX_GRID_SIDE,
            self.grid_width,
            self.grid_height
        );
        ensure!(self.wall_inset >= 0, "wall inset cannot be negative");
        let (min, max) = (self.playable_min(), self.playable_max());
        ensure!(
            min.x <= max.x && min.y <= max.y,
            "wall inset {} leaves no room on a {}x{} grid",
            self.wall_inset,
            self.grid_width,
            self.grid_height
        );
        ensure!(self.period_ms >= 1, "tick period must be at least 1 ms");
        ensure!(self.color_count >= 1, "need at least one snake colour");

        if let Some(cell) = self.initial_body().into_iter().find(|&c| !self.is_playable(c)) {
            bail!(
                "initial snake of {} segments from {} does not fit, {} is outside the playing field",
                self.initial_tail_length + 1,
                self.start_location(),
                cell
            );
        }

        if let Some(speed_up) = &self.speed_up {
            ensure!(speed_up.min_period_ms >= 1, "speed-up minimum period must be at least 1 ms");
            ensure!(speed_up.interval_secs >= 1, "speed-up interval must be at least 1 s");
        }

        ensure!(
            self.queue_capacity != Some(0),
            "direction queue must hold at least one turn"
        );

        Ok(())
    }

    /// Reads a complete config from a JSON file and validates it
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }

    /// Writes the config as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }
}
