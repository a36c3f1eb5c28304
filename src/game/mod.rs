//! Snake rules on top of the grid toolkit
//!
//! The engine drives the player-controlled variants tick by tick; the demo
//! snake is an actor behaviour the grid drives on its own.

pub mod action;
pub mod config;
pub mod demo;
pub mod engine;
pub mod food;
pub mod scoring;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{GameConfig, QueuePolicy, Variant};
pub use demo::{spawn_demo, DemoSnake};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use scoring::{ScoringRule, SpeedUp};
pub use state::{CollisionType, GameState, GameStatus, Piece, Skin, Snake, SnakeGrid};
