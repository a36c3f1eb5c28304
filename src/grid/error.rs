use thiserror::Error;

use super::ActorId;

/// Errors raised by the game grid toolkit
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("can't find image path: {path}")]
    SpriteNotFound { path: String },

    #[error("grid sides must be between 1 and {max} cells, got {width}x{height}", max = super::game_grid::MAX_GRID_SIDE)]
    InvalidDimensions { width: i32, height: i32 },

    #[error("actor {0:?} is not part of the scene")]
    UnknownActor(ActorId),
}
