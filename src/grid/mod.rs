//! Miniature actor/grid toolkit the games are built on
//!
//! A `GameGrid` owns a scene of `Actor`s laid out on integer cells. Actors
//! carry sprites resolved through a `SpriteStore`, and may carry a
//! `Behaviour` the grid calls once per simulation tick.

pub mod actor;
pub mod error;
pub mod game_grid;
pub mod location;
pub mod sprite;

slotmap::new_key_type! {
    /// Handle of an actor in a `GameGrid` scene
    pub struct ActorId;
}

pub use actor::{Actor, Behaviour};
pub use error::GridError;
pub use game_grid::{GameGrid, SimulationState, DEFAULT_SIMULATION_PERIOD, MAX_GRID_SIDE};
pub use location::{CompassDirection, Location};
pub use sprite::{Glyph, Sprite, SpriteCatalog, SpriteStore};
