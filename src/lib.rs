//! gridsnake - Snake variants on a small actor/grid toolkit
//!
//! This library provides:
//! - A bounded grid of actors with a pausable simulation loop (grid module)
//! - Snake rules: classic, nibbles, sneaky and a self-driving demo (game module)
//! - TUI rendering, key bindings and session statistics (render, input, metrics)
//! - The interactive terminal modes (modes module)

pub mod game;
pub mod grid;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
