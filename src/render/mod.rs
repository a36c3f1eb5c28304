pub mod renderer;

pub use renderer::{paint_cells, Renderer};
