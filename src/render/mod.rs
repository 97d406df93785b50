//! GPU rendering module for full-screen pattern display.

mod fringe;
mod pipeline;

pub use fringe::{check_texture_size, FringeRenderer};
pub use pipeline::RenderPipeline;
