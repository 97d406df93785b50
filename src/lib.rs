//! Fringe Pattern Projector
//!
//! Generates the eight phase-shifted sinusoidal fringe patterns used in
//! phase-shifting structured-light metrology and shows them full-screen:
//! - Vertical and horizontal phase maps, aspect-ratio compensated
//! - Four-step phase shifts rendered to 8-bit grayscale
//! - Timed, cancellable display sequencing
//! - PNG export for offline capture pipelines

pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod fringe;
pub mod input;
pub mod render;
pub mod session;

pub use error::{FringeError, Result};
