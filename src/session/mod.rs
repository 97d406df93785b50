//! Timed display sequencing.

mod clock;
mod controller;
mod interval;

pub use clock::FrameClock;
pub use controller::{ControllerState, DisplayState, Presenter, SequenceController, StopReason};
pub use interval::Interval;
