//! Sinusoidal fringe pattern generation for phase-shifting profilometry.

mod intensity;
mod phase;
mod sequence;

pub use intensity::{intensity, render_fringe_image, FringeImage, AMPLITUDE, BACKGROUND};
pub use phase::{generate_phase_map, horizontal_range, Orientation, PhaseMap, Shape};
pub use sequence::{
    build_sequence, Sequence, SequenceFrame, ORIENTATIONS, PHASE_SHIFTS, SEQUENCE_LEN,
};
