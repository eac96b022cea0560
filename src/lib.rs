//! Seeded texture synthesis by stamping a transparent cutout onto a jittered grid
//!
//! A run draws base spacing, angle and scale, stamps transformed copies of the cutout
//! over an oversized canvas, tilts the whole grid, crops the centre back to the
//! requested size and embeds the command that reproduces the image exactly.

#![forbid(unsafe_code)]

/// Generation pipeline: parameters, compositing, tilt and overlay
pub mod generation;
/// Input/output operations, command line and error handling
pub mod io;
/// Resampling utilities for rotation
pub mod math;

pub use generation::executor::{GenerationReport, TextureGenerator, generate};
pub use generation::parameters::{GenerationParameters, ValueRange};
pub use io::error::{Result, TilestampError};
