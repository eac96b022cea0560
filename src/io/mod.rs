/// Sequential batch generation over cutouts and settings
pub mod batch;
/// Command-line interface
pub mod cli;
/// Defaults, limits and output settings
pub mod configuration;
/// Error types
pub mod error;
/// Sprite loading and PNG export with text metadata
pub mod image;
/// Batch progress display
pub mod progress;
/// Reproduction command recording and parsing
pub mod reproduction;
