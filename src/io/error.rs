//! Error types for parameter validation, sprite loading and output encoding

use std::fmt;
use std::path::PathBuf;

/// Main error type for all texture generation operations
#[derive(Debug)]
pub enum TilestampError {
    /// Generation parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Cutout file does not exist
    MissingInput {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Cutout file exists but could not be decoded as an image
    Decode {
        /// Path to the image file
        path: PathBuf,
        /// Underlying decoding error
        source: image::ImageError,
    },

    /// Failed to encode the generated texture as PNG
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying encoder error
        source: png::EncodingError,
    },

    /// Failed to read textual metadata from a PNG file
    MetadataRead {
        /// Path to the inspected file
        path: PathBuf,
        /// Underlying decoder error
        source: png::DecodingError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Reproduction command or batch settings could not be interpreted
    InvalidCommand {
        /// The offending command or settings text
        command: String,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for TilestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MissingInput { path } => {
                write!(f, "Cutout file '{}' does not exist", path.display())
            }
            Self::Decode { path, source } => {
                write!(f, "Failed to decode image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::MetadataRead { path, source } => {
                write!(
                    f,
                    "Failed to read metadata from '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidCommand { command, reason } => {
                write!(f, "Invalid command '{command}': {reason}")
            }
        }
    }
}

impl std::error::Error for TilestampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::MetadataRead { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::InvalidParameter { .. }
            | Self::MissingInput { .. }
            | Self::InvalidCommand { .. } => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, TilestampError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TilestampError {
    TilestampError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid command error
pub fn invalid_command(command: &impl ToString, reason: &impl ToString) -> TilestampError {
    TilestampError::InvalidCommand {
        command: command.to_string(),
        reason: reason.to_string(),
    }
}
