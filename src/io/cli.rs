//! Command-line interface for single runs, batch runs and metadata inspection

use crate::generation::executor::{GenerationReport, generate};
use crate::generation::parameters::{GenerationParameters, ValueRange};
use crate::io::batch::{BatchProcessor, BatchSummary};
use crate::io::configuration::{
    DEFAULT_ANGLE_JITTER_RANGE, DEFAULT_BASE_ANGLE_RANGE, DEFAULT_BASE_DX_RANGE,
    DEFAULT_BASE_DY_RANGE, DEFAULT_BASE_SCALE_RANGE, DEFAULT_CANVAS_SIZE,
    DEFAULT_POSITION_JITTER_RANGE, DEFAULT_SCALE_JITTER_RANGE, DEFAULT_TILT_RANGE,
};
use crate::io::error::{Result, TilestampError, invalid_parameter};
use crate::io::image::read_text_metadata;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "tilestamp")]
#[command(
    author,
    version,
    about = "Generate tileable textures by stamping a cutout on a jittered, tilted grid"
)]
/// Command-line arguments for the texture generation tool
pub struct Cli {
    /// Only report warnings and errors, and hide progress bars
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report per-stage details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Operations offered by the command-line tool
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate one texture from a cutout image
    Generate(GenerateArgs),
    /// Generate textures for every PNG in a directory under several settings
    Batch(BatchArgs),
    /// Print the textual metadata stored in an image
    Metadata(MetadataArgs),
}

/// Arguments of a single generation run
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Cutout image with transparency to stamp
    #[arg(value_name = "CUTOUT")]
    pub cutout_file: PathBuf,

    /// Output PNG path
    #[arg(value_name = "OUTPUT")]
    pub output_file: PathBuf,

    /// Canvas size (width height)
    #[arg(long, num_args = 2, action = ArgAction::Set, value_names = ["WIDTH", "HEIGHT"],
        default_values_t = [DEFAULT_CANVAS_SIZE.0, DEFAULT_CANVAS_SIZE.1])]
    pub canvas_size: Vec<u32>,

    /// Horizontal grid step range (min max)
    #[arg(long, num_args = 2, action = ArgAction::Set, value_names = ["MIN", "MAX"],
        allow_negative_numbers = true,
        default_values_t = [DEFAULT_BASE_DX_RANGE.0, DEFAULT_BASE_DX_RANGE.1])]
    pub base_dx_range: Vec<i32>,

    /// Vertical grid step range (min max)
    #[arg(long, num_args = 2, action = ArgAction::Set, value_names = ["MIN", "MAX"],
        allow_negative_numbers = true,
        default_values_t = [DEFAULT_BASE_DY_RANGE.0, DEFAULT_BASE_DY_RANGE.1])]
    pub base_dy_range: Vec<i32>,

    /// Shared cutout angle range in degrees (min max)
    #[arg(long, num_args = 2, action = ArgAction::Set, value_names = ["MIN", "MAX"],
        allow_negative_numbers = true,
        default_values_t = [DEFAULT_BASE_ANGLE_RANGE.0, DEFAULT_BASE_ANGLE_RANGE.1])]
    pub base_cutout_angle_range: Vec<f64>,

    /// Shared cutout scale range (min max)
    #[arg(long, num_args = 2, action = ArgAction::Set, value_names = ["MIN", "MAX"],
        allow_negative_numbers = true,
        default_values_t = [DEFAULT_BASE_SCALE_RANGE.0, DEFAULT_BASE_SCALE_RANGE.1])]
    pub base_scale_range: Vec<f64>,

    /// Per-instance position variation in pixels (min max)
    #[arg(long, num_args = 2, action = ArgAction::Set, value_names = ["MIN", "MAX"],
        allow_negative_numbers = true,
        default_values_t = [DEFAULT_POSITION_JITTER_RANGE.0, DEFAULT_POSITION_JITTER_RANGE.1])]
    pub position_variation_range: Vec<i32>,

    /// Per-instance scale multiplier (min max)
    #[arg(long, num_args = 2, action = ArgAction::Set, value_names = ["MIN", "MAX"],
        allow_negative_numbers = true,
        default_values_t = [DEFAULT_SCALE_JITTER_RANGE.0, DEFAULT_SCALE_JITTER_RANGE.1])]
    pub scale_variation_range: Vec<f64>,

    /// Per-instance angle variation in degrees (min max)
    #[arg(long, num_args = 2, action = ArgAction::Set, value_names = ["MIN", "MAX"],
        allow_negative_numbers = true,
        default_values_t = [DEFAULT_ANGLE_JITTER_RANGE.0, DEFAULT_ANGLE_JITTER_RANGE.1])]
    pub angle_variation_range: Vec<f64>,

    /// Tilt of the whole grid in degrees (min max)
    #[arg(long, num_args = 2, action = ArgAction::Set, value_names = ["MIN", "MAX"],
        allow_negative_numbers = true,
        default_values_t = [DEFAULT_TILT_RANGE.0, DEFAULT_TILT_RANGE.1])]
    pub grid_tilt_range: Vec<f64>,

    /// Random seed (generated when omitted)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Add an unrotated cutout at the centre of the image at the end
    #[arg(long)]
    pub add_center_cutout: bool,
}

impl GenerateArgs {
    /// Convert the parsed flags into a generation parameter set
    ///
    /// # Errors
    ///
    /// Returns an error if a pair flag does not hold exactly two values
    pub fn to_parameters(&self) -> Result<GenerationParameters> {
        let canvas = pair("canvas_size", &self.canvas_size)?;
        Ok(GenerationParameters {
            canvas_size: (canvas.min, canvas.max),
            base_dx_range: pair("base_dx_range", &self.base_dx_range)?,
            base_dy_range: pair("base_dy_range", &self.base_dy_range)?,
            base_angle_range: pair("base_cutout_angle_range", &self.base_cutout_angle_range)?,
            base_scale_range: pair("base_scale_range", &self.base_scale_range)?,
            position_jitter_range: pair(
                "position_variation_range",
                &self.position_variation_range,
            )?,
            scale_jitter_range: pair("scale_variation_range", &self.scale_variation_range)?,
            angle_jitter_range: pair("angle_variation_range", &self.angle_variation_range)?,
            tilt_range: pair("grid_tilt_range", &self.grid_tilt_range)?,
            seed: self.seed,
            add_center_cutout: self.add_center_cutout,
        })
    }

    /// Run one generation with these arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, the cutout cannot be loaded
    /// or the output cannot be written
    pub fn run(&self) -> Result<GenerationReport> {
        let parameters = self.to_parameters()?;
        generate(&self.cutout_file, &self.output_file, &parameters)
    }
}

fn pair<T: Copy + std::fmt::Debug>(
    parameter: &'static str,
    values: &[T],
) -> Result<ValueRange<T>> {
    match values {
        [min, max] => Ok(ValueRange::new(*min, *max)),
        _ => Err(invalid_parameter(
            parameter,
            &format!("{values:?}"),
            &"expected exactly two values",
        )),
    }
}

/// Arguments of a batch run
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Directory containing cutout PNG images
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory to save generated textures
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// JSON objects of settings keyed by long flag name, one run per object
    #[arg(value_name = "SETTINGS", required = true, num_args = 1..)]
    pub settings: Vec<String>,
}

/// Arguments of a metadata inspection
#[derive(Args, Debug, Clone)]
pub struct MetadataArgs {
    /// Path to the image file
    #[arg(value_name = "IMAGE")]
    pub image_path: PathBuf,
}

impl Cli {
    /// Most verbose log level to emit
    pub const fn log_level(&self) -> Level {
        if self.quiet {
            Level::WARN
        } else if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails; batch runs only fail on setup errors
    pub fn execute(self) -> Result<()> {
        let show_progress = self.should_show_progress();
        match self.command {
            Command::Generate(args) => args.run().map(|_| ()),
            Command::Batch(args) => {
                let processor = BatchProcessor::from_args(&args, show_progress)?;
                let BatchSummary { succeeded, failed } = processor.process()?;
                tracing::info!(succeeded, failed, "batch finished");
                Ok(())
            }
            Command::Metadata(args) => {
                let stdout = std::io::stdout();
                write_metadata_report(&args.image_path, &mut stdout.lock())
            }
        }
    }
}

/// Write every textual metadata entry of `image_path` as `key: value` lines
///
/// # Errors
///
/// Returns an error if the image cannot be read or the report cannot be written
pub fn write_metadata_report(image_path: &Path, out: &mut impl Write) -> Result<()> {
    let entries = read_text_metadata(image_path)?;
    let write_error = |source| TilestampError::FileSystem {
        path: image_path.to_path_buf(),
        operation: "write metadata report",
        source,
    };

    writeln!(out, "Image metadata for '{}':", image_path.display()).map_err(write_error)?;
    if entries.is_empty() {
        writeln!(out, "No metadata found.").map_err(write_error)?;
    }
    for (key, value) in &entries {
        writeln!(out, "{key}: {value}").map_err(write_error)?;
    }
    Ok(())
}
