//! Sequential batch generation over a directory of cutouts and a list of settings

use crate::generation::executor::TextureGenerator;
use crate::generation::parameters::{GenerationParameters, ValueRange};
use crate::io::cli::BatchArgs;
use crate::io::configuration::IMAGE_EXTENSION;
use crate::io::error::{Result, TilestampError, invalid_command};
use crate::io::progress::ProgressManager;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One settings object of a batch run, keyed by the long flag names
///
/// Keys left out keep the default value.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BatchSettings {
    /// Canvas size (width, height)
    pub canvas_size: Option<(u32, u32)>,
    /// Horizontal grid step range
    pub base_dx_range: Option<(i32, i32)>,
    /// Vertical grid step range
    pub base_dy_range: Option<(i32, i32)>,
    /// Shared cutout angle range
    pub base_cutout_angle_range: Option<(f64, f64)>,
    /// Shared cutout scale range
    pub base_scale_range: Option<(f64, f64)>,
    /// Per-instance position variation
    pub position_variation_range: Option<(i32, i32)>,
    /// Per-instance scale multiplier
    pub scale_variation_range: Option<(f64, f64)>,
    /// Per-instance angle variation
    pub angle_variation_range: Option<(f64, f64)>,
    /// Grid tilt range
    pub grid_tilt_range: Option<(f64, f64)>,
    /// Fixed seed
    pub seed: Option<u32>,
    /// Add the centred cutout
    pub add_center_cutout: Option<bool>,
}

impl BatchSettings {
    /// Parse one JSON settings object
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object of known keys with well-typed values
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| invalid_command(&json, &e))
    }

    /// Overlay these settings on `defaults`
    pub fn apply(&self, defaults: &GenerationParameters) -> GenerationParameters {
        let range = |value: Option<(i32, i32)>, fallback: ValueRange<i32>| {
            value.map_or(fallback, ValueRange::from)
        };
        let float_range = |value: Option<(f64, f64)>, fallback: ValueRange<f64>| {
            value.map_or(fallback, ValueRange::from)
        };

        GenerationParameters {
            canvas_size: self.canvas_size.unwrap_or(defaults.canvas_size),
            base_dx_range: range(self.base_dx_range, defaults.base_dx_range),
            base_dy_range: range(self.base_dy_range, defaults.base_dy_range),
            base_angle_range: float_range(self.base_cutout_angle_range, defaults.base_angle_range),
            base_scale_range: float_range(self.base_scale_range, defaults.base_scale_range),
            position_jitter_range: range(
                self.position_variation_range,
                defaults.position_jitter_range,
            ),
            scale_jitter_range: float_range(
                self.scale_variation_range,
                defaults.scale_jitter_range,
            ),
            angle_jitter_range: float_range(
                self.angle_variation_range,
                defaults.angle_jitter_range,
            ),
            tilt_range: float_range(self.grid_tilt_range, defaults.tilt_range),
            seed: self.seed.or(defaults.seed),
            add_center_cutout: self.add_center_cutout.unwrap_or(defaults.add_center_cutout),
        }
    }
}

/// Counts of a finished batch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Generations that wrote an output file
    pub succeeded: usize,
    /// Generations that failed and were skipped
    pub failed: usize,
}

/// Runs every cutout in a directory under every settings object, one after another
pub struct BatchProcessor {
    input_dir: PathBuf,
    output_dir: PathBuf,
    settings: Vec<GenerationParameters>,
    show_progress: bool,
}

impl BatchProcessor {
    /// Create a processor from already resolved parameter sets
    pub const fn new(
        input_dir: PathBuf,
        output_dir: PathBuf,
        settings: Vec<GenerationParameters>,
        show_progress: bool,
    ) -> Self {
        Self {
            input_dir,
            output_dir,
            settings,
            show_progress,
        }
    }

    /// Parse every settings object up front and create a processor
    ///
    /// # Errors
    ///
    /// Returns an error if any settings object cannot be parsed
    pub fn from_args(args: &BatchArgs, show_progress: bool) -> Result<Self> {
        let defaults = GenerationParameters::default();
        let settings = args
            .settings
            .iter()
            .map(|json| BatchSettings::parse(json).map(|s| s.apply(&defaults)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(
            args.input_dir.clone(),
            args.output_dir.clone(),
            settings,
            show_progress,
        ))
    }

    /// Output path for `input` under the settings at `index`: `<stem>_<index:02>.png`
    pub fn output_path(output_dir: &Path, input: &Path, index: usize) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        output_dir.join(format!("{stem}_{index:02}.{IMAGE_EXTENSION}"))
    }

    /// PNG files of the input directory, sorted by path
    ///
    /// # Errors
    ///
    /// Returns an error if the input directory cannot be read
    pub fn collect_inputs(&self) -> Result<Vec<PathBuf>> {
        let read_error = |source| TilestampError::FileSystem {
            path: self.input_dir.clone(),
            operation: "read input directory",
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.input_dir).map_err(read_error)? {
            let path = entry.map_err(read_error)?.path();
            let is_png = path
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(IMAGE_EXTENSION));
            if is_png && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Generate every (cutout, settings) pair
    ///
    /// A failing pair is logged and counted; the batch carries on with the next one.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created or the input
    /// directory cannot be read
    pub fn process(&self) -> Result<BatchSummary> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| TilestampError::FileSystem {
            path: self.output_dir.clone(),
            operation: "create directory",
            source: e,
        })?;

        let inputs = self.collect_inputs()?;
        let progress = self
            .show_progress
            .then(|| ProgressManager::new(inputs.len() * self.settings.len()));

        let mut summary = BatchSummary::default();
        for input in &inputs {
            let generator = match TextureGenerator::from_path(input) {
                Ok(generator) => generator,
                Err(error) => {
                    warn!(input = %input.display(), %error, "skipping cutout");
                    summary.failed += self.settings.len();
                    if let Some(pm) = &progress {
                        for _ in &self.settings {
                            pm.complete_item();
                        }
                    }
                    continue;
                }
            };

            for (index, parameters) in self.settings.iter().enumerate() {
                let output_path = Self::output_path(&self.output_dir, input, index);
                if let Some(pm) = &progress {
                    pm.start_item(&output_path);
                }

                match generator.render(&output_path, parameters) {
                    Ok(_) => summary.succeeded += 1,
                    Err(error) => {
                        warn!(output = %output_path.display(), %error, "generation failed");
                        summary.failed += 1;
                    }
                }

                if let Some(pm) = &progress {
                    pm.complete_item();
                }
            }
        }

        if let Some(pm) = &progress {
            pm.finish();
        }
        Ok(summary)
    }
}
