//! End-to-end texture generation: resolve, compose, tilt, overlay, record

use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::info;

use crate::generation::compositor::{check_scaled_extent, compose_grid};
use crate::generation::overlay::stamp_center;
use crate::generation::parameters::GenerationParameters;
use crate::generation::resolver::{ResolvedBase, ResolvedRunState, resolve_seed, run_rng};
use crate::generation::tilt::tilt_and_crop;
use crate::io::configuration::COMMAND_METADATA_KEY;
use crate::io::error::Result;
use crate::io::image::{encode_png_with_text, load_sprite, write_output};
use crate::io::reproduction::ReproductionCommand;

/// Outcome of a successful generation that wrote a file
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationReport {
    /// Random values the run resolved
    pub state: ResolvedRunState,
    /// Reproduction command embedded in the output
    pub command: String,
}

/// Texture generator bound to one loaded cutout sprite
///
/// The sprite is read-only for the generator's lifetime, so one generator can
/// serve any number of runs with different parameters.
#[derive(Clone, Debug)]
pub struct TextureGenerator {
    sprite: RgbaImage,
    cutout_path: PathBuf,
}

impl TextureGenerator {
    /// Load the cutout sprite from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be decoded
    pub fn from_path(cutout_path: &Path) -> Result<Self> {
        let sprite = load_sprite(cutout_path)?;
        Ok(Self::from_sprite(sprite, cutout_path))
    }

    /// Wrap an already decoded sprite; `cutout_path` is only recorded in reproduction commands
    pub fn from_sprite(sprite: RgbaImage, cutout_path: &Path) -> Self {
        Self {
            sprite,
            cutout_path: cutout_path.to_path_buf(),
        }
    }

    /// The cutout sprite
    pub const fn sprite(&self) -> &RgbaImage {
        &self.sprite
    }

    /// Compose a texture in memory
    ///
    /// Every random draw comes from one stream seeded with the resolved seed, in the
    /// order: base values, per-cell transforms in grid order, global tilt.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters fail validation or would scale the sprite
    /// past the sprite size limit
    pub fn compose(
        &self,
        parameters: &GenerationParameters,
    ) -> Result<(RgbaImage, ResolvedRunState)> {
        parameters.validate()?;
        check_scaled_extent(self.sprite.dimensions(), parameters)?;

        let seed = resolve_seed(parameters.seed);
        let mut rng = run_rng(seed);

        let base = ResolvedBase::draw(parameters, &mut rng);
        let canvas = compose_grid(&self.sprite, parameters, &base, &mut rng);
        let (mut output, global_tilt) = tilt_and_crop(canvas, parameters, &mut rng);

        if parameters.add_center_cutout {
            stamp_center(&mut output, &self.sprite, base.base_scale);
        }

        Ok((
            output,
            ResolvedRunState {
                seed,
                base,
                global_tilt,
            },
        ))
    }

    /// Compose a texture and write it as PNG with its reproduction command embedded
    ///
    /// Nothing is written unless composing and encoding succeed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parameters fail validation
    /// - A path cannot be recorded in the reproduction command
    /// - PNG encoding fails
    /// - The output directory or file cannot be written
    pub fn render(
        &self,
        output_path: &Path,
        parameters: &GenerationParameters,
    ) -> Result<GenerationReport> {
        parameters.validate()?;
        let seed = resolve_seed(parameters.seed);
        let pinned = parameters.with_seed(seed);

        let (output, state) = self.compose(&pinned)?;
        let command = ReproductionCommand::new(&self.cutout_path, output_path, &pinned, seed)
            .to_command_line()?;

        let bytes = encode_png_with_text(&output, COMMAND_METADATA_KEY, &command, output_path)?;
        write_output(output_path, &bytes)?;

        info!(seed, output = %output_path.display(), "generated texture");
        Ok(GenerationReport { state, command })
    }
}

/// Generate one texture from `cutout_path` into `output_path`
///
/// # Errors
///
/// Returns an error if:
/// - The parameters fail validation
/// - The cutout file is missing or cannot be decoded
/// - The output cannot be encoded or written
pub fn generate(
    cutout_path: &Path,
    output_path: &Path,
    parameters: &GenerationParameters,
) -> Result<GenerationReport> {
    parameters.validate()?;
    TextureGenerator::from_path(cutout_path)?.render(output_path, parameters)
}
