//! Reproduction command embedded in every generated image
//!
//! The command names every parameter with its resolved value, seed included, so
//! running it again regenerates the same file. Flags come first and the cutout and
//! output paths follow a `--` separator, so paths starting with `-` stay positional.
//! Floats are written with their shortest round-trip representation; arguments are
//! quoted with POSIX shell rules.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::generation::parameters::GenerationParameters;
use crate::io::cli::{Cli, Command};
use crate::io::configuration::{GENERATE_SUBCOMMAND, PROGRAM_NAME};
use crate::io::error::{Result, invalid_command};

/// A fully resolved invocation of the generate command
#[derive(Clone, Debug, PartialEq)]
pub struct ReproductionCommand {
    /// Cutout image path
    pub cutout_path: PathBuf,
    /// Output image path
    pub output_path: PathBuf,
    /// Parameters with the seed pinned
    pub parameters: GenerationParameters,
}

impl ReproductionCommand {
    /// Record an invocation, pinning `seed` into the parameters
    pub fn new(
        cutout_path: &Path,
        output_path: &Path,
        parameters: &GenerationParameters,
        seed: u32,
    ) -> Self {
        Self {
            cutout_path: cutout_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            parameters: parameters.with_seed(seed),
        }
    }

    /// Seed recorded in the command
    pub const fn seed(&self) -> Option<u32> {
        self.parameters.seed
    }

    /// Unquoted argument vector, program name first
    pub fn arguments(&self) -> Vec<String> {
        let p = &self.parameters;
        let mut arguments = vec![PROGRAM_NAME.to_string(), GENERATE_SUBCOMMAND.to_string()];

        let mut pair = |flag: &str, min: String, max: String| {
            arguments.extend([format!("--{flag}"), min, max]);
        };
        pair(
            "canvas-size",
            p.canvas_size.0.to_string(),
            p.canvas_size.1.to_string(),
        );
        pair(
            "base-dx-range",
            p.base_dx_range.min.to_string(),
            p.base_dx_range.max.to_string(),
        );
        pair(
            "base-dy-range",
            p.base_dy_range.min.to_string(),
            p.base_dy_range.max.to_string(),
        );
        pair(
            "base-cutout-angle-range",
            p.base_angle_range.min.to_string(),
            p.base_angle_range.max.to_string(),
        );
        pair(
            "base-scale-range",
            p.base_scale_range.min.to_string(),
            p.base_scale_range.max.to_string(),
        );
        pair(
            "position-variation-range",
            p.position_jitter_range.min.to_string(),
            p.position_jitter_range.max.to_string(),
        );
        pair(
            "scale-variation-range",
            p.scale_jitter_range.min.to_string(),
            p.scale_jitter_range.max.to_string(),
        );
        pair(
            "angle-variation-range",
            p.angle_jitter_range.min.to_string(),
            p.angle_jitter_range.max.to_string(),
        );
        pair(
            "grid-tilt-range",
            p.tilt_range.min.to_string(),
            p.tilt_range.max.to_string(),
        );

        if let Some(seed) = p.seed {
            arguments.extend(["--seed".to_string(), seed.to_string()]);
        }
        if p.add_center_cutout {
            arguments.push("--add-center-cutout".to_string());
        }

        arguments.extend([
            "--".to_string(),
            self.cutout_path.to_string_lossy().into_owned(),
            self.output_path.to_string_lossy().into_owned(),
        ]);
        arguments
    }

    /// Shell-quoted command line that re-runs this invocation
    ///
    /// # Errors
    ///
    /// Returns an error if a path contains a character no shell quoting can carry (NUL)
    pub fn to_command_line(&self) -> Result<String> {
        let arguments = self.arguments();
        shlex::try_join(arguments.iter().map(String::as_str))
            .map_err(|e| invalid_command(&arguments.join(" "), &e))
    }

    /// Parse a command line produced by [`ReproductionCommand::to_command_line`]
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The quoting is unbalanced
    /// - The arguments are not a valid generate invocation
    /// - The command does not pin a seed
    pub fn parse(command: &str) -> Result<Self> {
        let arguments = shlex::split(command)
            .ok_or_else(|| invalid_command(&command, &"unbalanced quoting"))?;
        let cli = Cli::try_parse_from(arguments)
            .map_err(|e| invalid_command(&command, &e.to_string().trim_end()))?;

        let Command::Generate(args) = cli.command else {
            return Err(invalid_command(&command, &"not a generate command"));
        };
        let parameters = args.to_parameters()?;
        if parameters.seed.is_none() {
            return Err(invalid_command(&command, &"command does not pin a seed"));
        }

        Ok(Self {
            cutout_path: args.cutout_file,
            output_path: args.output_file,
            parameters,
        })
    }
}
