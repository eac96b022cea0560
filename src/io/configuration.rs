//! Generation defaults, limits and output settings

// Default parameter ranges, matching the command-line defaults
/// Default output canvas size (width, height)
pub const DEFAULT_CANVAS_SIZE: (u32, u32) = (1024, 1024);
/// Default horizontal grid step range in pixels
pub const DEFAULT_BASE_DX_RANGE: (i32, i32) = (50, 200);
/// Default vertical grid step range in pixels
pub const DEFAULT_BASE_DY_RANGE: (i32, i32) = (50, 200);
/// Default shared sprite angle range in degrees
pub const DEFAULT_BASE_ANGLE_RANGE: (f64, f64) = (0.0, 360.0);
/// Default shared sprite scale range
pub const DEFAULT_BASE_SCALE_RANGE: (f64, f64) = (0.5, 1.5);
/// Default per-instance position jitter range in pixels
pub const DEFAULT_POSITION_JITTER_RANGE: (i32, i32) = (-20, 20);
/// Default per-instance scale multiplier range
pub const DEFAULT_SCALE_JITTER_RANGE: (f64, f64) = (0.8, 1.2);
/// Default per-instance angle jitter range in degrees
pub const DEFAULT_ANGLE_JITTER_RANGE: (f64, f64) = (-15.0, 15.0);
/// Default global tilt range in degrees
pub const DEFAULT_TILT_RANGE: (f64, f64) = (-180.0, 180.0);

// Safety limit to prevent excessive memory allocation
/// Maximum allowed canvas dimension
pub const MAX_CANVAS_DIMENSION: u32 = 10_000;
/// Maximum side of a cutout after scaling
pub const MAX_SPRITE_DIMENSION: u32 = 10_000;

// Colours used where no sprite pixel lands
/// Flat fill of the oversized working canvas
pub const BACKGROUND_FILL: [u8; 4] = [255, 255, 255, 255];
/// Fill for regions exposed by the global tilt
pub const TILT_FILL: [u8; 4] = [0, 0, 0, 255];
/// Fill for corners exposed by rotating a single sprite
pub const SPRITE_FILL: [u8; 4] = [0, 0, 0, 0];

// Reproduction metadata
/// PNG text chunk key holding the reproduction command
pub const COMMAND_METADATA_KEY: &str = "command";
/// Program name written at the start of every reproduction command
pub const PROGRAM_NAME: &str = "tilestamp";
/// Subcommand that performs a single generation run
pub const GENERATE_SUBCOMMAND: &str = "generate";

// Output files
/// Unix permission bits of written textures
pub const OUTPUT_FILE_MODE: u32 = 0o644;

// Batch output settings
/// Extension of the images picked up and produced by batch runs
pub const IMAGE_EXTENSION: &str = "png";
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
