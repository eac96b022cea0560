/// Oversized working canvas and jittered grid placement
pub mod compositor;
/// End-to-end generation pipeline
pub mod executor;
/// Optional centred cutout on the finished texture
pub mod overlay;
/// Parameter ranges, defaults and validation
pub mod parameters;
/// Seed resolution and per-run base values
pub mod resolver;
/// Global tilt and centre crop
pub mod tilt;
