//! Configuration resolution for CLI commands.
//!
//! The file is found and parsed by `kiln-config`, the requested profile is
//! applied, and scalar overrides are layered on top.
//! Priority: CLI > Environment > File (+ profile) > Defaults

mod loading;
mod overrides;

pub use loading::{load, LoadedConfig};
pub use overrides::{BuildOverrides, DepsOverrides, Overrides, ENV_PREFIX};
