pub mod build;
pub mod chunks;
pub mod config;
mod defaults;
pub mod deps;
pub mod discovery;
pub mod emit;
pub mod error;
pub mod specifier;
pub mod target;
pub mod validation;

// Re-export main types
pub use build::{BuildOptions, OutputOptions, RollupOptions};
pub use chunks::{ChunkConflict, ManualChunks};
pub use config::{KilnConfig, ProfileConfig};
pub use deps::OptimizeDeps;
pub use error::*;
pub use specifier::{ModuleSpecifier, SpecifierKind};
pub use target::EsTarget;

// Re-export discovery, validation and emission
pub use discovery::{discover, discover_with_profile, ConfigDiscovery};
pub use emit::{emit_js, emit_json};
pub use validation::{
    report, validate_fs, validate_schema, ConfigValidator, FsValidator, SchemaValidator,
    ValidationReport, ValidationWarning,
};
