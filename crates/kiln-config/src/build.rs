//! `build` section: output target and bundler options.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::chunks::ManualChunks;
use crate::defaults::{default_chunk_size_warning_limit, default_out_dir, default_true};
use crate::target::EsTarget;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildOptions {
    /// Minimum language version of the emitted code
    #[serde(default)]
    pub target: EsTarget,

    /// Output directory for generated chunks
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    #[serde(default)]
    pub sourcemap: bool,

    #[serde(default = "default_true")]
    pub minify: bool,

    /// Size (kB) above which the bundler warns about a chunk
    #[serde(default = "default_chunk_size_warning_limit")]
    pub chunk_size_warning_limit: u32,

    /// Options forwarded to the underlying Rollup-compatible bundler
    #[serde(default)]
    pub rollup_options: RollupOptions,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            target: EsTarget::default(),
            out_dir: default_out_dir(),
            sourcemap: false,
            minify: true,
            chunk_size_warning_limit: default_chunk_size_warning_limit(),
            rollup_options: RollupOptions::default(),
        }
    }
}

impl BuildOptions {
    pub fn manual_chunks(&self) -> &ManualChunks {
        &self.rollup_options.output.manual_chunks
    }

    pub fn manual_chunks_mut(&mut self) -> &mut ManualChunks {
        &mut self.rollup_options.output.manual_chunks
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RollupOptions {
    #[serde(default)]
    pub output: OutputOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutputOptions {
    #[serde(default)]
    pub manual_chunks: ManualChunks,
}
