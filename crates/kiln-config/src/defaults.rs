use std::path::{Path, PathBuf};

pub(crate) const DEFAULT_CHUNK_SIZE_WARNING_LIMIT: u32 = 500;

pub(crate) fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_chunk_size_warning_limit() -> u32 {
    DEFAULT_CHUNK_SIZE_WARNING_LIMIT
}

pub(crate) fn is_default_out_dir(dir: &Path) -> bool {
    dir == Path::new("dist")
}
