//! Command implementations for the Kiln CLI.
//!
//! - [`check`] - Configuration validation
//! - [`init`] - Starter configuration
//! - [`show`] - Resolved configuration
//! - [`emit`] - Bundler-facing output

pub mod check;
pub mod emit;
pub mod init;
pub mod show;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use emit::execute as emit_execute;
pub use init::execute as init_execute;
pub use show::execute as show_execute;
