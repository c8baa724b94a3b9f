//! Kiln CLI - typed build configuration for front-end bundlers.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions
//! - [`commands`] - `check`, `init`, `show` and `emit`
//! - [`config`] - Config resolution: discovery, profiles, env and flag overrides
//! - [`error`] - Error types and miette conversion
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Status messages

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
