//! kitforge library
//!
//! Core functionality for the kitforge build & release pipeline.

pub mod bundle;
pub mod cli;
pub mod config;
pub mod registry;
pub mod release;
pub mod stylelink;

pub use bundle::{Bundle, BundleEntry, OutputFormat};
pub use cli::Cli;
pub use config::Config;
pub use stylelink::StyleLink;
