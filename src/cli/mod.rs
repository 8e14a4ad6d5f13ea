//! CLI commands for gmi

pub mod context;
pub mod merge;
pub mod style;

pub use context::CommandContext;
pub use merge::{MergeOptions, run_merge};
