//! JSON configuration of the command-line tools.

pub mod fence_demo;

pub use fence_demo::{load_config, OutputConfig, RuntimeConfig};
