#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use crate::core::{composer::ConfigComposer, render::OutputFormat};
pub use domain::{env::EnvSnapshot, model::ToolchainConfig, ports::EnvSource};
pub use utils::error::{ConfigError, Result};
