pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{engine::FixEngine, pipeline::LinkFixPipeline};
pub use utils::error::{FixError, Result};
