pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "mdlink-fix")]
#[command(about = "Rewrite relative Markdown link targets to lowercase, hyphenated form")]
pub struct CliConfig {
    /// Directory to scan for Markdown files
    #[arg(default_value = ".")]
    pub root_dir: String,

    #[arg(long, help = "Print a diff of would-be changes without writing anything")]
    pub dry_run: bool,

    #[arg(long, default_value = "4", help = "Number of files rewritten concurrently")]
    pub threads: usize,

    #[arg(long, value_delimiter = ',', default_value = "md")]
    pub extensions: Vec<String>,

    #[arg(long, value_delimiter = ',', default_value = ".git,node_modules,target")]
    pub exclude_dirs: Vec<String>,

    #[arg(long, help = "Write <file>.bak with the original contents before rewriting")]
    pub backup: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn root_dir(&self) -> &str {
        &self.root_dir
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }

    fn threads(&self) -> usize {
        self.threads
    }

    fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn exclude_dirs(&self) -> &[String] {
        &self.exclude_dirs
    }

    fn backup(&self) -> bool {
        self.backup
    }

    fn skip_absolute_urls(&self) -> bool {
        // CLI 只處理相對連結，絕對 URL 一律跳過
        true
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("root_dir", &self.root_dir)?;
        validation::validate_range("threads", self.threads, 1, 256)?;
        validation::validate_extension_list("extensions", &self.extensions)?;
        Ok(())
    }
}
