use crate::core::ConfigProvider;
use crate::utils::error::{FixError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub job: JobConfig,
    pub scan: ScanConfig,
    pub rewrite: Option<RewriteConfig>,
    pub apply: Option<ApplyConfig>,
    pub monitoring: Option<MonitoringConfig>,
    pub environment: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub root: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string()]
}

fn default_exclude_dirs() -> Vec<String> {
    vec![
        ".git".to_string(),
        "node_modules".to_string(),
        "target".to_string(),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteConfig {
    pub threads: Option<usize>,
    pub skip_absolute_urls: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyConfig {
    pub dry_run: Option<bool>,
    pub backup: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub system_stats: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FixError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FixError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DOCS_ROOT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("job.name", &self.job.name)?;
        validation::validate_path("scan.root", &self.scan.root)?;
        validation::validate_extension_list("scan.extensions", &self.scan.extensions)?;
        validation::validate_range("rewrite.threads", self.threads(), 1, 256)?;
        Ok(())
    }

    pub fn threads(&self) -> usize {
        self.rewrite
            .as_ref()
            .and_then(|r| r.threads)
            .unwrap_or(4)
    }

    pub fn is_dry_run(&self) -> bool {
        self.apply
            .as_ref()
            .and_then(|a| a.dry_run)
            .unwrap_or(false)
    }

    pub fn set_dry_run(&mut self, dry_run: bool) {
        match &mut self.apply {
            Some(apply) => apply.dry_run = Some(dry_run),
            None => {
                self.apply = Some(ApplyConfig {
                    dry_run: Some(dry_run),
                    backup: None,
                });
            }
        }
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn root_dir(&self) -> &str {
        &self.scan.root
    }

    fn dry_run(&self) -> bool {
        self.is_dry_run()
    }

    fn threads(&self) -> usize {
        self.threads()
    }

    fn extensions(&self) -> &[String] {
        &self.scan.extensions
    }

    fn exclude_dirs(&self) -> &[String] {
        &self.scan.exclude_dirs
    }

    fn backup(&self) -> bool {
        self.apply.as_ref().and_then(|a| a.backup).unwrap_or(false)
    }

    fn skip_absolute_urls(&self) -> bool {
        self.rewrite
            .as_ref()
            .and_then(|r| r.skip_absolute_urls)
            .unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
