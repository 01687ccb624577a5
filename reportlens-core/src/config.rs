use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// Default value functions for serde
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["pdf".to_string(), "docx".to_string(), "txt".to_string()]
}

fn default_report_page() -> usize {
    // Report summaries sit on the page after the cover sheet
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Interface the HTTP server binds to
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Default tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Largest accepted upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Lowercase file extensions accepted for upload
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    /// 1-based page that carries the report summary
    #[serde(default = "default_report_page")]
    pub report_page: usize,
    /// Where uploads are staged before extraction (system temp dir if unset)
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            max_upload_bytes: default_max_upload_bytes(),
            allowed_extensions: default_allowed_extensions(),
            report_page: default_report_page(),
            staging_dir: None,
        }
    }
}

impl ServiceConfig {
    /// Load config from file path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServiceConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config with fallback to default
    ///
    /// Without an explicit path, `<config dir>/reportlens/config.yaml` is
    /// used when it exists.
    pub fn load_with_fallback(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_config_path().filter(|p| p.exists()) {
                Some(p) => p,
                None => return Self::default(),
            },
        };

        Self::load_from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to load config, using defaults"
            );
            Self::default()
        })
    }

    /// Per-user config location, e.g. ~/.config/reportlens/config.yaml
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("reportlens").join("config.yaml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.report_page == 0 {
            bail!("report_page is 1-based and must be at least 1");
        }
        if self.max_upload_bytes == 0 {
            bail!("max_upload_bytes must be greater than zero");
        }
        if self.allowed_extensions.is_empty() {
            bail!("allowed_extensions must list at least one extension");
        }
        Ok(())
    }

    /// 0-based index of the report page
    pub fn report_page_index(&self) -> usize {
        self.report_page.saturating_sub(1)
    }

    pub fn is_extension_allowed(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
