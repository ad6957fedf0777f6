//! Configuration handling for the field editor

use crate::catalog::DEFAULT_PAGE_SIZE;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured catalog file
pub const CATALOG_ENV: &str = "RESEARCH_OUTPUT_CATALOG";

/// User configuration for the field editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EditorConfig {
    /// JSON catalog of repositories and metadata standards
    pub catalog_path: Option<PathBuf>,
    /// Catalog page size
    pub page_size: Option<usize>,
}

impl EditorConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "research-outputs", "research-output-fields")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: EditorConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded editor config");
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Catalog file to load, preferring the environment override
    pub fn catalog_path(&self) -> Option<PathBuf> {
        Self::resolve_catalog_path(std::env::var_os(CATALOG_ENV).map(PathBuf::from), self)
    }

    fn resolve_catalog_path(env: Option<PathBuf>, config: &Self) -> Option<PathBuf> {
        env.filter(|p| !p.as_os_str().is_empty())
            .or_else(|| config.catalog_path.clone())
    }

    pub fn page_size_or_default(&self) -> usize {
        self.page_size
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }
}
