//! Site configuration management for `plume.toml`.
//!
//! # Sections
//!
//! | Section           | Purpose                                      |
//! |-------------------|----------------------------------------------|
//! | `[site]`          | Site metadata (title, description, url)      |
//! | `[build]`         | Output paths, stylesheet, minify, assets     |
//! | `[collections.*]` | Content collections (dir, route)             |

mod build;
mod collections;
mod error;
mod site;

pub use build::{AssetsConfig, BuildSection};
pub use collections::{CollectionConfig, default_collections};
pub use error::ConfigError;
pub use site::SiteSection;

use crate::cli::Cli;
use crate::log;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing plume.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// CLI arguments reference (internal use only)
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site metadata
    #[serde(default)]
    pub site: SiteSection,

    /// Build settings
    #[serde(default)]
    pub build: BuildSection,

    /// Content collections, keyed by tag name
    #[serde(default = "default_collections")]
    pub collections: BTreeMap<String, CollectionConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            cli: None,
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            site: SiteSection::default(),
            build: BuildSection::default(),
            collections: default_collections(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// The project root is determined by the config file's parent directory.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let config_path = if cli.config.is_absolute() {
            cli.config.clone()
        } else {
            std::env::current_dir()?.join(&cli.config)
        };

        if !config_path.exists() {
            log!(
                "error";
                "Config file '{}' not found.",
                cli.config.display()
            );
            std::process::exit(1);
        }

        let raw = fs::read_to_string(&config_path)
            .map_err(|e| ConfigError::Io(config_path.clone(), e))?;
        let mut config: SiteConfig = toml::from_str(&raw).map_err(ConfigError::Toml)?;

        config.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.config_path = config_path;
        config.cli = Some(cli);

        for collection in config.collections.values_mut() {
            collection.normalize();
        }

        config.apply_cli_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI flags and the NO_MINIFY environment variable.
    ///
    /// NO_MINIFY always disables pipeline stage 5, even over `--minify`.
    fn apply_cli_overrides(&mut self) {
        if let Some(cli) = self.cli {
            let args = cli.build_args();
            self.build.clean = args.clean;
            self.build.skip_drafts = args.skip_drafts;
            if let Some(minify) = args.minify {
                self.build.minify = minify;
            }
        }
        if std::env::var_os("NO_MINIFY").is_some() {
            self.build.minify = false;
        }
    }

    /// Validate configuration before building.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.collections.is_empty() {
            return Err(ConfigError::Validation(
                "no collections configured".to_string(),
            ));
        }

        let stylesheet = self.stylesheet_path();
        if !stylesheet.exists() {
            return Err(ConfigError::Validation(format!(
                "stylesheet `{}` not found",
                self.build.stylesheet.display()
            )));
        }

        for (name, collection) in &self.collections {
            if !self.root_join(&collection.dir).is_dir() {
                log!(
                    "warning";
                    "collection `{}` directory '{}' not found, skipping",
                    name,
                    collection.dir.display()
                );
            }
        }

        Ok(())
    }

    /// Join a path to the project root.
    pub fn root_join(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Absolute output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.build.output)
    }

    /// Absolute templates directory.
    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(&self.build.templates)
    }

    /// Absolute path of the site stylesheet.
    pub fn stylesheet_path(&self) -> PathBuf {
        self.root.join(&self.build.stylesheet)
    }
}

// ============================================================================
// Tests
// ============================================================================
