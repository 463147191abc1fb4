//! `[build]` section configuration.
//!
//! Contains build settings including paths, minification, and passthrough
//! assets.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "_site"            # Output directory for generated HTML
//! templates = "templates"     # Layout directory
//! stylesheet = "templates/theme.css"  # Site stylesheet, inlined per page
//! minify = true               # Minify HTML output (NO_MINIFY env disables)
//!
//! [build.assets]
//! nested = ["fonts", "img"]   # Directories copied under their own name
//! flatten = ["CNAME"]         # Files copied to the output root
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    /// Build output directory.
    pub output: PathBuf,

    /// Layout templates directory.
    pub templates: PathBuf,

    /// Site stylesheet, read once per build and inlined per page.
    pub stylesheet: PathBuf,

    /// Minify HTML output (pipeline stage 5).
    pub minify: bool,

    /// Passthrough assets configuration.
    pub assets: AssetsConfig,

    /// Clean output directory before building (CLI only).
    #[serde(skip)]
    pub clean: bool,

    /// Skip draft pages during build (CLI only).
    #[serde(skip)]
    pub skip_drafts: bool,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            output: "_site".into(),
            templates: "templates".into(),
            stylesheet: "templates/theme.css".into(),
            minify: true,
            assets: AssetsConfig::default(),
            clean: false,
            skip_drafts: false,
        }
    }
}

/// Passthrough assets: copied to the output tree unmodified, except for
/// `.js`/`.css` files which are minified on the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directories copied recursively under their own name.
    pub nested: Vec<PathBuf>,

    /// Single files copied to the output root (CNAME and friends).
    pub flatten: Vec<PathBuf>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            nested: vec!["fonts".into(), "img".into()],
            flatten: vec!["CNAME".into()],
        }
    }
}
