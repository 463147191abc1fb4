//! `[site]` section configuration.
//!
//! Site-wide metadata injected into page layouts.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Carnet d'essais"
//! description = "Essais de matériel et billets d'humeur"
//! url = "https://example.org"
//! language = "fr"
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Site title (used as `{{ site_title }}` in layouts).
    pub title: String,

    /// Site description (fallback for pages without one).
    pub description: String,

    /// Canonical site URL (no trailing slash).
    pub url: String,

    /// Document language, set on `<html lang>`.
    pub language: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            url: String::new(),
            language: "fr".into(),
        }
    }
}
