//! `[collections.*]` section configuration.
//!
//! Each named collection maps a source directory of markdown files to a URL
//! route. Reference tags (`{% test ... %}`, `{% post ... %}`) are registered
//! from these names, one tag per collection.
//!
//! # Example
//!
//! ```toml
//! [collections.test]
//! dir = "tests"       # Source directory (relative to site root)
//! route = "tests"     # URL prefix: entries live at /tests/<slug>/
//!
//! [collections.post]
//! dir = "posts"
//! route = "posts"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One named content collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Source directory, relative to the site root.
    pub dir: PathBuf,

    /// URL route prefix. Defaults to the directory name when omitted.
    pub route: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::new(),
            route: String::new(),
        }
    }
}

impl CollectionConfig {
    /// URL for an entry of this collection.
    pub fn entry_url(&self, slug: &str) -> String {
        if self.route.is_empty() {
            format!("/{slug}/")
        } else {
            format!("/{}/{}/", self.route.trim_matches('/'), slug)
        }
    }

    /// Fill in the route from the directory name when the config omits it.
    pub fn normalize(&mut self) {
        if self.route.is_empty() {
            if let Some(name) = self.dir.file_name().and_then(|n| n.to_str()) {
                self.route = name.to_string();
            }
        }
    }
}

/// The default collections of a plume site: reviews and articles.
pub fn default_collections() -> BTreeMap<String, CollectionConfig> {
    let mut collections = BTreeMap::new();
    collections.insert(
        "test".to_string(),
        CollectionConfig {
            dir: "tests".into(),
            route: "tests".into(),
        },
    );
    collections.insert(
        "post".to_string(),
        CollectionConfig {
            dir: "posts".into(),
            route: "posts".into(),
        },
    );
    collections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_url() {
        let config = CollectionConfig {
            dir: "tests".into(),
            route: "tests".into(),
        };
        assert_eq!(config.entry_url("slug-a"), "/tests/slug-a/");
    }

    #[test]
    fn test_entry_url_empty_route() {
        let config = CollectionConfig::default();
        assert_eq!(config.entry_url("apropos"), "/apropos/");
    }

    #[test]
    fn test_normalize_fills_route_from_dir() {
        let mut config = CollectionConfig {
            dir: "essais".into(),
            route: String::new(),
        };
        config.normalize();
        assert_eq!(config.route, "essais");
    }

    #[test]
    fn test_default_collections() {
        let collections = default_collections();
        assert_eq!(collections.len(), 2);
        assert!(collections.contains_key("test"));
        assert!(collections.contains_key("post"));
    }
}
