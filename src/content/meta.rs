//! Page metadata from markdown frontmatter.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::JsonMap;

/// Marker splitting the page summary from the rest of the body.
pub const EXCERPT_SEPARATOR: &str = "<!-- excerpt -->";

/// Page metadata from YAML-like (`---`) or TOML (`+++`) frontmatter
///
/// # Standard Fields
///
/// | Field         | Type          | Description                    |
/// |---------------|---------------|--------------------------------|
/// | `title`       | `String`      | Page title                     |
/// | `date`        | `String`      | Publication date               |
/// | `description` | `String`      | Meta description               |
/// | `draft`       | `bool`        | Draft status (default: false)  |
/// | `summary`     | `String`      | Short summary (or excerpt)     |
///
/// # Custom Fields (`extra`)
///
/// Any additional fields are captured in `extra` as raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub draft: bool,
    /// Summary text. Filled from the excerpt separator when absent.
    pub summary: Option<String>,
    /// Additional user-defined fields (raw JSON).
    #[serde(flatten, default)]
    pub extra: JsonMap,
}

impl PageMeta {
    /// Fill `summary` from the text before the excerpt separator, if any.
    pub fn apply_excerpt(&mut self, body: &str) {
        if self.summary.is_some() {
            return;
        }
        if let Some(idx) = body.find(EXCERPT_SEPARATOR) {
            let excerpt = body[..idx].trim();
            if !excerpt.is_empty() {
                self.summary = Some(excerpt.to_string());
            }
        }
    }
}

/// Metadata extractor from YAML (`---`) or TOML (`+++`) frontmatter
pub struct MetaExtractor;

impl MetaExtractor {
    /// Extract frontmatter and return (metadata, body).
    pub fn extract_frontmatter<'a>(&self, content: &'a str) -> Result<Option<(PageMeta, &'a str)>> {
        match Self::detect_frontmatter(content) {
            Some((fm, body, is_toml)) => {
                let meta = if is_toml {
                    Self::parse_toml(fm)?
                } else {
                    Self::parse_yaml_like(fm)
                };
                Ok(Some((meta, body)))
            }
            None => Ok(None),
        }
    }

    /// Parse simple YAML-like frontmatter (key: value).
    ///
    /// Supports standard fields (title, date, etc.) and custom fields in `extra`.
    fn parse_yaml_like(content: &str) -> PageMeta {
        let mut meta = PageMeta::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once(':') {
                let key_lower = key.trim().to_lowercase();
                let value = value.trim();

                match key_lower.as_str() {
                    "title" => meta.title = Some(value.to_string()),
                    "date" => meta.date = Some(value.to_string()),
                    "description" => meta.description = Some(value.to_string()),
                    "summary" => meta.summary = Some(value.to_string()),
                    "draft" => meta.draft = value.eq_ignore_ascii_case("true"),
                    _ => {
                        // Custom field -> extra (preserve original key case)
                        let key = key.trim().to_string();
                        meta.extra.insert(key, parse_yaml_value(value));
                    }
                }
            }
        }

        meta
    }

    /// Parse TOML frontmatter.
    fn parse_toml(content: &str) -> Result<PageMeta> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Invalid TOML frontmatter: {}", e))
    }

    /// Detect and extract frontmatter.
    /// Returns `(frontmatter, body, is_toml)` if found.
    fn detect_frontmatter(content: &str) -> Option<(&str, &str, bool)> {
        let trimmed = content.trim_start();

        // YAML: ---...---
        if trimmed.starts_with("---")
            && let Some(end) = trimmed[3..].find("\n---")
        {
            let fm = trimmed[3..3 + end].trim();
            let body = trimmed[3 + end + 4..].trim_start_matches('\n');
            return Some((fm, body, false));
        }

        // TOML: +++...+++
        if trimmed.starts_with("+++")
            && let Some(end) = trimmed[3..].find("\n+++")
        {
            let fm = trimmed[3..3 + end].trim();
            let body = trimmed[3 + end + 4..].trim_start_matches('\n');
            return Some((fm, body, true));
        }

        None
    }
}

/// Parse a YAML-like value string to JSON value
///
/// Supports:
/// - Booleans: `true`, `false`
/// - Numbers: `123`, `3.14`
/// - Arrays: `a, b, c` -> `["a", "b", "c"]`
/// - Strings: everything else
fn parse_yaml_value(s: &str) -> serde_json::Value {
    use serde_json::Value;

    // Boolean
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    // Null
    if s.eq_ignore_ascii_case("null") || s == "~" {
        return Value::Null;
    }

    // Number (integer)
    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }

    // Number (float)
    if let Ok(n) = s.parse::<f64>()
        && let Some(num) = serde_json::Number::from_f64(n)
    {
        return Value::Number(num);
    }

    // Comma-separated array (if contains comma)
    if s.contains(',') {
        let arr: Vec<Value> = s
            .split(',')
            .map(|item| Value::String(item.trim().to_string()))
            .filter(|v| !matches!(v, Value::String(s) if s.is_empty()))
            .collect();
        return Value::Array(arr);
    }

    // Default: string
    Value::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: Bonjour\ndate: 2024-01-01\n---\n\n# Corps";
        let result = MetaExtractor.extract_frontmatter(content).unwrap().unwrap();

        assert_eq!(result.0.title, Some("Bonjour".to_string()));
        assert_eq!(result.0.date, Some("2024-01-01".to_string()));
        assert!(result.1.starts_with("# Corps"));
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntitle = \"Bonjour\"\ndraft = true\n+++\n\n# Corps";
        let result = MetaExtractor.extract_frontmatter(content).unwrap().unwrap();

        assert_eq!(result.0.title, Some("Bonjour".to_string()));
        assert!(result.0.draft);
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just content";
        let result = MetaExtractor.extract_frontmatter(content).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_yaml_extra_fields() {
        let content = "---\ntitle: Bonjour\ncustom: monde\ncount: 42\nflag: true\n---\n";
        let result = MetaExtractor.extract_frontmatter(content).unwrap().unwrap();

        assert_eq!(result.0.title, Some("Bonjour".to_string()));
        assert_eq!(
            result.0.extra.get("custom"),
            Some(&serde_json::json!("monde"))
        );
        assert_eq!(result.0.extra.get("count"), Some(&serde_json::json!(42)));
        assert_eq!(result.0.extra.get("flag"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_excerpt_fills_summary() {
        let mut meta = PageMeta::default();
        meta.apply_excerpt("Un début de billet.\n\n<!-- excerpt -->\n\nLa suite.");
        assert_eq!(meta.summary.as_deref(), Some("Un début de billet."));
    }

    #[test]
    fn test_excerpt_does_not_override_summary() {
        let mut meta = PageMeta {
            summary: Some("Déjà là".to_string()),
            ..Default::default()
        };
        meta.apply_excerpt("Autre texte.\n<!-- excerpt -->\nSuite.");
        assert_eq!(meta.summary.as_deref(), Some("Déjà là"));
    }

    #[test]
    fn test_no_excerpt_separator() {
        let mut meta = PageMeta::default();
        meta.apply_excerpt("Pas de séparateur ici.");
        assert!(meta.summary.is_none());
    }
}
