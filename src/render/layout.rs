//! Page layout with `{{ placeholder }}` substitution.

use std::fs;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::SiteConfig;
use crate::debug;

/// `{{ name }}` with optional inner padding.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[ \t]*([A-Za-z0-9_]+)[ \t]*\}\}").unwrap());

/// Built-in layout used when the site ships none.
///
/// Keeps a well-formed `<head>` so the transform pipeline always has an
/// injection point for the inlined stylesheet.
const DEFAULT_LAYOUT: &str = "<!DOCTYPE html>
<html lang=\"{{ lang }}\">
<head>
<meta charset=\"utf-8\">
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">
<title>{{ title }}</title>
<meta name=\"description\" content=\"{{ description }}\">
</head>
<body>
<main>
{{ content }}
</main>
</body>
</html>
";

/// A page layout loaded once per build.
#[derive(Debug, Clone)]
pub struct Layout {
    template: String,
}

impl Layout {
    /// Load `page.html` from the templates directory, or fall back to the
    /// built-in layout.
    pub fn load(config: &SiteConfig) -> Self {
        let path = config.templates_dir().join("page.html");
        match fs::read_to_string(&path) {
            Ok(template) => Self { template },
            Err(_) => {
                debug!("render"; "no layout at `{}`, using built-in", path.display());
                Self {
                    template: DEFAULT_LAYOUT.to_string(),
                }
            }
        }
    }

    #[cfg(test)]
    pub fn from_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Substitute `{{ name }}` placeholders. Unknown names become empty.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        PLACEHOLDER_RE
            .replace_all(&self.template, |caps: &regex::Captures<'_>| {
                let name = caps.get(1).map_or("", |m| m.as_str());
                vars.iter()
                    .find(|(key, _)| *key == name)
                    .map_or("", |(_, value)| *value)
                    .to_string()
            })
            .into_owned()
    }
}
