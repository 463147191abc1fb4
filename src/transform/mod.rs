//! Per-page HTML post-processing.
//!
//! Converts raw templated HTML into final delivered HTML. Stages run in a
//! fixed order, each feeding the next:
//!
//! 1. French typography normalization
//! 2. CSS tree-shaking against the page content
//! 3. CSS minification
//! 4. Inline `<style>` injection before `</head>`
//! 5. Whole-document minification (optional, `NO_MINIFY` disables)
//!
//! Only pages whose output path ends in `.html` are transformed; everything
//! else passes through unchanged. The pipeline owns no side effects: writing
//! the result is the caller's job.

pub mod minify;
pub mod purge;
pub mod typography;

pub use purge::PageSelectors;

use std::path::Path;

use crate::config::SiteConfig;
use crate::error::BuildError;
use crate::log;

/// The per-page output pipeline.
///
/// Holds the stylesheet snapshot, read once at construction and shared
/// read-only across concurrent page builds.
pub struct OutputPipeline {
    stylesheet: String,
    minify: bool,
}

impl OutputPipeline {
    pub fn new(stylesheet: String, minify: bool) -> Self {
        Self { stylesheet, minify }
    }

    /// Read the stylesheet snapshot from the configured path.
    pub fn from_config(config: &SiteConfig) -> Result<Self, BuildError> {
        let path = config.stylesheet_path();
        let stylesheet =
            std::fs::read_to_string(&path).map_err(|e| BuildError::Io(path, e))?;
        Ok(Self::new(stylesheet, config.build.minify))
    }

    /// Apply the pipeline to one rendered page.
    pub fn apply(&self, html: String, output_path: &Path) -> Result<String, BuildError> {
        if output_path.extension().is_none_or(|ext| ext != "html") {
            return Ok(html);
        }

        let text = typography::normalize(&html);

        let selectors = PageSelectors::extract(&text)?;
        let purged = purge::purge(&self.stylesheet, &selectors)?;
        let css = minify::minify_css(&purged)?;
        let text = inject_style(text, &css);

        if self.minify {
            minify::minify_html(&text, true)
        } else {
            Ok(text)
        }
    }
}

/// Splice `<style>` immediately before the closing head tag.
///
/// A missing `</head>` means a malformed layout, not a data error: warn and
/// return the page unchanged.
fn inject_style(html: String, css: &str) -> String {
    if !html.contains("</head>") {
        log!("warning"; "no </head> tag, skipping style injection");
        return html;
    }
    html.replacen("</head>", &format!("<style>{css}</style></head>"), 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const STYLESHEET: &str = ".used { color: red }\n.unused { color: blue }\n";

    fn page(body: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n<title>T</title>\n</head>\n<body>\n{body}\n</body>\n</html>"
        )
    }

    #[test]
    fn test_non_html_output_passes_through() {
        let pipeline = OutputPipeline::new(STYLESHEET.into(), true);
        let input = "body { margin : 0 }  /* pas touche */";
        let out = pipeline
            .apply(input.to_string(), &PathBuf::from("_site/theme.css"))
            .unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_pipeline_inlines_only_used_css() {
        let pipeline = OutputPipeline::new(STYLESHEET.into(), false);
        let out = pipeline
            .apply(
                page("<p class=\"used\">texte</p>"),
                &PathBuf::from("_site/index.html"),
            )
            .unwrap();
        assert!(out.contains("<style>.used{color:red}</style></head>"));
        assert!(!out.contains(".unused"));
    }

    #[test]
    fn test_pipeline_applies_typography() {
        let pipeline = OutputPipeline::new(STYLESHEET.into(), false);
        let out = pipeline
            .apply(
                page("<p>Un choix ! Et l'oeuvre...</p>"),
                &PathBuf::from("_site/index.html"),
            )
            .unwrap();
        assert!(out.contains("choix&nbsp;!"));
        assert!(out.contains("l’œuvre…"));
    }

    #[test]
    fn test_pipeline_minifies_when_enabled() {
        let minified = OutputPipeline::new(STYLESHEET.into(), true)
            .apply(
                page("<p class=\"used\">a</p>"),
                &PathBuf::from("_site/index.html"),
            )
            .unwrap();
        let plain = OutputPipeline::new(STYLESHEET.into(), false)
            .apply(
                page("<p class=\"used\">a</p>"),
                &PathBuf::from("_site/index.html"),
            )
            .unwrap();
        assert!(minified.len() < plain.len());
        assert!(!minified.contains("\n<body>"));
        // Stage 4 output is final when stage 5 is off
        assert!(plain.contains("\n<body>"));
    }

    #[test]
    fn test_missing_head_skips_injection() {
        let pipeline = OutputPipeline::new(STYLESHEET.into(), false);
        let out = pipeline
            .apply(
                "<p class=\"used\">fragment sans head</p>".to_string(),
                &PathBuf::from("_site/index.html"),
            )
            .unwrap();
        assert!(!out.contains("<style>"));
        assert!(out.contains("fragment sans head"));
    }

    #[test]
    fn test_style_injected_once() {
        let pipeline = OutputPipeline::new(".used{color:red}".into(), false);
        let out = pipeline
            .apply(
                page("<p class=\"used\">a</p>"),
                &PathBuf::from("_site/index.html"),
            )
            .unwrap();
        assert_eq!(out.matches("<style>").count(), 1);
    }
}
