//! Page rendering: markdown source to full HTML document.
//!
//! Rendering order per page:
//!
//! 1. Reference tags expand over the markdown source, so the emitted
//!    markdown links render like hand-written ones.
//! 2. Paired shortcodes wrap their bodies in site markup.
//! 3. pulldown-cmark converts the result to an HTML fragment.
//! 4. The fragment and page metadata substitute into the layout.

mod layout;
pub mod markdown;
mod shortcode;

pub use layout::Layout;
pub use markdown::MarkdownOptions;
pub use shortcode::expand_shortcodes;

use crate::config::SiteConfig;
use crate::content::{CollectionSet, ScannedPage};
use crate::error::BuildError;
use crate::refs::{ReferenceTag, expand_references};
use crate::utils::date::DateTimeUtc;

/// Renders pages against one immutable collection set.
pub struct PageRenderer<'a> {
    config: &'a SiteConfig,
    collections: &'a CollectionSet,
    tags: Vec<ReferenceTag>,
    layout: Layout,
    markdown: MarkdownOptions,
}

impl<'a> PageRenderer<'a> {
    /// One reference tag is registered per configured collection.
    pub fn new(config: &'a SiteConfig, collections: &'a CollectionSet) -> Self {
        let tags = config.collections.keys().map(ReferenceTag::new).collect();
        Self {
            config,
            collections,
            tags,
            layout: Layout::load(config),
            markdown: MarkdownOptions::all(),
        }
    }

    /// Render one scanned page to a full HTML document.
    pub fn render(&self, page: &ScannedPage) -> Result<String, BuildError> {
        let expanded = expand_references(&page.body, &self.tags, self.collections)?;
        let expanded = expand_shortcodes(&expanded);
        let content = markdown::to_html(&expanded, &self.markdown);

        let date = page.meta.date.as_deref().and_then(DateTimeUtc::parse);
        let date_iso = date.map(DateTimeUtc::to_rfc3339).unwrap_or_default();
        let date_readable = date.map(DateTimeUtc::to_french).unwrap_or_default();

        let description = page
            .meta
            .description
            .as_deref()
            .or(page.meta.summary.as_deref())
            .unwrap_or(&self.config.site.description);

        Ok(self.layout.render(&[
            ("content", &content),
            ("title", page.title()),
            ("description", description),
            ("url", &page.url),
            ("date_iso", &date_iso),
            ("date_readable", &date_readable),
            ("lang", &self.config.site.language),
            ("site_title", &self.config.site.title),
            ("site_url", &self.config.site.url),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Collection, Entry, PageMeta};
    use std::path::PathBuf;

    fn test_collections() -> CollectionSet {
        let mut set = CollectionSet::new();
        let mut tests = Collection::new("test");
        tests.push(Entry {
            slug: "slug-a".into(),
            url: "/t/slug-a/".into(),
            title: "T".into(),
            date: None,
        });
        set.insert(tests);

        let mut posts = Collection::new("post");
        posts.push(Entry {
            slug: "billet".into(),
            url: "/posts/billet/".into(),
            title: "Le billet".into(),
            date: None,
        });
        set.insert(posts);
        set
    }

    fn test_page(body: &str) -> ScannedPage {
        ScannedPage {
            collection: "post".into(),
            slug: "billet".into(),
            url: "/posts/billet/".into(),
            output: PathBuf::from("_site/posts/billet/index.html"),
            meta: PageMeta {
                title: Some("Le billet".into()),
                date: Some("2019-05-31".into()),
                ..Default::default()
            },
            body: body.to_string(),
        }
    }

    #[test]
    fn test_render_resolves_references() {
        let config = SiteConfig::default();
        let collections = test_collections();
        let renderer = PageRenderer::new(&config, &collections);

        let html = renderer
            .render(&test_page("Voir {% test slug-a Some Label %}."))
            .unwrap();
        assert!(html.contains("<a href=\"/t/slug-a/\" title=\"T\">Some Label</a>"));
    }

    #[test]
    fn test_render_fills_layout_vars() {
        let config = SiteConfig::default();
        let collections = test_collections();
        let renderer = PageRenderer::new(&config, &collections);

        let html = renderer.render(&test_page("Corps.")).unwrap();
        assert!(html.contains("<title>Le billet</title>"));
        assert!(html.contains("<html lang=\"fr\">"));
        assert!(html.contains("<p>Corps.</p>"));
    }

    #[test]
    fn test_render_dangling_reference_fails() {
        let config = SiteConfig::default();
        let collections = test_collections();
        let renderer = PageRenderer::new(&config, &collections);

        let err = renderer
            .render(&test_page("{% test disparu %}"))
            .unwrap_err();
        assert!(matches!(err, BuildError::ReferenceNotFound { .. }));
    }
}
