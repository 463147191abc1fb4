//! Content directory scanning.
//!
//! Reads every markdown file of every configured collection, extracts
//! frontmatter, and produces both the `CollectionSet` (for reference
//! resolution) and the list of pages to render.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::content::meta::{MetaExtractor, PageMeta};
use crate::content::store::{Collection, CollectionSet, Entry};
use crate::debug;

/// A content file ready for rendering.
#[derive(Debug, Clone)]
pub struct ScannedPage {
    /// Owning collection name.
    pub collection: String,
    pub slug: String,
    pub url: String,
    /// Output file path (`<output>/<route>/<slug>/index.html`).
    pub output: PathBuf,
    pub meta: PageMeta,
    /// Markdown body, frontmatter stripped.
    pub body: String,
}

impl ScannedPage {
    /// Display title, falling back to the slug.
    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or(&self.slug)
    }
}

/// Scan all configured collections.
///
/// Collections are fully populated before any page render begins; the
/// returned set is read-only from then on.
pub fn scan_collections(config: &SiteConfig) -> Result<(CollectionSet, Vec<ScannedPage>)> {
    let output_dir = config.output_dir();
    let mut set = CollectionSet::new();
    let mut pages = Vec::new();

    for (name, collection_config) in &config.collections {
        let dir = config.root_join(&collection_config.dir);
        let mut collection = Collection::new(name.clone());

        if dir.is_dir() {
            let entries =
                fs::read_dir(&dir).with_context(|| format!("reading `{}`", dir.display()))?;
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_none_or(|ext| ext != "md") {
                    continue;
                }
                let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };

                let source = fs::read_to_string(&path)
                    .with_context(|| format!("reading `{}`", path.display()))?;
                let (mut meta, body) = match MetaExtractor.extract_frontmatter(&source)? {
                    Some((meta, body)) => (meta, body.to_string()),
                    None => (PageMeta::default(), source),
                };
                meta.apply_excerpt(&body);

                if meta.draft && config.build.skip_drafts {
                    debug!("content"; "skipping draft `{}`", path.display());
                    continue;
                }

                let url = collection_config.entry_url(slug);
                let output = output_dir
                    .join(url.trim_matches('/'))
                    .join("index.html");

                collection.push(Entry {
                    slug: slug.to_string(),
                    url: url.clone(),
                    title: meta.title.clone().unwrap_or_else(|| slug.to_string()),
                    date: meta.date.clone(),
                });
                pages.push(ScannedPage {
                    collection: name.clone(),
                    slug: slug.to_string(),
                    url,
                    output,
                    meta,
                    body,
                });
            }
        }

        collection.sort_by_date();
        debug!("content"; "collection `{}`: {} entries", name, collection.len());
        set.insert(collection);
    }

    Ok((set, pages))
}
