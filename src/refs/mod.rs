//! Cross-reference resolution between content collections.
//!
//! A reference tag (`{% test slug label %}`, `{% post slug label %}`) is
//! resolved in two phases:
//!
//! 1. Parse: the argument text is split into a slug and an optional label
//!    ([`TagInvocation`]), without touching collection data.
//! 2. Render: the slug is looked up in the tag's collection; a hit yields a
//!    markdown link (with label) or a bare URL (without), a miss aborts the
//!    page build with [`BuildError::ReferenceNotFound`].
//!
//! Validating against the real collection at build time keeps stale slugs
//! from shipping as dead links.

mod expand;
mod tag;

pub use expand::expand_references;
pub use tag::TagInvocation;

use crate::content::CollectionSet;
use crate::error::BuildError;

/// A reference tag bound to exactly one collection.
///
/// The `test` and `post` tags are two instances of this type; behavior is
/// identical apart from the collection they search.
#[derive(Debug, Clone)]
pub struct ReferenceTag {
    collection: String,
}

impl ReferenceTag {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
        }
    }

    /// Tag name as written in page source (same as the collection name).
    pub fn name(&self) -> &str {
        &self.collection
    }

    /// Render phase: resolve an invocation against the collections.
    pub fn render(
        &self,
        invocation: &TagInvocation,
        collections: &CollectionSet,
    ) -> Result<String, BuildError> {
        let collection = collections
            .get(&self.collection)
            .ok_or_else(|| BuildError::UnknownCollection(self.collection.clone()))?;

        let entry = collection.find(&invocation.slug).ok_or_else(|| {
            BuildError::ReferenceNotFound {
                slug: invocation.slug.clone(),
                collection: self.collection.clone(),
            }
        })?;

        Ok(match &invocation.label {
            Some(label) => format!("[{}]({} \"{}\")", label, entry.url, entry.title),
            None => entry.url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Collection, Entry};

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
        set
    }

    #[test]
    fn test_render_with_label() {
        let tag = ReferenceTag::new("test");
        let invocation = TagInvocation::parse("slug-a Some Label");
        let rendered = tag.render(&invocation, &test_collections()).unwrap();
        assert_eq!(rendered, "[Some Label](/t/slug-a/ \"T\")");
    }

    #[test]
    fn test_render_without_label_is_bare_url() {
        let tag = ReferenceTag::new("test");
        let invocation = TagInvocation::parse("slug-a");
        let rendered = tag.render(&invocation, &test_collections()).unwrap();
        assert_eq!(rendered, "/t/slug-a/");
    }

    #[test]
    fn test_render_unknown_slug_fails() {
        let tag = ReferenceTag::new("test");
        let invocation = TagInvocation::parse("slug-z");
        let err = tag.render(&invocation, &test_collections()).unwrap_err();
        match err {
            BuildError::ReferenceNotFound { slug, collection } => {
                assert_eq!(slug, "slug-z");
                assert_eq!(collection, "test");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_render_unknown_collection_fails() {
        let tag = ReferenceTag::new("recette");
        let invocation = TagInvocation::parse("tarte");
        let err = tag.render(&invocation, &test_collections()).unwrap_err();
        assert!(matches!(err, BuildError::UnknownCollection(name) if name == "recette"));
    }
}
