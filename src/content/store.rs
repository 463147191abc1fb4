//! Collection storage with slug lookup.
//!
//! Collections are built once before any page renders and never mutated
//! afterwards, so render-phase lookups run concurrently without locking.

use rustc_hash::FxHashMap;

/// A single content item, addressable by slug within its collection.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Unique identifier within the collection (the source file stem).
    pub slug: String,
    /// Output URL, e.g. `/tests/slug-a/`.
    pub url: String,
    /// Display title (falls back to the slug when frontmatter has none).
    pub title: String,
    /// Publication date as written in frontmatter.
    pub date: Option<String>,
}

/// A named, ordered set of entries sharing a content type.
#[derive(Debug, Default)]
pub struct Collection {
    pub name: String,
    entries: Vec<Entry>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Look up an entry by slug.
    ///
    /// Linear scan: collections are small and this only runs at build time.
    pub fn find(&self, slug: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.slug == slug)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sort entries newest first, undated entries last (by title).
    pub fn sort_by_date(&mut self) {
        self.entries.sort_by(|a, b| match (&b.date, &a.date) {
            (Some(date_b), Some(date_a)) => date_b.cmp(date_a),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.title.cmp(&b.title),
        });
    }
}

/// All collections of a site, keyed by name.
#[derive(Debug, Default)]
pub struct CollectionSet {
    collections: FxHashMap<String, Collection>,
}

impl CollectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, collection: Collection) {
        self.collections.insert(collection.name.clone(), collection);
    }

    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entry(slug: &str, date: Option<&str>) -> Entry {
        Entry {
            slug: slug.to_string(),
            url: format!("/tests/{slug}/"),
            title: slug.to_uppercase(),
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_find_hit_and_miss() {
        let mut collection = Collection::new("test");
        collection.push(make_entry("slug-a", None));
        collection.push(make_entry("slug-b", None));

        let found = collection.find("slug-a").expect("should find slug-a");
        assert_eq!(found.url, "/tests/slug-a/");
        assert_eq!(found.title, "SLUG-A");
        assert!(collection.find("slug-c").is_none());
    }

    #[test]
    fn test_sort_newest_first() {
        let mut collection = Collection::new("post");
        collection.push(make_entry("vieux", Some("2019-01-01")));
        collection.push(make_entry("recent", Some("2024-06-15")));
        collection.push(make_entry("sans-date", None));
        collection.sort_by_date();

        let slugs: Vec<_> = collection.entries().iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["recent", "vieux", "sans-date"]);
    }

    #[test]
    fn test_collection_set() {
        let mut set = CollectionSet::new();
        let mut tests = Collection::new("test");
        tests.push(make_entry("slug-a", None));
        set.insert(tests);

        assert!(set.get("test").is_some());
        assert!(set.get("post").is_none());
        assert_eq!(set.len(), 1);
    }
}
