//! Content collections: frontmatter metadata, scanning, and storage.

pub mod meta;
pub mod scan;
pub mod store;

pub use meta::{MetaExtractor, PageMeta};
pub use scan::{ScannedPage, scan_collections};
pub use store::{Collection, CollectionSet, Entry};

/// JSON object map preserving insertion order.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
