//! Build error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort the current page's build.
///
/// There is no retry or fallback path: content is static and deterministic,
/// so every error here points at a content or configuration defect.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A cross-reference tag names a slug absent from its collection.
    #[error("no entry with slug `{slug}` in collection `{collection}`")]
    ReferenceNotFound { slug: String, collection: String },

    /// A reference tag is bound to a collection the config does not declare.
    #[error("unknown collection `{0}`")]
    UnknownCollection(String),

    /// The CSS purifier or minifier rejected the stylesheet.
    #[error("stylesheet error: {0}")]
    Css(String),

    /// The HTML parser or minifier rejected the page.
    #[error("html error: {0}")]
    Html(String),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_not_found_display() {
        let err = BuildError::ReferenceNotFound {
            slug: "vieux-clou".into(),
            collection: "test".into(),
        };
        let display = format!("{err}");
        assert!(display.contains("vieux-clou"));
        assert!(display.contains("test"));
    }

    #[test]
    fn test_io_error_display() {
        let err = BuildError::Io(
            PathBuf::from("theme.css"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(format!("{err}").contains("theme.css"));
    }
}
