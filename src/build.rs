//! Site build driver.
//!
//! Orchestrates one full build: scan collections, render pages concurrently,
//! run each page through the output pipeline, write results, copy assets.
//! The first page error aborts the whole build.

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::asset;
use crate::config::SiteConfig;
use crate::content::scan_collections;
use crate::log;
use crate::logger::ProgressLine;
use crate::render::PageRenderer;
use crate::transform::OutputPipeline;

/// Counts reported after a successful build.
#[derive(Debug)]
pub struct BuildStats {
    pub pages: usize,
    pub assets: usize,
}

/// Build the whole site into the output directory.
pub fn build_site(config: &SiteConfig) -> Result<BuildStats> {
    let started = Instant::now();

    let output_dir = config.output_dir();
    if config.build.clean && output_dir.exists() {
        fs::remove_dir_all(&output_dir)
            .with_context(|| format!("cleaning `{}`", output_dir.display()))?;
    }
    fs::create_dir_all(&output_dir)?;

    // Stylesheet snapshot: read once, shared read-only by every page build
    let pipeline = OutputPipeline::from_config(config)?;

    // Collections are fully populated before any page renders
    let (collections, pages) = scan_collections(config)?;
    let renderer = PageRenderer::new(config, &collections);

    let progress = ProgressLine::new(&[("pages", pages.len())]);
    pages.par_iter().try_for_each(|page| -> Result<()> {
        let html = renderer.render(page)?;
        let html = pipeline
            .apply(html, &page.output)
            .with_context(|| format!("building page `{}` ({})", page.url, page.collection))?;

        if let Some(parent) = page.output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&page.output, html)
            .with_context(|| format!("writing `{}`", page.output.display()))?;

        progress.inc("pages");
        Ok(())
    })?;
    progress.finish();

    let assets = asset::copy_assets(config)?;

    log!(
        "build";
        "{} pages, {} assets in {:.2}s",
        pages.len(),
        assets,
        started.elapsed().as_secs_f32()
    );

    Ok(BuildStats {
        pages: pages.len(),
        assets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_file(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// A minimal but complete site: one review, one article referencing it.
    fn seed_site(root: &Path) {
        write_file(
            &root.join("templates/theme.css"),
            ".used { color: red }\n.unused { color: blue }\n",
        );
        write_file(
            &root.join("tests/slug-a.md"),
            "---\ntitle: T\ndate: 2024-01-10\n---\n\nLe test complet.",
        );
        write_file(
            &root.join("posts/billet.md"),
            "---\ntitle: Le billet\ndate: 2024-02-01\n---\n\n\
             Voir {% test slug-a Some Label %} : un choix !\n\n\
             <p class=\"used\">fin</p>\n",
        );
        write_file(&root.join("CNAME"), "example.org");
    }

    fn test_config(root: &Path, minify: bool) -> SiteConfig {
        let mut config = SiteConfig {
            root: root.to_path_buf(),
            ..Default::default()
        };
        config.build.minify = minify;
        config
    }

    #[test]
    fn test_build_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        seed_site(dir.path());

        let stats = build_site(&test_config(dir.path(), false)).unwrap();
        assert_eq!(stats.pages, 2);
        assert_eq!(stats.assets, 1);

        let billet =
            fs::read_to_string(dir.path().join("_site/posts/billet/index.html")).unwrap();
        // Resolved cross-reference, rendered by markdown
        assert!(billet.contains("<a href=\"/tests/slug-a/\" title=\"T\">Some Label</a>"));
        // Typography applied after rendering
        assert!(billet.contains("&nbsp;:"));
        assert!(billet.contains("choix&nbsp;!"));
        // Only the used stylesheet rule was inlined
        assert!(billet.contains("<style>.used{color:red}</style></head>"));
        assert!(!billet.contains(".unused"));

        assert!(dir.path().join("_site/tests/slug-a/index.html").is_file());
        assert!(dir.path().join("_site/CNAME").is_file());
    }

    #[test]
    fn test_build_minified_output() {
        let dir = tempfile::tempdir().unwrap();
        seed_site(dir.path());

        build_site(&test_config(dir.path(), true)).unwrap();
        let billet =
            fs::read_to_string(dir.path().join("_site/posts/billet/index.html")).unwrap();
        assert!(!billet.contains("\n<body>"));
        assert!(billet.contains("Some Label"));
    }

    #[test]
    fn test_build_fails_on_dangling_reference() {
        let dir = tempfile::tempdir().unwrap();
        seed_site(dir.path());
        write_file(
            &dir.path().join("posts/casse.md"),
            "Voir {% test inconnu %}.",
        );

        let err = build_site(&test_config(dir.path(), false)).unwrap_err();
        assert!(format!("{err:#}").contains("inconnu"));
    }

    #[test]
    fn test_clean_removes_stale_output() {
        let dir = tempfile::tempdir().unwrap();
        seed_site(dir.path());
        write_file(&dir.path().join("_site/perime.html"), "vieux");

        let mut config = test_config(dir.path(), false);
        config.build.clean = true;
        build_site(&config).unwrap();
        assert!(!dir.path().join("_site/perime.html").exists());
    }
}
