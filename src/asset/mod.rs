//! Passthrough asset copying.
//!
//! Nested directories (`fonts/`, `img/`, ...) are copied recursively under
//! their own name; flatten files (`CNAME`, ...) land at the output root.
//! `.js` and `.css` files are minified on the way unless already `.min.*`.

pub mod minify;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::{debug, log};

/// Copy all configured passthrough assets. Returns the number of files.
pub fn copy_assets(config: &SiteConfig) -> Result<usize> {
    let output_root = config.output_dir();
    let mut copied = 0;

    for dir in &config.build.assets.nested {
        let source = config.root_join(dir);
        if !source.is_dir() {
            debug!("assets"; "directory '{}' not found, skipping", dir.display());
            continue;
        }
        let Some(name) = dir.file_name() else { continue };
        copy_dir(&source, &output_root.join(name), &mut copied)?;
    }

    for file in &config.build.assets.flatten {
        let source = config.root_join(file);
        if !source.is_file() {
            log!("warning"; "flatten file '{}' not found, skipping", file.display());
            continue;
        }
        let Some(name) = file.file_name() else { continue };
        copy_file(&source, &output_root.join(name))?;
        copied += 1;
    }

    Ok(copied)
}

/// Recursively copy a directory.
fn copy_dir(dir: &Path, out_dir: &Path, copied: &mut usize) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("reading `{}`", dir.display()))?;
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name() else { continue };
        let dest = out_dir.join(name);
        if path.is_dir() {
            copy_dir(&path, &dest, copied)?;
        } else {
            copy_file(&path, &dest)?;
            *copied += 1;
        }
    }
    Ok(())
}

/// Copy one file, minifying JS/CSS (already-minified `.min.*` files pass
/// through untouched).
fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let is_minified = stem.ends_with(".min");
    if !is_minified && (ext == "js" || ext == "css") {
        let content = fs::read_to_string(source)
            .with_context(|| format!("reading `{}`", source.display()))?;
        let minified =
            minify::minify_by_ext(source, &content).unwrap_or_else(|| content.clone());
        fs::write(dest, minified)?;
    } else {
        fs::copy(source, dest)?;
    }
    Ok(())
}
