//! Loading catalog documents from a content directory.
//!
//! The content root holds one subdirectory per [`Kind`], each containing one
//! Markdown document per catalog item. Failures are contained per document:
//! an unreadable or malformed file is logged and left out, and its siblings
//! still load.

use std::io;
use std::path::{Path, PathBuf};

use crate::frontmatter::parse_document;
use crate::kind::Kind;
use crate::metadata::Metadata;
use crate::record::CatalogRecord;
use crate::{Error, Result};

/// Extension of catalog documents.
pub const DOCUMENT_EXTENSION: &str = "md";

/// Load every document of kind `M` under `content_root`.
///
/// A missing kind directory yields an empty list. Order follows directory
/// enumeration; use [`sort_by_name`] when a stable order is needed.
pub fn load_kind<M: Metadata>(content_root: &Path) -> Vec<CatalogRecord<M>> {
    let dir = content_root.join(M::KIND.dir_name());
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(dir = %dir.display(), "catalog directory does not exist");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(dir = %dir.display(), %e, "cannot read catalog directory");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !is_document(&path) {
            continue;
        }
        match load_file::<M>(content_root, &path) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(path = %path.display(), %e, "skipping catalog document"),
        }
    }

    tracing::debug!(kind = %M::KIND, count = records.len(), "loaded catalog kind");
    records
}

/// Load the single document of kind `M` named by `slug`.
///
/// Only `<kind dir>/<slug>.md` is read; the directory is not scanned.
/// Returns `None` if the slug is invalid, or the file is absent or fails to
/// parse.
pub fn load_one<M: Metadata>(content_root: &Path, slug: &str) -> Option<CatalogRecord<M>> {
    let path = match document_path(content_root, M::KIND, slug) {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(kind = %M::KIND, %e, "rejected catalog lookup");
            return None;
        }
    };

    match load_file::<M>(content_root, &path) {
        Ok(record) => Some(record),
        Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(kind = %M::KIND, slug, "catalog document not found");
            None
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), %e, "skipping catalog document");
            None
        }
    }
}

/// Read and parse one document into a record.
///
/// `source_path` is `path` relative to `content_root` when it lies beneath
/// it, otherwise `path` unchanged.
///
/// # Errors
///
/// Returns `Error::InvalidPath` if `path` is not a `.md` file name,
/// `Error::Io` if it cannot be read, `Error::MissingHeader` if it has no
/// header block, and any parse or coercion error from the header.
pub fn load_file<M: Metadata>(content_root: &Path, path: &Path) -> Result<CatalogRecord<M>> {
    let slug = slug_from_path(path).ok_or_else(|| Error::InvalidPath(path.to_path_buf()))?;
    let raw_text = std::fs::read_to_string(path)?;

    let document = parse_document(&raw_text)?;
    if !document.has_header {
        return Err(Error::MissingHeader);
    }
    let metadata = M::from_document(&document)?;

    let source_path = path
        .strip_prefix(content_root)
        .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

    Ok(CatalogRecord::new(
        slug,
        metadata,
        document,
        raw_text,
        source_path,
    ))
}

/// Path of the document for `slug` of `kind`.
///
/// # Errors
///
/// Returns `Error::InvalidSlug` if the slug is empty, `.`/`..`, or contains
/// a path separator.
pub fn document_path(content_root: &Path, kind: Kind, slug: &str) -> Result<PathBuf> {
    if slug.is_empty() || slug == "." || slug == ".." || slug.contains(['/', '\\', '\0']) {
        return Err(Error::InvalidSlug(slug.to_string()));
    }
    Ok(content_root
        .join(kind.dir_name())
        .join(format!("{slug}.{DOCUMENT_EXTENSION}")))
}

/// Slug of a document path: its file name without the `.md` extension.
#[must_use]
pub fn slug_from_path(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some(DOCUMENT_EXTENSION) {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Sort records by name, case-insensitively, with the slug as tiebreak.
pub fn sort_by_name<M: Metadata>(records: &mut [CatalogRecord<M>]) {
    records.sort_by_cached_key(|r| (r.name().to_lowercase(), r.slug.clone()));
}

fn is_document(path: &Path) -> bool {
    path.is_file() && slug_from_path(path).is_some()
}
