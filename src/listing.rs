//! Flat, single-level directory listings.
//!
//! Years at the archive root, folders within a year. Non-recursive by
//! contract — the expanded view is [`crate::tree::build_tree`]'s job.

use anyhow::{Context, Result};
use std::path::Path;

/// Names of the year directories directly under the archive root.
pub async fn list_years(root: &Path) -> Result<Vec<String>> {
    list_subdirectories(root).await
}

/// Names of the folders directly under `root/year`.
pub async fn list_folders(root: &Path, year: &str) -> Result<Vec<String>> {
    list_subdirectories(&root.join(year)).await
}

/// Immediate subdirectory names of `dir`, in read order. Files are
/// skipped; a failed read fails the listing.
async fn list_subdirectories(dir: &Path) -> Result<Vec<String>> {
    let mut read_dir = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut names = Vec::new();
    while let Some(entry) = read_dir
        .next_entry()
        .await
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let file_type = entry
            .file_type()
            .await
            .with_context(|| format!("Failed to stat entry: {}", entry.path().display()))?;
        if file_type.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    Ok(names)
}
