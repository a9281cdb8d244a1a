//! Recursive directory tree expansion.
//!
//! [`build_tree`] turns a directory on disk into a fully expanded
//! [`DirectoryEntry`] forest. Sibling subtrees are expanded concurrently
//! on a [`JoinSet`], but a folder entry is only finalized once its whole
//! subtree has resolved, and any read failure at any depth fails the
//! entire build — callers never see a partial tree.
//!
//! The tree is rebuilt fresh on every call; there is no caching and no
//! depth or fan-out bound.

use anyhow::{Context, Result};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use tokio::task::JoinSet;

use crate::models::DirectoryEntry;

/// Expand `dir` into the ordered entries of its immediate and nested
/// contents.
///
/// Entry order is whatever the underlying directory read yields:
/// subtrees resolve concurrently, but results are slotted back by
/// enumeration index, so concurrency never reorders siblings.
///
/// Fails if `dir` (or any directory beneath it) cannot be read. All
/// in-flight sibling expansions are allowed to settle before the first
/// error is returned.
pub async fn build_tree(dir: PathBuf) -> Result<Vec<DirectoryEntry>> {
    let mut read_dir = tokio::fs::read_dir(&dir)
        .await
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    // One slot per child, in read order. File slots fill immediately;
    // folder slots fill as their expansion tasks complete.
    let mut slots: Vec<Option<DirectoryEntry>> = Vec::new();
    let mut expansions: JoinSet<(usize, String, Result<Vec<DirectoryEntry>>)> = JoinSet::new();

    while let Some(entry) = read_dir
        .next_entry()
        .await
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry
            .file_type()
            .await
            .with_context(|| format!("Failed to stat entry: {}", entry.path().display()))?;

        if file_type.is_dir() {
            let index = slots.len();
            let path = entry.path();
            slots.push(None);
            expansions.spawn(async move { (index, name, expand(path).await) });
        } else {
            slots.push(Some(DirectoryEntry::File { name }));
        }
    }

    let mut first_error = None;
    while let Some(joined) = expansions.join_next().await {
        let (index, name, expanded) = joined.context("Tree expansion task panicked")?;
        match expanded {
            Ok(children) => slots[index] = Some(DirectoryEntry::Folder { name, children }),
            Err(err) => {
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    if let Some(err) = first_error {
        return Err(err);
    }

    // Every folder expansion settled successfully, so every slot is
    // filled at this point.
    Ok(slots
        .into_iter()
        .map(|slot| slot.expect("settled build fills every slot"))
        .collect())
}

/// Boxed indirection so [`build_tree`] can await itself from spawned
/// subtree tasks.
fn expand(dir: PathBuf) -> Pin<Box<dyn Future<Output = Result<Vec<DirectoryEntry>>> + Send>> {
    Box::pin(build_tree(dir))
}
