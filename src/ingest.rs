//! Archive ingestion via the external fetch-and-extract executable.
//!
//! [`run_ingest`] spawns the configured executable with the submitted
//! URL as its sole argument and captures everything it writes to stdout
//! and stderr. Both pipes are drained by concurrent reader tasks while
//! the child runs; draining only after exit would deadlock once a pipe's
//! OS buffer fills.
//!
//! The outcome is classified purely by exit status — see
//! [`IngestionResult`]. There is no timeout and no retry: a hung
//! executable hangs its invocation, and concurrent invocations are not
//! coordinated.

use anyhow::{bail, Context, Result};
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::config::IngestConfig;
use crate::models::IngestionResult;

/// Run one ingestion invocation for `url`.
///
/// An empty URL is rejected before any process is spawned. Spawn
/// failures (missing or non-executable command) and pipe read failures
/// surface as errors; a child that runs to completion always yields an
/// [`IngestionResult`], whatever its exit code.
pub async fn run_ingest(config: &IngestConfig, url: &str) -> Result<IngestionResult> {
    if url.is_empty() {
        bail!("No URL provided.");
    }

    let mut child = Command::new(&config.command)
        .arg(url)
        .current_dir(config.effective_workdir())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| {
            format!(
                "Failed to spawn ingest command: {}",
                config.command.display()
            )
        })?;

    let mut stdout_pipe = child
        .stdout
        .take()
        .context("Child stdout was not captured")?;
    let mut stderr_pipe = child
        .stderr
        .take()
        .context("Child stderr was not captured")?;

    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stdout_pipe.read_to_end(&mut buf).await.map(|_| buf)
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stderr_pipe.read_to_end(&mut buf).await.map(|_| buf)
    });

    let status = child
        .wait()
        .await
        .context("Failed to wait for ingest command")?;

    let stdout = stdout_task
        .await
        .context("Stdout reader task panicked")?
        .context("Failed to read ingest stdout")?;
    let stderr = stderr_task
        .await
        .context("Stderr reader task panicked")?
        .context("Failed to read ingest stderr")?;

    Ok(IngestionResult {
        // A signal-killed child has no exit code; record it as -1 so it
        // still classifies as a failure.
        exit_code: status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    })
}
