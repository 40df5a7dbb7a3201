//! Archiver backed by the tarsnap(1) binary

use crate::{Archiver, ArchiverError, Operation, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs tarsnap as a child process for each operation
#[derive(Debug, Clone)]
pub struct Tarsnap {
    bin: PathBuf,
}

impl Tarsnap {
    /// Use the tarsnap binary at `bin`
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    /// Run tarsnap with `args`, returning stdout on success
    ///
    /// stderr is captured and attached to the error when tarsnap exits non-zero.
    async fn run(&self, op: Operation, args: &[&str]) -> Result<Vec<u8>> {
        debug!(bin = %self.bin.display(), ?args, "running tarsnap");

        let output = Command::new(&self.bin)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ArchiverError::Spawn {
                op,
                bin: self.bin.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ArchiverError::Failed {
                op,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl Archiver for Tarsnap {
    async fn list_archives(&self) -> Result<Vec<String>> {
        let stdout = self.run(Operation::List, &["--list-archives"]).await?;

        let text = String::from_utf8(stdout).map_err(|e| ArchiverError::Output {
            op: Operation::List,
            reason: e.to_string(),
        })?;

        Ok(parse_archive_list(&text))
    }

    async fn create_archive(
        &self,
        name: &str,
        paths: &[String],
        extra_args: &[String],
    ) -> Result<()> {
        let mut args = vec!["-c", "-f", name];
        args.extend(extra_args.iter().map(String::as_str));
        args.extend(paths.iter().map(String::as_str));

        self.run(Operation::Create, &args).await?;
        Ok(())
    }

    async fn delete_archive(&self, name: &str) -> Result<()> {
        self.run(Operation::Delete, &["-d", "-f", name]).await?;
        Ok(())
    }
}

/// Split `--list-archives` output into names, one per line
///
/// Only the line terminator is removed. Archive names may end in whitespace,
/// and later deletes must target exactly the listed name.
fn parse_archive_list(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
