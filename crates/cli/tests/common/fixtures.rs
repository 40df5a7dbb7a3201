//! Test setup: a scratch directory holding a `.tsmrc` and a scripted tarsnap
//!
//! The fake tarsnap keeps its archive list in `archives` (one name per line),
//! appends every invocation's arguments to `calls.log`, and fails an operation
//! (`list`, `create` or `delete`) when a `fail-<op>` file exists.

use anyhow::{Context, Result};
use chrono::{Days, Local};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_TARSNAP: &str = r#"#!/bin/sh
state='@STATE@'
echo "$*" >> "$state/calls.log"
case "$1" in
  --list-archives) op=list ;;
  -c) op=create ;;
  -d) op=delete ;;
  *) echo "tarsnap: unrecognized option $1" >&2; exit 2 ;;
esac
if [ -e "$state/fail-$op" ]; then
  echo "tarsnap: simulated $op failure" >&2
  exit 1
fi
case "$op" in
  list) cat "$state/archives" ;;
  create) echo "$3" >> "$state/archives" ;;
  delete)
    grep -vxF "$3" "$state/archives" > "$state/archives.tmp"
    mv "$state/archives.tmp" "$state/archives"
    ;;
esac
"#;

/// Scratch directory with a fake tarsnap installed
pub struct TestSetup {
    dir: TempDir,
}

impl TestSetup {
    /// Create a setup whose tarsnap already holds `archives`
    pub fn new(archives: &[&str]) -> Result<Self> {
        let dir = TempDir::new().context("Failed to create temp dir")?;
        let setup = Self { dir };

        let script = FAKE_TARSNAP.replace("@STATE@", &setup.path().display().to_string());
        let bin = setup.tarsnap_bin();
        fs::write(&bin, script)?;
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755))?;

        let mut listing = archives.join("\n");
        if !listing.is_empty() {
            listing.push('\n');
        }
        fs::write(setup.path().join("archives"), listing)?;

        Ok(setup)
    }

    /// Working directory for `tsm`
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn tarsnap_bin(&self) -> PathBuf {
        self.path().join("tarsnap")
    }

    /// Write `.tsmrc` with the fake tarsnap, a backup dir, and `settings`
    pub fn write_config(&self, settings: &str) -> Result<()> {
        self.write_config_at(".tsmrc", settings)
    }

    /// Like [`write_config`](Self::write_config), at a custom file name
    pub fn write_config_at(&self, file_name: &str, settings: &str) -> Result<()> {
        let config = format!(
            "TarsnapBin = \"{}\"\nTarsnapArgs = [\"--one-file-system\"]\nBackupDirs = [\"/srv/data\"]\n{}\n",
            self.tarsnap_bin().display(),
            settings
        );
        fs::write(self.path().join(file_name), config)?;
        Ok(())
    }

    /// Make the given tarsnap operation fail from now on
    pub fn fail(&self, op: &str) -> Result<()> {
        fs::write(self.path().join(format!("fail-{}", op)), "")?;
        Ok(())
    }

    /// Archives tarsnap currently holds
    pub fn archives(&self) -> Result<Vec<String>> {
        read_lines(&self.path().join("archives"))
    }

    /// Arguments of every tarsnap invocation, one line per call
    pub fn calls(&self) -> Result<Vec<String>> {
        let log = self.path().join("calls.log");
        if !log.exists() {
            return Ok(Vec::new());
        }
        read_lines(&log)
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Nightly archive name for `days` days before today
pub fn nightly_days_ago(days: u64) -> String {
    let date = Local::now().naive_local() - Days::new(days);
    tsm_core::ArchiveKind::Nightly.format(date)
}
