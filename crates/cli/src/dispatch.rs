//! Turns actions and retention verdicts into tarsnap calls
//!
//! Every step runs to completion before the next begins: create, then list,
//! then classify, then delete. The first failure aborts the run.

use crate::config::Config;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tarsnap::Archiver;
use tracing::{info, warn};
use tsm_core::retention::{self, Classification, Cutoffs};
use tsm_core::ArchiveKind;

/// What an invocation was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create a nightly archive, then expire old ones if enabled
    Nightly,
    /// Create an adhoc archive
    Adhoc,
    /// Report what expiry would delete, without deleting
    ListExpired,
}

/// Whether expiry deletes archives or only reports them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryMode {
    Live,
    DryRun,
}

/// Result of an expiry pass
#[derive(Debug, Clone)]
pub struct ExpiryReport {
    pub cutoffs: Cutoffs,
    /// One entry per nightly archive, in name order
    pub classifications: Vec<Classification>,
    /// Archives actually deleted (always empty in dry-run mode)
    pub deleted: Vec<String>,
}

impl ExpiryReport {
    pub fn expired(&self) -> impl Iterator<Item = &Classification> {
        self.classifications.iter().filter(|c| c.is_expired())
    }

    pub fn kept(&self) -> impl Iterator<Item = &Classification> {
        self.classifications.iter().filter(|c| !c.is_expired())
    }
}

/// What a run did
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Name of the archive created, if any
    pub created: Option<String>,
    /// Expiry pass, if one ran
    pub expiry: Option<ExpiryReport>,
}

/// Drives an [`Archiver`] according to a [`Config`]
pub struct Dispatcher<'a, A: Archiver + ?Sized> {
    archiver: &'a A,
    config: &'a Config,
}

impl<'a, A: Archiver + ?Sized> Dispatcher<'a, A> {
    pub fn new(archiver: &'a A, config: &'a Config) -> Self {
        Self { archiver, config }
    }

    /// Carry out `action` for an invocation whose cutoffs are `cutoffs`
    pub async fn run(&self, action: Action, cutoffs: &Cutoffs) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        match action {
            Action::Nightly => {
                summary.created = Some(self.create(ArchiveKind::Nightly, cutoffs.now).await?);

                if self.config.expire_backups {
                    summary.expiry = Some(self.expire(cutoffs, ExpiryMode::Live).await?);
                } else {
                    info!("Backup expiration disabled");
                }
            }
            Action::Adhoc => {
                summary.created = Some(self.create(ArchiveKind::Adhoc, cutoffs.now).await?);
            }
            Action::ListExpired => {
                summary.expiry = Some(self.expire(cutoffs, ExpiryMode::DryRun).await?);
            }
        }

        Ok(summary)
    }

    /// Create an archive of `kind` named for `now`
    pub async fn create(&self, kind: ArchiveKind, now: NaiveDateTime) -> Result<String> {
        let name = kind.format(now);
        let paths = self.config.backup_paths()?;

        info!("Starting backup {}", name);
        self.archiver
            .create_archive(&name, paths, &self.config.tarsnap_args)
            .await
            .with_context(|| format!("Backup {} failed", name))?;
        info!("Backup finished");

        Ok(name)
    }

    /// Classify every archive against `cutoffs`, deleting the expired ones in
    /// live mode
    pub async fn expire(&self, cutoffs: &Cutoffs, mode: ExpiryMode) -> Result<ExpiryReport> {
        let names = self
            .archiver
            .list_archives()
            .await
            .context("Failed to list archives")?;

        let classifications = retention::evaluate(&names, cutoffs);
        let mut deleted = Vec::new();

        for c in &classifications {
            if c.malformed {
                warn!(
                    "Archive {:?} is not named {}, treating it as expired",
                    c.name,
                    ArchiveKind::Nightly.pattern()
                );
            }

            if mode == ExpiryMode::DryRun {
                continue;
            }

            if c.is_expired() {
                info!("Expiring backup {} ({})", c.name, c.reason);
                self.archiver
                    .delete_archive(&c.name)
                    .await
                    .with_context(|| format!("Failed to delete archive {}", c.name))?;
                deleted.push(c.name.clone());
            } else {
                info!("Keeping backup {} ({})", c.name, c.reason);
            }
        }

        Ok(ExpiryReport {
            cutoffs: *cutoffs,
            classifications,
            deleted,
        })
    }
}
