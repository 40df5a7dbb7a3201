//! In-memory archiver for tests
//!
//! Keeps a set of archive names, records every call, and can be told to fail
//! a given operation.

use crate::{Archiver, ArchiverError, Operation, Result};
use async_trait::async_trait;
use parking_lot::Mutex;

/// A call made against a [`MemoryArchiver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiverCall {
    List,
    Create {
        name: String,
        paths: Vec<String>,
        extra_args: Vec<String>,
    },
    Delete(String),
}

#[derive(Debug, Default)]
struct State {
    archives: Vec<String>,
    calls: Vec<ArchiverCall>,
    fail_on: Option<Operation>,
}

/// Archiver that stores archive names in memory
#[derive(Debug, Default)]
pub struct MemoryArchiver {
    state: Mutex<State>,
}

impl MemoryArchiver {
    /// Start with the given archives already stored
    pub fn with_archives<I, S>(archives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let archiver = Self::default();
        archiver.state.lock().archives = archives.into_iter().map(Into::into).collect();
        archiver
    }

    /// Make every subsequent `op` fail
    pub fn fail_on(&self, op: Operation) {
        self.state.lock().fail_on = Some(op);
    }

    /// Archives currently stored, in insertion order
    pub fn archives(&self) -> Vec<String> {
        self.state.lock().archives.clone()
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<ArchiverCall> {
        self.state.lock().calls.clone()
    }

    /// Names passed to `delete_archive`, in order
    pub fn deleted(&self) -> Vec<String> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                ArchiverCall::Delete(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    fn check(state: &State, op: Operation) -> Result<()> {
        if state.fail_on == Some(op) {
            return Err(ArchiverError::Failed {
                op,
                status: "exit status: 1".to_string(),
                stderr: format!("injected {} failure", op),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Archiver for MemoryArchiver {
    async fn list_archives(&self) -> Result<Vec<String>> {
        let mut state = self.state.lock();
        state.calls.push(ArchiverCall::List);
        Self::check(&state, Operation::List)?;
        Ok(state.archives.clone())
    }

    async fn create_archive(
        &self,
        name: &str,
        paths: &[String],
        extra_args: &[String],
    ) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(ArchiverCall::Create {
            name: name.to_string(),
            paths: paths.to_vec(),
            extra_args: extra_args.to_vec(),
        });
        Self::check(&state, Operation::Create)?;

        if state.archives.iter().any(|existing| existing == name) {
            return Err(ArchiverError::Failed {
                op: Operation::Create,
                status: "exit status: 1".to_string(),
                stderr: format!("tarsnap: An archive already exists with the name \"{}\"", name),
            });
        }

        state.archives.push(name.to_string());
        Ok(())
    }

    async fn delete_archive(&self, name: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(ArchiverCall::Delete(name.to_string()));
        Self::check(&state, Operation::Delete)?;

        let before = state.archives.len();
        state.archives.retain(|existing| existing != name);
        if state.archives.len() == before {
            return Err(ArchiverError::Failed {
                op: Operation::Delete,
                status: "exit status: 1".to_string(),
                stderr: "tarsnap: Archive does not exist".to_string(),
            });
        }
        Ok(())
    }
}
