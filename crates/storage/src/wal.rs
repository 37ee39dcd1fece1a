// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead log for durable storage
//!
//! Several handles, in one process or many, may share a log file. A handle
//! takes the exclusive file lock, reads whatever other handles appended since
//! its last read, and only then appends. Appends from a handle that has not
//! caught up are refused.

use dw_core::Operation;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur in WAL operations
#[derive(Debug, Error)]
pub enum WalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error at line {line}: {source}")]
    Json {
        line: u64,
        source: serde_json::Error,
    },
    #[error("JSON error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("log has entries this handle has not read")]
    Behind,
    #[error("log is shorter than the {read} bytes already read")]
    Shrunk { read: u64 },
}

/// Write-ahead log for durable operation storage
pub struct Wal {
    file: File,
    /// Bytes of complete lines this handle has read or written
    offset: u64,
    /// Lines consumed so far, for error positions
    lines: u64,
    sequence: u64,
}

/// Exclusive lock on a log file, released on drop
pub struct WalLock {
    file: File,
}

impl Drop for WalLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(error = %e, "failed to unlock item log");
        }
    }
}

impl Wal {
    /// Open or create a WAL at the given path
    ///
    /// Nothing is read yet; call `read_new` to consume existing entries.
    pub fn open(path: &Path) -> Result<Self, WalError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(path)?;

        Ok(Self {
            file,
            offset: 0,
            lines: 0,
            sequence: 0,
        })
    }

    /// Block until this handle holds the log exclusively
    pub fn lock(&self) -> Result<WalLock, WalError> {
        let file = self.file.try_clone()?;
        FileExt::lock_exclusive(&file)?;
        Ok(WalLock { file })
    }

    /// Read the operations appended since this handle last read or wrote
    ///
    /// Callers must hold the lock. An unterminated last line can then only
    /// be left over from a writer that died mid-append, so it is cut off.
    pub fn read_new(&mut self) -> Result<Vec<Operation>, WalError> {
        let len = self.file.metadata()?.len();
        if len < self.offset {
            return Err(WalError::Shrunk { read: self.offset });
        }

        let mut buf = Vec::new();
        self.file.seek(SeekFrom::Start(self.offset))?;
        (&self.file).take(len - self.offset).read_to_end(&mut buf)?;

        let complete = buf.iter().rposition(|b| *b == b'\n').map_or(0, |i| i + 1);
        if complete < buf.len() {
            tracing::warn!(
                bytes = buf.len() - complete,
                "dropping unterminated entry at end of item log"
            );
            self.file.set_len(self.offset + complete as u64)?;
        }

        let mut ops = Vec::new();
        let mut lines = self.lines;
        for line in buf[..complete].split_inclusive(|b| *b == b'\n') {
            lines += 1;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            let entry: WalEntry =
                serde_json::from_slice(line).map_err(|source| WalError::Json { line: lines, source })?;
            ops.push(entry.op);
        }

        self.offset += complete as u64;
        self.lines = lines;
        self.sequence += ops.len() as u64;
        Ok(ops)
    }

    /// Append an operation to the log
    ///
    /// On failure the log is cut back to its previous length, so an
    /// operation is either durably logged or absent.
    pub fn append(&mut self, op: &Operation) -> Result<u64, WalError> {
        if self.file.metadata()?.len() != self.offset {
            return Err(WalError::Behind);
        }

        let entry = WalEntry {
            seq: self.sequence + 1,
            op: op.clone(),
        };
        let mut line = serde_json::to_vec(&entry)?;
        line.push(b'\n');

        if let Err(e) = self.write_synced(&line) {
            // If this fails too the entry stays and the next read_new applies it
            if let Err(cut) = self.file.set_len(self.offset) {
                tracing::warn!(error = %cut, "failed to roll back partial log entry");
            }
            return Err(e.into());
        }

        self.offset += line.len() as u64;
        self.lines += 1;
        self.sequence += 1;
        Ok(self.sequence)
    }

    fn write_synced(&mut self, line: &[u8]) -> io::Result<()> {
        self.file.write_all(line)?;
        self.file.sync_all()
    }

    /// Entries read or written by this handle
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct WalEntry {
    seq: u64,
    op: Operation,
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
