// libsilica/src/session/dump.rs

//! Resumable full-memory dump spanning several taps.

use log::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::constants::{BLOCK_SIZE, FULL_DUMP_BLOCK_COUNT};
use crate::session::log::ExchangeLog;
use crate::session::read::{
    extract_last_error_command, PartialReadResult, ReadFailure, ReadRequest, ReadResult,
    ReadSession,
};
use crate::transport::Tag;
use crate::types::{Idm, Pmm, ServiceCode, SystemCode};
use crate::{Error, Result};

/// Progress reported after each tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpProgress {
    /// More taps are needed.
    InProgress {
        /// Blocks read so far.
        completed: usize,
        /// Blocks in the target.
        total: usize,
    },
    /// The whole target range was read; the coordinator has been reset.
    Complete(ReadResult),
}

/// Snapshot of the coordinator's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FullDumpState {
    /// The whole target.
    pub block_numbers: Vec<u8>,
    /// Bytes of the blocks read so far.
    pub buffer: Vec<u8>,
    /// Length of the target prefix already read.
    pub completed_blocks: usize,
}

#[derive(Debug, Clone)]
struct TagMetadata {
    idm: Idm,
    pmm: Pmm,
    system_codes: Vec<SystemCode>,
    service_codes: Vec<ServiceCode>,
}

/// Reads a block range across as many taps as it takes.
///
/// `completed_blocks` only grows until the dump finishes or `reset` is
/// called; a prefix of the target that was read is never requested again.
#[derive(Debug, Clone)]
pub struct FullDumpCoordinator {
    target: Vec<u8>,
    buffer: Vec<u8>,
    completed: usize,
    metadata: Option<TagMetadata>,
}

impl Default for FullDumpCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl FullDumpCoordinator {
    /// Dump blocks 0x00..=0xFE.
    pub fn new() -> Self {
        let target = (0..FULL_DUMP_BLOCK_COUNT).map(|n| n as u8).collect();
        Self::from_target(target)
    }

    /// Dump an arbitrary, non-empty list of block numbers.
    pub fn with_target(target: Vec<u8>) -> Result<Self> {
        if target.is_empty() {
            return Err(Error::InvalidRequest("full dump target is empty".into()));
        }
        Ok(Self::from_target(target))
    }

    fn from_target(target: Vec<u8>) -> Self {
        Self {
            buffer: Vec::with_capacity(target.len() * BLOCK_SIZE),
            target,
            completed: 0,
            metadata: None,
        }
    }

    /// Size of the target.
    pub fn total_blocks(&self) -> usize {
        self.target.len()
    }

    /// Blocks read so far.
    pub fn completed_blocks(&self) -> usize {
        self.completed
    }

    /// True once at least one block has been read.
    pub fn is_started(&self) -> bool {
        self.completed > 0
    }

    /// Target suffix still to read.
    pub fn remaining_blocks(&self) -> &[u8] {
        &self.target[self.completed..]
    }

    /// The read to issue on the next tap, or `None` if nothing remains.
    pub fn next_request(&self) -> Option<ReadRequest> {
        let remaining = self.remaining_blocks();
        if remaining.is_empty() {
            None
        } else {
            Some(ReadRequest::new(remaining.to_vec()))
        }
    }

    /// `(completed, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.completed, self.target.len())
    }

    /// Copy of the progress for inspection or persistence.
    pub fn state(&self) -> FullDumpState {
        FullDumpState {
            block_numbers: self.target.clone(),
            buffer: self.buffer.clone(),
            completed_blocks: self.completed,
        }
    }

    /// Drop all progress.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.completed = 0;
        self.metadata = None;
    }

    /// Fold a successful read of `remaining_blocks()` into the dump.
    pub fn record_success(&mut self, result: ReadResult) -> DumpProgress {
        self.metadata = Some(TagMetadata {
            idm: result.idm,
            pmm: result.pmm,
            system_codes: result.system_codes.clone(),
            service_codes: result.service_codes.clone(),
        });
        self.absorb(&result.block_data);
        self.finish_or_report(result.exchanges)
    }

    /// Fold whatever a failed read obtained into the dump.
    pub fn record_failure(&mut self, partial: Option<&PartialReadResult>) -> DumpProgress {
        if let Some(partial) = partial {
            self.metadata = Some(TagMetadata {
                idm: partial.idm,
                pmm: partial.pmm,
                system_codes: partial.system_codes.clone(),
                service_codes: partial.service_codes.clone(),
            });
            self.absorb(&partial.block_data);
        }
        debug!(
            "full dump interrupted at {}/{} blocks",
            self.completed,
            self.target.len()
        );
        DumpProgress::InProgress {
            completed: self.completed,
            total: self.target.len(),
        }
    }

    /// Run one read session for the remaining blocks and fold its outcome
    /// in. On failure the progress is already recorded when the error is
    /// returned.
    pub fn run_tap(
        &mut self,
        tag: &mut dyn Tag,
        config: SessionConfig,
    ) -> std::result::Result<DumpProgress, ReadFailure> {
        let Some(request) = self.next_request() else {
            return Ok(self.finish_or_report(ExchangeLog::new()));
        };
        match ReadSession::new(request).with_config(config).run(tag) {
            Ok(result) => Ok(self.record_success(result)),
            Err(failure) => {
                self.record_failure(failure.partial.as_ref());
                Err(failure)
            }
        }
    }

    /// Append whole blocks from `data`, never past the target.
    fn absorb(&mut self, data: &[u8]) {
        let remaining = self.target.len() - self.completed;
        let blocks = (data.len() / BLOCK_SIZE).min(remaining);
        self.buffer.extend_from_slice(&data[..blocks * BLOCK_SIZE]);
        self.completed += blocks;
    }

    fn finish_or_report(&mut self, exchanges: ExchangeLog) -> DumpProgress {
        if self.completed < self.target.len() {
            return DumpProgress::InProgress {
                completed: self.completed,
                total: self.target.len(),
            };
        }
        let Some(meta) = self.metadata.take() else {
            return DumpProgress::InProgress {
                completed: self.completed,
                total: self.target.len(),
            };
        };

        let block_data = std::mem::take(&mut self.buffer);
        let block_numbers = self.target.clone();
        info!("full dump complete: {} blocks", block_numbers.len());
        self.reset();

        DumpProgress::Complete(ReadResult {
            idm: meta.idm,
            pmm: meta.pmm,
            system_codes: meta.system_codes,
            service_codes: meta.service_codes,
            status_flag1: 0,
            status_flag2: 0,
            last_error_command: extract_last_error_command(&block_numbers, &block_data),
            block_data,
            block_numbers,
            exchanges,
        })
    }
}
