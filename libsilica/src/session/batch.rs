// libsilica/src/session/batch.rs

//! Resumable multi-block write spanning several taps.

use log::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::session::log::ExchangeLog;
use crate::session::write::{WriteFailure, WriteRequest, WriteSession};
use crate::transport::Tag;
use crate::types::Block;
use crate::Error;

/// Progress of a batch write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatchWriteState {
    /// Blocks in the batch.
    pub total: usize,
    /// Blocks acknowledged so far.
    pub completed: usize,
}

/// Where the batch stands after a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchProgress {
    /// Blocks remain; another tap is needed.
    Resume {
        /// Blocks acknowledged so far.
        completed: usize,
        /// Blocks in the batch.
        total: usize,
    },
    /// Every block was written; the batch has been discarded.
    Finished {
        /// Blocks in the batch.
        total: usize,
    },
}

/// Successful tap of a batch write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Where the batch stands.
    pub progress: BatchProgress,
    /// Exchanges of this tap.
    pub exchanges: ExchangeLog,
}

/// Tracks a raw block batch until every block is acknowledged.
#[derive(Debug, Clone, Default)]
pub struct BatchWriteCoordinator {
    state: Option<BatchWriteState>,
    pending: Vec<Block>,
}

impl BatchWriteCoordinator {
    /// No batch in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new batch, replacing any batch in progress.
    pub fn start(&mut self, blocks: Vec<Block>) {
        self.state = Some(BatchWriteState {
            total: blocks.len(),
            completed: 0,
        });
        self.pending = blocks;
    }

    /// True while a batch has blocks left.
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// `None` when no batch is in progress.
    pub fn state(&self) -> Option<BatchWriteState> {
        self.state
    }

    /// Blocks not yet acknowledged.
    pub fn pending_blocks(&self) -> &[Block] {
        &self.pending
    }

    /// The write to issue on the next tap.
    pub fn pending_request(&self) -> Option<WriteRequest> {
        if self.state.is_none() || self.pending.is_empty() {
            return None;
        }
        Some(WriteRequest::raw_batch(&self.pending))
    }

    /// Every pending block was written.
    pub fn record_success(&mut self) -> BatchProgress {
        let total = self.state.map(|s| s.total).unwrap_or(0);
        info!("batch write complete: {} blocks", total);
        self.cancel();
        BatchProgress::Finished { total }
    }

    /// The tap failed after `completed_payloads` pending blocks were
    /// acknowledged.
    pub fn record_failure(&mut self, completed_payloads: usize) -> BatchProgress {
        let Some(mut state) = self.state else {
            return BatchProgress::Finished { total: 0 };
        };

        let k = completed_payloads.min(self.pending.len());
        state.completed += k;
        self.pending.drain(..k);

        if self.pending.is_empty() {
            return self.record_success();
        }

        self.state = Some(state);
        debug!(
            "batch write interrupted at {}/{} blocks",
            state.completed, state.total
        );
        BatchProgress::Resume {
            completed: state.completed,
            total: state.total,
        }
    }

    /// Discard the batch and its progress.
    pub fn cancel(&mut self) {
        self.state = None;
        self.pending.clear();
    }

    /// Write the pending blocks to the tapped tag and fold the outcome in.
    ///
    /// A failure that still leaves blocks pending is returned as an error
    /// with the batch re-armed for the next tap.
    pub fn run_tap(
        &mut self,
        tag: &mut dyn Tag,
        config: SessionConfig,
    ) -> Result<BatchOutcome, WriteFailure> {
        let Some(request) = self.pending_request() else {
            return Err(WriteFailure {
                error: Error::InvalidRequest("no batch write in progress".into()),
                exchanges: ExchangeLog::new(),
                completed_payloads: 0,
            });
        };

        match WriteSession::new(request).with_config(config).run(tag) {
            Ok(result) => Ok(BatchOutcome {
                progress: self.record_success(),
                exchanges: result.exchanges,
            }),
            Err(failure) => match self.record_failure(failure.completed_payloads) {
                progress @ BatchProgress::Finished { .. } => Ok(BatchOutcome {
                    progress,
                    exchanges: failure.exchanges,
                }),
                BatchProgress::Resume { .. } => Err(failure),
            },
        }
    }
}
