// libsilica/src/controller.rs

//! Tap-driven controllers: hold the pending request between `start_*` and
//! the next tap, run the matching session, and publish every outcome to a
//! history sink.

use log::{debug, info};

use crate::config::SessionConfig;
use crate::history::{HistoryRecord, HistorySink};
use crate::session::{
    BatchProgress, BatchWriteCoordinator, BatchWriteState, DumpProgress, FullDumpCoordinator,
    ReadFailure, ReadRequest, ReadResult, ReadSession, WriteFailure, WriteRequest, WriteResult,
    WriteSession,
};
use crate::snapshot;
use crate::transport::Tag;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingRead {
    Single(ReadRequest),
    FullDump,
}

/// What a tap produced for a read.
#[derive(Debug)]
pub enum ReadOutcome {
    /// Single read or last dump tap succeeded.
    Completed(ReadResult),
    /// Single read failed; nothing stays armed.
    Failed(ReadFailure),
    /// The full dump needs more taps.
    DumpInProgress {
        /// Blocks read so far.
        completed: usize,
        /// Blocks in the dump target.
        total: usize,
        /// Why this tap stopped short, if it failed.
        failure: Option<ReadFailure>,
    },
}

/// Drives single reads and the resumable full dump.
#[derive(Debug)]
pub struct ReadController<H: HistorySink> {
    history: H,
    config: SessionConfig,
    pending: Option<PendingRead>,
    dump: FullDumpCoordinator,
}

impl<H: HistorySink> ReadController<H> {
    /// Controller with the default config and full 0x00..=0xFE dump.
    pub fn new(history: H) -> Self {
        Self {
            history,
            config: SessionConfig::default(),
            pending: None,
            dump: FullDumpCoordinator::new(),
        }
    }

    /// Config used by every session this controller runs.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the full dump coordinator, e.g. to dump a shorter range.
    pub fn with_dump(mut self, dump: FullDumpCoordinator) -> Self {
        self.dump = dump;
        self
    }

    /// Arm a single read for the next tap.
    pub fn start_reading(&mut self, request: ReadRequest) {
        self.pending = Some(PendingRead::Single(request));
    }

    /// Arm the full dump, resuming from any progress already made.
    pub fn start_full_dump(&mut self) {
        let (completed, total) = self.dump.progress();
        debug!("full dump armed at {}/{} blocks", completed, total);
        self.pending = Some(PendingRead::FullDump);
    }

    /// Drop the pending request. A pending single read is recorded as
    /// cancelled; dump progress is kept and nothing is recorded for it.
    pub fn stop(&mut self) {
        if let Some(PendingRead::Single(request)) = self.pending.take() {
            self.history.record(HistoryRecord::read_cancelled(request));
        }
    }

    /// Drop all full dump progress.
    pub fn reset_full_dump(&mut self) {
        self.dump.reset();
    }

    /// True while a request waits for a tap.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// `(completed, total)` of the full dump.
    pub fn dump_progress(&self) -> (usize, usize) {
        self.dump.progress()
    }

    /// Sink receiving every outcome.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access to the sink.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Handle one tap. Returns `None` when nothing was armed.
    pub fn on_tag(&mut self, tag: &mut dyn Tag) -> Option<ReadOutcome> {
        match self.pending.clone()? {
            PendingRead::Single(request) => {
                self.pending = None;
                Some(self.read_once(request, tag))
            }
            PendingRead::FullDump => Some(self.dump_tap(tag)),
        }
    }

    fn read_once(&mut self, request: ReadRequest, tag: &mut dyn Tag) -> ReadOutcome {
        match ReadSession::new(request.clone())
            .with_config(self.config)
            .run(tag)
        {
            Ok(result) => {
                self.history
                    .record(HistoryRecord::read_success(request, result.clone()));
                ReadOutcome::Completed(result)
            }
            Err(failure) => {
                self.history.record(HistoryRecord::read_error(
                    request,
                    &failure.error.to_string(),
                    failure.exchanges.clone(),
                    failure.partial.clone(),
                ));
                ReadOutcome::Failed(failure)
            }
        }
    }

    /// The dump stays armed until it completes.
    fn dump_tap(&mut self, tag: &mut dyn Tag) -> ReadOutcome {
        let request = self.dump.next_request().unwrap_or_default();
        match self.dump.run_tap(tag, self.config) {
            Ok(DumpProgress::Complete(result)) => {
                self.pending = None;
                let request = ReadRequest::new(result.block_numbers.clone());
                self.history
                    .record(HistoryRecord::read_success(request, result.clone()));
                ReadOutcome::Completed(result)
            }
            Ok(DumpProgress::InProgress { completed, total }) => ReadOutcome::DumpInProgress {
                completed,
                total,
                failure: None,
            },
            Err(failure) => {
                let (completed, total) = self.dump.progress();
                info!("full dump paused at {}/{} blocks", completed, total);
                self.history.record(HistoryRecord::read_error(
                    request,
                    &failure.error.to_string(),
                    failure.exchanges.clone(),
                    failure.partial.clone(),
                ));
                ReadOutcome::DumpInProgress {
                    completed,
                    total,
                    failure: Some(failure),
                }
            }
        }
    }
}

/// What a tap produced for a write.
#[derive(Debug)]
pub enum WriteOutcome {
    /// Every block of the request was written.
    Completed(WriteResult),
    /// The write failed; nothing stays armed.
    Failed(WriteFailure),
    /// Some batch blocks remain; the batch stays armed.
    BatchInProgress {
        /// Progress after this tap.
        state: BatchWriteState,
        /// Why this tap stopped short.
        failure: WriteFailure,
    },
}

/// Drives single writes and resumable batch writes.
#[derive(Debug)]
pub struct WriteController<H: HistorySink> {
    history: H,
    config: SessionConfig,
    pending: Option<WriteRequest>,
    batch: BatchWriteCoordinator,
}

impl<H: HistorySink> WriteController<H> {
    /// Controller with the default config.
    pub fn new(history: H) -> Self {
        Self {
            history,
            config: SessionConfig::default(),
            pending: None,
            batch: BatchWriteCoordinator::new(),
        }
    }

    /// Config used by every session this controller runs.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate `request` and arm it for the next tap. A batch request
    /// starts a new batch, discarding any previous batch progress.
    pub fn start_writing(&mut self, request: WriteRequest) -> Result<()> {
        let blocks = request.payloads()?;
        if let WriteRequest::RawBlockBatch(_) = request {
            self.batch.start(blocks);
        }
        self.pending = Some(request);
        Ok(())
    }

    /// Decode a hex snapshot and arm its blocks as a new batch write.
    /// Returns the number of blocks queued.
    pub fn import_snapshot(&mut self, raw: &str) -> Result<usize> {
        let snapshot = snapshot::decode(raw)?;
        let count = snapshot.blocks.len();
        self.start_writing(snapshot.write_request())?;
        info!("snapshot import armed {} blocks", count);
        Ok(count)
    }

    /// Re-arm an interrupted batch after `stop`. Returns false when no
    /// batch is in progress.
    pub fn resume_batch(&mut self) -> bool {
        match self.batch.pending_request() {
            Some(request) => {
                self.pending = Some(request);
                true
            }
            None => false,
        }
    }

    /// Drop the pending request and record the cancellation. Batch progress
    /// is kept.
    pub fn stop(&mut self) {
        if let Some(request) = self.pending.take() {
            self.history.record(HistoryRecord::write_cancelled(request));
        }
    }

    /// Discard the batch in progress.
    pub fn cancel_batch(&mut self) {
        self.batch.cancel();
        if matches!(self.pending, Some(WriteRequest::RawBlockBatch(_))) {
            self.pending = None;
        }
    }

    /// True while a request waits for a tap.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Progress of the batch in flight, if any.
    pub fn batch_state(&self) -> Option<BatchWriteState> {
        self.batch.state()
    }

    /// Sink receiving every outcome.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access to the sink.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Handle one tap. Returns `None` when nothing was armed.
    pub fn on_tag(&mut self, tag: &mut dyn Tag) -> Option<WriteOutcome> {
        let request = self.pending.clone()?;
        if matches!(request, WriteRequest::RawBlockBatch(_)) && self.batch.is_active() {
            return Some(self.batch_tap(request, tag));
        }

        self.pending = None;
        let outcome = match WriteSession::new(request.clone())
            .with_config(self.config)
            .run(tag)
        {
            Ok(result) => {
                self.history.record(HistoryRecord::write_success(
                    request,
                    result.exchanges.clone(),
                ));
                WriteOutcome::Completed(result)
            }
            Err(failure) => {
                self.history.record(HistoryRecord::write_error(
                    request,
                    &failure.error.to_string(),
                    failure.exchanges.clone(),
                ));
                WriteOutcome::Failed(failure)
            }
        };
        Some(outcome)
    }

    fn batch_tap(&mut self, request: WriteRequest, tag: &mut dyn Tag) -> WriteOutcome {
        match self.batch.run_tap(tag, self.config) {
            Ok(outcome) => {
                self.pending = None;
                let blocks_written = match outcome.progress {
                    BatchProgress::Finished { total } => total,
                    BatchProgress::Resume { completed, .. } => completed,
                };
                self.history.record(HistoryRecord::write_success(
                    request,
                    outcome.exchanges.clone(),
                ));
                WriteOutcome::Completed(WriteResult {
                    blocks_written,
                    exchanges: outcome.exchanges,
                })
            }
            Err(failure) => {
                self.history.record(HistoryRecord::write_error(
                    request,
                    &failure.error.to_string(),
                    failure.exchanges.clone(),
                ));
                match self.batch.state() {
                    Some(state) => {
                        // re-arm with the remaining blocks
                        self.pending = self.batch.pending_request();
                        WriteOutcome::BatchInProgress { state, failure }
                    }
                    None => {
                        self.pending = None;
                        WriteOutcome::Failed(failure)
                    }
                }
            }
        }
    }
}
