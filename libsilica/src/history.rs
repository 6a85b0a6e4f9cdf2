// libsilica/src/history.rs

//! Operation history: one record per finished, failed or cancelled
//! operation.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::session::{ExchangeLog, PartialReadResult, ReadRequest, ReadResult, WriteRequest};
use crate::types::{Block, Idm};

/// Records kept by `MemoryHistory` before the oldest are evicted.
pub const DEFAULT_HISTORY_CAPACITY: usize = 200;

/// Kind of operation a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Operation {
    /// Single read or full dump.
    Read,
    /// Any write request.
    Write,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Read => f.write_str("read"),
            Operation::Write => f.write_str("write"),
        }
    }
}

/// How the operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Status {
    /// Completed.
    Success,
    /// Failed; the summary carries the error.
    Error,
    /// Stopped before a tap.
    Cancelled,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success => f.write_str("success"),
            Status::Error => f.write_str("error"),
            Status::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Typed data attached to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HistoryPayload {
    /// Successful read.
    Read {
        /// What was asked for.
        request: ReadRequest,
        /// What the tag returned.
        result: ReadResult,
    },
    /// Failed read.
    PartialRead {
        /// What was asked for.
        request: ReadRequest,
        /// Data obtained before the failure.
        partial: Option<PartialReadResult>,
    },
    /// Cancelled read.
    ReadRequest(ReadRequest),
    /// Any write outcome.
    Write(WriteRequest),
}

/// One finished, failed or cancelled operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HistoryRecord {
    /// When the record was made.
    pub timestamp: DateTime<Utc>,
    /// Read or write.
    pub operation: Operation,
    /// Outcome.
    pub status: Status,
    /// One-line description, e.g. `Read success (012E...)`.
    pub summary: String,
    /// Exchange log of the session, empty for cancellations.
    pub exchanges: ExchangeLog,
    /// Typed request and result data.
    pub payload: HistoryPayload,
}

impl HistoryRecord {
    fn now(
        operation: Operation,
        status: Status,
        summary: String,
        exchanges: ExchangeLog,
        payload: HistoryPayload,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            status,
            summary,
            exchanges,
            payload,
        }
    }

    /// `Read success (<IDm>)`.
    pub fn read_success(request: ReadRequest, result: ReadResult) -> Self {
        let summary = format!("Read success ({})", result.formatted_idm());
        let exchanges = result.exchanges.clone();
        Self::now(
            Operation::Read,
            Status::Success,
            summary,
            exchanges,
            HistoryPayload::Read { request, result },
        )
    }

    /// `Read error: <message>`.
    pub fn read_error(
        request: ReadRequest,
        message: &str,
        exchanges: ExchangeLog,
        partial: Option<PartialReadResult>,
    ) -> Self {
        Self::now(
            Operation::Read,
            Status::Error,
            format!("Read error: {}", message),
            exchanges,
            HistoryPayload::PartialRead { request, partial },
        )
    }

    /// `Read cancelled`.
    pub fn read_cancelled(request: ReadRequest) -> Self {
        Self::now(
            Operation::Read,
            Status::Cancelled,
            "Read cancelled".into(),
            ExchangeLog::new(),
            HistoryPayload::ReadRequest(request),
        )
    }

    /// `Write success (<request summary>)`.
    pub fn write_success(request: WriteRequest, exchanges: ExchangeLog) -> Self {
        Self::now(
            Operation::Write,
            Status::Success,
            format!("Write success ({})", request.summary()),
            exchanges,
            HistoryPayload::Write(request),
        )
    }

    /// `Write error: <message>`.
    pub fn write_error(request: WriteRequest, message: &str, exchanges: ExchangeLog) -> Self {
        Self::now(
            Operation::Write,
            Status::Error,
            format!("Write error: {}", message),
            exchanges,
            HistoryPayload::Write(request),
        )
    }

    /// `Write cancelled`.
    pub fn write_cancelled(request: WriteRequest) -> Self {
        Self::now(
            Operation::Write,
            Status::Cancelled,
            "Write cancelled".into(),
            ExchangeLog::new(),
            HistoryPayload::Write(request),
        )
    }

    /// IDm and blocks for a snapshot export. Only successful reads that
    /// carry block data have any.
    pub fn snapshot_blocks(&self) -> Option<(Idm, Vec<Block>)> {
        match &self.payload {
            HistoryPayload::Read { result, .. }
                if !result.block_data.is_empty() && !result.block_numbers.is_empty() =>
            {
                Some((result.idm, result.blocks()))
            }
            _ => None,
        }
    }
}

/// Destination for finished operations.
pub trait HistorySink {
    /// Store or forward one record.
    fn record(&mut self, record: HistoryRecord);
}

impl<T: HistorySink + ?Sized> HistorySink for &mut T {
    fn record(&mut self, record: HistoryRecord) {
        (**self).record(record);
    }
}

/// Bounded in-memory history, oldest evicted first.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    records: VecDeque<HistoryRecord>,
    capacity: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl MemoryHistory {
    /// History holding up to 200 records.
    pub fn new() -> Self {
        Self::default()
    }

    /// History holding up to `capacity` records; 0 keeps none.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    /// Records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing is held.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    /// Newest record.
    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.back()
    }

    /// Blocks of the most recent read that returned any, for snapshot export.
    pub fn latest_snapshot(&self) -> Option<(Idm, Vec<Block>)> {
        self.records.iter().rev().find_map(HistoryRecord::snapshot_blocks)
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl HistorySink for MemoryHistory {
    fn record(&mut self, record: HistoryRecord) {
        if self.capacity == 0 {
            return;
        }
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }
}
