// libsilica/src/prelude.rs

//! Common imports: `use libsilica::prelude::*;`.

pub use crate::config::SessionConfig;
pub use crate::controller::{ReadController, ReadOutcome, WriteController, WriteOutcome};
pub use crate::history::{HistoryRecord, HistorySink, MemoryHistory};
pub use crate::protocol::Command;
pub use crate::session::{
    BatchProgress, BatchWriteCoordinator, DumpProgress, ExchangeLog, FullDumpCoordinator,
    PartialReadResult, RawBlockPayload, RawExchange, ReadFailure, ReadRequest, ReadResult,
    ReadSession, WriteFailure, WriteRequest, WriteResult, WriteSession,
};
pub use crate::transport::{Tag, Transport};
pub use crate::{
    Block, BlockData, BlockListElement, Error, Idm, Pmm, Result, ServiceCode, SystemCode,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, parse_hex};
