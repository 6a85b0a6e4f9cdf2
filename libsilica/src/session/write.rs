// libsilica/src/session/write.rs

//! One tag contact for a write: derive the block payloads from a typed
//! request and issue one write command per block.

use log::{debug, warn};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::constants::{
    BLOCK_IDM, BLOCK_SERVICE_CODES, BLOCK_SIZE, BLOCK_SYSTEM_CODES, DEFAULT_PMM, IDM_LEN,
    LABEL_WRITE_WITHOUT_ENCRYPTION, MAX_CODES_PER_BLOCK, PMM_LEN,
};
use crate::protocol::{decode_write, Command};
use crate::session::log::ExchangeLog;
use crate::session::{exchange, open_transport};
use crate::transport::{close_quietly, Tag, Transport};
use crate::types::{Block, BlockData, BlockListElement, Idm};
use crate::{Error, Result};

/// A caller-supplied block number and payload, validated before use.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawBlockPayload {
    /// Target block. Must fit in one byte.
    pub block_number: u16,
    /// Payload, exactly 16 bytes.
    pub data: Vec<u8>,
}

impl RawBlockPayload {
    /// Unvalidated until the request is started.
    pub fn new(block_number: u16, data: Vec<u8>) -> Self {
        Self { block_number, data }
    }

    fn to_block(&self) -> Result<Block> {
        let number = u8::try_from(self.block_number).map_err(|_| {
            Error::InvalidRequest(format!("block number {} out of range", self.block_number))
        })?;
        let data = BlockData::try_from(self.data.as_slice()).map_err(|_| {
            Error::InvalidRequest(format!(
                "block {:#04x} payload must be {} bytes, got {}",
                number,
                BLOCK_SIZE,
                self.data.len()
            ))
        })?;
        Ok(Block::new(number, data))
    }
}

impl From<Block> for RawBlockPayload {
    fn from(block: Block) -> Self {
        Self::new(u16::from(block.number), block.data.as_bytes().to_vec())
    }
}

/// What to write during one tap.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WriteRequest {
    /// Rewrite the emulated IDm and PMm (block 0x83). A missing or
    /// mis-sized PMm falls back to the default.
    Identity {
        /// Must be exactly 8 bytes.
        idm: Vec<u8>,
        /// Falls back to `00 01 FF FF FF FF FF FF`.
        pmm: Option<Vec<u8>>,
    },
    /// System code table (block 0x85, big-endian)
    SystemCodes(Vec<u16>),
    /// Service code table (block 0x84, little-endian)
    ServiceCodes(Vec<u16>),
    /// One caller-supplied block.
    RawBlock(RawBlockPayload),
    /// Blocks written in order, resumable across taps.
    RawBlockBatch(Vec<RawBlockPayload>),
}

impl WriteRequest {
    /// Batch request covering `blocks`, in order.
    pub fn raw_batch(blocks: &[Block]) -> Self {
        Self::RawBlockBatch(blocks.iter().copied().map(RawBlockPayload::from).collect())
    }

    /// Derive the (block number, payload) pairs to write.
    ///
    /// Every validation failure is reported here, before any I/O.
    pub fn payloads(&self) -> Result<Vec<Block>> {
        match self {
            Self::Identity { idm, pmm } => {
                if idm.len() != IDM_LEN {
                    return Err(Error::InvalidRequest(format!(
                        "IDm must be {} bytes, got {}",
                        IDM_LEN,
                        idm.len()
                    )));
                }
                let pmm = match pmm {
                    Some(p) if p.len() == PMM_LEN => p.as_slice(),
                    _ => &DEFAULT_PMM[..],
                };
                let mut payload = [0u8; BLOCK_SIZE];
                payload[..IDM_LEN].copy_from_slice(idm);
                payload[IDM_LEN..].copy_from_slice(pmm);
                Ok(vec![Block::new(BLOCK_IDM, BlockData::from_bytes(payload))])
            }
            Self::SystemCodes(codes) => {
                let payload = pack_codes("system", codes, u16::to_be_bytes)?;
                Ok(vec![Block::new(BLOCK_SYSTEM_CODES, payload)])
            }
            Self::ServiceCodes(codes) => {
                let payload = pack_codes("service", codes, u16::to_le_bytes)?;
                Ok(vec![Block::new(BLOCK_SERVICE_CODES, payload)])
            }
            Self::RawBlock(raw) => Ok(vec![raw.to_block()?]),
            Self::RawBlockBatch(batch) => {
                if batch.is_empty() {
                    return Err(Error::InvalidRequest("empty block batch".into()));
                }
                batch.iter().map(RawBlockPayload::to_block).collect()
            }
        }
    }

    /// Number of write commands this request needs.
    pub fn block_count(&self) -> usize {
        match self {
            Self::RawBlockBatch(batch) => batch.len(),
            _ => 1,
        }
    }

    /// Short human-readable description for history entries.
    pub fn summary(&self) -> String {
        match self {
            Self::Identity { .. } => format!("IDm/PMm → block {:#04x}", BLOCK_IDM),
            Self::SystemCodes(codes) => {
                format!("{} system codes → block {:#04x}", codes.len(), BLOCK_SYSTEM_CODES)
            }
            Self::ServiceCodes(codes) => {
                format!("{} service codes → block {:#04x}", codes.len(), BLOCK_SERVICE_CODES)
            }
            Self::RawBlock(raw) => format!("raw block {:#04x}", raw.block_number),
            Self::RawBlockBatch(batch) => format!("{} raw blocks", batch.len()),
        }
    }
}

fn pack_codes(kind: &str, codes: &[u16], to_bytes: fn(u16) -> [u8; 2]) -> Result<BlockData> {
    if codes.len() > MAX_CODES_PER_BLOCK {
        return Err(Error::InvalidRequest(format!(
            "at most {} {} codes fit in one block, got {}",
            MAX_CODES_PER_BLOCK,
            kind,
            codes.len()
        )));
    }
    let mut payload = [0u8; BLOCK_SIZE];
    for (slot, &code) in payload.chunks_exact_mut(2).zip(codes) {
        slot.copy_from_slice(&to_bytes(code));
    }
    Ok(BlockData::from_bytes(payload))
}

/// Successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WriteResult {
    /// Blocks acknowledged by the tag.
    pub blocks_written: usize,
    /// Every exchange of the session.
    pub exchanges: ExchangeLog,
}

/// Write failure. `completed_payloads` blocks were acknowledged by the tag
/// before `error`.
#[derive(Debug, Error)]
#[error("write failed after {completed_payloads} blocks: {error}")]
pub struct WriteFailure {
    /// What stopped the session.
    #[source]
    pub error: Error,
    /// Exchanges up to and including the failing one.
    pub exchanges: ExchangeLog,
    /// Blocks acknowledged before the failure.
    pub completed_payloads: usize,
}

/// One write session, consumed by `run`.
#[derive(Debug, Clone)]
pub struct WriteSession {
    request: WriteRequest,
    config: SessionConfig,
}

impl WriteSession {
    /// Session with the default config.
    pub fn new(request: WriteRequest) -> Self {
        Self {
            request,
            config: SessionConfig::default(),
        }
    }

    /// Override limits, timeout and addressed service.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Write every payload to the tapped tag, stopping at the first failure.
    pub fn run(self, tag: &mut dyn Tag) -> std::result::Result<WriteResult, WriteFailure> {
        let mut log = ExchangeLog::new();
        let fail = |error: Error, exchanges: ExchangeLog, completed_payloads: usize| {
            warn!("write aborted after {} blocks: {}", completed_payloads, error);
            WriteFailure {
                error,
                exchanges,
                completed_payloads,
            }
        };

        let blocks = match self.request.payloads() {
            Ok(blocks) => blocks,
            Err(error) => return Err(fail(error, log, 0)),
        };

        let tag_id = tag.id().to_vec();
        let transport = match open_transport(tag) {
            Ok(t) => t,
            Err(error) => return Err(fail(error, log, 0)),
        };

        let mut completed = 0;
        let outcome = self.execute(transport, &mut log, &tag_id, &blocks, &mut completed);
        close_quietly(transport);

        match outcome {
            Ok(()) => {
                debug!("write complete: {} blocks", completed);
                Ok(WriteResult {
                    blocks_written: completed,
                    exchanges: log,
                })
            }
            Err(error) => Err(fail(error, log, completed)),
        }
    }

    fn execute(
        &self,
        transport: &mut dyn Transport,
        log: &mut ExchangeLog,
        tag_id: &[u8],
        blocks: &[Block],
        completed: &mut usize,
    ) -> Result<()> {
        transport.connect()?;
        transport.set_timeout(self.config.timeout_ms);
        let idm = Idm::try_from(tag_id)?;

        for block in blocks {
            let cmd = Command::WriteWithoutEncryption {
                idm,
                service: self.config.service_code,
                block: BlockListElement::new(block.number),
                data: block.data,
            };
            let response = exchange(transport, log, LABEL_WRITE_WITHOUT_ENCRYPTION, &cmd)?;
            decode_write(&response)?;
            *completed += 1;
        }
        Ok(())
    }
}
