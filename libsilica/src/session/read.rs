// libsilica/src/session/read.rs

//! One tag contact for a read: polling, code discovery and a chunked block
//! read.

use log::{debug, warn};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::constants::{BLOCK_SIZE, LABEL_READ_WITHOUT_ENCRYPTION, LAST_ERROR_BLOCKS, UNWRITTEN_BYTE};
use crate::protocol::{decode_read, Command};
use crate::session::log::ExchangeLog;
use crate::session::{discovery, exchange, open_transport};
use crate::transport::{close_quietly, Tag, Transport};
use crate::types::{Block, BlockData, BlockListElement, Idm, Pmm, ServiceCode, SystemCode};
use crate::utils::bytes_to_hex_spaced;
use crate::Error;

/// What to read during one tap.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReadRequest {
    /// Blocks to read, in order. Empty means the last-error blocks.
    pub block_numbers: Vec<u8>,
    /// When false only polling and code discovery run.
    pub read_blocks: bool,
}

impl Default for ReadRequest {
    fn default() -> Self {
        Self::last_error_command()
    }
}

impl ReadRequest {
    /// Read `block_numbers`, in order.
    pub fn new(block_numbers: Vec<u8>) -> Self {
        Self {
            block_numbers,
            read_blocks: true,
        }
    }

    /// Read blocks 0xE0/0xE1, which hold the last error command.
    pub fn last_error_command() -> Self {
        Self::new(Vec::new())
    }

    /// Poll and discover codes without reading any block.
    pub fn metadata_only() -> Self {
        Self {
            block_numbers: Vec::new(),
            read_blocks: false,
        }
    }

    /// The block list actually sent to the tag.
    pub fn effective_blocks(&self) -> Vec<u8> {
        if self.block_numbers.is_empty() {
            LAST_ERROR_BLOCKS.to_vec()
        } else {
            self.block_numbers.clone()
        }
    }
}

/// Everything learned from a successful read.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReadResult {
    /// IDm from polling.
    pub idm: Idm,
    /// PMm from polling.
    pub pmm: Pmm,
    /// Codes from Request System Code, empty if discovery failed.
    pub system_codes: Vec<SystemCode>,
    /// Codes found by Search Service Code.
    pub service_codes: Vec<ServiceCode>,
    /// Status flags of the last Read response.
    pub status_flag1: u8,
    /// Always 0 on success.
    pub status_flag2: u8,
    /// Concatenated payload, `block_numbers.len() * 16` bytes
    pub block_data: Vec<u8>,
    /// Blocks read, matching `block_data`.
    pub block_numbers: Vec<u8>,
    /// Command recovered from blocks 0xE0/0xE1, if that was the read.
    pub last_error_command: Vec<u8>,
    /// Every exchange of the session.
    pub exchanges: ExchangeLog,
}

impl ReadResult {
    /// IDm as uppercase hex.
    pub fn formatted_idm(&self) -> String {
        self.idm.to_hex()
    }

    /// PMm as uppercase hex.
    pub fn formatted_pmm(&self) -> String {
        self.pmm.to_hex()
    }

    /// Spaced hex, empty when there is none.
    pub fn formatted_last_error_command(&self) -> String {
        bytes_to_hex_spaced(&self.last_error_command)
    }

    /// Pair each block number with its 16-byte payload.
    pub fn blocks(&self) -> Vec<Block> {
        pair_blocks(&self.block_numbers, &self.block_data)
    }
}

/// What was known when a read failed after polling.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartialReadResult {
    /// IDm from polling.
    pub idm: Idm,
    /// PMm from polling.
    pub pmm: Pmm,
    /// Codes discovered before the failure.
    pub system_codes: Vec<SystemCode>,
    /// Codes discovered before the failure.
    pub service_codes: Vec<ServiceCode>,
    /// Every block the session was asked to read
    pub block_numbers: Vec<u8>,
    /// Payload received before the failure, a prefix of `block_numbers`
    pub block_data: Vec<u8>,
}

impl PartialReadResult {
    /// Number of whole blocks in `block_data`.
    pub fn completed_blocks(&self) -> usize {
        self.block_data.len() / BLOCK_SIZE
    }

    /// The blocks that were actually received, with their payloads.
    pub fn blocks(&self) -> Vec<Block> {
        pair_blocks(&self.block_numbers, &self.block_data)
    }
}

/// Read failure carrying the exchange log and whatever was obtained.
#[derive(Debug, Error)]
#[error("read failed: {error}")]
pub struct ReadFailure {
    /// What stopped the session.
    #[source]
    pub error: Error,
    /// Exchanges up to and including the failing one.
    pub exchanges: ExchangeLog,
    /// `None` when the session failed before polling completed
    pub partial: Option<PartialReadResult>,
}

fn pair_blocks(numbers: &[u8], data: &[u8]) -> Vec<Block> {
    numbers
        .iter()
        .zip(data.chunks_exact(BLOCK_SIZE))
        .filter_map(|(&n, chunk)| BlockData::try_from(chunk).ok().map(|d| Block::new(n, d)))
        .collect()
}

/// Extract the last error command stored in blocks 0xE0/0xE1.
///
/// The first byte is the command length, clamped to the bytes available.
/// Any other block list, an empty payload or an unwritten (all 0xFF) payload
/// yields an empty command.
pub fn extract_last_error_command(block_numbers: &[u8], data: &[u8]) -> Vec<u8> {
    if block_numbers != LAST_ERROR_BLOCKS || data.is_empty() {
        return Vec::new();
    }
    if data.iter().all(|&b| b == UNWRITTEN_BYTE) {
        return Vec::new();
    }
    let len = usize::from(data[0]).min(data.len() - 1);
    data[1..1 + len].to_vec()
}

type SessionError = (Error, Option<PartialReadResult>);

/// One read session, consumed by `run`.
#[derive(Debug, Clone)]
pub struct ReadSession {
    request: ReadRequest,
    config: SessionConfig,
}

impl ReadSession {
    /// Session with the default config.
    pub fn new(request: ReadRequest) -> Self {
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

    /// Drive the whole session against one tapped tag. The transport is
    /// closed on every exit path.
    pub fn run(self, tag: &mut dyn Tag) -> Result<ReadResult, ReadFailure> {
        let mut log = ExchangeLog::new();
        let transport = match open_transport(tag) {
            Ok(t) => t,
            Err(error) => {
                warn!("read aborted: {}", error);
                return Err(ReadFailure {
                    error,
                    exchanges: log,
                    partial: None,
                });
            }
        };

        let outcome = self.execute(transport, &mut log);
        close_quietly(transport);

        match outcome {
            Ok(mut result) => {
                debug!(
                    "read complete: {} blocks, {} exchanges",
                    result.block_numbers.len(),
                    log.len()
                );
                result.exchanges = log;
                Ok(result)
            }
            Err((error, partial)) => {
                warn!("read aborted: {}", error);
                Err(ReadFailure {
                    error,
                    exchanges: log,
                    partial,
                })
            }
        }
    }

    fn execute(
        &self,
        transport: &mut dyn Transport,
        log: &mut ExchangeLog,
    ) -> Result<ReadResult, SessionError> {
        transport.connect().map_err(|e| (Error::Io(e), None))?;
        transport.set_timeout(self.config.timeout_ms);

        let (idm, pmm) = discovery::poll(transport, log, self.config.polling_system_code)
            .map_err(|e| (e, None))?;
        let system_codes = discovery::request_system_codes(transport, log, idm);
        let service_codes = discovery::search_service_codes(
            transport,
            log,
            idm,
            self.config.service_search_limit(),
        );

        if !self.request.read_blocks {
            return Ok(ReadResult {
                idm,
                pmm,
                system_codes,
                service_codes,
                status_flag1: 0,
                status_flag2: 0,
                block_data: Vec::new(),
                block_numbers: Vec::new(),
                last_error_command: Vec::new(),
                exchanges: ExchangeLog::new(),
            });
        }

        let block_numbers = self.request.effective_blocks();
        let mut block_data = Vec::with_capacity(block_numbers.len() * BLOCK_SIZE);

        match self.read_chunks(transport, log, idm, &block_numbers, &mut block_data) {
            Ok((status_flag1, status_flag2)) => {
                let last_error_command = extract_last_error_command(&block_numbers, &block_data);
                Ok(ReadResult {
                    idm,
                    pmm,
                    system_codes,
                    service_codes,
                    status_flag1,
                    status_flag2,
                    block_data,
                    block_numbers,
                    last_error_command,
                    exchanges: ExchangeLog::new(),
                })
            }
            Err(error) => Err((
                error,
                Some(PartialReadResult {
                    idm,
                    pmm,
                    system_codes,
                    service_codes,
                    block_numbers,
                    block_data,
                }),
            )),
        }
    }

    /// Read `blocks` in chunks of at most `max_blocks_per_command`,
    /// appending every payload byte received to `data`. Returns the status
    /// flags of the last response.
    fn read_chunks(
        &self,
        transport: &mut dyn Transport,
        log: &mut ExchangeLog,
        idm: Idm,
        blocks: &[u8],
        data: &mut Vec<u8>,
    ) -> crate::Result<(u8, u8)> {
        let mut status = (0, 0);
        for chunk in blocks.chunks(self.config.blocks_per_command()) {
            let cmd = Command::ReadWithoutEncryption {
                idm,
                services: vec![self.config.service_code],
                blocks: chunk.iter().copied().map(BlockListElement::new).collect(),
            };
            let response = exchange(transport, log, LABEL_READ_WITHOUT_ENCRYPTION, &cmd)?;
            let decoded = decode_read(&response)?;

            let wanted = chunk.len() * BLOCK_SIZE;
            if decoded.data.len() < wanted {
                data.extend_from_slice(&decoded.data);
                return Err(Error::IncompletePayload {
                    expected: wanted,
                    actual: decoded.data.len(),
                });
            }
            data.extend_from_slice(&decoded.data[..wanted]);
            status = (decoded.status1, decoded.status2);
        }
        Ok(status)
    }
}
