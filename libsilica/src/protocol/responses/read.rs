// libsilica/src/protocol/responses/read.rs

//! Read Without Encryption response (0x07).

use crate::constants::{BLOCK_SIZE, READ_RESPONSE_HEADER_LEN, RESP_READ_WITHOUT_ENCRYPTION};
use crate::protocol::parser;
use crate::types::{BlockData, Idm};
use crate::{Error, Result};

/// Decoded ReadWithoutEncryption response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadResponse {
    /// IDm echoed by the tag.
    pub idm: Idm,
    /// Status flag 1.
    pub status1: u8,
    /// Status flag 2.
    pub status2: u8,
    /// Block count byte.
    pub block_count: usize,
    /// `block_count * 16` bytes of block payload
    pub data: Vec<u8>,
}

impl ReadResponse {
    /// The payload split into 16-byte blocks.
    pub fn blocks(&self) -> impl Iterator<Item = BlockData> + '_ {
        self.data.chunks_exact(BLOCK_SIZE).map(|chunk| {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            BlockData::from_bytes(block)
        })
    }
}

/// Decode ReadWithoutEncryption response frame (response code = 0x07)
/// Layout: len(1) + response_code(1) + idm(8) + status1(1) + status2(1)
///         + block_count(1) + blocks(N*16)
pub fn decode_read(frame: &[u8]) -> Result<ReadResponse> {
    parser::ensure_len(frame, READ_RESPONSE_HEADER_LEN)?;
    parser::expect_response_code(frame, RESP_READ_WITHOUT_ENCRYPTION)?;

    let idm = parser::idm_at(frame, 2)?;
    let (status1, status2) = parser::expect_status_ok(frame, 10)?;

    let block_count = parser::byte_at(frame, 12)? as usize;
    let expected = block_count * BLOCK_SIZE;
    let available = frame.len() - READ_RESPONSE_HEADER_LEN;
    if available < expected {
        return Err(Error::IncompletePayload {
            expected,
            actual: available,
        });
    }

    let data = frame[READ_RESPONSE_HEADER_LEN..READ_RESPONSE_HEADER_LEN + expected].to_vec();

    Ok(ReadResponse {
        idm,
        status1,
        status2,
        block_count,
        data,
    })
}
