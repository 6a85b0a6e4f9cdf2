// libsilica/src/protocol/responses/system.rs

//! Request System Code response (0x0D).

use crate::constants::{RESPONSE_HEADER_BASE, RESP_REQUEST_SYSTEM_CODE};
use crate::types::SystemCode;

/// Decode RequestSystemCode response frame (response code = 0x0D)
/// Layout: len(1) + response_code(1) + idm(8) + count(1) + system_codes(N*2, BE)
///
/// Discovery is best-effort: a short or mismatched frame yields an empty
/// list, and a truncated trailing code is dropped.
pub fn decode_request_system_code(frame: &[u8]) -> Vec<SystemCode> {
    if frame.len() < RESPONSE_HEADER_BASE + 1 || frame[1] != RESP_REQUEST_SYSTEM_CODE {
        return Vec::new();
    }

    let count = frame[RESPONSE_HEADER_BASE] as usize;
    frame[RESPONSE_HEADER_BASE + 1..]
        .chunks_exact(2)
        .take(count)
        .map(|pair| SystemCode::from_be_bytes([pair[0], pair[1]]))
        .collect()
}
