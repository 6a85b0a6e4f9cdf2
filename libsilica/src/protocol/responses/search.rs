// libsilica/src/protocol/responses/search.rs

//! Search Service Code response (0x0B).

use crate::constants::{RESPONSE_HEADER_BASE, RESP_SEARCH_SERVICE_CODE};
use crate::protocol::parser;
use crate::types::ServiceCode;
use crate::Result;

/// Decode SearchServiceCode response frame (response code = 0x0B)
/// Layout: len(1) + response_code(1) + idm(8) + [status1(1) + status2(1)]
///         + code(2, LE)
///
/// The status pair is only present when at least four bytes follow the IDm.
/// Termination rules (sentinel, duplicates) belong to the caller.
pub fn decode_search_service_code(frame: &[u8]) -> Result<ServiceCode> {
    parser::ensure_len(frame, RESPONSE_HEADER_BASE + 2)?;
    parser::expect_response_code(frame, RESP_SEARCH_SERVICE_CODE)?;

    let mut offset = RESPONSE_HEADER_BASE;
    if frame.len() - offset >= 4 {
        parser::expect_status_ok(frame, offset)?;
        offset += 2;
    }

    Ok(ServiceCode::new(parser::le_u16_at(frame, offset)?))
}
