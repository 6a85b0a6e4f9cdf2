// libsilica/src/protocol/responses/polling.rs

//! Polling response (0x01).

use crate::constants::{IDM_LEN, POLLING_RESPONSE_MIN_LEN, RESP_POLLING};
use crate::protocol::parser;
use crate::types::{Idm, Pmm};
use crate::Result;

/// Decode a Polling response frame (response code = 0x01)
/// Layout: len(1) + response_code(1) + idm(8) + pmm(8) [+ request data]
pub fn decode_polling(frame: &[u8]) -> Result<(Idm, Pmm)> {
    parser::ensure_len(frame, POLLING_RESPONSE_MIN_LEN)?;
    parser::expect_response_code(frame, RESP_POLLING)?;

    let idm = parser::idm_at(frame, 2)?;
    let pmm = parser::pmm_at(frame, 2 + IDM_LEN)?;

    Ok((idm, pmm))
}
