// libsilica/src/protocol/responses/write.rs

//! Write Without Encryption response (0x09).

use crate::constants::{RESP_WRITE_WITHOUT_ENCRYPTION, WRITE_RESPONSE_HEADER_LEN};
use crate::protocol::parser;
use crate::types::Idm;
use crate::Result;

/// Decode WriteWithoutEncryption response frame (response code = 0x09).
/// Layout: len(1) + response_code(1) + idm(8) + status1(1) + status2(1)
///
/// A non-zero status pair is surfaced as `Error::DeviceStatus`.
pub fn decode_write(frame: &[u8]) -> Result<(Idm, (u8, u8))> {
    parser::ensure_len(frame, WRITE_RESPONSE_HEADER_LEN)?;
    parser::expect_response_code(frame, RESP_WRITE_WITHOUT_ENCRYPTION)?;

    let idm = parser::idm_at(frame, 2)?;
    let status = parser::expect_status_ok(frame, 10)?;

    Ok((idm, status))
}
