// libsilica/src/protocol/commands/search.rs

//! Search Service Code (0x0A).

use crate::constants::CMD_SEARCH_SERVICE_CODE;
use crate::types::Idm;

/// Encode SearchServiceCode command (FeliCa command code 0x0A)
/// Layout: command_code(1) + idm(8) + index(2, LE)
pub fn encode_search_service_code(idm: Idm, index: u16) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + 8 + 2);
    buf.push(CMD_SEARCH_SERVICE_CODE);
    buf.extend_from_slice(idm.as_bytes());
    buf.extend_from_slice(&index.to_le_bytes());
    buf
}
