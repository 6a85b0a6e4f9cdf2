// libsilica/src/protocol/commands/system.rs

//! Request System Code (0x0C).

use crate::constants::CMD_REQUEST_SYSTEM_CODE;
use crate::types::Idm;

/// Encode RequestSystemCode command (FeliCa command code 0x0C)
/// Layout: command_code(1) + idm(8)
pub fn encode_request_system_code(idm: Idm) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + 8);
    buf.push(CMD_REQUEST_SYSTEM_CODE);
    buf.extend_from_slice(idm.as_bytes());
    buf
}
