// libsilica/src/protocol/commands/polling.rs

//! Polling (0x00).

use crate::constants::CMD_POLLING;
use crate::types::SystemCode;

/// Encode Polling command payload (FeliCa command code 0x00)
/// Layout: command_code(1) + system_code(2, LE) + request_code(1) + time_slot(1)
pub fn encode_polling(system_code: SystemCode, request_code: u8, time_slot: u8) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + 2 + 1 + 1);
    buf.push(CMD_POLLING);
    buf.extend_from_slice(&system_code.to_le_bytes());
    buf.push(request_code);
    buf.push(time_slot);
    buf
}
