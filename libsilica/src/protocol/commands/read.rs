// libsilica/src/protocol/commands/read.rs

//! Read Without Encryption (0x06).

use crate::constants::CMD_READ_WITHOUT_ENCRYPTION;
use crate::types::{BlockListElement, Idm, ServiceCode};

/// Encode ReadWithoutEncryption command payload (FeliCa command code 0x06)
/// Layout: command_code(1) + idm(8) + service_count(1) + service_code_list(2*N, LE)
///         + block_count(1) + block_list(2*M)
///
/// The codec does not enforce the per-command block limit; callers chunk.
pub fn encode_read(idm: Idm, services: &[ServiceCode], blocks: &[BlockListElement]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + 8 + 1 + services.len() * 2 + 1 + blocks.len() * 2);
    buf.push(CMD_READ_WITHOUT_ENCRYPTION);
    buf.extend_from_slice(idm.as_bytes());
    buf.push(services.len() as u8);

    for svc in services {
        buf.extend_from_slice(&svc.to_le_bytes());
    }

    buf.push(blocks.len() as u8);
    for blk in blocks {
        buf.extend_from_slice(&blk.encode());
    }

    buf
}
