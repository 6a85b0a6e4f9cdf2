// libsilica/src/protocol/commands/write.rs

//! Write Without Encryption (0x08).

use crate::constants::CMD_WRITE_WITHOUT_ENCRYPTION;
use crate::types::{BlockData, BlockListElement, Idm, ServiceCode};

/// Encode WriteWithoutEncryption command payload (FeliCa command code 0x08)
/// Layout: command_code(1) + idm(8) + service_count(1)=1 + service_code(2, LE)
///         + block_count(1)=1 + block_list_element(2) + block_data(16)
///
/// One command always writes exactly one block.
pub fn encode_write(
    idm: Idm,
    service: ServiceCode,
    block: BlockListElement,
    data: BlockData,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + 8 + 1 + 2 + 1 + 2 + 16);
    buf.push(CMD_WRITE_WITHOUT_ENCRYPTION);
    buf.extend_from_slice(idm.as_bytes());

    buf.push(0x01);
    buf.extend_from_slice(&service.to_le_bytes());

    buf.push(0x01);
    buf.extend_from_slice(&block.encode());

    buf.extend_from_slice(data.as_bytes());
    buf
}
