// libsilica/src/protocol/commands/mod.rs

//! Command encoders, one file per command.

pub mod polling;
pub mod read;
pub mod search;
pub mod system;
pub mod write;

pub use polling::encode_polling;
pub use read::encode_read;
pub use search::encode_search_service_code;
pub use system::encode_request_system_code;
pub use write::encode_write;

use crate::constants::{
    CMD_POLLING, CMD_READ_WITHOUT_ENCRYPTION, CMD_REQUEST_SYSTEM_CODE, CMD_SEARCH_SERVICE_CODE,
    CMD_WRITE_WITHOUT_ENCRYPTION,
};
use crate::types::{BlockData, BlockListElement, Idm, ServiceCode, SystemCode};

/// High-level Command enum. New commands should be added here and
/// their per-command encoder placed in `protocol::commands::<name>.rs`.
#[derive(Debug, Clone)]
pub enum Command {
    /// Polling (0x00).
    Polling {
        /// System code to match.
        system_code: SystemCode,
        /// 0 requests no extra data.
        request_code: u8,
        /// Number of response slots minus one.
        time_slot: u8,
    },
    /// Read Without Encryption (0x06).
    ReadWithoutEncryption {
        /// Addressed tag.
        idm: Idm,
        /// Service list, little-endian on the wire.
        services: Vec<ServiceCode>,
        /// At most 12 elements.
        blocks: Vec<BlockListElement>,
    },
    /// Write Without Encryption (0x08), one block.
    WriteWithoutEncryption {
        /// Addressed tag.
        idm: Idm,
        /// Target service.
        service: ServiceCode,
        /// Target block.
        block: BlockListElement,
        /// Block payload.
        data: BlockData,
    },
    /// Request System Code (0x0C).
    RequestSystemCode {
        /// Addressed tag.
        idm: Idm,
    },
    /// Search Service Code (0x0A).
    SearchServiceCode {
        /// Addressed tag.
        idm: Idm,
        /// Zero-based position in the area/service list.
        index: u16,
    },
}

impl Command {
    /// Return the command code as defined by FeliCa.
    pub fn command_code(&self) -> u8 {
        match self {
            Self::Polling { .. } => CMD_POLLING,
            Self::ReadWithoutEncryption { .. } => CMD_READ_WITHOUT_ENCRYPTION,
            Self::WriteWithoutEncryption { .. } => CMD_WRITE_WITHOUT_ENCRYPTION,
            Self::RequestSystemCode { .. } => CMD_REQUEST_SYSTEM_CODE,
            Self::SearchServiceCode { .. } => CMD_SEARCH_SERVICE_CODE,
        }
    }

    /// Encode the command into the raw payload (command code + params),
    /// without the length prefix.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Polling {
                system_code,
                request_code,
                time_slot,
            } => encode_polling(*system_code, *request_code, *time_slot),
            Self::ReadWithoutEncryption {
                idm,
                services,
                blocks,
            } => encode_read(*idm, services, blocks),
            Self::WriteWithoutEncryption {
                idm,
                service,
                block,
                data,
            } => encode_write(*idm, *service, *block, *data),
            Self::RequestSystemCode { idm } => encode_request_system_code(*idm),
            Self::SearchServiceCode { idm, index } => encode_search_service_code(*idm, *index),
        }
    }
}
