// libsilica/src/constants.rs
//! Common protocol constants used across the crate

/// Polling command code
pub const CMD_POLLING: u8 = 0x00;
/// Polling response code
pub const RESP_POLLING: u8 = 0x01;

/// Read Without Encryption command code
pub const CMD_READ_WITHOUT_ENCRYPTION: u8 = 0x06;
/// Read Without Encryption response code
pub const RESP_READ_WITHOUT_ENCRYPTION: u8 = 0x07;

/// Write Without Encryption command code
pub const CMD_WRITE_WITHOUT_ENCRYPTION: u8 = 0x08;
/// Write Without Encryption response code
pub const RESP_WRITE_WITHOUT_ENCRYPTION: u8 = 0x09;

/// Search Service Code command code
pub const CMD_SEARCH_SERVICE_CODE: u8 = 0x0A;
/// Search Service Code response code
pub const RESP_SEARCH_SERVICE_CODE: u8 = 0x0B;

/// Request System Code command code
pub const CMD_REQUEST_SYSTEM_CODE: u8 = 0x0C;
/// Request System Code response code
pub const RESP_REQUEST_SYSTEM_CODE: u8 = 0x0D;

/// IDm length in bytes
pub const IDM_LEN: usize = 8;
/// PMm length in bytes
pub const PMM_LEN: usize = 8;

/// Size of one FeliCa block in bytes
pub const BLOCK_SIZE: usize = 16;

/// Block list element access mode (2-byte element, direct access)
pub const BLOCK_LIST_ACCESS_MODE: u8 = 0x80;

/// Largest frame the one-byte length prefix can describe
pub const MAX_FRAME_LEN: usize = 0xFF;

/// Offset of the first byte after `[len][code][idm]` in a response frame
pub const RESPONSE_HEADER_BASE: usize = 2 + IDM_LEN;

/// Read response header: len + code + idm + status1 + status2 + block count
pub const READ_RESPONSE_HEADER_LEN: usize = RESPONSE_HEADER_BASE + 3;

/// Write response header: len + code + idm + status1 + status2
pub const WRITE_RESPONSE_HEADER_LEN: usize = RESPONSE_HEADER_BASE + 2;

/// Polling response: len + code + idm + pmm
pub const POLLING_RESPONSE_MIN_LEN: usize = 2 + IDM_LEN + PMM_LEN;

/// SiliCa system service addressed by every read/write
pub const SYSTEM_SERVICE_CODE: u16 = 0xFFFF;

/// Wildcard system code used for polling
pub const POLLING_SYSTEM_CODE: u16 = 0xFFFF;

/// Search Service Code returns this once the area/service list is exhausted
pub const SERVICE_CODE_SENTINEL: u16 = 0xFFFF;

/// Default per-exchange transport timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Transport limit on blocks per Read Without Encryption command
pub const MAX_BLOCKS_PER_COMMAND: usize = 12;

/// Upper bound on Search Service Code iterations per session
pub const MAX_SERVICE_SEARCH: usize = 32;

/// System block holding IDm and PMm
pub const BLOCK_IDM: u8 = 0x83;
/// System block holding the service code table (little-endian)
pub const BLOCK_SERVICE_CODES: u8 = 0x84;
/// System block holding the system code table (big-endian)
pub const BLOCK_SYSTEM_CODES: u8 = 0x85;

/// Blocks holding the last rejected command (length-prefixed)
pub const LAST_ERROR_BLOCKS: [u8; 2] = [0xE0, 0xE1];

/// Value of an erased / never written byte
pub const UNWRITTEN_BYTE: u8 = 0xFF;

/// Code table capacity of one block (2 bytes per code)
pub const MAX_CODES_PER_BLOCK: usize = BLOCK_SIZE / 2;

/// PMm written when an identity write omits one (or gives the wrong size)
pub const DEFAULT_PMM: [u8; PMM_LEN] = [0x00, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];

/// Number of addresses covered by a full dump (block numbers 0..=254)
pub const FULL_DUMP_BLOCK_COUNT: usize = 0xFF;

/// Exchange labels recorded in the exchange log
pub const LABEL_POLLING: &str = "Polling";
/// Label of the Request System Code exchange
pub const LABEL_REQUEST_SYSTEM_CODES: &str = "Request System Codes";
/// Search labels get a ` #N` suffix
pub const LABEL_SEARCH_SERVICE_CODES: &str = "Search Service Codes";
/// Label of each Read chunk
pub const LABEL_READ_WITHOUT_ENCRYPTION: &str = "Read Without Encryption";
/// Label of each block write
pub const LABEL_WRITE_WITHOUT_ENCRYPTION: &str = "Write Without Encryption";
