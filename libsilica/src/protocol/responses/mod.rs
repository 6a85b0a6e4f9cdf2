// libsilica/src/protocol/responses/mod.rs

//! Per-command response decoders. Each takes the full frame (length byte
//! included) and performs its own length and code checks, so the reported
//! error follows the frame's layout.

pub mod polling;
pub mod read;
pub mod search;
pub mod system;
pub mod write;

pub use polling::decode_polling;
pub use read::{decode_read, ReadResponse};
pub use search::decode_search_service_code;
pub use system::decode_request_system_code;
pub use write::decode_write;
