// libsilica/src/protocol/mod.rs

//! NFC-F frame codec: command encoders, response decoders and the
//! length-prefixed frame.

pub mod codec;
pub mod commands;
pub mod frame;
pub mod parser;
pub mod responses;

pub use codec::encode_command_frame;
pub use commands::*;
pub use frame::CommandFrame;
pub use responses::*;
