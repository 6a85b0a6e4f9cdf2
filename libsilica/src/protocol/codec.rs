// libsilica/src/protocol/codec.rs

//! Command to frame encoding.

use crate::Result;

use super::commands::Command;
use super::frame::CommandFrame;

/// Encode a Command into the length-prefixed frame handed to the tag.
pub fn encode_command_frame(cmd: &Command) -> Result<CommandFrame> {
    CommandFrame::encode(&cmd.encode())
}
