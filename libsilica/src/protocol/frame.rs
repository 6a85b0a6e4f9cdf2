// libsilica/src/protocol/frame.rs

//! Length-prefixed command frame.

use crate::constants::MAX_FRAME_LEN;
use crate::{Error, Result};

/// NFC-F command frame as handed to `transceive`.
/// Format: [Len(1)] [Command code(1)] [Parameters(n)]
/// The length byte counts itself, so a frame is never shorter than 2 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame(Vec<u8>);

impl CommandFrame {
    /// Prefix a command payload (code + parameters) with its length byte.
    pub fn encode(payload: &[u8]) -> Result<Self> {
        if payload.is_empty() {
            return Err(Error::InvalidLength {
                expected: 1,
                actual: 0,
            });
        }
        let total = payload.len() + 1;
        if total > MAX_FRAME_LEN {
            return Err(Error::InvalidLength {
                expected: MAX_FRAME_LEN,
                actual: total,
            });
        }

        let mut out = Vec::with_capacity(total);
        out.push(total as u8);
        out.extend_from_slice(payload);
        Ok(Self(out))
    }

    /// Full frame, length byte included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Command code following the length byte.
    pub fn command_code(&self) -> u8 {
        self.0[1]
    }

    /// Frame length in bytes, equal to the length byte.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for an encoded frame.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CommandFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
