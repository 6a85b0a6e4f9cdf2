// libsilica/src/error.rs

//! Crate error type.

use thiserror::Error;

/// Common error type
#[derive(Error, Debug)]
pub enum Error {
    /// The discovered tag does not speak NFC-F.
    #[error("tag is not a FeliCa/NfcF tag")]
    WrongTagType,

    /// The transport failed to exchange a frame.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A response frame ended before its fixed header.
    #[error("response too short: expected at least {expected} bytes, got {actual}")]
    ResponseTooShort {
        /// Minimum length for this response.
        expected: usize,
        /// Bytes received.
        actual: usize,
    },

    /// The response code does not answer the command sent.
    #[error("unexpected response code: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse {
        /// Response code for the command sent.
        expected: u8,
        /// Code found in the frame.
        actual: u8,
    },

    /// Non-zero status flags: the tag rejected the command.
    #[error("felica error status: ({status1:#04x}, {status2:#04x})")]
    DeviceStatus {
        /// Status flag 1.
        status1: u8,
        /// Status flag 2.
        status2: u8,
    },

    /// Fewer block bytes than the block count promised.
    #[error("incomplete block payload: expected {expected} bytes, got {actual}")]
    IncompletePayload {
        /// `block count * 16`.
        expected: usize,
        /// Block bytes present.
        actual: usize,
    },

    /// A fixed-size value (IDm, block, frame) had the wrong length.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Required length.
        expected: usize,
        /// Length given.
        actual: usize,
    },

    /// The request was rejected before any I/O.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// True for caller-side validation failures that are raised before any
    /// transport I/O takes place.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Error::InvalidRequest(_) | Error::InvalidLength { .. })
    }

    /// True when the failure came from the transport rather than the tag.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
