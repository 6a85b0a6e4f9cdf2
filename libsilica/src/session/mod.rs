// libsilica/src/session/mod.rs

//! Per-tap sessions and the coordinators that resume them across taps.

pub mod batch;
pub mod discovery;
pub mod dump;
pub mod log;
pub mod read;
pub mod write;

pub use batch::{BatchOutcome, BatchProgress, BatchWriteCoordinator, BatchWriteState};
pub use dump::{DumpProgress, FullDumpCoordinator, FullDumpState};
pub use self::log::{ExchangeLog, RawExchange};
pub use read::{PartialReadResult, ReadFailure, ReadRequest, ReadResult, ReadSession};
pub use write::{RawBlockPayload, WriteFailure, WriteRequest, WriteResult, WriteSession};

use ::log::{debug, trace};

use crate::protocol::{encode_command_frame, Command};
use crate::transport::{Tag, Transport};
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

/// Resolve the tag's NFC-F channel. Tags without one are rejected before
/// any I/O.
pub(crate) fn open_transport(tag: &mut dyn Tag) -> Result<&mut dyn Transport> {
    tag.nfc_f().ok_or(Error::WrongTagType)
}

/// Encode `cmd`, send it and record the exchange under `label`.
///
/// The exchange is logged even when the transport fails, with an empty
/// response, so callers always see what was attempted.
pub(crate) fn exchange(
    transport: &mut dyn Transport,
    log: &mut ExchangeLog,
    label: &str,
    cmd: &Command,
) -> Result<Vec<u8>> {
    let frame = encode_command_frame(cmd)?;
    debug!(
        "{}: sending command 0x{:02X} ({} bytes)",
        label,
        frame.command_code(),
        frame.len()
    );
    trace!(">> {}", bytes_to_hex_spaced(frame.as_bytes()));

    match transport.transceive(frame.as_bytes()) {
        Ok(response) => {
            trace!("<< {}", bytes_to_hex_spaced(&response));
            log.record(label, frame.as_bytes(), &response);
            Ok(response)
        }
        Err(e) => {
            debug!("{}: transport error: {}", label, e);
            log.record(label, frame.as_bytes(), &[]);
            Err(Error::Io(e))
        }
    }
}
