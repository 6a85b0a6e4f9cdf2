// libsilica/src/transport/traits.rs

//! `Transport` and `Tag` traits.

use std::io;

use log::debug;

/// Byte-exchange channel to an already-discovered FeliCa tag.
///
/// The platform layer owns discovery; sessions only see this trait. All
/// methods report failures as `std::io::Error`, which sessions surface as
/// `Error::Io`.
pub trait Transport {
    /// Open the channel to the tag
    fn connect(&mut self) -> io::Result<()>;

    /// Close the channel. Sessions call this on every exit path.
    fn close(&mut self) -> io::Result<()>;

    /// Set the per-exchange timeout in milliseconds
    fn set_timeout(&mut self, timeout_ms: u64);

    /// Send one length-prefixed command frame and return the raw response
    fn transceive(&mut self, frame: &[u8]) -> io::Result<Vec<u8>>;
}

/// A tag delivered by one physical tap.
pub trait Tag {
    /// Tag identifier as reported by the platform
    fn id(&self) -> &[u8];

    /// NFC-F technology handle, or `None` when the tag is not FeliCa
    fn nfc_f(&mut self) -> Option<&mut dyn Transport>;
}

/// Close the transport, logging and discarding any failure.
pub fn close_quietly(transport: &mut dyn Transport) {
    if let Err(e) = transport.close() {
        debug!("ignoring transport close failure: {}", e);
    }
}
