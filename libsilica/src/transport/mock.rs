// libsilica/src/transport/mock.rs

//! In-memory transport and tag for tests.

use std::collections::VecDeque;
use std::io;

use crate::transport::traits::{Tag, Transport};
use crate::types::Idm;

/// Mock transport for unit tests. It records sent frames and returns queued
/// responses (or queued I/O errors) in order.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Every frame passed to `transceive`.
    pub sent: Vec<Vec<u8>>,
    /// Answers returned in order.
    pub responses: VecDeque<io::Result<Vec<u8>>>,
    /// Set by `connect`, cleared by `close`.
    pub connected: bool,
    /// Last value given to `set_timeout`.
    pub timeout_ms: u64,
    /// Testing hook: make `close` report an error
    pub fail_close: bool,
    /// Number of `close` calls.
    pub close_calls: usize,
}

impl MockTransport {
    /// No queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mock pre-seeded with the given responses.
    pub fn with_responses<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let mut mock = Self::new();
        for resp in responses {
            mock.push_response(resp);
        }
        mock
    }

    /// Queue one response frame.
    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push_back(Ok(resp));
    }

    /// Queue an I/O failure, as when the tag leaves the field.
    pub fn push_io_error(&mut self, kind: io::ErrorKind) {
        self.responses
            .push_back(Err(io::Error::new(kind, "tag was lost")));
    }

    /// Command codes (byte 1) of every frame sent so far.
    pub fn sent_codes(&self) -> Vec<u8> {
        self.sent
            .iter()
            .filter_map(|f| f.get(1).copied())
            .collect()
    }
}

impl Transport for MockTransport {
    fn connect(&mut self) -> io::Result<()> {
        self.connected = true;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.connected = false;
        self.close_calls += 1;
        if self.fail_close {
            return Err(io::Error::other("close failed"));
        }
        Ok(())
    }

    fn set_timeout(&mut self, timeout_ms: u64) {
        self.timeout_ms = timeout_ms;
    }

    fn transceive(&mut self, frame: &[u8]) -> io::Result<Vec<u8>> {
        self.sent.push(frame.to_vec());
        match self.responses.pop_front() {
            Some(resp) => resp,
            None => Err(io::Error::new(io::ErrorKind::TimedOut, "no response")),
        }
    }
}

/// Mock tag handed to sessions in tests.
#[derive(Debug)]
pub struct MockTag {
    /// Tag identifier.
    pub id: Vec<u8>,
    /// `None` for a tag without NFC-F.
    pub transport: Option<MockTransport>,
}

impl MockTag {
    /// A FeliCa tag whose id is `idm`.
    pub fn felica(idm: Idm, transport: MockTransport) -> Self {
        Self {
            id: idm.as_bytes().to_vec(),
            transport: Some(transport),
        }
    }

    /// A tag without NFC-F support.
    pub fn non_felica(id: Vec<u8>) -> Self {
        Self {
            id,
            transport: None,
        }
    }

    /// Access the underlying mock for assertions.
    pub fn mock(&self) -> Option<&MockTransport> {
        self.transport.as_ref()
    }
}

impl Tag for MockTag {
    fn id(&self) -> &[u8] {
        &self.id
    }

    fn nfc_f(&mut self) -> Option<&mut dyn Transport> {
        self.transport.as_mut().map(|t| t as &mut dyn Transport)
    }
}
