//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers build well-formed tag responses and pre-seeded mock tags so
//! tests across the crate and the tests/ directory share the same fixtures.
#![allow(dead_code)]

use crate::transport::{MockTag, MockTransport};
use crate::types::Idm;

/// IDm reported by the mock tag.
#[doc(hidden)]
pub const IDM: [u8; 8] = [0x01, 0x2E, 0x4C, 0x12, 0x34, 0x56, 0x78, 0x9A];

/// PMm reported by the mock tag.
#[doc(hidden)]
pub const PMM: [u8; 8] = [0x00, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];

fn with_len(mut frame: Vec<u8>) -> Vec<u8> {
    frame[0] = frame.len() as u8;
    frame
}

fn header(code: u8) -> Vec<u8> {
    let mut frame = vec![0x00, code];
    frame.extend_from_slice(&IDM);
    frame
}

/// Polling response carrying `IDM` and `PMM`.
#[doc(hidden)]
pub fn polling_frame() -> Vec<u8> {
    let mut frame = header(0x01);
    frame.extend_from_slice(&PMM);
    with_len(frame)
}

/// Request System Code response listing `codes` big-endian.
#[doc(hidden)]
pub fn system_code_frame(codes: &[u16]) -> Vec<u8> {
    let mut frame = header(0x0D);
    frame.push(codes.len() as u8);
    for code in codes {
        frame.extend_from_slice(&code.to_be_bytes());
    }
    with_len(frame)
}

/// Search Service Code response with a zero status pair.
#[doc(hidden)]
pub fn search_frame(code: u16) -> Vec<u8> {
    let mut frame = header(0x0B);
    frame.extend_from_slice(&[0x00, 0x00]);
    frame.extend_from_slice(&code.to_le_bytes());
    with_len(frame)
}

/// Search Service Code response rejected by the tag.
#[doc(hidden)]
pub fn search_rejected_frame() -> Vec<u8> {
    let mut frame = header(0x0B);
    frame.extend_from_slice(&[0x01, 0xA6, 0xFF, 0xFF]);
    with_len(frame)
}

/// Responses for polling plus discovery. Service discovery ends with the
/// sentinel, or with a rejected search when `services` is empty.
#[doc(hidden)]
pub fn discovery_frames(systems: &[u16], services: &[u16]) -> Vec<Vec<u8>> {
    let mut frames = vec![polling_frame(), system_code_frame(systems)];
    frames.extend(services.iter().map(|&c| search_frame(c)));
    if services.is_empty() {
        frames.push(search_rejected_frame());
    } else {
        frames.push(search_frame(0xFFFF));
    }
    frames
}

/// Payload the mock tag stores in block `n`: sixteen copies of `n`.
#[doc(hidden)]
pub fn block_fill(n: u8) -> [u8; 16] {
    [n; 16]
}

/// Read response for `numbers`, each block filled by `block_fill`.
#[doc(hidden)]
pub fn read_frame(numbers: &[u8]) -> Vec<u8> {
    let blocks: Vec<[u8; 16]> = numbers.iter().map(|&n| block_fill(n)).collect();
    read_frame_with(&blocks)
}

/// Read response carrying the given block payloads.
#[doc(hidden)]
pub fn read_frame_with(blocks: &[[u8; 16]]) -> Vec<u8> {
    let mut frame = header(0x07);
    frame.extend_from_slice(&[0x00, 0x00, blocks.len() as u8]);
    for block in blocks {
        frame.extend_from_slice(block);
    }
    with_len(frame)
}

/// Read response with non-zero status flags.
#[doc(hidden)]
pub fn read_status_frame(status1: u8, status2: u8) -> Vec<u8> {
    let mut frame = header(0x07);
    frame.extend_from_slice(&[status1, status2, 0x00]);
    with_len(frame)
}

/// Write response with the given status flags.
#[doc(hidden)]
pub fn write_frame(status1: u8, status2: u8) -> Vec<u8> {
    let mut frame = header(0x09);
    frame.extend_from_slice(&[status1, status2]);
    with_len(frame)
}

/// Successful write response.
#[doc(hidden)]
pub fn write_ok_frame() -> Vec<u8> {
    write_frame(0x00, 0x00)
}

/// A FeliCa mock tag whose transport answers with `responses` in order.
#[doc(hidden)]
pub fn felica_tag(responses: Vec<Vec<u8>>) -> MockTag {
    MockTag::felica(Idm::from_bytes(IDM), MockTransport::with_responses(responses))
}
