// fixtures.rs: provides commonly used test payloads/frames

use libsilica::test_support;
use libsilica::types::{BlockData, Idm, Pmm, ServiceCode, SystemCode};

pub fn sample_idm_bytes() -> [u8; 8] {
    test_support::IDM
}

pub fn sample_pmm_bytes() -> [u8; 8] {
    test_support::PMM
}

pub fn sample_idm() -> Idm {
    Idm::from_bytes(sample_idm_bytes())
}

pub fn sample_pmm() -> Pmm {
    Pmm::from_bytes(sample_pmm_bytes())
}

pub fn sample_system_codes() -> Vec<u16> {
    vec![0x88B4, 0xFE00]
}

pub fn sample_service_codes() -> Vec<u16> {
    vec![0x090F, 0x1848]
}

pub fn sample_system_code() -> SystemCode {
    SystemCode::new(0x88B4)
}

pub fn sample_service_code() -> ServiceCode {
    ServiceCode::new(0x090f)
}

pub fn sample_blockdata(fill: u8) -> BlockData {
    BlockData::from_bytes([fill; 16])
}

/// Polling, system code and service code responses for the sample tag.
pub fn discovery() -> Vec<Vec<u8>> {
    test_support::discovery_frames(&sample_system_codes(), &sample_service_codes())
}

/// Discovery followed by `frames`.
pub fn discovery_then(frames: impl IntoIterator<Item = Vec<u8>>) -> Vec<Vec<u8>> {
    let mut all = discovery();
    all.extend(frames);
    all
}

/// Blocks 0xE0/0xE1 holding a recorded Read command of `len` bytes.
pub fn last_error_blocks(command: &[u8]) -> [[u8; 16]; 2] {
    let mut raw = [0u8; 32];
    raw[0] = command.len() as u8;
    raw[1..1 + command.len()].copy_from_slice(command);
    let mut blocks = [[0u8; 16]; 2];
    blocks[0].copy_from_slice(&raw[..16]);
    blocks[1].copy_from_slice(&raw[16..]);
    blocks
}
