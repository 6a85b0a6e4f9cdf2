// libsilica/src/protocol/parser.rs

//! Bounds-checked readers shared by the response decoders.

use crate::constants::{IDM_LEN, PMM_LEN};
use crate::types::{Idm, Pmm};
use crate::{Error, Result};

/// Ensure the response frame has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::ResponseTooShort {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Read a little-endian u16 at given index, with bounds checking.
pub fn le_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    ensure_len(data, idx + 2)?;
    Ok(u16::from_le_bytes([data[idx], data[idx + 1]]))
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    ensure_len(data, idx + len)?;
    Ok(&data[idx..idx + len])
}

/// Parse an Idm (8 bytes) at `start` index with bounds checking.
pub fn idm_at(data: &[u8], start: usize) -> Result<Idm> {
    Idm::try_from(slice_at(data, start, IDM_LEN)?)
}

/// Parse a PMm (8 bytes) at `start` index with bounds checking.
pub fn pmm_at(data: &[u8], start: usize) -> Result<Pmm> {
    Pmm::try_from(slice_at(data, start, PMM_LEN)?)
}

/// Ensure the response code (offset 1, after the length byte) equals
/// `expected`.
pub fn expect_response_code(data: &[u8], expected: u8) -> Result<()> {
    let actual = byte_at(data, 1)?;
    if actual != expected {
        return Err(Error::UnexpectedResponse { expected, actual });
    }
    Ok(())
}

/// Check the status flag pair at `idx`; any non-zero flag is a rejection.
pub fn expect_status_ok(data: &[u8], idx: usize) -> Result<(u8, u8)> {
    let status1 = byte_at(data, idx)?;
    let status2 = byte_at(data, idx + 1)?;
    if status1 != 0 || status2 != 0 {
        return Err(Error::DeviceStatus { status1, status2 });
    }
    Ok((status1, status2))
}
