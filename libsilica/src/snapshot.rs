// libsilica/src/snapshot.rs

//! Text snapshot of block data.
//!
//! ```text
//! # SiliCa system block export
//! # Timestamp: 2024-05-01 12:00:00
//! IDM: 012E4C123456789A
//! Blocks: 83, 84
//! 83: 01 2E 4C 12 34 56 78 9A 00 01 FF FF FF FF FF FF
//! 84: 0F 09 00 00 00 00 00 00 00 00 00 00 00 00 00 00
//! ```
//!
//! The `Blocks:` line is informational and ignored on decode.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::constants::BLOCK_SIZE;
use crate::session::WriteRequest;
use crate::types::{Block, BlockData, Idm};
use crate::utils::{bytes_to_hex_spaced, parse_hex};
use crate::{Error, Result};

const HEADER: &str = "# SiliCa system block export";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A decoded snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexSnapshot {
    /// IDm from the `IDM:` line, when present.
    pub idm: Option<Idm>,
    /// Blocks in file order.
    pub blocks: Vec<Block>,
}

impl HexSnapshot {
    /// Batch write putting every block back.
    pub fn write_request(&self) -> WriteRequest {
        WriteRequest::raw_batch(&self.blocks)
    }
}

/// Render a snapshot of `blocks` read from `idm`.
pub fn encode(idm: &Idm, timestamp: DateTime<Utc>, blocks: &[Block]) -> String {
    let mut out = String::new();
    // write! never fails writing to a String
    let _ = writeln!(out, "{}", HEADER);
    let _ = writeln!(out, "# Timestamp: {}", timestamp.format(TIMESTAMP_FORMAT));
    let _ = writeln!(out, "IDM: {}", idm.to_hex());
    if !blocks.is_empty() {
        let list: Vec<String> = blocks.iter().map(|b| format!("{:02X}", b.number)).collect();
        let _ = writeln!(out, "Blocks: {}", list.join(", "));
    }
    for block in blocks {
        let _ = writeln!(
            out,
            "{:02X}: {}",
            block.number,
            bytes_to_hex_spaced(block.data.as_bytes())
        );
    }
    out
}

/// Parse a snapshot. Any malformed line, or a snapshot without blocks,
/// fails the whole decode.
pub fn decode(raw: &str) -> Result<HexSnapshot> {
    let mut idm = None;
    let mut blocks = Vec::new();

    for (index, line) in raw.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((label, value)) = trimmed.split_once(':') else {
            return Err(malformed(line_no, "missing ':'"));
        };
        let label = label.trim();
        let value = value.trim();

        if label.eq_ignore_ascii_case("IDM") {
            let bytes = parse_hex(value).map_err(|e| malformed(line_no, &e))?;
            let parsed = Idm::try_from(bytes.as_slice())
                .map_err(|e| malformed(line_no, &e.to_string()))?;
            idm = Some(parsed);
            continue;
        }
        if label.eq_ignore_ascii_case("Blocks") {
            continue;
        }

        let number = parse_block_number(label)
            .ok_or_else(|| malformed(line_no, "invalid block number"))?;
        let bytes = parse_hex(value).map_err(|e| malformed(line_no, &e))?;
        if bytes.len() != BLOCK_SIZE {
            return Err(malformed(
                line_no,
                &format!("expected {} bytes, got {}", BLOCK_SIZE, bytes.len()),
            ));
        }
        let data = BlockData::try_from(bytes.as_slice())?;
        blocks.push(Block::new(number, data));
    }

    if blocks.is_empty() {
        return Err(Error::InvalidRequest("snapshot contains no blocks".into()));
    }
    Ok(HexSnapshot { idm, blocks })
}

fn parse_block_number(label: &str) -> Option<u8> {
    let digits = label
        .strip_prefix("0x")
        .or_else(|| label.strip_prefix("0X"))
        .unwrap_or(label);
    u8::from_str_radix(digits, 16).ok()
}

fn malformed(line_no: usize, reason: &str) -> Error {
    Error::InvalidRequest(format!("snapshot line {}: {}", line_no, reason))
}
