// libsilica/src/types.rs

//! Newtypes for identifiers, codes and blocks.

use crate::Error;
use crate::constants::{BLOCK_LIST_ACCESS_MODE, BLOCK_SIZE, IDM_LEN, PMM_LEN};
use std::convert::TryFrom;

/// IDm - Newtype Pattern (8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Idm([u8; IDM_LEN]);

impl Idm {
    /// Wrap raw IDm bytes.
    pub fn from_bytes(bytes: [u8; IDM_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; IDM_LEN] {
        &self.0
    }

    /// Uppercase hex without separators.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Idm {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; IDM_LEN] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: IDM_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

/// PMm - Newtype Pattern (8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pmm([u8; PMM_LEN]);

impl Pmm {
    /// Wrap raw PMm bytes.
    pub fn from_bytes(bytes: [u8; PMM_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; PMM_LEN] {
        &self.0
    }

    /// Uppercase hex without separators.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Pmm {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; PMM_LEN] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: PMM_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

/// SystemCode (u16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemCode(u16);

impl SystemCode {
    /// Wildcard, matches every system.
    pub const ANY: Self = Self(crate::constants::POLLING_SYSTEM_CODE);
    /// Common area system code.
    pub const COMMON: Self = Self(0xfe00);

    /// Wrap a 16-bit code.
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Numeric value.
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Byte order used in Polling.
    pub fn to_le_bytes(&self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    /// Request System Code responses carry codes big-endian.
    pub fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Inverse of `to_be_bytes`.
    pub fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }
}

/// ServiceCode (u16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceCode(u16);

impl ServiceCode {
    /// The SiliCa system service.
    pub const SYSTEM: Self = Self(crate::constants::SYSTEM_SERVICE_CODE);

    /// Wrap a 16-bit code.
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Numeric value.
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Byte order used in command frames and block 0x84.
    pub fn to_le_bytes(&self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

/// BlockData (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockData([u8; BLOCK_SIZE]);

impl BlockData {
    /// Wrap one block payload.
    pub fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    /// Spaced uppercase hex.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for BlockData {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; BLOCK_SIZE] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: BLOCK_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

/// A block number paired with its 16-byte payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    /// Block number.
    pub number: u8,
    /// Block payload.
    pub data: BlockData,
}

impl Block {
    /// Pair a number with its payload.
    pub fn new(number: u8, data: BlockData) -> Self {
        Self { number, data }
    }
}

/// Two-byte block list element: access mode 0x80 + one-byte block number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockListElement {
    /// Block number in the addressed service.
    pub block_number: u8,
}

impl BlockListElement {
    /// Element for `block_number`.
    pub fn new(block_number: u8) -> Self {
        Self { block_number }
    }

    /// `[0x80, block_number]`.
    pub fn encode(&self) -> [u8; 2] {
        [BLOCK_LIST_ACCESS_MODE, self.block_number]
    }
}
