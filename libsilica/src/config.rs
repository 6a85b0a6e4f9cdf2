// libsilica/src/config.rs

//! Per-session configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TIMEOUT_MS, MAX_BLOCKS_PER_COMMAND, MAX_SERVICE_SEARCH};
use crate::types::{ServiceCode, SystemCode};

/// Tunables applied to every read and write session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionConfig {
    /// Per-exchange transport timeout (ms)
    pub timeout_ms: u64,
    /// Upper bound on blocks carried by one Read command
    pub max_blocks_per_command: usize,
    /// Upper bound on Search Service Code iterations
    pub max_service_search: usize,
    /// Service addressed by block reads and writes
    pub service_code: ServiceCode,
    /// System code sent with Polling
    pub polling_system_code: SystemCode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_blocks_per_command: MAX_BLOCKS_PER_COMMAND,
            max_service_search: MAX_SERVICE_SEARCH,
            service_code: ServiceCode::SYSTEM,
            polling_system_code: SystemCode::ANY,
        }
    }
}

impl SessionConfig {
    /// Same as `Default`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-exchange timeout handed to the transport.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Clamped to `1..=MAX_BLOCKS_PER_COMMAND`.
    pub fn with_max_blocks_per_command(mut self, max: usize) -> Self {
        self.max_blocks_per_command = max.clamp(1, MAX_BLOCKS_PER_COMMAND);
        self
    }

    /// Clamped to `MAX_SERVICE_SEARCH`.
    pub fn with_max_service_search(mut self, max: usize) -> Self {
        self.max_service_search = max.min(MAX_SERVICE_SEARCH);
        self
    }

    /// Blocks per Read command actually used, whatever the field holds.
    pub fn blocks_per_command(&self) -> usize {
        self.max_blocks_per_command.clamp(1, MAX_BLOCKS_PER_COMMAND)
    }

    /// Search Service Code iterations actually allowed.
    pub fn service_search_limit(&self) -> usize {
        self.max_service_search.min(MAX_SERVICE_SEARCH)
    }

    /// Service addressed by block reads and writes.
    pub fn with_service_code(mut self, service_code: ServiceCode) -> Self {
        self.service_code = service_code;
        self
    }

    /// System code sent with Polling.
    pub fn with_polling_system_code(mut self, system_code: SystemCode) -> Self {
        self.polling_system_code = system_code;
        self
    }
}
