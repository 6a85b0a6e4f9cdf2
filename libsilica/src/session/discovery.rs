// libsilica/src/session/discovery.rs

//! Polling and best-effort code discovery.

use log::debug;

use crate::constants::{
    LABEL_POLLING, LABEL_REQUEST_SYSTEM_CODES, LABEL_SEARCH_SERVICE_CODES, MAX_SERVICE_SEARCH,
    SERVICE_CODE_SENTINEL,
};
use crate::protocol::{
    decode_polling, decode_request_system_code, decode_search_service_code, Command,
};
use crate::session::exchange;
use crate::session::log::ExchangeLog;
use crate::transport::Transport;
use crate::types::{Idm, Pmm, ServiceCode, SystemCode};
use crate::Result;

/// Poll the tag and capture its Idm and Pmm. Any failure is fatal for the
/// tap.
pub fn poll(
    transport: &mut dyn Transport,
    log: &mut ExchangeLog,
    system_code: SystemCode,
) -> Result<(Idm, Pmm)> {
    let cmd = Command::Polling {
        system_code,
        request_code: 0,
        time_slot: 0,
    };
    let response = exchange(transport, log, LABEL_POLLING, &cmd)?;
    decode_polling(&response)
}

/// Request the tag's system codes. Failures yield an empty list.
pub fn request_system_codes(
    transport: &mut dyn Transport,
    log: &mut ExchangeLog,
    idm: Idm,
) -> Vec<SystemCode> {
    let cmd = Command::RequestSystemCode { idm };
    match exchange(transport, log, LABEL_REQUEST_SYSTEM_CODES, &cmd) {
        Ok(response) => decode_request_system_code(&response),
        Err(e) => {
            debug!("system code discovery aborted: {}", e);
            Vec::new()
        }
    }
}

/// Iterator over service codes returned by successive SearchServiceCode
/// commands.
///
/// Ends on the first transport error, malformed or rejected response, the
/// 0xFFFF sentinel once at least one code was found, a repeated code, or
/// after `limit` commands (never more than 32).
pub struct ServiceIterator<'a> {
    transport: &'a mut dyn Transport,
    log: &'a mut ExchangeLog,
    idm: Idm,
    current_index: u16,
    limit: usize,
    found: Vec<ServiceCode>,
    finished: bool,
}

impl<'a> ServiceIterator<'a> {
    /// Search at most `limit` indices, capped at 32.
    pub fn new(
        transport: &'a mut dyn Transport,
        log: &'a mut ExchangeLog,
        idm: Idm,
        limit: usize,
    ) -> Self {
        Self {
            transport,
            log,
            idm,
            current_index: 0,
            limit: limit.min(MAX_SERVICE_SEARCH),
            found: Vec::new(),
            finished: false,
        }
    }
}

impl Iterator for ServiceIterator<'_> {
    type Item = ServiceCode;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || usize::from(self.current_index) >= self.limit {
            return None;
        }

        let cmd = Command::SearchServiceCode {
            idm: self.idm,
            index: self.current_index,
        };
        let label = format!("{} #{}", LABEL_SEARCH_SERVICE_CODES, self.current_index + 1);
        self.current_index = self.current_index.saturating_add(1);

        let code = match exchange(self.transport, self.log, &label, &cmd)
            .and_then(|response| decode_search_service_code(&response))
        {
            Ok(code) => code,
            Err(e) => {
                debug!("service code search stopped: {}", e);
                self.finished = true;
                return None;
            }
        };

        let sentinel = code.as_u16() == SERVICE_CODE_SENTINEL && !self.found.is_empty();
        if sentinel || self.found.contains(&code) {
            self.finished = true;
            return None;
        }

        self.found.push(code);
        Some(code)
    }
}

/// Collect every service code the tag reports, in discovery order.
pub fn search_service_codes(
    transport: &mut dyn Transport,
    log: &mut ExchangeLog,
    idm: Idm,
    limit: usize,
) -> Vec<ServiceCode> {
    ServiceIterator::new(transport, log, idm, limit).collect()
}
