// libsilica/src/session/log.rs

//! Ordered record of every command/response exchanged during one session.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::bytes_to_hex_spaced;

/// One request/response pair. `response` is empty when the exchange failed
/// at the transport level.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawExchange {
    /// What the exchange did, e.g. `Polling`.
    pub label: String,
    /// Frame sent.
    pub request: Vec<u8>,
    /// Frame received, empty on transport failure.
    pub response: Vec<u8>,
}

impl RawExchange {
    /// Record one exchange.
    pub fn new(label: impl Into<String>, request: Vec<u8>, response: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            request,
            response,
        }
    }

    /// `"AA BB"` style hex of the request.
    pub fn formatted_request(&self) -> String {
        bytes_to_hex_spaced(&self.request)
    }

    /// `"AA BB"` style hex of the response.
    pub fn formatted_response(&self) -> String {
        bytes_to_hex_spaced(&self.response)
    }

    /// True when no response bytes were received.
    pub fn is_unanswered(&self) -> bool {
        self.response.is_empty()
    }
}

/// Append-only exchange log owned by a session and handed to the caller
/// with the result or failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ExchangeLog(Vec<RawExchange>);

impl ExchangeLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one exchange.
    pub fn push(&mut self, exchange: RawExchange) {
        self.0.push(exchange);
    }

    /// Append an exchange built from borrowed frames.
    pub fn record(&mut self, label: &str, request: &[u8], response: &[u8]) {
        self.push(RawExchange::new(label, request.to_vec(), response.to_vec()));
    }

    /// Append every entry of `other`, preserving order.
    pub fn append(&mut self, other: ExchangeLog) {
        self.0.extend(other.0);
    }

    /// Number of exchanges.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True before the first exchange.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// In the order they happened.
    pub fn iter(&self) -> std::slice::Iter<'_, RawExchange> {
        self.0.iter()
    }

    /// All exchanges.
    pub fn as_slice(&self) -> &[RawExchange] {
        &self.0
    }

    /// Labels only, in order.
    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.label.as_str()).collect()
    }
}

impl From<Vec<RawExchange>> for ExchangeLog {
    fn from(v: Vec<RawExchange>) -> Self {
        Self(v)
    }
}

impl IntoIterator for ExchangeLog {
    type Item = RawExchange;
    type IntoIter = std::vec::IntoIter<RawExchange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExchangeLog {
    type Item = &'a RawExchange;
    type IntoIter = std::slice::Iter<'a, RawExchange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Numbered `label` / `>>` request / `<<` response lines.
impl fmt::Display for ExchangeLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, exchange) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            writeln!(f, "{}. {}", i + 1, exchange.label)?;
            writeln!(f, ">> {}", exchange.formatted_request())?;
            write!(f, "<< {}", exchange.formatted_response())?;
        }
        Ok(())
    }
}
