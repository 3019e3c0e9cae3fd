//! Field delimiter sets
//!
//! Input lines may be split on any character of the set; output always
//! uses the first one.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Delimiter used when none is configured
pub const DEFAULT_DELIMITERS: &str = " ";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DelimiterError {
    #[error("invalid format of delimiters: the set is empty")]
    Empty,
    #[error("invalid format of delimiters: {0:?} cannot be used as a delimiter")]
    Reserved(char),
    #[error("invalid format of delimiters: {0:?} is not an ASCII character")]
    NotAscii(char),
}

/// Non-empty set of single-byte delimiter characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    bytes: Vec<u8>,
}

impl Delimiters {
    /// Parse a delimiter set such as `":;,"`
    ///
    /// Quote and backslash are reserved for field quoting.
    pub fn parse(s: &str) -> Result<Self, DelimiterError> {
        if s.is_empty() {
            return Err(DelimiterError::Empty);
        }

        let mut bytes = Vec::with_capacity(s.len());
        for ch in s.chars() {
            if !ch.is_ascii() {
                return Err(DelimiterError::NotAscii(ch));
            }
            if matches!(ch, '"' | '\\' | '\n' | '\r') {
                return Err(DelimiterError::Reserved(ch));
            }
            let byte = ch as u8;
            if !bytes.contains(&byte) {
                bytes.push(byte);
            }
        }
        Ok(Self { bytes })
    }

    /// Delimiter written on output
    pub fn primary(&self) -> char {
        char::from(self.bytes[0])
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.bytes.contains(&byte)
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            bytes: DEFAULT_DELIMITERS.as_bytes().to_vec(),
        }
    }
}

impl FromStr for Delimiters {
    type Err = DelimiterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Delimiters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.bytes {
            write!(f, "{}", char::from(byte))?;
        }
        Ok(())
    }
}
