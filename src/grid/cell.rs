//! Table cell: raw text plus an interpretation tag

use std::borrow::Cow;

use super::buffer::TextBuffer;
use super::error::Result;

/// Bytes reserved for a fresh cell's text
pub const DEFAULT_CELL_CAPACITY: usize = 20;

/// How a caller should interpret a cell's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    #[default]
    Plain,
    Quoted,
    Integer,
    Float,
}

impl CellKind {
    /// Guess the kind of a field as read from input
    pub fn classify(text: &[u8]) -> Self {
        if text.len() >= 2 && text.starts_with(b"\"") && text.ends_with(b"\"") {
            return CellKind::Quoted;
        }

        let Ok(s) = std::str::from_utf8(text) else {
            return CellKind::Plain;
        };
        let s = s.trim();
        if s.is_empty() {
            return CellKind::Plain;
        }

        if s.parse::<i64>().is_ok() {
            CellKind::Integer
        } else if s.parse::<f64>().is_ok_and(f64::is_finite) {
            CellKind::Float
        } else {
            CellKind::Plain
        }
    }
}

/// One grid entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    content: TextBuffer,
    kind: CellKind,
}

impl Cell {
    /// Empty plain cell with the default reserved capacity
    pub fn new() -> Result<Self> {
        Self::with_capacity(DEFAULT_CELL_CAPACITY)
    }

    /// Empty plain cell reserving `capacity` bytes of text
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            content: TextBuffer::with_capacity(capacity)?,
            kind: CellKind::Plain,
        })
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: CellKind) {
        self.kind = kind;
    }

    pub fn content(&self) -> &TextBuffer {
        &self.content
    }

    pub fn text(&self) -> &[u8] {
        self.content.as_bytes()
    }

    pub fn as_str(&self) -> Cow<'_, str> {
        self.content.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Replace the text and reclassify the kind
    pub fn set_text(&mut self, text: &[u8]) -> Result<()> {
        self.content.set_bytes(text)?;
        self.kind = CellKind::classify(text);
        Ok(())
    }

    /// Empty the text, keeping its storage
    pub fn clear(&mut self) {
        self.content.clear();
        self.kind = CellKind::Plain;
    }
}
