//! Growable byte buffer for cell text and input lines
//!
//! The buffer tracks its own logical capacity and always keeps one byte of
//! headroom, so `size < capacity` holds whenever storage exists.

use std::borrow::Cow;

use super::error::{GridError, Result};
use super::growth;

/// Largest window handed to a chunk source in one call
///
/// Keeps the per-chunk zero fill bounded when a reused buffer has a large
/// retained capacity.
pub const MAX_CHUNK: usize = 8 * 1024;

/// Outcome of one chunk handed to [`TextBuffer::append_from_source`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk {
    /// `n` bytes were written and the source has more for this value
    Partial(usize),
    /// `n` bytes were written and the value is complete
    Complete(usize),
    /// The source is exhausted
    End,
}

/// Owned text storage with explicit size and capacity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    content: Vec<u8>,
    capacity: usize,
}

impl TextBuffer {
    /// Empty buffer with no storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with `initial_capacity` bytes reserved
    pub fn with_capacity(initial_capacity: usize) -> Result<Self> {
        let mut content = Vec::new();
        content
            .try_reserve_exact(initial_capacity)
            .map_err(|_| GridError::AllocationFailure {
                requested: initial_capacity,
            })?;
        Ok(Self {
            content,
            capacity: initial_capacity,
        })
    }

    /// Bytes in use
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Bytes reserved
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    /// Content as text, replacing invalid UTF-8
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// Reset size to zero, keeping the storage for reuse
    pub fn clear(&mut self) {
        self.content.clear();
    }

    /// Grow by one step of the growth rule
    pub fn grow(&mut self) -> Result<()> {
        growth::grow(&mut self.content, &mut self.capacity)
    }

    /// Append `bytes`, growing first so the terminator byte stays free
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let needed = self
            .content
            .len()
            .checked_add(bytes.len())
            .and_then(|n| n.checked_add(1))
            .ok_or(GridError::CapacityOverflow {
                current: self.capacity,
            })?;
        growth::reserve_for(&mut self.content, &mut self.capacity, needed)?;
        self.content.extend_from_slice(bytes);
        Ok(())
    }

    /// Replace the content with `bytes`
    ///
    /// Storage is reserved before the old content is discarded.
    pub fn set_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let needed = bytes.len().checked_add(1).ok_or(GridError::CapacityOverflow {
            current: self.capacity,
        })?;
        growth::reserve_for(&mut self.content, &mut self.capacity, needed)?;
        self.content.clear();
        self.content.extend_from_slice(bytes);
        Ok(())
    }

    /// Append chunks produced by `read_chunk` until it reports completion
    ///
    /// `read_chunk` receives the free window (capacity minus size minus the
    /// terminator byte, at most [`MAX_CHUNK`]) and reports how much it
    /// wrote. The buffer grows whenever the window is used up. Returns the
    /// number of bytes appended; bytes appended by this call are discarded if
    /// reading or growth fails.
    pub fn append_from_source<F, E>(&mut self, mut read_chunk: F) -> std::result::Result<usize, E>
    where
        F: FnMut(&mut [u8]) -> std::result::Result<Chunk, E>,
        E: From<GridError>,
    {
        let start = self.content.len();

        loop {
            while self.capacity == 0 || self.content.len() + 1 >= self.capacity {
                if let Err(e) = self.grow() {
                    self.content.truncate(start);
                    return Err(e.into());
                }
            }

            let used = self.content.len();
            let window = (self.capacity - 1 - used).min(MAX_CHUNK);
            // Within reserved storage, so this never reallocates
            self.content.resize(used + window, 0);

            let outcome = match read_chunk(&mut self.content[used..]) {
                Ok(outcome) => outcome,
                Err(e) => {
                    self.content.truncate(start);
                    return Err(e);
                }
            };

            match outcome {
                Chunk::Partial(n) => self.content.truncate(used + n.min(window)),
                Chunk::Complete(n) => {
                    self.content.truncate(used + n.min(window));
                    break;
                }
                Chunk::End => {
                    self.content.truncate(used);
                    break;
                }
            }
        }

        Ok(self.content.len() - start)
    }

    /// Drop the storage; the buffer becomes the empty no-storage state
    pub fn release(&mut self) {
        self.content = Vec::new();
        self.capacity = 0;
    }
}
