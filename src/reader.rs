//! Line reader backed by a reusable grid buffer
//!
//! Lines of any length are assembled chunk by chunk into one
//! [`TextBuffer`], which is cleared (not freed) between lines.

use std::io::{self, BufRead};

use thiserror::Error;

use crate::grid::{Chunk, GridError, TextBuffer, DEFAULT_CELL_CAPACITY};

#[derive(Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

pub struct LineReader<R> {
    source: R,
    line: TextBuffer,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(source: R) -> Result<Self, GridError> {
        Ok(Self {
            source,
            line: TextBuffer::with_capacity(DEFAULT_CELL_CAPACITY)?,
        })
    }

    /// Next line including its `\n`, or `None` at end of input
    ///
    /// A last line without a newline is still returned.
    pub fn read_line(&mut self) -> Result<Option<&[u8]>, ReadError> {
        self.line.clear();

        let source = &mut self.source;
        let read = self.line.append_from_source(|window: &mut [u8]| -> Result<Chunk, ReadError> {
            let available = source.fill_buf()?;
            if available.is_empty() {
                return Ok(Chunk::End);
            }

            let take = available.len().min(window.len());
            let newline = available[..take].iter().position(|&b| b == b'\n');
            let n = newline.map_or(take, |i| i + 1);

            window[..n].copy_from_slice(&available[..n]);
            source.consume(n);

            Ok(if newline.is_some() {
                Chunk::Complete(n)
            } else {
                Chunk::Partial(n)
            })
        })?;

        if read == 0 {
            return Ok(None);
        }
        Ok(Some(self.line.as_bytes()))
    }

    /// Capacity of the shared line buffer
    pub fn buffer_capacity(&self) -> usize {
        self.line.capacity()
    }
}
