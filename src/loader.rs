//! Build a table from delimiter-separated text
//!
//! Fields keep their raw text (quotes and escapes included) so writing the
//! table back reproduces the input with the primary delimiter.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::delimiter::Delimiters;
use crate::grid::{GridError, Table};
use crate::reader::{LineReader, ReadError};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("unable to set up table storage: {0}")]
    Setup(#[source] GridError),
    #[error("unable to open the input file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: ReadError,
    },
    #[error("line {line}: {source}")]
    Grid {
        line: usize,
        #[source]
        source: GridError,
    },
}

/// Load a table from the file at `path`
pub fn load_file(path: &Path, delimiters: &Delimiters, cell_capacity: usize) -> Result<Table, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let table = load_table(BufReader::new(file), delimiters, cell_capacity)?;

    tracing::info!(
        "Loaded {} ({} rows, {} columns)",
        path.display(),
        table.row_count(),
        table.col_count()
    );
    Ok(table)
}

/// Load a table from any buffered source
///
/// Short lines are padded with empty cells so every row has the width of
/// the widest line.
pub fn load_table<R: BufRead>(source: R, delimiters: &Delimiters, cell_capacity: usize) -> Result<Table, LoadError> {
    let grid_err = |line: usize| move |source: GridError| LoadError::Grid { line, source };

    let mut reader = LineReader::new(source).map_err(LoadError::Setup)?;
    let mut table = Table::with_cell_capacity(cell_capacity).map_err(LoadError::Setup)?;

    let mut line_no = 0;
    loop {
        line_no += 1;
        let line = match reader.read_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(source) => {
                return Err(LoadError::Read {
                    line: line_no,
                    source,
                })
            }
        };

        let fields = split_fields(strip_line_ending(line), delimiters);
        while table.col_count() < fields.len() {
            table.append_column().map_err(grid_err(line_no))?;
        }
        table.append_row().map_err(grid_err(line_no))?;

        let row = table.row_count() - 1;
        for (col, field) in fields.into_iter().enumerate() {
            if let Some(cell) = table.get_cell_mut(row, col) {
                cell.set_text(field).map_err(grid_err(line_no))?;
            }
        }
    }

    tracing::debug!(
        "Parsed {} lines into {}x{} table",
        line_no - 1,
        table.row_count(),
        table.col_count()
    );
    Ok(table)
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Split one line into raw fields
///
/// A delimiter inside double quotes or right after a backslash does not
/// split. An empty line is a single empty field.
pub fn split_fields<'a>(line: &'a [u8], delimiters: &Delimiters) -> Vec<&'a [u8]> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, &byte) in line.iter().enumerate() {
        if escaped {
            escaped = false;
        } else if byte == b'\\' {
            escaped = true;
        } else if byte == b'"' {
            in_quotes = !in_quotes;
        } else if !in_quotes && delimiters.contains(byte) {
            fields.push(&line[start..i]);
            start = i + 1;
        }
    }
    fields.push(&line[start..]);
    fields
}
