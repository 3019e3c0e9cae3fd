//! Write a table back to disk
//!
//! Output goes to a temporary file in the target's directory and is moved
//! over the target only after every byte is flushed. A failed write leaves
//! the existing file untouched.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::grid::Table;

/// Replace the file at `path` with the serialized table
pub fn save_file(table: &Table, path: &Path, delimiter: char) -> io::Result<()> {
    replace_file(path, |out| table.write_to(out, delimiter))?;

    tracing::info!(
        "Wrote {} ({} rows, {} columns)",
        path.display(),
        table.row_count(),
        table.col_count()
    );
    Ok(())
}

fn replace_file<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<&File>) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)?;

    // Keep the mode of the file being replaced
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }

    let mut out = BufWriter::new(tmp.as_file());
    write(&mut out)?;
    out.flush()?;
    drop(out);

    tmp.persist(path).map_err(|e| {
        tracing::warn!("Failed to replace {}: {}", path.display(), e.error);
        e.error
    })?;
    Ok(())
}
