//! tabgrid - storage engine for a delimiter-separated table editor
//!
//! The [`grid`] module holds the table itself; the remaining modules read
//! tables from text, run edit commands against them and wire up the
//! command-line tool.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod delimiter;
pub mod grid;
pub mod loader;
pub mod reader;
pub mod tracing;
pub mod writer;

// Re-export commonly used types
pub use commands::{parse_sequence, Command, CommandRunner};
pub use config::GridConfig;
pub use delimiter::Delimiters;
pub use grid::{Cell, CellKind, GridError, Table};
pub use loader::{load_file, load_table};
pub use writer::save_file;
