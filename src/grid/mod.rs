//! Grid storage engine
//!
//! Holds a two-dimensional grid of typed text cells and supports inserting
//! or removing rows and columns anywhere while every row keeps exactly
//! `col_count` live cells.
//!
//! # Architecture
//!
//! Ownership is a plain tree; each level grows its storage with the shared
//! rule in [`growth`].
//!
//! ```text
//! Table
//! └── Row (one per logical row)
//!     └── Cell (one per logical column)
//!         ├── TextBuffer (raw bytes)
//!         └── CellKind (how to read them)
//! ```

mod buffer;
mod cell;
mod error;
pub mod growth;
mod row;
mod table;

pub use buffer::{Chunk, TextBuffer};
pub use cell::{Cell, CellKind, DEFAULT_CELL_CAPACITY};
pub use error::{GridError, Result};
pub use row::Row;
pub use table::Table;
