//! Command sequences that edit a table
//!
//! A sequence is a `;`-separated list of commands, for example
//! `[2,_];irow;[_,3];dcol;[1,1];set total`. Selectors pick the cells
//! later commands act on; the initial selection is `[1,1]`.
//!
//! | Command    | Effect                                           |
//! |------------|--------------------------------------------------|
//! | `[R,C]`    | select one cell; `_` selects a whole row/column  |
//! | `[R1,C1,R2,C2]` | select a rectangle                          |
//! | `irow`     | insert a row before the first selected row       |
//! | `arow`     | append a row after the last selected row         |
//! | `drow`     | delete the selected rows                         |
//! | `icol`     | insert a column before the first selected column |
//! | `acol`     | append a column after the last selected column   |
//! | `dcol`     | delete the selected columns                      |
//! | `set STR`  | set the text of every selected cell              |
//! | `clear`    | empty every selected cell                        |

use thiserror::Error;

use crate::grid::{Cell, GridError, Table};

/// Commands that are recognised but need formula evaluation
const UNSUPPORTED: &[&str] = &["swap", "sum", "avg", "count", "len", "min", "max", "find"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("invalid command {command:?}: {reason}")]
    Parse { command: String, reason: String },
    #[error("command {0:?} is not supported")]
    Unsupported(String),
    #[error(transparent)]
    Grid(#[from] GridError),
}

fn parse_error(command: &str, reason: impl Into<String>) -> CommandError {
    CommandError::Parse {
        command: command.to_string(),
        reason: reason.into(),
    }
}

/// Inclusive 1-based span of rows or columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    All,
    Range(usize, usize),
}

impl Span {
    /// Existing 1-based `(first, last)` within `count` elements
    fn existing(self, count: usize) -> Option<(usize, usize)> {
        let (from, to) = match self {
            Span::All => (1, count),
            Span::Range(from, to) => (from, to.min(count)),
        };
        (from <= to && count > 0).then_some((from, to))
    }

    /// Position for inserting before the span
    fn before(self, count: usize) -> usize {
        match self {
            Span::All => 1,
            Span::Range(from, _) => from.min(count + 1),
        }
    }

    /// Position for inserting after the span
    fn after(self, count: usize) -> usize {
        match self {
            Span::All => count + 1,
            Span::Range(_, to) => to.min(count) + 1,
        }
    }
}

/// Current selection, addressed in 1-based rows and columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub rows: Span,
    pub cols: Span,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            rows: Span::Range(1, 1),
            cols: Span::Range(1, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(Selection),
    InsertRow,
    AppendRow,
    DeleteRow,
    InsertColumn,
    AppendColumn,
    DeleteColumn,
    Set(String),
    Clear,
}

impl Command {
    /// Parse a single command
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        if input.starts_with('[') {
            return parse_selector(input).map(Command::Select);
        }

        let (name, arg) = match input.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim())),
            None => (input, None),
        };

        let command = match name {
            "irow" => Command::InsertRow,
            "arow" => Command::AppendRow,
            "drow" => Command::DeleteRow,
            "icol" => Command::InsertColumn,
            "acol" => Command::AppendColumn,
            "dcol" => Command::DeleteColumn,
            "clear" => Command::Clear,
            "set" => {
                return Ok(Command::Set(arg.unwrap_or_default().to_string()));
            }
            "" => return Err(parse_error(input, "empty command")),
            name if UNSUPPORTED.contains(&name) => {
                return Err(CommandError::Unsupported(name.to_string()))
            }
            _ => return Err(parse_error(input, "unknown command")),
        };

        if arg.is_some_and(|a| !a.is_empty()) {
            return Err(parse_error(input, "unexpected argument"));
        }
        Ok(command)
    }
}

/// Parse a `;`-separated command sequence
///
/// Separators inside double quotes belong to the command text; blank
/// segments are skipped.
pub fn parse_sequence(input: &str) -> Result<Vec<Command>, CommandError> {
    let mut commands = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, ch) in input.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == ';' && !in_quotes {
            push_command(&mut commands, &input[start..i])?;
            start = i + 1;
        }
    }
    push_command(&mut commands, &input[start..])?;
    Ok(commands)
}

fn push_command(commands: &mut Vec<Command>, segment: &str) -> Result<(), CommandError> {
    if !segment.trim().is_empty() {
        commands.push(Command::parse(segment)?);
    }
    Ok(())
}

fn parse_selector(input: &str) -> Result<Selection, CommandError> {
    let inner = input
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| parse_error(input, "selector must be enclosed in []"))?;

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [row, col] => Ok(Selection {
            rows: single(input, row)?,
            cols: single(input, col)?,
        }),
        [row_from, col_from, row_to, col_to] => Ok(Selection {
            rows: range(input, row_from, row_to)?,
            cols: range(input, col_from, col_to)?,
        }),
        _ => Err(parse_error(input, "selector needs 2 or 4 fields")),
    }
}

fn index(input: &str, field: &str) -> Result<usize, CommandError> {
    match field.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(parse_error(input, format!("{field:?} is not a positive number"))),
    }
}

fn single(input: &str, field: &str) -> Result<Span, CommandError> {
    if field == "_" {
        return Ok(Span::All);
    }
    let n = index(input, field)?;
    Ok(Span::Range(n, n))
}

fn range(input: &str, from: &str, to: &str) -> Result<Span, CommandError> {
    let from = index(input, from)?;
    let to = if to == "-" { usize::MAX } else { index(input, to)? };
    if from > to {
        return Err(parse_error(input, "range end is before its start"));
    }
    Ok(Span::Range(from, to))
}

/// Runs commands against a table, tracking the selection between them
#[derive(Debug, Default)]
pub struct CommandRunner {
    selection: Selection,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Run every command in order, stopping at the first failure
    pub fn run(&mut self, table: &mut Table, commands: &[Command]) -> Result<(), CommandError> {
        for command in commands {
            self.execute(table, command)?;
        }
        Ok(())
    }

    pub fn execute(&mut self, table: &mut Table, command: &Command) -> Result<(), CommandError> {
        tracing::debug!("Executing {:?} with selection {:?}", command, self.selection);
        let Selection { rows, cols } = self.selection;

        match command {
            Command::Select(selection) => self.selection = *selection,
            Command::InsertRow => table.insert_row(rows.before(table.row_count()))?,
            Command::AppendRow => table.insert_row(rows.after(table.row_count()))?,
            Command::InsertColumn => table.insert_column(cols.before(table.col_count()))?,
            Command::AppendColumn => table.insert_column(cols.after(table.col_count()))?,
            Command::DeleteRow => {
                if let Some((first, last)) = rows.existing(table.row_count()) {
                    for _ in first..=last {
                        table.delete_row(first)?;
                    }
                }
            }
            Command::DeleteColumn => {
                if let Some((first, last)) = cols.existing(table.col_count()) {
                    for _ in first..=last {
                        table.delete_column(first)?;
                    }
                }
            }
            Command::Set(text) => self.for_each_cell(table, |cell| cell.set_text(text.as_bytes()))?,
            Command::Clear => self.for_each_cell(table, |cell| {
                cell.clear();
                Ok(())
            })?,
        }
        Ok(())
    }

    fn for_each_cell<F>(&self, table: &mut Table, mut f: F) -> Result<(), GridError>
    where
        F: FnMut(&mut Cell) -> Result<(), GridError>,
    {
        let (Some((row_first, row_last)), Some((col_first, col_last))) = (
            self.selection.rows.existing(table.row_count()),
            self.selection.cols.existing(table.col_count()),
        ) else {
            return Ok(());
        };

        for row in row_first..=row_last {
            for col in col_first..=col_last {
                if let Some(cell) = table.get_cell_mut(row - 1, col - 1) {
                    f(cell)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: usize, cols: usize) -> Table {
        let mut table = Table::new().unwrap();
        for _ in 0..rows {
            table.append_row().unwrap();
        }
        for _ in 0..cols {
            table.append_column().unwrap();
        }
        table
    }

    fn run(table: &mut Table, sequence: &str) {
        let commands = parse_sequence(sequence).unwrap();
        CommandRunner::new().run(table, &commands).unwrap();
    }

    #[test]
    fn test_parse_structural_commands() {
        assert_eq!(Command::parse("irow").unwrap(), Command::InsertRow);
        assert_eq!(Command::parse(" dcol ").unwrap(), Command::DeleteColumn);
        assert_eq!(
            Command::parse("set hello world").unwrap(),
            Command::Set("hello world".to_string())
        );
        assert_eq!(Command::parse("set").unwrap(), Command::Set(String::new()));
    }

    #[test]
    fn test_parse_selectors() {
        assert_eq!(
            Command::parse("[2,_]").unwrap(),
            Command::Select(Selection {
                rows: Span::Range(2, 2),
                cols: Span::All,
            })
        );
        assert_eq!(
            Command::parse("[1,2,3,-]").unwrap(),
            Command::Select(Selection {
                rows: Span::Range(1, 3),
                cols: Span::Range(2, usize::MAX),
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Command::parse("[0,1]"), Err(CommandError::Parse { .. })));
        assert!(matches!(Command::parse("[1]"), Err(CommandError::Parse { .. })));
        assert!(matches!(Command::parse("[3,1,2,1]"), Err(CommandError::Parse { .. })));
        assert!(matches!(Command::parse("irow 2"), Err(CommandError::Parse { .. })));
        assert!(matches!(Command::parse("frobnicate"), Err(CommandError::Parse { .. })));
        assert_eq!(
            Command::parse("sum [1,1]"),
            Err(CommandError::Unsupported("sum".to_string()))
        );
    }

    #[test]
    fn test_parse_sequence_keeps_quoted_separators() {
        let commands = parse_sequence(r#"[1,1];set "a;b";irow"#).unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Select(Selection::default()),
                Command::Set("\"a;b\"".to_string()),
                Command::InsertRow,
            ]
        );
    }

    #[test]
    fn test_irow_and_arow() {
        let mut t = table(2, 1);
        run(&mut t, "[1,1];set a;[2,1];set b;[2,_];irow;arow");
        // arow lands after the freshly inserted row, which is now row 2
        assert_eq!(t.serialize(','), "a\n\n\nb\n");
    }

    #[test]
    fn test_icol_and_acol_on_whole_table() {
        let mut t = table(1, 1);
        run(&mut t, "set x;[_,_];icol;acol");
        assert_eq!(t.serialize(','), ",x,\n");
    }

    #[test]
    fn test_structural_commands_on_empty_table() {
        let mut t = Table::new().unwrap();
        run(&mut t, "irow;icol;arow;acol");
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.col_count(), 2);
    }

    #[test]
    fn test_selection_past_edge_clamps_inserts() {
        let mut t = table(2, 2);
        run(&mut t, "[9,9];arow;acol;irow");
        assert_eq!(t.row_count(), 4);
        assert_eq!(t.col_count(), 3);
    }

    #[test]
    fn test_drow_and_dcol_ranges() {
        let mut t = table(4, 4);
        run(&mut t, "[2,2,3,3];drow;dcol");
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.col_count(), 2);

        run(&mut t, "[5,_];drow");
        assert_eq!(t.row_count(), 2);

        run(&mut t, "[_,_];drow");
        assert!(t.is_empty());
    }

    #[test]
    fn test_set_and_clear_rectangle() {
        let mut t = table(2, 3);
        run(&mut t, "[1,2,2,-];set 5;[2,3];clear");
        assert_eq!(t.serialize(':'), ":5:5\n:5:\n");
        assert_eq!(t.get_cell(0, 1).unwrap().kind(), crate::grid::CellKind::Integer);
    }

    #[test]
    fn test_runner_tracks_selection() {
        let mut t = table(1, 1);
        let mut runner = CommandRunner::new();
        assert_eq!(runner.selection(), Selection::default());

        let commands = parse_sequence("[2,3]").unwrap();
        runner.run(&mut t, &commands).unwrap();
        assert_eq!(
            runner.selection(),
            Selection {
                rows: Span::Range(2, 2),
                cols: Span::Range(3, 3),
            }
        );
    }

    #[test]
    fn test_blank_segments_are_skipped() {
        assert!(parse_sequence("").unwrap().is_empty());
        assert_eq!(parse_sequence("irow;;").unwrap(), vec![Command::InsertRow]);
    }
}
