//! Command-line argument parsing
//!
//! `tabgrid [-d DELIM] COMMANDS FILE`

use clap::Parser;
use std::path::PathBuf;

use crate::config::GridConfig;
use crate::delimiter::{DelimiterError, Delimiters};

/// Edit a delimiter-separated table with a command sequence
#[derive(Parser, Debug)]
#[command(name = "tabgrid", version, about = "Edit a delimiter-separated table")]
pub struct CliArgs {
    /// Delimiter characters; the first one is used on output
    #[arg(short = 'd', long = "delim", value_name = "DELIM")]
    pub delimiters: Option<String>,

    /// Print the result instead of writing it back to FILE
    #[arg(long)]
    pub stdout: bool,

    /// `;`-separated command sequence, e.g. "[2,_];irow;[1,1];set x"
    #[arg(value_name = "COMMANDS")]
    pub commands: String,

    /// Table file to edit
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Where the edited table goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

/// Run configuration derived from CLI arguments and the config file
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub delimiters: Delimiters,
    pub commands: String,
    pub input: PathBuf,
    pub output: Output,
    pub cell_capacity: usize,
}

impl CliArgs {
    /// Merge parsed CLI args with `config`; flags win over the config file
    pub fn into_config(self, config: &GridConfig) -> Result<RunConfig, DelimiterError> {
        let delimiters = match &self.delimiters {
            Some(delims) => Delimiters::parse(delims)?,
            None => config.delimiters(),
        };

        let output = if self.stdout {
            Output::Stdout
        } else {
            Output::File(self.file.clone())
        };

        Ok(RunConfig {
            delimiters,
            commands: self.commands,
            input: self.file,
            output,
            cell_capacity: config.cell_capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(delimiters: Option<&str>, stdout: bool) -> CliArgs {
        CliArgs {
            delimiters: delimiters.map(str::to_string),
            stdout,
            commands: "irow".to_string(),
            file: PathBuf::from("table.txt"),
        }
    }

    #[test]
    fn test_parse_full_argv() {
        let args = CliArgs::try_parse_from(["tabgrid", "-d", ":,", "[1,1];irow", "t.txt"]).unwrap();
        assert_eq!(args.delimiters.as_deref(), Some(":,"));
        assert_eq!(args.commands, "[1,1];irow");
        assert_eq!(args.file, PathBuf::from("t.txt"));
        assert!(!args.stdout);
    }

    #[test]
    fn test_missing_file_is_rejected() {
        assert!(CliArgs::try_parse_from(["tabgrid", "irow"]).is_err());
    }

    #[test]
    fn test_config_delimiter_used_when_flag_absent() {
        let config = GridConfig {
            delimiter: ";".to_string(),
            ..GridConfig::default()
        };
        let run = args(None, false).into_config(&config).unwrap();
        assert_eq!(run.delimiters.primary(), ';');
    }

    #[test]
    fn test_flag_overrides_config() {
        let config = GridConfig {
            delimiter: ";".to_string(),
            ..GridConfig::default()
        };
        let run = args(Some("|"), false).into_config(&config).unwrap();
        assert_eq!(run.delimiters.primary(), '|');
    }

    #[test]
    fn test_invalid_delimiter_flag() {
        let err = args(Some(""), false)
            .into_config(&GridConfig::default())
            .unwrap_err();
        assert_eq!(err, DelimiterError::Empty);
    }

    #[test]
    fn test_output_target() {
        let run = args(None, true).into_config(&GridConfig::default()).unwrap();
        assert_eq!(run.output, Output::Stdout);

        let run = args(None, false).into_config(&GridConfig::default()).unwrap();
        assert_eq!(run.output, Output::File(PathBuf::from("table.txt")));
        assert_eq!(run.cell_capacity, 20);
    }
}
