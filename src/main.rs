#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;

use tabgrid::cli::{CliArgs, Output, RunConfig};
use tabgrid::{load_file, parse_sequence, save_file, CommandRunner, GridConfig, Table};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    tabgrid::tracing::init();

    if let Err(e) = run() {
        tracing::error!("{:#}", e);
        eprintln!("ERROR: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse();
    let config = GridConfig::load();
    let run = args.into_config(&config)?;

    let commands = parse_sequence(&run.commands)?;
    let mut table = load_file(&run.input, &run.delimiters, run.cell_capacity)?;

    CommandRunner::new()
        .run(&mut table, &commands)
        .context("command sequence failed")?;

    write_output(&table, &run)
}

fn write_output(table: &Table, run: &RunConfig) -> Result<()> {
    let delimiter = run.delimiters.primary();
    match &run.output {
        Output::Stdout => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            table.write_to(&mut out, delimiter)?;
            out.flush()?;
        }
        Output::File(path) => {
            save_file(table, path, delimiter)
                .with_context(|| format!("unable to write {}", path.display()))?;
        }
    }
    Ok(())
}
