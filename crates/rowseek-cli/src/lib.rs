//! Command-line front end for the `rowseek` query pipeline.
//!
//! ```text
//! rowseek users.csv --filter status=active --sort name -n 10
//! rowseek users.json -c table.yaml -s alice -o json
//! ```
//!
//! The binary is a thin shell: [`run`] loads the rows and the optional table
//! config, turns the flags into a [`rowseek::QueryState`], runs it and writes
//! one rendered page.

pub mod args;
pub mod config;
pub mod input;
pub mod logging;
pub mod output;

use std::io::Write;

use anyhow::{Context, Result};
use rowseek::TableConfig;
use tracing::info;

pub use args::Args;
pub use input::{InputFormat, Table};
pub use output::OutputFormat;

/// Runs one query as described by `args`, writing the page to `out`.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => TableConfig::default(),
    };
    let table = input::read_table(&args.input, args.format)?;

    let state = args.query_state(&config);
    let result = state.run(&table.rows).context("query failed")?;
    let info = state.page_info(&result)?;
    info!(total = result.total, shown = result.len(), "{info}");

    let rendered = match args.output {
        OutputFormat::Json => output::render_json(&result.rows, &info)?,
        OutputFormat::Text => {
            let columns = output::text_columns(&config, &table);
            output::render_text(&columns, &result.rows, &info)
        }
    };
    writeln!(out, "{rendered}").context("failed to write output")?;
    Ok(())
}
