//! Command-line arguments and their mapping onto a [`QueryState`].

use std::path::PathBuf;

use clap::Parser;
use rowseek::{Dir, FieldFilter, QueryState, SortSpec, TableConfig};

use crate::input::InputFormat;
use crate::output::OutputFormat;

/// Search, filter, sort and paginate a JSON or CSV table.
#[derive(Debug, Clone, Parser)]
#[command(name = "rowseek", version, about)]
pub struct Args {
    /// Rows to query: a JSON array of objects or a CSV file with a header (`-` reads stdin)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Table config (YAML or JSON) with columns, page sizes and filter defaults
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Free-text search, case-insensitive
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Keep rows whose FIELD equals VALUE exactly (`VALUE` of `all` disables)
    #[arg(short, long, value_name = "FIELD=VALUE", value_parser = parse_filter)]
    pub filter: Option<FieldFilter>,

    /// Sort by this field
    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Zero-based page to show
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub page: i64,

    /// Rows per page (defaults to the config's first option)
    #[arg(short = 'n', long, value_name = "N", allow_negative_numbers = true)]
    pub page_size: Option<i64>,

    /// Fields searched by --search (defaults to the config's columns, or all fields)
    #[arg(long, value_name = "A,B,..", value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Input format (defaults from the file extension)
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Log pipeline activity to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the query state: config defaults first, then the flags given.
    pub fn query_state(&self, config: &TableConfig) -> QueryState {
        let mut state = config.default_state();

        if let Some(page_size) = self.page_size {
            state = state.with_page_size(page_size);
        }
        if let Some(filter) = &self.filter {
            state = state.with_filter(filter.clone());
        }
        if let Some(search) = &self.search {
            state = state.with_search(search.clone());
        }
        if let Some(field) = &self.sort {
            let dir = if self.desc { Dir::Desc } else { Dir::Asc };
            state = state.with_sort(SortSpec::new(field.clone(), dir));
        }
        if !self.fields.is_empty() {
            state = state.with_searchable_fields(self.fields.iter().cloned());
        }

        state.with_page(self.page)
    }
}

/// Parses `FIELD=VALUE`; only the first `=` separates.
pub fn parse_filter(raw: &str) -> Result<FieldFilter, String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok(FieldFilter::new(field.trim(), value))
        }
        _ => Err(format!("expected FIELD=VALUE, got `{raw}`")),
    }
}
