//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, PageArgs};
use crate::config::PageLimits;
use crate::error::{Error, Result, ResultExt};
use crate::pagination::{Page, PageRequest};
use serde_json::{json, Value};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing to stdout
    pub fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    /// Run the CLI command, writing to `out`
    pub fn run_to(&self, out: &mut impl Write) -> Result<()> {
        let limits = self.limits()?;
        match &self.cli.command {
            Commands::Page(args) => self.page(args, &limits, out),
            Commands::Walk(args) => self.walk(args, &limits, out),
            Commands::Limits => self.show_limits(&limits, out),
        }
    }

    fn limits(&self) -> Result<PageLimits> {
        match &self.cli.limits {
            Some(path) => PageLimits::load(path),
            None => Ok(PageLimits::default()),
        }
    }

    fn page(&self, args: &PageArgs, limits: &PageLimits, out: &mut impl Write) -> Result<()> {
        let items = load_items(&args.input, args.lines)?;
        let request = build_request(args)?;

        let page = limits.collect_page(&items, Some(&request))?;
        info!(
            visited = page.items.len(),
            total = page.pagination.total,
            "page collected"
        );
        self.write_page(1, &page, out)
    }

    fn walk(&self, args: &PageArgs, limits: &PageLimits, out: &mut impl Write) -> Result<()> {
        let items = load_items(&args.input, args.lines)?;
        let mut request = Some(build_request(args)?);
        let mut number = 0;

        while let Some(current) = request {
            number += 1;
            let page = limits.collect_page(&items, Some(&current))?;
            debug!(page = number, visited = page.items.len(), "page collected");
            self.write_page(number, &page, out)?;
            request = current.continue_from(&page.pagination);
        }

        info!(pages = number, total = items.len(), "walk finished");
        Ok(())
    }

    fn show_limits(&self, limits: &PageLimits, out: &mut impl Write) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(limits)?)?,
            OutputFormat::Pretty => {
                writeln!(out, "default_limit: {}", limits.default_limit)?;
                writeln!(out, "max_limit: {}", limits.max_limit)?;
            }
        }
        Ok(())
    }

    fn write_page(&self, number: usize, page: &Page<&Value>, out: &mut impl Write) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                // same wire form --request-json reads back
                let line = json!({
                    "page": number,
                    "items": page.items,
                    "pagination": page.pagination,
                });
                writeln!(out, "{line}")?;
            }
            OutputFormat::Pretty => {
                let next_key = page.pagination.next_key.as_deref().map_or_else(
                    || "-".to_string(),
                    |key| String::from_utf8_lossy(key).into_owned(),
                );
                writeln!(
                    out,
                    "page {number}: {} items, total {}, next_key {next_key}",
                    page.items.len(),
                    page.pagination.total
                )?;
                for item in &page.items {
                    writeln!(out, "  [{}] {}", item.index, item.value)?;
                }
            }
        }
        Ok(())
    }
}

/// Build a page request from CLI arguments
fn build_request(args: &PageArgs) -> Result<PageRequest> {
    if let Some(request_json) = &args.request_json {
        return serde_json::from_str(request_json).context("Invalid --request-json");
    }

    let mut request = PageRequest::new()
        .with_offset(args.offset)
        .with_limit(args.limit);
    if let Some(key) = &args.key {
        request = request.with_key(key.clone());
    }
    if args.reverse {
        request = request.reversed();
    }
    Ok(request)
}

/// Load the collection to page over.
///
/// JSON input must be a top-level array; with `lines` every line of the file
/// becomes a string item.
pub fn load_items(path: impl AsRef<Path>, lines: bool) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;

    if lines {
        return Ok(content
            .lines()
            .map(|line| Value::String(line.to_string()))
            .collect());
    }

    match serde_json::from_str::<Value>(&content)? {
        Value::Array(items) => Ok(items),
        other => Err(Error::config(format!(
            "Input '{}' must be a JSON array, got {}",
            path.display(),
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
