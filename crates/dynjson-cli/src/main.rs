//! `dynjson` CLI: read and edit JSON documents by path from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Print the value at a path (integers are array indices)
//! echo '{"a":[{"b":1}]}' | dynjson get a 0 b
//!
//! # Read a typed value; coercion rules match the library
//! dynjson -i config.json type duration server timeout
//!
//! # Write a JSON literal, creating intermediate objects
//! dynjson -i config.json set server host '"example.org"' --in-place
//!
//! # Delete an array element and print the result, indented
//! dynjson -i data.json --pretty del items 2
//!
//! # Re-encode a document
//! dynjson -i data.json --pretty fmt -o data.pretty.json
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`; `-v` turns on
//! debug output for path failures.

use anyhow::{bail, Context, Result};
use chrono::TimeDelta;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dynjson::{Access, Document, Modify, Segment};
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dynjson",
    version,
    about = "Read and edit JSON documents by path"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Input file (reads from stdin if omitted)
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// Indent JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Log path failures and document I/O to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the JSON value at a path
    Get {
        /// Path segments; integers select array elements
        #[arg(allow_negative_numbers = true)]
        path: Vec<String>,
    },
    /// Write a JSON literal at a path
    Set {
        /// Path segments followed by the value, e.g. `a b 0 '"text"'`
        #[arg(required = true, allow_negative_numbers = true)]
        parts: Vec<String>,
        #[command(flatten)]
        output: Output,
    },
    /// Remove the value at a path from its parent
    Del {
        /// Path segments; integers select array elements
        #[arg(allow_negative_numbers = true)]
        path: Vec<String>,
        #[command(flatten)]
        output: Output,
    },
    /// Print the value at a path coerced to a scalar type
    Type {
        kind: Kind,
        /// Path segments; integers select array elements
        #[arg(allow_negative_numbers = true)]
        path: Vec<String>,
    },
    /// Re-encode the document
    Fmt {
        #[command(flatten)]
        output: Output,
    },
}

/// Where an edited document goes.
#[derive(Args)]
struct Output {
    /// Output file (writes to stdout if omitted)
    #[arg(short, long, conflicts_with = "in_place")]
    output: Option<String>,

    /// Overwrite the input file
    #[arg(long)]
    in_place: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Bool,
    String,
    Int,
    Int64,
    Uint64,
    Float64,
    Time,
    Duration,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let input = cli.input.as_deref();
    let mut doc = read_input(input)?;
    tracing::debug!(input = input.unwrap_or("<stdin>"), "loaded document");

    match cli.command {
        Commands::Get { path } => {
            let path = parse_path(&path);
            let node = doc.get(&path).context("Path not found")?;
            let rendered = render(&node.to_document(), cli.pretty)?;
            write_output(None, &rendered)?;
        }
        Commands::Set { mut parts, output } => {
            let target = output_target(&output, input)?;
            let literal = parts.pop().context("Missing value to write")?;
            let value: serde_json::Value = serde_json::from_str(&literal).with_context(|| {
                format!("Value is not a JSON literal: {literal} (quote strings as '\"{literal}\"')")
            })?;
            doc.set(&parse_path(&parts), value)
                .context("Failed to set value")?;
            write_output(target, &render(&doc, cli.pretty)?)?;
        }
        Commands::Del { path, output } => {
            let target = output_target(&output, input)?;
            doc.del(&parse_path(&path))
                .context("Failed to delete value")?;
            write_output(target, &render(&doc, cli.pretty)?)?;
        }
        Commands::Type { kind, path } => {
            let path = parse_path(&path);
            let text = read_typed(&doc, kind, &path)
                .with_context(|| format!("Failed to read {} value", kind_name(kind)))?;
            write_output(None, &text)?;
        }
        Commands::Fmt { output } => {
            let target = output_target(&output, input)?;
            write_output(target, &render(&doc, cli.pretty)?)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Each argument becomes one segment: integers are indices, anything else a key.
fn parse_path(args: &[String]) -> Vec<Segment> {
    args.iter()
        .map(|arg| match arg.parse::<Segment>() {
            Ok(segment) => segment,
            Err(never) => match never {},
        })
        .collect()
}

fn read_typed(doc: &Document, kind: Kind, path: &[Segment]) -> dynjson::Result<String> {
    Ok(match kind {
        Kind::Bool => doc.bool(path)?.to_string(),
        Kind::String => doc.string(path)?,
        Kind::Int => doc.int(path)?.to_string(),
        Kind::Int64 => doc.int64(path)?.to_string(),
        Kind::Uint64 => doc.uint64(path)?.to_string(),
        Kind::Float64 => doc.float64(path)?.to_string(),
        Kind::Time => doc.time(path)?.to_rfc3339(),
        Kind::Duration => format_duration(doc.duration(path)?),
    })
}

/// Human-readable form such as `1h 30m`, with a leading `-` when negative.
fn format_duration(delta: TimeDelta) -> String {
    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    match delta.abs().to_std() {
        Ok(magnitude) => format!("{sign}{}", humantime::format_duration(magnitude)),
        Err(_) => delta.to_string(),
    }
}

fn kind_name(kind: Kind) -> &'static str {
    match kind {
        Kind::Bool => "bool",
        Kind::String => "string",
        Kind::Int => "int",
        Kind::Int64 => "int64",
        Kind::Uint64 => "uint64",
        Kind::Float64 => "float64",
        Kind::Time => "time",
        Kind::Duration => "duration",
    }
}

fn render(doc: &Document, pretty: bool) -> Result<String> {
    if pretty {
        Ok(doc.to_string_pretty()?)
    } else {
        Ok(doc.to_string())
    }
}

/// Resolve `-o` / `--in-place` to a file, or `None` for stdout.
fn output_target<'a>(output: &'a Output, input: Option<&'a str>) -> Result<Option<&'a str>> {
    if output.in_place {
        match input {
            Some(path) => Ok(Some(path)),
            None => bail!("--in-place requires an input file (-i)"),
        }
    } else {
        Ok(output.output.as_deref())
    }
}

fn read_input(path: Option<&str>) -> Result<Document> {
    match path {
        Some(path) => {
            Document::from_file(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => Document::from_reader(Some(io::stdin().lock())).context("Failed to read from stdin"),
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{content}\n"))
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
