//! urlfmt CLI Library
//!
//! This crate provides the `url` command-line tool. It parses its flags, compiles
//! the override and output templates once, and then feeds every URL argument
//! through the core pipeline in order.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing, including single-dash long flags
//! - [`run`]: The per-argument loop writing to the given output and error streams
//!
//! # Examples
//!
//! ```bash
//! # JSON, one object per URL
//! url 'https://example.com:8080/a/b?x=1&x=2'
//!
//! # Rewrite components and print the URL
//! url -plain -set-hostname example.org -set-port 9090 http://old.com:8080/x
//!
//! # Template output
//! url -template '{scheme} {hostname} {query.x}' 'https://example.com/?x=1'
//!
//! # Remove dot segments
//! url -r -p http://example.com/a/b/../c
//! ```

use std::io::Write;

use urlfmt_core::error::Result;
use urlfmt_core::pipeline::{process_all, Summary};

use crate::cli_args::Args;

pub mod cli_args;

/// Version string printed by `-version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runs the tool for already-parsed arguments.
///
/// Templates are compiled before anything is written, so a template syntax
/// error leaves both streams untouched.
///
/// # Errors
///
/// Returns an error if a template does not parse or a stream cannot be written.
pub fn run<O: Write, E: Write>(args: &Args, out: &mut O, errors: &mut E) -> Result<Summary> {
    if args.version {
        writeln!(out, "{VERSION}")?;
        return Ok(Summary::default());
    }

    let config = args.config()?;
    process_all(&args.urls, &config, out, errors)
}
