//! urlfmt Core Library
//!
//! This crate provides the core functionality for urlfmt, a tool that takes URLs
//! apart, optionally rewrites individual components, and prints the result as
//! JSON, through a template, or as a plain URL.
//!
//! # Key Features
//!
//! - **Parsing**: Decompose URLs into scheme, userinfo, host, path, query and fragment
//! - **Normalization**: Recover schemeless `host/path` input and remove dot segments
//! - **Overrides**: Replace components with literals, field references or templates
//! - **Flattening**: Project a URL into a record with split path and grouped query
//! - **Rendering**: Newline-delimited JSON, template lines or plain URLs
//!
//! # Examples
//!
//! Rewriting the port of a URL:
//!
//! ```
//! use urlfmt_core::config::Config;
//! use urlfmt_core::overrides::{Expression, Overrides};
//! use urlfmt_core::pipeline::process;
//! use urlfmt_core::render::OutputMode;
//!
//! let config = Config {
//!     resolve: true,
//!     overrides: Overrides {
//!         port: Some(Expression::parse_override("set-port", "9090")?),
//!         ..Overrides::default()
//!     },
//!     output: OutputMode::Plain,
//! };
//!
//! let mut out = Vec::new();
//! process("http://example.com:8080/a/../b", &config, &mut out)?;
//! assert_eq!(out, b"http://example.com:9090/b\n");
//! # Ok::<(), urlfmt_core::error::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod escape;
pub mod flatten;
pub mod normalize;
pub mod overrides;
pub mod pipeline;
pub mod render;
pub mod url;
