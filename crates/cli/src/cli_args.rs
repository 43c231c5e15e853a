//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure and compiles it
//! into the [`Config`] the pipeline runs with.

use std::ffi::OsString;

use clap::Parser;
use urlfmt_core::config::Config;
use urlfmt_core::error::Result;
use urlfmt_core::overrides::{Expression, Overrides};
use urlfmt_core::render::OutputMode;

/// Long flags that may also be written with a single dash, as in `-set-host`.
const LONG_FLAGS: &[&str] = &[
    "plain",
    "template",
    "resolve",
    "set-scheme",
    "set-host",
    "set-hostname",
    "set-port",
    "set-path",
    "set-query",
    "set-fragment",
    "set-opaque",
    "set-username",
    "set-no-username",
    "set-password",
    "set-no-password",
    "version",
    "help",
];

/// Command-line arguments for the `url` tool.
///
/// # Examples
///
/// ```rust
/// use urlfmt_cli::cli_args::Args;
///
/// // Go-style single-dash flags are accepted as well as `--plain`
/// let args = Args::parse_go_style(["url", "-plain", "http://example.com/"]);
/// assert!(args.plain);
/// assert_eq!(args.urls, vec!["http://example.com/"]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(name = "url", term_width = 0)] // Just to make testing across clap features easier
#[allow(clippy::struct_excessive_bools)] // silence clippy's warning on this struct
pub struct Args {
    /// Print plain URLs instead of JSON (useful with the `set-*` flags).
    #[arg(long, short = 'p', action)]
    pub plain: bool,

    /// Print each URL through a template such as `{scheme}://{hostname}`.
    ///
    /// A value without `{` names a single field, e.g. `host`.
    #[arg(long, short = 't')]
    pub template: Option<String>,

    /// Remove `.` and `..` segments from paths.
    #[arg(long, short = 'r', action)]
    pub resolve: bool,

    /// Set the scheme component.
    #[arg(long)]
    pub set_scheme: Option<String>,

    /// Set the host component, including any port.
    #[arg(long)]
    pub set_host: Option<String>,

    /// Set the hostname, keeping the port.
    #[arg(long)]
    pub set_hostname: Option<String>,

    /// Set the port, keeping the hostname.
    #[arg(long)]
    pub set_port: Option<String>,

    /// Set the path component.
    #[arg(long)]
    pub set_path: Option<String>,

    /// Set the (raw) query component.
    #[arg(long)]
    pub set_query: Option<String>,

    /// Set the fragment component.
    #[arg(long)]
    pub set_fragment: Option<String>,

    /// Set the opaque component.
    #[arg(long)]
    pub set_opaque: Option<String>,

    /// Set the username.
    #[arg(long)]
    pub set_username: Option<String>,

    /// Remove the username.
    #[arg(long, action)]
    pub set_no_username: bool,

    /// Set the password.
    #[arg(long)]
    pub set_password: Option<String>,

    /// Remove the password.
    #[arg(long, action)]
    pub set_no_password: bool,

    /// Print the version and exit.
    #[arg(long, action)]
    pub version: bool,

    /// The URLs to process, in order.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,
}

impl Args {
    /// Parses arguments, accepting single-dash long flags.
    pub fn parse_go_style<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(normalize_flags(args))
    }

    /// Compiles the override and output templates.
    ///
    /// # Errors
    ///
    /// Returns a template syntax error naming the offending flag.
    pub fn config(&self) -> Result<Config<'_>> {
        let overrides = Overrides {
            scheme: compile("set-scheme", self.set_scheme.as_deref())?,
            host: compile("set-host", self.set_host.as_deref())?,
            hostname: compile("set-hostname", self.set_hostname.as_deref())?,
            port: compile("set-port", self.set_port.as_deref())?,
            path: compile("set-path", self.set_path.as_deref())?,
            raw_query: compile("set-query", self.set_query.as_deref())?,
            fragment: compile("set-fragment", self.set_fragment.as_deref())?,
            opaque: compile("set-opaque", self.set_opaque.as_deref())?,
            username: compile("set-username", self.set_username.as_deref())?,
            clear_username: self.set_no_username,
            password: compile("set-password", self.set_password.as_deref())?,
            clear_password: self.set_no_password,
        };

        Ok(Config {
            resolve: self.resolve,
            overrides,
            output: OutputMode::select(self.plain, self.template.as_deref())?,
        })
    }
}

fn compile<'a>(flag: &str, source: Option<&'a str>) -> Result<Option<Expression<'a>>> {
    source
        .map(|source| Expression::parse_override(flag, source))
        .transpose()
}

/// Rewrites `-flag` and `-flag=value` into their `--` form for the known long
/// flags. Arguments after `--` are left alone.
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut past_terminator = false;

    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if past_terminator {
                return arg;
            }
            if arg == "--" {
                past_terminator = true;
                return arg;
            }

            match arg.to_str() {
                Some(text) if is_single_dash_long_flag(text) => OsString::from(format!("-{text}")),
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long_flag(arg: &str) -> bool {
    let Some(flag) = arg.strip_prefix('-') else {
        return false;
    };
    if flag.starts_with('-') {
        return false;
    }

    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_go_style(["url"]);

        assert!(!args.plain);
        assert!(args.template.is_none());
        assert!(!args.resolve);
        assert!(args.set_scheme.is_none());
        assert!(args.set_port.is_none());
        assert!(!args.set_no_username);
        assert!(!args.set_no_password);
        assert!(!args.version);
        assert!(args.urls.is_empty());
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_go_style(["url", "-p", "-r", "-t", "host", "http://a/"]);

        assert!(args.plain);
        assert!(args.resolve);
        assert_eq!(args.template, Some("host".to_string()));
        assert_eq!(args.urls, vec!["http://a/"]);
    }

    #[test]
    fn test_args_single_dash_long_flags() {
        let args = Args::parse_go_style([
            "url",
            "-plain",
            "-set-hostname",
            "example.com",
            "-set-port=9090",
            "-set-no-password",
            "http://a/",
            "http://b/",
        ]);

        assert!(args.plain);
        assert_eq!(args.set_hostname, Some("example.com".to_string()));
        assert_eq!(args.set_port, Some("9090".to_string()));
        assert!(args.set_no_password);
        assert_eq!(args.urls, vec!["http://a/", "http://b/"]);
    }

    #[test]
    fn test_args_double_dash_long_flags() {
        let args = Args::parse_go_style(["url", "--set-query", "a=1", "--version"]);

        assert_eq!(args.set_query, Some("a=1".to_string()));
        assert!(args.version);
    }

    #[test]
    fn test_normalize_flags_stops_at_terminator() {
        let normalized = normalize_flags(["url", "-plain", "--", "-plain", "-x"]);

        assert_eq!(normalized, vec!["url", "--plain", "--", "-plain", "-x"]);
    }

    #[test]
    fn test_normalize_flags_leaves_unknown_and_short() {
        assert!(!is_single_dash_long_flag("-p"));
        assert!(!is_single_dash_long_flag("-unknown"));
        assert!(!is_single_dash_long_flag("--plain"));
        assert!(!is_single_dash_long_flag("http://x/"));
        assert!(is_single_dash_long_flag("-template={host}"));
    }

    #[test]
    fn test_config_compiles_overrides() {
        let args = Args::parse_go_style(["url", "-set-path", ".host", "-set-no-username"]);
        let config = args.config().unwrap();

        assert!(config.overrides.path.is_some());
        assert!(config.overrides.clear_username);
        assert!(config.overrides.scheme.is_none());
        assert!(matches!(config.output, OutputMode::Json));
    }

    #[test]
    fn test_config_rejects_bad_template() {
        let args = Args::parse_go_style(["url", "-set-host", "{oops"]);
        assert!(args.config().is_err());

        let args = Args::parse_go_style(["url", "-template", "{oops"]);
        assert!(args.config().is_err());
    }
}
