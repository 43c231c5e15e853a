use std::io::Write;

use log::debug;

use crate::config::Config;
use crate::error::Result;
use crate::normalize;
use crate::url::Url;

/// Parses, normalizes, overrides and writes a single input URL.
///
/// # Errors
///
/// Returns [`crate::error::Error::MalformedUrl`] if `raw` cannot be parsed, in
/// which case nothing is written, or an I/O error if writing fails.
pub fn process<W: Write>(raw: &str, config: &Config<'_>, out: &mut W) -> Result<()> {
    let mut url = normalize::recover_schemeless(Url::parse(raw)?);

    if config.resolve {
        normalize::resolve(&mut url);
    }

    config.overrides.apply(&mut url);
    debug!("Processed `{raw}` into `{url}`");

    config.output.write(&url, out)
}

/// Counts of a run over several inputs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub processed: usize,
    pub failed: usize,
}

impl Summary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Processes every input in order. Parse failures are reported to `errors`
/// and do not stop the remaining inputs.
///
/// # Errors
///
/// Returns an error only when writing to either stream fails.
pub fn process_all<I, S, W, E>(
    inputs: I,
    config: &Config<'_>,
    out: &mut W,
    errors: &mut E,
) -> Result<Summary>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    W: Write,
    E: Write,
{
    let mut summary = Summary::default();

    for input in inputs {
        summary.processed += 1;
        match process(input.as_ref(), config, out) {
            Ok(()) => {}
            Err(e) if e.is_per_url() => {
                writeln!(errors, "URL parse error: {e}")?;
                summary.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_input_is_skipped() {
        let config = Config {
            output: crate::render::OutputMode::Plain,
            ..Config::default()
        };
        let mut out = Vec::new();
        let mut errors = Vec::new();

        let summary =
            process_all(["http://a/", "http://[::1", "b.com"], &config, &mut out, &mut errors)
                .unwrap();

        assert_eq!(summary, Summary { processed: 3, failed: 1 });
        assert!(!summary.is_success());
        assert_eq!(String::from_utf8(out).unwrap(), "http://a/\n//b.com\n");
        assert_eq!(
            String::from_utf8(errors).unwrap(),
            "URL parse error: parse \"http://[::1\": missing ']' in host\n"
        );
    }
}
