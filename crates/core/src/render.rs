//! Output of processed URLs.

use std::io::Write;

use log::warn;

use crate::error::Result;
use crate::flatten::FlatRecord;
use crate::overrides::Expression;
use crate::url::Url;

/// How each processed URL is written out. Every mode writes one line per URL.
pub enum OutputMode<'a> {
    /// The re-serialized URL.
    Plain,
    /// A template rendered against the flat record.
    Template(Expression<'a>),
    /// The flat record as a JSON object.
    Json,
}

impl<'a> OutputMode<'a> {
    /// Picks the output mode, preferring plain output over a template over JSON.
    ///
    /// The template is compiled even when plain output wins, so a broken
    /// template is still reported before any URL is processed.
    ///
    /// # Errors
    ///
    /// Returns a template syntax error if `template` does not parse.
    pub fn select(plain: bool, template: Option<&'a str>) -> Result<Self> {
        let template = template
            .filter(|source| !source.is_empty())
            .map(|source| Expression::parse_output("template", source))
            .transpose()?;

        Ok(match (plain, template) {
            (true, _) => Self::Plain,
            (false, Some(template)) => Self::Template(template),
            (false, None) => Self::Json,
        })
    }

    /// Writes `url` to `out` followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or JSON encoding fails. Template execution
    /// failures are logged and produce an empty line.
    pub fn write<W: Write>(&self, url: &Url, out: &mut W) -> Result<()> {
        match self {
            Self::Plain => writeln!(out, "{url}")?,
            Self::Template(template) => {
                let record = FlatRecord::from(url);
                let line = template.render(&record).unwrap_or_else(|e| {
                    warn!("Could not render template for `{url}`: {e}");
                    String::new()
                });
                writeln!(out, "{line}")?;
            }
            Self::Json => {
                serde_json::to_writer(&mut *out, &FlatRecord::from(url))?;
                writeln!(out)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(mode: &OutputMode<'_>, raw: &str) -> String {
        let mut out = Vec::new();
        mode.write(&Url::parse(raw).unwrap(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_select_priority() {
        assert!(matches!(
            OutputMode::select(true, Some("{host}")).unwrap(),
            OutputMode::Plain
        ));
        assert!(matches!(
            OutputMode::select(false, Some("{host}")).unwrap(),
            OutputMode::Template(_)
        ));
        assert!(matches!(OutputMode::select(false, None).unwrap(), OutputMode::Json));
        assert!(matches!(OutputMode::select(false, Some("")).unwrap(), OutputMode::Json));
    }

    #[test]
    fn test_select_reports_bad_template_even_in_plain_mode() {
        assert!(OutputMode::select(true, Some("{host")).is_err());
    }

    #[test]
    fn test_plain() {
        assert_eq!(
            written(&OutputMode::Plain, "HTTP://h.com/a%20b?q#f"),
            "http://h.com/a%20b?q#f\n"
        );
    }

    #[test]
    fn test_template_and_bare_field() {
        let template = OutputMode::select(false, Some("{scheme} {query.a}")).unwrap();
        assert_eq!(written(&template, "http://h/?a=1&a=2"), "http 1,2\n");

        let field = OutputMode::select(false, Some("hostname")).unwrap();
        assert_eq!(written(&field, "http://h.com:1/"), "h.com\n");
    }

    #[test]
    fn test_template_failure_writes_empty_line() {
        let template = OutputMode::select(false, Some("nope")).unwrap();
        assert_eq!(written(&template, "http://h/"), "\n");
    }

    #[test]
    fn test_json_is_one_line() {
        let output = written(&OutputMode::Json, "http://h.com/");
        assert!(output.starts_with("{\"scheme\":\"http\""));
        assert!(output.ends_with("}\n"));
        assert_eq!(output.lines().count(), 1);
    }
}
