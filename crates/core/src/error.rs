use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("parse {input:?}: {reason}")]
    MalformedUrl { input: String, reason: UrlError },

    #[error("template parse error in `{}`: {}", .name, .source)]
    TemplateSyntax { name: String, source: ParseError },

    #[error("Error rendering template: {}", .0)]
    Render(#[from] RenderError),

    #[error("Unknown template field: `{}`", .0)]
    UnknownField(String),

    #[error("JSON encoding error: {}", .0)]
    Json(#[from] serde_json::Error),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn malformed_url(input: &str, reason: UrlError) -> Self {
        Self::MalformedUrl {
            input: input.to_string(),
            reason,
        }
    }

    pub fn template_syntax(name: &str, source: ParseError) -> Self {
        Self::TemplateSyntax {
            name: name.to_string(),
            source,
        }
    }

    /// Whether this error only concerns a single input URL, so processing can
    /// carry on with the next one.
    pub fn is_per_url(&self) -> bool {
        matches!(self, Self::MalformedUrl { .. })
    }
}

/// Reasons a raw string could not be decomposed into a URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("missing protocol scheme")]
    MissingScheme,

    #[error("first path segment in URL cannot contain colon")]
    ColonInFirstSegment,

    #[error("invalid control character in URL")]
    ControlCharacter,

    #[error("missing ']' in host")]
    MissingBracket,

    #[error("invalid port {:?} after host", .0)]
    InvalidPort(String),

    #[error("invalid userinfo")]
    InvalidUserinfo,

    #[error("invalid URL escape {:?}", .0)]
    InvalidEscape(String),

    #[error("invalid character {:?} in host name", .0)]
    InvalidHostCharacter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_url_message() {
        let error = Error::malformed_url("http://[::1", UrlError::MissingBracket);
        assert_eq!(
            error.to_string(),
            "parse \"http://[::1\": missing ']' in host"
        );
        assert!(error.is_per_url());
    }

    #[test]
    fn test_url_error_messages_quote_offending_text() {
        assert_eq!(
            UrlError::InvalidPort(":abc".to_string()).to_string(),
            "invalid port \":abc\" after host"
        );
        assert_eq!(
            UrlError::InvalidEscape("%zz".to_string()).to_string(),
            "invalid URL escape \"%zz\""
        );
    }

    #[test]
    fn test_unknown_field_is_not_per_url() {
        assert!(!Error::UnknownField("nope".to_string()).is_per_url());
    }
}
