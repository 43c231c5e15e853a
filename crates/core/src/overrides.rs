//! Per-component replacement of URL fields.
//!
//! Every component can carry one [`Expression`], compiled once at startup and
//! rendered against the URL as it stands when that component's turn comes, so
//! later components see the effect of earlier ones.

use std::borrow::Cow;

use leon::{Template, Values};
use log::warn;

use crate::error::{Error, Result};
use crate::url::{split_host_port, Url};

/// A replacement value for a single component.
pub enum Expression<'a> {
    /// Used verbatim.
    Literal(&'a str),
    /// A single field looked up by name, such as `.host`.
    Field(&'a str),
    /// A leon template such as `{scheme}://{hostname}`.
    Template(Template<'a>),
}

impl<'a> Expression<'a> {
    /// Compiles an override value.
    ///
    /// Values starting with `.` and without `{` are field references; values
    /// containing `{` are templates; anything else is a literal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateSyntax`] naming `name` if the template does not parse.
    pub fn parse_override(name: &str, source: &'a str) -> Result<Self> {
        if source.contains('{') {
            Self::compile(name, source)
        } else if source.starts_with('.') {
            Ok(Self::Field(source))
        } else {
            Ok(Self::Literal(source))
        }
    }

    /// Compiles an output template. A value without `{` names a single field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateSyntax`] naming `name` if the template does not parse.
    pub fn parse_output(name: &str, source: &'a str) -> Result<Self> {
        if source.contains('{') {
            Self::compile(name, source)
        } else {
            Ok(Self::Field(source))
        }
    }

    fn compile(name: &str, source: &'a str) -> Result<Self> {
        Template::parse(source)
            .map(Self::Template)
            .map_err(|e| Error::template_syntax(name, e))
    }

    /// Renders the expression against `values`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] or [`Error::Render`] when a referenced
    /// field does not exist.
    pub fn render(&self, values: &impl Values) -> Result<String> {
        match self {
            Self::Literal(value) => Ok((*value).to_string()),
            Self::Field(name) => values
                .get_value(name)
                .map(Cow::into_owned)
                .ok_or_else(|| Error::UnknownField((*name).to_string())),
            Self::Template(template) => Ok(template.render(values)?),
        }
    }
}

/// The override expressions given for one run.
///
/// [`Overrides::apply`] visits the components in a fixed order: scheme, host,
/// hostname, port, path, query, fragment, opaque, username, clear username,
/// password, clear password.
#[derive(Default)]
pub struct Overrides<'a> {
    pub scheme: Option<Expression<'a>>,
    pub host: Option<Expression<'a>>,
    pub hostname: Option<Expression<'a>>,
    pub port: Option<Expression<'a>>,
    pub path: Option<Expression<'a>>,
    pub raw_query: Option<Expression<'a>>,
    pub fragment: Option<Expression<'a>>,
    pub opaque: Option<Expression<'a>>,
    pub username: Option<Expression<'a>>,
    pub clear_username: bool,
    pub password: Option<Expression<'a>>,
    pub clear_password: bool,
}

impl Overrides<'_> {
    pub fn is_empty(&self) -> bool {
        self.scheme.is_none()
            && self.host.is_none()
            && self.hostname.is_none()
            && self.port.is_none()
            && self.path.is_none()
            && self.raw_query.is_none()
            && self.fragment.is_none()
            && self.opaque.is_none()
            && self.username.is_none()
            && !self.clear_username
            && self.password.is_none()
            && !self.clear_password
    }

    /// Applies every configured override to `url`, in order.
    ///
    /// A template that fails to render leaves its component untouched.
    pub fn apply(&self, url: &mut Url) {
        if let Some(scheme) = evaluate(self.scheme.as_ref(), "scheme", url) {
            url.scheme = scheme;
        }

        if let Some(host) = evaluate(self.host.as_ref(), "host", url) {
            url.host = host;
        }

        if let Some(hostname) = evaluate(self.hostname.as_ref(), "hostname", url) {
            let port = url.port().to_string();
            url.host = join_host_port(&hostname, &port);
        }

        if let Some(port) = evaluate(self.port.as_ref(), "port", url) {
            let hostname = split_host_port(&url.host).0.to_string();
            url.host = format!("{}:{port}", bracket_if_needed(&hostname));
        }

        if let Some(path) = evaluate(self.path.as_ref(), "path", url) {
            url.path = path;
            url.raw_path.clear();
        }

        if let Some(raw_query) = evaluate(self.raw_query.as_ref(), "query", url) {
            url.raw_query = raw_query;
        }

        if let Some(fragment) = evaluate(self.fragment.as_ref(), "fragment", url) {
            url.fragment = fragment;
            url.raw_fragment.clear();
        }

        if let Some(opaque) = evaluate(self.opaque.as_ref(), "opaque", url) {
            url.opaque = opaque;
        }

        if let Some(username) = evaluate(self.username.as_ref(), "username", url) {
            url.user.username = username;
            url.user.username_set = true;
        }
        if self.clear_username {
            url.user.username_set = false;
        }

        if let Some(password) = evaluate(self.password.as_ref(), "password", url) {
            url.user.password = password;
            url.user.password_set = true;
        }
        if self.clear_password {
            url.user.password_set = false;
        }
    }
}

fn evaluate(expression: Option<&Expression<'_>>, component: &str, url: &Url) -> Option<String> {
    match expression?.render(url) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Leaving {component} of `{url}` unchanged: {e}");
            None
        }
    }
}

fn join_host_port(hostname: &str, port: &str) -> String {
    if port.is_empty() {
        hostname.to_string()
    } else {
        format!("{}:{port}", bracket_if_needed(hostname))
    }
}

/// IPv6 literals need their brackets back once a port follows them.
fn bracket_if_needed(hostname: &str) -> Cow<'_, str> {
    if hostname.contains(':') {
        Cow::Owned(format!("[{hostname}]"))
    } else {
        Cow::Borrowed(hostname)
    }
}
