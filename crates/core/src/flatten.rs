//! Display-oriented projection of a parsed URL.

use std::borrow::Cow;

use indexmap::IndexMap;
use leon::Values;
use serde::Serialize;

use crate::url::Url;

/// Value of a query key: a scalar when the key appeared once, otherwise every
/// value in order of appearance.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum QueryValue {
    Single(String),
    Multiple(Vec<String>),
}

impl QueryValue {
    fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Single(value) => Cow::Borrowed(value.as_str()),
            Self::Multiple(values) => Cow::Owned(values.join(",")),
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl FlatUser {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlatRecord {
    pub scheme: String,
    #[serde(skip_serializing_if = "FlatUser::is_empty")]
    pub user: FlatUser,
    pub hostname: String,
    pub host: String,
    pub path: String,
    pub path_components: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub raw_query: String,
    pub query: IndexMap<String, QueryValue>,
    pub port: String,
    pub fragment: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub opaque: String,
    #[serde(skip)]
    pub raw_path: String,
    #[serde(skip)]
    pub force_query: bool,
}

impl From<&Url> for FlatRecord {
    fn from(url: &Url) -> Self {
        Self {
            scheme: url.scheme.clone(),
            user: FlatUser {
                username: url.user.username().map(str::to_string),
                password: url.user.password().map(str::to_string),
            },
            hostname: url.hostname().to_string(),
            host: url.host.clone(),
            path: url.path.clone(),
            path_components: path_components(&url.path),
            raw_query: url.raw_query.clone(),
            query: group_query(url.query_pairs()),
            port: url.port().to_string(),
            fragment: url.fragment.clone(),
            opaque: url.opaque.clone(),
            raw_path: url.raw_path.clone(),
            force_query: url.force_query,
        }
    }
}

/// Splits a path into segments after dropping one leading `/`.
///
/// Both `/` and the empty path give a single empty segment.
pub fn path_components(path: &str) -> Vec<String> {
    path.strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .map(str::to_string)
        .collect()
}

fn group_query(pairs: Vec<(String, String)>) -> IndexMap<String, QueryValue> {
    let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
    for (key, value) in pairs {
        grouped.entry(key).or_default().push(value);
    }

    grouped
        .into_iter()
        .map(|(key, mut values)| {
            let value = if values.len() == 1 {
                QueryValue::Single(values.remove(0))
            } else {
                QueryValue::Multiple(values)
            };
            (key, value)
        })
        .collect()
}

/// Exposes the record to output templates.
///
/// Besides the JSON field names this understands `query.<key>`,
/// `pathComponents.<index>` and `user.username` / `user.password`.
impl Values for FlatRecord {
    fn get_value(&self, key: &str) -> Option<Cow<'_, str>> {
        let key = key.trim().trim_start_matches('.');
        let (field, member) = match key.split_once('.') {
            Some((field, member)) => (field, Some(member)),
            None => (key, None),
        };

        let value = match (field.to_ascii_lowercase().as_str(), member) {
            ("scheme", None) => Cow::Borrowed(self.scheme.as_str()),
            ("username", None) => Cow::Borrowed(self.user.username.as_deref().unwrap_or_default()),
            ("password", None) => Cow::Borrowed(self.user.password.as_deref().unwrap_or_default()),
            ("user", Some(member)) => match member.to_ascii_lowercase().as_str() {
                "username" => Cow::Borrowed(self.user.username.as_deref().unwrap_or_default()),
                "password" => Cow::Borrowed(self.user.password.as_deref().unwrap_or_default()),
                _ => return None,
            },
            ("hostname", None) => Cow::Borrowed(self.hostname.as_str()),
            ("host", None) => Cow::Borrowed(self.host.as_str()),
            ("path", None) => Cow::Borrowed(self.path.as_str()),
            ("pathcomponents", None) => Cow::Owned(self.path_components.join("/")),
            ("pathcomponents", Some(index)) => {
                let index: usize = index.parse().ok()?;
                Cow::Borrowed(self.path_components.get(index)?.as_str())
            }
            ("rawquery" | "query", None) => Cow::Borrowed(self.raw_query.as_str()),
            ("query", Some(name)) => self.query.get(name)?.as_text(),
            ("port", None) => Cow::Borrowed(self.port.as_str()),
            ("fragment", None) => Cow::Borrowed(self.fragment.as_str()),
            ("opaque", None) => Cow::Borrowed(self.opaque.as_str()),
            ("rawpath", None) => Cow::Borrowed(self.raw_path.as_str()),
            ("forcequery", None) => Cow::Owned(self.force_query.to_string()),
            _ => return None,
        };

        Some(value)
    }
}
