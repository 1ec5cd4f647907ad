use std::fmt;

use bytes::Bytes;

use crate::effects::BoxStream;

/// Response headers in arrival order.
///
/// Lookups are ASCII case-insensitive, matching HTTP field-name semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header, keeping earlier values with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// First value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Raw `Content-Length` text, unparsed.
    pub fn content_length(&self) -> Option<&str> {
        self.get("content-length")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A response whose head has arrived and whose body is still streaming.
pub struct Response<E> {
    pub status: u16,
    pub headers: Headers,
    pub body: BoxStream<'static, Result<Bytes, E>>,
}

impl<E> Response<E> {
    pub fn new(status: u16, headers: Headers, body: BoxStream<'static, Result<Bytes, E>>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Status codes of 400 and above.
    pub fn is_failure(&self) -> bool {
        self.status >= 400
    }
}

impl<E> fmt::Debug for Response<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body", &"{ ... }")
            .finish()
    }
}
