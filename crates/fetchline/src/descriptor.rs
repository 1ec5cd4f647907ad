//! Input canonicalization.
//!
//! Callers hand over a single URL, a list of URLs, ready-made descriptors, or
//! any mix of these. Everything is flattened into an ordered list of
//! [`Descriptor`]s before a single request is made.

use serde::{Deserialize, Serialize};

use crate::error::Result;

const FALLBACK_NAME: &str = "download";

/// One resource to fetch and the name its artifact will carry.
///
/// The name is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDescriptor")]
pub struct Descriptor {
    url: String,
    name: String,
}

impl Descriptor {
    /// An explicit name; an empty `name` falls back to the derived one.
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        let url = url.into();
        let name = name.into();
        let name = if name.is_empty() { derive_name(&url) } else { name };
        Self { url, name }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let name = derive_name(&url);
        Self { url, name }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Deserialize)]
struct RawDescriptor {
    url: String,
    #[serde(default, alias = "file")]
    name: Option<String>,
}

impl From<RawDescriptor> for Descriptor {
    fn from(raw: RawDescriptor) -> Self {
        Descriptor::new(raw.url, raw.name.unwrap_or_default())
    }
}

/// The name for a URL: everything after its last `/`.
///
/// A URL ending in `/` uses its last non-empty path segment instead, and
/// `"download"` when there is none.
///
/// # Examples
///
/// ```
/// use fetchline::derive_name;
///
/// assert_eq!(derive_name("http://x/a.txt"), "a.txt");
/// assert_eq!(derive_name("http://x/dir/"), "dir");
/// ```
pub fn derive_name(url: &str) -> String {
    let last = url.rsplit('/').next().unwrap_or_default();
    if !last.is_empty() {
        return last.to_string();
    }

    url.split('/')
        .rev()
        .find(|segment| !segment.is_empty() && !segment.ends_with(':'))
        .unwrap_or(FALLBACK_NAME)
        .to_string()
}

/// A single input element: a bare URL or a descriptor passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Source {
    Url(String),
    Descriptor(Descriptor),
}

impl Source {
    pub fn into_descriptor(self) -> Descriptor {
        match self {
            Source::Url(url) => Descriptor::from_url(url),
            Source::Descriptor(descriptor) => descriptor,
        }
    }
}

impl From<&str> for Source {
    fn from(url: &str) -> Self {
        Source::Url(url.to_string())
    }
}

impl From<String> for Source {
    fn from(url: String) -> Self {
        Source::Url(url)
    }
}

impl From<Descriptor> for Source {
    fn from(descriptor: Descriptor) -> Self {
        Source::Descriptor(descriptor)
    }
}

/// An ordered collection of inputs.
///
/// Converts from one URL or descriptor, from arrays and vectors of either,
/// and from JSON holding a string, an object, or an array mixing both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "OneOrMany")]
pub struct Sources(Vec<Source>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Source),
    Many(Vec<Source>),
}

impl From<OneOrMany> for Sources {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(source) => Sources(vec![source]),
            OneOrMany::Many(sources) => Sources(sources),
        }
    }
}

impl Sources {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, source: impl Into<Source>) {
        self.0.push(source.into());
    }

    pub fn extend(&mut self, other: Sources) {
        self.0.extend(other.0);
    }
}

impl From<&str> for Sources {
    fn from(url: &str) -> Self {
        Sources(vec![url.into()])
    }
}

impl From<String> for Sources {
    fn from(url: String) -> Self {
        Sources(vec![url.into()])
    }
}

impl From<Descriptor> for Sources {
    fn from(descriptor: Descriptor) -> Self {
        Sources(vec![descriptor.into()])
    }
}

impl<T: Into<Source>> From<Vec<T>> for Sources {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Into<Source>, const N: usize> From<[T; N]> for Sources {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Into<Source>> FromIterator<T> for Sources {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sources(iter.into_iter().map(Into::into).collect())
    }
}

/// Flatten any accepted input into descriptors, preserving order.
pub fn canonical(urls: impl Into<Sources>) -> Vec<Descriptor> {
    urls.into().0.into_iter().map(Source::into_descriptor).collect()
}
