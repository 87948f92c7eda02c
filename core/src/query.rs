//! Ordered query parameters and their serialization.
//!
//! # Design
//! Legacy Rana clients wrote `key=value` pairs without any escaping, and the
//! server side was built against that. `QueryEncoding::Legacy` reproduces the
//! exact bytes; a value containing `&`, `=`, `#` or a space then yields a
//! malformed URL. `QueryEncoding::Percent` escapes keys and values, at the cost
//! of sending different bytes than a legacy client would. Callers pick one
//! explicitly through `ClientConfig`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except RFC 3986 unreserved characters.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// How query keys and values are written into the URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryEncoding {
    /// Raw `key=value`, byte-for-byte what legacy clients sent.
    #[default]
    Legacy,
    /// Percent-encode keys and values.
    Percent,
}

/// Query parameters in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The `?k=v&...` suffix, or an empty string when there are no pairs.
    pub fn to_suffix(&self, encoding: QueryEncoding) -> String {
        if self.is_empty() {
            return String::new();
        }
        let joined = self
            .iter()
            .map(|(key, value)| match encoding {
                QueryEncoding::Legacy => format!("{key}={value}"),
                QueryEncoding::Percent => format!(
                    "{}={}",
                    utf8_percent_encode(key, COMPONENT),
                    utf8_percent_encode(value, COMPONENT)
                ),
            })
            .collect::<Vec<_>>()
            .join("&");
        format!("?{joined}")
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Query
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
