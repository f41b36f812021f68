//! Request URL construction
//!
//! Every request URL is built here, and every one carries the credential.
//! A caller parameter named `api_key` is dropped in favour of the configured
//! credential.

use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Query parameter carrying the v3 API credential
pub const API_KEY_PARAM: &str = "api_key";

/// Primitive query parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Caller-supplied query parameters
///
/// Keys are unique; inserting an existing key replaces its value. Iteration
/// order is not part of the contract.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    params: BTreeMap<String, ParamValue>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.insert(key.into(), value.into());
    }

    /// Insert only if `key` is not already present
    pub fn insert_default(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Build the request URL for `endpoint` under `base`
///
/// `endpoint` is appended to the base path segment by segment, so a base of
/// `https://api.themoviedb.org/3` and an endpoint of `/movie/42` yields
/// `https://api.themoviedb.org/3/movie/42`. Any query or fragment on `base`
/// is discarded. The credential is appended last and exactly once.
pub fn build_url(base: &Url, endpoint: &str, params: &QueryParams, api_key: &str) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);

    // Only fails for cannot-be-a-base URLs, which config validation rejects.
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .extend(endpoint.split('/').filter(|s| !s.is_empty()));
    }

    {
        let mut query = url.query_pairs_mut();
        for (key, value) in params.iter() {
            if key != API_KEY_PARAM {
                query.append_pair(key, &value.to_string());
            }
        }
        query.append_pair(API_KEY_PARAM, api_key);
    }

    url
}

/// Mask the credential in `url` so it can be shown in errors
pub(crate) fn redact_credential(url: &mut Url) {
    if !url.query_pairs().any(|(k, _)| k == API_KEY_PARAM) {
        return;
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == API_KEY_PARAM {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    url.query_pairs_mut().clear().extend_pairs(pairs);
}
