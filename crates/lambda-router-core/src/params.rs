//! Path parameter extraction.

use std::collections::HashMap;

use serde::Serialize;

use crate::pattern::PathPattern;

/// Parameter values captured from a matched path, keyed by name.
///
/// Created fresh for every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(HashMap<String, String>);

impl Params {
    /// Create an empty set of parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns `true` if a parameter with this name was captured.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of captured parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Consume into the underlying map.
    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Extract every named parameter of `pattern` from `path`.
///
/// Returns an empty map if the template has no parameters or `path` does
/// not match.
pub fn extract_params(path: &str, pattern: &PathPattern) -> Params {
    let Some(captures) = pattern.captures(path) else {
        return Params::new();
    };

    pattern
        .param_names()
        .iter()
        .enumerate()
        .filter_map(|(i, name)| {
            captures
                .get(i + 1)
                .map(|m| (name.clone(), m.as_str().to_string()))
        })
        .collect()
}
