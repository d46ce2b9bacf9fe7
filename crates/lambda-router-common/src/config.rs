//! CORS policy configuration.
//!
//! This module defines the cross-origin access policy applied by the router:
//! - [`CorsConfig`]: Allowed origins, methods and headers
//! - [`AllowList`]: Either the `*` wildcard or an explicit, ordered list

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RouterError;

/// The wildcard entry meaning "allow everything".
pub const WILDCARD: &str = "*";

/// An allow-list that is either the wildcard or explicit entries.
///
/// Serialized as a list of strings, where `["*"]` means [`AllowList::Any`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub enum AllowList {
    /// Allow every value.
    #[default]
    Any,
    /// Allow only these values, compared exactly. Order is kept for rendering.
    List(Vec<String>),
}

impl AllowList {
    /// Build an allow-list from configured entries.
    ///
    /// `["*"]` becomes [`AllowList::Any`]. An empty list, a blank entry, or a
    /// `*` mixed with other entries is rejected.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries.into_iter().map(Into::into).collect();
        Self::List(entries).validated()
    }

    /// Check this list and collapse `["*"]` into [`AllowList::Any`].
    fn validated(self) -> Result<Self, RouterError> {
        let entries = match self {
            Self::Any => return Ok(Self::Any),
            Self::List(entries) => entries,
        };

        if entries.is_empty() {
            return Err(RouterError::invalid_config(
                "allow-list must not be empty; use [\"*\"] to allow all",
            ));
        }
        if entries.iter().any(|e| e.trim().is_empty()) {
            return Err(RouterError::invalid_config(
                "allow-list entries must not be blank",
            ));
        }
        if entries.iter().any(|e| e == WILDCARD) {
            if entries.len() == 1 {
                return Ok(Self::Any);
            }
            return Err(RouterError::invalid_config(
                "\"*\" must be the only entry of an allow-list",
            ));
        }

        Ok(Self::List(entries))
    }

    /// Returns `true` if this list allows everything.
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Exact, case-sensitive membership test.
    pub fn allows(&self, value: &str) -> bool {
        match self {
            Self::Any => true,
            Self::List(entries) => entries.iter().any(|e| e == value),
        }
    }

    /// Render as a header value: `*` or the entries joined by `", "`.
    pub fn header_value(&self) -> String {
        match self {
            Self::Any => WILDCARD.to_string(),
            Self::List(entries) => entries.join(", "),
        }
    }
}

impl TryFrom<Vec<String>> for AllowList {
    type Error = RouterError;

    fn try_from(entries: Vec<String>) -> Result<Self, Self::Error> {
        Self::List(entries).validated()
    }
}

impl From<AllowList> for Vec<String> {
    fn from(list: AllowList) -> Self {
        match list {
            AllowList::Any => vec![WILDCARD.to_string()],
            AllowList::List(entries) => entries,
        }
    }
}

impl fmt::Display for AllowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header_value())
    }
}

/// Cross-origin access policy.
///
/// Every field defaults to the wildcard. The policy is handed to the router
/// builder before any request is served and cannot change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Origins allowed to make cross-origin requests.
    #[serde(default)]
    pub origins: AllowList,

    /// Methods advertised in `Access-Control-Allow-Methods`.
    #[serde(default)]
    pub methods: AllowList,

    /// Headers advertised in `Access-Control-Allow-Headers`.
    #[serde(default)]
    pub headers: AllowList,
}

impl CorsConfig {
    /// Restrict allowed origins.
    pub fn with_origins<I, S>(mut self, origins: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.origins = AllowList::from_entries(origins)?;
        Ok(self)
    }

    /// Restrict advertised methods.
    pub fn with_methods<I, S>(mut self, methods: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = AllowList::from_entries(methods)?;
        Ok(self)
    }

    /// Restrict advertised headers.
    pub fn with_headers<I, S>(mut self, headers: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = AllowList::from_entries(headers)?;
        Ok(self)
    }

    /// Validate a policy whose fields may have been set directly.
    ///
    /// Lists built through [`AllowList::from_entries`] or deserialization
    /// are already valid; this catches hand-built [`AllowList::List`] values.
    pub fn validate(self) -> Result<Self, RouterError> {
        let field = |name: &str, list: AllowList| {
            list.validated().map_err(|e| match e {
                RouterError::InvalidConfig { reason } => {
                    RouterError::invalid_config(format!("cors.{name}: {reason}"))
                }
                other => other,
            })
        };

        Ok(Self {
            origins: field("origins", self.origins)?,
            methods: field("methods", self.methods)?,
            headers: field("headers", self.headers)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CorsConfig::default();

        assert!(config.origins.is_any());
        assert!(config.methods.is_any());
        assert!(config.headers.is_any());
        assert_eq!(config.methods.header_value(), "*");
    }

    #[test]
    fn test_wildcard_entry_collapses() {
        let list = AllowList::from_entries(["*"]).unwrap();
        assert_eq!(list, AllowList::Any);
        assert!(list.allows("https://anything.example"));
    }

    #[test]
    fn test_explicit_list_is_exact() {
        let list = AllowList::from_entries(["https://example.com"]).unwrap();

        assert!(list.allows("https://example.com"));
        assert!(!list.allows("https://EXAMPLE.com"));
        assert!(!list.allows("https://example.com/"));
        assert!(!list.allows(""));
    }

    #[test]
    fn test_header_value_joins_in_order() {
        let list = AllowList::from_entries(["GET", "POST", "DELETE"]).unwrap();
        assert_eq!(list.header_value(), "GET, POST, DELETE");
        assert_eq!(list.to_string(), "GET, POST, DELETE");
    }

    #[test]
    fn test_rejects_invalid_lists() {
        assert!(AllowList::from_entries(Vec::<String>::new()).is_err());
        assert!(AllowList::from_entries(["GET", " "]).is_err());
        assert!(AllowList::from_entries(["*", "https://example.com"]).is_err());
    }

    #[test]
    fn test_validate_hand_built_config() {
        let config = CorsConfig {
            methods: AllowList::List(vec![]),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cors.methods"));

        let config = CorsConfig {
            origins: AllowList::List(vec!["*".into()]),
            ..Default::default()
        };
        assert!(config.validate().unwrap().origins.is_any());
    }

    #[test]
    fn test_builder_helpers() {
        let config = CorsConfig::default()
            .with_origins(["https://example.com"])
            .and_then(|c| c.with_methods(["GET", "POST"]))
            .unwrap();

        assert!(config.origins.allows("https://example.com"));
        assert_eq!(config.methods.header_value(), "GET, POST");
        assert!(config.headers.is_any());
    }

    #[test]
    fn test_config_serialization() {
        let config = CorsConfig::default()
            .with_origins(["https://example.com"])
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"origins":["https://example.com"],"methods":["*"],"headers":["*"]}"#
        );

        let deserialized: CorsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_deserialization() {
        let json = r#"{"methods": ["GET"]}"#;
        let config: CorsConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.methods, AllowList::List(vec!["GET".into()]));
        assert!(config.origins.is_any());
    }

    #[test]
    fn test_deserialization_rejects_empty_list() {
        let json = r#"{"origins": []}"#;
        assert!(serde_json::from_str::<CorsConfig>(json).is_err());
    }
}
