//! Path template compilation.
//!
//! A template such as `/users/:id/posts/:post_id` is split on `/`. Segments
//! starting with `:` are parameters and capture one non-empty segment of the
//! request path; every other segment must match literally. The compiled
//! pattern is anchored at both ends.

use std::fmt;

use regex::{Captures, Regex};

use lambda_router_common::RouterError;

/// Prefix marking a parameter segment.
pub const PARAM_PREFIX: char = ':';

/// Capture group used for a parameter segment.
const PARAM_CAPTURE: &str = "([^/]+)";

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    regex: Regex,
    param_names: Vec<String>,
}

impl PathPattern {
    /// Compile a path template.
    ///
    /// # Errors
    ///
    /// Fails if the template does not start with `/`, contains a `:`
    /// segment without a name, or repeats a parameter name.
    pub fn compile(template: &str) -> Result<Self, RouterError> {
        if !template.starts_with('/') {
            return Err(RouterError::invalid_template(
                template,
                "must start with '/'",
            ));
        }

        let mut source = String::with_capacity(template.len() * 2 + 2);
        let mut param_names: Vec<String> = Vec::new();

        source.push('^');
        for (i, segment) in template.split('/').enumerate() {
            if i > 0 {
                source.push('/');
            }

            match segment.strip_prefix(PARAM_PREFIX) {
                Some("") => {
                    return Err(RouterError::invalid_template(
                        template,
                        format!("parameter segment {i} has no name"),
                    ));
                }
                Some(name) => {
                    if param_names.iter().any(|n| n == name) {
                        return Err(RouterError::duplicate_param(template, name));
                    }
                    param_names.push(name.to_string());
                    source.push_str(PARAM_CAPTURE);
                }
                None => source.push_str(&regex::escape(segment)),
            }
        }
        source.push('$');

        let regex = Regex::new(&source)
            .map_err(|e| RouterError::invalid_template(template, e.to_string()))?;

        Ok(Self {
            template: template.to_string(),
            regex,
            param_names,
        })
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Parameter names in the order they appear in the template.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Returns `true` if the template has no parameter segments.
    pub fn is_static(&self) -> bool {
        self.param_names.is_empty()
    }

    /// Returns `true` if `path` matches the whole template.
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Capture groups for `path`. Group `i + 1` holds parameter `i`.
    pub fn captures<'p>(&self, path: &'p str) -> Option<Captures<'p>> {
        self.regex.captures(path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}
