use crate::error::{AppError, Context};

use super::query::{encode_component, QueryStringBuilder};
use super::FetchResult;

/// A request handed to an executor: a path pattern with `[name]` placeholders, the
/// values for those placeholders and the query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub url_pattern: &'static str,
    pub path_params: Vec<(String, String)>,
    pub query: QueryStringBuilder,
}

impl ApiRequest {
    pub fn new(url_pattern: &'static str) -> Self {
        Self {
            url_pattern,
            path_params: Vec::new(),
            query: QueryStringBuilder::new(),
        }
    }

    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.push((name.into(), value.into()));
        self
    }

    pub fn with_query(mut self, query: QueryStringBuilder) -> Self {
        self.query = query;
        self
    }

    pub fn render_path(&self) -> FetchResult<String> {
        render_path(self.url_pattern, &self.path_params)
    }

    /// Rendered path followed by `?query` when any query pairs are present.
    pub fn path_and_query(&self) -> FetchResult<String> {
        let path = self.render_path()?;
        if self.query.is_empty() {
            Ok(path)
        } else {
            Ok(format!("{}?{}", path, self.query.build()))
        }
    }
}

pub fn render_path(pattern: &str, params: &[(String, String)]) -> FetchResult<String> {
    let mut result = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '[' {
            let mut key = String::new();
            let mut closed = false;
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == ']' {
                    closed = true;
                    break;
                }
                key.push(next);
            }

            if !closed {
                return Err(AppError::message(format!(
                    "Unterminated placeholder in path pattern: [{key}"
                )));
            }

            if key.is_empty() {
                return Err(AppError::message(
                    "Encountered empty placeholder `[]` in path pattern",
                ));
            }

            let value = params
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value)
                .ok_or_else(|| {
                    AppError::message(format!(
                        "No value provided for placeholder `{}` in path pattern",
                        key
                    ))
                })?;
            result.push_str(&encode_component(value));
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

/// Expand `${VAR}` placeholders from the process environment.
pub fn expand_env_vars(value: &str) -> FetchResult<String> {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut name = String::new();
            let mut closed = false;
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == '}' {
                    closed = true;
                    break;
                }
                name.push(next);
            }

            if name.is_empty() {
                return Err(AppError::message(
                    "Encountered empty environment placeholder",
                ));
            }

            if !closed {
                return Err(AppError::message("Unterminated environment placeholder"));
            }

            let value = std::env::var(&name)
                .with_context(|| format!("Environment variable {} is not set", name))?;
            result.push_str(&value);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}
