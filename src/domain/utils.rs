//! Shared parameter extraction and template filling helpers

use std::{collections::HashMap, sync::LazyLock};

use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::errors::AppError;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

/// Replaces each `{name}` marker that has a value in `values`. Substituted
/// text is not re-scanned, and markers without a value are kept verbatim.
pub fn fill_template(template: &str, values: &HashMap<&str, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |captures: &Captures| match values.get(&captures[1]) {
            Some(value) => value.clone(),
            None => captures[0].to_string(),
        })
        .into_owned()
}

/// Reads `key` from a mapping as display text, using `fallback` when the
/// key is absent or null. Non-string values render as their JSON text.
pub fn argument_text(arguments: &Map<String, Value>, key: &str, fallback: &str) -> String {
    match arguments.get(key) {
        None | Some(Value::Null) => fallback.to_string(),
        Some(Value::String(value)) => value.clone(),
        Some(other) => other.to_string(),
    }
}

/// Name-like lookup (`name`, `uri`). Anything that is not a string reads as
/// empty so that it falls through to the catalog miss path.
pub fn string_param<'a>(params: &'a Map<String, Value>, key: &str) -> &'a str {
    params.get(key).and_then(Value::as_str).unwrap_or_default()
}

pub fn arguments_param(params: &Map<String, Value>) -> Result<Map<String, Value>, AppError> {
    match params.get("arguments") {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(arguments)) => Ok(arguments.clone()),
        Some(_) => Err(AppError::invalid_params("arguments must be an object")),
    }
}
