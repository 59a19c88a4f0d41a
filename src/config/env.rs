//! Environment variable overlay.

use std::collections::btree_map::{BTreeMap, Entry};

use serde_json::Value;

use super::diagnostics::Diagnostics;
use super::member::{Kind, Schema, Shape};
use super::naming::screaming_snake_to_upper_camel;
use super::ConfigError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Prefix used by [`Settings::with_default_env_prefix`](super::Settings::with_default_env_prefix).
pub const DEFAULT_ENV_PREFIX: &str = "LP_";

/// A snapshot of environment variables, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Captures the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn capture() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Variables whose name starts with `prefix`, as `(name, suffix, value)`.
    pub fn with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a str, &'a str)> + 'a {
        self.vars.iter().filter_map(move |(name, value)| {
            let suffix = name.strip_prefix(prefix)?;
            Some((name.as_str(), suffix, value.as_str()))
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Overlays variables starting with `prefix` onto `target`.
///
/// The remainder of each variable name is converted from
/// `SCREAMING_SNAKE_CASE` to an `UpperCamelCase` member name. Variables that
/// name no member are ignored; values that cannot be coerced to the member's
/// type are an error. Returns the number of members assigned.
pub fn apply_environment<T: Schema>(
    target: &mut T,
    prefix: &str,
    env: &Environment,
    diagnostics: &dyn Diagnostics,
) -> Result<usize, ConfigError> {
    let table = T::schema();

    // member name -> (variable, value); the first variable in order wins
    let mut bindings: BTreeMap<String, (&str, &str)> = BTreeMap::new();
    for (variable, suffix, value) in env.with_prefix(prefix) {
        let name = screaming_snake_to_upper_camel(suffix);
        if table.get(&name).is_none() {
            continue;
        }
        match bindings.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert((variable, value));
            }
            Entry::Occupied(slot) => diagnostics.warn(&format!(
                "ignoring {variable}: member {} is already set from {}",
                slot.key(),
                slot.get().0
            )),
        }
    }

    let mut assigned = 0;
    for member in table.iter() {
        let Some((variable, raw)) = bindings.get(member.name()) else {
            continue;
        };
        let failure = |source: BoxError| ConfigError::ConversionFailure {
            variable: variable.to_string(),
            member: member.name().to_string(),
            source,
        };
        let value = coerce(raw, member.shape()).map_err(failure)?;
        member.write(target, value).map_err(|e| failure(e.into()))?;
        diagnostics.debug(&format!("{} set from {variable}", member.name()));
        assigned += 1;
    }
    Ok(assigned)
}

/// Converts a raw environment value into JSON matching `shape`.
///
/// Sequences are comma-separated; an empty value is an empty sequence.
fn coerce(raw: &str, shape: Shape) -> Result<Value, BoxError> {
    if !shape.sequence {
        return coerce_scalar(raw, shape.kind);
    }
    if raw.trim().is_empty() {
        return Ok(Value::Array(Vec::new()));
    }
    raw.split(',')
        .map(|item| coerce_scalar(item.trim(), shape.kind))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

fn coerce_scalar(raw: &str, kind: Kind) -> Result<Value, BoxError> {
    let value = match kind {
        Kind::String => Value::String(raw.to_string()),
        Kind::Bool => {
            let trimmed = raw.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                Value::Bool(true)
            } else if trimmed.eq_ignore_ascii_case("false") {
                Value::Bool(false)
            } else {
                return Err(format!("'{raw}' is not a boolean").into());
            }
        }
        Kind::Integer => Value::from(raw.trim().parse::<i64>()?),
        Kind::Unsigned => Value::from(raw.trim().parse::<u64>()?),
        Kind::Float => {
            let number = raw.trim().parse::<f64>()?;
            serde_json::Number::from_f64(number)
                .map(Value::Number)
                .ok_or_else(|| format!("'{raw}' is not a finite number"))?
        }
        Kind::Json => {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        }
    };
    Ok(value)
}
