//! Converts raw setting values into the shape their [`SettingKind`] declares.
//!
//! Values coming from `fpm.toml` are already natively typed, while values coming from
//! project file metadata are always lists of strings (one element per line). Both go
//! through the same [`coerce_value`], which only ever looks at the declared kind.

use toml::{Table, Value};
use tracing::trace;

use super::error::SettingsError;
use super::schema::{self, SettingKind};
use super::utilities::str_to_bool;


fn mismatch(name: &str, expected: SettingKind, found: &Value) -> SettingsError {
    SettingsError::TypeMismatch {
        name: name.to_string(),
        expected,
        found: format!("{} ({})", found, found.type_str()),
    }
}

/// Unwraps a list that must only contain strings.
fn into_strings(
    name: &str,
    kind: SettingKind,
    items: Vec<Value>,
) -> Result<Vec<String>, SettingsError> {
    if let Some(non_string) = items.iter().find(|item| !item.is_str()) {
        return Err(mismatch(name, kind, non_string));
    }

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(text),
            _ => None,
        })
        .collect())
}

fn parse_bool(name: &str, text: &str) -> Result<Value, SettingsError> {
    str_to_bool(text)
        .map(Value::Boolean)
        .ok_or_else(|| SettingsError::InvalidBoolean {
            name: name.to_string(),
            value: text.to_string(),
        })
}

fn parse_int(name: &str, text: &str) -> Result<Value, SettingsError> {
    text.trim()
        .parse::<i64>()
        .map(Value::Integer)
        .map_err(|_| SettingsError::InvalidInteger {
            name: name.to_string(),
            value: text.to_string(),
        })
}


/// Coerce a single raw `value` of setting `name` into the shape of `kind`.
pub fn coerce_value(name: &str, kind: SettingKind, value: Value) -> Result<Value, SettingsError> {
    match (kind, value) {
        (SettingKind::Bool, value @ Value::Boolean(_)) => Ok(value),
        (SettingKind::Bool, Value::String(text)) => parse_bool(name, &text),
        (SettingKind::Bool, Value::Array(items)) => {
            let values = into_strings(name, kind, items)?;

            if values.len() != 1 {
                return Err(SettingsError::AmbiguousBoolean {
                    name: name.to_string(),
                    values,
                });
            }

            parse_bool(name, &values[0])
        }

        (SettingKind::Int, value @ Value::Integer(_)) => Ok(value),
        (SettingKind::Int, Value::String(text)) => parse_int(name, &text),
        (SettingKind::Int, Value::Array(items)) => {
            let values = into_strings(name, kind, items)?;
            parse_int(name, values.first().map(String::as_str).unwrap_or_default())
        }

        (kind, value @ Value::String(_)) if kind.is_textual() => Ok(value),
        (kind, Value::Array(items)) if kind.is_textual() => {
            Ok(Value::String(into_strings(name, kind, items)?.join("\n")))
        }

        (SettingKind::ListOfString | SettingKind::ListOfPath, Value::Array(items)) => {
            let values = into_strings(name, kind, items)?;
            Ok(Value::Array(values.into_iter().map(Value::String).collect()))
        }
        (SettingKind::ListOfString | SettingKind::ListOfPath, value @ Value::String(_)) => {
            Ok(Value::Array(vec![value]))
        }

        (SettingKind::UntypedList, value @ Value::Array(_)) => Ok(value),
        (SettingKind::UntypedList, value) => Ok(Value::Array(vec![value])),

        (kind, value) => Err(mismatch(name, kind, &value)),
    }
}

/// Coerce every entry of a raw table. Keys outside the schema are rejected.
///
/// Missing settings are left missing; see [`fill_defaults`].
pub fn coerce_table(raw: Table) -> Result<Table, SettingsError> {
    raw.into_iter()
        .map(|(name, value)| {
            let kind = schema::kind_of(&name).ok_or_else(|| SettingsError::UnknownSetting {
                name: name.clone(),
            })?;

            trace!("Coercing setting {} to {}.", name, kind);

            let value = coerce_value(&name, kind, value)?;
            Ok((name, value))
        })
        .collect()
}

/// Adds the schema default for every setting `coerced` does not mention.
#[must_use = "function returns the completed table"]
pub fn fill_defaults(mut coerced: Table) -> Table {
    for (name, value) in schema::defaults() {
        coerced.entry(name).or_insert(value);
    }

    coerced
}
