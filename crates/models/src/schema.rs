//! Field readers used by the request schema.
//!
//! Each reader inspects one JSON value, records issues with the wording
//! callers of the tool endpoint already match on, and returns the typed
//! value only when it is valid. Absent keys are passed as `None`.

use serde_json::{Map, Value};

use crate::errors::Issues;

/// Closed set of string literals accepted by a field.
pub trait SchemaEnum: Sized + Copy + 'static {
    const VARIANTS: &'static [Self];

    fn as_str(self) -> &'static str;

    fn from_literal(s: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.as_str() == s)
    }

    /// `'a' | 'b' | 'c'`
    fn expected() -> String {
        Self::VARIANTS
            .iter()
            .map(|v| format!("'{}'", v.as_str()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

pub fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn at<'a>(path: &[&'a str], key: &'a str) -> Vec<&'a str> {
    let mut p = path.to_vec();
    p.push(key);
    p
}

pub(crate) fn object<'a>(
    value: Option<&'a Value>,
    path: &[&str],
    issues: &mut Issues,
) -> Option<&'a Map<String, Value>> {
    match value {
        None => {
            issues.add(path, "Required");
            None
        }
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            issues.add(path, format!("Expected object, received {}", type_name(other)));
            None
        }
    }
}

pub(crate) fn string(
    value: Option<&Value>,
    path: &[&str],
    min_len: usize,
    issues: &mut Issues,
) -> Option<String> {
    match value {
        None => {
            issues.add(path, "Required");
            None
        }
        Some(Value::String(s)) => {
            if s.chars().count() < min_len {
                issues.add(
                    path,
                    format!("String must contain at least {min_len} character(s)"),
                );
                return None;
            }
            Some(s.clone())
        }
        Some(other) => {
            issues.add(path, format!("Expected string, received {}", type_name(other)));
            None
        }
    }
}

pub(crate) fn optional_string(
    value: Option<&Value>,
    path: &[&str],
    min_len: usize,
    issues: &mut Issues,
) -> Option<String> {
    value.and_then(|v| string(Some(v), path, min_len, issues))
}

pub(crate) fn non_negative_int(
    value: Option<&Value>,
    path: &[&str],
    issues: &mut Issues,
) -> Option<u64> {
    let v = match value {
        None => {
            issues.add(path, "Required");
            return None;
        }
        Some(v) => v,
    };
    let n = match v {
        Value::Number(n) => n,
        other => {
            issues.add(path, format!("Expected number, received {}", type_name(other)));
            return None;
        }
    };
    if let Some(u) = n.as_u64() {
        return Some(u);
    }
    // 负整数或浮点数
    let f = n.as_f64().unwrap_or(f64::NAN);
    let mut ok = true;
    if f.fract() != 0.0 {
        issues.add(path, "Expected integer, received float");
        ok = false;
    }
    if f < 0.0 {
        issues.add(path, "Number must be greater than or equal to 0");
        ok = false;
    }
    if !ok {
        return None;
    }
    // 超出 u64 的整数同样要给出问题，不能静默丢弃
    if f >= u64::MAX as f64 {
        issues.add(path, format!("Number must be less than or equal to {}", u64::MAX));
        return None;
    }
    Some(f as u64)
}

pub(crate) fn optional_non_negative_int(
    value: Option<&Value>,
    path: &[&str],
    issues: &mut Issues,
) -> Option<u64> {
    value.and_then(|v| non_negative_int(Some(v), path, issues))
}

/// Absent → `None`, `null` → `Some(None)`, number → `Some(Some(n))`.
pub(crate) fn nullable_non_negative_int(
    value: Option<&Value>,
    path: &[&str],
    issues: &mut Issues,
) -> Option<Option<u64>> {
    match value {
        None => None,
        Some(Value::Null) => Some(None),
        Some(v) => non_negative_int(Some(v), path, issues).map(Some),
    }
}

pub(crate) fn literal<T: SchemaEnum>(
    value: Option<&Value>,
    path: &[&str],
    issues: &mut Issues,
) -> Option<T> {
    match value {
        None => {
            issues.add(path, "Required");
            None
        }
        Some(Value::String(s)) => match T::from_literal(s) {
            Some(v) => Some(v),
            None => {
                issues.add(
                    path,
                    format!("Invalid enum value. Expected {}, received '{}'", T::expected(), s),
                );
                None
            }
        },
        Some(other) => {
            issues.add(
                path,
                format!("Expected {}, received {}", T::expected(), type_name(other)),
            );
            None
        }
    }
}

pub(crate) fn optional_literal<T: SchemaEnum>(
    value: Option<&Value>,
    path: &[&str],
    issues: &mut Issues,
) -> Option<T> {
    value.and_then(|v| literal(Some(v), path, issues))
}

/// Optional array of absolute URLs with an upper bound on its length.
pub(crate) fn optional_url_list(
    value: Option<&Value>,
    path: &[&str],
    max: usize,
    issues: &mut Issues,
) -> Option<Vec<String>> {
    let items = match value? {
        Value::Array(items) => items,
        other => {
            issues.add(path, format!("Expected array, received {}", type_name(other)));
            return None;
        }
    };
    let before = issues.len();
    if items.len() > max {
        issues.add(path, format!("Array must contain at most {max} element(s)"));
    }
    let mut urls = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let idx = i.to_string();
        let item_path = at(path, &idx);
        match item {
            Value::String(s) => {
                if url::Url::parse(s).is_err() {
                    issues.add(&item_path, "Invalid url");
                } else {
                    urls.push(s.clone());
                }
            }
            other => issues.add(
                &item_path,
                format!("Expected string, received {}", type_name(other)),
            ),
        }
    }
    (issues.len() == before).then_some(urls)
}
