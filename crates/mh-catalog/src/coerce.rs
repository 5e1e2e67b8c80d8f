//! Loose field coercion for catalog entries.
//!
//! The catalog file is hand-edited, so fields arrive with whatever JSON
//! type the author typed. Values are read with JavaScript truthiness and
//! `String(..)` conversion so that the hub shows exactly what a browser
//! script reading the same file would show.

use mh_api_types::{DEFAULT_ICON, ModuleDescriptor, trim_text};
use serde_json::{Map, Number, Value};

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `String(value)` as a browser would render it.
pub fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => js_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

fn js_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) => js_float(f),
        None => n.to_string(),
    }
}

/// Shortest round-trip digits, switching to exponent form outside
/// `[1e-6, 1e21)` with an explicit `+` on positive exponents.
fn js_float(f: f64) -> String {
    if f == 0.0 {
        return "0".to_owned();
    }
    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return f.to_string();
    }
    let exp = format!("{f:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

/// `String(value || "").trim()`.
pub fn text_field(entry: &Map<String, Value>, name: &str) -> String {
    match entry.get(name) {
        Some(value) if is_truthy(value) => trim_text(&js_string(value)).to_owned(),
        _ => String::new(),
    }
}

pub fn flag_field(entry: &Map<String, Value>, name: &str) -> bool {
    entry.get(name).is_some_and(is_truthy)
}

/// Coerces one raw `modules[]` entry. Falsy entries and non-objects yield
/// `None`; objects always yield a descriptor, which may still lack its
/// required fields.
pub fn coerce_entry(raw: &Value) -> Option<ModuleDescriptor> {
    if !is_truthy(raw) {
        return None;
    }
    let entry = raw.as_object()?;

    let icon = match entry.get("icon") {
        Some(value) if is_truthy(value) => js_string(value),
        _ => DEFAULT_ICON.to_owned(),
    };

    Some(ModuleDescriptor {
        key: text_field(entry, "key"),
        name: text_field(entry, "name"),
        icon,
        tag: text_field(entry, "tag"),
        desc: text_field(entry, "desc"),
        status: text_field(entry, "status"),
        status_label: text_field(entry, "statusLabel"),
        phone_param: flag_field(entry, "phoneParam"),
        direct_url: text_field(entry, "directUrl"),
    })
}
