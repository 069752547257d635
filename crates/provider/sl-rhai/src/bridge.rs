//! Host <-> Rhai value conversion.
//!
//! Both directions fail with a [`ShapeError`] naming the offending variable
//! path (`a[2].name`); a value is either converted exactly or not at all.
//! Host-to-script conversion only fails for integers beyond `i64`.

use crate::builtin::ScriptFailure;
use rhai::{Array, Dynamic, Map};
use sl_error::ShapeError;
use sl_types::{Packet, Record, Value};

/// Converts a host value to a Rhai Dynamic.
///
/// Fails for integers outside the script's `i64` range rather than rounding
/// them through a float.
pub fn value_to_dynamic(value: &Value, variable: &str) -> Result<Dynamic, ShapeError> {
    from_value(value).map_err(|e| e.rooted(variable))
}

/// Converts a host record to a Rhai map.
pub fn record_to_dynamic(record: &Record, variable: &str) -> Result<Dynamic, ShapeError> {
    from_record(record).map_err(|e| e.rooted(variable))
}

/// Converts a slice of host records to a Rhai array of maps.
pub fn records_to_dynamic(records: &[Record], variable: &str) -> Result<Dynamic, ShapeError> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| from_record(record).map_err(|e| e.at_index(i)))
        .collect::<Result<Array, Mismatch>>()
        .map(Dynamic::from_array)
        .map_err(|e| e.rooted(variable))
}

/// Wraps packets as opaque handles in a Rhai array.
pub fn packets_to_dynamic(packets: Vec<Packet>) -> Dynamic {
    Dynamic::from_array(packets.into_iter().map(Dynamic::from).collect())
}

/// Converts a Rhai Dynamic to a host value.
pub fn to_value(value: Dynamic, variable: &str) -> Result<Value, ShapeError> {
    convert_value(value).map_err(|e| e.rooted(variable))
}

/// Converts a Rhai map to a host record.
pub fn to_record(value: Dynamic, variable: &str) -> Result<Record, ShapeError> {
    convert_record(value).map_err(|e| e.rooted(variable))
}

/// Converts a Rhai array of maps to host records.
pub fn to_records(value: Dynamic, variable: &str) -> Result<Vec<Record>, ShapeError> {
    convert_array(value, "array of maps", convert_record)
        .map_err(|e| e.rooted(variable))
}

/// Converts a Rhai array of packet handles back to packets.
///
/// Every element is checked; a single non-packet fails the whole conversion.
pub fn to_packets(value: Dynamic, variable: &str) -> Result<Vec<Packet>, ShapeError> {
    convert_array(value, "array of Packet", |item| {
        let item = item.flatten();
        let found = describe(&item);
        item.try_cast::<Packet>()
            .ok_or_else(|| Mismatch::new("Packet", found))
    })
    .map_err(|e| e.rooted(variable))
}

/// Reads an integer.
pub fn to_int(value: Dynamic, variable: &str) -> Result<i64, ShapeError> {
    let value = value.flatten();
    value
        .as_int()
        .map_err(|_| ShapeError::new(variable, "integer", describe(&value)))
}

/// Reads a boolean.
pub fn to_bool(value: Dynamic, variable: &str) -> Result<bool, ShapeError> {
    let value = value.flatten();
    value
        .as_bool()
        .map_err(|_| ShapeError::new(variable, "bool", describe(&value)))
}

/// Reads an error-valued result.
///
/// Only an `error(..)` value is a script-reported failure; any other value,
/// `()` included, means success.
pub fn to_failure(value: Dynamic) -> Option<String> {
    value
        .flatten()
        .try_cast::<ScriptFailure>()
        .map(|f| f.message().to_string())
}

/// Replaces the contents of `target` with `output`, keeping the same record.
///
/// Every key of `target` not present in `output` is removed.
pub fn replace_record(target: &mut Record, output: Record) {
    target.clear();
    target.extend(output);
}

/// Returns a short type description for error messages.
fn describe(value: &Dynamic) -> String {
    if value.is::<Packet>() {
        "Packet".to_string()
    } else if value.is::<ScriptFailure>() {
        "Error".to_string()
    } else {
        value.type_name().to_string()
    }
}

/// A shape mismatch below the root variable; the path grows as it unwinds.
struct Mismatch {
    path: String,
    expected: &'static str,
    found: String,
}

impl Mismatch {
    fn new(expected: &'static str, found: impl Into<String>) -> Self {
        Self {
            path: String::new(),
            expected,
            found: found.into(),
        }
    }

    fn at_index(mut self, index: usize) -> Self {
        self.path = format!("[{index}]{}", self.path);
        self
    }

    fn at_key(mut self, key: &str) -> Self {
        self.path = format!(".{key}{}", self.path);
        self
    }

    fn rooted(self, variable: &str) -> ShapeError {
        ShapeError::new(format!("{variable}{}", self.path), self.expected, self.found)
    }
}

fn from_value(value: &Value) -> Result<Dynamic, Mismatch> {
    match value {
        Value::Null => Ok(Dynamic::UNIT),
        Value::Bool(b) => Ok(Dynamic::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Dynamic::from(i)),
            None if n.is_f64() => n
                .as_f64()
                .map(Dynamic::from)
                .ok_or_else(|| Mismatch::new("number", n.to_string())),
            None => Err(Mismatch::new("integer in i64 range", n.to_string())),
        },
        Value::String(s) => Ok(Dynamic::from(s.clone())),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| from_value(item).map_err(|e| e.at_index(i)))
            .collect::<Result<Array, Mismatch>>()
            .map(Dynamic::from_array),
        Value::Object(record) => from_record(record),
    }
}

fn from_record(record: &Record) -> Result<Dynamic, Mismatch> {
    let mut map = Map::new();
    for (key, value) in record {
        let converted = from_value(value).map_err(|e| e.at_key(key))?;
        map.insert(key.as_str().into(), converted);
    }
    Ok(Dynamic::from_map(map))
}

fn convert_value(value: Dynamic) -> Result<Value, Mismatch> {
    let value = value.flatten();

    if value.is_unit() {
        return Ok(Value::Null);
    }
    if let Ok(b) = value.as_bool() {
        return Ok(Value::Bool(b));
    }
    if let Ok(i) = value.as_int() {
        return Ok(Value::from(i));
    }
    if let Ok(f) = value.as_float() {
        return serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| Mismatch::new("finite number", f.to_string()));
    }
    if let Ok(c) = value.as_char() {
        return Ok(Value::String(c.to_string()));
    }
    if value.is_string() {
        let found = describe(&value);
        return value
            .into_string()
            .map(Value::String)
            .map_err(|_| Mismatch::new("string", found));
    }
    if value.is_array() {
        return convert_array(value, "array", convert_value).map(Value::Array);
    }
    if value.is_map() {
        return convert_record(value).map(Value::Object);
    }

    Err(Mismatch::new("json-compatible value", describe(&value)))
}

fn convert_record(value: Dynamic) -> Result<Record, Mismatch> {
    let value = value.flatten();
    if !value.is_map() {
        return Err(Mismatch::new("map", describe(&value)));
    }

    let found = describe(&value);
    let map = value
        .try_cast::<Map>()
        .ok_or_else(|| Mismatch::new("map", found))?;

    let mut record = Record::new();
    for (key, item) in map {
        let converted = convert_value(item).map_err(|e| e.at_key(&key))?;
        record.insert(key.to_string(), converted);
    }
    Ok(record)
}

fn convert_array<T>(
    value: Dynamic,
    expected: &'static str,
    mut convert: impl FnMut(Dynamic) -> Result<T, Mismatch>,
) -> Result<Vec<T>, Mismatch> {
    let value = value.flatten();
    if !value.is_array() {
        return Err(Mismatch::new(expected, describe(&value)));
    }

    let found = describe(&value);
    let items: Array = value
        .into_array()
        .map_err(|_| Mismatch::new(expected, found))?;

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| convert(item).map_err(|e| e.at_index(i)))
        .collect()
}
