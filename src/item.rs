//! Items and attribute unmarshalling.
//!
//! DynamoDB returns items as maps of typed [`AttributeValue`]s. Callers of
//! this function see plain JSON objects instead, the same view the document
//! client gives: numbers become JSON numbers, binaries become base64 strings,
//! sets become arrays.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Number, Value};

use crate::error::StoreError;

/// One record of the table.
pub type Item = Map<String, Value>;

/// All items of a scan, in fetch order.
pub type ResultSet = Vec<Item>;

/// Converts a DynamoDB item into a JSON object.
pub fn item_from_attributes(attributes: HashMap<String, AttributeValue>) -> Result<Item, StoreError> {
    attributes
        .into_iter()
        .map(|(name, value)| {
            let json = attribute_to_json(&name, value)?;
            Ok((name, json))
        })
        .collect()
}

/// Converts a single attribute value. `name` is only used for error reporting.
pub fn attribute_to_json(name: &str, value: AttributeValue) -> Result<Value, StoreError> {
    let json = match value {
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::N(n) => number_to_json(n),
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(blob) => Value::String(STANDARD.encode(blob.as_ref())),
        AttributeValue::Ss(values) => Value::Array(values.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(values) => Value::Array(values.into_iter().map(number_to_json).collect()),
        AttributeValue::Bs(values) => Value::Array(
            values
                .into_iter()
                .map(|blob| Value::String(STANDARD.encode(blob.as_ref())))
                .collect(),
        ),
        AttributeValue::L(values) => Value::Array(
            values
                .into_iter()
                .map(|v| attribute_to_json(name, v))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(item_from_attributes(map)?),
        _ => return Err(StoreError::unsupported_attribute(name)),
    };
    Ok(json)
}

/// DynamoDB numbers are decimal strings. Integers stay exact; anything that
/// does not fit a finite JSON number is kept as its original string.
fn number_to_json(n: String) -> Value {
    if let Ok(i) = n.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(u) = n.parse::<u64>() {
        return Value::Number(u.into());
    }
    match n.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(f) => Value::Number(f),
        None => Value::String(n),
    }
}
