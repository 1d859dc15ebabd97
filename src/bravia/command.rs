//! JSON channel request envelope and response unwrapping

use serde::Serialize;
use serde_json::{Map, Value};

/// `version` field of every envelope, and the default `getMethodTypes` argument
pub const DEFAULT_API_VERSION: &str = "1.0";

/// A method call on the `/sony/system` channel.
///
/// The device accepts either positional or named params, never both. When
/// any positional arg is present the named ones are dropped from the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonCommand {
    method: String,
    args: Vec<Value>,
    named: Vec<(String, Value)>,
}

impl JsonCommand {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            args: Vec::new(),
            named: Vec::new(),
        }
    }

    /// Append a positional argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Append a named argument; sent as its own `{key: value}` object
    pub fn named(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.push((key.into(), value.into()));
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> Vec<Value> {
        if !self.args.is_empty() {
            return self.args.clone();
        }

        self.named
            .iter()
            .map(|(k, v)| {
                let mut entry = Map::new();
                entry.insert(k.clone(), v.clone());
                Value::Object(entry)
            })
            .collect()
    }

    pub(crate) fn envelope(&self, id: u64) -> JsonEnvelope<'_> {
        JsonEnvelope {
            method: &self.method,
            params: self.params(),
            id,
            version: DEFAULT_API_VERSION,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonEnvelope<'a> {
    pub method: &'a str,
    pub params: Vec<Value>,
    pub id: u64,
    pub version: &'static str,
}

/// Strip the device's response wrapper.
///
/// `result` wins over `results`; a body with neither passes through. A list
/// of exactly one element collapses to that element.
pub fn unwrap_response(body: Value) -> Value {
    let inner = match body {
        Value::Object(mut map) => {
            if let Some(result) = map.remove("result") {
                result
            } else if let Some(results) = map.remove("results") {
                results
            } else {
                Value::Object(map)
            }
        }
        other => other,
    };

    match inner {
        Value::Array(mut items) if items.len() == 1 => items.remove(0),
        other => other,
    }
}
