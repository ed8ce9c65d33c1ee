//! Gateway event envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{HeraldError, HeraldResult};

/// One inbound event: `{ "t": "interactionCreate", "d": { ... } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayEvent {
    #[serde(rename = "t")]
    pub name: String,
    #[serde(rename = "d", default)]
    pub data: Value,
}

impl GatewayEvent {
    pub fn new(name: impl Into<String>, data: Value) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Parse one JSON line
    pub fn parse_line(line: &str) -> HeraldResult<Self> {
        serde_json::from_str(line)
            .map_err(|e| HeraldError::json(format!("Invalid gateway event: {}", e)))
    }

    /// Handler arguments: the payload, or none for a null payload
    pub fn into_args(self) -> Vec<Value> {
        match self.data {
            Value::Null => Vec::new(),
            data => vec![data],
        }
    }
}
