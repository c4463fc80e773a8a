//! Shape checks for OCPP 2.0.1 payloads.
//!
//! A payload conforms when it decodes strictly into its message record
//! (required fields present, enumerations within their value set, field
//! types as declared) and, like the published JSON schemas, carries no
//! property the record does not know, no `null` in place of an omitted
//! field and no string longer than its declared `maxLength`.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// Allowed in every object, with free content besides its `vendorId`.
const CUSTOM_DATA: &str = "customData";

/// Fields typed as "any JSON" in the schemas.
const OPAQUE: &[&str] = &["data", "salesTariff"];

/// `maxLength` per property, keyed by a dotted path suffix. The entry with
/// the most segments matching the end of a property's path applies.
const MAX_LENGTH: &[(&str, usize)] = &[
    ("chargingStation.serialNumber", 25),
    ("serialNumber", 40),
    ("model", 20),
    ("vendorName", 50),
    ("firmwareVersion", 50),
    ("iccid", 20),
    ("imsi", 20),
    ("reasonCode", 20),
    ("statusInfo.additionalInfo", 512),
    ("idToken", 36),
    ("additionalIdToken", 36),
    ("type", 50),
    ("transactionId", 36),
    ("content", 512),
    ("language", 8),
    ("language1", 8),
    ("language2", 8),
    ("component.name", 50),
    ("variable.name", 50),
    ("component.instance", 50),
    ("variable.instance", 50),
    ("setVariableData.attributeValue", 1000),
    ("attributeValue", 2500),
    ("variableAttribute.value", 2500),
    ("vendorId", 255),
    ("messageId", 50),
    ("location", 512),
    ("signingCertificate", 5500),
    ("signature", 800),
    ("checksum", 32),
    ("remoteLocation", 512),
    ("filename", 255),
    ("issuerNameHash", 128),
    ("issuerKeyHash", 128),
    ("responderURL", 512),
    ("csr", 5500),
    ("certificateChain", 10000),
    ("certificate", 5500),
    ("exiRequest", 5600),
    ("exiResponse", 5600),
    ("ocspResult", 5500),
    ("iso15118SchemaVersion", 50),
    ("techInfo", 255),
    ("eventData.techInfo", 500),
    ("techCode", 50),
    ("actualValue", 2500),
    ("signedMeterData", 2500),
    ("signingMethod", 50),
    ("encodingMethod", 50),
    ("publicKey", 2500),
    ("unit", 20),
    ("variableCharacteristics.unit", 16),
    ("valuesList", 1000),
    ("connectorType", 20),
    ("customerIdentifier", 64),
    ("ocppCsmsUrl", 512),
    ("apn", 512),
    ("apnUserName", 20),
    ("apnPassword", 20),
    ("preferredNetwork", 6),
    ("server", 512),
    ("user", 20),
    ("group", 20),
    ("password", 20),
    ("key", 255),
];

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaViolation {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl SchemaViolation {
    fn at(path: &[String], message: impl std::fmt::Display) -> Self {
        Self {
            message: format!("{message} at {}", path.join(".")),
            line: 0,
            column: 0,
        }
    }
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "schema violation: {}", self.message)
        } else {
            write!(f, "schema violation at {}:{}: {}", self.line, self.column, self.message)
        }
    }
}

impl std::error::Error for SchemaViolation {}

impl From<serde_json::Error> for SchemaViolation {
    fn from(e: serde_json::Error) -> Self {
        Self {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        }
    }
}

/// Decodes `payload` as `T`, reporting the first violation.
pub fn conforms<T: Serialize + DeserializeOwned>(payload: &Value) -> Result<T, SchemaViolation> {
    if !payload.is_object() {
        return Err(SchemaViolation {
            message: format!("expected an object, got {payload}"),
            line: 0,
            column: 0,
        });
    }
    // via text so the violation carries a position
    let text = serde_json::to_string_pretty(payload)?;
    let record: T = serde_json::from_str(&text)?;
    let known = serde_json::to_value(&record)?;
    check(payload, &known, &mut Vec::new())?;
    Ok(record)
}

/// Round-trips an already decoded record through its wire form.
pub fn conforms_value<T: Serialize + DeserializeOwned>(record: &T) -> Result<T, SchemaViolation> {
    conforms(&serde_json::to_value(record)?)
}

/// Walks `input` alongside its re-encoded record `known`. Properties the
/// record dropped on the way were not part of the message.
fn check(input: &Value, known: &Value, path: &mut Vec<String>) -> Result<(), SchemaViolation> {
    match (input, known) {
        (Value::Object(fields), Value::Object(known_fields)) => {
            for (key, value) in fields {
                path.push(key.clone());
                let result = check_property(key, value, known_fields, path);
                path.pop();
                result?;
            }
            Ok(())
        }
        (Value::Array(items), Value::Array(known_items)) => items
            .iter()
            .zip(known_items)
            .try_for_each(|(item, known)| check(item, known, path)),
        (Value::String(s), _) => check_length(s, path),
        _ => Ok(()),
    }
}

fn check_property(
    key: &str,
    value: &Value,
    known_fields: &Map<String, Value>,
    path: &mut Vec<String>,
) -> Result<(), SchemaViolation> {
    if key == CUSTOM_DATA {
        return match value.get("vendorId") {
            Some(Value::String(vendor_id)) => {
                path.push("vendorId".to_string());
                let result = check_length(vendor_id, path);
                path.pop();
                result
            }
            _ => Err(SchemaViolation::at(path, "customData without a vendorId")),
        };
    }
    if OPAQUE.contains(&key) {
        return Ok(());
    }
    match known_fields.get(key) {
        Some(known) => check(value, known, path),
        None if value.is_null() => Err(SchemaViolation::at(path, "null not allowed")),
        None => Err(SchemaViolation::at(path, "additional property not allowed")),
    }
}

fn check_length(s: &str, path: &[String]) -> Result<(), SchemaViolation> {
    let Some(max) = max_length(path) else {
        return Ok(());
    };
    let len = s.chars().count();
    if len > max {
        return Err(SchemaViolation::at(path, format!("length {len} exceeds maxLength {max}")));
    }
    Ok(())
}

fn max_length(path: &[String]) -> Option<usize> {
    MAX_LENGTH
        .iter()
        .filter_map(|(suffix, max)| {
            let segments: Vec<&str> = suffix.split('.').collect();
            let matches = segments.len() <= path.len()
                && path[path.len() - segments.len()..]
                    .iter()
                    .zip(&segments)
                    .all(|(p, s)| p == s);
            matches.then_some((segments.len(), *max))
        })
        .max_by_key(|(specificity, _)| *specificity)
        .map(|(_, max)| max)
}
