use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub const NUMBERS_FIELD: &str = "Numbers";
pub const NUMBER_OF_PRIMES_ATTRIBUTE: &str = "NumberOfPrimes";
pub const NUMBER_DATA_TYPE: &str = "Number";

pub type MessageAttributes = BTreeMap<String, MessageAttribute>;

/// Integer carried in a `Numbers` list. Wide enough for every JSON integer
/// the decoder accepts, from `i64::MIN` up to `u64::MAX`.
pub type Number = i128;

/// SQS trigger envelope. Records stay raw until the dispatcher reaches them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InboundBatch {
    #[serde(rename = "Records")]
    pub records: Vec<InboundRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct InboundRecord(Value);

impl InboundRecord {
    pub fn body(&self) -> Result<&str, ContractError> {
        self.0
            .get("body")
            .and_then(Value::as_str)
            .ok_or_else(|| ContractError::new("SQS record body must be a string"))
    }

    pub fn id(&self) -> Result<&str, ContractError> {
        self.0
            .get("messageId")
            .and_then(Value::as_str)
            .ok_or_else(|| ContractError::new("SQS record messageId must be a string"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageAttribute {
    #[serde(rename = "DataType")]
    pub data_type: String,
    #[serde(rename = "StringValue")]
    pub string_value: String,
}

impl MessageAttribute {
    pub fn number(value: impl ToString) -> Self {
        Self {
            data_type: NUMBER_DATA_TYPE.to_string(),
            string_value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutboundMessage {
    pub queue_url: String,
    pub body: String,
    pub attributes: MessageAttributes,
}

impl OutboundMessage {
    /// Message announcing `primes` to the destination queue. The body is the
    /// compact JSON array of primes, in input order.
    pub fn for_primes(queue_url: impl Into<String>, primes: &[Number]) -> Result<Self, ContractError> {
        let body = serde_json::to_string(primes)
            .map_err(|error| ContractError::new(format!("failed to serialize primes: {error}")))?;
        let attributes = MessageAttributes::from([(
            NUMBER_OF_PRIMES_ATTRIBUTE.to_string(),
            MessageAttribute::number(primes.len()),
        )]);

        Ok(Self {
            queue_url: queue_url.into(),
            body,
            attributes,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchEntry {
    pub id: String,
    pub body: String,
    pub attributes: MessageAttributes,
}

/// Pairs bodies with attribute sets in order and tags each pair with a fresh
/// UUID v4 entry id.
pub fn build_batch_entries(
    bodies: &[String],
    attributes: &[MessageAttributes],
) -> Result<Vec<BatchEntry>, ContractError> {
    if bodies.len() != attributes.len() {
        return Err(ContractError::new(format!(
            "batch has {} bodies but {} attribute sets",
            bodies.len(),
            attributes.len()
        )));
    }

    Ok(bodies
        .iter()
        .zip(attributes)
        .map(|(body, attributes)| BatchEntry {
            id: Uuid::new_v4().to_string(),
            body: body.clone(),
            attributes: attributes.clone(),
        })
        .collect())
}

/// JSON values that count as "no numbers": null, false, zero and empty
/// strings, arrays or objects.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(values) => values.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn as_number(value: &Value) -> Option<Number> {
    value
        .as_i64()
        .map(Number::from)
        .or_else(|| value.as_u64().map(Number::from))
}

pub fn is_success_status(status_code: u16) -> bool {
    (200..300).contains(&status_code)
}

/// Decoded record body. An empty `numbers` list means there is nothing to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberPayload {
    pub numbers: Vec<Number>,
}

impl NumberPayload {
    pub fn from_body(body: &str) -> Result<Self, ContractError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|error| ContractError::new(format!("Malformed JSON body: {error}")))?;

        let Value::Object(object) = value else {
            return Err(ContractError::new("Record body must be a JSON object"));
        };

        let numbers = match object.get(NUMBERS_FIELD) {
            None => Vec::new(),
            Some(value) if is_falsy(value) => Vec::new(),
            Some(Value::Array(values)) => values
                .iter()
                .map(|value| {
                    as_number(value).ok_or_else(|| {
                        ContractError::new(format!(
                            "'{NUMBERS_FIELD}' must contain only integers, found {value}"
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(ContractError::new(format!(
                    "'{NUMBERS_FIELD}' must be an array of integers, found {other}"
                )));
            }
        };

        Ok(Self { numbers })
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractError {
    message: String,
}

impl ContractError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ContractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ContractError {}
