use serde_json::Value;

use crate::errors::ServiceError;

/// Request body as handed over by a transport: raw bytes still to be parsed,
/// or a value some earlier layer already decoded.
#[derive(Debug, Clone)]
pub enum RawBody<'a> {
    Text(&'a [u8]),
    Structured(Value),
}

impl RawBody<'_> {
    /// Decode into JSON. Empty or ill-formed text is [`ServiceError::MalformedInput`].
    pub fn parse(self) -> Result<Value, ServiceError> {
        match self {
            RawBody::Text(bytes) => {
                serde_json::from_slice(bytes).map_err(|e| ServiceError::MalformedInput(e.to_string()))
            }
            RawBody::Structured(value) => Ok(value),
        }
    }
}

impl<'a> From<&'a [u8]> for RawBody<'a> {
    fn from(bytes: &'a [u8]) -> Self { RawBody::Text(bytes) }
}

impl<'a> From<&'a str> for RawBody<'a> {
    fn from(text: &'a str) -> Self { RawBody::Text(text.as_bytes()) }
}

impl<'a> From<&'a String> for RawBody<'a> {
    fn from(text: &'a String) -> Self { RawBody::Text(text.as_bytes()) }
}

impl From<Value> for RawBody<'static> {
    fn from(value: Value) -> Self { RawBody::Structured(value) }
}
