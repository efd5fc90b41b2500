//! Tree-shaped payload values and binary-leaf normalization
//!
//! Request and response bodies are tree-shaped values: mappings with
//! unique keys, ordered sequences, binary blobs, and scalars. JSON has no
//! binary variant, so before a response body can be serialized every
//! binary leaf must be converted to its UTF-8 text. [`FlowValue::normalize`]
//! is that transform: pure, stateless, and restartable.

use std::collections::BTreeMap;

use super::error::FlowError;

/// Maximum nesting depth accepted by [`FlowValue::normalize`].
///
/// Well-formed bodies are always finite trees; the bound makes malformed
/// deeply-nested input fail with a typed error instead of exhausting the
/// stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// A closed tagged-variant payload value.
///
/// Mappings have unique keys and no meaningful order. Sequences are
/// ordered. `Bytes` only exists before normalization; it has no JSON
/// image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowValue {
    /// JSON null
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Numeric scalar (integer or float, as JSON represents them)
    Number(serde_json::Number),
    /// UTF-8 text scalar
    Text(String),
    /// Raw binary blob; normalized to `Text` before serialization
    Bytes(Vec<u8>),
    /// Ordered sequence of values
    Sequence(Vec<FlowValue>),
    /// Mapping with unique, order-irrelevant keys
    Mapping(BTreeMap<String, FlowValue>),
}

impl FlowValue {
    /// Recursively convert every binary leaf to its UTF-8 text.
    ///
    /// Mappings keep their keys, sequences keep their order, scalars pass
    /// through unchanged. The result contains no `Bytes` variant.
    ///
    /// # Errors
    ///
    /// - `Encoding`: If a binary leaf is not valid UTF-8
    /// - `NestingTooDeep`: If the tree nests deeper than
    ///   [`MAX_NESTING_DEPTH`]
    pub fn normalize(&self) -> Result<Self, FlowError> {
        self.normalize_at(0)
    }

    fn normalize_at(&self, depth: usize) -> Result<Self, FlowError> {
        if depth >= MAX_NESTING_DEPTH {
            return Err(FlowError::NestingTooDeep { limit: MAX_NESTING_DEPTH });
        }

        match self {
            Self::Bytes(bytes) => {
                let text = std::str::from_utf8(bytes)
                    .map_err(|_| FlowError::Encoding { context: "binary value" })?;
                Ok(Self::Text(text.to_owned()))
            },
            Self::Sequence(items) => {
                let normalized = items
                    .iter()
                    .map(|item| item.normalize_at(depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Sequence(normalized))
            },
            Self::Mapping(entries) => {
                let normalized = entries
                    .iter()
                    .map(|(key, value)| Ok((key.clone(), value.normalize_at(depth + 1)?)))
                    .collect::<Result<BTreeMap<_, _>, FlowError>>()?;
                Ok(Self::Mapping(normalized))
            },
            scalar => Ok(scalar.clone()),
        }
    }

    /// Convert a normalized value into a JSON value.
    ///
    /// # Errors
    ///
    /// - `MalformedPayload`: If a `Bytes` leaf is still present (the value
    ///   was not normalized)
    pub fn into_json(self) -> Result<serde_json::Value, FlowError> {
        match self {
            Self::Null => Ok(serde_json::Value::Null),
            Self::Bool(flag) => Ok(serde_json::Value::Bool(flag)),
            Self::Number(number) => Ok(serde_json::Value::Number(number)),
            Self::Text(text) => Ok(serde_json::Value::String(text)),
            Self::Bytes(_) => Err(FlowError::MalformedPayload {
                reason: "binary value has no JSON representation".to_string(),
            }),
            Self::Sequence(items) => {
                let array =
                    items.into_iter().map(Self::into_json).collect::<Result<Vec<_>, _>>()?;
                Ok(serde_json::Value::Array(array))
            },
            Self::Mapping(entries) => {
                let object = entries
                    .into_iter()
                    .map(|(key, value)| Ok((key, value.into_json()?)))
                    .collect::<Result<serde_json::Map<_, _>, FlowError>>()?;
                Ok(serde_json::Value::Object(object))
            },
        }
    }
}

impl From<serde_json::Value> for FlowValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Number(number) => Self::Number(number),
            serde_json::Value::String(text) => Self::Text(text),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            },
            serde_json::Value::Object(entries) => {
                Self::Mapping(entries.into_iter().map(|(key, value)| (key, value.into())).collect())
            },
        }
    }
}
