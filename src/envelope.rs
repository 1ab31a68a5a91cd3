//! Uniform JSON response envelope.
//!
//! Every operation result is rendered as `{"code", "msg", "data"}`. Success
//! uses code `1` and message `ok`; failure uses code `-1` with the error's
//! message and an empty object as data. Error classes are not exposed to
//! callers; they are logged here instead.

use crate::error::Classify;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Code carried by successful responses.
pub const SUCCESS_CODE: i32 = 1;

/// Code carried by failed responses.
pub const ERROR_CODE: i32 = -1;

/// Default success message.
pub const SUCCESS_MESSAGE: &str = "ok";

/// Response envelope shared by all operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// [`SUCCESS_CODE`] or [`ERROR_CODE`].
    pub code: i32,
    /// Human-readable outcome message.
    pub msg: String,
    /// Payload; an empty object when there is nothing to return.
    pub data: Value,
}

impl Envelope {
    /// Wraps a payload in a success envelope.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the payload cannot be serialised.
    pub fn success<T: Serialize + ?Sized>(data: &T) -> Result<Self, serde_json::Error> {
        Self::success_with_message(data, SUCCESS_MESSAGE)
    }

    /// Wraps a payload in a success envelope with a custom message.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the payload cannot be serialised.
    pub fn success_with_message<T: Serialize + ?Sized>(
        data: &T,
        msg: impl Into<String>,
    ) -> Result<Self, serde_json::Error> {
        let value = serde_json::to_value(data)?;
        Ok(Self {
            code: SUCCESS_CODE,
            msg: msg.into(),
            data: non_null(value),
        })
    }

    /// Builds a failure envelope with an empty data object.
    #[must_use]
    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            code: ERROR_CODE,
            msg: msg.into(),
            data: Value::Object(Map::new()),
        }
    }

    /// Renders an operation result.
    ///
    /// Errors are logged with their class and collapsed into the generic
    /// failure envelope.
    pub fn from_result<T, E>(result: Result<T, E>) -> Self
    where
        T: Serialize,
        E: std::error::Error + Classify,
    {
        match result {
            Ok(data) => Self::success(&data).unwrap_or_else(|err| {
                tracing::error!(error = %err, "failed to serialise response payload");
                Self::failure(err.to_string())
            }),
            Err(err) => {
                tracing::warn!(kind = %err.kind(), error = %err, "operation failed");
                Self::failure(err.to_string())
            }
        }
    }

    /// Returns `true` for success envelopes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

fn non_null(value: Value) -> Value {
    if value.is_null() {
        Value::Object(Map::new())
    } else {
        value
    }
}
