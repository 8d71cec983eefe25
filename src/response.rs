//! JSON response bodies shared by the endpoints.

use serde::{Deserialize, Serialize};

/// The JSON body sent for messages and errors, e.g. `{"message": "Account already exists!"}`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    /// A human readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a message response body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The JSON body sent after a record is created.
///
/// `data` echoes the input used to create the record, with defaults applied.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CreatedResponse<T> {
    /// A human readable message, e.g. "Account created successfully!".
    pub message: String,
    /// The input used to create the record.
    pub data: T,
}

impl<T> CreatedResponse<T> {
    /// Create a response body for a created record.
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}
