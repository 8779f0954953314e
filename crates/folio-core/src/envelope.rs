//! The `{success, message, data?}` response envelope.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::{ApiError, TransportError};

/// Response shape used by every API endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Turn a `success: false` envelope into an API error for `status`.
    pub fn into_result(self, status: u16) -> Result<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ApiError::new(status, non_empty(self.message)).into())
        }
    }

    /// Like [`into_result`](Self::into_result), but a successful envelope
    /// must also carry `data`.
    pub fn into_data(self, status: u16) -> Result<T> {
        self.into_result(status)?.ok_or_else(|| {
            TransportError::Decode {
                message: "response envelope has no data".to_string(),
            }
            .into()
        })
    }
}

fn non_empty(message: String) -> Option<String> {
    if message.trim().is_empty() {
        None
    } else {
        Some(message)
    }
}
