use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Outcome of an executed request: either decoded data or the server's error text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub error_message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error_message: None,
        }
    }

    pub fn failure<M: Into<String>>(message: M) -> Self {
        Self {
            data: None,
            error_message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error_message.is_none() && self.data.is_some()
    }

    pub fn into_result(self) -> Result<T> {
        match (self.data, self.error_message) {
            (Some(data), None) => Ok(data),
            (_, Some(message)) => Err(AppError::message(message)),
            (None, None) => Err(AppError::message("Response carried no data")),
        }
    }
}
