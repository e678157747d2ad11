use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} must not be empty")]
    MissingArgument(&'static str),
    #[error(
        "{key} key in optional parameters with value \"{value}\" is in conflict with the {argument} argument. Remove it from the collection"
    )]
    ParameterConflict {
        key: String,
        value: String,
        argument: &'static str,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }

    /// True for errors raised before any request left the process.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::MissingArgument(_) | AppError::ParameterConflict { .. }
        )
    }
}
