pub mod batch;
pub mod config;
pub mod error;
pub mod fetch;

pub use batch::{BatchResponse, BatchService, BatchType, MarketBatchResponse, OptionalParameters};
pub use error::{AppError, Result};
