use crate::error::Result;

pub mod executor;
pub mod query;
pub mod request;
pub mod response;

pub use executor::{Executor, RestExecutor};
pub use query::QueryStringBuilder;
pub use request::{expand_env_vars, render_path, ApiRequest};
pub use response::ApiResponse;

pub type FetchResult<T> = Result<T>;
