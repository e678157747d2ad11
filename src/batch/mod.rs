use std::sync::Arc;

use log::debug;

use crate::error::Result;
use crate::fetch::{ApiRequest, ApiResponse, Executor, QueryStringBuilder};

pub mod types;
pub mod validate;

pub use types::{join_descriptions, BatchResponse, BatchType, MarketBatchResponse, OptionalParameters};
use validate::{reject_reserved, require_symbol, require_symbols, require_types, SYMBOLS_KEY, TYPES_KEY};

pub const SYMBOL_BATCH_PATTERN: &str = "stock/[symbol]/batch";
pub const MARKET_BATCH_PATTERN: &str = "stock/market/batch";

/// Batch quote endpoints. Validates arguments, builds the request and hands it to the executor.
pub struct BatchService<E> {
    executor: Arc<E>,
}

impl<E> Clone for BatchService<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<E: Executor> BatchService<E> {
    pub fn new(executor: E) -> Self {
        Self::with_shared(Arc::new(executor))
    }

    pub fn with_shared(executor: Arc<E>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Several data categories for one symbol (`stock/{symbol}/batch`).
    pub async fn batch_by_symbol(
        &self,
        symbol: &str,
        types: &[BatchType],
        optional_parameters: Option<&OptionalParameters>,
    ) -> Result<ApiResponse<BatchResponse>> {
        let request = symbol_batch_request(symbol, types, optional_parameters)?;
        debug!("Batch request for {} with types {}", symbol, join_descriptions(types));
        self.executor.execute(request).await
    }

    /// Several data categories for a list of symbols (`stock/market/batch`).
    pub async fn batch_by_market<S: AsRef<str>>(
        &self,
        symbols: &[S],
        types: &[BatchType],
        optional_parameters: Option<&OptionalParameters>,
    ) -> Result<ApiResponse<MarketBatchResponse>> {
        let request = market_batch_request(symbols, types, optional_parameters)?;
        debug!(
            "Market batch request for {} symbols with types {}",
            symbols.len(),
            join_descriptions(types)
        );
        self.executor.execute(request).await
    }
}

pub fn symbol_batch_request(
    symbol: &str,
    types: &[BatchType],
    optional_parameters: Option<&OptionalParameters>,
) -> Result<ApiRequest> {
    require_symbol(symbol)?;
    require_types(types)?;
    reject_reserved(optional_parameters, TYPES_KEY, "types")?;

    let mut query = QueryStringBuilder::new();
    query.add(TYPES_KEY, join_descriptions(types));
    append_optional(&mut query, optional_parameters);

    Ok(ApiRequest::new(SYMBOL_BATCH_PATTERN)
        .with_path_param("symbol", symbol.trim())
        .with_query(query))
}

pub fn market_batch_request<S: AsRef<str>>(
    symbols: &[S],
    types: &[BatchType],
    optional_parameters: Option<&OptionalParameters>,
) -> Result<ApiRequest> {
    require_symbols(symbols)?;
    require_types(types)?;
    reject_reserved(optional_parameters, TYPES_KEY, "types")?;
    reject_reserved(optional_parameters, SYMBOLS_KEY, "symbols")?;

    let joined = symbols
        .iter()
        .map(|symbol| symbol.as_ref().trim())
        .collect::<Vec<_>>()
        .join(",");

    let mut query = QueryStringBuilder::new();
    query.add(SYMBOLS_KEY, joined);
    query.add(TYPES_KEY, join_descriptions(types));
    append_optional(&mut query, optional_parameters);

    Ok(ApiRequest::new(MARKET_BATCH_PATTERN).with_query(query))
}

fn append_optional(query: &mut QueryStringBuilder, optional_parameters: Option<&OptionalParameters>) {
    if let Some(parameters) = optional_parameters {
        for (key, value) in parameters {
            query.add(key.as_str(), value.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use async_trait::async_trait;
    use serde::de::DeserializeOwned;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Records every request and answers with a canned JSON body.
    struct RecordingExecutor {
        body: Value,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl RecordingExecutor {
        fn new(body: Value) -> Self {
            Self {
                body,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Executor for RecordingExecutor {
        async fn execute<T>(&self, request: ApiRequest) -> Result<ApiResponse<T>>
        where
            T: DeserializeOwned + Send + 'static,
        {
            self.requests.lock().unwrap().push(request);
            let data: T = serde_json::from_value(self.body.clone())?;
            Ok(ApiResponse::success(data))
        }
    }

    fn service(body: Value) -> BatchService<RecordingExecutor> {
        BatchService::new(RecordingExecutor::new(body))
    }

    fn optional(pairs: &[(&str, &str)]) -> OptionalParameters {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn symbol_batch_builds_path_and_query() {
        let service = service(json!({ "quote": { "symbol": "AAPL" }, "news": [] }));

        let response = service
            .batch_by_symbol("AAPL", &[BatchType::Quote, BatchType::News], None)
            .await
            .expect("batch succeeds");

        let requests = service.executor().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url_pattern, SYMBOL_BATCH_PATTERN);
        assert_eq!(requests[0].render_path().unwrap(), "stock/AAPL/batch");
        assert_eq!(requests[0].query.build(), "types=quote,news");

        let data = response.into_result().expect("data");
        assert_eq!(data.get(BatchType::Quote).unwrap()["symbol"], "AAPL");
    }

    #[tokio::test]
    async fn symbol_batch_appends_optional_parameters_after_types() {
        let service = service(json!({}));
        let extra = optional(&[("range", "1m"), ("last", "5")]);

        service
            .batch_by_symbol("MSFT", &[BatchType::Chart], Some(&extra))
            .await
            .expect("batch succeeds");

        let requests = service.executor().requests();
        assert_eq!(requests[0].query.build(), "types=chart&last=5&range=1m");
    }

    #[tokio::test]
    async fn symbol_batch_rejects_missing_arguments_without_calling_executor() {
        let service = service(json!({}));

        let err = service
            .batch_by_symbol("", &[BatchType::Quote], None)
            .await
            .expect_err("empty symbol");
        assert!(matches!(err, AppError::MissingArgument("symbol")));

        let err = service
            .batch_by_symbol("AAPL", &[], None)
            .await
            .expect_err("empty types");
        assert!(matches!(err, AppError::MissingArgument("types")));

        assert!(service.executor().requests().is_empty());
    }

    #[tokio::test]
    async fn symbol_batch_rejects_types_override() {
        let service = service(json!({}));
        let extra = optional(&[("types", "chart")]);

        let err = service
            .batch_by_symbol("AAPL", &[BatchType::Quote], Some(&extra))
            .await
            .expect_err("conflict");

        let message = err.to_string();
        assert!(
            message.contains("types key") && message.contains("\"chart\""),
            "unexpected error message: {message}"
        );
        assert!(service.executor().requests().is_empty());
    }

    #[test]
    fn surrounding_whitespace_is_not_sent() {
        let request = symbol_batch_request(" AAPL ", &[BatchType::Quote], None).expect("valid");
        assert_eq!(
            request.path_and_query().unwrap(),
            "stock/AAPL/batch?types=quote"
        );

        let request =
            market_batch_request(&[" AAPL", "FB "], &[BatchType::Quote], None).expect("valid");
        assert_eq!(request.query.get("symbols"), Some("AAPL,FB"));
    }

    #[test]
    fn symbol_batch_allows_symbols_key_in_optional_parameters() {
        let extra = optional(&[("symbols", "MSFT")]);
        let request = symbol_batch_request("AAPL", &[BatchType::Quote], Some(&extra))
            .expect("only types is reserved for the symbol endpoint");
        assert_eq!(request.query.build(), "types=quote&symbols=MSFT");
    }

    #[tokio::test]
    async fn market_batch_orders_symbols_types_then_optional() {
        let service = service(json!({
            "AAPL": { "quote": { "latestPrice": 189.5 } },
            "FB": { "quote": { "latestPrice": 480.0 } }
        }));
        let extra = optional(&[("range", "5y")]);

        let response = service
            .batch_by_market(&["AAPL", "FB"], &[BatchType::Quote, BatchType::News], Some(&extra))
            .await
            .expect("batch succeeds");

        let requests = service.executor().requests();
        assert_eq!(requests[0].url_pattern, MARKET_BATCH_PATTERN);
        assert!(requests[0].path_params.is_empty());
        assert_eq!(
            requests[0].path_and_query().unwrap(),
            "stock/market/batch?symbols=AAPL,FB&types=quote,news&range=5y"
        );

        let data = response.into_result().expect("data");
        assert_eq!(data.len(), 2);
        assert_eq!(data["FB"].get(BatchType::Quote).unwrap()["latestPrice"], 480.0);
    }

    #[tokio::test]
    async fn market_batch_rejects_missing_arguments() {
        let service = service(json!({}));
        let no_symbols: Vec<String> = Vec::new();

        let err = service
            .batch_by_market(&no_symbols, &[BatchType::Quote], None)
            .await
            .expect_err("no symbols");
        assert!(matches!(err, AppError::MissingArgument("symbols")));

        let err = service
            .batch_by_market(&["AAPL"], &[], None)
            .await
            .expect_err("no types");
        assert!(matches!(err, AppError::MissingArgument("types")));

        assert!(service.executor().requests().is_empty());
    }

    #[tokio::test]
    async fn market_batch_rejects_reserved_keys() {
        let service = service(json!({}));

        let extra = optional(&[("symbols", "TSLA")]);
        let err = service
            .batch_by_market(&["AAPL"], &[BatchType::Quote], Some(&extra))
            .await
            .expect_err("symbols conflict");
        assert!(
            matches!(&err, AppError::ParameterConflict { key, argument: "symbols", .. } if key == "symbols"),
            "unexpected error: {err}"
        );

        // types is checked before symbols
        let extra = optional(&[("symbols", "TSLA"), ("types", "news")]);
        let err = service
            .batch_by_market(&["AAPL"], &[BatchType::Quote], Some(&extra))
            .await
            .expect_err("types conflict");
        assert!(
            matches!(&err, AppError::ParameterConflict { argument: "types", .. }),
            "unexpected error: {err}"
        );

        assert!(service.executor().requests().is_empty());
    }

    #[tokio::test]
    async fn cloned_services_share_the_executor() {
        let service = service(json!({}));
        let clone = service.clone();

        clone
            .batch_by_symbol("IBM", &[BatchType::Stats], None)
            .await
            .expect("batch succeeds");

        assert_eq!(service.executor().requests().len(), 1);
    }
}
