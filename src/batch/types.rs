use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Caller-supplied query overrides, appended after the reserved keys in key order.
pub type OptionalParameters = BTreeMap<String, String>;

/// Data categories that can be requested in one batch call.
///
/// The kebab-case form of each variant is the value sent in the `types` query pair.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum BatchType {
    Quote,
    News,
    Chart,
    Company,
    Logo,
    Book,
    Earnings,
    Financials,
    Stats,
    Peers,
    DelayedQuote,
    Dividends,
    Splits,
    Previous,
    Ohlc,
    Price,
    VolumeByVenue,
    LargestTrades,
    Options,
    IntradayPrices,
}

impl BatchType {
    pub fn description(&self) -> &'static str {
        self.into()
    }
}

/// Join the wire descriptions of `types` with commas, keeping caller order.
pub fn join_descriptions(types: &[BatchType]) -> String {
    types
        .iter()
        .map(BatchType::description)
        .collect::<Vec<_>>()
        .join(",")
}

/// Payload for one symbol: each requested category keyed by its wire description.
/// Section contents are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchResponse {
    sections: BTreeMap<String, Value>,
}

impl BatchResponse {
    pub fn get(&self, batch_type: BatchType) -> Option<&Value> {
        self.sections.get(batch_type.description())
    }
}

/// Payload of a market batch call, keyed by symbol.
pub type MarketBatchResponse = BTreeMap<String, BatchResponse>;
