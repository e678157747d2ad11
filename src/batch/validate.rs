use crate::error::{AppError, Result};

use super::types::{BatchType, OptionalParameters};

pub const TYPES_KEY: &str = "types";
pub const SYMBOLS_KEY: &str = "symbols";

pub fn require_symbol(symbol: &str) -> Result<()> {
    if symbol.trim().is_empty() {
        return Err(AppError::MissingArgument("symbol"));
    }
    Ok(())
}

/// At least one symbol, and no blank entries.
pub fn require_symbols<S: AsRef<str>>(symbols: &[S]) -> Result<()> {
    if symbols.is_empty() || symbols.iter().any(|s| s.as_ref().trim().is_empty()) {
        return Err(AppError::MissingArgument("symbols"));
    }
    Ok(())
}

pub fn require_types(types: &[BatchType]) -> Result<()> {
    if types.is_empty() {
        return Err(AppError::MissingArgument("types"));
    }
    Ok(())
}

/// Fail when `optional` carries `key`, which the caller already set through `argument`.
pub fn reject_reserved(
    optional: Option<&OptionalParameters>,
    key: &str,
    argument: &'static str,
) -> Result<()> {
    match optional.and_then(|params| params.get(key)) {
        Some(value) => Err(AppError::ParameterConflict {
            key: key.to_string(),
            value: value.clone(),
            argument,
        }),
        None => Ok(()),
    }
}
