//! Response validator: checks a decoded status API body against the
//! documented contract and extracts the homework list.

use serde_json::Value;

use herald_common::error::ValidationError;
use herald_common::types::ITEMS_KEY;

/// Validate the top-level shape of a status response.
///
/// Checks run in order and stop at the first failure:
/// 1. the body is a JSON object
/// 2. it has a `homeworks` key
/// 3. `homeworks` is an array
/// 4. the array is non-empty
///
/// Entries are returned raw; only the first one is ever formatted.
pub fn validate(raw: &Value) -> Result<&[Value], ValidationError> {
    let object = raw.as_object().ok_or(ValidationError::NotAnObject)?;

    let items = object
        .get(ITEMS_KEY)
        .ok_or(ValidationError::MissingItemsKey)?
        .as_array()
        .ok_or(ValidationError::ItemsNotASequence)?;

    if items.is_empty() {
        return Err(ValidationError::EmptyItemsList);
    }

    tracing::debug!(count = items.len(), "Status response validated");
    Ok(items.as_slice())
}
