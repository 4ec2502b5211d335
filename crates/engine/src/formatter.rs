//! Status formatter: turns one raw homework entry into the chat message.

use serde_json::Value;

use herald_common::error::FormatError;
use herald_common::types::{Homework, HomeworkStatus, NAME_FIELD, STATUS_FIELD};

/// Extract a typed [`Homework`] from a raw API entry.
///
/// Both fields must be present as strings and the status must be in the
/// verdict table.
pub fn parse_homework(entry: &Value) -> Result<Homework, FormatError> {
    let name = string_field(entry, NAME_FIELD)?;
    let status = string_field(entry, STATUS_FIELD)?;

    let status = status
        .parse::<HomeworkStatus>()
        .map_err(|unknown| FormatError::UnknownStatus(unknown.0))?;

    Ok(Homework {
        name: name.to_string(),
        status,
    })
}

/// Message announcing the homework's current status.
pub fn status_message(homework: &Homework) -> String {
    format!(
        "Changed review status for \"{}\". {}",
        homework.name,
        homework.status.verdict()
    )
}

/// Format a raw API entry into its notification text.
pub fn format_status(entry: &Value) -> Result<String, FormatError> {
    parse_homework(entry).map(|homework| status_message(&homework))
}

// A present-but-non-string value is reported as missing: the record is
// unusable either way.
fn string_field<'a>(entry: &'a Value, field: &'static str) -> Result<&'a str, FormatError> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .ok_or(FormatError::MissingField(field))
}
