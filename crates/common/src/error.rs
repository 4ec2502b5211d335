use thiserror::Error;

/// Startup configuration failures. Fatal: the poll loop never starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required credential: {0}")]
    MissingCredential(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Failures of a single status API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusClientError {
    #[error("Status endpoint unreachable: {0}")]
    TransportFailure(String),

    #[error("Status endpoint returned unexpected status {0}")]
    UnexpectedStatus(u16),
}

/// Shape violations of a decoded status API response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Response is not a JSON object")]
    NotAnObject,

    #[error("Response has no \"homeworks\" key")]
    MissingItemsKey,

    #[error("Response \"homeworks\" value is not a list")]
    ItemsNotASequence,

    #[error("Response \"homeworks\" list is empty")]
    EmptyItemsList,
}

/// Malformed homework record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Homework record has no \"{0}\" field")]
    MissingField(&'static str),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),
}

/// Delivery failure of the messaging channel. Logged, never retried.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification transport error: {0}")]
    Transport(String),

    #[error("Notification rejected with status {status}: {description}")]
    Rejected { status: u16, description: String },
}

/// Any error that ends a poll cycle early and turns into a failure notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error(transparent)]
    Client(#[from] StatusClientError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_error_display_is_transparent() {
        let err: CycleError = StatusClientError::UnexpectedStatus(500).into();
        assert_eq!(
            err.to_string(),
            "Status endpoint returned unexpected status 500"
        );

        let err: CycleError = FormatError::UnknownStatus("unknown".into()).into();
        assert_eq!(err.to_string(), "Unknown homework status: unknown");
    }

    #[test]
    fn test_distinct_kinds_have_distinct_text() {
        let texts: Vec<String> = [
            CycleError::from(StatusClientError::TransportFailure("timeout".into())),
            CycleError::from(StatusClientError::UnexpectedStatus(500)),
            CycleError::from(ValidationError::NotAnObject),
            CycleError::from(ValidationError::MissingItemsKey),
            CycleError::from(ValidationError::ItemsNotASequence),
            CycleError::from(ValidationError::EmptyItemsList),
            CycleError::from(FormatError::MissingField("status")),
        ]
        .iter()
        .map(ToString::to_string)
        .collect();

        for (i, a) in texts.iter().enumerate() {
            for b in &texts[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
