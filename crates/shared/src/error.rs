use thiserror::Error;

/// Message surfaced for every transport or HTTP-status failure.
pub const REQUEST_FAILED_MESSAGE: &str = "Something bad happened; please try again later.";

/// A required search input was blank. Detected before any request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter an author name.")]
    MissingAuthor,
    #[error("Enter a title.")]
    MissingTitle,
    #[error("Enter both author and title.")]
    MissingAuthorOrTitle,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// No response arrived, the status was not 2xx, or the body was unreadable.
    /// The underlying cause is only logged.
    #[error("{}", REQUEST_FAILED_MESSAGE)]
    RequestFailed,
    /// A 2xx response whose body was not a list of poems.
    #[error("{message}")]
    MalformedResponse { message: String },
    /// The search ended without reporting why.
    #[error("search ended without a result")]
    Unknown,
}

impl SearchError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Text safe to show to the user, if the failure carries any.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            SearchError::RequestFailed => Some(REQUEST_FAILED_MESSAGE),
            SearchError::MalformedResponse { message } => Some(message),
            SearchError::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_hides_cause_behind_generic_message() {
        assert_eq!(
            SearchError::RequestFailed.user_message(),
            Some("Something bad happened; please try again later.")
        );
        assert_eq!(
            SearchError::RequestFailed.to_string(),
            REQUEST_FAILED_MESSAGE
        );
    }

    #[test]
    fn unknown_has_no_user_message() {
        assert_eq!(SearchError::Unknown.user_message(), None);
    }

    #[test]
    fn validation_messages_match_prompts() {
        assert_eq!(ValidationError::MissingAuthor.to_string(), "Enter an author name.");
        assert_eq!(ValidationError::MissingTitle.to_string(), "Enter a title.");
        assert_eq!(
            ValidationError::MissingAuthorOrTitle.to_string(),
            "Enter both author and title."
        );
    }
}
