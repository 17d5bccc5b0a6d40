/// Unified error handling module
use reqwest::StatusCode;
use thiserror::Error;

/// Settings document could not be turned into a `Configuration`.
///
/// Always fatal: the widget must not start with a partial configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("settings document is not valid JSON: {0}")]
    Malformed(String),
    #[error("settings document must be a JSON object")]
    NotAnObject,
    #[error("missing required setting '{0}'")]
    Missing(&'static str),
    #[error("setting '{field}' must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("setting '{0}' must not be empty")]
    Empty(&'static str),
}

/// Failure talking to the TOM backend
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to TOM failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("TOM responded with status {status}")]
    Status { status: StatusCode, body: String },
    #[error("could not decode TOM response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status carried by the failure, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http(e) => e.status(),
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Decode(_) => None,
        }
    }
}

/// Errors produced while refreshing and rendering target status
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("could not load target information: {0}")]
    Fetch(#[from] ClientError),
    #[error("unrecognised timelapse format '{0}'")]
    UnrecognizedFormat(String),
    #[error("invalid timelapse creation time {0}")]
    InvalidTimestamp(i64),
    #[error("a status refresh is already in progress")]
    RefreshInFlight,
}

impl ViewError {
    /// Message suitable for the inline error area of the page.
    pub fn user_message(&self) -> String {
        match self {
            ViewError::Fetch(_) => {
                "Could not load target information. Please reload the page.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Classified, user-facing reason a submission failed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct SubmissionError {
    pub message: String,
}

pub type ClientResult<T> = Result<T, ClientError>;
pub type ViewResult<T> = Result<T, ViewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reported_for_status_errors() {
        let err = ClientError::Status {
            status: StatusCode::BAD_REQUEST,
            body: "{}".to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_decode_error_has_no_status() {
        let err: ClientError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_fetch_error_user_message_hides_details() {
        let err = ViewError::Fetch(ClientError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "Traceback ...".to_string(),
        });
        assert!(!err.user_message().contains("Traceback"));
    }

    #[test]
    fn test_format_error_names_the_format() {
        let err = ViewError::UnrecognizedFormat("avi".to_string());
        assert_eq!(err.user_message(), "unrecognised timelapse format 'avi'");
    }
}
