use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Failure talking to one of the remote services
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error body both services use, `{"detail": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

impl ProviderError {
    /// True when the service reported itself unavailable (503)
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ProviderError::Status { status, .. } if *status == StatusCode::SERVICE_UNAVAILABLE.as_u16())
    }

    /// Text suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            ProviderError::Status { message, .. } if !message.is_empty() => message.clone(),
            ProviderError::Status { status, .. } => format!("service returned status {status}"),
            ProviderError::Http(e) if e.is_timeout() => "the service did not answer in time".to_string(),
            ProviderError::Http(_) => "could not reach the service".to_string(),
            ProviderError::Decode(_) => "the service sent data in an unexpected format".to_string(),
        }
    }
}

/// Turn non-success responses into [`ProviderError::Status`]
pub(crate) async fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.detail)
        .unwrap_or(body);

    Err(ProviderError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_only_for_503() {
        let unavailable = ProviderError::Status {
            status: 503,
            message: "model is not trained".to_string(),
        };
        assert!(unavailable.is_unavailable());
        assert_eq!(unavailable.user_message(), "model is not trained");

        let server_error = ProviderError::Status {
            status: 500,
            message: String::new(),
        };
        assert!(!server_error.is_unavailable());
        assert_eq!(server_error.user_message(), "service returned status 500");
    }
}
