use thiserror::Error;

/// Failure of a single call against the marketplace API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("server unreachable: {0}")]
    Unreachable(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("could not build request: {0}")]
    Request(String),
}

impl ApiError {
    /// Maps a non-2xx status and its body text to an error.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            // Browsers report blocked/aborted requests as status 0
            0 => ApiError::Unreachable(message),
            _ => ApiError::Status { status, message },
        }
    }

    /// Message suitable for showing to the user. `action` completes the
    /// sentence "Failed to ...", e.g. "load services".
    pub fn user_message(&self, action: &str) -> String {
        match self {
            ApiError::Unauthorized => {
                "Your session has expired or the credentials are invalid.".to_string()
            }
            ApiError::Unreachable(_) => {
                "Unable to reach the server. Please check your connection.".to_string()
            }
            _ => format!("Failed to {action}. Please try again later."),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            gloo_net::Error::JsError(e) => ApiError::Unreachable(e.to_string()),
            gloo_net::Error::GlooError(e) => ApiError::Request(e),
        }
    }
}

/// Problems reading or persisting the session token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("token is not made of three dot-separated segments")]
    Malformed,
    #[error("token payload is not valid base64url")]
    Encoding,
    #[error("token claims could not be parsed: {0}")]
    Claims(String),
    #[error("browser storage unavailable: {0}")]
    Storage(String),
}
