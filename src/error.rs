use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Short text for the login and registration forms.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "Network error".to_string(),
            ApiError::Status { status: 400, body } if body.contains("LOGIN_BAD_CREDENTIALS") => {
                "Wrong email or password".to_string()
            }
            ApiError::Status { status: 400, body }
                if body.contains("REGISTER_USER_ALREADY_EXISTS") =>
            {
                "A user with this email already exists".to_string()
            }
            ApiError::Status { status: 422, .. } => "Please check the entered data".to_string(),
            ApiError::Status { status, .. } if *status >= 500 => {
                "Server error, try again later".to_string()
            }
            ApiError::Status { .. } => "Request was rejected".to_string(),
            ApiError::Decode(_) => "Unexpected server response".to_string(),
            ApiError::Encode(_) => "Could not send the request".to_string(),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Transport(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,

    #[error("storage write failed: {0}")]
    Write(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_credentials_get_a_friendly_message() {
        let err = ApiError::Status {
            status: 400,
            body: r#"{"detail":"LOGIN_BAD_CREDENTIALS"}"#.to_string(),
        };
        assert_eq!(err.user_message(), "Wrong email or password");
    }

    #[test]
    fn other_client_errors_are_rejections() {
        let err = ApiError::Status {
            status: 401,
            body: "Unauthorized".to_string(),
        };
        assert_eq!(err.user_message(), "Request was rejected");
    }

    #[test]
    fn server_errors_share_one_message() {
        let err = ApiError::Status {
            status: 503,
            body: String::new(),
        };
        assert_eq!(err.user_message(), "Server error, try again later");
    }
}
