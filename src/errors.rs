pub type AppResult<T> = Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("unknown resource: {0}")]
    UnknownResource(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid permission set at `{path}`: {message}")]
    InvalidPermissionSet { path: String, message: String },
    #[error("io error")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn unknown_resource(value: impl Into<String>) -> Self {
        Self::UnknownResource(value.into())
    }

    pub fn unknown_action(value: impl Into<String>) -> Self {
        Self::UnknownAction(value.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Short machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Forbidden(_) => "forbidden",
            AppError::UnknownResource(_) => "unknown_resource",
            AppError::UnknownAction(_) => "unknown_action",
            AppError::BadRequest(_) => "bad_request",
            AppError::Configuration(_) => "configuration",
            AppError::InvalidPermissionSet { .. } => "invalid_permission_set",
            AppError::Io(_) => "io",
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for AppError {
    fn from(value: serde_path_to_error::Error<serde_json::Error>) -> Self {
        Self::InvalidPermissionSet {
            path: value.path().to_string(),
            message: value.into_inner().to_string(),
        }
    }
}
