use thiserror::Error;

/// Failure talking to the voice provider, as seen on the wire.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Vapi API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to reach Vapi API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse Vapi API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid Vapi API URL: {0}")]
    InvalidUrl(String),
}

impl ProviderError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            ProviderError::Transport(err) => err.status().map(|s| s.as_u16()),
            ProviderError::Decode(_) | ProviderError::InvalidUrl(_) => None,
        }
    }
}

/// Which gateway operation produced an error. Each one recognizes different provider statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
}

/// Provider-independent failure categories handed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("authentication failed")]
    AuthFailure,
    #[error("invalid assistant configuration")]
    InvalidConfig,
    #[error("assistant not found")]
    NotFound,
    #[error("unknown provider failure")]
    Unknown,
}

pub const AUTH_FAILURE_MESSAGE: &str = "Authentication failed. Please check your VAPI credentials.";
pub const INVALID_CONFIG_MESSAGE: &str =
    "Invalid request. Please check your assistant configuration.";
pub const NOT_FOUND_MESSAGE: &str = "Assistant not found.";

impl GatewayError {
    pub fn classify(err: &ProviderError, operation: Operation) -> Self {
        match (operation, err.status_code()) {
            (_, Some(401)) => GatewayError::AuthFailure,
            (Operation::Create, Some(400)) => GatewayError::InvalidConfig,
            (Operation::Update, Some(404)) => GatewayError::NotFound,
            _ => GatewayError::Unknown,
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            GatewayError::AuthFailure => 401,
            GatewayError::InvalidConfig => 400,
            GatewayError::NotFound => 404,
            GatewayError::Unknown => 500,
        }
    }

    /// User-facing message for this failure.
    pub fn message(&self, operation: Operation) -> &'static str {
        match self {
            GatewayError::AuthFailure => AUTH_FAILURE_MESSAGE,
            GatewayError::InvalidConfig => INVALID_CONFIG_MESSAGE,
            GatewayError::NotFound => NOT_FOUND_MESSAGE,
            GatewayError::Unknown => match operation {
                Operation::List => "Failed to fetch agents. Please try again.",
                Operation::Create => "Failed to create assistant. Please try again.",
                Operation::Update => "Failed to update assistant. Please try again.",
            },
        }
    }
}
