use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BsmError {
    #[error(
        "Environment variable '{key}' is not set. \
         Make sure to set it in your CI environment to store the AWS account ID."
    )]
    MissingVariable { key: String },

    #[error("Invalid AWS account ID '{value}' for environment '{env_name}'. {reason}")]
    InvalidFormat {
        value: String,
        env_name: String,
        reason: String,
    },

    #[error("Unknown environment '{env_name}': no entry in the {mapping} mapping")]
    UnknownEnvironment { env_name: String, mapping: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl From<serde_json::Error> for BsmError {
    fn from(err: serde_json::Error) -> Self {
        BsmError::Settings(err.to_string())
    }
}

pub type BsmResult<T> = Result<T, BsmError>;
