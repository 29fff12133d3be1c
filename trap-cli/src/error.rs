use {
    basefee_trap::{DecodeError, TrapError},
    thiserror::Error,
};

/// Errors surfaced by the command-line driver.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Bad parameter: {0}")]
    BadParameter(String),

    #[error(transparent)]
    Trap(#[from] TrapError),

    #[error("Invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("RPC error: {0}")]
    Rpc(String),
}

impl From<DecodeError> for CliError {
    fn from(err: DecodeError) -> Self {
        CliError::Trap(TrapError::Decode(err))
    }
}

pub type ProcessResult = Result<String, CliError>;
