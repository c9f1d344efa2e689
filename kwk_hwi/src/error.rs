use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Device Error: {0}")]
    Device(ErrorDetails),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("No KeepKey device found")]
    NoDeviceFound,

    #[error("Invalid bip32 path: {0}")]
    InvalidPath(String),

    #[error("{0}")]
    Generic(String),
}

/// Error report coming from the device firmware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: i64,
    pub message: String,
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "code: {} - message: {}", self.code, self.message)
    }
}
