use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Duplicate callsign '{callsign}'")]
    DuplicateCallsign { callsign: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Invalid scenario: {reason}")]
    InvalidScenario { reason: String },
}

pub type SimResult<T> = Result<T, SimError>;
