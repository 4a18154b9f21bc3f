use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid calibration input: {reason}")]
    InvalidCalibrationInput { reason: String },

    #[error("Degenerate trajectory input: {reason}")]
    DegenerateTrajectoryInput { reason: String },

    #[error("Unknown event shape: {0}")]
    UnknownEventShape(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    pub fn invalid_calibration(reason: impl Into<String>) -> Self {
        CoreError::InvalidCalibrationInput { reason: reason.into() }
    }

    pub fn degenerate_trajectory(reason: impl Into<String>) -> Self {
        CoreError::DegenerateTrajectoryInput { reason: reason.into() }
    }

    /// Whether the caller can substitute a safe default and keep running.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoreError::InvalidCalibrationInput { .. } => true,
            CoreError::DegenerateTrajectoryInput { .. } => true,
            CoreError::UnknownEventShape(_) => true,
            CoreError::Config(_) => false,
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
