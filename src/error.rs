//! Error taxonomy for the predict and stats operations.
//!
//! Validation failures map to a client-error class, everything else to an
//! internal-error class. Internal causes are logged, never echoed to callers.

use thiserror::Error;

/// Whether a failure was caused by the caller's input or by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Client,
    Internal,
}

impl ErrorClass {
    /// HTTP-style status code for this class.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorClass::Client => 400,
            ErrorClass::Internal => 500,
        }
    }
}

const INTERNAL_MESSAGE: &str = "internal error";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Invalid city: {0}")]
    UnknownCity(String),

    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(i32),

    #[error("No data for {city} in month {month}")]
    NoHistoricalData { city: String, month: u32 },
}

#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Year {year} is outside the supported range {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("Model returned a non-finite value: {0}")]
    NonFiniteOutput(f64),

    #[error("Model invocation failed: {0:#}")]
    Model(anyhow::Error),
}

impl PredictError {
    pub fn class(&self) -> ErrorClass {
        match self {
            PredictError::Lookup(_) | PredictError::YearOutOfRange { .. } => ErrorClass::Client,
            PredictError::NonFiniteOutput(_) | PredictError::Model(_) => ErrorClass::Internal,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.class().status_code()
    }

    /// Message suitable for returning to the caller.
    pub fn public_message(&self) -> String {
        match self.class() {
            ErrorClass::Client => self.to_string(),
            ErrorClass::Internal => INTERNAL_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("No usable measurements remain after cleaning the dataset")]
    EmptyDataset,

    #[error("Failed to load dataset: {0:#}")]
    Load(anyhow::Error),
}

impl StatsError {
    /// Every stats failure is a service-side problem; the operation takes no input.
    pub fn class(&self) -> ErrorClass {
        ErrorClass::Internal
    }

    pub fn status_code(&self) -> u16 {
        self.class().status_code()
    }

    pub fn public_message(&self) -> String {
        match self {
            StatsError::EmptyDataset => self.to_string(),
            StatsError::Load(_) => INTERNAL_MESSAGE.to_string(),
        }
    }
}
