//! Error types for Civic Grid

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CivicError {
    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Reference data errors
    #[error("Invalid reference data: {reason}")]
    InvalidReferenceData { reason: String },

    // Complaint errors
    #[error("Invalid complaint field {field}: {reason}")]
    InvalidComplaint { field: String, reason: String },

    #[error("Complaint not found: {id}")]
    ComplaintNotFound { id: u64 },

    // Store errors
    #[error("Record store error: {0}")]
    Store(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CivicError {
    pub(crate) fn invalid_reference(reason: impl Into<String>) -> Self {
        CivicError::InvalidReferenceData { reason: reason.into() }
    }

    pub fn invalid_complaint(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CivicError::InvalidComplaint { field: field.into(), reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, CivicError>;
