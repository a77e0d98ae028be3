// models/src/errors.rs

pub use thiserror::Error;

/// Error taxonomy for record-store operations. The display strings double
/// as the wire error bodies, so they must stay stable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Patient not found")]
    PatientNotFound,
    #[error("Clinical action not found")]
    ActionNotFound,
}

/// A type alias for a `Result` that returns a `WorkflowError` on failure.
pub type WorkflowResult<T> = Result<T, WorkflowError>;
