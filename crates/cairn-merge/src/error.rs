//! Error types for reconciliation.

/// Errors that can occur when reconciling two entities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    /// The update is not the same concrete type as the existing record.
    #[error("cannot reconcile {actual} into {expected}")]
    TypeMismatch { expected: String, actual: String },
}

impl ReconcileError {
    pub fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Convenience alias for reconciliation results.
pub type Result<T> = std::result::Result<T, ReconcileError>;
