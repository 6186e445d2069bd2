/// Errors from label registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    /// A label was declared with a spelling that clashes with an existing
    /// canonical form.
    #[error("label {attempted:?} conflicts with registered label {existing:?}")]
    Conflict { existing: String, attempted: String },
}

/// Result alias for label operations.
pub type Result<T> = std::result::Result<T, LabelError>;
