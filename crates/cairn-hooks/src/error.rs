use std::fmt;

/// Errors raised by a hook while deriving entity fields.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HookError {
    /// A field the hook reads holds a value it cannot use.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// A field the hook reads was never set.
    #[error("missing required field: {0}")]
    Missing(String),

    /// Any other failure, tagged with the hook that produced it.
    #[error("hook '{hook}' failed: {reason}")]
    Failed { hook: String, reason: String },
}

impl HookError {
    /// Create an invalid-input error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing-field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing(field.into())
    }

    /// Create a generic failure for a named hook.
    pub fn failed(hook: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failed {
            hook: hook.into(),
            reason: reason.into(),
        }
    }
}

impl PartialEq for HookError {
    fn eq(&self, other: &Self) -> bool {
        // Compare by display representation for test convenience.
        fmt::format(format_args!("{self}")) == fmt::format(format_args!("{other}"))
    }
}

impl Eq for HookError {}

/// Result alias for hook actions.
pub type Result<T> = std::result::Result<T, HookError>;
