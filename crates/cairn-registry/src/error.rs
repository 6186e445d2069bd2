use cairn_hooks::HookError;
use cairn_merge::ReconcileError;

/// Errors from the type registry and polymorphic decoding.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Two different concrete types claimed the same name.
    #[error("type name {name:?} already registered to {existing}, cannot register {attempted}")]
    Conflict {
        name: String,
        existing: &'static str,
        attempted: &'static str,
    },

    /// No type is registered under this name.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// A type reports a label that is missing from the label registry.
    #[error("type {type_name} reports unregistered label {label:?}")]
    UnregisteredLabel { type_name: String, label: String },

    /// Encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Hook(#[from] HookError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
