//! Polymorphic wrapper for entities whose type is only known at runtime.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::model::Model;
use crate::registry::TypeRegistry;

/// A type name paired with the JSON encoding of an instance of that type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub type_name: String,
    pub payload: String,
}

impl Envelope {
    /// Encode `model` together with its type name.
    pub fn wrap(model: &dyn Model) -> Result<Self> {
        Ok(Self {
            type_name: model.type_name().to_string(),
            payload: model.to_json()?,
        })
    }

    /// Decode the payload into a fresh instance of the named type and re-run
    /// its hooks so derived fields are recomputed rather than trusted.
    pub fn open(&self, types: &TypeRegistry) -> Result<Box<dyn Model>> {
        let mut model = types
            .make_type(&self.type_name)
            .ok_or_else(|| RegistryError::UnknownType(self.type_name.clone()))?;
        model.load_json(&self.payload)?;
        let report = model.run_hooks()?;
        debug!(type_name = %self.type_name, hooks = report.len(), "opened envelope");
        Ok(model)
    }
}
