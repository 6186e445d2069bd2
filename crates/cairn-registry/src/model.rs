use std::any::Any;
use std::fmt;

use cairn_hooks::{run_hooks, HookError, Hooked, PipelineReport};
use cairn_merge::{Merge, ReconcileError, Visit};
use cairn_types::Key;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A concrete, statically-typed entity.
///
/// `Default` is the zero value the registry constructs; [`Entity::defaulted`]
/// fills in baseline values for freshly observed instances; the hook list
/// derives the key and labels; `Merge` and `Visit` reconcile observations.
pub trait Entity:
    Hooked
    + Merge
    + Visit
    + Clone
    + Default
    + Serialize
    + DeserializeOwned
    + fmt::Debug
    + Send
    + Sync
    + 'static
{
    /// Lowercase discriminator, also the key kind.
    const TYPE_NAME: &'static str;

    /// Every label an instance of this type may report.
    const LABELS: &'static [&'static str];

    fn key(&self) -> &Key;

    /// Labels derived by the hook pipeline.
    fn labels(&self) -> &[String];

    /// Returns `true` if the key and required fields have the expected shape.
    fn valid(&self) -> bool;

    /// Set baseline values before the hooks run.
    fn defaulted(&mut self) {}
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Object-safe view of any [`Entity`], used where only a type name is known.
pub trait Model: Send + Sync + fmt::Debug {
    fn type_name(&self) -> &'static str;
    fn entity_key(&self) -> &Key;
    fn entity_labels(&self) -> &[String];
    fn declared_labels(&self) -> &'static [&'static str];
    fn is_valid(&self) -> bool;
    fn apply_defaults(&mut self);
    fn run_hooks(&mut self) -> std::result::Result<PipelineReport, HookError>;

    /// Merge `update` into `self`. A different concrete type is rejected and
    /// `self` is left untouched.
    fn merge_dyn(&mut self, update: &dyn Model) -> std::result::Result<(), ReconcileError>;

    /// Visit `update` into `self`. A different concrete type is rejected and
    /// `self` is left untouched.
    fn visit_dyn(&mut self, update: &dyn Model) -> std::result::Result<(), ReconcileError>;

    fn clone_model(&self) -> Box<dyn Model>;
    fn as_any(&self) -> &dyn Any;
    fn to_json(&self) -> Result<String>;

    /// Replace `self` with the instance decoded from `json`.
    fn load_json(&mut self, json: &str) -> Result<()>;
}

impl<T: Entity> Model for T {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn entity_key(&self) -> &Key {
        Entity::key(self)
    }

    fn entity_labels(&self) -> &[String] {
        Entity::labels(self)
    }

    fn declared_labels(&self) -> &'static [&'static str] {
        T::LABELS
    }

    fn is_valid(&self) -> bool {
        Entity::valid(self)
    }

    fn apply_defaults(&mut self) {
        Entity::defaulted(self);
    }

    fn run_hooks(&mut self) -> std::result::Result<PipelineReport, HookError> {
        run_hooks(self)
    }

    fn merge_dyn(&mut self, update: &dyn Model) -> std::result::Result<(), ReconcileError> {
        let update = downcast_update::<T>(update)?;
        self.merge(update);
        Ok(())
    }

    fn visit_dyn(&mut self, update: &dyn Model) -> std::result::Result<(), ReconcileError> {
        let update = downcast_update::<T>(update)?;
        self.visit(update);
        Ok(())
    }

    fn clone_model(&self) -> Box<dyn Model> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn load_json(&mut self, json: &str) -> Result<()> {
        *self = serde_json::from_str(json)?;
        Ok(())
    }
}

fn downcast_update<T: Entity>(update: &dyn Model) -> std::result::Result<&T, ReconcileError> {
    update
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| ReconcileError::mismatch(T::TYPE_NAME, update.type_name()))
}

impl dyn Model {
    /// Borrow the concrete entity behind this model.
    pub fn downcast_ref<T: Entity>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl Clone for Box<dyn Model> {
    fn clone(&self) -> Self {
        self.clone_model()
    }
}
