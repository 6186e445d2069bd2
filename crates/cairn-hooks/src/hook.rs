use std::borrow::Cow;
use std::fmt;

use crate::error::Result;

type Action<T> = Box<dyn Fn(&mut T) -> Result<()> + Send + Sync>;

/// One ordered, fallible mutation step.
///
/// Hooks are transient: [`Hooked::hooks`] builds a fresh list on every call,
/// the pipeline runs it, and the list is dropped.
pub struct Hook<T> {
    description: Cow<'static, str>,
    action: Action<T>,
}

impl<T> Hook<T> {
    pub fn new<F>(description: impl Into<Cow<'static, str>>, action: F) -> Self
    where
        F: Fn(&mut T) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            action: Box::new(action),
        }
    }

    /// Human-readable description (e.g. "construct key").
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Apply the hook to `target`.
    pub fn call(&self, target: &mut T) -> Result<()> {
        (self.action)(target)
    }
}

impl<T> fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A type that derives fields through an ordered hook list.
///
/// The order of the returned list is significant: a hook may read what an
/// earlier hook wrote (group/identifier before key, for example). Each type
/// documents its order.
pub trait Hooked: Sized {
    fn hooks(&self) -> Vec<Hook<Self>>;
}
