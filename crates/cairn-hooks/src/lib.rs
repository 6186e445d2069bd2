//! Hook pipeline for Cairn entities.
//!
//! After an entity is constructed (or decoded) and defaulted, its hooks run
//! once, in order, to derive everything that depends on other fields: the
//! group/identifier pair, the key, and the labels. The pipeline is
//! **fail-fast**: the first hook that fails stops the run and its error is
//! returned to the caller, who must discard the entity.
//!
//! Hooks are the only place keys are computed. Every hook must be a pure
//! function of fields already set when it runs, so re-running the pipeline
//! on an unchanged entity yields the same key and labels.
//!
//! # Quick Start
//!
//! ```rust
//! use cairn_hooks::{run_hooks, Hook, HookError, Hooked};
//!
//! #[derive(Default)]
//! struct Cache {
//!     parts: Vec<String>,
//!     key: String,
//! }
//!
//! impl Hooked for Cache {
//!     fn hooks(&self) -> Vec<Hook<Self>> {
//!         vec![Hook::new("build key", |c: &mut Cache| {
//!             if c.parts.is_empty() {
//!                 return Err(HookError::invalid("parts", "at least one part is required"));
//!             }
//!             c.key = format!("#cache#{}", c.parts.join("#"));
//!             Ok(())
//!         })]
//!     }
//! }
//!
//! let mut cache = Cache { parts: vec!["a".into(), "b".into()], ..Cache::default() };
//! run_hooks(&mut cache).unwrap();
//! assert_eq!(cache.key, "#cache#a#b");
//! ```

pub mod error;
pub mod hook;
pub mod pipeline;

pub use error::{HookError, Result};
pub use hook::{Hook, Hooked};
pub use pipeline::{run_hooks, HookRecord, PipelineReport};
