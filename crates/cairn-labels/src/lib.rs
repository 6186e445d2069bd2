//! Label registry for Cairn.
//!
//! Labels classify entities (`Asset`, `Risk`, `HAS_VULNERABILITY`, ...). The
//! registry maps the lowercase form of every label to the one canonical
//! spelling declared for it, so lookups are case-insensitive while the
//! original casing is preserved.
//!
//! Two call sites declaring the same label with different casing is a build
//! defect. [`LabelRegistry::register`] panics on it so the clash surfaces at
//! process start; [`LabelRegistry::try_register`] reports it instead.
//!
//! # Quick Start
//!
//! ```rust
//! use cairn_labels::LabelRegistry;
//!
//! let labels = LabelRegistry::new();
//! assert_eq!(labels.register("Asset"), "Asset");
//! assert_eq!(labels.get("ASSET").as_deref(), Some("Asset"));
//! assert!(labels.try_register("asset").is_err());
//! ```

pub mod error;
pub mod registry;

pub use error::{LabelError, Result};
pub use registry::{get, global, list, must_register, register, LabelRegistry};
