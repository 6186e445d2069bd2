//! Foundation types for Cairn, the entity reconciliation core.
//!
//! This crate holds the vocabulary every other Cairn crate speaks: the
//! delimiter-separated [`Key`] that identifies an entity, the prefix-matched
//! [`Status`] code, the [`Ttl`] expiry sentinel, the audit [`History`] log,
//! and the set-valued [`OriginationData`] triple.
//!
//! # Key Types
//!
//! - [`Key`]: Durable `#`-delimited identity, assembled by [`KeyBuilder`]
//! - [`Status`]: Lifecycle code with optional refinement (`"AH"` is `Active`)
//! - [`Ttl`]: Absolute expiry in epoch seconds; zero means "no opinion"
//! - [`Lifecycle`]: Status, TTL, and history bundled for reconciliation
//! - [`CoreConfig`]: Tunables for key assembly and label sanitization

pub mod config;
pub mod error;
pub mod history;
pub mod key;
pub mod label;
pub mod lifecycle;
pub mod origination;
pub mod status;
pub mod time;
pub mod ttl;

pub use config::CoreConfig;
pub use error::TypeError;
pub use history::{History, HistoryRecord};
pub use key::{Key, KeyBuilder, KEY_DELIMITER, MAX_KEY_LEN};
pub use label::{sanitize_label, sanitize_label_with};
pub use lifecycle::Lifecycle;
pub use origination::{string_set, OriginationData, Properties, StringSet};
pub use status::Status;
pub use ttl::Ttl;
