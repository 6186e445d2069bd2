//! Serialization-boundary treatment of labels.
//!
//! Graph stores commonly reject label characters outside `[A-Za-z0-9_]`.
//! Sanitization happens only when a label leaves the process; the canonical
//! in-memory label is never rewritten.

use crate::config::CoreConfig;

/// Replace every character a persistence layer may reject with `_`.
///
/// # Examples
///
/// ```
/// use cairn_types::sanitize_label;
///
/// assert_eq!(sanitize_label("AWS::S3::Bucket"), "AWS__S3__Bucket");
/// assert_eq!(sanitize_label("Asset"), "Asset");
/// ```
pub fn sanitize_label(label: &str) -> String {
    sanitize_label_with(label, &CoreConfig::default())
}

/// [`sanitize_label`] with a configured replacement character.
pub fn sanitize_label_with(label: &str, config: &CoreConfig) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                config.label_replacement
            }
        })
        .collect()
}
