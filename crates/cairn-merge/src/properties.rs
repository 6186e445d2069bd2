//! Key-by-key merge of property bags.

use cairn_types::Properties;

/// Every key in `update` overwrites the same key in `existing`; keys absent
/// from `update` are preserved. A missing destination bag is allocated
/// before the first write, and an absent or empty update allocates nothing.
pub fn merge_properties(existing: &mut Option<Properties>, update: &Option<Properties>) {
    let Some(incoming) = update.as_ref().filter(|bag| !bag.is_empty()) else {
        return;
    };
    let destination = existing.get_or_insert_with(Properties::new);
    for (key, value) in incoming {
        destination.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(pairs: &[(&str, &str)]) -> Option<Properties> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn overwrites_and_preserves() {
        let mut existing = bag(&[("region", "us-east-1"), ("owner", "alice")]);
        merge_properties(&mut existing, &bag(&[("owner", "bob"), ("env", "prod")]));
        assert_eq!(
            existing,
            bag(&[("region", "us-east-1"), ("owner", "bob"), ("env", "prod")])
        );
    }

    #[test]
    fn allocates_missing_destination() {
        let mut existing = None;
        merge_properties(&mut existing, &bag(&[("k", "v")]));
        assert_eq!(existing, bag(&[("k", "v")]));
    }

    #[test]
    fn absent_update_is_noop() {
        let mut existing = None;
        merge_properties(&mut existing, &None);
        assert_eq!(existing, None);
        merge_properties(&mut existing, &bag(&[]));
        assert_eq!(existing, None);
    }
}
