//! Set-valued field rules.
//!
//! `None` means the observation has no opinion about the set; `Some` of an
//! empty set is an explicit statement that the set is empty. Merge honours
//! that difference, Visit only ever grows a set.

use cairn_types::{OriginationData, StringSet};

use crate::{Merge, Visit};

/// Replacement rule: any set in the update, empty included, replaces the
/// existing one. An absent update set leaves the existing one untouched.
pub fn merge_set(existing: &mut Option<StringSet>, update: &Option<StringSet>) {
    if let Some(members) = update {
        *existing = Some(members.clone());
    }
}

/// Union rule: the result is the deduplicated union of both sides. An
/// absent or empty update never clears the existing set.
pub fn visit_set(existing: &mut Option<StringSet>, update: &Option<StringSet>) {
    let Some(incoming) = update else {
        return;
    };
    match existing {
        Some(members) => members.extend(incoming.iter().cloned()),
        None => *existing = Some(incoming.clone()),
    }
}

impl Merge for OriginationData {
    fn merge(&mut self, update: &Self) {
        merge_set(&mut self.capability, &update.capability);
        merge_set(&mut self.attack_surface, &update.attack_surface);
        merge_set(&mut self.origins, &update.origins);
    }
}

impl Visit for OriginationData {
    fn visit(&mut self, update: &Self) {
        visit_set(&mut self.capability, &update.capability);
        visit_set(&mut self.attack_surface, &update.attack_surface);
        visit_set(&mut self.origins, &update.origins);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_types::string_set;
    use proptest::prelude::*;

    fn tags(items: &[&str]) -> Option<StringSet> {
        Some(string_set(items.iter().copied()))
    }

    #[test]
    fn merge_with_empty_set_clears() {
        let mut existing = tags(&["a", "b"]);
        merge_set(&mut existing, &tags(&[]));
        assert_eq!(existing, tags(&[]));
    }

    #[test]
    fn merge_with_absent_set_preserves() {
        let mut existing = tags(&["a", "b"]);
        merge_set(&mut existing, &None);
        assert_eq!(existing, tags(&["a", "b"]));
    }

    #[test]
    fn merge_replaces_rather_than_unions() {
        let mut existing = tags(&["a", "b"]);
        merge_set(&mut existing, &tags(&["c"]));
        assert_eq!(existing, tags(&["c"]));
    }

    #[test]
    fn visit_with_empty_set_never_clears() {
        let mut existing = tags(&["a", "b"]);
        visit_set(&mut existing, &tags(&[]));
        assert_eq!(existing, tags(&["a", "b"]));
    }

    #[test]
    fn visit_unions_and_deduplicates() {
        let mut existing = tags(&["a", "b"]);
        visit_set(&mut existing, &tags(&["b", "c"]));
        assert_eq!(existing, tags(&["a", "b", "c"]));
    }

    #[test]
    fn visit_allocates_missing_set() {
        let mut existing = None;
        visit_set(&mut existing, &tags(&["x"]));
        assert_eq!(existing, tags(&["x"]));
    }

    #[test]
    fn origination_members_reconcile_independently() {
        let mut existing = OriginationData {
            capability: tags(&["nuclei"]),
            attack_surface: tags(&["external"]),
            origins: None,
        };
        let update = OriginationData {
            capability: tags(&["whois"]),
            attack_surface: None,
            origins: tags(&["cloud"]),
        };

        let mut visited = existing.clone();
        visited.visit(&update);
        assert_eq!(visited.capability, tags(&["nuclei", "whois"]));
        assert_eq!(visited.attack_surface, tags(&["external"]));
        assert_eq!(visited.origins, tags(&["cloud"]));

        existing.merge(&update);
        assert_eq!(existing.capability, tags(&["whois"]));
        assert_eq!(existing.attack_surface, tags(&["external"]));
        assert_eq!(existing.origins, tags(&["cloud"]));
    }

    fn arb_set() -> impl Strategy<Value = Option<StringSet>> {
        proptest::option::of(proptest::collection::btree_set("[a-e]{1,2}", 0..6))
    }

    proptest! {
        #[test]
        fn visit_is_union(a in arb_set(), b in arb_set()) {
            let mut result = a.clone();
            visit_set(&mut result, &b);
            let expected: StringSet = a.iter().chain(b.iter()).flatten().cloned().collect();
            prop_assert_eq!(result.unwrap_or_default(), expected);
        }

        #[test]
        fn visit_is_commutative(a in arb_set(), b in arb_set()) {
            let mut ab = a.clone();
            visit_set(&mut ab, &b);
            let mut ba = b.clone();
            visit_set(&mut ba, &a);
            prop_assert_eq!(ab, ba);
        }

        #[test]
        fn visit_is_idempotent(a in arb_set(), b in arb_set()) {
            let mut once = a.clone();
            visit_set(&mut once, &b);
            let mut twice = once.clone();
            visit_set(&mut twice, &b);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn merge_with_absent_is_identity(a in arb_set()) {
            let mut result = a.clone();
            merge_set(&mut result, &None);
            prop_assert_eq!(result, a);
        }
    }
}
