//! # Sync Planning
//!
//! The pure half of child-collection reconciliation: given the ids of the
//! currently persisted children and the complete desired set, compute
//! which children to delete, update and create. Both levels of the
//! customization sync (groups under an item, options under a group) run
//! through this one function so the diff rules can never diverge.
//!
//! ## Replace Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Reconcile = Replace-by-Diff                          │
//! │                                                                         │
//! │  existing: [A, B, C]        desired: [{id:A,...}, {..no id..}]         │
//! │       │                          │                                      │
//! │       ▼                          ▼                                      │
//! │  keyed lookup:  Existing(A) ──► update A                               │
//! │                 New(1)      ──► create                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  B, C absent from desired keys ──► delete B, C                         │
//! │                                                                         │
//! │  Placeholder keys (New(seq)) can never collide with a real id, so      │
//! │  every identity-less entry is a creation by construction.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

// =============================================================================
// Sync Key
// =============================================================================

/// Lookup key for one desired entry in a reconciliation pass.
///
/// A tagged union instead of a runtime-generated sentinel: `New(seq)` is
/// collision-free against every real identity and every other
/// placeholder by type, not by luck.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SyncKey {
    /// The entry carries the identity of a (possibly) persisted child.
    Existing(String),
    /// Identity-less entry; `seq` is its position in the desired set.
    New(usize),
}

// =============================================================================
// Sync Plan
// =============================================================================

/// The computed diff for one child collection.
///
/// After applying the plan, the persisted ids are exactly
/// `update ids ∪ freshly created ids`.
#[derive(Debug, Clone)]
pub struct SyncPlan<T> {
    /// Existing ids absent from the desired set. Deleted in bulk.
    pub delete: Vec<String>,

    /// Desired entries whose identity matched an existing child.
    pub update: Vec<(String, T)>,

    /// Desired entries to create: identity-less, or carrying an
    /// identity that matches nothing persisted (the supplied id is
    /// discarded and a fresh one assigned).
    pub create: Vec<T>,
}

impl<T> Default for SyncPlan<T> {
    fn default() -> Self {
        SyncPlan {
            delete: Vec::new(),
            update: Vec::new(),
            create: Vec::new(),
        }
    }
}

impl<T> SyncPlan<T> {
    /// True when the plan changes nothing.
    pub fn is_empty(&self) -> bool {
        self.delete.is_empty() && self.update.is_empty() && self.create.is_empty()
    }
}

// =============================================================================
// Planning
// =============================================================================

/// Computes the replace-by-diff plan for one child collection.
///
/// ## Arguments
/// * `existing_ids` - ids of every currently persisted child
/// * `desired` - the complete desired set as `(optional id, payload)`
///
/// ## Rules
/// - Existing id not present among desired ids → delete
/// - Desired id matching an existing id → update
/// - Desired entry without id, or with an id matching nothing → create
///
/// This is a *replace*, not a merge: the caller must pass the full
/// desired set, and anything it omits is removed.
pub fn plan_sync<T>(existing_ids: &[String], desired: Vec<(Option<String>, T)>) -> SyncPlan<T> {
    let existing: HashSet<&str> = existing_ids.iter().map(String::as_str).collect();

    let keyed: Vec<(SyncKey, T)> = desired
        .into_iter()
        .enumerate()
        .map(|(seq, (id, payload))| {
            let key = match id {
                Some(id) => SyncKey::Existing(id),
                None => SyncKey::New(seq),
            };
            (key, payload)
        })
        .collect();

    // Any existing id absent from the desired keys is deleted; placeholder
    // keys never match a real id, so "new" entries shield nothing.
    let desired_ids: HashSet<&str> = keyed
        .iter()
        .filter_map(|(key, _)| match key {
            SyncKey::Existing(id) => Some(id.as_str()),
            SyncKey::New(_) => None,
        })
        .collect();

    let delete: Vec<String> = existing_ids
        .iter()
        .filter(|id| !desired_ids.contains(id.as_str()))
        .cloned()
        .collect();

    let mut update = Vec::new();
    let mut create = Vec::new();
    for (key, payload) in keyed {
        match key {
            SyncKey::Existing(id) if existing.contains(id.as_str()) => {
                update.push((id, payload));
            }
            // An unknown id is a creation: the reconciler assigns a
            // fresh identity rather than resurrecting the supplied one.
            SyncKey::Existing(_) | SyncKey::New(_) => create.push(payload),
        }
    }

    SyncPlan {
        delete,
        update,
        create,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pure_set_replace() {
        // existing {A, B, C}; desired keeps A, creates one new entry
        let plan = plan_sync(
            &ids(&["A", "B", "C"]),
            vec![(Some("A".to_string()), "keep A"), (None, "new entry")],
        );

        assert_eq!(plan.delete, ids(&["B", "C"]));
        assert_eq!(plan.update, vec![("A".to_string(), "keep A")]);
        assert_eq!(plan.create, vec!["new entry"]);
    }

    #[test]
    fn test_empty_desired_deletes_everything() {
        let plan: SyncPlan<&str> = plan_sync(&ids(&["A", "B"]), vec![]);
        assert_eq!(plan.delete, ids(&["A", "B"]));
        assert!(plan.update.is_empty());
        assert!(plan.create.is_empty());
    }

    #[test]
    fn test_empty_existing_creates_everything() {
        let plan = plan_sync(&[], vec![(None, "x"), (None, "y")]);
        assert!(plan.delete.is_empty());
        assert_eq!(plan.create, vec!["x", "y"]);
    }

    #[test]
    fn test_unknown_id_is_a_creation() {
        let plan = plan_sync(&ids(&["A"]), vec![(Some("Z".to_string()), "stranger")]);
        // A is gone (not in desired), Z is created fresh
        assert_eq!(plan.delete, ids(&["A"]));
        assert!(plan.update.is_empty());
        assert_eq!(plan.create, vec!["stranger"]);
    }

    #[test]
    fn test_identity_preserved_for_matches() {
        let plan = plan_sync(
            &ids(&["A", "B"]),
            vec![
                (Some("B".to_string()), "b"),
                (Some("A".to_string()), "a"),
                (None, "c"),
            ],
        );
        assert!(plan.delete.is_empty());
        assert_eq!(
            plan.update,
            vec![("B".to_string(), "b"), ("A".to_string(), "a")]
        );
        assert_eq!(plan.create, vec!["c"]);
    }

    #[test]
    fn test_noop_plan_is_empty() {
        let plan = plan_sync(&ids(&["A"]), vec![(Some("A".to_string()), "a")]);
        assert!(!plan.is_empty()); // still an update
        let plan: SyncPlan<&str> = plan_sync(&[], vec![]);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_placeholder_keys_are_distinct() {
        assert_ne!(SyncKey::New(0), SyncKey::New(1));
        assert_ne!(SyncKey::New(0), SyncKey::Existing("0".to_string()));
    }
}
