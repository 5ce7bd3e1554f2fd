//! The structural differ.

use std::collections::HashSet;

use vigil_types::{FieldValue, Record, Snapshot};

use crate::change::{DiffSet, FieldChange};

/// Field names excluded from comparison by default.
///
/// These change on nearly every gateway delivery without carrying any
/// semantic meaning for an audit trail.
pub const DEFAULT_VOLATILE_FIELDS: &[&str] = &["edited_timestamp", "last_message_id", "member_count"];

/// Computes structural diffs between record snapshots.
#[derive(Debug, Clone)]
pub struct Differ {
    volatile: HashSet<String>,
}

impl Default for Differ {
    fn default() -> Self {
        Self::new()
    }
}

impl Differ {
    /// Creates a differ with [`DEFAULT_VOLATILE_FIELDS`].
    pub fn new() -> Self {
        Self::with_volatile(DEFAULT_VOLATILE_FIELDS.iter().map(|s| s.to_string()))
    }

    /// Creates a differ with an explicit volatile field set.
    pub fn with_volatile(fields: impl IntoIterator<Item = String>) -> Self {
        Self {
            volatile: fields.into_iter().collect(),
        }
    }

    /// Compares `new` against an optional prior snapshot.
    ///
    /// With no prior snapshot the result is empty: the caller is responsible
    /// for treating "no diff available" as a creation/literal event rather
    /// than "nothing changed".
    ///
    /// For a [`Snapshot::Partial`] old side, a field missing from the old
    /// record is *unknown*, not absent, so no `Added` entries are emitted.
    pub fn diff(&self, new: &Record, old: Option<&Snapshot>) -> DiffSet {
        let mut set = DiffSet::default();
        let Some(old) = old else {
            return set;
        };
        self.diff_records(new, old.record(), old.is_partial(), "", &mut set);
        set
    }

    fn diff_records(
        &self,
        new: &Record,
        old: &Record,
        old_partial: bool,
        prefix: &str,
        out: &mut DiffSet,
    ) {
        // Discovery order: the new record's fields first...
        for (name, new_value) in new.fields() {
            if self.volatile.contains(name) {
                continue;
            }
            let path = join_path(prefix, name);
            match old.get(name) {
                Some(old_value) => {
                    self.diff_values(path, new_value, old_value, old_partial, out);
                }
                None if old_partial => {}
                None => out.push(path, FieldChange::Added(new_value.clone())),
            }
        }

        // ...then fields present only in the old record.
        for (name, old_value) in old.fields() {
            if self.volatile.contains(name) || new.contains(name) {
                continue;
            }
            out.push(join_path(prefix, name), FieldChange::Removed(old_value.clone()));
        }
    }

    fn diff_values(
        &self,
        path: String,
        new_value: &FieldValue,
        old_value: &FieldValue,
        old_partial: bool,
        out: &mut DiffSet,
    ) {
        match (new_value, old_value) {
            (FieldValue::List(new_items), FieldValue::List(old_items)) => {
                let added = set_difference(new_items, old_items);
                let removed = set_difference(old_items, new_items);
                if !added.is_empty() || !removed.is_empty() {
                    out.push(path, FieldChange::ListDelta { added, removed });
                }
            }
            (FieldValue::Record(new_nested), FieldValue::Record(old_nested)) => {
                // Empty nested diffs produce no entries, so they are
                // suppressed rather than emitted as empty.
                self.diff_records(new_nested, old_nested, old_partial, &path, out);
            }
            _ if new_value == old_value => {}
            _ => out.push(
                path,
                FieldChange::Modified {
                    old: old_value.clone(),
                    new: new_value.clone(),
                },
            ),
        }
    }
}

/// Items of `a` not present in `b`, deduplicated, in `a`'s order.
fn set_difference(a: &[FieldValue], b: &[FieldValue]) -> Vec<FieldValue> {
    let mut out: Vec<FieldValue> = Vec::new();
    for value in a {
        if !b.contains(value) && !out.contains(value) {
            out.push(value.clone());
        }
    }
    out
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_types::Scalar;

    fn role(name: &str, color: i64) -> Record {
        Record::new()
            .with("name", FieldValue::text(name))
            .with("color", FieldValue::int(color))
    }

    #[test]
    fn no_prior_snapshot_yields_empty_diff() {
        let differ = Differ::new();
        let diff = differ.diff(&role("Mod", 1), None);
        assert!(diff.is_empty());
    }

    #[test]
    fn identical_records_yield_empty_diff() {
        let differ = Differ::new();
        let record = role("Mod", 1);
        let diff = differ.diff(&record, Some(&Snapshot::Full(record.clone())));
        assert!(diff.is_empty());
    }

    #[test]
    fn scalar_change_is_modified() {
        let differ = Differ::new();
        let diff = differ.diff(&role("Mod", 1), Some(&Snapshot::Full(role("Mod", 2))));

        assert_eq!(diff.len(), 1);
        assert_eq!(
            diff.get("color"),
            Some(&FieldChange::Modified {
                old: FieldValue::int(2),
                new: FieldValue::int(1),
            })
        );
    }

    #[test]
    fn added_and_removed_fields() {
        let differ = Differ::new();
        let new = Record::new()
            .with("name", FieldValue::text("general"))
            .with("topic", FieldValue::text("chatter"));
        let old = Record::new()
            .with("name", FieldValue::text("general"))
            .with("nsfw", FieldValue::bool(false));

        let diff = differ.diff(&new, Some(&Snapshot::Full(old)));
        assert_eq!(diff.len(), 2);
        assert_eq!(
            diff.get("topic"),
            Some(&FieldChange::Added(FieldValue::text("chatter")))
        );
        assert_eq!(
            diff.get("nsfw"),
            Some(&FieldChange::Removed(FieldValue::bool(false)))
        );
    }

    #[test]
    fn discovery_order_is_new_fields_then_old_only_fields() {
        let differ = Differ::new();
        let new = Record::new()
            .with("b", FieldValue::int(1))
            .with("a", FieldValue::int(2));
        let old = Record::new()
            .with("z", FieldValue::int(9))
            .with("b", FieldValue::int(0));

        let diff = differ.diff(&new, Some(&Snapshot::Full(old)));
        let paths: Vec<&str> = diff.iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["b", "a", "z"]);
    }

    #[test]
    fn nested_records_recurse_with_dotted_paths() {
        let differ = Differ::new();
        let new = Record::new().with(
            "overwrites",
            FieldValue::Record(Record::new().with("allow", FieldValue::int(8))),
        );
        let old = Record::new().with(
            "overwrites",
            FieldValue::Record(Record::new().with("allow", FieldValue::int(0))),
        );

        let diff = differ.diff(&new, Some(&Snapshot::Full(old)));
        assert_eq!(diff.len(), 1);
        assert!(diff.get("overwrites.allow").is_some());
    }

    #[test]
    fn equal_nested_records_emit_nothing() {
        let differ = Differ::new();
        let nested = Record::new().with("allow", FieldValue::int(8));
        let new = Record::new()
            .with("overwrites", FieldValue::Record(nested.clone()))
            .with("name", FieldValue::text("general"));
        let old = Record::new()
            .with("overwrites", FieldValue::Record(nested))
            .with("name", FieldValue::text("lobby"));

        let diff = differ.diff(&new, Some(&Snapshot::Full(old)));
        assert_eq!(diff.len(), 1);
        assert!(diff.get("name").is_some());
    }

    #[test]
    fn list_delta_is_order_insensitive() {
        let differ = Differ::new();
        let new = Record::new().with(
            "roles",
            FieldValue::List(vec![FieldValue::text("b"), FieldValue::text("c")]),
        );
        let old = Record::new().with(
            "roles",
            FieldValue::List(vec![FieldValue::text("c"), FieldValue::text("a")]),
        );

        let diff = differ.diff(&new, Some(&Snapshot::Full(old)));
        assert_eq!(
            diff.get("roles"),
            Some(&FieldChange::ListDelta {
                added: vec![FieldValue::text("b")],
                removed: vec![FieldValue::text("a")],
            })
        );
    }

    #[test]
    fn equal_lists_in_different_order_emit_nothing() {
        let differ = Differ::new();
        let new = Record::new().with(
            "roles",
            FieldValue::List(vec![FieldValue::text("a"), FieldValue::text("b")]),
        );
        let old = Record::new().with(
            "roles",
            FieldValue::List(vec![FieldValue::text("b"), FieldValue::text("a")]),
        );

        let diff = differ.diff(&new, Some(&Snapshot::Full(old)));
        assert!(diff.is_empty());
    }

    #[test]
    fn kind_mismatch_is_modified() {
        let differ = Differ::new();
        let new = Record::new().with("topic", FieldValue::text("rules"));
        let old = Record::new().with("topic", FieldValue::Null);

        let diff = differ.diff(&new, Some(&Snapshot::Full(old)));
        assert_eq!(
            diff.get("topic"),
            Some(&FieldChange::Modified {
                old: FieldValue::Null,
                new: FieldValue::text("rules"),
            })
        );
    }

    #[test]
    fn volatile_fields_never_appear() {
        let differ = Differ::new();
        let new = Record::new()
            .with("content", FieldValue::text("hi"))
            .with("edited_timestamp", FieldValue::text("2026-01-01T00:00:00Z"));
        let old = Record::new()
            .with("content", FieldValue::text("hi"))
            .with("edited_timestamp", FieldValue::text("2025-12-31T23:59:59Z"));

        let diff = differ.diff(&new, Some(&Snapshot::Full(old)));
        assert!(diff.is_empty());
    }

    #[test]
    fn volatile_fields_are_filtered_inside_nested_records() {
        let differ = Differ::new();
        let new = Record::new().with(
            "channel",
            FieldValue::Record(Record::new().with("last_message_id", FieldValue::int(2))),
        );
        let old = Record::new().with(
            "channel",
            FieldValue::Record(Record::new().with("last_message_id", FieldValue::int(1))),
        );

        let diff = differ.diff(&new, Some(&Snapshot::Full(old)));
        assert!(diff.is_empty());
    }

    #[test]
    fn volatile_added_or_removed_fields_are_filtered() {
        let differ = Differ::new();
        let new = Record::new().with("member_count", FieldValue::int(10));
        let old = Record::new().with("edited_timestamp", FieldValue::text("t"));

        let diff = differ.diff(&new, Some(&Snapshot::Full(old)));
        assert!(diff.is_empty());
    }

    #[test]
    fn custom_volatile_set_overrides_default() {
        let differ = Differ::with_volatile(["position".to_string()]);
        let new = Record::new()
            .with("position", FieldValue::int(3))
            .with("edited_timestamp", FieldValue::text("b"));
        let old = Record::new()
            .with("position", FieldValue::int(1))
            .with("edited_timestamp", FieldValue::text("a"));

        let diff = differ.diff(&new, Some(&Snapshot::Full(old)));
        assert_eq!(diff.len(), 1);
        assert!(diff.get("edited_timestamp").is_some());
    }

    #[test]
    fn partial_old_snapshot_suppresses_added_entries() {
        let differ = Differ::new();
        let new = Record::new()
            .with("name", FieldValue::text("general"))
            .with("topic", FieldValue::text("chatter"));
        // A partial snapshot only knows about `name`; the absence of
        // `topic` says nothing about whether it existed before.
        let old = Record::new().with("name", FieldValue::text("lobby"));

        let diff = differ.diff(&new, Some(&Snapshot::Partial(old)));
        assert_eq!(diff.len(), 1);
        assert_eq!(
            diff.get("name"),
            Some(&FieldChange::Modified {
                old: FieldValue::text("lobby"),
                new: FieldValue::text("general"),
            })
        );
    }

    #[test]
    fn full_old_snapshot_still_reports_additions() {
        let differ = Differ::new();
        let new = Record::new()
            .with("name", FieldValue::text("general"))
            .with("topic", FieldValue::text("chatter"));
        let old = Record::new().with("name", FieldValue::text("general"));

        let diff = differ.diff(&new, Some(&Snapshot::Full(old)));
        assert_eq!(
            diff.get("topic"),
            Some(&FieldChange::Added(FieldValue::text("chatter")))
        );
    }

    #[test]
    fn list_set_difference_deduplicates() {
        let a = vec![
            FieldValue::text("x"),
            FieldValue::text("x"),
            FieldValue::text("y"),
        ];
        let b = vec![FieldValue::text("y")];
        assert_eq!(set_difference(&a, &b), vec![FieldValue::text("x")]);
    }

    #[test]
    fn scalar_display_matches_source_values() {
        assert_eq!(Scalar::Int(42).to_string(), "42");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::Text("hi".into()).to_string(), "hi");
    }
}
