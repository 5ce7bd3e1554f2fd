//! Field-level change representation.

use vigil_types::FieldValue;

/// A single detected change at one field path.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    /// The field exists only in the new snapshot.
    Added(FieldValue),
    /// The field exists only in the old snapshot.
    Removed(FieldValue),
    /// A scalar (or kind-mismatched) field changed value.
    Modified {
        /// Value in the old snapshot.
        old: FieldValue,
        /// Value in the new snapshot.
        new: FieldValue,
    },
    /// A list-valued field gained and/or lost items.
    ///
    /// Computed as a value-set difference both ways; item order within the
    /// lists does not affect the result. At least one side is non-empty.
    ListDelta {
        /// Items present in the new list but not the old.
        added: Vec<FieldValue>,
        /// Items present in the old list but not the new.
        removed: Vec<FieldValue>,
    },
}

/// An ordered mapping from field path to [`FieldChange`].
///
/// Insertion order follows discovery order over the new record's fields,
/// then any fields present only in the old record. An empty set is a valid,
/// meaningful result: no changes detected.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiffSet {
    entries: Vec<(String, FieldChange)>,
}

impl DiffSet {
    /// Appends a change at the given dotted field path.
    pub(crate) fn push(&mut self, path: String, change: FieldChange) {
        self.entries.push((path, change));
    }

    /// Returns `true` if no changes were detected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of changed field paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates `(path, change)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldChange)> {
        self.entries.iter().map(|(p, c)| (p.as_str(), c))
    }

    /// Looks up the change recorded for a field path, if any.
    pub fn get(&self, path: &str) -> Option<&FieldChange> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, c)| c)
    }
}
