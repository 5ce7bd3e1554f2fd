//! Structural diffing between record snapshots.
//!
//! Compares a "before" and "after" [`vigil_types::Record`] field-by-field
//! and produces an ordered [`DiffSet`] of field-level changes. The diff is a
//! pure computation: no side effects, no external calls, deterministic for
//! identical inputs.
//!
//! A designated set of *volatile* field names (fields that change without
//! semantic significance, such as an edit timestamp) is excluded from
//! comparison entirely, at every nesting depth.

mod change;
mod differ;

pub use change::{DiffSet, FieldChange};
pub use differ::{Differ, DEFAULT_VOLATILE_FIELDS};
