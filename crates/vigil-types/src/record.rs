//! Ordered record model for lifecycle snapshots.
//!
//! The remote platform describes channels, roles, members, and messages as
//! nested objects. Vigil normalises each one into a [`Record`]: an ordered
//! list of named fields whose identity is the field *name*, not its
//! position. Every record-like payload goes through this one explicit
//! key-value view, so the differ never needs runtime reflection.

use serde_json::Value;

/// A scalar field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A boolean flag.
    Bool(bool),
    /// An integer (colors, positions, permission bitsets).
    Int(i64),
    /// A text value. Non-integer numbers are carried as text verbatim.
    Text(String),
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A single field value inside a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Explicit null (present but empty).
    Null,
    /// A scalar leaf.
    Scalar(Scalar),
    /// An ordered list of values.
    List(Vec<FieldValue>),
    /// A nested record.
    Record(Record),
}

impl FieldValue {
    /// Convenience constructor for a text scalar.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(value.into()))
    }

    /// Convenience constructor for an integer scalar.
    pub fn int(value: i64) -> Self {
        Self::Scalar(Scalar::Int(value))
    }

    /// Convenience constructor for a boolean scalar.
    pub fn bool(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Scalar(Scalar::Int(i)),
                None => Self::Scalar(Scalar::Text(n.to_string())),
            },
            Value::String(s) => Self::Scalar(Scalar::Text(s.clone())),
            Value::Array(items) => Self::List(items.iter().map(Self::from).collect()),
            Value::Object(_) => Self::Record(Record::from_json(value).unwrap_or_default()),
        }
    }
}

/// An ordered collection of named fields.
///
/// Field iteration order is insertion order; lookups are by name. Two
/// records are comparable field-by-field by name regardless of position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, useful for constructing fixtures and
    /// adapter payloads.
    pub fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a field, replacing any existing field with the same name
    /// in place (insertion order of the original field is kept).
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Returns `true` if a field with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts a JSON object into a record, preserving key order.
    ///
    /// Returns `None` if the value is not an object.
    pub fn from_json(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let mut record = Self::new();
        for (name, value) in map {
            record.insert(name.clone(), FieldValue::from(value));
        }
        Some(record)
    }
}

/// A point-in-time representation of an entity, compared against a later
/// snapshot to compute a diff.
///
/// Some gateway events guarantee only an id and a couple of fields rather
/// than a full prior record. [`Snapshot::Partial`] makes that explicit so
/// "the old record may be incomplete" is a visible branch in the differ,
/// not an optional-field guess.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    /// A complete record: absence of a field means the field did not exist.
    Full(Record),
    /// Only the listed fields are known; absence carries no information.
    Partial(Record),
}

impl Snapshot {
    /// The underlying record, full or partial.
    pub fn record(&self) -> &Record {
        match self {
            Self::Full(record) | Self::Partial(record) => record,
        }
    }

    /// Returns `true` for a partial snapshot.
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial(_))
    }
}

/// The content an event carries into the audit pipeline.
///
/// Events that only guarantee an identifier and a few fixed fields are
/// delivered as a pre-rendered literal phrase; everything else carries a
/// structured snapshot that the differ can compare.
#[derive(Debug, Clone, PartialEq)]
pub enum EventContent {
    /// A ready-to-render line of text, passed through verbatim.
    Literal(String),
    /// A structured snapshot of the entity after the event.
    Snapshot(Snapshot),
}

impl EventContent {
    /// Literal text content.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// A full structured snapshot.
    pub fn full(record: Record) -> Self {
        Self::Snapshot(Snapshot::Full(record))
    }

    /// A partial structured snapshot.
    pub fn partial(record: Record) -> Self {
        Self::Snapshot(Snapshot::Partial(record))
    }
}
