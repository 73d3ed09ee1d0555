use std::borrow::Cow;

use serde::Serialize;

use crate::value::{lookup, Key, Mapping, Value};

/// A typed operation that can be tested against a policy.
///
/// The tag identifies the kind of operation and selects the policy entry; the
/// fields are matched against that entry.  The field view must be stable for
/// the duration of a match call.
pub trait Requirement {
    /// The record's type identity.
    fn tag(&self) -> Cow<'_, Key>;

    /// Field name to value view of the record.
    fn fields(&self) -> Cow<'_, Mapping>;
}

/// Errors raised when a requirement record cannot expose a stable field view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("record tag must not be empty")]
    EmptyTag,

    #[error("record '{tag}' has a field with an empty name")]
    EmptyFieldName { tag: String },

    #[error("record '{tag}' names field '{field}' more than once")]
    DuplicateField { tag: String, field: String },
}

/// General purpose [`Requirement`]: a tag plus a field mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    tag: Key,
    fields: Mapping,
}

impl Record {
    /// Build a record, rejecting an empty tag, empty field names, and field
    /// names that collide under label/text key equivalence.
    pub fn new<K, V>(
        tag: impl Into<Key>,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, RecordError>
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        let tag = tag.into();
        if tag.as_str().is_empty() {
            return Err(RecordError::EmptyTag);
        }

        let mut map = Mapping::new();
        for (name, value) in fields {
            let name = name.into();
            if name.as_str().is_empty() {
                return Err(RecordError::EmptyFieldName {
                    tag: tag.to_string(),
                });
            }
            if lookup(&map, &name).is_some() {
                return Err(RecordError::DuplicateField {
                    tag: tag.to_string(),
                    field: name.to_string(),
                });
            }
            map.insert(name, value.into());
        }

        Ok(Self { tag, fields: map })
    }

    /// A record with no fields.
    pub fn unit(tag: impl Into<Key>) -> Result<Self, RecordError> {
        Self::new(tag, std::iter::empty::<(Key, Value)>())
    }

    /// Value of `field`, honouring label/text key equivalence.
    pub fn get(&self, field: &Key) -> Option<&Value> {
        lookup(&self.fields, field)
    }
}

impl Requirement for Record {
    fn tag(&self) -> Cow<'_, Key> {
        Cow::Borrowed(&self.tag)
    }

    fn fields(&self) -> Cow<'_, Mapping> {
        Cow::Borrowed(&self.fields)
    }
}

/// A record used as a permission spec is its field mapping.
impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Mapping(record.fields)
    }
}
