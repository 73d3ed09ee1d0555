use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Literal text that behaves as [`Value::Wildcard`] on either side of a match.
pub const WILDCARD_TEXT: &str = "_";

/// Head marker of an alternation sequence: `[any, a, b, ...]`.
pub const ANY: &str = "any";

/// Head marker of a per-element alternation sequence: `[many, a, b, ...]`.
pub const MANY: &str = "many";

/// Field-keyed record, spec, or tagged policy document.
pub type Mapping = BTreeMap<Key, Value>;

/// Returned by lookups that miss.
pub(crate) static ABSENT: Value = Value::Absent;

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// The closed value algebra shared by requirement fields and policy entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Matches, and is matched by, anything.
    Wildcard,
    /// No value present. Equal only to itself.
    Absent,
    Boolean(bool),
    /// Symbolic literal such as an action name.
    Label(String),
    Text(String),
    Number(Number),
    /// Character-array literal. Never equal to [`Value::Text`].
    CharSequence(Vec<char>),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// Build a symbolic label.  The label `_` is the wildcard.
    pub fn label(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == WILDCARD_TEXT {
            Value::Wildcard
        } else {
            Value::Label(name)
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    pub fn chars(text: &str) -> Self {
        Value::CharSequence(text.chars().collect())
    }

    /// Build `[any, alternatives...]`.
    pub fn any_of(alternatives: impl IntoIterator<Item = Value>) -> Self {
        Self::marked(ANY, alternatives)
    }

    /// Build `[many, alternatives...]`.
    pub fn many_of(alternatives: impl IntoIterator<Item = Value>) -> Self {
        Self::marked(MANY, alternatives)
    }

    fn marked(marker: &str, rest: impl IntoIterator<Item = Value>) -> Self {
        let mut items = vec![Value::Label(marker.to_string())];
        items.extend(rest);
        Value::Sequence(items)
    }

    /// True for [`Value::Wildcard`] and for the literal text `"_"`.
    pub fn is_wildcard(&self) -> bool {
        match self {
            Value::Wildcard => true,
            Value::Text(text) => text == WILDCARD_TEXT,
            _ => false,
        }
    }

    /// Textual content of a label or text value.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Label(s) | Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Wildcard => "wildcard",
            Value::Absent => "absent",
            Value::Boolean(_) => "boolean",
            Value::Label(_) => "label",
            Value::Text(_) => "text",
            Value::Number(_) => "number",
            Value::CharSequence(_) => "char sequence",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::Int(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Number::Int(n.into()))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::Float(n))
    }
}

/// String slices become [`Value::Text`]; use [`Value::label`] for symbols.
impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Sequence(iter.into_iter().collect())
    }
}

impl<K: Into<Key>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// ---------------------------------------------------------------------------
// Number
// ---------------------------------------------------------------------------

/// Numeric literal.  Integers and floats never compare equal to each other.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            // Bit equality keeps NaN reflexive so `Value` can be `Eq`.
            (Number::Float(a), Number::Float(b)) => a == b || a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Number {}

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Mapping key: a field name, a record tag, or the `admin` entry.
///
/// A label key and a text key with the same content are equivalent for
/// lookups (see [`lookup`]) but remain distinct map entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Label(String),
    Text(String),
}

impl Key {
    pub fn label(name: impl Into<String>) -> Self {
        Key::Label(name.into())
    }

    pub fn text(name: impl Into<String>) -> Self {
        Key::Text(name.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Key::Label(s) | Key::Text(s) => s,
        }
    }

    /// The same name in the other representation.
    pub fn counterpart(&self) -> Key {
        match self {
            Key::Label(s) => Key::Text(s.clone()),
            Key::Text(s) => Key::Label(s.clone()),
        }
    }
}

/// Bare string slices become labels, since field names and tags are symbolic.
impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Label(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Label(s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Look `key` up in `mapping`, falling back to its counterpart representation.
///
/// This is the one place label/text key equivalence is decided; field
/// lookups, mapping comparison, and tag dispatch all go through it.
pub fn lookup<'a>(mapping: &'a Mapping, key: &Key) -> Option<&'a Value> {
    mapping
        .get(key)
        .or_else(|| mapping.get(&key.counterpart()))
}

/// [`lookup`], yielding [`Value::Absent`] on a miss.
pub(crate) fn lookup_or_absent<'a>(mapping: &'a Mapping, key: &Key) -> &'a Value {
    lookup(mapping, key).unwrap_or(&ABSENT)
}
