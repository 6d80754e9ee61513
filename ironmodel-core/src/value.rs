//! Runtime instances of generated types.

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;

static NULL: Value = Value::Null;

/// A runtime value held by a record property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent or null.
    Null,
    /// Boolean scalar.
    Boolean(bool),
    /// Integer scalar.
    Integer(i64),
    /// Number scalar.
    Number(f64),
    /// String scalar.
    String(String),
    /// Date-time scalar.
    DateTime(DateTime<FixedOffset>),
    /// URI scalar.
    Uri(UriValue),
    /// Enum member, held by its serialized literal.
    Enum(String),
    /// Ordered collection.
    List(Vec<Value>),
    /// Key/value map.
    Map(IndexMap<String, Value>),
    /// Generated record.
    Record(Box<Record>),
    /// Object with no generated type.
    Untyped(serde_json::Value),
}

impl Value {
    /// Returns true for `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short description of the value's shape, used in errors.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::DateTime(_) => "dateTime",
            Self::Uri(_) => "uri",
            Self::Enum(_) => "enum",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Record(_) => "record",
            Self::Untyped(_) => "object",
        }
    }

    /// Borrows the record, if this value is one.
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Borrows the list, if this value is one.
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(Box::new(record))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// Instance of a generated record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Creates a record with no properties set.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Sets a property, returning the record.
    #[must_use]
    pub fn with(mut self, property: &str, value: impl Into<Value>) -> Self {
        self.set(property, value);
        self
    }

    /// Returns the record's type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns a property, or `Null` if it was never set.
    #[must_use]
    pub fn get(&self, property: &str) -> &Value {
        self.fields.get(property).unwrap_or(&NULL)
    }

    /// Returns a mutable property slot, creating it as `Null` if needed.
    pub fn get_mut(&mut self, property: &str) -> &mut Value {
        self.fields
            .entry(property.to_string())
            .or_insert(Value::Null)
    }

    /// Moves a set property out, leaving `Null` in its slot.
    ///
    /// Returns `None` if the property was never set.
    pub fn take(&mut self, property: &str) -> Option<Value> {
        self.fields
            .get_mut(property)
            .map(|slot| std::mem::replace(slot, Value::Null))
    }

    /// Sets a property.
    pub fn set(&mut self, property: &str, value: impl Into<Value>) {
        self.fields.insert(property.to_string(), value.into());
    }
}

/// Whether a URI carries a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UriKind {
    /// Has a scheme.
    Absolute,
    /// No scheme.
    Relative,
}

/// URI value keeping its original text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriValue {
    original: String,
    kind: UriKind,
}

impl UriValue {
    /// Creates a URI with an explicit kind.
    #[must_use]
    pub fn new(original: impl Into<String>, kind: UriKind) -> Self {
        Self {
            original: original.into(),
            kind,
        }
    }

    /// Parses a URI, deciding its kind from the presence of a scheme.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let kind = if has_scheme(text) {
            UriKind::Absolute
        } else {
            UriKind::Relative
        };
        Self::new(text, kind)
    }

    /// Returns the original text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Returns the kind.
    #[must_use]
    pub const fn kind(&self) -> UriKind {
        self.kind
    }
}

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`
fn has_scheme(text: &str) -> bool {
    let Some((scheme, _)) = text.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
