//! Code generation hints.
//!
//! A hint document is a JSON object whose keys are scopes (`"Type.Property"`,
//! `"*.Property"` or a bare `"Type"`) mapping to arrays of
//! `{ "kind": ..., "arguments": { ... } }`. Every recognized kind becomes one
//! case of the closed [`Hint`] enum; unrecognized kinds are dropped while the
//! document is read and never reach the generator.

use crate::error::HintError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Wildcard type segment matching every type that declares the property.
pub const WILDCARD: &str = "*";

/// Declaration modifier carried by property hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    /// `public`
    Public,
    /// `internal`
    Internal,
    /// `protected`
    Protected,
    /// `private`
    Private,
    /// `virtual`
    Virtual,
    /// `override`
    Override,
    /// `abstract`
    Abstract,
    /// `sealed`
    Sealed,
    /// `static`
    Static,
    /// `readonly`
    ReadOnly,
    /// `new`
    New,
}

impl Modifier {
    /// Parses a modifier token.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "public" => Some(Self::Public),
            "internal" => Some(Self::Internal),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            "virtual" => Some(Self::Virtual),
            "override" => Some(Self::Override),
            "abstract" => Some(Self::Abstract),
            "sealed" => Some(Self::Sealed),
            "static" => Some(Self::Static),
            "readonly" => Some(Self::ReadOnly),
            "new" => Some(Self::New),
            _ => None,
        }
    }

    /// Returns true for access modifiers.
    #[must_use]
    pub const fn is_access(self) -> bool {
        matches!(
            self,
            Self::Public | Self::Internal | Self::Protected | Self::Private
        )
    }
}

/// Overrides the generated class name of a definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassNameHint {
    /// Generated class name.
    pub class_name: String,
}

/// Adds base types to a generated record's capability set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseTypeHint {
    /// Base type names.
    pub base_type_names: Vec<String>,
}

/// Requests a structural interface for a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterfaceHint {
    /// Interface description.
    pub description: Option<String>,
}

/// Turns a definition or property into an enum type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnumHint {
    /// Enum type name. Required when the hint targets a property.
    pub type_name: Option<String>,
    /// Enum description.
    pub description: Option<String>,
    /// Member identifiers, one per schema literal.
    pub member_names: Option<Vec<String>>,
    /// Explicit member values, one per non-zero member.
    pub member_values: Option<Vec<i64>>,
    /// Members are bit flags.
    pub flags: bool,
    /// Name of an extra member with value zero.
    pub zero_value_name: Option<String>,
    /// Permit `member_names` to differ in length from the literals.
    pub allow_member_count_mismatch: bool,
}

/// Types a property-less object schema as a map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DictionaryHint {
    /// Key type name (defaults to `string`).
    pub key_type_name: Option<String>,
    /// Value type name (defaults to inference from `additionalProperties`).
    pub value_type_name: Option<String>,
}

/// Combined property customization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyHint {
    /// Generated property name.
    pub name: Option<String>,
    /// Property type name.
    pub type_name: Option<String>,
    /// Declaration modifiers.
    pub modifiers: Vec<Modifier>,
}

/// Overrides the generated property name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyNameHint {
    /// Generated property name.
    pub name: String,
}

/// Overrides the inferred property type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyTypeHint {
    /// Property type name.
    pub type_name: String,
}

/// Sets the property declaration modifiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyModifiersHint {
    /// Declaration modifiers.
    pub modifiers: Vec<Modifier>,
}

/// Attaches an attribute declaration to a property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttributeHint {
    /// Attribute type name.
    pub type_name: String,
    /// Positional arguments.
    pub arguments: Vec<String>,
    /// Named arguments.
    pub properties: IndexMap<String, String>,
}

/// Kind discriminant of a [`Hint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HintKind {
    /// `ClassNameHint`
    ClassName,
    /// `BaseTypeHint`
    BaseType,
    /// `InterfaceHint`
    Interface,
    /// `EnumHint`
    Enum,
    /// `DictionaryHint`
    Dictionary,
    /// `PropertyHint`
    Property,
    /// `PropertyNameHint`
    PropertyName,
    /// `PropertyTypeHint`
    PropertyType,
    /// `PropertyModifiersHint`
    PropertyModifiers,
    /// `AttributeHint`
    Attribute,
}

impl HintKind {
    /// Resolves a kind name as written in the hint document.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ClassNameHint" => Some(Self::ClassName),
            "BaseTypeHint" => Some(Self::BaseType),
            "InterfaceHint" => Some(Self::Interface),
            "EnumHint" => Some(Self::Enum),
            "DictionaryHint" => Some(Self::Dictionary),
            "PropertyHint" => Some(Self::Property),
            "PropertyNameHint" => Some(Self::PropertyName),
            "PropertyTypeHint" => Some(Self::PropertyType),
            "PropertyModifiersHint" => Some(Self::PropertyModifiers),
            "AttributeHint" => Some(Self::Attribute),
            _ => None,
        }
    }

    /// Returns the kind name as written in the hint document.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ClassName => "ClassNameHint",
            Self::BaseType => "BaseTypeHint",
            Self::Interface => "InterfaceHint",
            Self::Enum => "EnumHint",
            Self::Dictionary => "DictionaryHint",
            Self::Property => "PropertyHint",
            Self::PropertyName => "PropertyNameHint",
            Self::PropertyType => "PropertyTypeHint",
            Self::PropertyModifiers => "PropertyModifiersHint",
            Self::Attribute => "AttributeHint",
        }
    }
}

/// A single recognized hint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Hint {
    /// Class name override.
    ClassName(ClassNameHint),
    /// Base types.
    BaseType(BaseTypeHint),
    /// Interface request.
    Interface(InterfaceHint),
    /// Enum typing.
    Enum(EnumHint),
    /// Map typing.
    Dictionary(DictionaryHint),
    /// Combined property customization.
    Property(PropertyHint),
    /// Property name override.
    PropertyName(PropertyNameHint),
    /// Property type override.
    PropertyType(PropertyTypeHint),
    /// Property modifiers.
    PropertyModifiers(PropertyModifiersHint),
    /// Attribute declaration.
    Attribute(AttributeHint),
}

impl Hint {
    /// Returns the kind of this hint.
    #[must_use]
    pub const fn kind(&self) -> HintKind {
        match self {
            Self::ClassName(_) => HintKind::ClassName,
            Self::BaseType(_) => HintKind::BaseType,
            Self::Interface(_) => HintKind::Interface,
            Self::Enum(_) => HintKind::Enum,
            Self::Dictionary(_) => HintKind::Dictionary,
            Self::Property(_) => HintKind::Property,
            Self::PropertyName(_) => HintKind::PropertyName,
            Self::PropertyType(_) => HintKind::PropertyType,
            Self::PropertyModifiers(_) => HintKind::PropertyModifiers,
            Self::Attribute(_) => HintKind::Attribute,
        }
    }
}

/// Typed access to one case of [`Hint`].
pub trait HintVariant: Sized {
    /// Kind of the case.
    const KIND: HintKind;

    /// Borrows the payload if `hint` is this case.
    fn from_hint(hint: &Hint) -> Option<&Self>;
}

macro_rules! hint_variant {
    ($ty:ty, $variant:ident) => {
        impl HintVariant for $ty {
            const KIND: HintKind = HintKind::$variant;

            fn from_hint(hint: &Hint) -> Option<&Self> {
                match hint {
                    Hint::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

hint_variant!(ClassNameHint, ClassName);
hint_variant!(BaseTypeHint, BaseType);
hint_variant!(InterfaceHint, Interface);
hint_variant!(EnumHint, Enum);
hint_variant!(DictionaryHint, Dictionary);
hint_variant!(PropertyHint, Property);
hint_variant!(PropertyNameHint, PropertyName);
hint_variant!(PropertyTypeHint, PropertyType);
hint_variant!(PropertyModifiersHint, PropertyModifiers);
hint_variant!(AttributeHint, Attribute);

/// Where a hint is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintScope<'a> {
    /// Type-level hints, keyed by the bare type name.
    Type(&'a str),
    /// Property-level hints, keyed by `"Type.Property"` or `"*.Property"`.
    Property {
        /// Declaring type (definition or generated class name).
        type_name: &'a str,
        /// Schema property name.
        property_name: &'a str,
    },
}

impl<'a> HintScope<'a> {
    /// Creates a property scope.
    #[must_use]
    pub const fn property(type_name: &'a str, property_name: &'a str) -> Self {
        Self::Property {
            type_name,
            property_name,
        }
    }

    /// Normalized keys in resolution order.
    fn keys(&self) -> Vec<String> {
        match self {
            Self::Type(name) => vec![normalize_key(name)],
            Self::Property {
                type_name,
                property_name,
            } => vec![
                normalize_key(&format!("{type_name}.{property_name}")),
                normalize_key(&format!("{WILDCARD}.{property_name}")),
            ],
        }
    }
}

impl fmt::Display for HintScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => write!(f, "{name}"),
            Self::Property {
                type_name,
                property_name,
            } => write!(f, "{type_name}.{property_name}"),
        }
    }
}

/// The type segment of a scope matches case-insensitively.
fn normalize_key(key: &str) -> String {
    match key.split_once('.') {
        Some((type_name, property_name)) => {
            format!("{}.{}", type_name.to_ascii_lowercase(), property_name)
        }
        None => key.to_ascii_lowercase(),
    }
}

/// Store of hints with scope resolution.
#[derive(Debug, Clone, Default)]
pub struct HintDictionary {
    entries: IndexMap<String, Vec<Hint>>,
}

impl HintDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a hint document.
    ///
    /// Unrecognized hint kinds are skipped with a warning.
    ///
    /// # Errors
    /// Returns `HintError` if the document is not a JSON object of hint
    /// arrays, a recognized hint has unreadable arguments, or a modifier
    /// token is unknown.
    pub fn from_json_str(json: &str) -> Result<Self, HintError> {
        let raw: IndexMap<String, Vec<RawHint>> =
            serde_json::from_str(json).map_err(|e| HintError::MalformedDocument {
                message: e.to_string(),
            })?;

        let mut dictionary = Self::new();
        for (scope, hints) in raw {
            for raw_hint in hints {
                let Some(kind) = HintKind::from_name(&raw_hint.kind) else {
                    tracing::warn!(
                        scope = %scope,
                        kind = %raw_hint.kind,
                        "ignoring unrecognized hint kind"
                    );
                    continue;
                };
                let hint = read_hint(&scope, kind, raw_hint.arguments)?;
                dictionary.insert(scope.as_str(), hint);
            }
        }

        Ok(dictionary)
    }

    /// Adds a hint under `scope`, after any hints already there.
    pub fn insert(&mut self, scope: &str, hint: Hint) {
        self.entries
            .entry(normalize_key(scope))
            .or_default()
            .push(hint);
    }

    /// Returns the number of hints stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns true if no hints are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up the first hint of `kind` for `scope`.
    ///
    /// Property scopes try the exact key before the wildcard key.
    #[must_use]
    pub fn lookup(&self, scope: &HintScope<'_>, kind: HintKind) -> Option<&Hint> {
        scope.keys().iter().find_map(|key| {
            self.entries
                .get(key)
                .and_then(|hints| hints.iter().find(|h| h.kind() == kind))
        })
    }

    /// Typed form of [`lookup`](Self::lookup).
    #[must_use]
    pub fn get<T: HintVariant>(&self, scope: &HintScope<'_>) -> Option<&T> {
        self.lookup(scope, T::KIND).and_then(T::from_hint)
    }

    /// Looks up the first hint of `kind` across alternative names of one scope.
    ///
    /// Exact keys of every alternative are tried before any wildcard key, so a
    /// hint may name a definition or its generated class interchangeably.
    #[must_use]
    pub fn lookup_any(&self, scopes: &[HintScope<'_>], kind: HintKind) -> Option<&Hint> {
        let wildcard_prefix = format!("{WILDCARD}.");
        let (exact, wildcard): (Vec<String>, Vec<String>) = scopes
            .iter()
            .flat_map(HintScope::keys)
            .partition(|key| !key.starts_with(&wildcard_prefix));

        exact.iter().chain(&wildcard).find_map(|key| {
            self.entries
                .get(key)
                .and_then(|hints| hints.iter().find(|h| h.kind() == kind))
        })
    }

    /// Typed form of [`lookup_any`](Self::lookup_any).
    #[must_use]
    pub fn get_any<T: HintVariant>(&self, scopes: &[HintScope<'_>]) -> Option<&T> {
        self.lookup_any(scopes, T::KIND).and_then(T::from_hint)
    }
}

#[derive(Deserialize)]
struct RawHint {
    kind: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawPropertyArguments {
    name: Option<String>,
    type_name: Option<String>,
    modifiers: Vec<String>,
}

fn read_hint(scope: &str, kind: HintKind, arguments: Value) -> Result<Hint, HintError> {
    let arguments = if arguments.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        arguments
    };

    let hint = match kind {
        HintKind::ClassName => Hint::ClassName(parse_arguments(scope, kind, arguments)?),
        HintKind::BaseType => Hint::BaseType(parse_arguments(scope, kind, arguments)?),
        HintKind::Interface => Hint::Interface(parse_arguments(scope, kind, arguments)?),
        HintKind::Enum => Hint::Enum(parse_arguments(scope, kind, arguments)?),
        HintKind::Dictionary => Hint::Dictionary(parse_arguments(scope, kind, arguments)?),
        HintKind::Attribute => Hint::Attribute(parse_arguments(scope, kind, arguments)?),
        HintKind::Property
        | HintKind::PropertyName
        | HintKind::PropertyType
        | HintKind::PropertyModifiers => {
            let raw: RawPropertyArguments = parse_arguments(scope, kind, arguments)?;
            let modifiers = raw
                .modifiers
                .iter()
                .map(|token| {
                    Modifier::parse(token).ok_or_else(|| HintError::InvalidModifier {
                        scope: scope.to_string(),
                        modifier: token.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let missing = |field: &str| {
                HintError::invalid_arguments(scope, kind.name(), format!("missing '{field}'"))
            };

            match kind {
                HintKind::PropertyName => Hint::PropertyName(PropertyNameHint {
                    name: raw.name.ok_or_else(|| missing("name"))?,
                }),
                HintKind::PropertyType => Hint::PropertyType(PropertyTypeHint {
                    type_name: raw.type_name.ok_or_else(|| missing("typeName"))?,
                }),
                HintKind::PropertyModifiers => {
                    Hint::PropertyModifiers(PropertyModifiersHint { modifiers })
                }
                _ => Hint::Property(PropertyHint {
                    name: raw.name,
                    type_name: raw.type_name,
                    modifiers,
                }),
            }
        }
    };

    Ok(hint)
}

fn parse_arguments<T: for<'de> Deserialize<'de>>(
    scope: &str,
    kind: HintKind,
    arguments: Value,
) -> Result<T, HintError> {
    serde_json::from_value(arguments)
        .map_err(|e| HintError::invalid_arguments(scope, kind.name(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HINTS: &str = r#"{
        "result.kind": [
            { "kind": "EnumHint", "arguments": { "typeName": "ResultKind" } }
        ],
        "*.properties": [
            { "kind": "DictionaryHint" }
        ],
        "Location.properties": [
            { "kind": "DictionaryHint", "arguments": { "valueTypeName": "integer" } }
        ],
        "run": [
            { "kind": "ClassNameHint", "arguments": { "className": "Execution" } },
            { "kind": "ClassNameHint", "arguments": { "className": "Ignored" } },
            { "kind": "SomeFutureHint", "arguments": { "anything": 1 } }
        ],
        "node.id": [
            { "kind": "PropertyModifiersHint", "arguments": { "modifiers": ["public", "virtual"] } }
        ]
    }"#;

    fn load() -> HintDictionary {
        HintDictionary::from_json_str(HINTS).expect("Failed to load hints")
    }

    #[test]
    fn test_unknown_kind_is_ignored() {
        let hints = load();
        assert_eq!(hints.len(), 6);
    }

    #[test]
    fn test_exact_scope_wins_over_wildcard() {
        let hints = load();
        let hint: &DictionaryHint = hints
            .get(&HintScope::property("location", "properties"))
            .expect("Failed to find hint");
        assert_eq!(hint.value_type_name.as_deref(), Some("integer"));
    }

    #[test]
    fn test_wildcard_scope_applies_to_any_type() {
        let hints = load();
        for type_name in ["Result", "Notification", "anything"] {
            let hint: &DictionaryHint = hints
                .get(&HintScope::property(type_name, "properties"))
                .expect("Failed to find hint");
            assert!(hint.value_type_name.is_none());
        }
        assert!(
            hints
                .get::<DictionaryHint>(&HintScope::property("Result", "Properties"))
                .is_none()
        );
    }

    #[test]
    fn test_type_segment_is_case_insensitive() {
        let hints = load();
        let hint: &EnumHint = hints
            .get(&HintScope::property("Result", "kind"))
            .expect("Failed to find hint");
        assert_eq!(hint.type_name.as_deref(), Some("ResultKind"));
    }

    #[test]
    fn test_first_hint_per_kind_wins() {
        let hints = load();
        let hint: &ClassNameHint = hints
            .get(&HintScope::Type("run"))
            .expect("Failed to find hint");
        assert_eq!(hint.class_name, "Execution");
    }

    #[test]
    fn test_modifiers_parse() {
        let hints = load();
        let hint: &PropertyModifiersHint = hints
            .get(&HintScope::property("Node", "id"))
            .expect("Failed to find hint");
        assert_eq!(hint.modifiers, vec![Modifier::Public, Modifier::Virtual]);
    }

    #[test]
    fn test_invalid_modifier_is_an_error() {
        let json = r#"{ "a.b": [ { "kind": "PropertyModifiersHint", "arguments": { "modifiers": ["publik"] } } ] }"#;
        match HintDictionary::from_json_str(json) {
            Err(HintError::InvalidModifier { scope, modifier }) => {
                assert_eq!(scope, "a.b");
                assert_eq!(modifier, "publik");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_argument() {
        let json = r#"{ "a.b": [ { "kind": "PropertyNameHint", "arguments": {} } ] }"#;
        assert!(matches!(
            HintDictionary::from_json_str(json),
            Err(HintError::InvalidArguments { .. })
        ));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            HintDictionary::from_json_str("[1, 2]"),
            Err(HintError::MalformedDocument { .. })
        ));
    }

    #[test]
    fn test_exact_alias_wins_over_wildcard() {
        let hints = load();
        let scopes = [
            HintScope::property("physical_location", "properties"),
            HintScope::property("Location", "properties"),
        ];
        let hint: &DictionaryHint = hints.get_any(&scopes).expect("Failed to find hint");
        assert_eq!(hint.value_type_name.as_deref(), Some("integer"));
    }

    #[test]
    fn test_programmatic_insert() {
        let mut hints = HintDictionary::new();
        assert!(hints.is_empty());
        hints.insert(
            "Widget",
            Hint::Interface(InterfaceHint {
                description: Some("A widget.".to_string()),
            }),
        );
        assert!(hints.lookup(&HintScope::Type("widget"), HintKind::Interface).is_some());
        assert!(hints.lookup(&HintScope::Type("widget"), HintKind::Enum).is_none());
    }
}
