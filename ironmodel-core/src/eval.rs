//! Interpreter for synthesized record programs.
//!
//! [`ObjectModel`] executes the equality, hash and init programs of
//! generated records against runtime [`Value`]s. Hash arithmetic wraps on
//! 32 bits; only distribution matters, never uniqueness.

use crate::error::{Result, RuntimeError};
use crate::program::{CloneOp, CompareOp, HashOp, ProgramSource, RecordProgram};
use crate::signature::{ScalarKind, TypeSignature};
use crate::value::{Record, UriKind, UriValue, Value};
use chrono::DateTime;
use indexmap::IndexMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Executes record programs drawn from a [`ProgramSource`].
pub struct ObjectModel<'a, S: ProgramSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: ProgramSource + ?Sized> ObjectModel<'a, S> {
    /// Creates an object model over `source`.
    #[must_use]
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    fn program(&self, type_name: &str) -> Result<&'a RecordProgram> {
        self.source
            .record_program(type_name)
            .ok_or_else(|| RuntimeError::UnknownType {
                type_name: type_name.to_string(),
            })
    }

    // ------------------------------------------------------------------ //
    // Equality
    // ------------------------------------------------------------------ //

    /// Runs `left`'s equality program against `right`.
    ///
    /// # Errors
    /// Returns `RuntimeError::UnknownType` if no program exists for a record
    /// reached during the comparison.
    pub fn equals(&self, left: &Record, right: Option<&Record>) -> Result<bool> {
        let Some(right) = right else {
            return Ok(false);
        };
        if left.type_name() != right.type_name() {
            return Ok(false);
        }

        let program = self.program(left.type_name())?;
        for step in &program.equality {
            if !self.compare(&step.op, left.get(&step.property), right.get(&step.property))? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn compare(&self, op: &CompareOp, left: &Value, right: &Value) -> Result<bool> {
        match op {
            CompareOp::ValueEquals => Ok(left == right),
            CompareOp::StructuralEquals => match (left, right) {
                (Value::Null, Value::Null) => Ok(true),
                (Value::Null, _) | (_, Value::Null) => Ok(false),
                (Value::Record(l), Value::Record(r)) => self.equals(l, Some(r)),
                _ => Ok(left == right),
            },
            CompareOp::Collection(element) => match (left, right) {
                (Value::List(l), Value::List(r)) => {
                    if std::ptr::eq(l, r) {
                        return Ok(true);
                    }
                    if l.len() != r.len() {
                        return Ok(false);
                    }
                    for (a, b) in l.iter().zip(r) {
                        if !self.compare(element, a, b)? {
                            return Ok(false);
                        }
                    }
                    Ok(true)
                }
                (Value::Null, Value::Null) => Ok(true),
                (Value::Null, _) | (_, Value::Null) => Ok(false),
                _ => Err(mismatch("list", left, right)),
            },
            CompareOp::Dictionary(value) => match (left, right) {
                (Value::Map(l), Value::Map(r)) => {
                    if std::ptr::eq(l, r) {
                        return Ok(true);
                    }
                    if l.len() != r.len() {
                        return Ok(false);
                    }
                    for (key, a) in l {
                        let Some(b) = r.get(key) else {
                            return Ok(false);
                        };
                        if !self.compare(value, a, b)? {
                            return Ok(false);
                        }
                    }
                    Ok(true)
                }
                (Value::Null, Value::Null) => Ok(true),
                (Value::Null, _) | (_, Value::Null) => Ok(false),
                _ => Err(mismatch("map", left, right)),
            },
        }
    }

    // ------------------------------------------------------------------ //
    // Hashing
    // ------------------------------------------------------------------ //

    /// Runs a record's hash program.
    ///
    /// # Errors
    /// Returns `RuntimeError::UnknownType` if no program exists for a record
    /// reached while hashing.
    pub fn hash_code(&self, record: &Record) -> Result<i32> {
        let program = self.program(record.type_name())?;
        let hash = &program.hash;

        let mut result = hash.seed;
        for step in &hash.steps {
            result = self.contribute(&step.op, record.get(&step.property), result, hash.multiplier)?;
        }
        Ok(result)
    }

    fn contribute(&self, op: &HashOp, value: &Value, acc: i32, multiplier: i32) -> Result<i32> {
        match op {
            HashOp::ScalarValue => Ok(fold(acc, multiplier, scalar_hash(value))),
            HashOp::ScalarRef => match value {
                Value::Null => Ok(acc),
                Value::Record(record) => Ok(fold(acc, multiplier, self.hash_code(record)?)),
                _ => Ok(fold(acc, multiplier, scalar_hash(value))),
            },
            HashOp::Collection(element) => match value {
                Value::Null => Ok(acc),
                Value::List(items) => {
                    let mut acc = acc;
                    for item in items {
                        acc = self.contribute(element, item, acc, multiplier)?;
                    }
                    Ok(acc)
                }
                other => Err(RuntimeError::TypeMismatch {
                    expected: "list".to_string(),
                    actual: other.shape().to_string(),
                }),
            },
            HashOp::Dictionary(entry) => match value {
                Value::Null => Ok(acc),
                Value::Map(entries) => {
                    let mut xor = 0i32;
                    for (key, item) in entries {
                        let key_hash = string_hash(key);
                        let value_hash = self.contribute(entry, item, 0, multiplier)?;
                        xor ^= key_hash ^ value_hash;
                    }
                    Ok(fold(acc, multiplier, xor))
                }
                other => Err(RuntimeError::TypeMismatch {
                    expected: "map".to_string(),
                    actual: other.shape().to_string(),
                }),
            },
        }
    }

    // ------------------------------------------------------------------ //
    // Construction and cloning
    // ------------------------------------------------------------------ //

    /// Copy constructor: deep-clones `other` into a new `type_name`.
    ///
    /// # Errors
    /// Returns `RuntimeError::NullCopySource` if `other` is `None`, before
    /// any property is read.
    pub fn copy(&self, type_name: &str, other: Option<&Record>) -> Result<Record> {
        let Some(other) = other else {
            return Err(RuntimeError::NullCopySource {
                type_name: type_name.to_string(),
            });
        };
        if other.type_name() != type_name {
            return Err(RuntimeError::TypeMismatch {
                expected: type_name.to_string(),
                actual: other.type_name().to_string(),
            });
        }

        let program = self.program(type_name)?;
        let args: Vec<&Value> = program.slots.iter().map(|s| other.get(&s.name)).collect();
        self.init(program, &args)
    }

    /// Default constructor: every property takes its schema default or null.
    ///
    /// # Errors
    /// Returns `RuntimeError` if the type is unknown, cloning code was not
    /// generated, or a default value does not fit its signature.
    pub fn construct_default(&self, type_name: &str) -> Result<Record> {
        let program = self.program(type_name)?;
        let mut defaults = Vec::with_capacity(program.slots.len());
        for slot in &program.slots {
            let value = match &slot.default_value {
                Some(json) => self.read_value(
                    &slot.signature,
                    json,
                    &format!("{type_name}.{}", slot.name),
                )?,
                None => Value::Null,
            };
            defaults.push(value);
        }
        let args: Vec<&Value> = defaults.iter().collect();
        self.init(program, &args)
    }

    /// Init constructor: one argument per property, in declaration order.
    ///
    /// # Errors
    /// Returns `RuntimeError::ArityMismatch` if `args` does not match the
    /// property count.
    pub fn construct(&self, type_name: &str, args: &[Value]) -> Result<Record> {
        let program = self.program(type_name)?;
        if args.len() != program.slots.len() {
            return Err(RuntimeError::ArityMismatch {
                type_name: type_name.to_string(),
                expected: program.slots.len(),
                actual: args.len(),
            });
        }
        let args: Vec<&Value> = args.iter().collect();
        self.init(program, &args)
    }

    fn init(&self, program: &RecordProgram, args: &[&Value]) -> Result<Record> {
        let steps = program
            .init
            .as_ref()
            .ok_or_else(|| RuntimeError::CloningNotGenerated {
                type_name: program.type_name.clone(),
            })?;

        let mut record = Record::new(program.type_name.as_str());
        for (step, arg) in steps.iter().zip(args) {
            record.set(&step.property, self.clone_value(&step.op, arg)?);
        }
        Ok(record)
    }

    fn clone_value(&self, op: &CloneOp, value: &Value) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        match op {
            CloneOp::Assign => Ok(value.clone()),
            CloneOp::Clone(type_name) => {
                let copied = self.copy(type_name, value.as_record())?;
                Ok(Value::from(copied))
            }
            CloneOp::Collection(element) => {
                let Value::List(items) = value else {
                    return Err(RuntimeError::TypeMismatch {
                        expected: "list".to_string(),
                        actual: value.shape().to_string(),
                    });
                };
                let mut destination = Vec::with_capacity(items.len());
                for item in items {
                    destination.push(self.clone_value(element, item)?);
                }
                Ok(Value::List(destination))
            }
            CloneOp::Dictionary(entry) => {
                let Value::Map(entries) = value else {
                    return Err(RuntimeError::TypeMismatch {
                        expected: "map".to_string(),
                        actual: value.shape().to_string(),
                    });
                };
                let mut destination = IndexMap::with_capacity(entries.len());
                for (key, item) in entries {
                    destination.insert(key.clone(), self.clone_value(entry, item)?);
                }
                Ok(Value::Map(destination))
            }
            CloneOp::Uri => {
                let Value::Uri(uri) = value else {
                    return Err(RuntimeError::TypeMismatch {
                        expected: "uri".to_string(),
                        actual: value.shape().to_string(),
                    });
                };
                let rebuilt = match uri.kind() {
                    UriKind::Absolute => UriValue::new(uri.as_str(), UriKind::Absolute),
                    UriKind::Relative => UriValue::new(uri.as_str(), UriKind::Relative),
                };
                Ok(Value::Uri(rebuilt))
            }
        }
    }

    // ------------------------------------------------------------------ //
    // Reading instances
    // ------------------------------------------------------------------ //

    /// Builds a record of `type_name` from serialized JSON.
    ///
    /// Properties are read by their serialized names; missing properties are
    /// null and unknown ones are ignored.
    ///
    /// # Errors
    /// Returns `RuntimeError::InvalidInstance` if a value does not fit its
    /// property signature.
    pub fn read_json(&self, type_name: &str, json: &serde_json::Value) -> Result<Record> {
        self.read_record(type_name, json, "$")
    }

    fn read_record(&self, type_name: &str, json: &serde_json::Value, path: &str) -> Result<Record> {
        let program = self.program(type_name)?;
        let object = json
            .as_object()
            .ok_or_else(|| RuntimeError::invalid_instance(path, "expected an object"))?;

        let mut record = Record::new(type_name);
        for slot in &program.slots {
            let value = match object.get(&slot.serialized_name) {
                Some(v) => self.read_value(
                    &slot.signature,
                    v,
                    &format!("{path}.{}", slot.serialized_name),
                )?,
                None => Value::Null,
            };
            record.set(&slot.name, value);
        }
        Ok(record)
    }

    fn read_value(
        &self,
        signature: &TypeSignature,
        json: &serde_json::Value,
        path: &str,
    ) -> Result<Value> {
        use serde_json::Value as Json;

        if json.is_null() {
            return Ok(Value::Null);
        }
        let expected = |what: &str| RuntimeError::invalid_instance(path, format!("expected {what}"));

        let value = match signature {
            TypeSignature::Scalar(kind) => match (kind, json) {
                (ScalarKind::Boolean, Json::Bool(b)) => Value::Boolean(*b),
                (ScalarKind::Integer, Json::Number(n)) => {
                    Value::Integer(n.as_i64().ok_or_else(|| expected("an integer"))?)
                }
                (ScalarKind::Number, Json::Number(n)) => {
                    Value::Number(n.as_f64().ok_or_else(|| expected("a number"))?)
                }
                (ScalarKind::String, Json::String(s)) => Value::String(s.clone()),
                (ScalarKind::DateTime, Json::String(s)) => Value::DateTime(
                    DateTime::parse_from_rfc3339(s).map_err(|_| expected("an RFC 3339 date-time"))?,
                ),
                (ScalarKind::Uri, Json::String(s)) => Value::Uri(UriValue::parse(s)),
                (kind, _) => return Err(expected(kind.keyword())),
            },
            TypeSignature::NamedRecord(name) => Value::from(self.read_record(name, json, path)?),
            TypeSignature::NamedEnum(_) => match json {
                Json::String(s) => Value::Enum(s.clone()),
                Json::Number(n) => Value::Enum(n.to_string()),
                _ => return Err(expected("an enum literal")),
            },
            TypeSignature::List(element) => {
                let items = json.as_array().ok_or_else(|| expected("an array"))?;
                let mut values = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    values.push(self.read_value(element, item, &format!("{path}[{index}]"))?);
                }
                Value::List(values)
            }
            TypeSignature::Map { value, .. } => {
                let entries = json.as_object().ok_or_else(|| expected("an object"))?;
                let mut values = IndexMap::with_capacity(entries.len());
                for (key, item) in entries {
                    values.insert(
                        key.clone(),
                        self.read_value(value, item, &format!("{path}.{key}"))?,
                    );
                }
                Value::Map(values)
            }
            TypeSignature::UntypedObject => Value::Untyped(json.clone()),
        };

        Ok(value)
    }
}

/// `acc * multiplier + contribution`, wrapping.
fn fold(acc: i32, multiplier: i32, contribution: i32) -> i32 {
    acc.wrapping_mul(multiplier).wrapping_add(contribution)
}

fn finish(hasher: DefaultHasher) -> i32 {
    let h = hasher.finish();
    (h ^ (h >> 32)) as i32
}

fn string_hash(s: &str) -> i32 {
    let mut hasher = DefaultHasher::new();
    s.hash(&mut hasher);
    finish(hasher)
}

/// Hash of a scalar, enum or untyped value. Null hashes to zero.
fn scalar_hash(value: &Value) -> i32 {
    let mut hasher = DefaultHasher::new();
    match value {
        Value::Null => return 0,
        Value::Boolean(b) => b.hash(&mut hasher),
        Value::Integer(i) => i.hash(&mut hasher),
        Value::Number(n) => {
            // -0.0 == 0.0, so both must hash alike
            let n = if *n == 0.0 { 0.0 } else { *n };
            n.to_bits().hash(&mut hasher);
        }
        Value::String(s) | Value::Enum(s) => s.hash(&mut hasher),
        Value::DateTime(dt) => {
            dt.timestamp().hash(&mut hasher);
            dt.timestamp_subsec_nanos().hash(&mut hasher);
        }
        Value::Uri(uri) => uri.as_str().hash(&mut hasher),
        Value::Untyped(json) => return json_hash(json),
        Value::List(_) | Value::Map(_) | Value::Record(_) => {
            value.shape().hash(&mut hasher);
        }
    }
    finish(hasher)
}

/// Structural hash of untyped JSON, consistent with `serde_json::Value` equality.
fn json_hash(json: &serde_json::Value) -> i32 {
    use serde_json::Value as Json;

    match json {
        Json::Null => 0,
        Json::Bool(b) => i32::from(*b) + 1,
        Json::Number(n) => string_hash(&n.to_string()),
        Json::String(s) => string_hash(s),
        Json::Array(items) => items
            .iter()
            .fold(HASH_SEED_UNTYPED, |acc, item| fold(acc, 31, json_hash(item))),
        Json::Object(entries) => entries
            .iter()
            .fold(0, |acc, (key, item)| acc ^ string_hash(key) ^ json_hash(item)),
    }
}

const HASH_SEED_UNTYPED: i32 = 7;

fn mismatch(expected: &str, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::TypeMismatch {
        expected: expected.to_string(),
        actual: format!("{} and {}", left.shape(), right.shape()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{HASH_MULTIPLIER, HASH_SEED, HashProgram, PropertySlot, PropertyStep, VisitorProgram};
    use std::collections::HashMap;

    /// Hand-built programs for a `Node { name, tags: List<string>, attrs: Map<string, List<int>>, next: Node }`.
    struct Programs(HashMap<String, RecordProgram>);

    impl ProgramSource for Programs {
        fn record_program(&self, type_name: &str) -> Option<&RecordProgram> {
            self.0.get(type_name)
        }

        fn visitor_program(&self) -> Option<&VisitorProgram> {
            None
        }
    }

    fn node_program() -> RecordProgram {
        let slot = |name: &str, signature: TypeSignature| PropertySlot {
            name: name.to_string(),
            serialized_name: name.to_ascii_lowercase(),
            signature,
            default_value: None,
        };
        RecordProgram {
            type_name: "Node".to_string(),
            slots: vec![
                slot("Name", TypeSignature::Scalar(ScalarKind::String)),
                slot(
                    "Tags",
                    TypeSignature::list(TypeSignature::Scalar(ScalarKind::String)),
                ),
                slot(
                    "Attrs",
                    TypeSignature::map(
                        "string",
                        TypeSignature::list(TypeSignature::Scalar(ScalarKind::Integer)),
                    ),
                ),
                slot("Next", TypeSignature::NamedRecord("Node".to_string())),
            ],
            equality: vec![
                PropertyStep::new("Name", CompareOp::ValueEquals),
                PropertyStep::new("Tags", CompareOp::Collection(Box::new(CompareOp::ValueEquals))),
                PropertyStep::new(
                    "Attrs",
                    CompareOp::Dictionary(Box::new(CompareOp::Collection(Box::new(
                        CompareOp::ValueEquals,
                    )))),
                ),
                PropertyStep::new("Next", CompareOp::StructuralEquals),
            ],
            hash: HashProgram {
                seed: HASH_SEED,
                multiplier: HASH_MULTIPLIER,
                steps: vec![
                    PropertyStep::new("Name", HashOp::ScalarRef),
                    PropertyStep::new("Tags", HashOp::Collection(Box::new(HashOp::ScalarRef))),
                    PropertyStep::new(
                        "Attrs",
                        HashOp::Dictionary(Box::new(HashOp::Collection(Box::new(
                            HashOp::ScalarValue,
                        )))),
                    ),
                    PropertyStep::new("Next", HashOp::ScalarRef),
                ],
            },
            init: Some(vec![
                PropertyStep::new("Name", CloneOp::Assign),
                PropertyStep::new("Tags", CloneOp::Collection(Box::new(CloneOp::Assign))),
                PropertyStep::new(
                    "Attrs",
                    CloneOp::Dictionary(Box::new(CloneOp::Collection(Box::new(CloneOp::Assign)))),
                ),
                PropertyStep::new("Next", CloneOp::Clone("Node".to_string())),
            ]),
        }
    }

    fn programs() -> Programs {
        let mut map = HashMap::new();
        map.insert("Node".to_string(), node_program());
        Programs(map)
    }

    fn sample(model: &ObjectModel<'_, Programs>) -> Record {
        model
            .read_json(
                "Node",
                &serde_json::json!({
                    "name": "root",
                    "tags": ["a", "b"],
                    "attrs": { "x": [1, 2], "y": [3] },
                    "next": { "name": "leaf", "tags": [] }
                }),
            )
            .expect("Failed to read instance")
    }

    #[test]
    fn test_clone_is_equal_with_same_hash() {
        let programs = programs();
        let model = ObjectModel::new(&programs);
        let original = sample(&model);
        let copy = model.copy("Node", Some(&original)).expect("Failed to copy");

        assert!(model.equals(&original, Some(&copy)).expect("Failed to compare"));
        assert_eq!(
            model.hash_code(&original).expect("Failed to hash"),
            model.hash_code(&copy).expect("Failed to hash")
        );
    }

    #[test]
    fn test_list_order_matters() {
        let programs = programs();
        let model = ObjectModel::new(&programs);
        let original = sample(&model);
        let mut reordered = original.clone();
        reordered.set(
            "Tags",
            Value::List(vec![Value::from("b"), Value::from("a")]),
        );

        assert!(!model.equals(&original, Some(&reordered)).expect("Failed to compare"));
    }

    #[test]
    fn test_map_order_does_not_matter() {
        let programs = programs();
        let model = ObjectModel::new(&programs);
        let original = sample(&model);
        let mut reordered = original.clone();
        let mut attrs = IndexMap::new();
        attrs.insert("y".to_string(), Value::List(vec![Value::Integer(3)]));
        attrs.insert(
            "x".to_string(),
            Value::List(vec![Value::Integer(1), Value::Integer(2)]),
        );
        reordered.set("Attrs", Value::Map(attrs));

        assert!(model.equals(&original, Some(&reordered)).expect("Failed to compare"));
        assert_eq!(
            model.hash_code(&original).expect("Failed to hash"),
            model.hash_code(&reordered).expect("Failed to hash")
        );
    }

    #[test]
    fn test_equals_null_argument() {
        let programs = programs();
        let model = ObjectModel::new(&programs);
        let original = sample(&model);
        assert!(!model.equals(&original, None).expect("Failed to compare"));
    }

    #[test]
    fn test_copy_from_null_is_contract_violation() {
        let programs = programs();
        let model = ObjectModel::new(&programs);
        assert!(matches!(
            model.copy("Node", None),
            Err(RuntimeError::NullCopySource { .. })
        ));
    }

    #[test]
    fn test_clone_is_deep() {
        let programs = programs();
        let model = ObjectModel::new(&programs);
        let original = sample(&model);
        let mut copy = model.copy("Node", Some(&original)).expect("Failed to copy");

        if let Value::Record(next) = copy.get_mut("Next") {
            next.set("Name", "changed");
        }
        assert_eq!(
            original.get("Next").as_record().map(|r| r.get("Name").clone()),
            Some(Value::from("leaf"))
        );
        assert!(!model.equals(&original, Some(&copy)).expect("Failed to compare"));
    }

    #[test]
    fn test_uri_clone_keeps_runtime_kind() {
        let programs = programs();
        let model = ObjectModel::new(&programs);
        for text in ["https://example.com", "relative/path"] {
            let source = Value::Uri(UriValue::parse(text));
            let cloned = model.clone_value(&CloneOp::Uri, &source).expect("Failed to clone");
            assert_eq!(cloned, source);
        }
    }

    #[test]
    fn test_construct_arity() {
        let programs = programs();
        let model = ObjectModel::new(&programs);
        assert!(matches!(
            model.construct("Node", &[Value::Null]),
            Err(RuntimeError::ArityMismatch { expected: 4, actual: 1, .. })
        ));
        let record = model
            .construct(
                "Node",
                &[Value::from("n"), Value::Null, Value::Null, Value::Null],
            )
            .expect("Failed to construct");
        assert_eq!(record.get("Name"), &Value::from("n"));
    }

    #[test]
    fn test_construct_default_applies_schema_defaults() {
        let mut program = node_program();
        program.slots[0].default_value = Some(serde_json::json!("unnamed"));
        program.slots[1].default_value = Some(serde_json::json!(["x", "y"]));
        let mut map = HashMap::new();
        map.insert("Node".to_string(), program);
        let programs = Programs(map);
        let model = ObjectModel::new(&programs);

        let record = model.construct_default("Node").expect("Failed to construct");
        assert_eq!(record.get("Name"), &Value::from("unnamed"));
        assert_eq!(
            record.get("Tags"),
            &Value::List(vec![Value::from("x"), Value::from("y")])
        );
        assert!(record.get("Attrs").is_null());
        assert!(record.get("Next").is_null());
    }

    #[test]
    fn test_construct_default_requires_cloning_code() {
        let mut program = node_program();
        program.init = None;
        let mut map = HashMap::new();
        map.insert("Node".to_string(), program);
        let programs = Programs(map);
        let model = ObjectModel::new(&programs);

        assert!(matches!(
            model.construct_default("Node"),
            Err(RuntimeError::CloningNotGenerated { .. })
        ));
    }

    #[test]
    fn test_read_json_rejects_wrong_shape() {
        let programs = programs();
        let model = ObjectModel::new(&programs);
        let result = model.read_json("Node", &serde_json::json!({ "tags": "not-a-list" }));
        match result {
            Err(RuntimeError::InvalidInstance { path, .. }) => assert_eq!(path, "$.tags"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_hash_wraps_instead_of_overflowing() {
        let programs = programs();
        let model = ObjectModel::new(&programs);
        let tags: Vec<Value> = (0..64).map(|i| Value::String(format!("tag-{i}"))).collect();
        let record = Record::new("Node").with("Tags", Value::List(tags));
        model.hash_code(&record).expect("Failed to hash");
    }

    #[test]
    fn test_untyped_hash_matches_equality() {
        let a = serde_json::json!({ "a": 1, "b": [true, null] });
        let b = serde_json::json!({ "b": [true, null], "a": 1 });
        assert_eq!(a, b);
        assert_eq!(json_hash(&a), json_hash(&b));
    }
}
