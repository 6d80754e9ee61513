//! End-to-end properties of generated object models.

use ironmodel::prelude::*;
use serde_json::json;

const LOG_SCHEMA: &str = r##"{
    "type": "object",
    "properties": {
        "name": { "type": "string" },
        "runs": { "type": "array", "items": { "$ref": "#/definitions/run" } },
        "tags": { "type": "object" },
        "started": { "type": "string", "format": "date-time" },
        "home": { "type": "string", "format": "uri" }
    },
    "definitions": {
        "run": {
            "type": "object",
            "properties": {
                "tool": { "type": "string" },
                "results": { "type": "array", "items": { "$ref": "#/definitions/result" } },
                "children": { "type": "array", "items": { "$ref": "#/definitions/run" } },
                "matrix": { "type": "array", "items": { "type": "array", "items": { "type": "integer" } } },
                "artifacts": {
                    "type": "object",
                    "additionalProperties": { "$ref": "#/definitions/result" }
                }
            }
        },
        "result": {
            "type": "object",
            "properties": {
                "message": { "type": "string" },
                "rank": { "type": "number" },
                "level": { "enum": ["note", "warning", "error"] }
            }
        }
    }
}"##;

const LOG_HINTS: &str = r#"{
    "Root.tags": [ { "kind": "DictionaryHint" } ],
    "run.artifacts": [ { "kind": "DictionaryHint" } ],
    "result.level": [ { "kind": "EnumHint", "arguments": { "typeName": "Level" } } ]
}"#;

fn log_types() -> GeneratedTypes {
    let settings = GeneratorSettings::default()
        .generate_rewriting_visitor(true)
        .generate_equality_comparers(true);
    generate_from_json(LOG_SCHEMA, LOG_HINTS, &settings).expect("Failed to generate")
}

fn sample_log() -> serde_json::Value {
    json!({
        "name": "nightly",
        "started": "2024-03-01T12:00:00Z",
        "home": "https://example.com/tools",
        "tags": { "branch": "main", "owner": "ci" },
        "runs": [
            {
                "tool": "lint",
                "results": [
                    { "message": "unused", "rank": 0.5, "level": "warning" },
                    { "message": "broken", "rank": 1.0, "level": "error" }
                ],
                "matrix": [[1, 2], [3]],
                "artifacts": {
                    "a.log": { "message": "first" },
                    "b.log": { "message": "second", "level": "note" }
                },
                "children": [ { "tool": "nested", "results": [] } ]
            },
            { "tool": "test" }
        ]
    })
}

#[test]
fn test_clone_is_equal_with_same_hash() {
    let types = log_types();
    let model = ObjectModel::new(&types);
    let log = model
        .read_json("Root", &sample_log())
        .expect("Failed to read instance");

    let copy = model.copy("Root", Some(&log)).expect("Failed to copy");
    assert!(model.equals(&log, Some(&copy)).expect("Failed to compare"));
    assert_eq!(
        model.hash_code(&log).expect("Failed to hash"),
        model.hash_code(&copy).expect("Failed to hash")
    );

    for run in log.get("Runs").as_list().expect("Failed to find runs") {
        let run = run.as_record().expect("Failed to read run");
        let copy = model.copy("Run", Some(run)).expect("Failed to copy run");
        assert!(model.equals(run, Some(&copy)).expect("Failed to compare"));
        assert_eq!(
            model.hash_code(run).expect("Failed to hash"),
            model.hash_code(&copy).expect("Failed to hash")
        );
    }
}

#[test]
fn test_clone_is_deep() {
    let types = log_types();
    let model = ObjectModel::new(&types);
    let log = model
        .read_json("Root", &sample_log())
        .expect("Failed to read instance");

    let mut copy = model.copy("Root", Some(&log)).expect("Failed to copy");
    if let Value::List(runs) = copy.get_mut("Runs") {
        if let Some(Value::Record(run)) = runs.first_mut() {
            run.set("Tool", "format");
        }
    }
    assert!(!model.equals(&log, Some(&copy)).expect("Failed to compare"));

    let original = log.get("Runs").as_list().expect("Failed to find runs")[0]
        .as_record()
        .expect("Failed to read run");
    assert_eq!(original.get("Tool"), &Value::from("lint"));
}

#[test]
fn test_list_order_matters() {
    let types = log_types();
    let model = ObjectModel::new(&types);
    let mut reordered = sample_log();
    reordered["runs"]
        .as_array_mut()
        .expect("Failed to find runs")
        .reverse();

    let log = model
        .read_json("Root", &sample_log())
        .expect("Failed to read instance");
    let other = model
        .read_json("Root", &reordered)
        .expect("Failed to read instance");
    assert!(!model.equals(&log, Some(&other)).expect("Failed to compare"));
}

#[test]
fn test_map_order_does_not_matter() {
    let types = log_types();
    let model = ObjectModel::new(&types);
    let mut reordered = sample_log();
    reordered["tags"] = json!({ "owner": "ci", "branch": "main" });
    reordered["runs"][0]["artifacts"] = json!({
        "b.log": { "message": "second", "level": "note" },
        "a.log": { "message": "first" }
    });

    let log = model
        .read_json("Root", &sample_log())
        .expect("Failed to read instance");
    let other = model
        .read_json("Root", &reordered)
        .expect("Failed to read instance");
    assert!(model.equals(&log, Some(&other)).expect("Failed to compare"));
    assert_eq!(
        model.hash_code(&log).expect("Failed to hash"),
        model.hash_code(&other).expect("Failed to hash")
    );
}

#[test]
fn test_map_values_compare_structurally() {
    let types = log_types();
    let model = ObjectModel::new(&types);
    let mut changed = sample_log();
    changed["runs"][0]["artifacts"]["a.log"]["message"] = json!("changed");

    let log = model
        .read_json("Root", &sample_log())
        .expect("Failed to read instance");
    let other = model
        .read_json("Root", &changed)
        .expect("Failed to read instance");
    assert!(!model.equals(&log, Some(&other)).expect("Failed to compare"));
}

#[test]
fn test_equal_instances_hash_equal() {
    let types = log_types();
    let model = ObjectModel::new(&types);
    let left = model
        .read_json("Root", &sample_log())
        .expect("Failed to read instance");
    let right = model
        .read_json("Root", &sample_log())
        .expect("Failed to read instance");

    assert!(model.equals(&left, Some(&right)).expect("Failed to compare"));
    assert_eq!(
        model.hash_code(&left).expect("Failed to hash"),
        model.hash_code(&right).expect("Failed to hash")
    );
    assert!(!model.equals(&left, None).expect("Failed to compare"));
}

#[test]
fn test_dictionary_typing() {
    let types = log_types();
    let root = types.record("Root").expect("Failed to find record");
    let tags = root
        .properties
        .iter()
        .find(|p| p.name == "Tags")
        .expect("Failed to find property");
    assert_eq!(tags.signature.to_string(), "Map<string, string>");

    let run = types.record("Run").expect("Failed to find record");
    let artifacts = run
        .properties
        .iter()
        .find(|p| p.name == "Artifacts")
        .expect("Failed to find property");
    assert_eq!(artifacts.signature.to_string(), "Map<string, Result>");
}

#[test]
fn test_flags_enum() {
    let schema = r#"{
        "type": "object",
        "properties": { "access": { "enum": ["read", "write", "execute"] } }
    }"#;
    let hints = r#"{
        "Root.access": [
            { "kind": "EnumHint", "arguments": { "typeName": "Permissions", "flags": true, "zeroValueName": "none" } }
        ]
    }"#;
    let types = generate_from_json(schema, hints, &GeneratorSettings::default())
        .expect("Failed to generate");

    let permissions = types
        .enumeration("Permissions")
        .expect("Failed to find enum");
    assert!(permissions.flags);
    let members: Vec<(&str, Option<i64>)> = permissions
        .members
        .iter()
        .map(|m| (m.name.as_str(), m.value))
        .collect();
    assert_eq!(
        members,
        [
            ("None", None),
            ("Read", Some(1)),
            ("Write", Some(2)),
            ("Execute", Some(4))
        ]
    );
}

#[test]
fn test_enum_member_count_mismatch() {
    let schema = r#"{
        "type": "object",
        "properties": { "access": { "enum": ["read", "write", "execute"] } }
    }"#;
    let hints = r#"{
        "Root.access": [
            { "kind": "EnumHint", "arguments": { "typeName": "Access", "memberNames": ["R", "W", "X", "D"] } }
        ]
    }"#;
    let result = generate_from_json(schema, hints, &GeneratorSettings::default());
    assert!(matches!(
        result,
        Err(CodegenError::Hint(HintError::MemberCountMismatch {
            expected: 3,
            actual: 4,
            ..
        }))
    ));
}

#[test]
fn test_wildcard_hint_applies_to_every_type() {
    let schema = r##"{
        "type": "object",
        "properties": {
            "Properties": { "type": "object" },
            "node": { "$ref": "#/definitions/node" }
        },
        "definitions": {
            "node": {
                "type": "object",
                "properties": { "Properties": { "type": "object" } }
            }
        }
    }"##;
    let hints = r#"{
        "*.Properties": [ { "kind": "DictionaryHint", "arguments": { "valueTypeName": "integer" } } ]
    }"#;
    let types = generate_from_json(schema, hints, &GeneratorSettings::default())
        .expect("Failed to generate");

    let signature = |record: &str| {
        types
            .record(record)
            .expect("Failed to find record")
            .properties
            .iter()
            .find(|p| p.name == "Properties")
            .map(|p| p.signature.to_string())
            .expect("Failed to find property")
    };
    assert_eq!(signature("Root"), "Map<string, integer>");
    assert_eq!(signature("Node"), signature("Root"));
}

/// Replaces every labeled record it enters with a relabeled copy, recording the visit order.
#[derive(Default)]
struct Relabel {
    seen: Vec<String>,
}

impl VisitHook for Relabel {
    fn enter(&mut self, _kind: &NodeKind, mut node: Record) -> Record {
        if let Value::String(label) = node.get("Label") {
            self.seen.push(label.clone());
            let relabeled = format!("{label}!");
            node.set("Label", relabeled.as_str());
        }
        node
    }
}

#[test]
fn test_visitor_visits_each_element_once() {
    let schema = r##"{
        "type": "object",
        "properties": {
            "label": { "type": "string" },
            "children": { "type": "array", "items": { "$ref": "#/definitions/node" } }
        },
        "definitions": {
            "node": {
                "type": "object",
                "properties": {
                    "label": { "type": "string" },
                    "children": { "type": "array", "items": { "$ref": "#/definitions/node" } }
                }
            }
        }
    }"##;
    let settings = GeneratorSettings::default().generate_rewriting_visitor(true);
    let types = generate_from_json(schema, "{}", &settings).expect("Failed to generate");

    let model = ObjectModel::new(&types);
    let tree = model
        .read_json(
            "Root",
            &json!({
                "label": "a",
                "children": [
                    { "label": "b", "children": [ { "label": "c" } ] },
                    { "label": "d" },
                    { "label": "e" }
                ]
            }),
        )
        .expect("Failed to read instance");

    let mut visitor = RewritingVisitor::new(&types, Relabel::default())
        .expect("Failed to create visitor");
    let rewritten = visitor
        .visit(Value::from(tree))
        .expect("Failed to visit");
    assert_eq!(visitor.hook().seen, ["a", "b", "c", "d", "e"]);

    let root = rewritten.as_record().expect("Failed to read root");
    assert_eq!(root.get("Label"), &Value::from("a!"));
    let children = root.get("Children").as_list().expect("Failed to find children");
    assert_eq!(children.len(), 3);
    let labels: Vec<&Value> = children
        .iter()
        .filter_map(Value::as_record)
        .map(|child| child.get("Label"))
        .collect();
    assert_eq!(
        labels,
        [&Value::from("b!"), &Value::from("d!"), &Value::from("e!")]
    );
}

const DEFAULTS_SCHEMA: &str = r#"{
    "type": "object",
    "properties": {
        "n": { "type": "integer", "default": 3 },
        "mode": { "type": "string", "default": "fast" },
        "note": { "type": "string" }
    }
}"#;

#[test]
fn test_default_constructor_applies_schema_defaults() {
    let types = generate_from_json(DEFAULTS_SCHEMA, "{}", &GeneratorSettings::default())
        .expect("Failed to generate");
    let model = ObjectModel::new(&types);

    let record = model
        .construct_default("Root")
        .expect("Failed to construct");
    assert_eq!(record.get("N"), &Value::Integer(3));
    assert_eq!(record.get("Mode"), &Value::from("fast"));
    assert!(record.get("Note").is_null());
}

#[test]
fn test_default_constructor_without_cloning_code() {
    let settings = GeneratorSettings::default().generate_cloning_code(false);
    let types =
        generate_from_json(DEFAULTS_SCHEMA, "{}", &settings).expect("Failed to generate");
    let model = ObjectModel::new(&types);

    assert!(matches!(
        model.construct_default("Root"),
        Err(RuntimeError::CloningNotGenerated { .. })
    ));
}

#[test]
fn test_identity_visit_returns_equal_record() {
    let types = log_types();
    let model = ObjectModel::new(&types);
    let log = model
        .read_json("Root", &sample_log())
        .expect("Failed to read instance");
    let sparse = Record::new("Root").with("Name", "sparse");

    let mut visitor = RewritingVisitor::new(&types, IdentityHook).expect("Failed to create visitor");
    for record in [log, sparse] {
        let visited = visitor
            .visit(Value::from(record.clone()))
            .expect("Failed to visit");
        assert_eq!(visited, Value::from(record));
    }
}
