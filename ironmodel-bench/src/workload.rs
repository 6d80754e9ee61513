//! Synthetic workloads.

use serde_json::{Map, Value, json};

/// A schema of `definitions` chained record types plus its hint document.
///
/// Definition `node{i}` holds a list of `node{i+1}` (wrapping at the end),
/// a string map, a list of integer lists and a shared inline enum.
#[derive(Debug, Clone)]
pub struct Workload {
    /// Number of record definitions.
    pub definitions: usize,
    /// Schema document.
    pub schema: String,
    /// Hint document.
    pub hints: String,
}

impl Workload {
    /// Builds a workload with `definitions` record types.
    #[must_use]
    pub fn new(definitions: usize) -> Self {
        let definitions = definitions.max(1);
        let mut defs = Map::new();
        for i in 0..definitions {
            defs.insert(
                format!("node{i}"),
                json!({
                    "type": "object",
                    "properties": {
                        "label": { "type": "string" },
                        "score": { "type": "number" },
                        "tags": { "type": "object" },
                        "grid": { "type": "array", "items": { "type": "array", "items": { "type": "integer" } } },
                        "level": { "enum": ["low", "medium", "high"] },
                        "children": {
                            "type": "array",
                            "items": { "$ref": format!("#/definitions/node{}", (i + 1) % definitions) }
                        }
                    }
                }),
            );
        }
        let schema = json!({
            "type": "object",
            "properties": {
                "nodes": { "type": "array", "items": { "$ref": "#/definitions/node0" } }
            },
            "definitions": defs,
        });
        let hints = json!({
            "*.tags": [ { "kind": "DictionaryHint" } ],
            "*.level": [ { "kind": "EnumHint", "arguments": { "typeName": "Level" } } ],
        });

        Self {
            definitions,
            schema: schema.to_string(),
            hints: hints.to_string(),
        }
    }

    /// Generated name of definition `index`.
    #[must_use]
    pub fn type_name(&self, index: usize) -> String {
        format!("Node{}", index % self.definitions)
    }
}

/// Builds a `Root` instance whose node trees are `depth` levels deep with
/// `breadth` children per node.
#[must_use]
pub fn synthetic_instance(workload: &Workload, depth: usize, breadth: usize) -> Value {
    let nodes: Vec<Value> = (0..breadth)
        .map(|i| node(workload, 0, depth, breadth, i))
        .collect();
    json!({ "nodes": nodes })
}

fn node(workload: &Workload, index: usize, depth: usize, breadth: usize, ordinal: usize) -> Value {
    let children: Vec<Value> = if depth == 0 {
        Vec::new()
    } else {
        (0..breadth)
            .map(|i| node(workload, (index + 1) % workload.definitions, depth - 1, breadth, i))
            .collect()
    };
    let levels = ["low", "medium", "high"];
    json!({
        "label": format!("{}-{depth}-{ordinal}", workload.type_name(index)),
        "score": ordinal as f64 * 0.5,
        "tags": { "depth": depth.to_string(), "ordinal": ordinal.to_string() },
        "grid": [[ordinal, depth], [breadth]],
        "level": levels[ordinal % levels.len()],
        "children": children,
    })
}
