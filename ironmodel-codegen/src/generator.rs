//! Generation driver.
//!
//! The [`Generator`] runs one schema to a fixed point:
//! 1. declare every generated name;
//! 2. build the root record, then every non-array definition;
//! 3. drain the queue of additional types discovered along the way;
//! 4. synthesize the rewriting visitor over the complete registry.
//!
//! Any error aborts the run; nothing partial is returned.

use crate::artifacts::{Artifact, GeneratedTypes};
use crate::builder::{AdditionalTypeRequest, TypeModel, TypeModelBuilder};
use crate::enums::EnumSynthesizer;
use crate::error::{CodegenError, Result};
use crate::interfaces::InterfaceSynthesizer;
use crate::names::{DeclaredKind, NameTable};
use crate::naming::to_pascal_case;
use crate::records::RecordSynthesizer;
use crate::registry::TypeRegistry;
use crate::settings::GeneratorSettings;
use crate::visitor::VisitorSynthesizer;
use ironmodel_schema::{ClassNameHint, EnumHint, Hint, HintDictionary, HintError, HintScope, JsonSchema};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Object model generator for one schema.
pub struct Generator<'a> {
    schema: &'a JsonSchema,
    hints: &'a HintDictionary,
    settings: &'a GeneratorSettings,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(
        schema: &'a JsonSchema,
        hints: &'a HintDictionary,
        settings: &'a GeneratorSettings,
    ) -> Self {
        Self {
            schema,
            hints,
            settings,
        }
    }

    /// Generates every type of the schema.
    ///
    /// # Errors
    /// Returns the first `CodegenError` met; the whole run is discarded.
    pub fn generate(&self) -> Result<GeneratedTypes> {
        let names = self.declare_names()?;
        let builder = TypeModelBuilder::new(self.schema, self.hints, &names);
        let mut registry = TypeRegistry::new();
        let mut queue = VecDeque::new();

        let root_name = self.settings.root_class_name.as_str();
        info!(root = root_name, "generating root record");
        let model = builder.build(root_name, root_name, self.schema)?;
        self.register_record(&mut registry, &mut queue, model)?;

        let mut definitions = 0usize;
        for (definition, schema) in self.schema.definitions() {
            let Some((name, kind)) = names.definition(definition) else {
                continue;
            };
            match kind {
                DeclaredKind::Enum => {
                    let hint = self.hints.get::<EnumHint>(&HintScope::Type(definition));
                    let artifact = EnumSynthesizer::new().synthesize(name, hint, schema)?;
                    debug!(enum_name = name, members = artifact.members.len(), "synthesized enum");
                    registry.insert(Artifact::Enum(artifact))?;
                }
                DeclaredKind::Record => {
                    let model = builder.build(definition, name, schema)?;
                    self.register_record(&mut registry, &mut queue, model)?;
                }
            }
            definitions += 1;
        }
        info!(definitions, "generated definitions");

        let drained = self.drain(&mut registry, &mut queue)?;
        info!(additional_types = drained, "drained additional type requests");

        if self.settings.generate_rewriting_visitor {
            let visitor = VisitorSynthesizer::new(self.settings).synthesize(&registry)?;
            info!(
                visitor = %visitor.name,
                node_kinds = visitor.program.node_kinds.len(),
                "generated rewriting visitor"
            );
            registry.insert(Artifact::Visitor(visitor))?;
        }

        info!(types = registry.len(), "generation complete");
        Ok(registry.into_generated())
    }

    /// Declares the root and every non-array definition.
    fn declare_names(&self) -> Result<NameTable> {
        let mut names = NameTable::new();
        names.declare(
            &self.settings.root_class_name,
            DeclaredKind::Record,
            "the root schema",
        )?;

        for (definition, schema) in self.schema.definitions() {
            if schema.is_array_shaped() {
                continue;
            }
            let scope = HintScope::Type(definition);
            if let Some(hint) = self.hints.get::<EnumHint>(&scope) {
                let name = hint
                    .type_name
                    .clone()
                    .unwrap_or_else(|| to_pascal_case(definition));
                names.declare_definition(definition, &name, DeclaredKind::Enum)?;
            } else {
                let name = self
                    .hints
                    .get::<ClassNameHint>(&scope)
                    .map(|h| h.class_name.clone())
                    .unwrap_or_else(|| to_pascal_case(definition));
                names.declare_definition(definition, &name, DeclaredKind::Record)?;
            }
        }

        let root_name = self.settings.root_class_name.as_str();
        let mut records = vec![(root_name, root_name, self.schema)];
        for (definition, schema) in self.schema.definitions() {
            if let Some((name, DeclaredKind::Record)) = names.definition(definition) {
                records.push((definition.as_str(), name, schema));
            }
        }
        let mut hinted = Vec::new();
        for (schema_name, type_name, schema) in records {
            for (property, property_schema) in schema.properties() {
                if property_schema.definition_name()?.is_some() {
                    continue;
                }
                let scopes = [
                    HintScope::property(schema_name, property),
                    HintScope::property(type_name, property),
                ];
                if let Some(enum_name) = self
                    .hints
                    .get_any::<EnumHint>(&scopes)
                    .and_then(|h| h.type_name.clone())
                {
                    hinted.push((enum_name, format!("enum hint on '{type_name}.{property}'")));
                }
            }
        }
        for (enum_name, claimant) in hinted {
            if names.kind_of(&enum_name) == Some(DeclaredKind::Enum) {
                debug!(
                    enum_name = %enum_name,
                    first = names.claimant(&enum_name).unwrap_or_default(),
                    "enum name already declared"
                );
                continue;
            }
            names.declare(&enum_name, DeclaredKind::Enum, &claimant)?;
        }

        Ok(names)
    }

    fn register_record(
        &self,
        registry: &mut TypeRegistry,
        queue: &mut VecDeque<AdditionalTypeRequest>,
        model: TypeModel,
    ) -> Result<()> {
        let synthesizer = RecordSynthesizer::new(self.settings);
        let record = synthesizer.synthesize(&model)?;

        if let Some(hint) = &model.interface {
            let interface = InterfaceSynthesizer::new().synthesize(&record, hint);
            registry.insert(Artifact::Interface(interface))?;
        }
        if self.settings.generate_equality_comparers {
            registry.insert(Artifact::EqualityComparer(synthesizer.comparer(&record)))?;
        }

        debug!(
            record = %record.name,
            properties = record.properties.len(),
            additional_types = model.additional_types.len(),
            "synthesized record"
        );
        registry.insert(Artifact::Record(record))?;
        queue.extend(model.additional_types);
        Ok(())
    }

    /// Synthesizes queued types until the queue is empty.
    fn drain(
        &self,
        registry: &mut TypeRegistry,
        queue: &mut VecDeque<AdditionalTypeRequest>,
    ) -> Result<usize> {
        let mut synthesized = 0;
        while let Some(request) = queue.pop_front() {
            match &request.hint {
                Hint::Enum(hint) => {
                    let name = hint.type_name.as_deref().ok_or_else(|| {
                        HintError::MissingEnumTypeName {
                            scope: request.requested_by.clone(),
                        }
                    })?;
                    let artifact = EnumSynthesizer::new().synthesize(name, Some(hint), &request.schema)?;

                    if registry
                        .enumeration(name)
                        .is_some_and(|existing| existing.same_members(&artifact))
                    {
                        debug!(
                            enum_name = name,
                            requested_by = %request.requested_by,
                            "additional enum already registered"
                        );
                        continue;
                    }
                    debug!(
                        enum_name = name,
                        requested_by = %request.requested_by,
                        "synthesized additional enum"
                    );
                    registry.insert(Artifact::Enum(artifact))?;
                    synthesized += 1;
                }
                other => {
                    return Err(CodegenError::generation(format!(
                        "{} cannot request an additional type (at '{}')",
                        other.kind().name(),
                        request.requested_by
                    )));
                }
            }
        }
        Ok(synthesized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::ArtifactKind;
    use ironmodel_core::{RewriteOp, TypeSignature};
    use ironmodel_schema::parse_schema;

    const SCHEMA: &str = r##"{
        "type": "object",
        "properties": {
            "runs": { "type": "array", "items": { "$ref": "#/definitions/run" } },
            "level": { "$ref": "#/definitions/level" }
        },
        "definitions": {
            "run": {
                "type": "object",
                "properties": {
                    "kind": { "enum": ["a", "b"] },
                    "results": { "$ref": "#/definitions/results" },
                    "parent": { "$ref": "#/definitions/run" },
                    "bag": { "type": "object", "additionalProperties": { "$ref": "#/definitions/run" } }
                }
            },
            "result": {
                "type": "object",
                "properties": {
                    "kind": { "enum": ["a", "b"] }
                }
            },
            "results": { "type": "array", "items": { "$ref": "#/definitions/result" } },
            "level": { "enum": ["note", "error"] }
        }
    }"##;

    const HINTS: &str = r#"{
        "*.kind": [ { "kind": "EnumHint", "arguments": { "typeName": "Kind" } } ],
        "*.bag": [ { "kind": "DictionaryHint" } ],
        "level": [ { "kind": "EnumHint" } ],
        "run": [ { "kind": "InterfaceHint" } ]
    }"#;

    fn generate(settings: &GeneratorSettings, hints: &str) -> Result<GeneratedTypes> {
        let schema = parse_schema(SCHEMA).expect("Failed to parse schema");
        let hints = HintDictionary::from_json_str(hints).expect("Failed to load hints");
        Generator::new(&schema, &hints, settings).generate()
    }

    #[test]
    fn test_generates_every_named_type() {
        let settings = GeneratorSettings::default();
        let generated = generate(&settings, HINTS).expect("Failed to generate");
        let names: Vec<&str> = generated.names().collect();
        assert_eq!(names, ["IRun", "Kind", "Level", "Result", "Root", "Run"]);
        assert!(generated.get("Results").is_none());
        assert_eq!(generated.get("Kind").map(Artifact::kind), Some(ArtifactKind::Enum));
    }

    #[test]
    fn test_wildcard_enum_is_registered_once() {
        let settings = GeneratorSettings::default();
        let generated = generate(&settings, HINTS).expect("Failed to generate");
        let kind = generated.enumeration("Kind").expect("Failed to find enum");
        assert_eq!(kind.members.len(), 2);

        let run = generated.record("Run").expect("Failed to find record");
        let results = run
            .properties
            .iter()
            .find(|p| p.name == "Results")
            .expect("Failed to find property");
        assert_eq!(
            results.signature,
            TypeSignature::list(TypeSignature::NamedRecord("Result".to_string()))
        );
    }

    #[test]
    fn test_conflicting_additional_enum_is_a_collision() {
        let hints = r#"{
            "run.kind": [ { "kind": "EnumHint", "arguments": { "typeName": "Kind" } } ],
            "result.kind": [ { "kind": "EnumHint", "arguments": { "typeName": "Kind", "memberNames": ["X", "Y"] } } ]
        }"#;
        let settings = GeneratorSettings::default();
        assert!(matches!(
            generate(&settings, hints),
            Err(CodegenError::NameCollision { .. })
        ));
    }

    #[test]
    fn test_additional_enum_colliding_with_record() {
        let hints = r#"{ "*.kind": [ { "kind": "EnumHint", "arguments": { "typeName": "Run" } } ] }"#;
        let settings = GeneratorSettings::default();
        match generate(&settings, hints) {
            Err(CodegenError::NameCollision { name, first, second }) => {
                assert_eq!(name, "Run");
                assert_eq!(first, "definition 'run'");
                assert_eq!(second, "enum hint on 'Run.kind'");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_hinted_enum_name_resolves_in_type_hints() {
        let hints = r#"{
            "*.kind": [ { "kind": "EnumHint", "arguments": { "typeName": "Kind" } } ],
            "*.bag": [ { "kind": "DictionaryHint", "arguments": { "valueTypeName": "Kind" } } ],
            "result.parent": [ { "kind": "PropertyTypeHint", "arguments": { "typeName": "Kind" } } ]
        }"#;
        let schema = r##"{
            "type": "object",
            "properties": { "result": { "$ref": "#/definitions/result" } },
            "definitions": {
                "result": {
                    "type": "object",
                    "properties": {
                        "kind": { "enum": ["a", "b"] },
                        "bag": { "type": "object" },
                        "parent": { "type": "string" }
                    }
                }
            }
        }"##;
        let schema = parse_schema(schema).expect("Failed to parse schema");
        let hints = HintDictionary::from_json_str(hints).expect("Failed to load hints");
        let settings = GeneratorSettings::default();
        let generated = Generator::new(&schema, &hints, &settings)
            .generate()
            .expect("Failed to generate");

        let result = generated.record("Result").expect("Failed to find record");
        let signatures: Vec<String> = result
            .properties
            .iter()
            .map(|p| p.signature.to_string())
            .collect();
        assert_eq!(signatures, ["Kind", "Map<string, Kind>", "Kind"]);
        assert!(generated.enumeration("Kind").is_some());
    }

    #[test]
    fn test_class_name_collision() {
        let hints = r#"{ "result": [ { "kind": "ClassNameHint", "arguments": { "className": "Run" } } ] }"#;
        let settings = GeneratorSettings::default();
        match generate(&settings, hints) {
            Err(CodegenError::NameCollision { name, first, second }) => {
                assert_eq!(name, "Run");
                assert_eq!(first, "definition 'run'");
                assert_eq!(second, "definition 'result'");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_root_class_name_collision() {
        let settings = GeneratorSettings::default().root_class_name("Run");
        assert!(matches!(
            generate(&settings, "{}"),
            Err(CodegenError::NameCollision { .. })
        ));
    }

    #[test]
    fn test_visitor_and_comparers() {
        let settings = GeneratorSettings::default()
            .generate_rewriting_visitor(true)
            .generate_equality_comparers(true);
        let generated = generate(&settings, HINTS).expect("Failed to generate");

        assert!(generated.get("RunEqualityComparer").is_some());
        let visitor = generated.visitor().expect("Failed to find visitor");
        assert_eq!(visitor.name, "RootRewritingVisitor");

        let kinds: Vec<(u32, &str)> = visitor
            .program
            .node_kinds
            .iter()
            .map(|k| (k.tag, k.type_name.as_str()))
            .collect();
        assert_eq!(kinds, [(0, "Result"), (1, "Root"), (2, "Run")]);

        let run_kind = visitor.program.kind_of("Run").expect("Failed to find kind");
        let method = visitor.program.method(run_kind).expect("Failed to find method");
        assert_eq!(method.method_name, "VisitRun");
        let rewritten: Vec<&str> = method.rewrites.iter().map(|s| s.property.as_str()).collect();
        // enums, maps and scalars are not rewritten
        assert_eq!(rewritten, ["Results", "Parent"]);
        assert_eq!(
            method.rewrites[0].op,
            RewriteOp::EachElement(Box::new(RewriteOp::Dispatch))
        );
    }

    #[test]
    fn test_unsupported_request_kind() {
        let settings = GeneratorSettings::default();
        let schema = parse_schema(SCHEMA).expect("Failed to parse schema");
        let hints = HintDictionary::new();
        let generator = Generator::new(&schema, &hints, &settings);
        let mut registry = TypeRegistry::new();
        let mut queue = VecDeque::from([AdditionalTypeRequest {
            hint: Hint::Dictionary(ironmodel_schema::DictionaryHint::default()),
            schema: JsonSchema::default(),
            requested_by: "Root.bag".to_string(),
        }]);
        assert!(matches!(
            generator.drain(&mut registry, &mut queue),
            Err(CodegenError::Generation { .. })
        ));
    }
}
