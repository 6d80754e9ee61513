//! Type model construction.
//!
//! The [`TypeModelBuilder`] turns one record-shaped schema node into a
//! [`TypeModel`]: a descriptor per property in declaration order, a
//! descriptor per nesting layer below each property, and any additional types
//! the record needs (inline enumerations).

use crate::descriptor::TypeDescriptor;
use crate::error::{CodegenError, Result};
use crate::names::{DeclaredKind, NameTable};
use crate::naming::{element_key, interface_name, to_pascal_case, value_key};
use indexmap::IndexMap;
use ironmodel_core::{ScalarKind, TypeSignature};
use ironmodel_schema::{
    AdditionalProperties, AttributeHint, BaseTypeHint, DictionaryHint, EnumHint, Hint,
    HintDictionary, HintScope, InterfaceHint, JsonSchema, PropertyHint, PropertyModifiersHint,
    PropertyNameHint, PropertyTypeHint, SchemaError, SchemaType,
};
use serde::Serialize;
use tracing::{debug, trace};

/// Structural capabilities a record declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// Base types from a `BaseTypeHint`.
    pub base_type_names: Vec<String>,
    /// Interfaces the record implements.
    pub interface_names: Vec<String>,
}

/// A type discovered while building another one.
#[derive(Debug, Clone, PartialEq)]
pub struct AdditionalTypeRequest {
    /// Hint describing the type.
    pub hint: Hint,
    /// Schema node the type is built from.
    pub schema: JsonSchema,
    /// Scope that raised the request.
    pub requested_by: String,
}

/// Inferred model of one record.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeModel {
    /// Generated record name.
    pub type_name: String,
    /// Definition name, or the root class name for the root.
    pub schema_name: String,
    /// Description from the schema.
    pub description: Option<String>,
    /// Property descriptors keyed by generated name, in declaration order.
    pub properties: IndexMap<String, TypeDescriptor>,
    /// Layer descriptors keyed by synthetic key (`"Prop[]"`, `"Prop{}"`, ...).
    pub layers: IndexMap<String, TypeDescriptor>,
    /// Types this record needs that are not yet declared.
    pub additional_types: Vec<AdditionalTypeRequest>,
    /// Base types and interfaces.
    pub capabilities: Capabilities,
    /// Interface requested by a type-level `InterfaceHint`.
    pub interface: Option<InterfaceHint>,
}

impl TypeModel {
    /// Returns the descriptor of a property or layer key.
    #[must_use]
    pub fn descriptor(&self, key: &str) -> Option<&TypeDescriptor> {
        self.properties.get(key).or_else(|| self.layers.get(key))
    }
}

/// Where a property lives.
struct Site<'s> {
    schema_name: &'s str,
    type_name: &'s str,
    property: &'s str,
    order: usize,
}

impl Site<'_> {
    fn scopes(&self) -> [HintScope<'_>; 2] {
        [
            HintScope::property(self.schema_name, self.property),
            HintScope::property(self.type_name, self.property),
        ]
    }

    fn scope(&self) -> String {
        format!("{}.{}", self.type_name, self.property)
    }

    fn shape_error(&self, message: impl Into<String>) -> CodegenError {
        CodegenError::schema_shape(self.type_name, self.property, message)
    }
}

/// Builds [`TypeModel`]s.
pub struct TypeModelBuilder<'a> {
    root: &'a JsonSchema,
    hints: &'a HintDictionary,
    names: &'a NameTable,
}

impl<'a> TypeModelBuilder<'a> {
    /// Creates a builder.
    ///
    /// `root` supplies the definitions `$ref`s point into and `names` every
    /// generated name already declared.
    #[must_use]
    pub fn new(root: &'a JsonSchema, hints: &'a HintDictionary, names: &'a NameTable) -> Self {
        Self { root, hints, names }
    }

    /// Builds the model of the record `type_name` from `schema`.
    ///
    /// # Errors
    /// Returns `CodegenError` if a property cannot be classified, a hint is
    /// misconfigured, or two properties resolve to one generated name.
    pub fn build(&self, schema_name: &str, type_name: &str, schema: &JsonSchema) -> Result<TypeModel> {
        let type_scopes = [HintScope::Type(schema_name), HintScope::Type(type_name)];

        let mut capabilities = Capabilities::default();
        if let Some(hint) = self.hints.get_any::<BaseTypeHint>(&type_scopes) {
            capabilities.base_type_names = hint.base_type_names.clone();
        }
        let interface = self.hints.get_any::<InterfaceHint>(&type_scopes).cloned();
        if interface.is_some() {
            capabilities.interface_names.push(interface_name(type_name));
        }

        let mut model = TypeModel {
            type_name: type_name.to_string(),
            schema_name: schema_name.to_string(),
            description: schema.description.clone(),
            properties: IndexMap::new(),
            layers: IndexMap::new(),
            additional_types: Vec::new(),
            capabilities,
            interface,
        };

        for (order, (property, property_schema)) in schema.properties().enumerate() {
            let site = Site {
                schema_name,
                type_name,
                property: property.as_str(),
                order,
            };
            let descriptor = self.build_property(&mut model, &site, schema, property_schema)?;

            if let Some(existing) = model.properties.get(&descriptor.name) {
                return Err(CodegenError::name_collision(
                    format!("{type_name}.{}", descriptor.name),
                    format!("property '{}'", existing.serialized_name),
                    format!("property '{property}'"),
                ));
            }
            model.properties.insert(descriptor.name.clone(), descriptor);
        }

        Ok(model)
    }

    fn build_property(
        &self,
        model: &mut TypeModel,
        site: &Site<'_>,
        parent: &JsonSchema,
        schema: &JsonSchema,
    ) -> Result<TypeDescriptor> {
        let scopes = site.scopes();
        let combined = self.hints.get_any::<PropertyHint>(&scopes);

        let name = self
            .hints
            .get_any::<PropertyNameHint>(&scopes)
            .map(|h| h.name.clone())
            .or_else(|| combined.and_then(|h| h.name.clone()))
            .unwrap_or_else(|| to_pascal_case(site.property));
        let type_override = self
            .hints
            .get_any::<PropertyTypeHint>(&scopes)
            .map(|h| h.type_name.as_str())
            .or_else(|| combined.and_then(|h| h.type_name.as_deref()));
        let modifiers = self
            .hints
            .get_any::<PropertyModifiersHint>(&scopes)
            .map(|h| h.modifiers.clone())
            .or_else(|| combined.map(|h| h.modifiers.clone()))
            .unwrap_or_default();
        let attributes: Vec<AttributeHint> = self
            .hints
            .get_any::<AttributeHint>(&scopes)
            .cloned()
            .into_iter()
            .collect();

        let signature = match type_override {
            Some(type_name) => self.resolve_type_name(type_name, site)?,
            None => {
                let mut inlined = Vec::new();
                self.infer(model, site, &name, schema, true, &mut inlined)?
            }
        };
        trace!(
            type_name = site.type_name,
            property = site.property,
            signature = %signature,
            "inferred property signature"
        );

        let mut descriptor = TypeDescriptor::new(name, site.property, signature, site.order);
        descriptor.description = schema.description.clone();
        descriptor.is_required = parent.is_required(site.property);
        descriptor.default_value = schema.default.clone();
        descriptor.modifiers = modifiers;
        descriptor.attributes = attributes;
        Ok(descriptor)
    }

    /// Infers the signature of the layer at `key`.
    ///
    /// `through_lists` is true at the property itself and below list layers;
    /// property-scoped enum and dictionary hints apply only there.
    fn infer(
        &self,
        model: &mut TypeModel,
        site: &Site<'_>,
        key: &str,
        schema: &JsonSchema,
        through_lists: bool,
        inlined: &mut Vec<String>,
    ) -> Result<TypeSignature> {
        if let Some(definition) = schema.definition_name()? {
            return self.infer_reference(model, site, key, definition, through_lists, inlined);
        }

        let types = schema.non_null_types();

        if through_lists && !schema.is_array_shaped() {
            if let Some(hint) = self.hints.get_any::<EnumHint>(&site.scopes()) {
                let type_name = hint
                    .type_name
                    .clone()
                    .ok_or_else(|| ironmodel_schema::HintError::MissingEnumTypeName {
                        scope: site.scope(),
                    })?;
                debug!(
                    scope = %site.scope(),
                    enum_name = %type_name,
                    "queued additional enum type"
                );
                model.additional_types.push(AdditionalTypeRequest {
                    hint: Hint::Enum(hint.clone()),
                    schema: schema.clone(),
                    requested_by: site.scope(),
                });
                return Ok(TypeSignature::NamedEnum(type_name));
            }
        }

        if types == [SchemaType::String] {
            match schema.format.as_deref() {
                Some("date-time") => return Ok(TypeSignature::Scalar(ScalarKind::DateTime)),
                Some("uri" | "uri-reference") => return Ok(TypeSignature::Scalar(ScalarKind::Uri)),
                _ => {}
            }
        }

        if through_lists && types == [SchemaType::Object] && !schema.has_properties() {
            if let Some(hint) = self.hints.get_any::<DictionaryHint>(&site.scopes()) {
                return self.infer_map(model, site, key, schema, hint, inlined);
            }
        }

        let signature = match types.as_slice() {
            [] => literal_signature(schema),
            [SchemaType::Boolean] => TypeSignature::Scalar(ScalarKind::Boolean),
            [SchemaType::Integer] => TypeSignature::Scalar(ScalarKind::Integer),
            [SchemaType::Number] => TypeSignature::Scalar(ScalarKind::Number),
            [SchemaType::String] => TypeSignature::Scalar(ScalarKind::String),
            [SchemaType::Object] => TypeSignature::UntypedObject,
            [SchemaType::Array] => {
                let element_key = element_key(key);
                let element = match schema.items.as_deref() {
                    Some(items) => self.infer(model, site, &element_key, items, through_lists, inlined)?,
                    None => TypeSignature::UntypedObject,
                };
                self.register_layer(model, site, element_key, element.clone());
                TypeSignature::list(element)
            }
            [SchemaType::Null] => TypeSignature::UntypedObject,
            many => {
                let names: Vec<&str> = many.iter().map(|t| t.keyword()).collect();
                return Err(site.shape_error(format!(
                    "multiple non-null types are not supported: [{}]",
                    names.join(", ")
                )));
            }
        };

        Ok(signature)
    }

    fn infer_reference(
        &self,
        model: &mut TypeModel,
        site: &Site<'_>,
        key: &str,
        definition: &str,
        through_lists: bool,
        inlined: &mut Vec<String>,
    ) -> Result<TypeSignature> {
        match self.names.definition(definition) {
            Some((name, DeclaredKind::Record)) => Ok(TypeSignature::NamedRecord(name.to_string())),
            Some((name, DeclaredKind::Enum)) => Ok(TypeSignature::NamedEnum(name.to_string())),
            None => {
                let target = self.root.definition(definition).ok_or_else(|| {
                    SchemaError::UnknownDefinition {
                        name: definition.to_string(),
                    }
                })?;
                if !target.is_array_shaped() {
                    return Err(CodegenError::generation(format!(
                        "definition '{definition}' has no declared name"
                    )));
                }
                if inlined.iter().any(|d| d == definition) {
                    return Err(site.shape_error(format!(
                        "array definitions reference each other in a cycle through '{definition}'"
                    )));
                }

                inlined.push(definition.to_string());
                let signature = self.infer(model, site, key, target, through_lists, inlined);
                inlined.pop();
                signature
            }
        }
    }

    fn infer_map(
        &self,
        model: &mut TypeModel,
        site: &Site<'_>,
        key: &str,
        schema: &JsonSchema,
        hint: &DictionaryHint,
        inlined: &mut Vec<String>,
    ) -> Result<TypeSignature> {
        let key_type_name = hint.key_type_name.as_deref().unwrap_or("string");
        let value_key = value_key(key);

        let value = match (&hint.value_type_name, &schema.additional_properties) {
            (Some(type_name), _) => self.resolve_type_name(type_name, site)?,
            // a bare `true` or `false` carries no value schema
            (None, None | Some(AdditionalProperties::Allowed(_))) => {
                TypeSignature::Scalar(ScalarKind::String)
            }
            (None, Some(AdditionalProperties::Schema(value_schema))) => {
                self.infer(model, site, &value_key, value_schema, false, inlined)?
            }
        };

        self.register_layer(model, site, value_key, value.clone());
        Ok(TypeSignature::map(key_type_name, value))
    }

    fn register_layer(
        &self,
        model: &mut TypeModel,
        site: &Site<'_>,
        key: String,
        signature: TypeSignature,
    ) {
        let descriptor = TypeDescriptor::new(key.clone(), site.property, signature, site.order);
        model.layers.insert(key, descriptor);
    }

    /// Resolves a type name written in a property or dictionary hint.
    fn resolve_type_name(&self, type_name: &str, site: &Site<'_>) -> Result<TypeSignature> {
        if let Some(kind) = ScalarKind::from_type_name(type_name) {
            return Ok(TypeSignature::Scalar(kind));
        }
        if type_name == "object" {
            return Ok(TypeSignature::UntypedObject);
        }
        match self.names.kind_of(type_name) {
            Some(DeclaredKind::Record) => Ok(TypeSignature::NamedRecord(type_name.to_string())),
            Some(DeclaredKind::Enum) => Ok(TypeSignature::NamedEnum(type_name.to_string())),
            None => Err(ironmodel_schema::HintError::UnknownPropertyType {
                scope: site.scope(),
                type_name: type_name.to_string(),
            }
            .into()),
        }
    }
}

/// Signature of an untyped node: the common type of its `enum` literals.
///
/// Integer literals mixed with other numbers widen to number; any other
/// disagreement, or no literals at all, is an untyped object.
fn literal_signature(schema: &JsonSchema) -> TypeSignature {
    let Some(literals) = &schema.enum_values else {
        return TypeSignature::UntypedObject;
    };

    let mut common: Option<SchemaType> = None;
    for literal in literals {
        let literal_type = SchemaType::of_literal(literal);
        if literal_type == SchemaType::Null {
            continue;
        }
        common = match (common, literal_type) {
            (None, t) => Some(t),
            (Some(a), b) if a == b => Some(a),
            (Some(SchemaType::Integer), SchemaType::Number)
            | (Some(SchemaType::Number), SchemaType::Integer) => Some(SchemaType::Number),
            _ => return TypeSignature::UntypedObject,
        };
    }

    match common {
        Some(SchemaType::Boolean) => TypeSignature::Scalar(ScalarKind::Boolean),
        Some(SchemaType::Integer) => TypeSignature::Scalar(ScalarKind::Integer),
        Some(SchemaType::Number) => TypeSignature::Scalar(ScalarKind::Number),
        Some(SchemaType::String) => TypeSignature::Scalar(ScalarKind::String),
        _ => TypeSignature::UntypedObject,
    }
}
