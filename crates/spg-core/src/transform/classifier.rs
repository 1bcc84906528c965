use indexmap::IndexMap;
use log::debug;

use crate::error::ClassifyError;
use crate::ir::{InputChoice, InputField, InputLocation, InputType};
use crate::parse::operation::Operation;
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::ref_resolve::RefResolver;
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::schema::{Schema, SchemaOrRef, SchemaType};
use crate::parse::spec::OpenApiSpec;

use super::name_normalizer::title_case;

/// `allOf` nesting deeper than this is treated as unclassifiable.
const MAX_ALL_OF_DEPTH: usize = 16;

/// Where a classified input was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOrigin {
    /// Declared on the path item and shared by all of its operations.
    Shared,
    /// Declared on the operation itself.
    Operation,
}

/// An input as yielded by a classifier, before de-duplication and naming.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInput {
    pub upstream_key: String,
    pub location: InputLocation,
    pub origin: InputOrigin,
    pub field: InputField,
}

/// Classifier output, one ordered bucket per location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedInputs {
    pub path: Vec<RawInput>,
    pub query: Vec<RawInput>,
    pub body: Vec<RawInput>,
}

impl ClassifiedInputs {
    fn bucket_mut(&mut self, location: InputLocation) -> &mut Vec<RawInput> {
        match location {
            InputLocation::Path => &mut self.path,
            InputLocation::Query => &mut self.query,
            InputLocation::Body => &mut self.body,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawInput> {
        self.path.iter().chain(&self.query).chain(&self.body)
    }
}

/// Sorts an operation's parameters and body fields into path, query and
/// body inputs and types each of them.
pub trait InputClassifier {
    fn classify(
        &self,
        operation: &Operation,
        shared: &[ParameterOrRef],
    ) -> Result<ClassifiedInputs, ClassifyError>;
}

/// Classifies from the document's parameter and request-body schemas.
///
/// Shared parameters are yielded before the operation's own. Header and
/// cookie parameters are not inputs. Each property of an object request
/// body becomes a body input.
#[derive(Debug, Clone, Copy)]
pub struct SchemaClassifier<'a> {
    resolver: RefResolver<'a>,
}

impl<'a> SchemaClassifier<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            resolver: RefResolver::new(spec),
        }
    }

    fn classify_parameter(
        &self,
        param: &ParameterOrRef,
        origin: InputOrigin,
    ) -> Result<Option<RawInput>, ClassifyError> {
        let param = self
            .resolver
            .resolve(param)
            .map_err(|e| ClassifyError::unresolved(param.display_name(), e))?;

        let location = match param.location {
            ParameterLocation::Path => InputLocation::Path,
            ParameterLocation::Query => InputLocation::Query,
            ParameterLocation::Header | ParameterLocation::Cookie => {
                debug!("skipping {:?} parameter `{}`", param.location, param.name);
                return Ok(None);
            }
        };

        let schema = param
            .schema
            .as_ref()
            .map(|s| self.resolver.resolve(s))
            .transpose()
            .map_err(|e| ClassifyError::unresolved(&param.name, e))?;

        Ok(Some(RawInput {
            upstream_key: param.name.clone(),
            location,
            origin,
            field: parameter_field(param, schema, location),
        }))
    }

    fn classify_body(
        &self,
        body: &RequestBodyOrRef,
        out: &mut Vec<RawInput>,
    ) -> Result<(), ClassifyError> {
        let body = self
            .resolver
            .resolve(body)
            .map_err(|e| ClassifyError::unresolved("requestBody", e))?;

        let Some(schema) = body
            .preferred_media_type()
            .and_then(|media| media.schema.as_ref())
        else {
            return Ok(());
        };

        let mut properties = IndexMap::new();
        let mut required = Vec::new();
        self.collect_properties(schema, &mut properties, &mut required, 0)?;

        if properties.is_empty() {
            debug!("request body has no object properties");
        }

        for (name, property) in properties {
            let schema = self
                .resolver
                .resolve(property)
                .map_err(|e| ClassifyError::unresolved(name.as_str(), e))?;

            let mut field = schema_field(&name, schema);
            field.required = Some(required.contains(&name));
            field.comments = schema.description.clone();
            field.example = schema.example.as_ref().map(value_to_string);

            out.push(RawInput {
                upstream_key: name,
                location: InputLocation::Body,
                origin: InputOrigin::Operation,
                field,
            });
        }
        Ok(())
    }

    /// Gather the properties of an object schema, merging `allOf` members.
    fn collect_properties<'v>(
        &self,
        schema: &'v SchemaOrRef,
        properties: &mut IndexMap<String, &'v SchemaOrRef>,
        required: &mut Vec<String>,
        depth: usize,
    ) -> Result<(), ClassifyError>
    where
        'a: 'v,
    {
        if depth > MAX_ALL_OF_DEPTH {
            return Err(ClassifyError::UnclassifiableParameter {
                name: "requestBody".to_string(),
                reason: "allOf nesting too deep".to_string(),
            });
        }

        let schema = self
            .resolver
            .resolve(schema)
            .map_err(|e| ClassifyError::unresolved("requestBody", e))?;

        if !schema.is_object_like() {
            return Ok(());
        }

        for member in &schema.all_of {
            self.collect_properties(member, properties, required, depth + 1)?;
        }
        for (name, property) in &schema.properties {
            properties.insert(name.clone(), property);
        }
        required.extend(schema.required.iter().cloned());
        Ok(())
    }
}

impl InputClassifier for SchemaClassifier<'_> {
    fn classify(
        &self,
        operation: &Operation,
        shared: &[ParameterOrRef],
    ) -> Result<ClassifiedInputs, ClassifyError> {
        let mut inputs = ClassifiedInputs::default();

        let declared = shared
            .iter()
            .map(|p| (p, InputOrigin::Shared))
            .chain(operation.parameters.iter().map(|p| (p, InputOrigin::Operation)));

        for (param, origin) in declared {
            if let Some(input) = self.classify_parameter(param, origin)? {
                inputs.bucket_mut(input.location).push(input);
            }
        }

        if let Some(body) = &operation.request_body {
            self.classify_body(body, &mut inputs.body)?;
        }

        Ok(inputs)
    }
}

fn parameter_field(param: &Parameter, schema: Option<&Schema>, location: InputLocation) -> InputField {
    let mut field = match schema {
        Some(schema) => schema_field(&param.name, schema),
        None => InputField::new(title_case(&param.name), InputType::String),
    };
    field.required = Some(param.required || location == InputLocation::Path);
    field.comments = param
        .description
        .clone()
        .or_else(|| schema.and_then(|s| s.description.clone()));
    field.example = param
        .example
        .as_ref()
        .or_else(|| schema.and_then(|s| s.example.as_ref()))
        .map(value_to_string);
    field
}

/// Label, type, default and choices derived from a schema.
fn schema_field(name: &str, schema: &Schema) -> InputField {
    let mut field = match schema.primary_type() {
        Some(SchemaType::Boolean) => InputField::new(title_case(name), InputType::Boolean),
        Some(SchemaType::Object | SchemaType::Array) => {
            let mut field = InputField::new(title_case(name), InputType::Code);
            field.language = Some("json".to_string());
            field
        }
        _ => InputField::new(title_case(name), InputType::String),
    };
    field.default = schema.default_value.as_ref().map(value_to_string);
    if !schema.enum_values.is_empty() {
        field.model = Some(
            schema
                .enum_values
                .iter()
                .map(|v| {
                    let value = value_to_string(v);
                    InputChoice {
                        label: value.clone(),
                        value,
                    }
                })
                .collect(),
        );
    }
    field
}

fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
