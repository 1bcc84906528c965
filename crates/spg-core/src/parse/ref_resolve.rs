use super::components::Components;
use super::parameter::{Parameter, ParameterOrRef};
use super::request_body::{RequestBody, RequestBodyOrRef};
use super::schema::{Schema, SchemaOrRef};
use super::spec::OpenApiSpec;
use crate::error::ResolveError;

/// A value that is either inline or a `$ref` into one components section.
pub trait Referable: Sized {
    type Target;

    /// The `#/components/<section>/` the references point into.
    const SECTION: &'static str;

    /// `Ok` with the inline value, `Err` with the reference path.
    fn inline_or_ref(&self) -> Result<&Self::Target, &str>;

    fn lookup<'c>(components: &'c Components, name: &str) -> Option<&'c Self>;
}

impl Referable for ParameterOrRef {
    type Target = Parameter;
    const SECTION: &'static str = "parameters";

    fn inline_or_ref(&self) -> Result<&Parameter, &str> {
        match self {
            ParameterOrRef::Parameter(p) => Ok(p),
            ParameterOrRef::Ref { ref_path } => Err(ref_path),
        }
    }

    fn lookup<'c>(components: &'c Components, name: &str) -> Option<&'c Self> {
        components.parameters.get(name)
    }
}

impl Referable for RequestBodyOrRef {
    type Target = RequestBody;
    const SECTION: &'static str = "requestBodies";

    fn inline_or_ref(&self) -> Result<&RequestBody, &str> {
        match self {
            RequestBodyOrRef::RequestBody(rb) => Ok(rb),
            RequestBodyOrRef::Ref { ref_path } => Err(ref_path),
        }
    }

    fn lookup<'c>(components: &'c Components, name: &str) -> Option<&'c Self> {
        components.request_bodies.get(name)
    }
}

impl Referable for SchemaOrRef {
    type Target = Schema;
    const SECTION: &'static str = "schemas";

    fn inline_or_ref(&self) -> Result<&Schema, &str> {
        match self {
            SchemaOrRef::Schema(s) => Ok(s),
            SchemaOrRef::Ref { ref_path } => Err(ref_path),
        }
    }

    fn lookup<'c>(components: &'c Components, name: &str) -> Option<&'c Self> {
        components.schemas.get(name)
    }
}

/// Follows local `$ref` pointers into the document's components.
/// Resolution is lazy: only the values a caller asks for are visited.
#[derive(Debug, Clone, Copy)]
pub struct RefResolver<'a> {
    components: Option<&'a Components>,
}

impl<'a> RefResolver<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            components: spec.components.as_ref(),
        }
    }

    /// Resolve a value to its inline target, following chains of references.
    pub fn resolve<'v, T: Referable>(&self, value: &'v T) -> Result<&'v T::Target, ResolveError>
    where
        'a: 'v,
    {
        let mut current = value;
        let mut seen: Vec<&'v str> = Vec::new();

        loop {
            let ref_path = match current.inline_or_ref() {
                Ok(target) => return Ok(target),
                Err(ref_path) => ref_path,
            };

            if seen.contains(&ref_path) {
                return Err(ResolveError::CircularRef(ref_path.to_string()));
            }
            seen.push(ref_path);

            let name = component_name(ref_path, T::SECTION)?;
            current = self
                .components
                .and_then(|c| T::lookup(c, &name))
                .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))?;
        }
    }
}

/// Extract the component name from `#/components/<section>/<name>`,
/// decoding JSON Pointer escapes.
fn component_name(ref_path: &str, section: &str) -> Result<String, ResolveError> {
    let prefix = format!("#/components/{section}/");
    let name = ref_path
        .strip_prefix(&prefix)
        .filter(|name| !name.is_empty() && !name.contains('/'))
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    Ok(name.replace("~1", "/").replace("~0", "~"))
}
