use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;

use spg_core::ir::{HttpVerb, Input, InputField, InputType, group_tag};
use spg_core::parse::operation::{Operation, PathItem};
use spg_core::parse::parameter::ParameterOrRef;
use spg_core::transform::name_normalizer::{sanitize, title_case};
use spg_core::transform::{InputClassifier, partition};

use crate::codegen::{Decl, Expr, Prop, PropKey};
use crate::error::GenerateError;
use crate::perform::{PerformTemplate, build_perform};

/// Input keys owned by the action itself; operation inputs never take them.
pub const RESERVED_INPUT_KEYS: &[&str] = &["connection"];

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_INPUT_KEYS.contains(&key)
}

const CONNECTION_INPUT_KEY: &str = "connection";

const FALLBACK_DESCRIPTION: &str = "TODO: Description";

/// One platform action synthesized from an API operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    /// The operation's `operationId`.
    pub key: String,
    pub group_tag: String,
    pub display: ActionDisplay,
    pub inputs: IndexMap<String, ActionInput>,
    pub perform: PerformTemplate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDisplay {
    pub label: String,
    pub description: String,
}

/// An entry of an action's inputs map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionInput {
    /// The fixed `connection` input every action takes.
    Connection(InputField),
    Operation(Input),
}

impl ActionInput {
    pub fn field(&self) -> &InputField {
        match self {
            ActionInput::Connection(field) => field,
            ActionInput::Operation(input) => &input.field,
        }
    }
}

impl ActionDescriptor {
    /// Identifier the action is declared under in emitted code.
    pub fn declaration_name(&self) -> String {
        sanitize(&self.key)
    }
}

fn connection_input() -> InputField {
    let mut field = InputField::new("Connection", InputType::Connection);
    field.required = Some(true);
    field
}

/// Assemble the action for `verb` on `path`.
pub fn assemble<C>(
    path: &str,
    verb: HttpVerb,
    operation: &Operation,
    shared: &[ParameterOrRef],
    classifier: &C,
) -> Result<ActionDescriptor, GenerateError>
where
    C: InputClassifier + ?Sized,
{
    let key = operation
        .operation_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| GenerateError::MissingOperationIdentifier {
            path: path.to_string(),
            verb,
        })?;

    let mut partitioned =
        partition(operation, shared, classifier).map_err(|source| GenerateError::Classify {
            path: path.to_string(),
            verb,
            source,
        })?;
    for bucket in [
        &mut partitioned.path,
        &mut partitioned.query,
        &mut partitioned.body,
    ] {
        bucket.retain(|input| {
            let reserved = is_reserved_key(&input.key);
            if reserved {
                warn!(
                    "{verb} {path}: input `{}` uses reserved key `{}`, dropping it",
                    input.upstream_key, input.key
                );
            }
            !reserved
        });
    }

    let perform = build_perform(
        path,
        verb,
        &partitioned.path,
        &partitioned.query,
        &partitioned.body,
    );

    let mut inputs = IndexMap::new();
    inputs.insert(
        CONNECTION_INPUT_KEY.to_string(),
        ActionInput::Connection(connection_input()),
    );
    for input in partitioned.iter() {
        if inputs.contains_key(&input.key) {
            debug!("{verb} {path}: input key `{}` repeats, keeping the last", input.key);
        }
        inputs.insert(input.key.clone(), ActionInput::Operation(input.clone()));
    }

    let description = [&operation.summary, &operation.description]
        .into_iter()
        .flatten()
        .find(|text| !text.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());

    Ok(ActionDescriptor {
        display: ActionDisplay {
            label: title_case(&key),
            description,
        },
        key,
        group_tag: group_tag(path),
        inputs,
        perform,
    })
}

/// Assemble one action per HTTP-verb operation of a path item, in document
/// order. Each operation succeeds or fails on its own.
pub fn operations_to_actions<'a, C>(
    path: &'a str,
    path_item: &'a PathItem,
    classifier: &'a C,
) -> impl Iterator<Item = (HttpVerb, Result<ActionDescriptor, GenerateError>)> + 'a
where
    C: InputClassifier + ?Sized,
{
    if !path_item.ignored_keys.is_empty() {
        debug!("{path}: ignoring non-operation keys {:?}", path_item.ignored_keys);
    }
    path_item.operations.iter().map(move |(verb, operation)| {
        (
            *verb,
            assemble(path, *verb, operation, &path_item.parameters, classifier),
        )
    })
}

/// Build the `export const <name> = action({...})` declaration.
pub fn build_action_declaration(action: &ActionDescriptor) -> Decl {
    let display = Expr::multiline_object(vec![
        Prop::field("label", Expr::str(&action.display.label)),
        Prop::field("description", Expr::str(&action.display.description)),
    ]);

    let inputs = action
        .inputs
        .iter()
        .map(|(key, input)| Prop::KeyValue {
            key: PropKey::for_name(key),
            value: input_field_expr(input.field()),
        })
        .collect();

    let definition = Expr::multiline_object(vec![
        Prop::field("display", display),
        Prop::field("perform", action.perform.function.clone()),
        Prop::field("inputs", Expr::multiline_object(inputs)),
    ]);

    Decl {
        name: action.declaration_name(),
        init: Expr::call(Expr::ident("action"), vec![definition]),
    }
}

fn input_field_expr(field: &InputField) -> Expr {
    let mut props = vec![
        Prop::field("label", Expr::str(&field.label)),
        Prop::field("type", Expr::str(field.input_type.as_str())),
    ];
    if let Some(required) = field.required {
        props.push(Prop::field("required", Expr::Bool(required)));
    }
    let optional_strings = [
        ("placeholder", &field.placeholder),
        ("default", &field.default),
        ("example", &field.example),
        ("language", &field.language),
        ("comments", &field.comments),
    ];
    for (name, value) in optional_strings {
        if let Some(value) = value {
            props.push(Prop::field(name, Expr::str(value)));
        }
    }
    if let Some(model) = &field.model {
        let choices = model
            .iter()
            .map(|choice| {
                Expr::inline_object(vec![
                    Prop::field("label", Expr::str(&choice.label)),
                    Prop::field("value", Expr::str(&choice.value)),
                ])
            })
            .collect();
        props.push(Prop::field(
            "model",
            Expr::Array {
                items: choices,
                multiline: true,
            },
        ));
    }
    Expr::multiline_object(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::render_decl;
    use spg_core::error::ClassifyError;
    use spg_core::ir::InputLocation;
    use spg_core::transform::{ClassifiedInputs, InputOrigin, RawInput};

    /// Classifies every operation with the same inputs.
    struct Fixed(ClassifiedInputs);

    impl InputClassifier for Fixed {
        fn classify(
            &self,
            _operation: &Operation,
            _shared: &[ParameterOrRef],
        ) -> Result<ClassifiedInputs, ClassifyError> {
            Ok(self.0.clone())
        }
    }

    fn raw(upstream: &str, location: InputLocation) -> RawInput {
        RawInput {
            upstream_key: upstream.to_string(),
            location,
            origin: InputOrigin::Operation,
            field: InputField::new(title_case(upstream), InputType::String),
        }
    }

    fn operation(id: Option<&str>) -> Operation {
        Operation {
            operation_id: id.map(String::from),
            ..Operation::default()
        }
    }

    #[test]
    fn test_connection_input_comes_first() {
        let classifier = Fixed(ClassifiedInputs {
            path: vec![raw("pet-id", InputLocation::Path)],
            query: vec![raw("limit", InputLocation::Query)],
            body: vec![],
        });
        let action = assemble(
            "/pets/{pet-id}",
            HttpVerb::Get,
            &operation(Some("showPetById")),
            &[],
            &classifier,
        )
        .unwrap();

        let keys: Vec<_> = action.inputs.keys().map(String::as_str).collect();
        assert_eq!(keys, ["connection", "petId", "limit"]);
        assert_eq!(action.key, "showPetById");
        assert_eq!(action.group_tag, "pets");
        assert_eq!(action.display.label, "Show Pet By Id");
        assert_eq!(action.display.description, FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_reserved_connection_key_is_never_overridden() {
        let classifier = Fixed(ClassifiedInputs {
            path: vec![],
            query: vec![raw("connection", InputLocation::Query)],
            body: vec![raw("Connection", InputLocation::Body)],
        });
        let action = assemble(
            "/links",
            HttpVerb::Post,
            &operation(Some("createLink")),
            &[],
            &classifier,
        )
        .unwrap();

        assert_eq!(action.inputs.len(), 1);
        assert_eq!(
            action.inputs["connection"],
            ActionInput::Connection(connection_input())
        );
        assert_eq!(action.perform.bindings, ["connection"]);
        assert!(
            action
                .perform
                .to_source()
                .contains("await client.post(`/links`, {});")
        );
    }

    #[test]
    fn test_repeated_keys_keep_last_write() {
        let classifier = Fixed(ClassifiedInputs {
            path: vec![],
            query: vec![raw("user_id", InputLocation::Query)],
            body: vec![raw("userId", InputLocation::Body)],
        });
        let action = assemble(
            "/users",
            HttpVerb::Post,
            &operation(Some("createUser")),
            &[],
            &classifier,
        )
        .unwrap();

        let ActionInput::Operation(input) = &action.inputs["userId"] else {
            panic!("expected an operation input");
        };
        assert_eq!(input.location, InputLocation::Body);
        assert_eq!(action.perform.bindings, ["connection", "userId"]);
    }

    #[test]
    fn test_missing_operation_id_is_an_error() {
        let classifier = Fixed(ClassifiedInputs::default());
        for id in [None, Some(""), Some("  ")] {
            let err = assemble("/health", HttpVerb::Get, &operation(id), &[], &classifier)
                .unwrap_err();
            assert!(matches!(
                err,
                GenerateError::MissingOperationIdentifier { ref path, verb: HttpVerb::Get }
                    if path == "/health"
            ));
        }
    }

    #[test]
    fn test_description_prefers_summary() {
        let classifier = Fixed(ClassifiedInputs::default());
        let mut op = operation(Some("listPets"));
        op.summary = Some(String::new());
        op.description = Some("All the pets".to_string());
        let action = assemble("/pets", HttpVerb::Get, &op, &[], &classifier).unwrap();
        assert_eq!(action.display.description, "All the pets");

        op.summary = Some("List pets".to_string());
        let action = assemble("/pets", HttpVerb::Get, &op, &[], &classifier).unwrap();
        assert_eq!(action.display.description, "List pets");
    }

    #[test]
    fn test_action_declaration() {
        let classifier = Fixed(ClassifiedInputs {
            path: vec![],
            query: vec![raw("user_id", InputLocation::Query)],
            body: vec![],
        });
        let mut op = operation(Some("list-users"));
        op.summary = Some("List users".to_string());
        let action = assemble("/users", HttpVerb::Get, &op, &[], &classifier).unwrap();

        insta::assert_snapshot!(render_decl(&build_action_declaration(&action)), @r#"
        export const listUsers = action({
          display: {
            label: "List Users",
            description: "List users",
          },
          perform: async (context, { connection, userId }) => {
            const client = createClient(connection as Connection);
            const { data } = await client.get(`/users`, { params: { "user_id": userId } });
            return { data };
          },
          inputs: {
            connection: {
              label: "Connection",
              type: "connection",
              required: true,
            },
            userId: {
              label: "User Id",
              type: "string",
            },
          },
        });
        "#);
    }

    #[test]
    fn test_descriptor_serialization_omits_absent_fields() {
        let classifier = Fixed(ClassifiedInputs {
            path: vec![raw("id", InputLocation::Path)],
            query: vec![],
            body: vec![],
        });
        let action = assemble(
            "/things/{id}",
            HttpVerb::Delete,
            &operation(Some("deleteThing")),
            &[],
            &classifier,
        )
        .unwrap();
        let json = serde_json::to_value(&action).unwrap();

        assert_eq!(json["groupTag"], "things");
        assert_eq!(
            json["inputs"]["connection"],
            serde_json::json!({"label": "Connection", "type": "connection", "required": true})
        );
        assert_eq!(
            json["inputs"]["id"],
            serde_json::json!({
                "key": "id",
                "upstreamKey": "id",
                "location": "path",
                "label": "Id",
                "type": "string"
            })
        );
        assert!(json["perform"].as_str().unwrap().contains("client.delete(`/things/${id}`)"));
    }
}
