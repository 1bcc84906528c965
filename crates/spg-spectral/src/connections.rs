use spg_core::ir::{ConnectionDescriptor, ConnectionInput, OAuth2Type};
use spg_core::transform::name_normalizer::sanitize;

use crate::codegen::{Decl, Expr, Prop, PropKey};
use crate::error::GenerateError;

/// Build the `connection({...})` or `oauth2Connection({...})` declaration.
///
/// The OAuth2 grant is checked before anything is built, so an unsupported
/// grant yields an error and no declaration.
pub fn build_connection_declaration(
    connection: &ConnectionDescriptor,
) -> Result<Decl, GenerateError> {
    let variant = connection.oauth2_variant().map_err(|unknown| {
        GenerateError::UnsupportedOAuth2Variant {
            connection: connection.key.clone(),
            variant: unknown.0,
        }
    })?;

    let key = sanitize(&connection.key);
    let constructor = match variant {
        None => "connection",
        Some(_) => "oauth2Connection",
    };

    let mut props = vec![
        Prop::field("key", Expr::str(&key)),
        Prop::field("label", Expr::str(&connection.label)),
    ];
    if let Some(comments) = &connection.comments {
        props.push(Prop::field("comments", Expr::str(comments)));
    }
    if let Some(icon_path) = &connection.icon_path {
        props.push(Prop::field("iconPath", Expr::str(icon_path)));
    }
    if let Some(variant) = variant {
        props.push(Prop::field("oauth2Type", oauth2_type_expr(variant)));
    }

    let inputs = connection
        .inputs
        .iter()
        .map(|(name, input)| Prop::KeyValue {
            key: PropKey::for_name(name),
            value: connection_input_expr(input),
        })
        .collect();
    props.push(Prop::field("inputs", Expr::multiline_object(inputs)));

    Ok(Decl {
        name: key,
        init: Expr::call(Expr::ident(constructor), vec![Expr::multiline_object(props)]),
    })
}

fn oauth2_type_expr(variant: OAuth2Type) -> Expr {
    Expr::member(Expr::ident("OAuth2Type"), variant.variant_name())
}

fn connection_input_expr(input: &ConnectionInput) -> Expr {
    let mut props = vec![
        Prop::field("label", Expr::str(&input.label)),
        Prop::field("type", Expr::str(input.input_type.as_str())),
    ];
    // Explicit `false` is kept; only unset flags are omitted.
    if let Some(required) = input.required {
        props.push(Prop::field("required", Expr::Bool(required)));
    }
    if let Some(shown) = input.shown {
        props.push(Prop::field("shown", Expr::Bool(shown)));
    }
    let optional_strings = [
        ("placeholder", &input.placeholder),
        ("default", &input.default),
        ("example", &input.example),
        ("comments", &input.comments),
    ];
    for (name, value) in optional_strings {
        if let Some(value) = value {
            props.push(Prop::field(name, Expr::str(value)));
        }
    }
    Expr::multiline_object(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::render_decl;
    use indexmap::IndexMap;
    use spg_core::ir::InputType;

    fn descriptor(key: &str, oauth2_type: Option<&str>) -> ConnectionDescriptor {
        ConnectionDescriptor {
            key: key.to_string(),
            label: "Petstore".to_string(),
            oauth2_type: oauth2_type.map(String::from),
            icon_path: None,
            comments: None,
            inputs: IndexMap::new(),
        }
    }

    #[test]
    fn test_plain_connection() {
        let mut conn = descriptor("api_key", None);
        conn.comments = Some("Key from the \"Settings\" page".to_string());
        conn.inputs.insert(
            "apiKey".to_string(),
            ConnectionInput::new("API Key", InputType::Password).required(true),
        );

        insta::assert_snapshot!(render_decl(&build_connection_declaration(&conn).unwrap()), @r#"
        export const apiKey = connection({
          key: "apiKey",
          label: "Petstore",
          comments: "Key from the \"Settings\" page",
          inputs: {
            apiKey: {
              label: "API Key",
              type: "password",
              required: true,
            },
          },
        });
        "#);
    }

    #[test]
    fn test_oauth2_connection_keeps_explicit_false() {
        let mut conn = descriptor("oauth", Some("authorization_code"));
        conn.icon_path = Some("icon.png".to_string());
        conn.inputs.insert(
            "tokenUrl".to_string(),
            ConnectionInput::new("Token URL", InputType::String)
                .required(false)
                .shown(false)
                .with_default("https://example.com/token"),
        );

        insta::assert_snapshot!(render_decl(&build_connection_declaration(&conn).unwrap()), @r#"
        export const oauth = oauth2Connection({
          key: "oauth",
          label: "Petstore",
          iconPath: "icon.png",
          oauth2Type: OAuth2Type.AuthorizationCode,
          inputs: {
            tokenUrl: {
              label: "Token URL",
              type: "string",
              required: false,
              shown: false,
              default: "https://example.com/token",
            },
          },
        });
        "#);
    }

    #[test]
    fn test_client_credentials_variant() {
        let conn = descriptor("machine", Some("client_credentials"));
        let source = render_decl(&build_connection_declaration(&conn).unwrap());
        assert!(source.contains("oauth2Type: OAuth2Type.ClientCredentials,"));
        assert!(source.contains("inputs: {},"));
    }

    #[test]
    fn test_unknown_oauth2_variant_fails() {
        let conn = descriptor("legacy", Some("implicit"));
        let err = build_connection_declaration(&conn).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::UnsupportedOAuth2Variant { ref connection, ref variant }
                if connection == "legacy" && variant == "implicit"
        ));
    }

    #[test]
    fn test_unsafe_input_names_are_quoted() {
        let mut conn = descriptor("basic", None);
        conn.inputs.insert(
            "x-tenant".to_string(),
            ConnectionInput::new("Tenant", InputType::String),
        );
        let source = render_decl(&build_connection_declaration(&conn).unwrap());
        assert!(source.contains("\"x-tenant\": {"));
    }
}
