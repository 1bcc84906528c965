use indexmap::IndexMap;
use log::{debug, warn};

use crate::ir::{ConnectionDescriptor, ConnectionInput, InputType, OAuth2Type};
use crate::parse::security::{OAuthFlow, SecurityScheme, SecuritySchemeType};
use crate::parse::spec::OpenApiSpec;

use super::name_normalizer::{sanitize, title_case};

/// Derive one connection descriptor per supported security scheme, in
/// document order. Unsupported schemes are skipped with a warning.
pub fn security_schemes_to_connections(spec: &OpenApiSpec) -> Vec<ConnectionDescriptor> {
    let Some(components) = &spec.components else {
        debug!("no components, no connections to derive");
        return Vec::new();
    };

    components
        .security_schemes
        .iter()
        .filter_map(|(name, scheme)| {
            let derived = scheme_to_connection(name, scheme);
            if derived.is_none() {
                warn!(
                    "security scheme `{name}` ({:?}) has no connection mapping, skipping",
                    scheme.scheme_type
                );
            }
            derived
        })
        .collect()
}

fn scheme_to_connection(name: &str, scheme: &SecurityScheme) -> Option<ConnectionDescriptor> {
    let (oauth2_type, inputs) = match scheme.scheme_type {
        SecuritySchemeType::ApiKey => (None, api_key_inputs(scheme)),
        SecuritySchemeType::Http => (None, http_inputs(scheme)),
        SecuritySchemeType::OAuth2 => {
            let flows = scheme.flows.as_ref()?;
            if let Some(flow) = &flows.authorization_code {
                (
                    Some(OAuth2Type::AuthorizationCode),
                    oauth2_inputs(flow, true),
                )
            } else if let Some(flow) = &flows.client_credentials {
                (
                    Some(OAuth2Type::ClientCredentials),
                    oauth2_inputs(flow, false),
                )
            } else {
                return None;
            }
        }
        SecuritySchemeType::OpenIdConnect | SecuritySchemeType::MutualTls => return None,
    };

    Some(ConnectionDescriptor {
        key: sanitize(name),
        label: title_case(name),
        oauth2_type: oauth2_type.map(|t| t.as_str().to_string()),
        icon_path: None,
        comments: scheme.description.clone(),
        inputs,
    })
}

fn api_key_inputs(scheme: &SecurityScheme) -> IndexMap<String, ConnectionInput> {
    let comments = scheme
        .name
        .as_ref()
        .map(|header| format!("Sent as `{header}`"));
    IndexMap::from([(
        "apiKey".to_string(),
        ConnectionInput::new("API Key", InputType::Password)
            .required(true)
            .with_comments(comments),
    )])
}

fn http_inputs(scheme: &SecurityScheme) -> IndexMap<String, ConnectionInput> {
    let is_basic = scheme
        .scheme
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("basic"));

    if is_basic {
        IndexMap::from([
            (
                "username".to_string(),
                ConnectionInput::new("Username", InputType::String).required(true),
            ),
            (
                "password".to_string(),
                ConnectionInput::new("Password", InputType::Password).required(true),
            ),
        ])
    } else {
        let comments = scheme
            .bearer_format
            .as_ref()
            .map(|format| format!("Token format: {format}"));
        IndexMap::from([(
            "token".to_string(),
            ConnectionInput::new("Token", InputType::Password)
                .required(true)
                .with_comments(comments),
        )])
    }
}

fn oauth2_inputs(flow: &OAuthFlow, with_authorize_url: bool) -> IndexMap<String, ConnectionInput> {
    let mut inputs = IndexMap::new();

    if with_authorize_url {
        let mut authorize = ConnectionInput::new("Authorize URL", InputType::String)
            .required(true)
            .shown(false);
        authorize.default = flow.authorization_url.clone();
        inputs.insert("authorizeUrl".to_string(), authorize);
    }

    let mut token = ConnectionInput::new("Token URL", InputType::String)
        .required(true)
        .shown(false);
    token.default = flow.token_url.clone();
    inputs.insert("tokenUrl".to_string(), token);

    let scopes: Vec<&str> = flow.scopes.keys().map(String::as_str).collect();
    inputs.insert(
        "scopes".to_string(),
        ConnectionInput::new("Scopes", InputType::String)
            .required(false)
            .with_default(scopes.join(" ")),
    );
    inputs.insert(
        "clientId".to_string(),
        ConnectionInput::new("Client ID", InputType::String).required(true),
    );
    inputs.insert(
        "clientSecret".to_string(),
        ConnectionInput::new("Client Secret", InputType::Password).required(true),
    );
    inputs
}
