use spg_core::config::ErrorPolicy;
use spg_core::ir::{ConnectionDescriptor, HttpVerb};
use spg_core::{CodeGenerator, GeneratedOutput, parse};
use spg_spectral::{GenerateError, SpectralConfig, SpectralGenerator};

const PETSTORE: &str = include_str!("../../spg-core/tests/fixtures/petstore.yaml");

fn skip_config() -> SpectralConfig {
    SpectralConfig {
        on_error: ErrorPolicy::Skip,
        ..SpectralConfig::default()
    }
}

fn generate(yaml: &str, config: &SpectralConfig) -> GeneratedOutput {
    let spec = parse::from_yaml(yaml).unwrap();
    SpectralGenerator.generate(&spec, config).unwrap()
}

fn file<'a>(output: &'a GeneratedOutput, path: &str) -> &'a str {
    &output
        .files
        .iter()
        .find(|f| f.path == path)
        .unwrap_or_else(|| panic!("missing {path}"))
        .content
}

#[test]
fn petstore_emits_all_files() {
    let output = generate(PETSTORE, &skip_config());
    let paths: Vec<_> = output.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, ["actions.ts", "connections.ts", "index.ts"]);

    let index = file(&output, "index.ts");
    assert!(index.contains(r#"export { default as actions } from "./actions";"#));
    assert!(index.contains(r#"export { default as connections } from "./connections";"#));
}

#[test]
fn petstore_skips_operation_without_id() {
    let output = generate(PETSTORE, &skip_config());
    assert_eq!(output.skipped.len(), 1);
    assert_eq!(output.skipped[0].context, "GET /health");
    assert!(output.skipped[0].reason.contains("operationId"));
}

#[test]
fn abort_policy_stops_at_first_failure() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let err = SpectralGenerator
        .generate(&spec, &SpectralConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        GenerateError::MissingOperationIdentifier { ref path, verb: HttpVerb::Get } if path == "/health"
    ));
}

#[test]
fn actions_module_layout() {
    let output = generate(PETSTORE, &skip_config());
    let actions = file(&output, "actions.ts");

    assert!(actions.starts_with("// Generated by spg from Petstore. Do not edit.\n"));
    assert!(actions.contains(
        "import { action, Connection } from \"@prismatic-io/spectral\";\nimport { createClient } from \"./client\";\n"
    ));
    assert!(actions.contains("\n// pets\nexport const listPets = action({\n"));
    assert!(actions.contains("\n// stores\nexport const listStorePets = action({\n"));
    assert!(actions.contains("\n// twoFactor\nexport const verifyCode = action({\n"));
    assert_eq!(actions.matches("// pets\n").count(), 1);
    assert!(actions.ends_with(
        "\nexport default { listPets, createPet, showPetById, deletePet, listStorePets, verifyCode };\n"
    ));
}

#[test]
fn perform_templates_map_wire_names() {
    let output = generate(PETSTORE, &skip_config());
    let actions = file(&output, "actions.ts");

    assert!(actions.contains("perform: async (context, { connection, limit, userId }) => {"));
    assert!(actions.contains(
        r#"const { data } = await client.get(`/pets`, { params: { limit, "user_id": userId } });"#
    ));
    assert!(actions.contains("perform: async (context, { connection, storeId, pageSize }) => {"));
    assert!(actions.contains(
        r#"const { data } = await client.get(`/stores/${storeId}/pets`, { params: { "page-size": pageSize } });"#
    ));
    assert!(actions.contains("const { data } = await client.post(`/pets`, { name, tag, vaccinated });"));
    assert!(actions.contains("const { data } = await client.delete(`/pets/${petId}`);"));
    assert!(actions.contains("const { data } = await client.post(`/2-factor/verify`, { code });"));
}

#[test]
fn action_inputs_carry_classifier_metadata() {
    let output = generate(PETSTORE, &skip_config());
    let actions = file(&output, "actions.ts");

    assert!(actions.contains(
        "    pageSize: {\n      label: \"Page Size\",\n      type: \"string\",\n      required: false,\n      default: \"20\",\n    },\n"
    ));
    assert!(actions.contains(
        "    vaccinated: {\n      label: \"Vaccinated\",\n      type: \"boolean\",\n      required: false,\n    },\n"
    ));
    assert!(actions.contains("description: \"Create a pet\","));
}

#[test]
fn connections_module_from_security_schemes() {
    let output = generate(PETSTORE, &skip_config());
    let connections = file(&output, "connections.ts");

    assert!(connections.contains(
        r#"import { connection, oauth2Connection, OAuth2Type } from "@prismatic-io/spectral";"#
    ));
    assert!(connections.contains("export const apiKey = connection({"));
    assert!(connections.contains("export const petstoreAuth = oauth2Connection({"));
    assert!(connections.contains("oauth2Type: OAuth2Type.AuthorizationCode,"));
    assert!(connections.contains(r#"default: "read:pets write:pets","#));
    assert!(connections.ends_with("\nexport default [apiKey, petstoreAuth];\n"));
}

#[test]
fn explicit_connections_replace_derived_ones() {
    let config = SpectralConfig {
        connections: serde_yaml_ng::from_str::<Vec<ConnectionDescriptor>>(
            r#"
- key: basic
  label: Basic Auth
  inputs:
    username:
      label: Username
      type: string
      required: true
- key: legacy
  label: Legacy
  oauth2Type: implicit
"#,
        )
        .unwrap(),
        ..skip_config()
    };
    let output = generate(PETSTORE, &config);
    let connections = file(&output, "connections.ts");

    assert!(connections.contains("import { connection } from \"@prismatic-io/spectral\";"));
    assert!(!connections.contains("oauth2Connection"));
    assert!(connections.ends_with("\nexport default [basic];\n"));

    let skipped: Vec<_> = output.skipped.iter().map(|s| s.context.as_str()).collect();
    assert_eq!(skipped, ["GET /health", "connection legacy"]);
}

#[test]
fn no_connections_means_no_runtime_import() {
    let config = SpectralConfig {
        derive_connections: false,
        ..skip_config()
    };
    let output = generate(PETSTORE, &config);
    let connections = file(&output, "connections.ts");
    assert!(!connections.contains("import"));
    assert!(connections.ends_with("\nexport default [];\n"));
}

#[test]
fn colliding_declaration_names_are_reported() {
    let yaml = r#"
openapi: 3.0.3
info:
  title: Collide
  version: "1"
paths:
  /items:
    get:
      operationId: get-items
    post:
      operationId: getItems
"#;
    let output = generate(yaml, &skip_config());
    let actions = file(&output, "actions.ts");
    assert!(actions.contains("export default { getItems };"));
    assert_eq!(output.skipped.len(), 1);
    assert_eq!(output.skipped[0].context, "POST /items");
    assert!(output.skipped[0].reason.contains("duplicate declaration name `getItems`"));
}

#[test]
fn index_can_be_disabled_and_modules_overridden() {
    let config = SpectralConfig {
        index: false,
        client_module: "../http".to_string(),
        runtime_module: "@acme/runtime".to_string(),
        ..skip_config()
    };
    let output = generate(PETSTORE, &config);
    assert_eq!(output.files.len(), 2);
    let actions = file(&output, "actions.ts");
    assert!(actions.contains("from \"@acme/runtime\";"));
    assert!(actions.contains("import { createClient } from \"../http\";"));
}

#[test]
fn descriptors_serialize_for_registration() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let descriptors = SpectralGenerator
        .descriptors(&spec, &skip_config())
        .unwrap();

    let show = descriptors
        .actions
        .iter()
        .find(|a| a.key == "showPetById")
        .unwrap();
    let json = serde_json::to_value(show).unwrap();
    assert_eq!(json["groupTag"], "pets");
    assert_eq!(json["display"]["description"], "Info for a specific pet");
    assert_eq!(json["inputs"]["petId"]["location"], "path");
    assert_eq!(json["inputs"]["petId"]["comments"], "The id of the pet");
    assert!(json["inputs"]["petId"].get("placeholder").is_none());

    let oauth = serde_json::to_value(&descriptors.connections[1]).unwrap();
    assert_eq!(oauth["oauth2Type"], "authorization_code");
    assert!(oauth.get("iconPath").is_none());
}

#[test]
fn operations_named_after_imports_are_reported() {
    let yaml = r#"
openapi: 3.0.3
info:
  title: Imports
  version: "1"
paths:
  /clients:
    post:
      operationId: createClient
  /actions:
    get:
      operationId: action
  /things:
    get:
      operationId: listThings
"#;
    let output = generate(yaml, &skip_config());
    let actions = file(&output, "actions.ts");
    assert!(actions.contains("export default { listThings };"));
    assert!(!actions.contains("export const createClient"));
    assert!(!actions.contains("export const action "));

    let contexts: Vec<_> = output.skipped.iter().map(|s| s.context.as_str()).collect();
    assert_eq!(contexts, ["POST /clients", "GET /actions"]);
}

#[test]
fn multiline_title_stays_inside_header_comment() {
    let yaml = r#"
openapi: 3.0.3
info:
  title: "Pet\nStore"
  version: "1"
paths: {}
"#;
    let output = generate(yaml, &skip_config());
    for generated in &output.files {
        assert!(
            generated
                .content
                .starts_with("// Generated by spg from Pet Store. Do not edit.\n"),
            "bad header in {}",
            generated.path
        );
    }
}

#[test]
fn generation_is_deterministic() {
    let first = generate(PETSTORE, &skip_config());
    let second = generate(PETSTORE, &skip_config());

    assert_eq!(first.files.len(), second.files.len());
    for (a, b) in first.files.iter().zip(&second.files) {
        assert_eq!(a.path, b.path);
        assert_eq!(a.content, b.content, "{} differs between runs", a.path);
    }
}
