use log::warn;
use serde::{Serialize, Serializer};

use spg_core::ir::{HttpVerb, Input};
use spg_core::transform::name_normalizer::sanitize;

use crate::actions::is_reserved_key;
use crate::codegen::{Expr, Pattern, Prop, PropKey, Stmt, TemplatePart, render_expr};

/// The executable step of an action: destructures its inputs, calls the
/// HTTP operation through the configured client and returns the response
/// body.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformTemplate {
    /// Names bound from the action's inputs, `connection` first.
    pub bindings: Vec<String>,
    pub function: Expr,
}

impl PerformTemplate {
    pub fn to_source(&self) -> String {
        render_expr(&self.function)
    }
}

impl Serialize for PerformTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_source())
    }
}

/// Build the perform function for one operation.
///
/// Path placeholders are renamed to the inputs' sanitized keys and turned
/// into template interpolations. Query inputs are mapped back to their wire
/// names under `params`; body inputs likewise form the request body of
/// `post`, `put` and `patch` calls.
///
/// Inputs keyed by a reserved name are left out entirely, so the
/// `connection` binding never reaches the request.
pub fn build_perform(
    path_template: &str,
    verb: HttpVerb,
    path_inputs: &[Input],
    query_inputs: &[Input],
    body_inputs: &[Input],
) -> PerformTemplate {
    let path_inputs = without_reserved(path_inputs);
    let query_inputs = without_reserved(query_inputs);
    let body_inputs = without_reserved(body_inputs);

    let mut bindings = vec!["connection".to_string()];
    for input in path_inputs.iter().chain(&query_inputs).chain(&body_inputs) {
        if !bindings.contains(&input.key) {
            bindings.push(input.key.clone());
        }
    }

    let path = rewrite_path(path_template, &path_inputs);

    let mut args = vec![Expr::Template(split_placeholders(&path))];
    if verb.is_body_bearing() {
        args.push(Expr::inline_object(upstream_mapping(&body_inputs)));
    }
    if !query_inputs.is_empty() {
        args.push(Expr::inline_object(vec![Prop::field(
            "params",
            Expr::inline_object(upstream_mapping(&query_inputs)),
        )]));
    }

    let request = Expr::Await(Box::new(Expr::call(
        Expr::member(Expr::ident("client"), verb.as_str()),
        args,
    )));

    let function = Expr::Arrow {
        is_async: true,
        params: vec![
            Pattern::Ident("context".to_string()),
            Pattern::Object(bindings.clone()),
        ],
        body: vec![
            Stmt::Const {
                pattern: Pattern::Ident("client".to_string()),
                init: Expr::call(
                    Expr::ident("createClient"),
                    vec![Expr::As {
                        expr: Box::new(Expr::ident("connection")),
                        ty: "Connection".to_string(),
                    }],
                ),
            },
            Stmt::Const {
                pattern: Pattern::Object(vec!["data".to_string()]),
                init: request,
            },
            Stmt::Return(Expr::inline_object(vec![Prop::Shorthand("data".to_string())])),
        ],
    };

    PerformTemplate { bindings, function }
}

fn without_reserved(inputs: &[Input]) -> Vec<&Input> {
    inputs
        .iter()
        .filter(|input| !is_reserved_key(&input.key))
        .collect()
}

/// Replace each path input's `{upstream}` token with `{key}`.
fn rewrite_path(template: &str, path_inputs: &[&Input]) -> String {
    let mut path = template.to_string();
    for input in path_inputs {
        let token = format!("{{{}}}", input.upstream_key);
        if path.contains(&token) {
            path = path.replacen(&token, &format!("{{{}}}", input.key), 1);
        } else {
            warn!(
                "path parameter `{}` has no `{token}` placeholder in `{template}`",
                input.upstream_key
            );
        }
    }
    path
}

/// Split a path into static text and `{name}` interpolations.
///
/// Empty braces and placeholders naming a reserved key stay literal text.
fn split_placeholders(path: &str) -> Vec<TemplatePart> {
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut rest = path;

    while let Some(open) = rest.find('{') {
        let Some(len) = rest[open..].find('}') else {
            break;
        };
        let name = &rest[open + 1..open + len];
        text.push_str(&rest[..open]);
        if name.is_empty() || is_reserved_key(&sanitize(name)) {
            text.push_str(&rest[open..=open + len]);
        } else {
            if !text.is_empty() {
                parts.push(TemplatePart::Static(std::mem::take(&mut text)));
            }
            parts.push(TemplatePart::Interpolation(name.to_string()));
        }
        rest = &rest[open + len + 1..];
    }
    text.push_str(rest);
    if !text.is_empty() {
        parts.push(TemplatePart::Static(text));
    }
    parts
}

/// `key` when it matches the wire name, `"upstream": key` otherwise.
fn upstream_mapping(inputs: &[&Input]) -> Vec<Prop> {
    inputs
        .iter()
        .map(|input| {
            if input.key == input.upstream_key {
                Prop::Shorthand(input.key.clone())
            } else {
                Prop::KeyValue {
                    key: PropKey::Quoted(input.upstream_key.clone()),
                    value: Expr::ident(input.key.clone()),
                }
            }
        })
        .collect()
}
