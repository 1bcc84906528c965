use std::collections::HashSet;

use minijinja::context;

use crate::actions::{ActionDescriptor, build_action_declaration};
use crate::codegen::{Expr, Import, Prop, render_decl, render_expr, render_import};
use crate::error::GenerateError;

use super::{EmitOptions, environment};

const RUNTIME_IMPORTS: [&str; 2] = ["action", "Connection"];
const CLIENT_IMPORTS: [&str; 1] = ["createClient"];

/// Names `actions.ts` binds through its imports. No action may be declared
/// under one of them.
pub fn imported_names() -> impl Iterator<Item = &'static str> {
    RUNTIME_IMPORTS.into_iter().chain(CLIENT_IMPORTS)
}

/// Emit `actions.ts`: one declaration per action in construction order and a
/// default export object naming all of them.
///
/// A group comment precedes each run of actions sharing a group tag.
pub fn emit_actions(
    actions: &[ActionDescriptor],
    options: &EmitOptions,
) -> Result<String, GenerateError> {
    let env = environment()?;
    let tmpl = env.get_template("actions.ts.j2")?;

    let mut names = Vec::with_capacity(actions.len());
    let mut seen: HashSet<String> = imported_names().map(String::from).collect();
    let mut entries = Vec::with_capacity(actions.len());
    let mut previous_group: Option<&str> = None;

    for action in actions {
        let decl = build_action_declaration(action);
        if !seen.insert(decl.name.clone()) {
            return Err(GenerateError::DuplicateDeclaration { name: decl.name });
        }

        let group = (previous_group != Some(action.group_tag.as_str()))
            .then(|| action.group_tag.clone());
        previous_group = Some(action.group_tag.as_str());

        entries.push(context! {
            group => group,
            source => render_decl(&decl),
        });
        names.push(decl.name);
    }

    let imports = [
        Import {
            names: RUNTIME_IMPORTS.map(String::from).to_vec(),
            module: options.runtime_module.clone(),
        },
        Import {
            names: CLIENT_IMPORTS.map(String::from).to_vec(),
            module: options.client_module.clone(),
        },
    ];

    let default_export = Expr::inline_object(names.into_iter().map(Prop::Shorthand).collect());

    Ok(tmpl.render(context! {
        title => options.header_title(),
        imports => imports.iter().map(render_import).collect::<Vec<_>>(),
        actions => entries,
        default_export => render_expr(&default_export),
    })?)
}
