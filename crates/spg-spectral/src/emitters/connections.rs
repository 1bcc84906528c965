use std::collections::HashSet;

use minijinja::context;
use spg_core::ir::ConnectionDescriptor;

use crate::codegen::{Decl, Expr, Import, render_decl, render_expr, render_import};
use crate::connections::build_connection_declaration;
use crate::error::GenerateError;

use super::{EmitOptions, environment};

const PLAIN_IMPORTS: [&str; 1] = ["connection"];
const OAUTH2_IMPORTS: [&str; 2] = ["oauth2Connection", "OAuth2Type"];

/// Every name `connections.ts` may import. No connection may be declared
/// under one of them, whether or not the import is emitted.
pub fn imported_names() -> impl Iterator<Item = &'static str> {
    PLAIN_IMPORTS.into_iter().chain(OAUTH2_IMPORTS)
}

/// Emit `connections.ts`: one declaration per connection and a default
/// export array naming all of them.
///
/// Only the runtime constructors the connections actually use are imported;
/// with no connections there is no import at all.
pub fn emit_connections(
    connections: &[ConnectionDescriptor],
    options: &EmitOptions,
) -> Result<String, GenerateError> {
    let env = environment()?;
    let tmpl = env.get_template("connections.ts.j2")?;

    let decls = connections
        .iter()
        .map(build_connection_declaration)
        .collect::<Result<Vec<Decl>, _>>()?;

    let mut seen: HashSet<&str> = imported_names().collect();
    for decl in &decls {
        if !seen.insert(decl.name.as_str()) {
            return Err(GenerateError::DuplicateDeclaration {
                name: decl.name.clone(),
            });
        }
    }

    let imports = runtime_imports(connections, &options.runtime_module);
    let default_export = Expr::Array {
        items: decls.iter().map(|d| Expr::ident(&d.name)).collect(),
        multiline: false,
    };

    Ok(tmpl.render(context! {
        title => options.header_title(),
        imports => imports.iter().map(render_import).collect::<Vec<_>>(),
        connections => decls.iter().map(render_decl).collect::<Vec<_>>(),
        default_export => render_expr(&default_export),
    })?)
}

/// The minimal named imports for a set of connections.
fn runtime_imports(connections: &[ConnectionDescriptor], module: &str) -> Option<Import> {
    let mut names = Vec::new();
    if connections.iter().any(|c| c.oauth2_type.is_none()) {
        names.extend(PLAIN_IMPORTS.map(String::from));
    }
    if connections.iter().any(|c| c.oauth2_type.is_some()) {
        names.extend(OAUTH2_IMPORTS.map(String::from));
    }
    (!names.is_empty()).then(|| Import {
        names,
        module: module.to_string(),
    })
}
