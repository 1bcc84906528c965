use minijinja::context;

use crate::error::GenerateError;

use super::{EmitOptions, environment};

/// Emit `index.ts`, re-exporting the actions and connections modules.
pub fn emit_index(options: &EmitOptions) -> Result<String, GenerateError> {
    let env = environment()?;
    let tmpl = env.get_template("index.ts.j2")?;
    Ok(tmpl.render(context! { title => options.header_title() })?)
}
