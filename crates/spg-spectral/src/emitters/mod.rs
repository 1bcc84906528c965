pub mod actions;
pub mod connections;
pub mod index;

use minijinja::{AutoEscape, Environment};

/// Module specifiers the emitted files import from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Title of the API, written in file headers.
    pub title: String,
    pub runtime_module: String,
    pub client_module: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            title: "OpenAPI".to_string(),
            runtime_module: "@prismatic-io/spectral".to_string(),
            client_module: "./client".to_string(),
        }
    }
}

impl EmitOptions {
    /// The title on one line, as the file header comment requires.
    pub fn header_title(&self) -> String {
        self.title.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Template environment holding every file frame.
pub(crate) fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template("actions.ts.j2", include_str!("../../templates/actions.ts.j2"))?;
    env.add_template(
        "connections.ts.j2",
        include_str!("../../templates/connections.ts.j2"),
    )?;
    env.add_template("index.ts.j2", include_str!("../../templates/index.ts.j2"))?;
    Ok(env)
}
