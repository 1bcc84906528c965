use super::ast::{Decl, Expr, Import, Pattern, Prop, PropKey, Stmt, TemplatePart};
use super::writer::SourceWriter;

/// Render `export const name = init;`.
pub fn render_decl(decl: &Decl) -> String {
    let mut w = SourceWriter::new();
    w.write("export const ").write(&decl.name).write(" = ");
    write_expr(&mut w, &decl.init);
    w.write(";");
    w.into_string()
}

pub fn render_expr(expr: &Expr) -> String {
    let mut w = SourceWriter::new();
    write_expr(&mut w, expr);
    w.into_string()
}

pub fn render_import(import: &Import) -> String {
    format!(
        "import {{ {} }} from {};",
        import.names.join(", "),
        string_literal(&import.module)
    )
}

fn write_expr(w: &mut SourceWriter, expr: &Expr) {
    match expr {
        Expr::Ident(name) => {
            w.write(name);
        }
        Expr::Str(value) => {
            w.write(&string_literal(value));
        }
        Expr::Bool(value) => {
            w.write(if *value { "true" } else { "false" });
        }
        Expr::Template(parts) => {
            w.write("`");
            for part in parts {
                match part {
                    TemplatePart::Static(text) => w.write(&escape_template(text)),
                    TemplatePart::Interpolation(name) => w.write("${").write(name).write("}"),
                };
            }
            w.write("`");
        }
        Expr::Object { props, multiline } => write_object(w, props, *multiline),
        Expr::Array { items, multiline } => write_array(w, items, *multiline),
        Expr::Call { callee, args } => {
            write_expr(w, callee);
            w.write("(");
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    w.write(", ");
                }
                write_expr(w, arg);
            }
            w.write(")");
        }
        Expr::Member { object, property } => {
            write_expr(w, object);
            w.write(".").write(property);
        }
        Expr::Await(inner) => {
            w.write("await ");
            write_expr(w, inner);
        }
        Expr::Arrow {
            is_async,
            params,
            body,
        } => {
            w.conditional_write(*is_async, || "async ".to_string());
            w.write("(");
            for (i, param) in params.iter().enumerate() {
                if i > 0 {
                    w.write(", ");
                }
                write_pattern(w, param);
            }
            w.write(") => ");
            w.block(|w| {
                for stmt in body {
                    write_stmt(w, stmt);
                }
            });
        }
        Expr::As { expr, ty } => {
            write_expr(w, expr);
            w.write(" as ").write(ty);
        }
    }
}

fn write_stmt(w: &mut SourceWriter, stmt: &Stmt) {
    match stmt {
        Stmt::Const { pattern, init } => {
            w.write("const ");
            write_pattern(w, pattern);
            w.write(" = ");
            write_expr(w, init);
        }
        Stmt::Return(expr) => {
            w.write("return ");
            write_expr(w, expr);
        }
    }
    w.write_line(";");
}

fn write_pattern(w: &mut SourceWriter, pattern: &Pattern) {
    match pattern {
        Pattern::Ident(name) => {
            w.write(name);
        }
        Pattern::Object(names) if names.is_empty() => {
            w.write("{}");
        }
        Pattern::Object(names) => {
            w.write("{ ").write(&names.join(", ")).write(" }");
        }
    }
}

fn write_object(w: &mut SourceWriter, props: &[Prop], multiline: bool) {
    if props.is_empty() {
        w.write("{}");
        return;
    }
    if multiline {
        w.block(|w| {
            for prop in props {
                write_prop(w, prop);
                w.write_line(",");
            }
        });
    } else {
        w.write("{ ");
        for (i, prop) in props.iter().enumerate() {
            if i > 0 {
                w.write(", ");
            }
            write_prop(w, prop);
        }
        w.write(" }");
    }
}

fn write_prop(w: &mut SourceWriter, prop: &Prop) {
    match prop {
        Prop::Shorthand(name) => {
            w.write(name);
        }
        Prop::KeyValue { key, value } => {
            match key {
                PropKey::Ident(name) => w.write(name),
                PropKey::Quoted(name) => w.write(&string_literal(name)),
            };
            w.write(": ");
            write_expr(w, value);
        }
    }
}

fn write_array(w: &mut SourceWriter, items: &[Expr], multiline: bool) {
    if items.is_empty() {
        w.write("[]");
        return;
    }
    if multiline {
        w.write_line("[");
        w.indent(|w| {
            for item in items {
                write_expr(w, item);
                w.write_line(",");
            }
        });
        w.write("]");
    } else {
        w.write("[");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                w.write(", ");
            }
            write_expr(w, item);
        }
        w.write("]");
    }
}

/// Double-quoted string literal with JSON escaping, valid in JS and TS.
fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn escape_template(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_literals_are_escaped() {
        assert_eq!(render_expr(&Expr::str("plain")), r#""plain""#);
        assert_eq!(
            render_expr(&Expr::str("say \"hi\"\nnow")),
            r#""say \"hi\"\nnow""#
        );
    }

    #[test]
    fn test_template_literal() {
        let expr = Expr::Template(vec![
            TemplatePart::Static("/pets/".into()),
            TemplatePart::Interpolation("petId".into()),
            TemplatePart::Static("/`raw`".into()),
        ]);
        assert_eq!(render_expr(&expr), r"`/pets/${petId}/\`raw\``");
    }

    #[test]
    fn test_inline_object_and_keys() {
        let expr = Expr::inline_object(vec![
            Prop::Shorthand("limit".into()),
            Prop::KeyValue {
                key: PropKey::Quoted("user_id".into()),
                value: Expr::ident("userId"),
            },
        ]);
        assert_eq!(render_expr(&expr), r#"{ limit, "user_id": userId }"#);
        assert_eq!(render_expr(&Expr::inline_object(vec![])), "{}");
    }

    #[test]
    fn test_multiline_object_nests() {
        let expr = Expr::multiline_object(vec![
            Prop::field("label", Expr::str("Limit")),
            Prop::field(
                "display",
                Expr::multiline_object(vec![Prop::field("shown", Expr::Bool(false))]),
            ),
        ]);
        insta::assert_snapshot!(render_expr(&expr), @r#"
        {
          label: "Limit",
          display: {
            shown: false,
          },
        }
        "#);
    }

    #[test]
    fn test_arrays() {
        let items = vec![Expr::ident("a"), Expr::ident("b")];
        assert_eq!(
            render_expr(&Expr::Array {
                items: items.clone(),
                multiline: false
            }),
            "[a, b]"
        );
        assert_eq!(
            render_expr(&Expr::Array {
                items,
                multiline: true
            }),
            "[\n  a,\n  b,\n]"
        );
    }

    #[test]
    fn test_async_arrow_with_destructuring() {
        let expr = Expr::Arrow {
            is_async: true,
            params: vec![
                Pattern::Ident("context".into()),
                Pattern::Object(vec!["connection".into()]),
            ],
            body: vec![Stmt::Return(Expr::inline_object(vec![Prop::Shorthand(
                "data".into(),
            )]))],
        };
        assert_eq!(
            render_expr(&expr),
            "async (context, { connection }) => {\n  return { data };\n}"
        );
    }

    #[test]
    fn test_decl_and_import() {
        let decl = Decl {
            name: "apiKey".into(),
            init: Expr::call(Expr::ident("connection"), vec![Expr::inline_object(vec![])]),
        };
        assert_eq!(render_decl(&decl), "export const apiKey = connection({});");

        let import = Import {
            names: vec!["action".into(), "Connection".into()],
            module: "@prismatic-io/spectral".into(),
        };
        assert_eq!(
            render_import(&import),
            r#"import { action, Connection } from "@prismatic-io/spectral";"#
        );
    }
}
