/// An emitted expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Identifier: `client`
    Ident(String),
    /// String literal: `"List Pets"`
    Str(String),
    Bool(bool),
    /// Template literal: `` `/pets/${petId}` ``
    Template(Vec<TemplatePart>),
    /// Object literal. Multiline objects put one property per line with a
    /// trailing comma.
    Object { props: Vec<Prop>, multiline: bool },
    /// Array literal, laid out like objects.
    Array { items: Vec<Expr>, multiline: bool },
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// Member access: `client.get`
    Member { object: Box<Expr>, property: String },
    Await(Box<Expr>),
    /// Arrow function with a block body.
    Arrow {
        is_async: bool,
        params: Vec<Pattern>,
        body: Vec<Stmt>,
    },
    /// Type assertion: `connection as Connection`
    As { expr: Box<Expr>, ty: String },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn str(value: impl Into<String>) -> Self {
        Expr::Str(value.into())
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn member(object: Expr, property: impl Into<String>) -> Self {
        Expr::Member {
            object: Box::new(object),
            property: property.into(),
        }
    }

    pub fn inline_object(props: Vec<Prop>) -> Self {
        Expr::Object {
            props,
            multiline: false,
        }
    }

    pub fn multiline_object(props: Vec<Prop>) -> Self {
        Expr::Object {
            props,
            multiline: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Static(String),
    Interpolation(String),
}

/// An object-literal property.
#[derive(Debug, Clone, PartialEq)]
pub enum Prop {
    /// `{ limit }`
    Shorthand(String),
    /// `{ key: value }`
    KeyValue { key: PropKey, value: Expr },
}

impl Prop {
    /// A property whose key is a plain identifier.
    pub fn field(key: impl Into<String>, value: Expr) -> Self {
        Prop::KeyValue {
            key: PropKey::Ident(key.into()),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropKey {
    Ident(String),
    /// Always written as a string literal.
    Quoted(String),
}

impl PropKey {
    /// Bare when `name` is a valid identifier, quoted otherwise.
    pub fn for_name(name: &str) -> Self {
        if is_identifier(name) {
            PropKey::Ident(name.to_string())
        } else {
            PropKey::Quoted(name.to_string())
        }
    }
}

/// A binding pattern in a parameter list or `const`.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Ident(String),
    /// Object destructuring: `{ connection, petId }`
    Object(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Const { pattern: Pattern, init: Expr },
    Return(Expr),
}

/// A top-level `export const name = init;`.
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub name: String,
    pub init: Expr,
}

/// `import { a, b } from "module";`
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub names: Vec<String>,
    pub module: String,
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
