use crate::transform::name_normalizer::{camel_case, spell_leading_digits};

/// Tag reserved for the API root path.
pub const ROOT_GROUP: &str = "root";

/// Derive the grouping tag of a path from its first segment.
///
/// `"/"` maps to `"root"`; otherwise the second `/`-delimited segment is
/// camel-cased and a leading run of digits spelled out, so
/// `"/2-factor/verify"` becomes `"twoFactor"`.
pub fn group_tag(path: &str) -> String {
    let segment = if path == "/" {
        ROOT_GROUP
    } else {
        path.split('/').nth(1).unwrap_or_default()
    };
    spell_leading_digits(&camel_case(segment))
}
