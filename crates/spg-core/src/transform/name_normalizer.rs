use std::collections::HashSet;
use std::sync::LazyLock;

use heck::{ToLowerCamelCase, ToTitleCase};

/// Words that cannot be bound as identifiers in emitted TypeScript.
static RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "arguments",
        "async",
        "await",
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "eval",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "implements",
        "import",
        "in",
        "instanceof",
        "interface",
        "let",
        "new",
        "null",
        "package",
        "private",
        "protected",
        "public",
        "return",
        "static",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
    ]
    .into_iter()
    .collect()
});

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [(u64, &str); 6] = [
    (1_000_000_000_000_000_000, "quintillion"),
    (1_000_000_000_000_000, "quadrillion"),
    (1_000_000_000_000, "trillion"),
    (1_000_000_000, "billion"),
    (1_000_000, "million"),
    (1_000, "thousand"),
];

/// Collapse hyphens, underscores, spaces and mixed case into lowerCamelCase.
pub fn camel_case(raw: &str) -> String {
    raw.to_lower_camel_case()
}

const MAX_SANITIZE_PASSES: usize = 8;

/// Turn an arbitrary wire name into an identifier usable in emitted code.
///
/// The result is lowerCamelCase, never starts with a digit, never equals a
/// reserved word, and `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(raw: &str) -> String {
    // One pass is not always stable (`a.b.c` -> `aBC` -> `aBc`).
    let mut ident = spell_leading_digits(&camel_case(raw));
    for _ in 0..MAX_SANITIZE_PASSES {
        let next = spell_leading_digits(&camel_case(&ident));
        if next == ident {
            break;
        }
        ident = next;
    }

    if ident.is_empty() {
        return "unnamed".to_string();
    }
    if ident.starts_with(char::is_numeric) {
        ident.insert(0, '_');
    }
    if RESERVED_WORDS.contains(ident.as_str()) {
        ident.push_str("Value");
    }
    ident
}

/// Human-readable label, e.g. `listPets` → `List Pets`.
pub fn title_case(raw: &str) -> String {
    raw.to_title_case()
}

/// Rewrite a leading run of ASCII digits into its spelled-out, camel-joined
/// words, leaving the remainder as is: `2Factor` → `twoFactor`,
/// `404` → `fourHundredFour`.
pub fn spell_leading_digits(s: &str) -> String {
    let digits_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if digits_end == 0 {
        return s.to_string();
    }

    let (digits, rest) = s.split_at(digits_end);
    let words = match digits.parse::<u64>() {
        Ok(n) => number_words(n),
        // Too large for u64: spell digit by digit.
        Err(_) => digits
            .bytes()
            .map(|b| ONES[usize::from(b - b'0')])
            .collect(),
    };

    let mut spelled = join_camel(&words);
    spelled.push_str(rest);
    spelled
}

fn number_words(n: u64) -> Vec<&'static str> {
    if n == 0 {
        return vec![ONES[0]];
    }

    let mut words = Vec::new();
    let mut rest = n;
    for (scale, name) in SCALES {
        if rest >= scale {
            below_thousand(rest / scale, &mut words);
            words.push(name);
            rest %= scale;
        }
    }
    if rest > 0 {
        below_thousand(rest, &mut words);
    }
    words
}

fn below_thousand(n: u64, words: &mut Vec<&'static str>) {
    let hundreds = (n / 100) as usize;
    let rest = (n % 100) as usize;

    if hundreds > 0 {
        words.push(ONES[hundreds]);
        words.push("hundred");
    }
    if rest >= 20 {
        words.push(TENS[rest / 10]);
        if rest % 10 > 0 {
            words.push(ONES[rest % 10]);
        }
    } else if rest > 0 {
        words.push(ONES[rest]);
    }
}

fn join_camel(words: &[&str]) -> String {
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
