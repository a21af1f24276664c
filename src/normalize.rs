//! Variable name to token key normalization.
use regex::Regex;
use std::sync::OnceLock;

struct Patterns {
    whitespace: Regex,
    slashes: Regex,
    underscores: Regex,
    dashes: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        whitespace: Regex::new(r"\s+").expect("regex for whitespace runs"),
        slashes: Regex::new(r"[/\\]").expect("regex for path separators"),
        underscores: Regex::new(r"_{2,}").expect("regex for underscore runs"),
        dashes: Regex::new(r"-{2,}").expect("regex for dash runs"),
    })
}

/// Canonical token key for a raw variable name, e.g. `"Primary / 100"` to
/// `"primary-100"`.
///
/// Idempotent: the output contains no whitespace, separators, or repeated
/// `_`/`-`, so a second pass changes nothing.
pub fn normalize_name(raw: &str) -> String {
    let p = patterns();
    let name = raw.trim();
    let name = p.whitespace.replace_all(name, "-");
    let name = p.slashes.replace_all(&name, "-");
    let name = p.underscores.replace_all(&name, "_");
    let name = p.dashes.replace_all(&name, "-");
    name.to_lowercase()
}
