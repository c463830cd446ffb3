//! Expression rewriting
//!
//!     ClearSilver and Mako expressions mostly share their syntax: dotted names, comparisons,
//!     arithmetic and calls pass through untouched. What differs is rewritten here with
//!     ordered substitutions:
//!
//!         #N      ->  int(N)
//!         !x      ->  not x      (`!=` is left alone)
//!         a || b  ->  a or b
//!         a && b  ->  a and b
//!
//!     Order matters: negation runs before the boolean operators and skips `!=`, so comparisons
//!     survive. Sanitizing its own output changes nothing.
//!
//!     The directive-specific rewrites (`set`, `each`, `loop`, `include`) sit on top of
//!     [sanitize]; the `var` filter chain lives in [filters].

pub mod filters;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub use filters::rewrite_filters;

static NUMERIC_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#+([a-zA-Z0-9._]+)").expect("valid numeric literal pattern"));
static NEGATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*!(=)?\s*").expect("valid negation pattern"));
static LOGICAL_OR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\|\|\s*").expect("valid logical or pattern"));
static LOGICAL_AND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*&&\s*").expect("valid logical and pattern"));
static ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*=\s*").expect("valid assignment pattern"));
static DOTTED_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9_.]+").expect("valid dotted path pattern"));

/// Rewrite ClearSilver operators and numeric literals into their Python spelling.
pub fn sanitize(expression: &str) -> String {
    let expression = NUMERIC_LITERAL.replace_all(expression, "int(${1})");
    let expression = negate(&expression);
    let expression = LOGICAL_OR.replace_all(&expression, " or ");
    LOGICAL_AND.replace_all(&expression, " and ").into_owned()
}

/// `!` becomes ` not ` unless it is part of `!=` or has nothing left to negate.
fn negate(expression: &str) -> String {
    NEGATION
        .replace_all(expression, |caps: &Captures| {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            let is_inequality = caps.get(1).is_some();
            let at_end = expression[whole.end..].is_empty();
            if is_inequality || at_end {
                expression[whole].to_string()
            } else {
                " not ".to_string()
            }
        })
        .into_owned()
}

/// `set`: assignments to a dotted path become a setter call so the data shim can create the
/// intermediate nodes.
pub fn rewrite_set(expression: &str, setter: &str) -> String {
    let Some((target, value)) = expression.split_once('=') else {
        return expression.to_string();
    };
    if !target.contains('.') {
        return expression.to_string();
    }
    match DOTTED_PATH.find(target) {
        Some(path) => format!("{}(\"{}\", {})", setter, path.as_str(), value.trim()),
        None => expression.to_string(),
    }
}

/// `each:item = list` -> `item in list`
pub fn rewrite_each(expression: &str) -> String {
    ASSIGNMENT.replacen(expression, 1, " in ").into_owned()
}

/// `loop:i = start, end, step` -> `i in range(start, end, step)`
pub fn rewrite_loop(expression: &str) -> String {
    let mut rewritten = ASSIGNMENT.replacen(expression, 1, " in range(").into_owned();
    rewritten.push(')');
    rewritten
}

/// ClearSilver includes are rooted paths, Mako's are relative unless they start at `root`.
pub fn rewrite_include(fragment: &str, root: &str) -> String {
    fragment.replacen('"', &format!("\"{}", root), 1)
}
