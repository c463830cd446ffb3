//! Filter-chain rewriting for `var`
//!
//!     ClearSilver escapes values by wrapping them in function calls, Mako by piping the
//!     expression through filters: `html_escape(url_escape(x))` becomes `x | u, h`.
//!
//!     Unwrapping always removes the outermost call, so filters are discovered in reverse
//!     application order. The table is re-scanned until a full pass strips nothing, then the
//!     recorded list is reversed so Mako applies the filters in their application order.

use once_cell::sync::Lazy;
use regex::Regex;

/// Escaping calls and the Mako filter each one becomes.
const ESCAPING_CALLS: &[(&str, &str)] = &[
    (r"^\s*url_escape\(\s*(.+?)\s*\)\s*$", "u"),
    (r"^\s*html_escape\(\s*(.+?)\s*\)\s*$", "h"),
    (r"^\s*html_strip\(\s*(.+?)\s*\)\s*$", "striptags"),
    (r"^\s*js_escape\(\s*(.+?)\s*\)\s*$", "escapejs"),
];

static COMPILED_CALLS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    ESCAPING_CALLS
        .iter()
        .map(|(pattern, filter)| {
            let regex = Regex::new(pattern).expect("escaping call pattern must be a valid regex");
            (regex, *filter)
        })
        .collect()
});

/// Strip known escaping calls off `expression` and append them as a Mako filter suffix.
pub fn rewrite_filters(expression: &str) -> String {
    let mut expression = expression.to_string();
    let mut discovered = Vec::new();

    loop {
        let mut stripped_any = false;
        for (call, filter) in COMPILED_CALLS.iter() {
            let inner = call
                .captures(&expression)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string());
            if let Some(inner) = inner {
                expression = inner;
                discovered.push(*filter);
                stripped_any = true;
            }
        }
        if !stripped_any {
            break;
        }
    }

    if discovered.is_empty() {
        return expression;
    }
    discovered.reverse();
    format!("{} | {}", expression, discovered.join(", "))
}
