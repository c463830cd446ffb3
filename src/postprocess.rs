//! Post-processing of the assembled Mako output
//!
//! Control lines are always emitted as `\` + newline + indentation + `% ...`, so they start
//! on a fresh line no matter what came before. When the preceding text already ended a
//! line, that leaves a line holding nothing but whitespace and the continuation, which is
//! removed here.

use once_cell::sync::Lazy;
use regex::Regex;

static BARE_CONTINUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\\\r?\n").expect("valid continuation pattern"));

/// Remove lines consisting only of optional indentation and a `\` continuation.
pub fn post_process(converted: &str) -> String {
    BARE_CONTINUATION.replace_all(converted, "").into_owned()
}
