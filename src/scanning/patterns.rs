//! Lexical pattern table
//!
//!     The rules are tried in declaration order at every position of a line and the first
//!     one that matches wins, so the specific openers must come before the generic ones:
//!     `<?cs else?>` has no separator after the name and is only caught by its own rule,
//!     and the stop marker has to be tried before a lone `?` falls through to literal text.
//!
//!     Every pattern is anchored with `^` and matched against the remainder of the line.

use once_cell::sync::Lazy;
use regex::Regex;

/// What a matched rule turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `<?cs name:` or `<?cs name<ws>`; capture 1 is the directive name.
    OpenDirective,
    /// `<?cs #`
    CommentOpen,
    /// `<?cs else`
    ElseOpen,
    /// `<?cs /name ?>`; capture 1 is the directive name.
    CloseDirective,
    /// `?>`, swallowing any whitespace in front of it.
    Stop,
}

/// Rules in priority order. Anything that matches none of them is a literal character.
const LEXICAL_RULES: &[(Rule, &str)] = &[
    (Rule::OpenDirective, r"^<\?cs\s*([a-zA-Z]+)(?::|\s)"),
    (Rule::CommentOpen, r"^<\?cs\s*#"),
    (Rule::ElseOpen, r"^<\?cs\s*else\s*"),
    (Rule::CloseDirective, r"^<\?cs\s*/([a-zA-Z]+)\s*\?>"),
    (Rule::Stop, r"^\s*\?>"),
];

static COMPILED_RULES: Lazy<Vec<(Rule, Regex)>> = Lazy::new(|| {
    LEXICAL_RULES
        .iter()
        .map(|(rule, pattern)| {
            let regex = Regex::new(pattern).expect("lexical rule must be a valid regex");
            (*rule, regex)
        })
        .collect()
});

/// A rule match at the start of some input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    pub rule: Rule,
    /// The full matched text.
    pub lexeme: &'a str,
    /// The directive name, for rules that capture one.
    pub name: Option<&'a str>,
}

/// Match the first applicable rule at the very start of `input`.
pub fn match_rule(input: &str) -> Option<RuleMatch<'_>> {
    COMPILED_RULES.iter().find_map(|(rule, regex)| {
        regex.captures(input).map(|caps| {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            RuleMatch {
                rule: *rule,
                lexeme: whole,
                name: caps.get(1).map(|m| m.as_str()),
            }
        })
    })
}
