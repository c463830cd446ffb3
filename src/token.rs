//! Token types shared by the scanner, the cursor and the emission engine.
//!
//!     The scanner produces a flat stream of four token kinds. Only directive openers carry
//!     semantics of their own; closers, stop markers and literal runs are echoed back verbatim
//!     unless an enclosing directive consumes them.
//!
//! Directives
//!
//!     The set of supported ClearSilver directives is closed. [Directive::from_name] is the
//!     single place where a directive name found in the source is resolved, and
//!     [Directive::spec] maps each variant to the static metadata that drives its emission.
//!     Adding a directive means adding a variant: the compiler then points at every table
//!     that must learn about it.

use serde::Serialize;
use std::fmt;

/// 1-based location of a token's first character in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A scanned token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Token {
    /// `<?cs name:` or `<?cs name ` (also `<?cs #` and `<?cs else`)
    Open { directive: Directive, lexeme: String },
    /// `<?cs /name ?>`
    Close { name: String, lexeme: String },
    /// `?>` together with any whitespace before it
    Stop { lexeme: String },
    /// Anything else, newlines included
    Literal { text: String },
}

impl Token {
    /// The text this token contributes when echoed back unchanged.
    pub fn raw_text(&self) -> &str {
        match self {
            Token::Open { lexeme, .. } | Token::Close { lexeme, .. } | Token::Stop { lexeme } => {
                lexeme
            }
            Token::Literal { text } => text,
        }
    }

    /// Whether this token closes the directive called `name`.
    pub fn closes(&self, name: &str) -> bool {
        matches!(self, Token::Close { name: closed, .. } if closed == name)
    }
}

/// The supported ClearSilver directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Directive {
    Var,
    Set,
    Include,
    Comment,
    Def,
    Name,
    Call,
    If,
    Elif,
    Else,
    Alt,
    Each,
    Loop,
}

/// How much of the token stream a directive owns after its argument clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Nothing beyond the argument clause.
    TagOnly,
    /// A body terminated by consuming `<?cs /name ?>`.
    Block,
    /// A body terminated when lookahead reaches `<?cs /if ?>`, which is left for the owning `if`.
    Branch,
}

/// What a directive emits once its body is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosePolicy {
    Nothing,
    /// `</%name>`
    Synthesize,
    /// A continued, indentation-matched control line such as `% endif`.
    EndLine(&'static str),
}

/// Static emission metadata for one directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveSpec {
    pub start: &'static str,
    pub end: &'static str,
    pub shape: Shape,
    pub close: ClosePolicy,
    /// Start marker goes on its own line, preceded by a continuation and indentation.
    pub continued: bool,
    pub adds_depth: bool,
}

const fn tag(start: &'static str, end: &'static str) -> DirectiveSpec {
    DirectiveSpec {
        start,
        end,
        shape: Shape::TagOnly,
        close: ClosePolicy::Nothing,
        continued: false,
        adds_depth: false,
    }
}

const fn control(start: &'static str, end: &'static str, shape: Shape) -> DirectiveSpec {
    DirectiveSpec {
        start,
        end,
        shape,
        close: ClosePolicy::Nothing,
        continued: true,
        adds_depth: false,
    }
}

const fn nesting(start: &'static str, end: &'static str, close: &'static str) -> DirectiveSpec {
    DirectiveSpec {
        shape: Shape::Block,
        close: ClosePolicy::EndLine(close),
        adds_depth: true,
        ..control(start, end, Shape::Block)
    }
}

const VAR: DirectiveSpec = tag("${ ", " }");
const SET: DirectiveSpec = tag("<% ", " %>");
const INCLUDE: DirectiveSpec = tag("<%include file=", "/>");
const COMMENT: DirectiveSpec = tag("<%doc>", "</%doc>");
const DEF: DirectiveSpec = DirectiveSpec {
    shape: Shape::Block,
    close: ClosePolicy::Synthesize,
    ..tag("<%def name=\"", "\">")
};
const NAME: DirectiveSpec = tag("${name(", ")}");
const CALL: DirectiveSpec = tag("${", "}");
const IF: DirectiveSpec = nesting("% if ", ":\n", "% endif\n");
const ELIF: DirectiveSpec = control("% elif ", ":\n", Shape::Branch);
const ELSE: DirectiveSpec = control("% else:\n", "", Shape::Branch);
const ALT: DirectiveSpec = tag("${ ", " }");
const EACH: DirectiveSpec = nesting("% for ", ":\n", "% endfor\n");
const LOOP: DirectiveSpec = EACH;

impl Directive {
    /// Resolve a directive name as written after `<?cs`.
    pub fn from_name(name: &str) -> Option<Self> {
        let directive = match name {
            "var" => Directive::Var,
            "set" => Directive::Set,
            "include" => Directive::Include,
            "#" | "comment" => Directive::Comment,
            "def" => Directive::Def,
            "name" => Directive::Name,
            "call" => Directive::Call,
            "if" => Directive::If,
            "elif" | "elseif" => Directive::Elif,
            "else" => Directive::Else,
            "alt" => Directive::Alt,
            "each" => Directive::Each,
            "loop" => Directive::Loop,
            _ => return None,
        };
        Some(directive)
    }

    /// Canonical name, also the name its close tag must carry.
    pub fn name(self) -> &'static str {
        match self {
            Directive::Var => "var",
            Directive::Set => "set",
            Directive::Include => "include",
            Directive::Comment => "comment",
            Directive::Def => "def",
            Directive::Name => "name",
            Directive::Call => "call",
            Directive::If => "if",
            Directive::Elif => "elif",
            Directive::Else => "else",
            Directive::Alt => "alt",
            Directive::Each => "each",
            Directive::Loop => "loop",
        }
    }

    pub fn spec(self) -> &'static DirectiveSpec {
        match self {
            Directive::Var => &VAR,
            Directive::Set => &SET,
            Directive::Include => &INCLUDE,
            Directive::Comment => &COMMENT,
            Directive::Def => &DEF,
            Directive::Name => &NAME,
            Directive::Call => &CALL,
            Directive::If => &IF,
            Directive::Elif => &ELIF,
            Directive::Else => &ELSE,
            Directive::Alt => &ALT,
            Directive::Each => &EACH,
            Directive::Loop => &LOOP,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elseif_is_an_alias_of_elif() {
        assert_eq!(Directive::from_name("elseif"), Some(Directive::Elif));
        assert_eq!(Directive::from_name("elif"), Some(Directive::Elif));
    }

    #[test]
    fn test_unknown_names_do_not_resolve() {
        assert_eq!(Directive::from_name("with"), None);
        assert_eq!(Directive::from_name("IF"), None);
    }

    #[test]
    fn test_only_if_each_and_loop_add_depth() {
        let nesting: Vec<_> = [
            Directive::Var,
            Directive::Set,
            Directive::Include,
            Directive::Comment,
            Directive::Def,
            Directive::Name,
            Directive::Call,
            Directive::If,
            Directive::Elif,
            Directive::Else,
            Directive::Alt,
            Directive::Each,
            Directive::Loop,
        ]
        .into_iter()
        .filter(|d| d.spec().adds_depth)
        .collect();

        assert_eq!(nesting, vec![Directive::If, Directive::Each, Directive::Loop]);
    }

    #[test]
    fn test_branches_never_close() {
        for directive in [Directive::Elif, Directive::Else] {
            let spec = directive.spec();
            assert_eq!(spec.shape, Shape::Branch);
            assert_eq!(spec.close, ClosePolicy::Nothing);
            assert!(spec.continued);
        }
    }

    #[test]
    fn test_token_closes_matches_name() {
        let close = Token::Close {
            name: "if".to_string(),
            lexeme: "<?cs /if ?>".to_string(),
        };
        assert!(close.closes("if"));
        assert!(!close.closes("each"));
        assert_eq!(close.raw_text(), "<?cs /if ?>");
    }
}
