//! Emission engine
//!
//!     Converts the token stream into Mako by pulling tokens through a [Cursor]. Closers, stop
//!     markers and literal text are echoed back as they are. A directive opener takes over the
//!     cursor and consumes everything it owns:
//!
//!         1. its start marker (control lines first break the line and indent)
//!         2. its argument clause, every token up to the next `?>`, rewritten per directive
//!         3. its end marker
//!         4. for blocks, the body up to the matching `<?cs /name ?>`; for `elif` and `else`,
//!            the body up to (but excluding) the `<?cs /if ?>` of the owning `if`
//!         5. whatever its close policy asks for
//!
//!     Bodies are emitted by recursing into [Emitter::emit], so nested directives are handled
//!     by the same rules, pushdown style.
//!
//! Indentation
//!
//!     `if`, `each` and `loop` run one level deeper than their surroundings for their whole
//!     emission: start line, body and end line. `elif` and `else` reuse the depth of the `if`
//!     they belong to. Directive bodies themselves are never re-indented; only the generated
//!     `%` control lines are.

use crate::cursor::Cursor;
use crate::error::ConvertError;
use crate::expression;
use crate::options::ConvertOptions;
use crate::token::{ClosePolicy, Directive, Position, Shape, Token};

/// Emits Mako for tokens pulled from a [Cursor].
#[derive(Debug, Clone, Copy)]
pub struct Emitter<'a> {
    options: &'a ConvertOptions,
}

impl<'a> Emitter<'a> {
    pub fn new(options: &'a ConvertOptions) -> Self {
        Emitter { options }
    }

    /// Emit everything left in the cursor.
    pub fn emit_all(&self, cursor: &mut Cursor) -> Result<String, ConvertError> {
        let mut out = String::new();
        while let Some((token, position)) = cursor.advance() {
            out.push_str(&self.emit(token, position, cursor)?);
        }
        Ok(out)
    }

    /// Emit one already consumed token, pulling whatever else it owns from `cursor`.
    pub fn emit(
        &self,
        token: Token,
        position: Position,
        cursor: &mut Cursor,
    ) -> Result<String, ConvertError> {
        match token {
            Token::Open { directive, .. } => self.emit_directive(directive, position, cursor),
            Token::Close { lexeme, .. } | Token::Stop { lexeme } => Ok(lexeme),
            Token::Literal { text } => Ok(text),
        }
    }

    fn emit_directive(
        &self,
        directive: Directive,
        position: Position,
        cursor: &mut Cursor,
    ) -> Result<String, ConvertError> {
        log::debug!("opening `{}` at {} (depth {})", directive, position, cursor.depth());
        match directive {
            Directive::Alt => self.emit_alt(position, cursor),
            _ if directive.spec().adds_depth => {
                cursor.nested(|cursor| self.emit_tag(directive, position, cursor))
            }
            _ => self.emit_tag(directive, position, cursor),
        }
    }

    fn emit_tag(
        &self,
        directive: Directive,
        position: Position,
        cursor: &mut Cursor,
    ) -> Result<String, ConvertError> {
        let spec = directive.spec();
        let mut out = String::new();

        if spec.continued {
            out.push_str(&self.continuation(cursor));
        }
        out.push_str(spec.start);
        let arguments = self.emit_arguments(directive, position, cursor)?;
        out.push_str(&self.rewrite_arguments(directive, &arguments));
        out.push_str(spec.end);

        match spec.shape {
            Shape::TagOnly => {}
            Shape::Block => out.push_str(&self.emit_block_body(directive, position, cursor)?),
            Shape::Branch => out.push_str(&self.emit_branch_body(directive, position, cursor)?),
        }

        match spec.close {
            ClosePolicy::Nothing => {}
            ClosePolicy::Synthesize => {
                out.push_str("</%");
                out.push_str(directive.name());
                out.push('>');
            }
            ClosePolicy::EndLine(line) => {
                out.push_str(&self.continuation(cursor));
                out.push_str(line);
            }
        }
        Ok(out)
    }

    /// `<?cs alt:var ?>fallback<?cs /alt ?>` -> `${ var if var else "fallback" }`
    fn emit_alt(&self, position: Position, cursor: &mut Cursor) -> Result<String, ConvertError> {
        let spec = Directive::Alt.spec();
        let variable = self.emit_arguments(Directive::Alt, position, cursor)?.concat();
        let fallback = self.emit_block_body(Directive::Alt, position, cursor)?;
        Ok(format!(
            "{}{} if {} else \"{}\"{}",
            spec.start,
            variable,
            variable,
            quote_escaped(&fallback),
            spec.end
        ))
    }

    /// Everything up to the next stop marker, one fragment per token. The marker is dropped.
    fn emit_arguments(
        &self,
        directive: Directive,
        position: Position,
        cursor: &mut Cursor,
    ) -> Result<Vec<String>, ConvertError> {
        let mut fragments = Vec::new();
        loop {
            let (token, at) = cursor
                .advance()
                .ok_or(ConvertError::UnterminatedDirective {
                    directive,
                    position,
                })?;
            if matches!(token, Token::Stop { .. }) {
                return Ok(fragments);
            }
            fragments.push(self.emit(token, at, cursor)?);
        }
    }

    fn rewrite_arguments(&self, directive: Directive, fragments: &[String]) -> String {
        let joined = fragments.concat();
        match directive {
            Directive::Var => expression::rewrite_filters(&expression::sanitize(&joined)),
            Directive::Set => {
                expression::rewrite_set(&expression::sanitize(&joined), &self.options.setter)
            }
            Directive::Include => {
                expression::rewrite_include(&joined, &self.options.include_root)
            }
            Directive::Def => fragments.iter().map(|fragment| fragment.trim()).collect(),
            Directive::If | Directive::Elif => expression::sanitize(&joined),
            Directive::Each => expression::rewrite_each(&expression::sanitize(&joined)),
            Directive::Loop => expression::rewrite_loop(&expression::sanitize(&joined)),
            Directive::Comment
            | Directive::Name
            | Directive::Call
            | Directive::Else
            | Directive::Alt => joined,
        }
    }

    /// Body of a block, up to and including its own close tag.
    fn emit_block_body(
        &self,
        directive: Directive,
        position: Position,
        cursor: &mut Cursor,
    ) -> Result<String, ConvertError> {
        log::debug!("body of `{}` opened at {}", directive, position);
        let mut out = String::new();
        loop {
            let (token, at) = cursor
                .advance()
                .ok_or_else(|| unclosed(directive, directive.name(), position))?;
            if token.closes(directive.name()) {
                return Ok(out);
            }
            out.push_str(&self.emit(token, at, cursor)?);
        }
    }

    /// Body of an `elif` or `else`, up to the owning `if`'s close tag, which stays unconsumed.
    fn emit_branch_body(
        &self,
        directive: Directive,
        position: Position,
        cursor: &mut Cursor,
    ) -> Result<String, ConvertError> {
        let owner = Directive::If.name();
        let mut out = String::new();
        while !cursor.peek().is_some_and(|token| token.closes(owner)) {
            let (token, at) = cursor
                .advance()
                .ok_or_else(|| unclosed(directive, owner, position))?;
            out.push_str(&self.emit(token, at, cursor)?);
        }
        Ok(out)
    }

    /// Line break plus indentation in front of a `%` control line.
    fn continuation(&self, cursor: &Cursor) -> String {
        format!("\\\n{}", cursor.indentation(&self.options.indent))
    }
}

/// Escape `fallback` for use between double quotes in a Python string literal.
fn quote_escaped(fallback: &str) -> String {
    fallback.replace('\\', "\\\\").replace('"', "\\\"")
}

fn unclosed(directive: Directive, closer: &'static str, position: Position) -> ConvertError {
    ConvertError::UnclosedBlock {
        directive,
        closer,
        position,
    }
}
