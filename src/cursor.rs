//! Lookahead cursor
//!
//!     The emission engine pulls tokens one at a time and never needs to look further than the
//!     next one, which is how `elif` and `else` bodies find out that the owning `if` is about to
//!     close without consuming its close tag.
//!
//!     The cursor also carries the only mutable state shared by the recursive emission: how
//!     many tokens have been consumed so far (diagnostics only) and the signed nesting depth of
//!     indentation-affecting blocks. Top level is depth `-1`; a block raises it before printing
//!     its own control line, so the outermost `% if` lands at depth 0.

use crate::token::{Position, Token};

/// Depth in effect outside of any `if`, `each` or `loop`.
pub const TOP_LEVEL_DEPTH: i32 = -1;

#[derive(Debug)]
pub struct Cursor {
    /// Unconsumed tokens, stored last-first so consumption is a `pop`.
    pending: Vec<(Token, Position)>,
    consumed: usize,
    depth: i32,
}

impl Cursor {
    pub fn new(mut tokens: Vec<(Token, Position)>) -> Self {
        tokens.reverse();
        Cursor {
            pending: tokens,
            consumed: 0,
            depth: TOP_LEVEL_DEPTH,
        }
    }

    /// The next token, left in place.
    pub fn peek(&self) -> Option<&Token> {
        self.pending.last().map(|(token, _)| token)
    }

    /// Consume the next token.
    pub fn advance(&mut self) -> Option<(Token, Position)> {
        let next = self.pending.pop()?;
        self.consumed += 1;
        log::trace!("#{} consumed {:?} at {}", self.consumed, next.0, next.1);
        Some(next)
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of tokens consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Indentation for a control line at the current depth.
    pub fn indentation(&self, unit: &str) -> String {
        unit.repeat(self.depth.max(0) as usize)
    }

    /// Run `f` one level deeper, restoring the previous depth afterwards whether or not `f`
    /// succeeds.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.depth;
        self.depth += 1;
        let result = f(self);
        self.depth = saved;
        result
    }
}
