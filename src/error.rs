//! Conversion errors
//!
//! Every error aborts the conversion of the whole document. Each variant names the
//! directive involved and where it starts so the template can be fixed by hand.

use crate::token::{Directive, Position};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// `<?cs name` where `name` is not a supported directive.
    #[error("unrecognized directive `{name}` at {position}")]
    UnknownDirective { name: String, position: Position },

    /// A block or branch body ran into the end of the document.
    #[error("`{directive}` opened at {position} is never closed by `<?cs /{closer} ?>`")]
    UnclosedBlock {
        directive: Directive,
        closer: &'static str,
        position: Position,
    },

    /// An argument clause ran into the end of the document before `?>`.
    #[error("`{directive}` at {position} is missing its closing `?>`")]
    UnterminatedDirective {
        directive: Directive,
        position: Position,
    },
}

impl ConvertError {
    /// Where in the source the offending directive starts.
    pub fn position(&self) -> Position {
        match self {
            ConvertError::UnknownDirective { position, .. }
            | ConvertError::UnclosedBlock { position, .. }
            | ConvertError::UnterminatedDirective { position, .. } => *position,
        }
    }
}
