//! # cs2mako
//!
//! Converts ClearSilver templates into Mako templates.
//!
//!     ClearSilver markup such as
//!
//!         <?cs if:item.count > #0 ?><?cs var:html_escape(item.name) ?><?cs /if ?>
//!
//!     comes out as the equivalent Mako
//!
//!         % if item.count > int(0):
//!         ${ item.name | h }\
//!         % endif
//!
//!     Control flow (`if`/`elif`/`else`, `each`, `loop`), macros (`def`, `call`), includes,
//!     interpolation (`var`, `alt`, `name`), assignments (`set`) and comments are supported.
//!     Any other directive is rejected.
//!
//! Pipeline
//!
//!     1. [scanning] splits the document into tokens using an ordered pattern table.
//!     2. [cursor] wraps the tokens with one token of lookahead and the nesting depth.
//!     3. [emitting] drives the per-directive rules in [token::Directive::spec], rewriting
//!        expressions through [expression] on the way.
//!     4. [postprocess] drops the line-continuation artifacts of generated control lines.
//!
//!     The conversion is a pure function of its input: no I/O happens and nothing is shared
//!     between calls.

pub mod cursor;
pub mod emitting;
pub mod error;
pub mod expression;
pub mod options;
pub mod postprocess;
pub mod scanning;
pub mod token;

pub use cursor::Cursor;
pub use emitting::Emitter;
pub use error::ConvertError;
pub use options::ConvertOptions;
pub use scanning::tokenize;
pub use token::{Directive, Position, Token};

/// Converts ClearSilver documents with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Converter { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert one ClearSilver document into Mako.
    pub fn convert(&self, source: &str) -> Result<String, ConvertError> {
        let tokens = tokenize(source)?;
        let mut cursor = Cursor::new(tokens);
        let emitted = Emitter::new(&self.options).emit_all(&mut cursor)?;
        log::debug!("emitted {} tokens", cursor.consumed());
        Ok(postprocess::post_process(&emitted))
    }
}

/// Convert a ClearSilver document into Mako using the default options.
pub fn convert(source: &str) -> Result<String, ConvertError> {
    Converter::default().convert(source)
}
