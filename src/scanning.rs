//! Scanner
//!
//!     Turns a ClearSilver document into a flat token stream. The document is scanned one line
//!     at a time: directive markup never needs to match across the line boundary, only literal
//!     text does, so every line break is fed back into the current literal run.
//!
//!     At each position the [patterns] table decides what comes next. Characters no rule claims
//!     are collected into a single literal run which is flushed whenever a real token
//!     interrupts it.
//!
//!     The stream always ends with an empty literal. Consumers that pull "one more" token after
//!     the last close tag get that sentinel instead of running dry.

pub mod patterns;

use crate::error::ConvertError;
use crate::token::{Directive, Position, Token};
use patterns::{match_rule, Rule};

/// Scan `source` into tokens paired with their starting positions.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Position)>, ConvertError> {
    let mut tokens = Vec::new();
    let mut literal = PendingLiteral::default();
    let mut end_of_previous_line = Position::new(1, 1);

    for (index, line) in source.split('\n').enumerate() {
        let line_number = index + 1;
        if index > 0 {
            literal.push('\n', end_of_previous_line);
        }

        let mut offset = 0;
        let mut column = 1;
        while offset < line.len() {
            let rest = &line[offset..];
            let position = Position::new(line_number, column);

            let Some(matched) = match_rule(rest) else {
                // `rest` is never empty inside the loop
                let ch = rest.chars().next().unwrap_or_default();
                literal.push(ch, position);
                offset += ch.len_utf8();
                column += 1;
                continue;
            };

            literal.flush_into(&mut tokens);
            let lexeme = matched.lexeme.to_string();
            let token = match matched.rule {
                Rule::OpenDirective => {
                    let name = matched.name.unwrap_or_default();
                    let directive = Directive::from_name(name).ok_or_else(|| {
                        ConvertError::UnknownDirective {
                            name: name.to_string(),
                            position,
                        }
                    })?;
                    Token::Open { directive, lexeme }
                }
                Rule::CommentOpen => Token::Open {
                    directive: Directive::Comment,
                    lexeme,
                },
                Rule::ElseOpen => Token::Open {
                    directive: Directive::Else,
                    lexeme,
                },
                Rule::CloseDirective => Token::Close {
                    name: matched.name.unwrap_or_default().to_string(),
                    lexeme,
                },
                Rule::Stop => Token::Stop { lexeme },
            };
            log::trace!("scanned {:?} at {}", token, position);
            tokens.push((token, position));

            offset += matched.lexeme.len();
            column += matched.lexeme.chars().count();
        }

        end_of_previous_line = Position::new(line_number, column);
    }

    literal.flush_into(&mut tokens);
    tokens.push((
        Token::Literal {
            text: String::new(),
        },
        end_of_previous_line,
    ));

    log::debug!("scanned {} tokens", tokens.len());
    Ok(tokens)
}

/// Literal characters waiting for the next real token.
#[derive(Debug, Default)]
struct PendingLiteral {
    text: String,
    start: Option<Position>,
}

impl PendingLiteral {
    fn push(&mut self, ch: char, position: Position) {
        self.start.get_or_insert(position);
        self.text.push(ch);
    }

    fn flush_into(&mut self, tokens: &mut Vec<(Token, Position)>) {
        if let Some(start) = self.start.take() {
            let text = std::mem::take(&mut self.text);
            tokens.push((Token::Literal { text }, start));
        }
    }
}
