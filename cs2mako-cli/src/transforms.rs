//! CLI-specific transforms
//!
//! A transform turns the ClearSilver source read by the CLI into the text it prints or
//! writes: either the converted Mako or the scanner's token stream as JSON.

use cs2mako::{tokenize, ConvertOptions, Converter, Position, Token};

/// What the CLI produces from its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Mako,
    TokenJson,
}

/// Execute `transform` on a ClearSilver source.
pub fn execute_transform(
    source: &str,
    transform: Transform,
    options: ConvertOptions,
) -> Result<String, String> {
    match transform {
        Transform::Mako => Converter::new(options)
            .convert(source)
            .map_err(|e| format!("Conversion error: {}", e)),
        Transform::TokenJson => {
            let tokens = tokenize(source).map_err(|e| format!("Conversion error: {}", e))?;
            serde_json::to_string_pretty(&tokens_to_json(&tokens))
                .map_err(|e| format!("JSON serialization failed: {}", e))
        }
    }
}

/// Convert tokens to JSON-serializable format
fn tokens_to_json(tokens: &[(Token, Position)]) -> serde_json::Value {
    use serde_json::json;

    json!(tokens
        .iter()
        .map(|(token, position)| {
            json!({
                "token": token,
                "line": position.line,
                "column": position.column,
            })
        })
        .collect::<Vec<_>>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mako_transform_converts() {
        let out = execute_transform("<?cs var:x ?>", Transform::Mako, ConvertOptions::default());
        assert_eq!(out.unwrap(), "${ x }");
    }

    #[test]
    fn token_json_lists_tokens_with_positions() {
        let out = execute_transform("<?cs var:x ?>", Transform::TokenJson, ConvertOptions::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let tokens = value.as_array().unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0]["token"]["kind"], "open");
        assert_eq!(tokens[0]["token"]["directive"], "var");
        assert_eq!(tokens[1]["token"]["text"], "x");
        assert_eq!(tokens[1]["column"], 10);
        assert_eq!(tokens[2]["token"]["kind"], "stop");
    }

    #[test]
    fn errors_carry_context() {
        let out = execute_transform("<?cs nope ?>", Transform::Mako, ConvertOptions::default());
        assert_eq!(
            out.unwrap_err(),
            "Conversion error: unrecognized directive `nope` at line 1, column 1"
        );
    }
}
