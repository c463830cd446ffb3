//! Property-based tests for the converter
//!
//! These check the invariants that hold for any input rather than particular outputs:
//! sanitizing is stable, plain text survives untouched, nesting depth always unwinds and
//! filter chains come out in application order.

use cs2mako::cursor::TOP_LEVEL_DEPTH;
use cs2mako::expression::sanitize;
use cs2mako::{convert, tokenize, ConvertOptions, Cursor, Emitter};
use proptest::prelude::*;

const FILTERS: [(&str, &str); 4] = [
    ("url_escape", "u"),
    ("html_escape", "h"),
    ("html_strip", "striptags"),
    ("js_escape", "escapejs"),
];

fn nested_ifs(depth: usize) -> String {
    let mut source = String::new();
    for level in 0..depth {
        source.push_str(&format!("<?cs if c{} ?>\n", level));
    }
    source.push_str("body\n");
    for _ in 0..depth {
        source.push_str("<?cs /if ?>\n");
    }
    source
}

proptest! {
    #[test]
    fn sanitize_is_idempotent(expression in "[a-z0-9 #!=|&.()]{0,24}") {
        let once = sanitize(&expression);
        prop_assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn text_without_markup_is_unchanged(text in "[a-zA-Z0-9 \t\n.,:;=?>()\"'-]{0,80}") {
        prop_assert_eq!(convert(&text).unwrap(), text);
    }

    #[test]
    fn conversion_is_deterministic(depth in 0usize..6, text in "[a-z ]{0,12}") {
        let source = format!("{}{}", text, nested_ifs(depth));
        prop_assert_eq!(convert(&source).unwrap(), convert(&source).unwrap());
    }

    #[test]
    fn nesting_depth_unwinds(depth in 0usize..10) {
        let options = ConvertOptions::default();
        let mut cursor = Cursor::new(tokenize(&nested_ifs(depth)).unwrap());
        let emitted = Emitter::new(&options).emit_all(&mut cursor);
        prop_assert!(emitted.is_ok());
        prop_assert_eq!(cursor.depth(), TOP_LEVEL_DEPTH);
        prop_assert!(cursor.is_exhausted());
    }

    #[test]
    fn innermost_if_is_indented_by_its_depth(depth in 1usize..10) {
        let converted = convert(&nested_ifs(depth)).unwrap();
        let innermost = format!("\n{}% if c{}:\n", "  ".repeat(depth - 1), depth - 1);
        let prefixed = format!("\n{}", converted);
        prop_assert!(prefixed.contains(&innermost), "missing {:?} in {:?}", innermost, converted);
    }

    #[test]
    fn filters_are_listed_in_application_order(applied in prop::collection::vec(0usize..4, 0..5)) {
        let mut expression = "x".to_string();
        for &index in &applied {
            expression = format!("{}({})", FILTERS[index].0, expression);
        }
        let expected = if applied.is_empty() {
            "${ x }".to_string()
        } else {
            let names: Vec<&str> = applied.iter().map(|&index| FILTERS[index].1).collect();
            format!("${{ x | {} }}", names.join(", "))
        };
        prop_assert_eq!(convert(&format!("<?cs var:{} ?>", expression)).unwrap(), expected);
    }
}
