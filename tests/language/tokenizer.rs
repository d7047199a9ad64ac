//! Integration tests for descriptor tokenization

use grantable_foundation::ErrorKind;
use grantable_language::{Token, Tokenizer};

fn texts(input: &str) -> Vec<String> {
    Tokenizer::tokenize(input)
        .unwrap()
        .into_iter()
        .map(|t| t.as_str().to_string())
        .collect()
}

// =============================================================================
// Splitting
// =============================================================================

#[test]
fn groups_stay_whole() {
    assert_eq!(texts("a,(b,c),d"), ["a", "(b,c)", "d"]);
}

#[test]
fn tokens_are_trimmed_and_empties_dropped() {
    assert_eq!(texts("  $5 ,, #vip ,  "), ["$5", "#vip"]);
    assert!(texts("").is_empty());
    assert!(texts(" , , ").is_empty());
}

#[test]
fn nested_groups_are_one_token() {
    let tokens = Tokenizer::tokenize("$1, ($2, ($3, $4)), $5").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1], Token::Group("($2, ($3, $4))".to_string()));
    assert!(!tokens[0].is_group());
}

#[test]
fn spaces_inside_tokens_survive() {
    assert_eq!(texts("@speed II 30s, diamond_sword 16:5"), [
        "@speed II 30s",
        "diamond_sword 16:5"
    ]);
}

// =============================================================================
// Malformed Groups
// =============================================================================

#[test]
fn unmatched_parentheses_fail() {
    for input in ["(a, b", "a, b)", "((a)", "a, (b, c"] {
        let err = Tokenizer::tokenize(input).unwrap_err();
        assert!(
            matches!(err.kind, ErrorKind::MalformedGroup { .. }),
            "{input:?}"
        );
    }
}

#[test]
fn text_after_group_fails() {
    let err = Tokenizer::tokenize("(a, b) c, d").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedGroup { position: 7, .. }));
}
