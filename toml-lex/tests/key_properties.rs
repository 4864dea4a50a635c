use quickcheck_macros::quickcheck;
use toml_lex::{LexState, Lexer, Token};

/// Restricts arbitrary strings to the bare-key alphabet so the generated
/// input is always a single well-formed key.
fn bare_key_chars(raw: String) -> String {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if filtered.is_empty() {
        "k".to_string()
    } else {
        filtered
    }
}

#[quickcheck]
fn bare_key_lexes_as_a_single_unquoted_key(raw: String) -> bool {
    let key = bare_key_chars(raw);
    let mut lexer = Lexer::new(&key);
    match lexer.next_token(LexState::ExpectExpression) {
        Ok(Some((Token::UnquotedKey(text), _))) => text == key,
        _ => false,
    }
}

#[quickcheck]
fn bare_key_followed_by_eof_has_no_trailing_token(raw: String) -> bool {
    let key = bare_key_chars(raw);
    let mut lexer = Lexer::new(&key);
    let _ = lexer.next_token(LexState::ExpectExpression);
    matches!(lexer.next_token(LexState::ExpectEol), Ok(None))
}
