//! One-line-per-statement token dump

use crate::delphi::lexer::{Lexeme, Token};

/// Render lexemes as `<kind>` markers, `<kind:text>` for tokens that carry
/// source text. A line break follows every `;`.
pub fn to_simple_str(lexemes: &[Lexeme]) -> String {
    let mut result = String::new();
    for lexeme in lexemes {
        if lexeme.token.is_word() {
            let kind = lexeme.token.to_string();
            let kind = kind.trim_start_matches('<').trim_end_matches('>');
            result.push_str(&format!("<{}:{}>", kind, lexeme.text));
        } else {
            result.push_str(&lexeme.token.to_string());
        }
        if matches!(lexeme.token, Token::Semicolon | Token::EndOfInput) {
            result.push('\n');
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delphi::lexer::tokenize;

    #[test]
    fn test_simple_format() {
        let lexemes = tokenize("unit Unit001;\n.").unwrap();
        assert_eq!(
            to_simple_str(&lexemes),
            "<unit><ident:Unit001><semicolon>\n<period><end-of-input>\n"
        );
    }

    #[test]
    fn test_literals_keep_source_text() {
        let lexemes = tokenize("'it''s' 42").unwrap();
        assert_eq!(
            to_simple_str(&lexemes),
            "<string-literal:'it''s'><number:42><end-of-input>\n"
        );
    }
}
