//! Positioned parse errors and the shape assertions that raise them.
//!
//! The first error raised anywhere aborts the parse; there is no recovery.

use super::lexer::{Token, TokenKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token of the wrong kind sat where a specific kind was required.
    #[error("Expecting {expected}; Found {found}")]
    ExpectingFound {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },

    /// A construct could not be recognised at all.
    #[error("Expecting {expected}")]
    Syntax {
        expected: String,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::ExpectingFound { line, .. } | ParseError::Syntax { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            ParseError::ExpectingFound { column, .. } | ParseError::Syntax { column, .. } => {
                *column
            }
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// `Expecting <expected>; Found '<token text>'`, positioned at `found`.
pub fn expecting_found(expected: impl Into<String>, found: &Token) -> ParseError {
    ParseError::ExpectingFound {
        expected: expected.into(),
        found: format!("'{}'", found.text),
        line: found.line,
        column: found.column,
    }
}

/// `Expecting <expected>`, positioned at `at`.
pub fn syntax(expected: impl Into<String>, at: &Token) -> ParseError {
    ParseError::Syntax {
        expected: expected.into(),
        line: at.line,
        column: at.column,
    }
}

/// Delimiters are quoted, `Text` is named by category.
fn describe(kind: TokenKind) -> String {
    match kind {
        TokenKind::Text => format!("Value of type '{kind}'"),
        _ => format!("'{kind}'"),
    }
}

pub fn expect_kind(token: &Token, kind: TokenKind) -> Result<(), ParseError> {
    if token.kind == kind {
        Ok(())
    } else {
        Err(expecting_found(describe(kind), token))
    }
}

/// Checks that `tokens` starts with `kinds`, in order. Reports the first
/// mismatch.
pub fn expect(tokens: &[Token], kinds: &[TokenKind]) -> Result<(), ParseError> {
    for (i, &kind) in kinds.iter().enumerate() {
        match tokens.get(i) {
            Some(token) => expect_kind(token, kind)?,
            None => {
                let (line, column) = tokens.last().map_or((0, 0), |t| (t.line, t.column));
                return Err(ParseError::Syntax {
                    expected: describe(kind),
                    line,
                    column,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_matches_prefix() {
        let tokens = vec![
            Token::new(TokenKind::LBracket, "[", 1, 2),
            Token::new(TokenKind::Text, "Rain", 1, 6),
            Token::new(TokenKind::RBracket, "]", 1, 7),
            Token::end_of_input(1, 7),
        ];
        assert_eq!(
            expect(&tokens, &[TokenKind::LBracket, TokenKind::Text, TokenKind::RBracket]),
            Ok(())
        );
    }

    #[test]
    fn test_expect_reports_first_mismatch() {
        let tokens = vec![
            Token::new(TokenKind::LBracket, "[", 1, 2),
            Token::new(TokenKind::Text, "Rain", 1, 6),
            Token::new(TokenKind::VerticalBar, "|", 1, 7),
            Token::new(TokenKind::Tilde, "~", 1, 8),
        ];
        let test_cases = vec![
            (
                vec![TokenKind::LBracket, TokenKind::Text, TokenKind::RBracket],
                "Expecting ']'; Found '|'",
                (1, 7),
            ),
            (
                vec![TokenKind::LBracket, TokenKind::Text, TokenKind::VerticalBar, TokenKind::Text],
                "Expecting Value of type 'Text'; Found '~'",
                (1, 8),
            ),
        ];

        for (kinds, message, (line, column)) in test_cases {
            let err = expect(&tokens, &kinds).unwrap_err();
            assert_eq!(err.message(), message);
            assert_eq!((err.line(), err.column()), (line, column));
        }
    }

    #[test]
    fn test_expect_past_end() {
        let tokens = vec![Token::new(TokenKind::Equals, "=", 3, 4)];
        let err = expect(&tokens, &[TokenKind::Equals, TokenKind::Text]).unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                expected: "Value of type 'Text'".into(),
                line: 3,
                column: 4,
            }
        );
    }

    #[test]
    fn test_syntax_message() {
        let at = Token::new(TokenKind::Text, "LIVING ROOM", 2, 13);
        let err = syntax("INT., EXT., or INT/EXT", &at);
        assert_eq!(err.to_string(), "Expecting INT., EXT., or INT/EXT");
        assert_eq!((err.line(), err.column()), (2, 13));
    }
}
