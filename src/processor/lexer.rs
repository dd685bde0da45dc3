//! Very small hand-written lexer for the screenplay markup.
//!
//! At this stage we *only* break the raw source into `Token`s. Every byte
//! is either one of the single-character delimiters or part of a `Text`
//! span; nothing is rejected here. The parser gives the tokens meaning.
//
//  Lexical items:
//
//      Delimiters ::= '|' '(' ')' '[' ']' '{' '}' '=' '-' '+' ':' '~'
//      Text       ::= any run of non-delimiter bytes
//
//  Positions are stamped *after* the token's text has been consumed, so
//  a token's column is one past its last byte.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    Text,
    VerticalBar, // '|'
    LParen,      // '('
    RParen,      // ')'
    LBracket,    // '['
    RBracket,    // ']'
    LBrace,      // '{'
    RBrace,      // '}'
    Equals,      // '='
    Dash,        // '-'
    Plus,        // '+'
    Colon,       // ':'
    Tilde,       // '~'
    EndOfInput,
    /// Classification result for ordinary content bytes. Never emitted.
    Invalid,
}

impl TokenKind {
    /// Maps a byte to its delimiter kind, or `Invalid` for content.
    pub fn classify(byte: u8) -> TokenKind {
        match byte {
            b'|' => TokenKind::VerticalBar,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'=' => TokenKind::Equals,
            b'-' => TokenKind::Dash,
            b'+' => TokenKind::Plus,
            b':' => TokenKind::Colon,
            b'~' => TokenKind::Tilde,
            _ => TokenKind::Invalid,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Text => "Text",
            TokenKind::VerticalBar => "|",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Equals => "=",
            TokenKind::Dash => "-",
            TokenKind::Plus => "+",
            TokenKind::Colon => ":",
            TokenKind::Tilde => "~",
            TokenKind::EndOfInput => "EOF",
            TokenKind::Invalid => "Invalid",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    pub fn end_of_input(line: usize, column: usize) -> Self {
        Self::new(TokenKind::EndOfInput, "EOF", line, column)
    }
}

struct Lexer<'a> {
    input: &'a str,
    start: usize, // start of the pending span
    pos: usize,   // current byte
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            start: 0,
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        let input = self.input;
        let bytes = input.as_bytes();

        while self.pos < bytes.len() {
            let kind = TokenKind::classify(bytes[self.pos]);
            if kind == TokenKind::Invalid {
                self.pos += 1;
                continue;
            }

            self.flush_text();
            self.pos += 1;
            self.emit(kind);
        }

        // trailing text without a closing delimiter is kept, not dropped
        self.flush_text();
        self.tokens.push(Token::end_of_input(self.line, self.column));
        self.tokens
    }

    fn flush_text(&mut self) {
        if self.pos > self.start {
            self.emit(TokenKind::Text);
        }
    }

    fn emit(&mut self, kind: TokenKind) {
        // Delimiters are ASCII, so span boundaries are always char boundaries.
        let input = self.input;
        let text = &input[self.start..self.pos];
        for byte in text.bytes() {
            if byte == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.tokens.push(Token::new(kind, text, self.line, self.column));
        self.start = self.pos;
    }
}

/// Scans `input` left to right and returns the raw token sequence,
/// terminated by `EndOfInput`. Never fails.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).run()
}

/// Drops insignificant `Text` tokens and guarantees exactly one trailing
/// `EndOfInput`.
///
/// `Text` values are trimmed; anything of length ≤ 1 after trimming is
/// treated as noise. Running this twice gives the same result as once.
pub fn clean(tokens: Vec<Token>) -> Vec<Token> {
    let (line, column) = tokens
        .iter()
        .rev()
        .find(|t| t.kind == TokenKind::EndOfInput)
        .or_else(|| tokens.last())
        .map_or((1, 1), |t| (t.line, t.column));

    let mut clean = Vec::with_capacity(tokens.len() + 1);
    for token in tokens {
        match token.kind {
            TokenKind::EndOfInput | TokenKind::Invalid => {}
            TokenKind::Text => {
                let trimmed = token.text.trim();
                if trimmed.len() > 1 {
                    clean.push(Token {
                        text: trimmed.to_string(),
                        ..token
                    });
                }
            }
            _ => clean.push(token),
        }
    }
    clean.push(Token::end_of_input(line, column));
    clean
}

#[cfg(test)]
mod tests {
    use super::{Token, TokenKind, clean, tokenize};
    use TokenKind::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenisation() {
        let test_cases = vec![
            ("|INT. KITCHEN - DAY|", vec![VerticalBar, Text, Dash, Text, VerticalBar, EndOfInput]),
            (
                "=JOHN(whispering){Hello there}",
                vec![Equals, Text, LParen, Text, RParen, LBrace, Text, RBrace, EndOfInput],
            ),
            ("~~", vec![Tilde, Tilde, EndOfInput]),
            ("[]{}()+:", vec![LBracket, RBracket, LBrace, RBrace, LParen, RParen, Plus, Colon, EndOfInput]),
            ("", vec![EndOfInput]),
        ];

        for (src, expected) in test_cases {
            assert_eq!(kinds(&tokenize(src)), expected, "input: {src:?}");
        }
    }

    #[test]
    fn test_positions_are_end_exclusive() {
        let tokens = tokenize("~\nAB~");
        assert_eq!(
            tokens,
            vec![
                Token::new(Tilde, "~", 1, 2),
                Token::new(Text, "\nAB", 2, 3),
                Token::new(Tilde, "~", 2, 4),
                Token::end_of_input(2, 4),
            ]
        );
    }

    #[test]
    fn test_positions_never_decrease() {
        let src = "~TITLE: Night~\n|INT. HALL - DAY|\n=ANA\n(quietly)\n{Stay.}\n\n-WIDE-\n+CUT TO+\n";
        let tokens = tokenize(src);
        assert!(tokens.len() > 10);
        for pair in tokens.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                (a.line, a.column) <= (b.line, b.column),
                "{a:?} comes after {b:?}"
            );
        }
        assert_eq!(tokens.last().map(|t| t.line), Some(9));
    }

    #[test]
    fn test_trailing_text_is_flushed() {
        let tokens = tokenize("[a b] trailing words");
        assert_eq!(kinds(&tokens), vec![LBracket, Text, RBracket, Text, EndOfInput]);
        assert_eq!(tokens[3].text, " trailing words");
    }

    #[test]
    fn test_text_without_delimiters() {
        let test_cases = vec!["  just some words \n", "x y", "\tINT. KITCHEN"];

        for src in test_cases {
            let tokens = clean(tokenize(src));
            assert_eq!(kinds(&tokens), vec![Text, EndOfInput], "input: {src:?}");
            assert_eq!(tokens[0].text, src.trim());
        }
    }

    #[test]
    fn test_clean_drops_noise() {
        let tokens = clean(tokenize("[ a ]\n\n[ ok ]\n"));
        assert_eq!(
            kinds(&tokens),
            vec![LBracket, RBracket, LBracket, Text, RBracket, EndOfInput]
        );
        assert_eq!(tokens[3].text, "ok");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let once = clean(tokenize("~TITLE: My Play~\n|INT. HALL|\n[Dust settles.]\n"));
        let twice = clean(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_appends_single_end_marker() {
        let raw = vec![Token::new(Tilde, "~", 1, 2)];
        let tokens = clean(raw);
        assert_eq!(tokens, vec![Token::new(Tilde, "~", 1, 2), Token::end_of_input(1, 2)]);

        let tokens = clean(tokenize("~~"));
        let ends = tokens.iter().filter(|t| t.kind == EndOfInput).count();
        assert_eq!(ends, 1);
        assert_eq!(tokens.last().map(|t| t.kind), Some(EndOfInput));
    }
}
