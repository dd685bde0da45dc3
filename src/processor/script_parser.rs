//! Recursive-descent parser that turns the clean token sequence into a
//! `Document`.
//
//  Grammar (informal, over token kinds):
//
//      document      ::= metadata scene+
//      metadata      ::= '~' (Text ':' Text '~')* '~'
//      scene         ::= heading item* ('|' | EOF)
//      heading       ::= '|' Text ['-' Text] '|'
//      item          ::= dialogue | action | shot | transition
//      dialogue      ::= '=' Text ['(' Text ')'] '{' Text '}'
//      action        ::= '[' Text ']'
//      shot          ::= '-' Text '-'
//      transition    ::= '+' Text '+'
//
//  A single forward cursor walks the token slice; nothing is re-read.

use super::ast::*;
use super::diagnostics::{self, ParseError};
use super::lexer::{Token, TokenKind};
use log::debug;

use TokenKind::*;

pub fn parse(tokens: &[Token]) -> Result<Document, ParseError> {
    let Some(end) = tokens.last() else {
        return Err(ParseError::Syntax {
            expected: "'~'".into(),
            line: 1,
            column: 1,
        });
    };
    Parser::new(tokens, end).parse()
}

struct Parser<'a> {
    tokens: &'a [Token],
    /// Returned for any read past the end of `tokens`.
    end: &'a Token,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], end: &'a Token) -> Self {
        Self {
            tokens,
            end,
            pos: 0,
        }
    }

    fn parse(&mut self) -> Result<Document, ParseError> {
        let metadata = self.parse_metadata()?;
        debug!("parsed {} metadata pairs", metadata.len());

        let mut scenes = Vec::new();
        loop {
            scenes.push(self.parse_scene()?);
            if self.at_end() {
                break;
            }
        }
        debug!("parsed {} scenes", scenes.len());

        Ok(Document { metadata, scenes })
    }

    fn peek(&self) -> &'a Token {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &'a Token {
        self.tokens.get(self.pos + offset).unwrap_or(self.end)
    }

    fn text_at(&self, offset: usize) -> String {
        self.peek_at(offset).text.clone()
    }

    fn rest(&self) -> &'a [Token] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len() || self.peek().kind == EndOfInput
    }

    fn expect(&self, kinds: &[TokenKind]) -> Result<(), ParseError> {
        diagnostics::expect(self.rest(), kinds)
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// The preamble is everything up to the last `~`. Each span between
    /// two consecutive fences holds one pair; empty spans are skipped.
    fn parse_metadata(&mut self) -> Result<Vec<MetadataPair>, ParseError> {
        let fences: Vec<usize> = self
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.kind == Tilde)
            .map(|(i, _)| i)
            .collect();

        let (Some(&first), Some(&last)) = (fences.first(), fences.last()) else {
            return Err(diagnostics::expecting_found("'~'", self.peek()));
        };
        self.expect(&[Tilde])?;
        if first == last {
            return Err(diagnostics::syntax(
                "closing '~' of metadata block",
                &self.tokens[first],
            ));
        }

        let mut metadata = Vec::new();
        for fence in fences.windows(2) {
            let start = fence[0] + 1;
            if fence[1] - start <= 1 {
                continue;
            }
            // The trailing '~' catches spans with extra tokens.
            diagnostics::expect(&self.tokens[start..], &[Text, Colon, Text, Tilde])?;
            metadata.push(MetadataPair {
                key: self.tokens[start].text.clone(),
                value: self.tokens[start + 2].text.clone(),
            });
        }

        self.pos = last + 1;
        Ok(metadata)
    }

    fn parse_scene(&mut self) -> Result<Scene, ParseError> {
        let heading = self.parse_scene_heading()?;
        debug!(
            "scene {} {} {}",
            heading.location_kind, heading.location, heading.time
        );

        let boundary = self.scene_boundary();
        let mut items = Vec::new();
        while self.pos < boundary {
            items.push(self.parse_scene_item()?);
        }

        // A '|' directly before another '|' or the end closes this scene.
        while self.peek().kind == VerticalBar
            && matches!(self.peek_at(1).kind, VerticalBar | EndOfInput)
        {
            self.advance(1);
        }

        Ok(Scene { heading, items })
    }

    /// Index of the next `|` or `EndOfInput` at or after the cursor.
    fn scene_boundary(&self) -> usize {
        self.rest()
            .iter()
            .position(|token| matches!(token.kind, VerticalBar | EndOfInput))
            .map_or(self.tokens.len(), |i| self.pos + i)
    }

    fn parse_scene_heading(&mut self) -> Result<SceneHeading, ParseError> {
        self.expect(&[VerticalBar, Text])?;
        let (location_kind, location) = parse_location_keyword(self.peek_at(1))?;

        if self.peek_at(2).kind == Dash {
            self.expect(&[VerticalBar, Text, Dash, Text, VerticalBar])?;
            let time = self.peek_at(3).text.to_uppercase();
            self.advance(5);
            Ok(SceneHeading {
                location_kind,
                location,
                has_time: true,
                time,
            })
        } else {
            self.expect(&[VerticalBar, Text, VerticalBar])?;
            self.advance(3);
            Ok(SceneHeading {
                location_kind,
                location,
                has_time: false,
                time: String::new(),
            })
        }
    }

    fn parse_scene_item(&mut self) -> Result<SceneItem, ParseError> {
        match self.peek().kind {
            Equals => self.parse_dialogue_unit(),
            LBracket => self
                .parse_enclosed(LBracket, RBracket)
                .map(|text| SceneItem::Action { text }),
            Dash => self
                .parse_enclosed(Dash, Dash)
                .map(|text| SceneItem::Shot { text }),
            Plus => self
                .parse_enclosed(Plus, Plus)
                .map(|text| SceneItem::Transition { text }),
            _ => Err(diagnostics::syntax(
                "Character, Action, Shot, Transition, etc.",
                self.peek(),
            )),
        }
    }

    fn parse_enclosed(&mut self, open: TokenKind, close: TokenKind) -> Result<String, ParseError> {
        self.expect(&[open, Text, close])?;
        let text = self.text_at(1);
        self.advance(3);
        Ok(text)
    }

    fn parse_dialogue_unit(&mut self) -> Result<SceneItem, ParseError> {
        self.expect(&[Equals, Text])?;
        let character_name = self.text_at(1);

        let unit = if self.peek_at(2).kind == LParen {
            self.expect(&[Equals, Text, LParen, Text, RParen, LBrace, Text, RBrace])?;
            let unit = DialogueUnit {
                character_name,
                has_parenthetical: true,
                parenthetical: self.text_at(3),
                dialogue: self.text_at(6),
            };
            self.advance(8);
            unit
        } else {
            self.expect(&[Equals, Text, LBrace, Text, RBrace])?;
            let unit = DialogueUnit {
                character_name,
                has_parenthetical: false,
                parenthetical: String::new(),
                dialogue: self.text_at(3),
            };
            self.advance(5);
            unit
        };

        Ok(SceneItem::DialogueUnit(unit))
    }
}

/// Splits `INT. KITCHEN` into the location kind and the uppercased
/// remainder after the first space.
fn parse_location_keyword(token: &Token) -> Result<(LocationKind, String), ParseError> {
    let upper = token.text.to_uppercase();
    let (keyword, location) = upper.split_once(' ').unwrap_or((upper.as_str(), ""));

    let kind = if keyword.contains('/') {
        LocationKind::IntExt
    } else if keyword.contains("INT") {
        LocationKind::Int
    } else if keyword.contains("EXT") {
        LocationKind::Ext
    } else {
        return Err(diagnostics::syntax("INT., EXT., or INT/EXT", token));
    };

    Ok((kind, location.trim().to_string()))
}
