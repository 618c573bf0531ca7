//! Restricted literal parser for model-authored payloads.
//!
//! The models are instructed to answer with a Python-style list or dict
//! literal, but what actually comes back drifts between Python and JSON
//! spellings. This parser accepts exactly the literal subset (strings,
//! numbers, booleans, none, lists, tuples, maps) and nothing else.
//! It never evaluates anything; a payload like `foo()` is a parse error.

use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

/// A parsed literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
    List(Vec<Literal>),
    Map(Vec<(Literal, Literal)>),
}

impl Literal {
    /// True for `[]`, `{}`, and `None`.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            Self::None => true,
            _ => false,
        }
    }

    /// Render a scalar as plain text, the way it appeared to the model.
    ///
    /// Containers have no single text form; callers reject them first.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.clone()),
            Self::Int(n) => Some(n.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::None => Some("None".to_string()),
            Self::List(_) | Self::Map(_) => Option::None,
        }
    }
}

/// Errors from the literal parser, with byte positions for diagnostics.
#[derive(Debug, Error)]
pub enum LiteralError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),
    #[error("unexpected character '{ch}' at byte {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("trailing characters after literal at byte {0}")]
    TrailingInput(usize),
    #[error("unterminated string starting at byte {0}")]
    UnterminatedString(usize),
    #[error("invalid number '{text}' at byte {pos}")]
    InvalidNumber { text: String, pos: usize },
    #[error("unknown word '{word}' at byte {pos}")]
    UnknownWord { word: String, pos: usize },
}

/// Parse `input` as a single literal value.
pub fn parse_literal(input: &str) -> Result<Literal, LiteralError> {
    let mut parser = Parser {
        input,
        chars: input.char_indices().peekable(),
    };
    parser.skip_whitespace();
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if let Some((pos, _)) = parser.peek() {
        return Err(LiteralError::TrailingInput(pos));
    }
    Ok(value)
}

struct Parser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl Parser<'_> {
    fn peek(&mut self) -> Option<(usize, char)> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }

    fn skip_whitespace(&mut self) {
        while let Some((_, ch)) = self.peek() {
            if ch.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn end_pos(&self) -> usize {
        self.input.len()
    }

    fn parse_value(&mut self) -> Result<Literal, LiteralError> {
        let (pos, ch) = self.peek().ok_or(LiteralError::UnexpectedEnd(self.end_pos()))?;
        match ch {
            '[' => self.parse_sequence('[', ']'),
            '(' => self.parse_sequence('(', ')'),
            '{' => self.parse_map(),
            '\'' | '"' => self.parse_string(),
            '-' | '+' => self.parse_number(),
            _ if ch.is_ascii_digit() => self.parse_number(),
            _ if ch.is_alphabetic() || ch == '_' => self.parse_word(),
            _ => Err(LiteralError::UnexpectedChar { ch, pos }),
        }
    }

    fn parse_sequence(&mut self, open: char, close: char) -> Result<Literal, LiteralError> {
        debug_assert_eq!(self.peek().map(|(_, c)| c), Some(open));
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some((_, ch)) if ch == close => {
                    self.bump();
                    return Ok(Literal::List(items));
                }
                Some(_) => {
                    items.push(self.parse_value()?);
                    self.skip_whitespace();
                    match self.peek() {
                        Some((_, ',')) => {
                            self.bump();
                        }
                        Some((_, ch)) if ch == close => {}
                        Some((pos, ch)) => {
                            return Err(LiteralError::UnexpectedChar { ch, pos });
                        }
                        None => return Err(LiteralError::UnexpectedEnd(self.end_pos())),
                    }
                }
                None => return Err(LiteralError::UnexpectedEnd(self.end_pos())),
            }
        }
    }

    fn parse_map(&mut self) -> Result<Literal, LiteralError> {
        self.bump();
        let mut entries = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some((_, '}')) => {
                    self.bump();
                    return Ok(Literal::Map(entries));
                }
                Some(_) => {
                    let key = self.parse_value()?;
                    self.skip_whitespace();
                    match self.peek() {
                        Some((_, ':')) => {
                            self.bump();
                        }
                        Some((pos, ch)) => {
                            return Err(LiteralError::UnexpectedChar { ch, pos });
                        }
                        None => return Err(LiteralError::UnexpectedEnd(self.end_pos())),
                    }
                    self.skip_whitespace();
                    let value = self.parse_value()?;
                    entries.push((key, value));
                    self.skip_whitespace();
                    match self.peek() {
                        Some((_, ',')) => {
                            self.bump();
                        }
                        Some((_, '}')) => {}
                        Some((pos, ch)) => {
                            return Err(LiteralError::UnexpectedChar { ch, pos });
                        }
                        None => return Err(LiteralError::UnexpectedEnd(self.end_pos())),
                    }
                }
                None => return Err(LiteralError::UnexpectedEnd(self.end_pos())),
            }
        }
    }

    fn parse_string(&mut self) -> Result<Literal, LiteralError> {
        let Some((start, quote)) = self.bump() else {
            return Err(LiteralError::UnexpectedEnd(self.end_pos()));
        };
        let mut out = String::new();
        loop {
            match self.bump() {
                Some((_, ch)) if ch == quote => return Ok(Literal::Str(out)),
                Some((_, '\\')) => match self.bump() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, 'r')) => out.push('\r'),
                    Some((_, escaped)) => out.push(escaped),
                    None => return Err(LiteralError::UnterminatedString(start)),
                },
                Some((_, ch)) => out.push(ch),
                None => return Err(LiteralError::UnterminatedString(start)),
            }
        }
    }

    fn parse_number(&mut self) -> Result<Literal, LiteralError> {
        let Some((start, _)) = self.peek() else {
            return Err(LiteralError::UnexpectedEnd(self.end_pos()));
        };
        let mut text = String::new();
        while let Some((_, ch)) = self.peek() {
            if ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | 'e' | 'E' | '_') {
                text.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        // Python permits underscore separators in numeric literals
        let cleaned = text.replace('_', "");
        if let Ok(n) = cleaned.parse::<i64>() {
            return Ok(Literal::Int(n));
        }
        if let Ok(f) = cleaned.parse::<f64>() {
            return Ok(Literal::Float(f));
        }
        Err(LiteralError::InvalidNumber { text, pos: start })
    }

    fn parse_word(&mut self) -> Result<Literal, LiteralError> {
        let Some((start, _)) = self.peek() else {
            return Err(LiteralError::UnexpectedEnd(self.end_pos()));
        };
        let mut word = String::new();
        while let Some((_, ch)) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                word.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        // Accept both Python and JSON spellings; the models mix them
        match word.as_str() {
            "True" | "true" => Ok(Literal::Bool(true)),
            "False" | "false" => Ok(Literal::Bool(false)),
            "None" | "null" => Ok(Literal::None),
            _ => Err(LiteralError::UnknownWord { word, pos: start }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_list_of_pairs() {
        let parsed = parse_literal(r#"[["PPM1D", "RUNX2"], ["CDK1", "Histone H1"]]"#)
            .expect("Should parse list of pairs");
        assert_eq!(
            parsed,
            Literal::List(vec![
                Literal::List(vec![
                    Literal::Str("PPM1D".to_string()),
                    Literal::Str("RUNX2".to_string()),
                ]),
                Literal::List(vec![
                    Literal::Str("CDK1".to_string()),
                    Literal::Str("Histone H1".to_string()),
                ]),
            ])
        );
    }

    #[test]
    fn test_parses_map_in_insertion_order() {
        let parsed = parse_literal(r#"{"Q86U12": "Q9FCE5", "Q86123": "Q15502"}"#)
            .expect("Should parse map");
        let Literal::Map(entries) = parsed else {
            panic!("expected a map");
        };
        assert_eq!(entries[0].0, Literal::Str("Q86U12".to_string()));
        assert_eq!(entries[1].0, Literal::Str("Q86123".to_string()));
    }

    #[test]
    fn test_accepts_single_quotes_and_trailing_commas() {
        let parsed = parse_literal("[['CK2', 'PTEN'],]").expect("Should parse");
        assert_eq!(
            parsed,
            Literal::List(vec![Literal::List(vec![
                Literal::Str("CK2".to_string()),
                Literal::Str("PTEN".to_string()),
            ])])
        );
    }

    #[test]
    fn test_accepts_tuples_as_lists() {
        let parsed = parse_literal("(1, 2.5, True, None)").expect("Should parse tuple");
        assert_eq!(
            parsed,
            Literal::List(vec![
                Literal::Int(1),
                Literal::Float(2.5),
                Literal::Bool(true),
                Literal::None,
            ])
        );
    }

    #[test]
    fn test_accepts_json_spellings() {
        let parsed = parse_literal("[true, false, null]").expect("Should parse");
        assert_eq!(
            parsed,
            Literal::List(vec![Literal::Bool(true), Literal::Bool(false), Literal::None])
        );
    }

    #[test]
    fn test_string_escapes() {
        let parsed = parse_literal(r#""a\"b\n""#).expect("Should parse escaped string");
        assert_eq!(parsed, Literal::Str("a\"b\n".to_string()));
    }

    #[test]
    fn test_rejects_call_syntax() {
        assert!(parse_literal("__import__('os')").is_err());
        assert!(parse_literal("foo").is_err());
    }

    #[test]
    fn test_rejects_trailing_garbage() {
        assert!(matches!(
            parse_literal("[1, 2] extra"),
            Err(LiteralError::TrailingInput(_))
        ));
    }

    #[test]
    fn test_reports_truncation() {
        assert!(matches!(
            parse_literal(r#"[["A", "B"]"#),
            Err(LiteralError::UnexpectedEnd(_))
        ));
    }

    #[test]
    fn test_empty_containers() {
        assert!(parse_literal("[]").expect("Should parse").is_empty());
        assert!(parse_literal("{}").expect("Should parse").is_empty());
    }
}
