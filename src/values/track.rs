//! Grid track lists.

use cssparser::{BasicParseErrorKind, ParseError, ParseErrorKind, Parser, ParserInput, Token};

use crate::error::{LayoutError, Result};
use crate::props::PropValue;
use crate::values::is_safe_value;

/// An ordered list of grid track sizes.
///
/// Accepts either a single string (`"repeat(3, 1fr)"`) or a list whose items
/// are joined with spaces (`["1fr", "200px"]`). Each item is tokenized as CSS
/// and only sizing tokens are allowed: lengths, percentages, numbers,
/// keywords, functions such as `minmax()`, and `[line-name]` brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackList {
    tracks: Vec<String>,
}

impl TrackList {
    /// Builds a track list from already split track sizes.
    pub fn new<I, S>(tracks: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tracks: Vec<String> = tracks.into_iter().map(|t| t.into().trim().to_string()).collect();
        if tracks.is_empty() {
            return Err(LayoutError::track_list("", "track list is empty"));
        }
        for track in &tracks {
            validate_track(track)?;
        }
        Ok(Self { tracks })
    }

    /// Reads a track list out of a prop value.
    pub fn from_prop(prop: &str, value: &PropValue) -> Result<Self> {
        match value {
            PropValue::Text(s) => Self::new([s.as_str()]),
            PropValue::List(items) => {
                let mut tracks = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        PropValue::Text(s) => tracks.push(s.clone()),
                        PropValue::Number(_) => tracks.push(item.to_string()),
                        other => {
                            return Err(LayoutError::invalid_prop(
                                prop,
                                "track sizes as strings or numbers",
                                format!("list containing {}", other.describe()),
                            ))
                        }
                    }
                }
                Self::new(tracks)
            }
            other => Err(LayoutError::invalid_prop(
                prop,
                "string or list of track sizes",
                other.describe(),
            )),
        }
    }

    pub fn tracks(&self) -> &[String] {
        &self.tracks
    }

    /// The tracks joined with single spaces.
    pub fn as_css(&self) -> String {
        self.tracks.join(" ")
    }
}

fn validate_track(track: &str) -> Result<()> {
    if track.is_empty() {
        return Err(LayoutError::track_list(track, "track size is empty"));
    }
    // The tokenizer skips comments and closes open blocks at end of input.
    if !is_safe_value(track) {
        return Err(LayoutError::track_list(
            track,
            "contains a comment, escape, quote or unclosed bracket",
        ));
    }

    let mut input = ParserInput::new(track);
    let mut parser = Parser::new(&mut input);
    let mut count = 0usize;

    loop {
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(err) if matches!(err.kind, BasicParseErrorKind::EndOfInput) => break,
            Err(err) => return Err(LayoutError::track_list(track, format!("{:?}", err.kind))),
        };
        count += 1;
        match token {
            Token::Ident(_)
            | Token::Dimension { .. }
            | Token::Percentage { .. }
            | Token::Number { .. } => {}
            Token::Function(_) | Token::SquareBracketBlock => {
                parser
                    .parse_nested_block(|nested| check_nested(nested))
                    .map_err(|err| LayoutError::track_list(track, describe_error(err)))?;
            }
            other => {
                return Err(LayoutError::track_list(
                    track,
                    format!("unexpected {}", describe_token(&other)),
                ))
            }
        }
    }

    if count == 0 {
        return Err(LayoutError::track_list(track, "track size is empty"));
    }
    Ok(())
}

fn check_nested<'i, 't>(parser: &mut Parser<'i, 't>) -> std::result::Result<(), ParseError<'i, String>> {
    loop {
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(err) if matches!(err.kind, BasicParseErrorKind::EndOfInput) => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        match token {
            Token::Ident(_)
            | Token::Dimension { .. }
            | Token::Percentage { .. }
            | Token::Number { .. }
            | Token::Comma
            | Token::Delim('+' | '-' | '*' | '/') => {}
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                parser.parse_nested_block(|nested| check_nested(nested))?;
            }
            other => {
                return Err(parser.new_custom_error(format!("unexpected {}", describe_token(&other))));
            }
        }
    }
}

fn describe_error(err: ParseError<'_, String>) -> String {
    match err.kind {
        ParseErrorKind::Custom(message) => message,
        ParseErrorKind::Basic(kind) => format!("{:?}", kind),
    }
}

fn describe_token(token: &Token<'_>) -> String {
    match token {
        Token::Semicolon => "';'".to_string(),
        Token::Colon => "':'".to_string(),
        Token::Comma => "','".to_string(),
        Token::Delim(c) => format!("'{}'", c),
        Token::CurlyBracketBlock => "'{'".to_string(),
        Token::CloseCurlyBracket => "'}'".to_string(),
        Token::CloseParenthesis => "')'".to_string(),
        Token::CloseSquareBracket => "']'".to_string(),
        Token::QuotedString(s) => format!("string \"{}\"", s),
        other => format!("{:?}", other),
    }
}
