//! Token lexer for the pre-order floorplan format.

use nom::{
    branch::alt,
    character::complete::{char, u64 as decimal},
    combinator::{all_consuming, map},
    sequence::{delimited, pair, separated_pair},
    IResult,
};

use floorplan_core::{BlockId, CutType, Size};

/// A single lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `H` or `V`.
    Cut(CutType),
    /// `<id>(<width>,<height>)`.
    Leaf { id: BlockId, size: Size },
}

/// Parse a cut marker.
fn cut_marker(input: &str) -> IResult<&str, CutType> {
    alt((
        map(char('H'), |_| CutType::Horizontal),
        map(char('V'), |_| CutType::Vertical),
    ))(input)
}

/// Parse `(<width>,<height>)`.
fn dimensions(input: &str) -> IResult<&str, Size> {
    map(
        delimited(char('('), separated_pair(decimal, char(','), decimal), char(')')),
        |(width, height)| Size::new(width, height),
    )(input)
}

/// Parse `<id>(<width>,<height>)`.
fn leaf_descriptor(input: &str) -> IResult<&str, (BlockId, Size)> {
    map(pair(decimal, dimensions), |(id, size)| (BlockId(id), size))(input)
}

/// Lex one whitespace-delimited token.
///
/// The whole token must match; `Hx` or `3(1,2)x` are rejected.
pub fn lex_token(token: &str) -> Option<Token> {
    all_consuming(alt((
        map(cut_marker, Token::Cut),
        map(leaf_descriptor, |(id, size)| Token::Leaf { id, size }),
    )))(token)
    .ok()
    .map(|(_, t)| t)
}
