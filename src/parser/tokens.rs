use std::{convert::Infallible, num::ParseIntError};

use logos::Logos;

#[derive(Debug, PartialEq, Clone, Default)]
pub enum LexingError {
    NumberParseError,
    InvalidEscape,
    #[default]
    Other,
}

impl From<ParseIntError> for LexingError {
    fn from(_: ParseIntError) -> Self {
        LexingError::NumberParseError
    }
}

impl From<unescaper::Error> for LexingError {
    fn from(_: unescaper::Error) -> Self {
        LexingError::InvalidEscape
    }
}

impl From<Infallible> for LexingError {
    fn from(_: Infallible) -> Self {
        LexingError::Other
    }
}

#[derive(Logos, logos_display::Debug, logos_display::Display, PartialEq, Clone)]
#[logos(error = LexingError, skip r"[ \t\r\n\f]+", skip r"//[^\n]*")]
pub enum Token {
    #[token("fn")]
    KeywordFn,
    #[token("let")]
    KeywordLet,
    #[token("block")]
    KeywordBlock,
    #[token("nil")]
    KeywordNil,

    // Modern way of allowing identifiers, read: https://unicode.org/reports/tr31/
    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Literals, range checked by the parser once the kind is known.
    #[regex(
        r"-?(0[bB][01_]+|0[oO][0-7_]+|0[xX][0-9a-fA-F_]+|[0-9][0-9_]*)([ui](8|16|32|64))?",
        |lex| lex.slice().to_string()
    )]
    Integer(String),
    #[regex(
        r"-?[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?(f32|f64)?",
        |lex| lex.slice().to_string()
    )]
    Float(String),
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Boolean(bool),

    #[regex(r"@[\p{XID_Start}_]\p{XID_Continue}*", |lex| lex.slice()[1..].to_string())]
    #[regex(r#"@"(?:[^"\\]|\\.)*""#, |lex| {
        let slice = lex.slice();
        unescaper::unescape(&slice[2..(slice.len() - 1)])
    })]
    Label(String),
    #[regex(r"%[0-9]+", |lex| lex.slice()[1..].parse::<usize>())]
    Local(usize),

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBracket,
    #[token("}")]
    RightBracket,
    #[token("=")]
    Assign,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("->")]
    Arrow,
    #[token(",")]
    Coma,
}
