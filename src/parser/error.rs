use thiserror::Error;

use super::{
    Span,
    lexer::LexicalError,
    tokens::{LexingError, Token},
};
use crate::ir::Type;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid token: {error:?}")]
    InvalidToken { error: LexingError, span: Span },
    #[error("unexpected token {found}, expected {expected}")]
    UnexpectedToken {
        found: Token,
        expected: String,
        span: Span,
    },
    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEof { expected: String, span: Span },
    #[error("literal {literal} does not fit in {kind}")]
    LiteralOutOfRange {
        literal: String,
        kind: Type,
        span: Span,
    },
    #[error("invalid literal {literal}")]
    InvalidLiteral { literal: String, span: Span },
    #[error("unknown local %{index}")]
    UnknownLocal { index: usize, span: Span },
    #[error("instructions take one to three operands, found {found}")]
    OperandCount { found: usize, span: Span },
    #[error("unknown opcode {name}")]
    UnknownOpcode { name: String, span: Span },
    #[error("unknown type {name}")]
    UnknownType { name: String, span: Span },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Where in the source the error was found, if it came from the source.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::InvalidToken { span, .. }
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::LiteralOutOfRange { span, .. }
            | ParseError::InvalidLiteral { span, .. }
            | ParseError::UnknownLocal { span, .. }
            | ParseError::OperandCount { span, .. }
            | ParseError::UnknownOpcode { span, .. }
            | ParseError::UnknownType { span, .. } => Some(*span),
            ParseError::Io(_) => None,
        }
    }
}

impl From<LexicalError> for ParseError {
    fn from(error: LexicalError) -> Self {
        match error {
            LexicalError::InvalidToken(error, range) => ParseError::InvalidToken {
                error,
                span: Span::new(range.start, range.end),
            },
        }
    }
}
