use std::{ops::Range, path::Path};

use ariadne::{ColorGenerator, Label, Report, ReportKind};

use crate::parser::{Span, error::ParseError};

#[derive(Debug, Clone)]
pub struct FileSpan {
    pub span: Range<usize>,
    pub path: String,
}

impl FileSpan {
    pub fn new(path: String, span: Range<usize>) -> Self {
        Self { path, span }
    }
}

impl ariadne::Span for FileSpan {
    type SourceId = String;

    fn source(&self) -> &Self::SourceId {
        &self.path
    }

    fn start(&self) -> usize {
        self.span.start
    }

    fn end(&self) -> usize {
        self.span.end
    }
}

/// Creates a report from a parse error.
pub fn parse_error_to_report(error: &ParseError, path: &Path) -> Report<'static, FileSpan> {
    let path = path.display().to_string();
    let mut colors = ColorGenerator::new();
    colors.next();

    let filespan = |span: Span| FileSpan::new(path.clone(), span.into());

    match error {
        ParseError::InvalidToken { error, span } => {
            let filespan = filespan(*span);
            Report::build(ReportKind::Error, filespan.clone())
                .with_code("InvalidToken")
                .with_label(
                    Label::new(filespan)
                        .with_message(format!("invalid token: {error:?}"))
                        .with_color(colors.next()),
                )
                .finish()
        }
        ParseError::UnexpectedToken {
            found,
            expected,
            span,
        } => {
            let filespan = filespan(*span);
            Report::build(ReportKind::Error, filespan.clone())
                .with_code("UnexpectedToken")
                .with_label(
                    Label::new(filespan)
                        .with_message(format!("unexpected token {found}"))
                        .with_color(colors.next()),
                )
                .with_note(format!("expected {expected}"))
                .finish()
        }
        ParseError::UnexpectedEof { expected, span } => {
            let filespan = filespan(*span);
            Report::build(ReportKind::Error, filespan.clone())
                .with_code("UnexpectedEof")
                .with_label(
                    Label::new(filespan)
                        .with_message("unexpected end of file")
                        .with_color(colors.next()),
                )
                .with_note(format!("expected {expected}"))
                .finish()
        }
        ParseError::LiteralOutOfRange {
            literal,
            kind,
            span,
        } => {
            let filespan = filespan(*span);
            Report::build(ReportKind::Error, filespan.clone())
                .with_code("LiteralOutOfRange")
                .with_label(
                    Label::new(filespan)
                        .with_message(format!("{literal} does not fit in {kind}"))
                        .with_color(colors.next()),
                )
                .with_message("Literal out of range.")
                .finish()
        }
        ParseError::InvalidLiteral { literal, span } => {
            let filespan = filespan(*span);
            Report::build(ReportKind::Error, filespan.clone())
                .with_code("InvalidLiteral")
                .with_label(
                    Label::new(filespan)
                        .with_message(format!("{literal:?} is not a valid literal"))
                        .with_color(colors.next()),
                )
                .finish()
        }
        ParseError::UnknownLocal { index, span } => {
            let filespan = filespan(*span);
            Report::build(ReportKind::Error, filespan.clone())
                .with_code("UnknownLocal")
                .with_label(
                    Label::new(filespan)
                        .with_message(format!("no argument or local at %{index}"))
                        .with_color(colors.next()),
                )
                .with_note("arguments are numbered first, then locals")
                .finish()
        }
        ParseError::OperandCount { found, span } => {
            let filespan = filespan(*span);
            Report::build(ReportKind::Error, filespan.clone())
                .with_code("OperandCount")
                .with_label(
                    Label::new(filespan)
                        .with_message(format!("{found} operands"))
                        .with_color(colors.next()),
                )
                .with_message("Instructions take one to three operands.")
                .finish()
        }
        ParseError::UnknownOpcode { name, span } => {
            let filespan = filespan(*span);
            Report::build(ReportKind::Error, filespan.clone())
                .with_code("UnknownOpcode")
                .with_label(
                    Label::new(filespan)
                        .with_message(format!("Opcode {name:?} not found."))
                        .with_color(colors.next()),
                )
                .finish()
        }
        ParseError::UnknownType { name, span } => {
            let filespan = filespan(*span);
            Report::build(ReportKind::Error, filespan.clone())
                .with_code("UnknownType")
                .with_label(
                    Label::new(filespan)
                        .with_message(format!("Type {name:?} not found."))
                        .with_color(colors.next()),
                )
                .finish()
        }
        ParseError::Io(error) => {
            let filespan = FileSpan::new(path.clone(), 0..0);
            Report::build(ReportKind::Error, filespan)
                .with_code("Io")
                .with_message(format!("Failed to read {path}: {error}"))
                .finish()
        }
    }
}
