//! The textual IR front end.
//!
//! A `.fir` file is a list of functions, each with its locals followed by its
//! blocks:
//!
//! ```text
//! fn add(x: i32, y: i32) -> i32 {
//!     let sum: i32 = 0i32;
//!     block {
//!         add %2, %0, %1;
//!         ret %2;
//!     }
//! }
//! ```

use std::{
    fs,
    iter::Peekable,
    ops::Range,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};

use crate::{
    context::Context,
    ir::{
        Argument, Block, Instruction, Interner, Lambda, Local, LocalHandle, Opcode, Operand,
        Scalar, Type, Value,
    },
};
use error::ParseError;
use lexer::Lexer;
use tokens::Token;

pub mod error;
mod lexer;
mod literal;
pub mod tokens;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub from: usize,
    pub to: usize,
}

impl Span {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl From<Span> for Range<usize> {
    fn from(val: Span) -> Self {
        val.from..val.to
    }
}

#[derive(Debug, Clone)]
pub struct ProgramSource {
    pub input: String,
    pub path: PathBuf,
}

impl ProgramSource {
    pub fn new(input: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            path: path.into(),
        }
    }
}

/// Parses `source` and defines its lambdas in `ctx`.
///
/// Nothing is defined unless the whole source parses. Labels met before an
/// error stay interned.
#[instrument(level = "debug", skip_all, fields(path = %source.path.display()))]
pub fn parse<T>(source: &ProgramSource, ctx: &mut Context<T>) -> Result<(), ParseError> {
    let lambdas = Parser::new(&source.input, &mut ctx.interner).parse_unit()?;
    for (name, lambda) in lambdas {
        ctx.define_lambda(&name, lambda);
    }
    Ok(())
}

pub fn parse_file<T>(path: &Path, ctx: &mut Context<T>) -> Result<(), ParseError> {
    let input = fs::read_to_string(path)?;
    parse(&ProgramSource::new(input, path), ctx)
}

struct Parser<'a> {
    tokens: Peekable<Lexer<'a>>,
    interner: &'a mut Interner,
    end: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, interner: &'a mut Interner) -> Self {
        Self {
            tokens: Lexer::new(input).peekable(),
            interner,
            end: input.len(),
        }
    }

    fn peek(&mut self) -> Result<Option<&Token>, ParseError> {
        match self.tokens.peek() {
            Some(Ok((_, token, _))) => Ok(Some(token)),
            Some(Err(error)) => Err(error.clone().into()),
            None => Ok(None),
        }
    }

    fn next(&mut self, expected: &str) -> Result<(Span, Token), ParseError> {
        match self.tokens.next() {
            Some(Ok((from, token, to))) => Ok((Span::new(from, to), token)),
            Some(Err(error)) => Err(error.into()),
            None => Err(ParseError::UnexpectedEof {
                expected: expected.to_string(),
                span: Span::new(self.end, self.end),
            }),
        }
    }

    fn next_is(&mut self, token: &Token) -> Result<bool, ParseError> {
        Ok(self.peek()? == Some(token))
    }

    fn expect(&mut self, token: Token) -> Result<Span, ParseError> {
        let expected = token.to_string();
        let (span, found) = self.next(&expected)?;
        if found == token {
            Ok(span)
        } else {
            Err(ParseError::UnexpectedToken {
                found,
                expected,
                span,
            })
        }
    }

    fn expect_identifier(&mut self) -> Result<(String, Span), ParseError> {
        match self.next("identifier")? {
            (span, Token::Identifier(name)) => Ok((name, span)),
            (span, found) => Err(ParseError::UnexpectedToken {
                found,
                expected: "identifier".to_string(),
                span,
            }),
        }
    }

    fn parse_unit(&mut self) -> Result<Vec<(String, Lambda)>, ParseError> {
        let mut lambdas = Vec::new();
        while self.peek()?.is_some() {
            lambdas.push(self.parse_item()?);
        }
        Ok(lambdas)
    }

    fn parse_item(&mut self) -> Result<(String, Lambda), ParseError> {
        self.expect(Token::KeywordFn)?;
        let (name, _) = self.expect_identifier()?;
        let arguments = self.parse_params()?;
        self.expect(Token::Arrow)?;
        let return_type = self.parse_type()?;
        self.expect(Token::LeftBracket)?;

        let mut locals = Vec::new();
        while self.next_is(&Token::KeywordLet)? {
            locals.push(self.parse_local()?);
        }

        let slots = arguments.len() + locals.len();
        let mut body = Vec::new();
        while self.next_is(&Token::KeywordBlock)? {
            body.push(self.parse_block(slots)?);
        }
        self.expect(Token::RightBracket)?;

        debug!(name = %name, slots, blocks = body.len(), "parsed lambda");
        Ok((name, Lambda::new(return_type, arguments, locals, body)))
    }

    fn parse_params(&mut self) -> Result<Vec<Argument>, ParseError> {
        self.expect(Token::LeftParen)?;
        let mut arguments = Vec::new();
        while !self.next_is(&Token::RightParen)? {
            let (name, _) = self.expect_identifier()?;
            self.expect(Token::Colon)?;
            arguments.push(Argument::new(name, self.parse_type()?));
            if !self.next_is(&Token::Coma)? {
                break;
            }
            self.expect(Token::Coma)?;
        }
        self.expect(Token::RightParen)?;
        Ok(arguments)
    }

    fn parse_type(&mut self) -> Result<Type, ParseError> {
        if self.next_is(&Token::LeftParen)? {
            let arguments = self.parse_params()?;
            self.expect(Token::Arrow)?;
            let return_type = self.parse_type()?;
            return Ok(Type::function(return_type, arguments));
        }

        match self.next("type")? {
            (_, Token::KeywordNil) => Ok(Type::Nil),
            (span, Token::Identifier(name)) => name
                .parse::<Type>()
                .map_err(|_| ParseError::UnknownType { name, span }),
            (span, found) => Err(ParseError::UnexpectedToken {
                found,
                expected: "type".to_string(),
                span,
            }),
        }
    }

    fn parse_local(&mut self) -> Result<Local, ParseError> {
        self.expect(Token::KeywordLet)?;
        let (name, _) = self.expect_identifier()?;
        self.expect(Token::Colon)?;
        let ty = self.parse_type()?;
        self.expect(Token::Assign)?;
        let (span, token) = self.next("literal")?;
        let value = Value::from(parse_literal(token, span)?);
        self.expect(Token::Semicolon)?;

        if value.kind() != ty {
            warn!(
                name = %name,
                %ty,
                value = %value,
                "local initialized with a value of another kind"
            );
        }
        Ok(Local::new(name, ty, value))
    }

    fn parse_block(&mut self, slots: usize) -> Result<Block, ParseError> {
        self.expect(Token::KeywordBlock)?;
        self.expect(Token::LeftBracket)?;
        let mut block = Block::new();
        while !self.next_is(&Token::RightBracket)? {
            block.push(self.parse_instruction(slots)?);
        }
        self.expect(Token::RightBracket)?;
        Ok(block)
    }

    fn parse_instruction(&mut self, slots: usize) -> Result<Instruction, ParseError> {
        let (name, span) = self.expect_identifier()?;
        let opcode = name
            .parse::<Opcode>()
            .map_err(|_| ParseError::UnknownOpcode { name, span })?;

        let mut operands = vec![self.parse_operand(slots)?];
        while self.next_is(&Token::Coma)? {
            self.expect(Token::Coma)?;
            operands.push(self.parse_operand(slots)?);
        }
        let end = self.expect(Token::Semicolon)?;

        let mut operands = operands.into_iter();
        match (operands.next(), operands.next(), operands.next(), operands.len()) {
            (Some(a), None, None, _) => Ok(Instruction::unary(opcode, a)),
            (Some(a), Some(b), None, _) => Ok(Instruction::binary(opcode, a, b)),
            (Some(a), Some(b), Some(c), 0) => Ok(Instruction::ternary(opcode, a, b, c)),
            (.., rest) => Err(ParseError::OperandCount {
                found: 3 + rest,
                span: Span::new(span.from, end.to),
            }),
        }
    }

    fn parse_operand(&mut self, slots: usize) -> Result<Operand, ParseError> {
        match self.next("operand")? {
            (_, Token::Label(name)) => Ok(self.interner.intern(&name).into()),
            (span, Token::Local(index)) => {
                if index < slots {
                    Ok(LocalHandle::new(index).into())
                } else {
                    Err(ParseError::UnknownLocal { index, span })
                }
            }
            (span, token @ Token::Identifier(_)) => Err(ParseError::UnexpectedToken {
                found: token,
                expected: "operand".to_string(),
                span,
            }),
            (span, token) => parse_literal(token, span).map(Operand::from),
        }
    }
}

fn parse_literal(token: Token, span: Span) -> Result<Scalar, ParseError> {
    match token {
        Token::KeywordNil => Ok(Scalar::Nil),
        Token::Boolean(value) => Ok(Scalar::Bool(value)),
        Token::Integer(literal) => literal::parse_integer(&literal, span),
        Token::Float(literal) => literal::parse_float(&literal, span),
        found => Err(ParseError::UnexpectedToken {
            found,
            expected: "literal".to_string(),
            span,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{ParseError, ProgramSource, Span, parse, parse_file};
    use crate::{
        context::Context,
        ir::{
            FloatTy, Format, IntTy, Label, LocalHandle, NamedDisplay, Opcode, Scalar, Slot, Type,
            UintTy,
        },
    };

    fn parse_str(input: &str) -> (Context, Result<(), ParseError>) {
        let mut ctx = Context::default();
        let result = parse(&ProgramSource::new(input, "test.fir"), &mut ctx);
        (ctx, result)
    }

    #[test]
    fn parse_simple_program() {
        let source = r#"
// adds two numbers
fn add(x: i32, y: i32,) -> i32 {
    let sum: i32 = 0i32;
    block {
        add %2, %0, %1;
        ret %2;
    }
}

fn main() -> nil {
    block {
        call @add, 1i32, 2i32;
        call @"exit", 0u8;
        ret nil;
    }
}
"#;
        let (ctx, result) = parse_str(source);
        result.unwrap();

        assert_eq!(ctx.lambdas().count(), 2);
        let add = ctx.lambda("add").unwrap();
        assert_eq!(add.signature().to_string(), "(x: i32, y: i32) -> i32");
        assert_eq!(add.locals()[0].value.get::<i32>(), 0);
        let block = &add.body()[0];
        assert_eq!(block[0].opcode(), Opcode::Add);
        assert_eq!(block[0].format(), Format::Ternary);
        let handle = block[0].a().get::<LocalHandle>();
        assert!(matches!(
            add.slot(handle),
            Some(Slot::Local(local)) if local.name == "sum"
        ));

        let main = ctx.lambda("main").unwrap();
        let call = main.body()[0][0];
        assert_eq!(ctx.resolve(call.a().get::<Label>()), Some("add"));
        assert_eq!(call.b().get::<i32>(), 1);
        assert_eq!(
            main.body()[0].display(ctx.interner()).to_string(),
            "0:\tcall @add, 1, 2\n1:\tcall @exit, 0\n2:\tret  nil\n"
        );
    }

    #[test]
    fn function_types() {
        let (ctx, result) = parse_str("fn apply(f: (x: u8) -> u32, x: u8) -> u32 {}");
        result.unwrap();
        let apply = ctx.lambda("apply").unwrap();
        assert_eq!(
            apply.signature().to_string(),
            "(f: (x: u8) -> u32, x: u8) -> u32"
        );
        assert!(apply.arguments()[0].ty.is_function());
        assert!(apply.body().is_empty());
    }

    #[test]
    fn locals_keep_the_literal_kind() {
        let source = r#"
fn f() -> nil {
    let a: u8 = 255u8;
    let b: f32 = 0.5;
    let c: i16 = -1i16;
    let d: u8 = 300;
}
"#;
        let (ctx, result) = parse_str(source);
        result.unwrap();
        let locals = ctx.lambda("f").unwrap().locals();
        assert_eq!(locals[0].value.kind(), Type::Uint(UintTy::U8));
        assert_eq!(locals[2].value.get::<i16>(), -1);
        // unsuffixed literals keep their default kind whatever the declared type
        assert_eq!(locals[1].value.kind(), Type::Float(FloatTy::F64));
        assert_eq!(locals[1].ty, Type::Float(FloatTy::F32));
        assert_eq!(locals[3].value.get::<i64>(), 300);
    }

    #[test]
    fn operands_default_to_i64() {
        let (ctx, result) = parse_str("fn f() -> i64 { block { ret 7; } }");
        result.unwrap();
        let ret = ctx.lambda("f").unwrap().body()[0][0];
        assert_eq!(ret.a().get::<Scalar>().kind(), Type::Int(IntTy::I64));
    }

    #[test]
    fn local_out_of_range() {
        let (ctx, result) = parse_str("fn f(x: i32) -> i32 { block { ret %1; } }");
        assert!(matches!(
            result,
            Err(ParseError::UnknownLocal { index: 1, span }) if span == Span::new(34, 36)
        ));
        assert_eq!(ctx.lambdas().count(), 0);
    }

    #[test]
    fn failure_defines_nothing() {
        let (ctx, result) = parse_str(
            "fn ok() -> nil { block { ret nil; } } fn bad() -> nil { block { ret 300u8; } }",
        );
        assert!(matches!(result, Err(ParseError::LiteralOutOfRange { .. })));
        assert_eq!(ctx.lambdas().count(), 0);
    }

    #[test]
    fn too_many_operands() {
        let (_, result) = parse_str("fn f() -> nil { block { add 1, 2, 3, 4; } }");
        assert!(matches!(
            result,
            Err(ParseError::OperandCount { found: 4, .. })
        ));
    }

    #[test]
    fn missing_operand() {
        let (_, result) = parse_str("fn f() -> nil { block { ret; } }");
        assert!(matches!(result, Err(ParseError::UnexpectedToken { .. })));
    }

    #[test]
    fn unknown_names() {
        let (_, result) = parse_str("fn f() -> nil { block { jmp 1; } }");
        assert!(matches!(
            result,
            Err(ParseError::UnknownOpcode { name, .. }) if name == "jmp"
        ));

        let (_, result) = parse_str("fn f() -> i128 {}");
        assert!(matches!(
            result,
            Err(ParseError::UnknownType { name, .. }) if name == "i128"
        ));
    }

    #[test]
    fn unexpected_eof() {
        let source = "fn f() -> nil { block {";
        let (_, result) = parse_str(source);
        assert!(matches!(
            result,
            Err(ParseError::UnexpectedEof { span, .. })
                if span == Span::new(source.len(), source.len())
        ));
    }

    #[test]
    fn invalid_token() {
        let (_, result) = parse_str("fn f() -> nil { block { ret $; } }");
        assert!(matches!(result, Err(ParseError::InvalidToken { .. })));
    }

    #[test]
    fn parse_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fn main() -> nil {{ block {{ ret nil; }} }}").unwrap();

        let mut ctx = Context::default();
        parse_file(file.path(), &mut ctx).unwrap();
        assert!(ctx.lambda("main").is_some());

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            parse_file(&missing, &mut ctx),
            Err(ParseError::Io(_))
        ));
    }
}
