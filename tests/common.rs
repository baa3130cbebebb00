use std::path::Path;

use fun::{
    codegen::{
        LoweredLambda, lower_unit,
        text::{TargetConstant, TargetType},
    },
    context::Context,
    parser::{ProgramSource, error::ParseError, parse},
};

/// Parses `source` as if read from `path` into a fresh context.
pub fn parse_program(source: &str, path: &str) -> Result<Context, ParseError> {
    let source = ProgramSource::new(source.to_string(), Path::new(path));
    tracing::debug!("source code:\n{}", &source.input);

    let mut ctx = Context::new(path, Default::default());
    parse(&source, &mut ctx)?;
    Ok(ctx)
}

#[allow(unused)]
pub fn lower_program(
    source: &str,
    path: &str,
) -> Result<(Context, Vec<LoweredLambda<TargetType, TargetConstant>>), ParseError> {
    let mut ctx = parse_program(source, path)?;
    let lowered = lower_unit(&mut ctx);
    Ok((ctx, lowered))
}

#[allow(unused)]
pub fn check_invalid_program(source: &str, path: &str) -> ParseError {
    match parse_program(source, path) {
        Ok(ctx) => panic!("expected an error, parsed:\n{}", ctx.dump().unwrap()),
        Err(error) => error,
    }
}
