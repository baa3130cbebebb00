use std::{fmt::Write, path::PathBuf, time::Instant};

use anyhow::Context as _;
use ariadne::Source;
use clap::Parser;
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{
    check::parse_error_to_report,
    codegen::{lower_unit, text::TextTarget},
    compile_unit_info::CompileUnitInfo,
    context::Context,
    parser::{ProgramSource, parse},
};
use config::Config;

pub mod config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CompilerArgs {
    /// The input file.
    input: PathBuf,

    /// The package config, defaults to the Fun.toml next to the input if any.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the parsed IR.
    #[arg(long, default_value_t = false)]
    dump_ir: bool,

    /// Lower the unit and print each signature and its locals.
    #[arg(short, long, default_value_t = false)]
    lower: bool,

    /// Disable colored output.
    #[arg(long, default_value_t = false)]
    no_color: bool,
}

pub fn main() -> anyhow::Result<()> {
    let start_time = Instant::now();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CompilerArgs::parse();

    let config = load_config(&args)?;
    if let Some(config) = &config {
        debug!(
            "Package {} {}",
            config.package.name, config.package.version
        );
    }

    let info = CompileUnitInfo::new(
        args.input,
        args.dump_ir,
        args.lower,
        args.no_color,
        config.as_ref().map(|config| &config.dump),
    );
    debug!("Compiling with: {:#?}", info);

    let output = run(&info)?;
    print!("{output}");

    let elapsed = start_time.elapsed();
    debug!("Done in {:?}", elapsed);

    Ok(())
}

fn load_config(args: &CompilerArgs) -> anyhow::Result<Option<Config>> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => {
            let path = args.input.with_file_name(Config::FILE_NAME);
            path.exists().then_some(path)
        }
    };

    path.map(|path| {
        Config::load(&path).with_context(|| format!("failed to load {}", path.display()))
    })
    .transpose()
}

/// Parses the unit described by `info` and renders what it asks for.
///
/// Parse errors are reported on stderr before being returned.
pub fn run(info: &CompileUnitInfo) -> anyhow::Result<String> {
    let path = &info.file_path;
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    debug!("source code:\n{}", input);

    let source = ProgramSource::new(input, path);
    let mut ctx = Context::new(path, TextTarget);
    if let Err(error) = parse(&source, &mut ctx) {
        let report = parse_error_to_report(&error, ctx.path());
        report.eprint((path.display().to_string(), Source::from(source.input.as_str())))?;
        return Err(error).with_context(|| format!("failed to parse {}", path.display()));
    }

    let mut output = String::new();
    if info.dump_ir {
        writeln!(output, "{}", heading("ir", info.color))?;
        output.push_str(&ctx.dump()?);
    }

    if info.lower {
        writeln!(output, "{}", heading("lowered", info.color))?;
        for lowered in lower_unit(&mut ctx) {
            let name = ctx.resolve(lowered.name).unwrap_or_default();
            writeln!(output, "{name}: {}", lowered.signature)?;
            for constant in &lowered.locals {
                writeln!(output, "    {constant}")?;
            }
        }
    }

    Ok(output)
}

fn heading(title: &str, color: bool) -> String {
    let title = format!("; {title}");
    if color {
        title.bold().green().to_string()
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::compile_unit_info::CompileUnitInfo;

    #[test]
    fn dump_and_lower() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.fir");
        std::fs::write(
            &path,
            "fn main(argc: i32) -> nil { let a: i8 = -1i8; block { ret nil; } }",
        )
        .unwrap();

        let info = CompileUnitInfo::new(path, true, true, true, None);
        let output = run(&info).unwrap();
        assert_eq!(
            output,
            "; ir\n\
             fn main (argc: i32) -> nil {\n    [a: i8 = -1]\n  block 0:\n0:\tret  nil\n}\n\
             ; lowered\n\
             main: i1 (i32)\n    i8 -1\n"
        );
    }

    #[test]
    fn parse_errors_fail_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.fir");
        std::fs::write(&path, "fn main() -> nil { block { ret %0; } }").unwrap();

        let info = CompileUnitInfo::new(path, false, false, true, None);
        assert!(run(&info).is_err());
    }
}
