mod cli;

use clap::Parser as _;
use cli::{Cli, Command, Emit};
use monkey_diagnostic::source::Source;
use monkey_diagnostic::{DiagnosticEmitter, IntoDiagnostic, PrettyDiagnosticEmitter};
use monkey_syntax::ast::Program;
use monkey_syntax::ParseError;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("cannot emit JSON: {0}")]
    Json(String),

    #[error("{0} error(s) while parsing")]
    HadErrors(usize),
}

type CliResult<T> = Result<T, CliError>;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let mut emitter = PrettyDiagnosticEmitter::new(cli.color.into());

    match cli.command {
        Command::Tokens { input, source } => {
            let source = load_source(input, source)?;

            for token in monkey_syntax::lex(source.text()) {
                println!("{:<8} {:?}", token.kind.to_string(), token.literal);
            }

            Ok(())
        }

        Command::Parse {
            input,
            source,
            emit,
        } => {
            let source = load_source(input, source)?;
            let (program, errors) = monkey_syntax::parse(source.text());

            report_errors(&mut emitter, &source, errors)?;
            emit_program(&program, emit)
        }
    }
}

fn load_source(input: String, inline: bool) -> CliResult<Source> {
    let source = if inline {
        Source::new("<unnamed>", input)
    } else {
        let text = std::fs::read_to_string(&input)?;
        Source::new(input, text)
    };

    Ok(source)
}

fn report_errors(
    emitter: &mut impl DiagnosticEmitter,
    source: &Source,
    errors: Vec<ParseError>,
) -> CliResult<()> {
    if errors.is_empty() {
        return Ok(());
    }

    let count = errors.len();
    for error in errors {
        emitter.emit_diagnostic(error.into_diagnostic(), source);
    }

    Err(CliError::HadErrors(count))
}

fn emit_program(program: &Program, emit: Emit) -> CliResult<()> {
    match emit {
        Emit::Ast => println!("{program}"),
        Emit::Debug => println!("{program:#?}"),

        #[cfg(feature = "json")]
        Emit::Json => {
            let json = sonic_rs::to_string_pretty(program)
                .map_err(|err| CliError::Json(err.to_string()))?;
            println!("{json}");
        }

        #[cfg(not(feature = "json"))]
        Emit::Json => {
            return Err(CliError::Json(
                "built without the `json` feature".to_owned(),
            ));
        }
    }

    Ok(())
}
