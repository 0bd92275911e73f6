use clap::{Parser, Subcommand, ValueEnum};
use monkey_diagnostic::termcolor::ColorChoice;

#[derive(Parser)]
#[command(name = "monkey", author, version, about, long_about = None)]
pub struct Cli {
    /// When to colour diagnostics.
    #[arg(long, value_enum, default_value_t = Color::Auto, global = true)]
    pub color: Color,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the tokens of a program.
    Tokens {
        /// The input file.
        input: String,

        /// Whether the given input should be used directly as the source instead
        /// of as the source file path.
        #[clap(long, short, action)]
        source: bool,
    },

    /// Parse a program and print its syntax tree.
    Parse {
        /// The input file.
        input: String,

        /// Whether the given input should be used directly as the source instead
        /// of as the source file path.
        #[clap(long, short, action)]
        source: bool,

        #[arg(long, value_enum, default_value_t = Emit::Ast)]
        emit: Emit,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// The program rendered back as fully parenthesised source.
    Ast,

    /// The syntax tree's debug representation.
    Debug,

    /// The syntax tree as JSON. Requires the `json` feature.
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Auto,
    Always,
    Never,
}

impl From<Color> for ColorChoice {
    fn from(color: Color) -> Self {
        match color {
            Color::Auto => ColorChoice::Auto,
            Color::Always => ColorChoice::Always,
            Color::Never => ColorChoice::Never,
        }
    }
}
