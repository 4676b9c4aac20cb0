mod logging;
mod parser;
mod reason;
mod render;
mod reporter;
mod result_tree;
mod run;
mod verdict;

use std::{collections::HashSet, io::IsTerminal};

use clap::{Parser, ValueEnum};

use parser::InputFormat;
use reporter::{Formatter, HtmlFormatter, JsonFormatter, TerminalFormatter};
use run::run;

#[derive(Clone, ValueEnum)]
enum Color {
    Auto,
    Always,
    Never,
}

#[derive(Clone, ValueEnum)]
enum Format {
    Terminal,
    Html,
    Json,
}

#[derive(Clone, ValueEnum)]
enum InputFormatArg {
    Auto,
    Json,
    Yaml,
}

/// Renders a test result tree as a report and exits non-zero when it failed.
#[derive(Parser)]
struct Args {
    /// Result tree files; `-` or none reads stdin
    files: Vec<String>,
    #[clap(value_enum, long = "color", default_value_t = Color::Auto)]
    color: Color,
    #[clap(value_enum, long = "format", default_value_t = Format::Terminal)]
    format: Format,
    #[clap(value_enum, long = "input-format", default_value_t = InputFormatArg::Auto)]
    input_format: InputFormatArg,
}

fn main() {
    logging::init_tracing();

    let args = Args::parse();

    // Check duplicated filenames
    let mut unique_files = HashSet::<&String>::new();
    let mut duplicated: Vec<&str> = vec![];
    let mut inputs: Vec<run::Input> = vec![];
    args.files.iter().for_each(|filename| {
        if unique_files.insert(filename) {
            inputs.push(match filename.as_ref() {
                "-" => run::Input::Stdin,
                _ => run::Input::File(filename.clone()),
            })
        } else {
            duplicated.push(filename);
        }
    });

    if !duplicated.is_empty() {
        eprintln!("duplicated input files: {}", duplicated.join(", "));
        std::process::exit(run::ReportError::InvalidInput.to_exit_status());
    }

    if inputs.is_empty() {
        inputs.push(run::Input::Stdin);
    }

    let use_color = match args.color {
        Color::Auto => std::io::stdout().is_terminal(),
        Color::Always => true,
        Color::Never => false,
    };

    let f: Box<dyn Formatter> = match args.format {
        Format::Terminal => Box::new(TerminalFormatter {}),
        Format::Html => Box::new(HtmlFormatter::new()),
        Format::Json => Box::new(JsonFormatter::new()),
    };

    let input_format = match args.input_format {
        InputFormatArg::Auto => InputFormat::Auto,
        InputFormatArg::Json => InputFormat::Json,
        InputFormatArg::Yaml => InputFormat::Yaml,
    };

    let mut w = std::io::stdout();
    if let Err(err) = run(inputs, input_format, &mut w, use_color, f) {
        std::process::exit(err.to_exit_status());
    }
}
