use std::{fs::read_to_string, path::PathBuf, process::ExitCode};

use clap::Parser;
use lettuce::{compile_source, printer::dump, render_error};
use tracing::{debug, error};

/// Checks a Lettuce source file and prints its annotated syntax tree.
#[derive(Parser, Debug)]
#[command(name = "ltc")]
#[command(version, about = "The Lettuce compiler front end", long_about = None)]
struct Cli {
    /// Source file to compile
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let file_name = cli.file.to_string_lossy().to_string();

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(err) => {
            error!(file = %file_name, "failed to read source file");
            eprintln!("Error: could not read {}: {}", file_name, err);
            return ExitCode::FAILURE;
        }
    };

    match compile_source(&source) {
        Ok(compilation) => {
            debug!(
                types = compilation.types.len(),
                scopes = compilation.scopes.scope_count(),
                symbols = compilation.scopes.symbol_count(),
                "compiled"
            );
            print!("{}", dump(&compilation.program, &compilation.types));
            ExitCode::SUCCESS
        }
        Err(diagnostics) => {
            for error in diagnostics.reportable() {
                eprint!("{}", render_error(error, &source, &file_name));
            }
            ExitCode::FAILURE
        }
    }
}
