//! mdhtml CLI: convert lightweight markup to HTML
//!
//! Usage: `mdhtml [--strict] [FILE|-]`. Reads stdin when no file is given.
//! `RUST_LOG` controls diagnostics on stderr (default: warn).

use std::io::{self, Read, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut options = mdhtml::Options::default();
    let mut path = None;
    for arg in std::env::args().skip(1) {
        if arg == "--strict" {
            options.strict_references = true;
        } else if arg == "-" {
            path = None;
        } else {
            path = Some(arg);
        }
    }

    match run(path.as_deref(), &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: Option<&str>, options: &mdhtml::Options) -> Result<(), Box<dyn std::error::Error>> {
    let input = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let html = mdhtml::try_to_html(&input, options)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(html.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}
