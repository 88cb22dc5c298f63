use anyhow::{anyhow, Result};
use std::fs::read_to_string;
use std::io::{self, Write};
use std::path::Path;

use scanner::{ErrorReporter, ScanError, Scanner};

pub mod ast;
pub mod scanner;

/// Writes each diagnostic to stderr as the scanner reports it.
struct ConsoleReporter;

impl ErrorReporter for ConsoleReporter {
    fn report(&mut self, error: &ScanError) {
        eprintln!("{error}");
    }
}

pub fn run_file(path: &Path) -> Result<()> {
    let source = read_to_string(path)?;
    run(&source)
}

pub fn run_prompt() -> Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        // a bad line must not end the session
        if let Err(e) = run(&line) {
            eprintln!("{e}");
        }
    }
    Ok(())
}

fn run(source: &str) -> Result<()> {
    let mut reporter = ConsoleReporter;
    let (tokens, had_error) = Scanner::new(source, &mut reporter).scan_tokens();

    for token in &tokens {
        println!("{token}");
    }

    if had_error {
        return Err(anyhow!("source contained lexical errors"));
    }
    Ok(())
}
