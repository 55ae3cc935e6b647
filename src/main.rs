//! CLI entry point for the `timecalc` tool.
//!
//! With an expression argument the result is printed and the process exits
//! with status 1 on error. Without one, each non-blank line of standard
//! input is evaluated in turn.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use timecalc::{evaluate, tokenize};

/// Calculator for dates, times and durations.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print the token stream instead of evaluating.
    #[arg(short, long)]
    tokens: bool,

    /// Expression to evaluate; read lines from stdin when absent.
    expr: Option<String>,
}

/// Handle one expression, returning whether it succeeded.
fn run(src: &str, dump_tokens: bool) -> io::Result<bool> {
    let mut out = io::stdout().lock();
    if dump_tokens {
        return match tokenize(src) {
            Ok(tokens) => {
                for token in tokens {
                    writeln!(
                        out,
                        "{:?} {:?} {:?}",
                        token.kind(),
                        token.text(),
                        token.span()
                    )?;
                }
                Ok(true)
            }
            Err(err) => {
                writeln!(io::stderr(), "{err}")?;
                Ok(false)
            }
        };
    }
    match evaluate(src) {
        Ok(value) => {
            writeln!(out, "{value}")?;
            Ok(true)
        }
        Err(err) => {
            writeln!(io::stderr(), "{}", err.snippet(src))?;
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let outcome = match args.expr {
        Some(expr) => run(&expr, args.tokens),
        None => io::stdin().lock().lines().try_fold(true, |ok, line| {
            let line = line?;
            if line.trim().is_empty() {
                return Ok(ok);
            }
            Ok(run(&line, args.tokens)? && ok)
        }),
    };
    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            let _ = writeln!(io::stderr(), "timecalc: {err}");
            ExitCode::FAILURE
        }
    }
}
