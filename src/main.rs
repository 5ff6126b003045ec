use std::env;
use std::io;
#[cfg(feature = "dot")]
use std::io::Write;
use std::process;

use anyhow::{bail, Context, Result};
use thompson_match::{render_postfix, to_postfix, Regex};

enum Mode {
    Match,
    Postfix,
    #[cfg(feature = "dot")]
    Dot,
}

fn parse_args() -> Result<(Mode, String)> {
    let mut args = env::args().skip(1);
    let mode = match args.next().as_deref() {
        Some("-E") => Mode::Match,
        Some("--postfix") => Mode::Postfix,
        #[cfg(feature = "dot")]
        Some("--dot") => Mode::Dot,
        Some(other) => bail!("unknown option '{other}'"),
        None => bail!("missing option"),
    };
    let pattern = args.next().context("missing pattern")?;
    Ok((mode, pattern))
}

// Usage: echo <input_text> | thompson-match -E <pattern>
//        thompson-match --postfix <pattern>
//        thompson-match --dot <pattern>
fn run() -> Result<i32> {
    let (mode, pattern) = match parse_args() {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("usage: thompson-match (-E | --postfix | --dot) <pattern>");
            return Ok(2);
        }
    };

    match mode {
        Mode::Match => {
            let regex = match Regex::new(&pattern) {
                Ok(regex) => regex,
                Err(err) => {
                    eprintln!("invalid pattern {pattern:?}: {err}");
                    return Ok(2);
                }
            };

            let mut input_line = String::new();
            io::stdin()
                .read_line(&mut input_line)
                .context("failed to read input line")?;

            // The line must be matched in full, so drop the newline first.
            let trimmed_input = input_line.trim_end_matches(['\n', '\r']);

            Ok(if regex.is_match(trimmed_input) { 0 } else { 1 })
        }
        Mode::Postfix => match to_postfix(&pattern) {
            Ok(postfix) => {
                println!("{}", render_postfix(&postfix));
                Ok(0)
            }
            Err(err) => {
                eprintln!("invalid pattern {pattern:?}: {err}");
                Ok(2)
            }
        },
        #[cfg(feature = "dot")]
        Mode::Dot => {
            let regex = match Regex::new(&pattern) {
                Ok(regex) => regex,
                Err(err) => {
                    eprintln!("invalid pattern {pattern:?}: {err}");
                    return Ok(2);
                }
            };
            let mut stdout = io::stdout().lock();
            regex
                .automaton()
                .output_dot(&mut stdout)
                .context("failed to write dot output")?;
            stdout.flush().context("failed to flush stdout")?;
            Ok(0)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let code = run()?;
    process::exit(code)
}
