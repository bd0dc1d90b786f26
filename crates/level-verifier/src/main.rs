//! CLI entry point for the level verifier.
//!
//! Usage:
//!   level-verifier verify <LEVEL> <ATTEMPT> [options]
//!   level-verifier verify <LEVEL> --stdin [options]
//!   level-verifier normalize <LEVEL> [--game <GAME>]
//!
//! LEVEL and ATTEMPT are literal strings or paths to files containing them.
//!
//! Options:
//!   --game <GAME>       modulo, runaway or bricolage (default: inferred)
//!   --format <FORMAT>   text or json (default: text)
//!   --max-steps <n>     Cap on Runaway instructions (default: none)
//!
//! Exit codes: 0 solved, 1 not solved or illegal, 2 malformed input.
//! Set `RUST_LOG=debug` to see why a move was rejected.

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use level_verifier::{verify, Family, Level, Outcome, Verdict, VerifyOptions};

#[derive(Parser)]
#[command(name = "level-verifier")]
#[command(about = "Replay Modulo, Runaway and Bricolage attempts against their levels")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an attempt against a level and report the verdict
    Verify {
        /// Level string or path to a .level file
        #[arg(value_name = "LEVEL")]
        level: String,

        /// Attempt string or path to a file (use --stdin to read from stdin)
        #[arg(value_name = "ATTEMPT")]
        attempt: Option<String>,

        /// Read the attempt from stdin instead of an argument
        #[arg(long)]
        stdin: bool,

        /// Puzzle family of the level
        #[arg(long)]
        game: Option<Family>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Maximum Runaway instructions to execute
        #[arg(long)]
        max_steps: Option<usize>,
    },

    /// Parse a level and print its canonical encoding
    Normalize {
        /// Level string or path to a .level file
        #[arg(value_name = "LEVEL")]
        level: String,

        /// Puzzle family of the level
        #[arg(long)]
        game: Option<Family>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

const EXIT_MALFORMED: u8 = 2;

fn main() -> ExitCode {
    env_logger::builder().format_timestamp(None).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Verify {
            level,
            attempt,
            stdin,
            game,
            format,
            max_steps,
        } => {
            let level_raw = match read_text_arg(&level) {
                Ok(raw) => raw,
                Err(e) => {
                    eprintln!("Error: failed to read level {level:?}: {e}");
                    return ExitCode::from(EXIT_MALFORMED);
                }
            };

            let attempt_raw = if stdin {
                let mut buffer = String::new();
                if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                    eprintln!("Error: failed to read attempt from stdin: {e}");
                    return ExitCode::from(EXIT_MALFORMED);
                }
                buffer.trim().to_string()
            } else if let Some(attempt) = attempt {
                match read_text_arg(&attempt) {
                    Ok(raw) => raw,
                    Err(e) => {
                        eprintln!("Error: failed to read attempt {attempt:?}: {e}");
                        return ExitCode::from(EXIT_MALFORMED);
                    }
                }
            } else {
                eprintln!("Error: Must provide either an attempt or --stdin");
                return ExitCode::from(EXIT_MALFORMED);
            };

            let options = VerifyOptions {
                family: game,
                max_steps,
            };
            let verdict = verify(&level_raw, &attempt_raw, &options);
            log::info!("verdict: {:?} ({})", verdict.outcome, verdict.reason);

            if let Err(e) = print_verdict(&verdict, format) {
                eprintln!("Error: failed to write verdict: {e}");
                return ExitCode::from(EXIT_MALFORMED);
            }
            ExitCode::from(verdict.outcome.exit_code())
        }

        Commands::Normalize { level, game } => {
            let parsed = read_text_arg(&level)
                .map_err(|e| e.to_string())
                .and_then(|raw| Level::parse(&raw, game).map_err(|e| e.to_string()));
            match parsed {
                Ok(level) => {
                    println!("{level}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::from(EXIT_MALFORMED)
                }
            }
        }
    }
}

/// Use the trimmed contents of `value` if it names a file, else `value`
/// itself.
fn read_text_arg(value: &str) -> io::Result<String> {
    let path = Path::new(value);
    if path.is_file() {
        Ok(fs::read_to_string(path)?.trim().to_string())
    } else {
        Ok(value.trim().to_string())
    }
}

fn print_verdict(verdict: &Verdict, format: OutputFormat) -> serde_json::Result<()> {
    match format {
        OutputFormat::Text if verdict.outcome == Outcome::ParseError => {
            println!("Error: {}", verdict.reason);
        }
        OutputFormat::Text => println!("{}", verdict.reason),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(verdict)?),
    }
    Ok(())
}
