use std::{
    fs,
    io::{self, BufRead},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use computor::{
    Interpreter,
    config::{AngleMode, Config, Limits},
};
use log::LevelFilter;

/// computor evaluates exact rational, complex and matrix expressions and
/// solves polynomial equations up to degree 2.
///
/// Without an expression or a file, lines are read from standard input.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Runs every line of a script file in one session.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Evaluates trigonometric functions in degrees.
    #[arg(long)]
    degrees: bool,

    /// Falls back to plain evaluation when inlining functions for `expr = ?`
    /// fails.
    #[arg(long)]
    best_effort: bool,

    /// Maximum bracket nesting accepted by the parser.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Raises the log level; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// An expression to run, as one line.
    expression: Vec<String>,
}

impl Args {
    fn config(&self) -> Config {
        let defaults = Limits::default();
        Config { angle_mode:           if self.degrees { AngleMode::Degrees } else { AngleMode::Radians },
                 best_effort_inlining: self.best_effort,
                 limits:               Limits { max_depth: self.max_depth.unwrap_or(defaults.max_depth),
                                                ..defaults }, }
    }

    const fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Runs one line and prints its result or its error.
///
/// # Returns
/// `false` if the line failed.
fn run_line(interpreter: &mut Interpreter, line: &str) -> bool {
    match interpreter.execute(line) {
        Ok(Some(output)) => {
            println!("{output}");
            true
        },
        Ok(None) => true,
        Err(e) => {
            eprintln!("Error: {e}");
            false
        },
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new().filter_level(args.log_level())
                              .parse_default_env()
                              .init();

    let mut interpreter = Interpreter::with_config(args.config());

    if !args.expression.is_empty() {
        let line = args.expression.join(" ");
        if !run_line(&mut interpreter, &line) {
            std::process::exit(1);
        }
        return Ok(());
    }

    if let Some(path) = &args.file {
        let script = fs::read_to_string(path).with_context(|| {
                                                 format!("failed to read the input file '{}'",
                                                         path.display())
                                             })?;
        let failures = script.lines()
                             .filter(|line| !run_line(&mut interpreter, line))
                             .count();
        log::info!("{failures} line(s) failed");
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read standard input")?;
        run_line(&mut interpreter, &line);
    }
    Ok(())
}
