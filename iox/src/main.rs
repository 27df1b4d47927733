//! `iox` - an indentation-sensitive, stack-oriented scripting language.
//!
//! With script paths given, each runs to completion in its own fresh
//! interpreter and `mark`/`jmp` work against the file's own seek
//! positions. With none given, starts an interactive session where
//! every result auto-prints and marks are unavailable.

mod config;
mod error;

use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;
use error::{CliError, Result};
use iox_runtime::{Context, Driver, FileSource, ReplSource};

/// `iox` - an indentation-sensitive, stack-oriented scripting language.
#[derive(Parser, Debug)]
#[command(name = "iox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run iox scripts, or start an interactive session with none given")]
struct Cli {
    /// Script files to run; omit to start an interactive session
    scripts: Vec<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true, env = "IOX_VERBOSE")]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "IOX_NO_COLOR")]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_logging(cli.verbose, cli.no_color || config.no_color)?;

    if cli.scripts.is_empty() {
        run_repl(&config)
    } else {
        for path in &cli.scripts {
            tracing::info!(script = %path.display(), "running script");
            run_file(path)?;
        }
        Ok(())
    }
}

fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };
    let subscriber = fmt::layer().with_ansi(!no_color).with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))?;

    Ok(())
}

fn run_file(path: &PathBuf) -> Result<()> {
    let source = FileSource::open(path).map_err(|source| CliError::OpenScript {
        path: path.clone(),
        source,
    })?;
    let ctx = Context::new(Box::new(std::io::stdout()), Box::new(BufReader::new(std::io::stdin())));
    let mut driver = Driver::new(ctx, source, false);
    driver.run()?;
    Ok(())
}

fn run_repl(config: &Config) -> Result<()> {
    let mut editor = DefaultEditor::new().map_err(|e| CliError::LineEditor(e.to_string()))?;
    let history_path = config.history_path();
    let _ = editor.load_history(&history_path);

    let editor = std::rc::Rc::new(std::cell::RefCell::new(editor));
    let editor_for_source = editor.clone();
    let last_nonempty = std::rc::Rc::new(std::cell::RefCell::new(None::<String>));
    let source = ReplSource::new(move || match editor_for_source.borrow_mut().readline("iox> ") {
        Ok(line) => {
            let _ = editor_for_source.borrow_mut().add_history_entry(line.as_str());
            if line.trim().is_empty() {
                Ok(last_nonempty.borrow().clone().or(Some(line)))
            } else {
                *last_nonempty.borrow_mut() = Some(line.clone());
                Ok(Some(line))
            }
        }
        Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
        Err(_) => Ok(None),
    });

    let ctx = Context::new(Box::new(std::io::stdout()), Box::new(BufReader::new(std::io::stdin())));
    let mut driver = Driver::new(ctx, source, true);
    let result = driver.run();

    let _ = editor.borrow_mut().save_history(&history_path);
    result.map_err(CliError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_with_no_scripts_has_an_empty_list() {
        let cli = Cli::parse_from(["iox"]);
        assert!(cli.scripts.is_empty());
    }

    #[test]
    fn cli_collects_script_paths() {
        let cli = Cli::parse_from(["iox", "a.iox", "b.iox"]);
        assert_eq!(cli.scripts, vec![PathBuf::from("a.iox"), PathBuf::from("b.iox")]);
    }

    #[test]
    fn cli_parses_verbose_flag() {
        let cli = Cli::parse_from(["iox", "--verbose", "a.iox"]);
        assert!(cli.verbose);
    }
}
