// pasfront: tokenizer, parser and scope/type checker for a Pascal-like language

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser as ClapParser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use pasfront::config::Config;
use pasfront::error::{PasfrontError, PasfrontResult};
use pasfront::parser::ReservedWordTable;
use pasfront::ui::App;
use pasfront::{compile, report, Compilation};

/// Compile Pascal-like sources and write a listing, a token dump and a
/// storage layout for each one.
#[derive(Debug, ClapParser)]
#[command(name = "pasfront", version, about)]
struct Cli {
    /// Source files to compile
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reserved-word list to use instead of the built-in one
    #[arg(short, long)]
    reserved_words: Option<PathBuf>,

    /// Directory for report files
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Characters kept per source line
    #[arg(long)]
    max_line_width: Option<usize>,

    /// Open the terminal viewer for each compiled file
    #[arg(long)]
    view: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> PasfrontResult<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(path) = &self.reserved_words {
            config.reserved_words = Some(path.clone());
        }
        if let Some(dir) = &self.out_dir {
            config.out_dir = dir.clone();
        }
        if let Some(width) = self.max_line_width {
            config.max_line_width = width;
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_reserved_words(config: &Config) -> PasfrontResult<ReservedWordTable> {
    match &config.reserved_words {
        Some(path) => ReservedWordTable::load(path).map_err(|e| PasfrontError::io(path, e)),
        None => Ok(ReservedWordTable::builtin()),
    }
}

fn view(compilation: Compilation, path: &Path) -> PasfrontResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(compilation, path.display().to_string());
    let res = app.run(&mut terminal);

    // Restore the terminal even if the event loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(PasfrontError::from)
}

fn run(cli: &Cli) -> PasfrontResult<()> {
    let config = cli.config()?;
    let reserved = load_reserved_words(&config)?;

    for path in &cli.files {
        let source = fs::read_to_string(path).map_err(|e| PasfrontError::io(path, e))?;
        let compilation = compile(&source, &reserved, &config);

        let errors = compilation.diagnostics().count();
        if errors > 0 {
            tracing::warn!(file = %path.display(), errors, "compiled with errors");
        } else {
            tracing::info!(file = %path.display(), "compiled cleanly");
        }

        for written in report::write_reports(&compilation, path, &config)? {
            println!("{}", written.display());
        }

        if cli.view {
            view(compilation, path)?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        // Diagnostics are in the reports and are not failures.
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "pasfront",
            "--out-dir",
            "build",
            "--max-line-width",
            "20",
            "a.pas",
        ]);
        let config = cli.config().unwrap();
        assert_eq!(config.out_dir, PathBuf::from("build"));
        assert_eq!(config.max_line_width, 20);
        assert!(config.reserved_words.is_none());
        assert_eq!(cli.files, vec![PathBuf::from("a.pas")]);
    }

    #[test]
    fn test_missing_files_is_a_usage_error() {
        assert!(Cli::try_parse_from(["pasfront"]).is_err());
    }
}
