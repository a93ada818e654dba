// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{info, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use svg_standalone::app_config::{self, Config};
use svg_standalone::Controller;
use svg_standalone::file_utils::FileManager;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate standalone SVG artworks (default command)
    Convert(ConvertArgs),

    /// Generate shell completions for svg-standalone
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct ConvertArgs {
    /// Modular SVG file or directory to process (defaults to the configured input directory)
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Directory receiving the standalone artworks
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Suffix appended to the output file names
    #[arg(short, long)]
    suffix: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// svg-standalone - Standalone SVG generator
///
/// Embeds the external scripts of modular SVG artworks so that the
/// generated files run without any companion file.
#[derive(Parser, Debug)]
#[command(name = "svg-standalone")]
#[command(version)]
#[command(about = "Embed external scripts into SVG artworks")]
#[command(long_about = "svg-standalone copies modular SVG artworks and embeds every script they reference.

EXAMPLES:
    svg-standalone                               # Convert ./modular/*.svg into ./standalone/
    svg-standalone clock.svg                     # Convert a single artwork
    svg-standalone -o out/ -s _Full artworks/    # Custom output directory and suffix
    svg-standalone completions bash > svg-standalone.bash

CONFIGURATION:
    Settings are read from conf.json when it exists. Command line options
    take precedence over the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    convert: ConvertArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {:<5} {}\x1B[0m", color, now, record.level(), record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Start at info; the configured level is applied once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "svg-standalone", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args),
        None => run_convert(cli.convert),
    }
}

// @resolves: Config file values overridden by the command line
fn resolve_config(options: &ConvertArgs) -> Result<(Config, PathBuf)> {
    let mut config = Config::load_or_default(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(output_dir) = &options.output_dir {
        config.output_dir = output_dir.clone();
    }

    if let Some(suffix) = &options.suffix {
        config.output_suffix = suffix.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    let input_path = options.input_path.clone().unwrap_or_else(|| config.input_dir.clone());
    if FileManager::dir_exists(&input_path) {
        config.input_dir = input_path.clone();
    }

    Ok((config, input_path))
}

fn run_convert(options: ConvertArgs) -> Result<()> {
    let (config, input_path) = resolve_config(&options)?;

    log::set_max_level(config.log_level.into());
    if FileManager::file_exists(&options.config_path) {
        debug!("Loaded configuration from {:?}", options.config_path);
    }

    let controller = Controller::with_config(config)?;

    if !input_path.exists() {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    let summary = controller.run(&input_path)?;
    info!("Done: {} standalone artwork(s) written", summary.processed);

    if summary.failed > 0 {
        return Err(anyhow!("{} artwork(s) could not be converted", summary.failed));
    }

    Ok(())
}
