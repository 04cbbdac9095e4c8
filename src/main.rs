// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use log::{error, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use pdfvertaler::app_config::{self, Config, TranslationProvider};
use pdfvertaler::app_controller::Controller;
use pdfvertaler::errors::AppError;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliTranslationProvider {
    Gemini,
    Anthropic,
    Ollama,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Gemini => TranslationProvider::Gemini,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Generate shell completions for pdfvertaler
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct TranslateArgs {
    /// PDF document to extract and translate
    #[arg(value_name = "PDF_PATH")]
    input_path: Option<PathBuf>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Source language code (e.g., 'nl', 'de', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Maximum number of characters sent per request
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    chunk_size: Option<u64>,

    /// API key for the provider (overrides the provider's environment variable)
    #[arg(long, env = "PDFVERTALER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print the extracted text without translating it
    #[arg(short, long)]
    extract_only: bool,
}

/// pdfvertaler - PDF text extraction and AI translation
///
/// Extracts the text of a PDF document and translates it chunk by chunk
/// with an AI provider (Gemini, Anthropic, Ollama).
#[derive(Parser, Debug)]
#[command(name = "pdfvertaler")]
#[command(version)]
#[command(about = "Extract text from a PDF and translate it with AI")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "pdfvertaler extracts the text of a PDF document and translates it with an AI provider.

EXAMPLES:
    pdfvertaler report.pdf                          # Dutch to English with Gemini
    pdfvertaler -e report.pdf                       # Only print the extracted text
    pdfvertaler -p anthropic report.pdf             # Use Anthropic
    pdfvertaler -s de -t en --chunk-size 5000 a.pdf # German to English, smaller requests
    pdfvertaler completions bash > pdfvertaler.bash # Generate bash completions

CREDENTIALS:
    API keys are read from the environment variable configured for the provider
    (GEMINI_API_KEY, ANTHROPIC_API_KEY by default) or from --api-key /
    PDFVERTALER_API_KEY. Ollama needs no key.

EXIT CODES:
    0 success, 1 configuration or other error, 2 invalid arguments,
    3 extraction failed, 4 translation failed")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
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
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌ "),
            Level::Warn => ("\x1B[1;33m", "🚧 "),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍 "),
            Level::Trace => ("\x1B[1;35m", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // The global max level is adjusted after config load; this is the ceiling
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, emoji) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                colour, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Accept every level; the effective level is set through log::set_max_level
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "pdfvertaler", &mut std::io::stdout());
            ExitCode::SUCCESS
        }
        None => match run_translate(cli.translate).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{}", e);
                ExitCode::from(e.exit_code())
            }
        },
    }
}

async fn run_translate(options: TranslateArgs) -> Result<(), AppError> {
    // If log level is set via command line, apply it immediately
    if let Some(level) = options.log_level {
        let level: app_config::LogLevel = level.into();
        log::set_max_level(level.into());
    }

    let input_path = options.input_path.clone().ok_or_else(|| {
        AppError::Unknown("PDF_PATH is required when no subcommand is specified".to_string())
    })?;

    let config = load_config(&options)?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.into());
    }

    let controller = Controller::with_config(config)?.with_progress(true);

    let extracted = controller.extract(&input_path)?;
    println!("Extracted Text:");
    println!("{}", extracted);

    if options.extract_only {
        return Ok(());
    }

    let translated = controller.translate(&extracted).await?;
    println!("\nTranslated Text:");
    println!("{}", translated);

    info!("Done: {:?}", input_path);
    Ok(())
}

// Load the config file and apply command line overrides
fn load_config(options: &TranslateArgs) -> Result<Config, AppError> {
    let mut config = Config::load_or_default(&options.config_path)?;

    if let Some(provider) = options.provider {
        config.translation.provider = provider.into();
    }

    if let Some(model) = &options.model {
        config.translation.active_provider_config_mut().model = model.clone();
    }

    if let Some(timeout_secs) = options.timeout_secs {
        config.translation.active_provider_config_mut().timeout_secs = timeout_secs;
    }

    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }

    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }

    if let Some(chunk_size) = options.chunk_size {
        config.chunk_size = usize::try_from(chunk_size).unwrap_or(usize::MAX);
    }

    if let Some(api_key) = &options.api_key {
        config.translation.api_key_override = Some(api_key.clone());
    }

    if let Some(log_level) = options.log_level {
        config.log_level = log_level.into();
    }

    Ok(config)
}
