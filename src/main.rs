// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use signbridge::app_config::{self, Config, TranslationProvider};
use signbridge::history::{DatabaseConnection, HistoryStore, Repository};
use signbridge::playback::{DryRunPlayer, PlaybackEvent, PlaybackState};
use signbridge::prefetch::PrefetchCache;
use signbridge::{LanguageMode, SignCatalog, SignEngine, TranslationOutcome, TranslationService};

/// CLI Wrapper for LanguageMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLanguage {
    Sinhala,
    Tamil,
    English,
}

impl From<CliLanguage> for LanguageMode {
    fn from(cli_language: CliLanguage) -> Self {
        match cli_language {
            CliLanguage::Sinhala => LanguageMode::Sinhala,
            CliLanguage::Tamil => LanguageMode::Tamil,
            CliLanguage::English => LanguageMode::English,
        }
    }
}

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Gemini,
    Offline,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Gemini => TranslationProvider::Gemini,
            CliTranslationProvider::Offline => TranslationProvider::Offline,
        }
    }
}

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
    /// Translate text into a sequence of sign videos
    Translate(TranslateArgs),

    /// Manage saved translations
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Generate shell completions for signbridge
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Text to translate
    #[arg(value_name = "TEXT")]
    text: String,

    /// Input language (defaults to the configured language mode)
    #[arg(short, long, value_enum)]
    language: Option<CliLanguage>,

    /// Sign catalog JSON file
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Drive playback against a dry-run player and print each sign
    #[arg(long)]
    play: bool,

    /// Save the translation to history
    #[arg(short, long)]
    save: bool,
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// List saved translations, newest first
    List {
        /// Maximum number of records to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Delete one saved translation
    Delete {
        /// Record id
        id: String,
    },

    /// Delete every saved translation
    Clear,
}

/// SignBridge - text to sign language video
///
/// Translates Sinhala, Tamil or English text into an ordered sequence of
/// sign language video clips.
#[derive(Parser, Debug)]
#[command(name = "signbridge")]
#[command(version)]
#[command(about = "Text to sign language video sequencing")]
#[command(long_about = "SignBridge translates text into a sequence of sign language videos.

EXAMPLES:
    signbridge translate \"ayubowan amma\"              # Sinhala input (default)
    signbridge translate -l english \"Hello John\"      # English input, John is fingerspelled
    signbridge translate -p offline \"istuti amma\"     # Use the built-in dictionary
    signbridge translate --play --save \"Hello\"        # Play through and save to history
    signbridge history list -n 10                     # Show the last 10 saved translations
    signbridge completions bash > signbridge.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config: PathBuf,

    /// Set logging level
    #[arg(long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
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

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize with trace so the level can be lowered after loading the config
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "signbridge", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(&cli.config)?;
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        Commands::Translate(args) => run_translate(config, args).await,
        Commands::History { action } => run_history(config, action).await,
        Commands::Completions { .. } => Ok(()),
    }
}

async fn run_translate(mut config: Config, args: TranslateArgs) -> Result<()> {
    let mode: LanguageMode = args.language.map(Into::into).unwrap_or(config.language_mode);

    if let Some(provider) = args.provider {
        config.translation.provider = provider.into();
    }
    if let Some(catalog) = args.catalog {
        config.catalog_path = catalog;
    }
    if !mode.needs_translation()
        && config.translation.provider == TranslationProvider::Gemini
        && config.translation.api_key.trim().is_empty()
    {
        debug!("English input, no Gemini key needed");
        config.translation.provider = TranslationProvider::Offline;
    }

    config.validate().context("Configuration validation failed")?;

    let catalog = SignCatalog::from_json_file(&config.catalog_path)
        .with_context(|| format!("Failed to load sign catalog: {:?}", config.catalog_path))?;
    info!("Loaded {} signs from {:?}", catalog.len(), config.catalog_path);

    let translator = Arc::new(TranslationService::new(config.translation.clone())?);
    let cache = PrefetchCache::with_http(&config.prefetch);
    let mut engine = SignEngine::new(config.clone(), catalog, translator, cache, DryRunPlayer::new());
    if args.save {
        engine = engine.with_history(Arc::new(open_history(&config)?));
    }

    let outcome = engine.submit_translation(&args.text, mode).await?;
    print_outcome(&outcome);

    if args.play {
        play_through(&mut engine).await?;
    }

    if args.save {
        if let Some(record) = engine.save_current().await? {
            println!("Saved to history as {}", record.id);
        }
    }

    Ok(())
}

fn print_outcome(outcome: &TranslationOutcome) {
    if outcome.is_empty() {
        println!("Nothing to translate.");
        return;
    }

    if let Some(script) = &outcome.localized_script {
        println!("Input:       {}", script);
    }
    println!("Translation: {}", outcome.translated_text);
    println!("Signs ({}):", outcome.playable_sequence.len());
    for (i, url) in outcome.playable_sequence.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, url);
    }
    if !outcome.missing_words.is_empty() {
        println!("No sign found for: {}", outcome.missing_words.join(", "));
    }
    if !outcome.skipped_words.is_empty() {
        println!("Skipped: {}", outcome.skipped_words.join(", "));
    }
}

/// Play every clip on the dry-run player, acknowledging each one as finished
async fn play_through(engine: &mut SignEngine<DryRunPlayer>) -> Result<()> {
    if engine.playlist().playable.is_empty() {
        warn!("No playable signs in this translation");
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(80));

    let ticker = engine.readiness().cloned().map(|readiness| {
        let spinner = spinner.clone();
        tokio::spawn(async move {
            loop {
                spinner.set_message(format!(
                    "Prefetching signs {}/{} ({:.0}%)",
                    readiness.loaded(),
                    readiness.total(),
                    readiness.progress()
                ));
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        })
    });

    let started = engine.begin_playback().await;
    if let Some(ticker) = ticker {
        ticker.abort();
    }
    spinner.finish_and_clear();
    started?;

    let Some(playlist_id) = engine.controller().playlist_id() else {
        return Err(anyhow!("No playlist loaded"));
    };

    while engine.state() != PlaybackState::Finished {
        if let Some(annotation) = engine.current_annotation() {
            println!("  > {}", annotation);
        }
        if let Err(e) = engine.handle_event(PlaybackEvent::finished(playlist_id)).await {
            error!("{}", e);
            return Err(e.into());
        }
    }

    info!("Played {} clips", engine.controller().player().loaded().len());
    Ok(())
}

fn open_history(config: &Config) -> Result<Repository> {
    let db = match &config.history_db_path {
        Some(path) => DatabaseConnection::new(path)?,
        None => DatabaseConnection::new_default()?,
    };
    Ok(Repository::new(db))
}

async fn run_history(config: Config, action: HistoryAction) -> Result<()> {
    let repo = open_history(&config)?;

    match action {
        HistoryAction::List { limit } => {
            let records = repo.list(limit).await?;
            if records.is_empty() {
                println!("No saved translations.");
            }
            for record in records {
                println!("{}  [{}]  {}", record.timestamp, record.language.code(), record.id);
                match &record.localized_script {
                    Some(script) => println!("    {} ({})", record.original_text, script),
                    None => println!("    {}", record.original_text),
                }
                println!("    -> {}", record.translated_text);
            }
        }
        HistoryAction::Delete { id } => match repo.delete(&id).await? {
            Some(record) => println!("Deleted \"{}\"", record.original_text),
            None => return Err(anyhow!("No saved translation with id {}", id)),
        },
        HistoryAction::Clear => {
            let removed = repo.clear().await?;
            println!("Deleted {} saved translations", removed);
        }
    }

    Ok(())
}
