use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use picbot::application::errors::StartupError;
use picbot::application::messaging::Dispatcher;
use picbot::application::services::UpdateLoop;
use picbot::domain::traits::Bot;
use picbot::infrastructure::adapters::{ConsoleAdapter, TelegramAdapter};
use picbot::infrastructure::config::{Config, Overrides};
use picbot::infrastructure::library::{list_categories, FsLibrary};

#[derive(Parser)]
#[command(name = "picbot")]
#[command(about = "Replies to chat messages with random pictures from a folder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,

    /// Pictures root folder (overrides config)
    #[arg(short, long)]
    pictures: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
    /// List the categories found in the pictures folder
    Categories,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => load_config(&cli).and_then(run_bot),
        Commands::Version => {
            println!("picbot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
        Commands::Categories => load_config(&cli).and_then(print_categories),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, StartupError> {
    let overrides = Overrides {
        token: cli.token.clone(),
        pictures: cli.pictures.clone(),
    };
    let config = Config::resolve(Path::new(&cli.config), &overrides, |key| std::env::var(key).ok())?;
    Ok(config)
}

fn run_bot(config: Config) -> Result<(), StartupError> {
    tracing::info!("Starting {}", config.bot.name);

    let rt = tokio::runtime::Runtime::new().map_err(StartupError::Runtime)?;
    let result = rt.block_on(async {
        let library = FsLibrary::open(&config.library.root).await?;
        let dispatcher = Dispatcher::new(Arc::new(library));

        let shutdown = CancellationToken::new();
        tokio::spawn({
            let shutdown = shutdown.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("Received Ctrl-C, shutting down");
                    shutdown.cancel();
                }
            }
        });

        match config.token() {
            Some(token) => {
                let bot = TelegramAdapter::new(token)
                    .with_poll_timeout(config.telegram.poll_timeout_seconds)
                    .with_attachment_name(config.library.attachment_name.clone());
                drive(bot, dispatcher, shutdown).await
            }
            None => {
                tracing::warn!("No bot token configured, running on the console");
                let bot = ConsoleAdapter::new(shutdown.clone());
                drive(bot, dispatcher, shutdown).await
            }
        }
    });

    // Stdin reads sit on a blocking thread that never returns by itself
    rt.shutdown_timeout(Duration::from_secs(1));
    result
}

async fn drive<B: Bot>(mut bot: B, dispatcher: Dispatcher, shutdown: CancellationToken) -> Result<(), StartupError> {
    bot.start().await.map_err(StartupError::Connect)?;

    let mut update_loop = UpdateLoop::new(bot, dispatcher, shutdown);
    update_loop.run().await.map_err(StartupError::Connect)?;
    Ok(())
}

fn print_categories(config: Config) -> Result<(), StartupError> {
    let rt = tokio::runtime::Runtime::new().map_err(StartupError::Runtime)?;
    let categories = rt.block_on(list_categories(&config.library.root))?;

    println!("{} categories in {}:", categories.len(), config.library.root.display());
    for category in categories {
        println!("  {}", category);
    }
    Ok(())
}

fn init_config() -> Result<(), StartupError> {
    let yaml = Config::default().to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
