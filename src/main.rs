use clap::{Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use wabot::application::errors::BotError;
use wabot::application::messaging::{Dispatch, Dispatcher};
use wabot::domain::traits::ChatClient;
use wabot::infrastructure::adapters::console::ConsoleAdapter;
use wabot::infrastructure::config::{Config, Mode};
use wabot::plugins;

#[derive(Parser)]
#[command(name = "wabot")]
#[command(about = "Command plugins for a WhatsApp automation bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot mode (overrides config)
    #[arg(short, long)]
    mode: Option<Mode>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot on the console adapter
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
    /// List registered commands
    Commands,
}

fn main() {
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
        Commands::Run => run_bot(&cli.config, cli.mode),
        Commands::Version => {
            println!("wabot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
        Commands::Commands => list_commands(&cli.config, cli.mode),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(path: &str, mode: Option<Mode>) -> Result<Config, BotError> {
    let mut config = if Path::new(path).exists() {
        Config::load(path).or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })?
    } else {
        Config::load_env()?
    };

    if let Some(mode) = mode {
        config.bot.mode = mode;
    }
    Ok(config)
}

fn run_bot(config_path: &str, mode: Option<Mode>) -> Result<(), Box<dyn std::error::Error>> {
    plugins::mark_started();
    let config = load_config(config_path, mode)?;
    tracing::info!("Starting {} (mode: {}, prefix: '{}')", config.bot.name, config.bot.mode.as_str(), config.bot.prefix);

    let console = config.adapters.console.clone().unwrap_or_default();
    if !console.enabled {
        return Err("no chat adapter enabled".into());
    }

    let dispatcher = plugins::dispatcher(config)?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_console(dispatcher, ConsoleAdapter::new(&console)));
    Ok(())
}

async fn run_console(dispatcher: Dispatcher, adapter: ConsoleAdapter) {
    let adapter = Arc::new(adapter);
    let client: Arc<dyn ChatClient> = adapter.clone();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    tracing::info!("Console ready, chatting as {}", adapter.chat_jid());
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match dispatcher.dispatch(client.clone(), adapter.incoming(&line)).await {
            Ok(Dispatch::NoMatch) => tracing::debug!("No command in: {}", line),
            Ok(outcome) => tracing::debug!("Dispatch result: {:?}", outcome),
            Err(e) => tracing::error!("Failed to handle message: {}", e),
        }
    }
    tracing::info!("Console closed");
}

fn init_config(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    if Path::new(path).exists() {
        return Err(format!("{} already exists", path).into());
    }
    std::fs::write(path, Config::default().to_yaml()?)?;
    println!("Wrote default config to {}", path);
    Ok(())
}

fn list_commands(config_path: &str, mode: Option<Mode>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path, mode)?;
    let prefix = config.bot.prefix.clone();
    let dispatcher = plugins::dispatcher(config)?;

    for cmd in dispatcher.registry().all() {
        let mut flags = Vec::new();
        if cmd.public {
            flags.push("public");
        }
        if cmd.is_group {
            flags.push("group");
        }
        if cmd.dont_add_command_list {
            flags.push("hidden");
        }
        println!("{}{:<12} {}", prefix, cmd.name, flags.join(","));
    }
    Ok(())
}
