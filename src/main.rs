//! discord-formatter CLI entry point.
//!
//! Provides `format`, `prompt`, and `config` subcommands for reformatting a
//! message through the backend, previewing the instruction payload, or
//! printing the effective configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};

use discord_formatter::config::{validate_backend_url, Config};
use discord_formatter::error::EMPTY_INPUT_MESSAGE;
use discord_formatter::logging::{self, LoggingGuard};
use discord_formatter::options::{FormattingOptions, FormattingStyle, MessageLength, Tone};
use discord_formatter::prompt::build_prompt;
use discord_formatter::ui::{FormatSession, ViewState};
use discord_formatter::FormattingClient;

/// Reformat raw text into Discord-flavored markdown.
#[derive(Parser)]
#[command(name = "discord-formatter", version, about)]
struct Cli {
    /// Path to a config file (defaults to ~/.discord-formatter/config.toml).
    #[arg(long = "config", global = true, value_name = "PATH")]
    config_path: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Send a message to the backend and print the formatted markdown.
    Format {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        options: OptionArgs,
        /// Override the backend endpoint.
        #[arg(long, value_name = "URL")]
        backend_url: Option<String>,
    },
    /// Print the instruction payload without contacting the backend.
    Prompt {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Print the effective configuration as TOML.
    Config,
}

/// Where the raw message comes from.
#[derive(Args)]
struct InputArgs {
    /// Raw message text. Read from stdin when neither this nor --file is given.
    #[arg(conflicts_with = "file")]
    message: Option<String>,

    /// Read the raw message from a file.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
}

/// Per-request overrides of the configured option defaults.
#[derive(Args)]
struct OptionArgs {
    /// Include emojis (true/false).
    #[arg(long, value_name = "BOOL")]
    emojis: Option<bool>,

    /// Append 2–3 hashtags (true/false).
    #[arg(long, value_name = "BOOL")]
    hashtags: Option<bool>,

    /// Markup density: expressive or minimal.
    #[arg(long)]
    style: Option<FormattingStyle>,

    /// Voice: casual, enthusiastic or formal.
    #[arg(long)]
    tone: Option<Tone>,

    /// Length: concise, default or detailed.
    #[arg(long)]
    length: Option<MessageLength>,
}

impl OptionArgs {
    fn resolve(&self, defaults: FormattingOptions) -> FormattingOptions {
        FormattingOptions {
            use_emojis: self.emojis.unwrap_or(defaults.use_emojis),
            add_hashtags: self.hashtags.unwrap_or(defaults.add_hashtags),
            formatting_style: self.style.unwrap_or(defaults.formatting_style),
            tone: self.tone.unwrap_or(defaults.tone),
            message_length: self.length.unwrap_or(defaults.message_length),
        }
    }
}

impl InputArgs {
    fn read(&self) -> anyhow::Result<String> {
        if let Some(message) = &self.message {
            return Ok(message.clone());
        }
        if let Some(path) = &self.file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read message from {}", path.display()));
        }
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read message from stdin")?;
        Ok(buf)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let dotenv_path = dotenvy::dotenv().ok();

    let (config, rejected_overrides) =
        Config::load(cli.config_path.as_deref()).context("failed to load configuration")?;
    let _logging_guard = init_logging(&config)?;

    for rejected in &rejected_overrides {
        warn!(var = rejected.var, value = %rejected.value, "ignoring invalid env override");
    }

    if let Some(path) = dotenv_path {
        debug!(path = %path.display(), "loaded .env");
    }

    match cli.command {
        Command::Format {
            input,
            options,
            backend_url,
        } => handle_format(config, &input, &options, backend_url).await,
        Command::Prompt { input, options } => {
            let raw = input.read()?;
            if raw.trim().is_empty() {
                eprintln!("{EMPTY_INPUT_MESSAGE}");
                return Ok(ExitCode::FAILURE);
            }
            let options = options.resolve(config.defaults);
            println!("{}", build_prompt(&raw, &options));
            Ok(ExitCode::SUCCESS)
        }
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(config: &Config) -> anyhow::Result<Option<LoggingGuard>> {
    match &config.logging.dir {
        Some(dir) => logging::init_with_file(dir, &config.logging.level).map(Some),
        None => {
            logging::init_cli(&config.logging.level);
            Ok(None)
        }
    }
}

/// Run one format action and report the outcome.
async fn handle_format(
    mut config: Config,
    input: &InputArgs,
    options: &OptionArgs,
    backend_url: Option<String>,
) -> anyhow::Result<ExitCode> {
    if let Some(url) = backend_url {
        validate_backend_url(&url)?;
        config.backend.url = url;
    }

    let raw = input.read()?;
    let options = options.resolve(config.defaults);
    let client = FormattingClient::new(&config.backend).context("failed to create client")?;

    let mut session = FormatSession::new(&client);
    let state = session
        .submit(&raw, &options, |state| eprintln!("{}", state.button_label()))
        .await;

    match state {
        ViewState::Success(markdown) => {
            println!("{markdown}");
            Ok(ExitCode::SUCCESS)
        }
        ViewState::Error(message) => {
            eprintln!("{message}");
            Ok(ExitCode::FAILURE)
        }
        ViewState::Idle | ViewState::Loading => Ok(ExitCode::FAILURE),
    }
}
