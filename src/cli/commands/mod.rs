//! CLI parser and dispatch.

mod config_cmd;
mod digest;
mod inspect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Config, LoadOptions, RelevanceMode, CONFIG_FILENAME};

use super::helpers::absolute_from_cwd;

#[derive(Parser)]
#[command(name = "refugee-digest")]
#[command(about = "Find refugee opportunities and send personalized digests")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Relevance strategy (overrides config)
    #[arg(long, value_enum, global = true)]
    mode: Option<RelevanceMode>,

    /// Relevance model bundle (overrides config)
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Use keyword matching when the relevance model cannot be loaded
    #[arg(long, global = true)]
    keyword_fallback_on_missing_model: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Build and send one digest
    Digest {
        /// Name used in the greeting
        #[arg(long)]
        name: String,
        /// Recipient address
        #[arg(long)]
        email: String,
        /// Comma separated preference terms, e.g. "jobs, scholarships"
        #[arg(long, default_value = "")]
        preferences: String,
        /// Pin the year used for queries and staleness checks
        #[arg(long)]
        year: Option<i32>,
        /// Print the message instead of handing it to the mailer
        #[arg(long)]
        no_send: bool,
        /// Output digest and counters as JSON (implies --no-send)
        #[arg(long)]
        json: bool,
    },

    /// Send a digest to every registered user
    Run {
        /// JSON-lines file written by the registration form
        #[arg(long, default_value = "users.json")]
        users: PathBuf,
        /// Pin the year used for queries and staleness checks
        #[arg(long)]
        year: Option<i32>,
    },

    /// Classify and categorize text with the configured strategy
    Classify {
        /// Texts to classify
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Fetch a page and list the links extracted from it
    Links {
        /// Page URL
        url: String,
        /// Keep textless anchors even when their href has no keyword
        #[arg(long)]
        all: bool,
        /// Only show links the relevance classifier accepts
        #[arg(long)]
        relevant: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Write the default configuration to a file
    Init {
        /// Destination path
        #[arg(default_value = CONFIG_FILENAME)]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `config init` must work even when the discovered file is broken.
    if let Commands::Config {
        command: ConfigCommands::Init { path, force },
    } = &cli.command
    {
        return config_cmd::cmd_config_init(path, *force).await;
    }

    let options = LoadOptions {
        config_path: cli.config.clone(),
    };
    let mut config = Config::load(&options)?;
    if let Some(mode) = cli.mode {
        config.relevance.mode = mode;
    }
    if let Some(model) = &cli.model {
        config.relevance.model_path = absolute_from_cwd(model)?;
    }
    let degrade = cli.keyword_fallback_on_missing_model;

    match cli.command {
        Commands::Digest {
            name,
            email,
            preferences,
            year,
            no_send,
            json,
        } => {
            let request = digest::DigestRequest {
                name,
                email,
                preferences,
                year,
                no_send: no_send || json,
                json,
            };
            digest::cmd_digest(config, degrade, request).await
        }
        Commands::Run { users, year } => digest::cmd_run(config, degrade, &users, year).await,
        Commands::Classify { texts } => inspect::cmd_classify(&config, degrade, &texts),
        Commands::Links { url, all, relevant } => {
            inspect::cmd_links(&config, degrade, &url, all, relevant).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_cmd::cmd_config_show(&config),
            ConfigCommands::Init { path, force } => config_cmd::cmd_config_init(&path, force).await,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_digest_with_global_flags() {
        let cli = Cli::try_parse_from([
            "refugee-digest",
            "--mode",
            "model",
            "--keyword-fallback-on-missing-model",
            "digest",
            "--name",
            "Amina",
            "--email",
            "amina@example.org",
            "--preferences",
            "jobs, scholarships",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.mode, Some(RelevanceMode::Model));
        assert!(cli.keyword_fallback_on_missing_model);
        match cli.command {
            Commands::Digest {
                name, json, year, ..
            } => {
                assert_eq!(name, "Amina");
                assert!(json);
                assert_eq!(year, None);
            }
            _ => panic!("expected digest command"),
        }
    }

    #[test]
    fn classify_requires_text() {
        assert!(Cli::try_parse_from(["refugee-digest", "classify"]).is_err());
    }
}
