use anyhow::Context;
use clap::{Parser, Subcommand};
use quire_core::QuireConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "quire", version, about = "Quire token CLI")]
struct Cli {
    /// Configuration file (quire.yaml)
    #[arg(long, global = true, env = "QUIRE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Signing secret management
    Keys {
        #[command(subcommand)]
        cmd: KeysCommand,
    },

    /// Issue, verify and inspect tokens
    Token {
        #[command(subcommand)]
        cmd: TokenCommand,
    },
}

#[derive(Subcommand, Debug)]
enum KeysCommand {
    /// Generate a new random signing secret (hex-encoded)
    Generate {
        /// Secret length in bytes
        #[arg(long, default_value_t = quire_jwt::secret::DEFAULT_SECRET_LEN)]
        length: usize,

        /// Write the secret to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum TokenCommand {
    /// Issue a signed token
    Issue {
        /// Secret: path to a hex key file, or the hex key itself
        #[arg(long)]
        key: Option<String>,

        /// Claims as a JSON object, e.g. '{"user":"alice@example.com"}'
        #[arg(long)]
        claims: Option<String>,

        /// Subject (`sub` claim)
        #[arg(long)]
        sub: Option<String>,

        /// Lifetime, e.g. "24h", "7d" (sets the `exp` claim)
        #[arg(long)]
        expires: Option<String>,

        /// Write the token to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Verify a token (exit status 1 when invalid)
    Verify {
        /// Token, or a path to a file containing it
        token: String,

        /// Secret: path to a hex key file, or the hex key itself
        #[arg(long)]
        key: Option<String>,
    },

    /// Issue a login session token for a user
    Session {
        /// User identifier stored in the session's user claim
        user: String,

        /// Secret: path to a hex key file, or the hex key itself
        #[arg(long)]
        key: Option<String>,
    },

    /// Print a token's payload WITHOUT verifying it
    Inspect {
        /// Token, or a path to a file containing it
        token: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli
        .config
        .as_deref()
        .map(|path| {
            QuireConfig::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))
        })
        .transpose()?;

    let default_level = config
        .as_ref()
        .map_or_else(|| "info".to_string(), |c| c.logging.level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Keys { cmd } => match cmd {
            KeysCommand::Generate { length, output } => commands::keys::generate(length, output)?,
        },

        Command::Token { cmd } => match cmd {
            TokenCommand::Issue {
                key,
                claims,
                sub,
                expires,
                output,
            } => commands::token::issue(key, config.as_ref(), claims, sub, expires, output)?,

            TokenCommand::Verify { token, key } => {
                if !commands::token::verify(key, config.as_ref(), token)? {
                    std::process::exit(1);
                }
            }

            TokenCommand::Session { user, key } => {
                commands::token::session(key, config.as_ref(), user)?
            }

            TokenCommand::Inspect { token } => commands::token::inspect(token)?,
        },
    }

    Ok(())
}
