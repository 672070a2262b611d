use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;

use steemconnect::config::load_config;
use steemconnect::http::{BroadcastResponse, Broadcaster, ResponseBody};
use steemconnect::observability::logging;
use steemconnect::operations::{Follow, Operation, Vote};
use steemconnect::{Client, SdkConfig, Token, Transaction};

#[derive(Parser)]
#[command(name = "sc2-cli")]
#[command(about = "Command line client for the SteemConnect gateway", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file holding a serialized access token
    #[arg(short, long)]
    token: Option<PathBuf>,

    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the URL to send users to for authorization
    AuthorizeUrl {
        #[arg(long)]
        state: Option<String>,
    },
    /// Exchange an authorization code for an access token
    Exchange {
        #[arg(long)]
        code: String,
    },
    /// Vote on a post
    Vote {
        #[arg(long)]
        voter: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        permlink: String,
        /// Fraction in (0, 1] or an integer weight up to 10000; negative values downvote
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        weight: f64,
        /// Print the broadcast payload instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Follow or unfollow an account
    Follow {
        #[arg(long)]
        follower: String,
        #[arg(long)]
        following: String,
        #[arg(long)]
        unfollow: bool,
        /// Print the broadcast payload instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Decode a stored broadcast response and print the re-encoded transaction
    Decode { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SdkConfig::default(),
    };
    let mut client = Client::new(config);
    if let Some(path) = &cli.token {
        client.set_token(read_token(path)?);
    }

    match cli.command {
        Commands::AuthorizeUrl { state } => {
            let options: Vec<(&str, &str)> = state.as_deref().map(|s| ("state", s)).into_iter().collect();
            println!("{}", client.auth()?.authorization_url(&options)?);
        }
        Commands::Exchange { code } => {
            let token = client.auth()?.parse_return(&code).await?;
            print_json(&token.to_value())?;
        }
        Commands::Vote {
            voter,
            author,
            permlink,
            weight,
            dry_run,
        } => {
            let mut vote = Vote::new();
            vote.voter(&voter).on(&author, &permlink).weight(weight);
            send(&client, &vote, dry_run).await?;
        }
        Commands::Follow {
            follower,
            following,
            unfollow,
            dry_run,
        } => {
            let mut follow = Follow::new();
            follow.follower(&follower).following(&following, !unfollow);
            send(&client, &follow, dry_run).await?;
        }
        Commands::Decode { file } => {
            let raw = fs::read_to_string(&file)?;
            let transaction = Transaction::from_value(&serde_json::from_str(&raw)?)?;
            tracing::info!(
                operations = transaction.operations().len(),
                "decoded transaction"
            );
            print_json(&transaction.to_value())?;
        }
    }

    Ok(())
}

fn read_token(path: &Path) -> Result<Token, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    Ok(Token::from_json_str(&raw)?)
}

async fn send(client: &Client, operation: &dyn Operation, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    if dry_run {
        return print_json(&Broadcaster::payload(&[operation]));
    }

    let response = client.broadcast(&[operation]).await?;
    print_response(&response)
}

fn print_response(response: &BroadcastResponse) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(transaction) = response.transaction()? {
        return print_json(&transaction.to_value());
    }

    match response.http().body() {
        ResponseBody::Json(value) => print_json(value),
        ResponseBody::Text(text) => {
            println!("{text}");
            Ok(())
        }
    }
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
