use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lunchvote_core::{
    config::Config,
    domain::UserId,
    jwt::JwtManager,
    migration,
    repository::{user::UserRepositoryImpl, UserRepository},
    server, telemetry,
};
use sqlx::mysql::MySqlPoolOptions;
use tracing::info;

#[derive(Parser)]
#[command(name = "lunchvote-core", version, about = "Lunch menu voting service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create the database if needed and apply migrations
    Migrate,
    /// Print an access token for an existing user
    IssueToken {
        #[arg(long)]
        user_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let prometheus_handle = telemetry::init(&config.telemetry)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!(
                service = %config.telemetry.service_name,
                "Starting Lunchvote Core Service"
            );
            info!("HTTP server listening on {}", config.http_addr());
            server::run(config, prometheus_handle).await
        }
        Command::Migrate => migration::run_migrations(&config).await,
        Command::IssueToken { user_id } => issue_token(&config, UserId(user_id)).await,
    }
}

async fn issue_token(config: &Config, user_id: UserId) -> Result<()> {
    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    let user = UserRepositoryImpl::new(pool.clone())
        .find_by_id(user_id)
        .await?
        .with_context(|| format!("User {} not found", user_id))?;
    pool.close().await;

    let token = JwtManager::new(config.jwt.clone()).create_access_token(user.id, &user.username)?;
    println!("{}", token);
    Ok(())
}
