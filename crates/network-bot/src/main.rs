//! LinkedIn Networking Bot - Main entry point.

use anyhow::Context as _;
use linkedin_client::LinkedInClient;
use network_bot::commands::{self, Context};
use network_bot::config::Config;
use network_bot::error::AppResult;
use network_bot::rate_limit::RateLimiter;
use network_bot::sessions::Sessions;
use profile_store::ProfileStore;
use telegram_client::{TelegramClient, UpdateReceiver};
use tokio::signal;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot.log_level);

    info!("Starting LinkedIn Networking Bot...");

    // Initialize the store
    let store = ProfileStore::connect(&config.database.url)
        .await
        .context("Failed to open profile database")?;

    // Initialize clients
    let telegram = TelegramClient::new(
        &config.telegram.api_url,
        &config.telegram.bot_token,
        config.telegram.request_timeout,
    )
    .context("Failed to create Telegram client")?;

    let enrichment = match (&config.linkedin.session_cookie, &config.linkedin.csrf_token) {
        (Some(cookie), Some(csrf)) => {
            let client = LinkedInClient::new(
                cookie,
                csrf,
                &config.linkedin.base_url,
                config.linkedin.timeout,
            )
            .context("Failed to create LinkedIn client")?;
            info!("Profile enrichment enabled");
            Some(client)
        }
        _ => {
            warn!("No LinkedIn session configured - profiles will be stored without enrichment");
            None
        }
    };

    // Health checks
    let me = match telegram.get_me().await {
        Ok(me) => me,
        Err(e) => {
            error!("Telegram API not reachable at {}: {}", config.telegram.api_url, e);
            return Err(e.into());
        }
    };
    info!(
        "Telegram API healthy - bot @{}",
        me.username.as_deref().unwrap_or("unknown")
    );

    if !store.health_check().await {
        return Err(anyhow::anyhow!("Profile database not responding").into());
    }

    let ctx = Context {
        telegram: telegram.clone(),
        store,
        enrichment,
        limiter: RateLimiter::new(config.bot.rate_limit, config.bot.rate_window),
        sessions: Sessions::new(),
        admin_ids: config.bot.admin_ids(),
        page_size: config.bot.page_size,
        enrichment_retries: config.linkedin.max_retries,
    };

    info!("Listening for messages...");

    // Start update receiver
    let receiver = UpdateReceiver::new(telegram.clone(), config.telegram.poll_timeout);
    let mut stream = Box::pin(receiver.stream());

    // Main message loop
    loop {
        tokio::select! {
            Some(message) = stream.next() => {
                if let Err(e) = commands::dispatch(&ctx, &message).await {
                    error!("Handler error for owner {}: {}", message.owner_id, e);
                    let _ = ctx
                        .telegram
                        .send_message(message.chat_id, "Sorry, something went wrong.")
                        .await;
                }
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
