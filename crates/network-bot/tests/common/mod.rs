//! Shared test fixtures.

use network_bot::commands::Context;
use network_bot::rate_limit::RateLimiter;
use network_bot::sessions::Sessions;
use profile_store::{ProfileAttributes, ProfileStore};
use std::time::Duration;
use telegram_client::{BotMessage, TelegramClient};
use wiremock::MockServer;

pub const SEND_PATH: &str = "/bottest-token/sendMessage";
pub const PHOTO_PATH: &str = "/bottest-token/sendPhoto";

/// A handler context wired to a mock Telegram server and an in-memory
/// store, with enrichment disabled.
pub async fn test_context(telegram_server: &MockServer) -> Context {
    Context {
        telegram: TelegramClient::new(
            telegram_server.uri(),
            "test-token",
            Duration::from_secs(5),
        )
        .unwrap(),
        store: ProfileStore::in_memory().await.unwrap(),
        enrichment: None,
        limiter: RateLimiter::new(100, Duration::from_secs(60)),
        sessions: Sessions::new(),
        admin_ids: vec![99],
        page_size: 4,
        enrichment_retries: 0,
    }
}

pub fn message(owner_id: i64, text: &str) -> BotMessage {
    BotMessage {
        owner_id,
        chat_id: owner_id,
        text: text.to_string(),
        username: Some(format!("user{owner_id}")),
    }
}

pub fn attrs(name: &str, company: &str) -> ProfileAttributes {
    ProfileAttributes {
        full_name: Some(name.to_string()),
        current_company: Some(company.to_string()),
        ..Default::default()
    }
}
