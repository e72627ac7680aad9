//! Telegram client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),

    /// The recipient blocked the bot or deactivated their account.
    #[error("delivery forbidden: {0}")]
    Forbidden(String),

    #[error("send failed: {0}")]
    SendFailed(String),
}
