//! Telegram Bot API client.
//!
//! Thin typed wrapper over the HTTP Bot API: long-poll update stream,
//! message delivery with optional reply keyboards, and document upload.

mod client;
mod error;
mod receiver;
mod types;

pub use client::TelegramClient;
pub use error::TelegramError;
pub use receiver::UpdateReceiver;
pub use types::*;
