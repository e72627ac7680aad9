//! Telegram Bot API HTTP client.

use crate::error::TelegramError;
use crate::types::*;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Telegram Bot API client.
///
/// The bot token is part of every request URL, so it is held as a
/// `SecretString` and never appears in logs or debug output.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: SecretString,
}

impl TelegramClient {
    /// Create a new client against `base_url` (normally
    /// `https://api.telegram.org`).
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TelegramError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: SecretString::new(token.into()),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url,
            self.token.expose_secret(),
            method
        )
    }

    /// Check that the token is valid and the API reachable.
    pub async fn health_check(&self) -> bool {
        self.get_me().await.is_ok()
    }

    /// Fetch the bot's own account.
    #[instrument(skip(self))]
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        let response = self.client.get(self.method_url("getMe")).send().await?;
        Self::unwrap_response(response).await
    }

    /// Long-poll for updates after `offset`, waiting up to `poll_timeout`.
    #[instrument(skip(self))]
    pub async fn get_updates(
        &self,
        offset: i64,
        poll_timeout: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        let response = self
            .client
            .get(self.method_url("getUpdates"))
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", poll_timeout.as_secs().to_string()),
            ])
            // The request must outlive the server-side long poll.
            .timeout(poll_timeout + Duration::from_secs(10))
            .send()
            .await?;

        let updates: Vec<Update> = Self::unwrap_response(response).await?;
        debug!("Received {} updates", updates.len());
        Ok(updates)
    }

    /// Send a plain text message.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        self.send(SendMessageRequest {
            chat_id,
            text: text.to_string(),
            parse_mode: None,
            disable_web_page_preview: Some(true),
            reply_markup: None,
        })
        .await
    }

    /// Send a text message with keyboard markup.
    pub async fn send_with_markup(
        &self,
        chat_id: i64,
        text: &str,
        markup: ReplyMarkup,
    ) -> Result<(), TelegramError> {
        self.send(SendMessageRequest {
            chat_id,
            text: text.to_string(),
            parse_mode: None,
            disable_web_page_preview: Some(true),
            reply_markup: Some(markup),
        })
        .await
    }

    #[instrument(skip(self, request), fields(chat_id = request.chat_id))]
    async fn send(&self, request: SendMessageRequest) -> Result<(), TelegramError> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&request)
            .send()
            .await?;

        Self::check_delivery(response).await?;
        debug!("Sent message to chat {}", request.chat_id);
        Ok(())
    }

    /// Send a photo by URL with an optional caption.
    #[instrument(skip(self, caption))]
    pub async fn send_photo(
        &self,
        chat_id: i64,
        photo_url: &str,
        caption: Option<&str>,
    ) -> Result<(), TelegramError> {
        let request = SendPhotoRequest {
            chat_id,
            photo: photo_url.to_string(),
            caption: caption.map(String::from),
        };

        let response = self
            .client
            .post(self.method_url("sendPhoto"))
            .json(&request)
            .send()
            .await?;

        Self::check_delivery(response).await?;
        debug!("Sent photo to chat {}", chat_id);
        Ok(())
    }

    async fn check_delivery(response: reqwest::Response) -> Result<(), TelegramError> {
        if response.status() == StatusCode::FORBIDDEN {
            let msg = response.text().await.unwrap_or_default();
            return Err(TelegramError::Forbidden(msg));
        }

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            warn!("Send failed: {}", msg);
            return Err(TelegramError::SendFailed(msg));
        }

        Ok(())
    }

    /// Upload a document to a chat.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn send_document(
        &self,
        chat_id: i64,
        bytes: Vec<u8>,
        filename: &str,
        caption: Option<&str>,
    ) -> Result<(), TelegramError> {
        let mut form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("document", Part::bytes(bytes).file_name(filename.to_string()));

        if let Some(caption) = caption {
            form = form.text("caption", caption.to_string());
        }

        let response = self
            .client
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            warn!("Document upload failed: {}", msg);
            return Err(TelegramError::SendFailed(msg));
        }

        debug!("Sent document {} to chat {}", filename, chat_id);
        Ok(())
    }

    /// Unwrap the Bot API response envelope into its `result`.
    async fn unwrap_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TelegramError> {
        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(TelegramError::Api(msg));
        }

        let envelope: ApiResponse<T> = response.json().await?;
        if !envelope.ok {
            return Err(TelegramError::Api(
                envelope.description.unwrap_or_else(|| "unknown error".into()),
            ));
        }

        envelope
            .result
            .ok_or_else(|| TelegramError::Api("missing result".into()))
    }
}
