//! Long-poll update receiver.

use crate::client::TelegramClient;
use crate::types::*;
use std::time::Duration;
use tokio::time::sleep;
use tokio_stream::Stream;
use tracing::{debug, error};

/// Fixed delay before retrying the transport after a network error.
const RETRY_BACKOFF: Duration = Duration::from_secs(5);

/// Receiver that long-polls `getUpdates` and yields parsed messages.
pub struct UpdateReceiver {
    client: TelegramClient,
    poll_timeout: Duration,
}

impl UpdateReceiver {
    pub fn new(client: TelegramClient, poll_timeout: Duration) -> Self {
        Self {
            client,
            poll_timeout,
        }
    }

    /// Receive messages as an async stream.
    ///
    /// Transport errors never end the stream; polling resumes after a fixed
    /// backoff. The update offset is confirmed before a message is yielded,
    /// so a crashed handler does not replay its update.
    pub fn stream(self) -> impl Stream<Item = BotMessage> {
        async_stream::stream! {
            let mut offset: i64 = 0;

            loop {
                match self.client.get_updates(offset, self.poll_timeout).await {
                    Ok(updates) => {
                        for update in updates {
                            offset = offset.max(update.update_id + 1);

                            if let Some(msg) = BotMessage::from_update(&update) {
                                let preview: String = msg.text.chars().take(50).collect();
                                debug!("Received: {} from {}", preview, msg.owner_id);
                                yield msg;
                            }
                        }
                    }
                    Err(e) => {
                        error!("Transport error while polling: {}", e);
                        sleep(RETRY_BACKOFF).await;
                    }
                }
            }
        }
    }
}
