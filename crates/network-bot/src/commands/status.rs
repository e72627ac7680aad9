//! Status command - reports collaborator health.

use crate::commands::Context;
use crate::error::AppResult;
use telegram_client::BotMessage;

pub async fn execute(ctx: &Context, msg: &BotMessage) -> AppResult<()> {
    let database = if ctx.store.health_check().await {
        "connected"
    } else {
        "unavailable"
    };
    let enrichment = if ctx.enrichment.is_some() {
        "enabled"
    } else {
        "disabled"
    };

    let text = format!(
        "\u{1F916} Bot status\n\n\
         Service: active\n\
         Database: {}\n\
         LinkedIn enrichment: {}",
        database, enrichment
    );

    ctx.telegram.send_message(msg.chat_id, &text).await?;
    Ok(())
}
