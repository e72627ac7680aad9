//! Start command - welcome message with the main keyboard.

use crate::commands::Context;
use crate::error::AppResult;
use crate::render;
use telegram_client::BotMessage;
use tracing::info;

pub async fn execute(ctx: &Context, msg: &BotMessage) -> AppResult<()> {
    info!(
        "Owner {} ({}) started the bot",
        msg.owner_id,
        msg.username.as_deref().unwrap_or("no username")
    );

    ctx.telegram
        .send_with_markup(msg.chat_id, render::welcome_text(), render::main_keyboard())
        .await?;
    Ok(())
}
