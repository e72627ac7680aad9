//! Help command.

use crate::commands::Context;
use crate::error::AppResult;
use crate::render;
use telegram_client::BotMessage;

pub async fn execute(ctx: &Context, msg: &BotMessage) -> AppResult<()> {
    ctx.telegram
        .send_with_markup(msg.chat_id, render::help_text(), render::main_keyboard())
        .await?;
    Ok(())
}
