//! Update command - show the current profile and await a replacement URL.

use crate::commands::Context;
use crate::error::AppResult;
use crate::render;
use crate::sessions::Pending;
use telegram_client::BotMessage;

pub async fn request(ctx: &Context, msg: &BotMessage) -> AppResult<()> {
    let Some(profile) = ctx.store.get(msg.owner_id).await? else {
        ctx.telegram
            .send_message(
                msg.chat_id,
                "You don't have a registered profile yet.\n\
                 Send your LinkedIn profile URL to register.",
            )
            .await?;
        return Ok(());
    };

    ctx.telegram
        .send_message(msg.chat_id, &render::current_profile(&profile))
        .await?;

    ctx.sessions.set(msg.owner_id, Pending::AwaitUpdateUrl);
    Ok(())
}
