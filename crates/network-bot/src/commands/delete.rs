//! Two-phase profile deletion.

use crate::commands::Context;
use crate::error::AppResult;
use crate::render;
use crate::sessions::Pending;
use telegram_client::BotMessage;
use tracing::info;

/// First phase: ask for confirmation and flag the session.
pub async fn request(ctx: &Context, msg: &BotMessage) -> AppResult<()> {
    if ctx.store.get(msg.owner_id).await?.is_none() {
        ctx.telegram
            .send_message(msg.chat_id, "You don't have a registered profile.")
            .await?;
        return Ok(());
    }

    ctx.telegram
        .send_with_markup(
            msg.chat_id,
            "\u{26A0}\u{FE0F} Are you sure you want to delete your LinkedIn profile?\n\
             This action cannot be undone.",
            render::confirm_delete_keyboard(),
        )
        .await?;

    ctx.sessions.set(msg.owner_id, Pending::ConfirmDelete);
    Ok(())
}

/// Second phase: the owner confirmed within the same session.
pub async fn confirm(ctx: &Context, msg: &BotMessage) -> AppResult<()> {
    let removed = ctx.store.delete(msg.owner_id).await?;

    if removed > 0 {
        info!("Owner {} deleted their profile", msg.owner_id);
        ctx.telegram
            .send_with_markup(
                msg.chat_id,
                "Your profile has been deleted.",
                render::main_keyboard(),
            )
            .await?;
    } else {
        ctx.telegram
            .send_with_markup(
                msg.chat_id,
                "No profile found to delete.",
                render::main_keyboard(),
            )
            .await?;
    }
    Ok(())
}

/// The owner declined; the pending flag is already cleared.
pub async fn cancel(ctx: &Context, msg: &BotMessage) -> AppResult<()> {
    ctx.telegram
        .send_with_markup(
            msg.chat_id,
            "Profile deletion cancelled.",
            render::main_keyboard(),
        )
        .await?;
    Ok(())
}
