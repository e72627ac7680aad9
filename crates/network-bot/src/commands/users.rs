//! Paginated listing of registered profiles.

use crate::commands::Context;
use crate::error::AppResult;
use crate::render;
use telegram_client::BotMessage;
use tracing::error;

pub async fn execute(ctx: &Context, msg: &BotMessage, page: i64) -> AppResult<()> {
    let total = ctx.store.count_all().await?;
    let profiles = ctx.store.list_page(page, ctx.page_size).await?;

    if profiles.is_empty() {
        let text = if page == 0 {
            "No users registered yet!\n\
             Be the first one to share your LinkedIn profile."
        } else {
            "No more users to show."
        };
        ctx.telegram
            .send_with_markup(msg.chat_id, text, render::main_keyboard())
            .await?;
        return Ok(());
    }

    for profile in &profiles {
        if let Err(e) = ctx
            .telegram
            .send_message(msg.chat_id, &render::profile_card(profile))
            .await
        {
            error!("Failed to deliver profile card {}: {}", profile.id, e);
        }
    }

    let total_pages = (total + ctx.page_size - 1) / ctx.page_size;
    if total_pages > 1 {
        ctx.telegram
            .send_message(
                msg.chat_id,
                &format!(
                    "Page {} of {}. Use /users <page> to browse.",
                    page + 1,
                    total_pages
                ),
            )
            .await?;
    }

    Ok(())
}
