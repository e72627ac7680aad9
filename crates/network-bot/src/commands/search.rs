//! Profile search command.

use crate::commands::Context;
use crate::error::AppResult;
use crate::render;
use telegram_client::BotMessage;

pub async fn execute(ctx: &Context, msg: &BotMessage, query: &str) -> AppResult<()> {
    let query = query.trim();
    if query.is_empty() {
        ctx.telegram
            .send_message(
                msg.chat_id,
                "Please provide search terms.\nExample: /search software engineer",
            )
            .await?;
        return Ok(());
    }

    let results = ctx.store.search(query).await?;

    if results.is_empty() {
        ctx.telegram
            .send_message(msg.chat_id, "No profiles found matching your search.")
            .await?;
        return Ok(());
    }

    let cards: Vec<String> = results.iter().map(render::profile_card).collect();
    let text = format!(
        "\u{1F50D} Search results ({}):\n\n{}",
        results.len(),
        cards.join("\n\n")
    );

    ctx.telegram.send_message(msg.chat_id, &text).await?;
    Ok(())
}
