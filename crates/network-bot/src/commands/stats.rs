//! Network statistics command.

use crate::commands::Context;
use crate::error::AppResult;
use crate::render;
use telegram_client::BotMessage;

const TOP_N: i64 = 3;

pub async fn execute(ctx: &Context, msg: &BotMessage) -> AppResult<()> {
    let total = ctx.store.count_all().await?;
    let companies = ctx.store.top_companies(TOP_N).await?;
    let locations = ctx.store.top_locations(TOP_N).await?;

    ctx.telegram
        .send_message(msg.chat_id, &render::stats_text(total, &companies, &locations))
        .await?;
    Ok(())
}
