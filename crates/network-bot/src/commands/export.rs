//! Admin-only CSV export.

use crate::commands::Context;
use crate::error::AppResult;
use crate::render;
use telegram_client::BotMessage;
use tracing::info;

pub async fn execute(ctx: &Context, msg: &BotMessage) -> AppResult<()> {
    if !ctx.admin_ids.contains(&msg.owner_id) {
        ctx.telegram
            .send_message(
                msg.chat_id,
                "This command is only available to administrators.",
            )
            .await?;
        return Ok(());
    }

    let profiles = ctx.store.all_profiles().await?;
    if profiles.is_empty() {
        ctx.telegram
            .send_message(msg.chat_id, "No profiles to export.")
            .await?;
        return Ok(());
    }

    let csv = render::export_csv(&profiles);
    info!(
        "Exporting {} profiles for admin {}",
        profiles.len(),
        msg.owner_id
    );

    ctx.telegram
        .send_document(
            msg.chat_id,
            csv.into_bytes(),
            "linkedin_profiles.csv",
            Some("All registered LinkedIn profiles."),
        )
        .await?;
    Ok(())
}
