//! Admin diagnostics.

use crate::commands::Context;
use crate::error::AppResult;
use telegram_client::BotMessage;
use tracing::{info, warn};

/// Well-known public profile used to probe the enrichment endpoint.
const TEST_HANDLE: &str = "williamhgates";

/// Run one live enrichment lookup and report the outcome.
pub async fn enrichment(ctx: &Context, msg: &BotMessage) -> AppResult<()> {
    if !ctx.admin_ids.contains(&msg.owner_id) {
        ctx.telegram
            .send_message(
                msg.chat_id,
                "This command is only available to administrators.",
            )
            .await?;
        return Ok(());
    }

    let Some(client) = &ctx.enrichment else {
        ctx.telegram
            .send_message(msg.chat_id, "LinkedIn enrichment is not configured.")
            .await?;
        return Ok(());
    };

    info!("Admin {} testing the LinkedIn connection", msg.owner_id);

    // Single attempt on purpose; a diagnostic should report the first
    // failure, not mask it behind retries.
    let text = match client.fetch_profile(TEST_HANDLE).await {
        Ok(data) => {
            info!("LinkedIn connection test succeeded");
            format!(
                "LinkedIn lookup successful!\nFetched: {}",
                data.full_name.as_deref().unwrap_or("(no name returned)")
            )
        }
        Err(e) => {
            warn!("LinkedIn connection test failed: {}", e);
            format!("LinkedIn lookup failed: {}", e)
        }
    };

    ctx.telegram.send_message(msg.chat_id, &text).await?;
    Ok(())
}
