//! Command handlers and intent dispatch.

mod delete;
mod diag;
mod export;
mod help;
mod search;
mod start;
mod stats;
mod status;
mod update;
mod users;

use crate::error::AppResult;
use crate::intent::{classify, Intent};
use crate::rate_limit::RateLimiter;
use crate::sessions::{Pending, Sessions};
use crate::workflow;
use linkedin_client::LinkedInClient;
use profile_store::ProfileStore;
use telegram_client::{BotMessage, TelegramClient};
use tracing::debug;

/// Shared handler state, constructor-injected rather than ambient.
pub struct Context {
    pub telegram: TelegramClient,
    pub store: ProfileStore,
    /// Absent when no session cookie is configured; enrichment is skipped.
    pub enrichment: Option<LinkedInClient>,
    pub limiter: RateLimiter,
    pub sessions: Sessions,
    pub admin_ids: Vec<i64>,
    pub page_size: i64,
    pub enrichment_retries: u32,
}

/// Route one inbound message to its handler.
pub async fn dispatch(ctx: &Context, msg: &BotMessage) -> AppResult<()> {
    let intent = classify(&msg.text);
    debug!("Dispatching {:?} from owner {}", intent, msg.owner_id);

    // A pending delete confirmation consumes the next reply. Anything but
    // an affirmative clears the flag without deleting; the message is then
    // handled normally.
    if ctx.sessions.peek(msg.owner_id) == Some(Pending::ConfirmDelete) {
        ctx.sessions.clear(msg.owner_id);
        match intent {
            Intent::ConfirmDelete => return delete::confirm(ctx, msg).await,
            Intent::CancelDelete => return delete::cancel(ctx, msg).await,
            _ => {}
        }
    }

    match intent {
        Intent::Start => start::execute(ctx, msg).await,
        Intent::Help => help::execute(ctx, msg).await,
        Intent::Status => status::execute(ctx, msg).await,
        Intent::AddProfile => {
            ctx.telegram
                .send_with_markup(
                    msg.chat_id,
                    "Please send your LinkedIn profile URL.\n\
                     Example: https://www.linkedin.com/in/username",
                    crate::render::main_keyboard(),
                )
                .await?;
            Ok(())
        }
        Intent::DeleteRequest => delete::request(ctx, msg).await,
        Intent::ConfirmDelete | Intent::CancelDelete => {
            // No confirmation is pending.
            ctx.telegram
                .send_message(msg.chat_id, "Nothing to confirm right now.")
                .await?;
            Ok(())
        }
        Intent::UpdateRequest => update::request(ctx, msg).await,
        Intent::ListUsers { page } => users::execute(ctx, msg, page).await,
        Intent::Search { query } => search::execute(ctx, msg, &query).await,
        Intent::Stats => stats::execute(ctx, msg).await,
        Intent::ExportCsv => export::execute(ctx, msg).await,
        Intent::TestEnrichment => diag::enrichment(ctx, msg).await,
        Intent::CandidateUrl(candidate) => workflow::register(ctx, msg, &candidate).await,
        Intent::UnknownCommand => {
            ctx.telegram
                .send_message(msg.chat_id, "Unknown command. Send /help for usage.")
                .await?;
            Ok(())
        }
    }
}
