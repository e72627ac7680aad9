//! The registration workflow.
//!
//! One run per candidate-URL message: admission, shape validation, duplicate
//! checks, best-effort enrichment, the uniqueness-checked insert, and the
//! post-commit fan-out. The insert commits (or definitively conflicts)
//! before any notification leaves the process, and no failure after the
//! commit can roll it back.

use crate::commands::Context;
use crate::error::AppResult;
use crate::render;
use crate::sessions::Pending;
use crate::validate;
use profile_store::{ProfileAttributes, RegisteredProfile, StoreError};
use telegram_client::BotMessage;
use tracing::{debug, error, info, warn};

/// Which row to leave out of a "show me others" listing.
pub enum Exclusion<'a> {
    Owner(i64),
    Url(&'a str),
}

/// Handle a candidate profile URL from `msg.owner_id`.
pub async fn register(ctx: &Context, msg: &BotMessage, candidate: &str) -> AppResult<()> {
    let owner_id = msg.owner_id;

    // Admission. Rejections are user-facing, not errors.
    if !ctx.limiter.admit(owner_id) {
        debug!("Rate limit exceeded for owner {}", owner_id);
        ctx.telegram
            .send_message(
                msg.chat_id,
                "You're sending too many messages. Please wait a moment.",
            )
            .await?;
        return Ok(());
    }

    // Shape validation.
    let Some(handle) = validate::parse_profile_url(candidate) else {
        ctx.telegram
            .send_message(
                msg.chat_id,
                "Please send a valid LinkedIn profile URL.\n\
                 Example: https://www.linkedin.com/in/username",
            )
            .await?;
        return Ok(());
    };

    // A pending update routes the URL to the in-place update path.
    if ctx.sessions.peek(owner_id) == Some(Pending::AwaitUpdateUrl) {
        ctx.sessions.clear(owner_id);
        return update_in_place(ctx, msg, candidate, handle).await;
    }

    // At most one active profile per owner.
    if ctx.store.get(owner_id).await?.is_some() {
        ctx.telegram
            .send_with_markup(
                msg.chat_id,
                "You have already registered a LinkedIn profile.\n\
                 Use /delete to remove it first, or /update to replace it.",
                render::main_keyboard(),
            )
            .await?;
        return Ok(());
    }

    let attrs = enrich(ctx, handle).await;

    match ctx.store.insert(owner_id, candidate, &attrs).await {
        Ok(profile) => {
            info!("Registered profile {} for owner {}", profile.id, owner_id);
            ctx.telegram
                .send_with_markup(
                    msg.chat_id,
                    "Your LinkedIn profile URL has been saved!",
                    render::main_keyboard(),
                )
                .await?;

            show_others(ctx, msg.chat_id, Exclusion::Owner(owner_id)).await?;
            broadcast(ctx, &profile).await;
            Ok(())
        }
        Err(StoreError::DuplicateUrl) => {
            warn!("Owner {} submitted an already-registered URL", owner_id);
            ctx.telegram
                .send_message(
                    msg.chat_id,
                    "This LinkedIn profile has already been registered.",
                )
                .await?;

            // No row was created, so there is no broadcast; the listing is
            // re-derived from the store keyed on the submitted URL.
            show_others(ctx, msg.chat_id, Exclusion::Url(candidate)).await?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Replace the owner's registered profile in place.
async fn update_in_place(
    ctx: &Context,
    msg: &BotMessage,
    candidate: &str,
    handle: &str,
) -> AppResult<()> {
    let attrs = enrich(ctx, handle).await;

    match ctx.store.update(msg.owner_id, candidate, &attrs).await {
        Ok(Some(profile)) => {
            info!("Updated profile {} for owner {}", profile.id, msg.owner_id);
            ctx.telegram
                .send_with_markup(
                    msg.chat_id,
                    "Your profile has been updated.",
                    render::main_keyboard(),
                )
                .await?;
            Ok(())
        }
        Ok(None) => {
            ctx.telegram
                .send_message(
                    msg.chat_id,
                    "You don't have a registered profile yet.\n\
                     Send your LinkedIn profile URL to register.",
                )
                .await?;
            Ok(())
        }
        Err(StoreError::DuplicateUrl) => {
            warn!(
                "Owner {} tried to update to an already-registered URL",
                msg.owner_id
            );
            ctx.telegram
                .send_message(
                    msg.chat_id,
                    "This LinkedIn profile has already been registered.",
                )
                .await?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Best-effort enrichment. Never fails the registration: any error is
/// logged and yields empty attributes.
async fn enrich(ctx: &Context, handle: &str) -> ProfileAttributes {
    let Some(client) = &ctx.enrichment else {
        debug!("Enrichment not configured, skipping");
        return ProfileAttributes::default();
    };

    match client
        .fetch_with_retry(handle, Some(ctx.enrichment_retries))
        .await
    {
        Ok(data) => ProfileAttributes {
            full_name: data.full_name,
            headline: data.headline,
            location: data.location,
            current_company: data.current_company,
            summary: data.summary,
            picture_url: data.picture_url,
        },
        Err(e) => {
            warn!("Enrichment failed for {}: {}", handle, e);
            ProfileAttributes::default()
        }
    }
}

/// Deliver every other registered profile to the requester, one card per
/// message. Individual delivery failures are logged and skipped.
pub async fn show_others(
    ctx: &Context,
    chat_id: i64,
    exclusion: Exclusion<'_>,
) -> AppResult<()> {
    let others = match exclusion {
        Exclusion::Owner(owner_id) => ctx.store.list_others(owner_id).await?,
        Exclusion::Url(url) => ctx.store.list_others_by_url(url).await?,
    };

    if others.is_empty() {
        ctx.telegram
            .send_message(
                chat_id,
                "You're the first one here! \u{1F389}\n\
                 Share your profile with others to grow the network.",
            )
            .await?;
        return Ok(());
    }

    for profile in &others {
        if let Err(e) = ctx
            .telegram
            .send_message(chat_id, &render::profile_card(profile))
            .await
        {
            error!("Failed to deliver profile card {}: {}", profile.id, e);
        }
    }

    if let Err(e) = ctx
        .telegram
        .send_message(
            chat_id,
            &format!(
                "Showing {} professional{} in your network.",
                others.len(),
                if others.len() == 1 { "" } else { "s" }
            ),
        )
        .await
    {
        error!("Failed to deliver listing summary: {}", e);
    }

    Ok(())
}

/// Notify every other owner about a freshly inserted profile.
///
/// Runs strictly after the insert committed. Each delivery is independent;
/// a blocked bot or deactivated chat is logged with the recipient id and
/// skipped, and nothing here can undo the registration.
async fn broadcast(ctx: &Context, new_profile: &RegisteredProfile) {
    let targets = match ctx.store.list_others(new_profile.owner_id).await {
        Ok(targets) => targets,
        Err(e) => {
            error!("Failed to load broadcast targets: {}", e);
            return;
        }
    };

    let notice = render::new_profile_notice(new_profile);
    let mut delivered = 0usize;

    for target in &targets {
        match deliver_notice(ctx, target.owner_id, new_profile, &notice).await {
            Ok(()) => delivered += 1,
            Err(e) => error!("Failed to notify owner {}: {}", target.owner_id, e),
        }
    }

    if !targets.is_empty() {
        info!(
            "Broadcast profile {} to {}/{} owners",
            new_profile.id,
            delivered,
            targets.len()
        );
    }
}

/// Deliver one broadcast notice. With a picture on the profile the notice
/// goes out as a captioned photo; if that send fails it degrades to plain
/// text rather than dropping the recipient.
async fn deliver_notice(
    ctx: &Context,
    chat_id: i64,
    new_profile: &RegisteredProfile,
    notice: &str,
) -> Result<(), telegram_client::TelegramError> {
    if let Some(picture_url) = &new_profile.picture_url {
        match ctx
            .telegram
            .send_photo(chat_id, picture_url, Some(notice))
            .await
        {
            Ok(()) => return Ok(()),
            Err(e) => {
                warn!(
                    "Photo notice to owner {} failed ({}), falling back to text",
                    chat_id, e
                );
            }
        }
    }

    ctx.telegram.send_message(chat_id, notice).await
}
