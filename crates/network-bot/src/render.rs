//! Outbound message rendering and CSV export formatting.

use crate::intent::buttons;
use profile_store::{FieldCount, RegisteredProfile};
use telegram_client::{ReplyKeyboardMarkup, ReplyMarkup};

/// The main reply keyboard.
pub fn main_keyboard() -> ReplyMarkup {
    ReplyMarkup::Keyboard(ReplyKeyboardMarkup::from_rows(
        vec![
            vec![buttons::ADD_PROFILE],
            vec![buttons::HELP, buttons::STATUS],
            vec![buttons::DELETE_PROFILE, buttons::UPDATE_PROFILE],
            vec![buttons::VIEW_USERS],
        ],
        false,
    ))
}

/// One-time keyboard for the delete confirmation round-trip.
pub fn confirm_delete_keyboard() -> ReplyMarkup {
    ReplyMarkup::Keyboard(ReplyKeyboardMarkup::from_rows(
        vec![vec![buttons::CONFIRM_DELETE], vec![buttons::CANCEL_DELETE]],
        true,
    ))
}

/// A profile card shown in lists and search results.
pub fn profile_card(profile: &RegisteredProfile) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "\u{1F464} {}",
        profile.full_name.as_deref().unwrap_or("Name not available")
    ));
    if let Some(headline) = &profile.headline {
        lines.push(format!("\u{2728} {}", headline));
    }
    if let Some(company) = &profile.current_company {
        lines.push(format!("\u{1F3E2} {}", company));
    }
    if let Some(location) = &profile.location {
        lines.push(format!("\u{1F4CD} {}", location));
    }
    lines.push(format!("\u{1F517} {}", profile.profile_url));

    lines.join("\n")
}

/// The notification broadcast to existing owners on a new registration.
pub fn new_profile_notice(profile: &RegisteredProfile) -> String {
    format!(
        "\u{1F389} New connection alert!\n\n{}\n\nConnect and expand your professional network.",
        profile_card(profile)
    )
}

pub fn welcome_text() -> &'static str {
    "Welcome to the LinkedIn Profile Sharing Bot!\n\n\
     Share your LinkedIn profile URL to join the network, browse other \
     professionals, and get notified about new connections.\n\n\
     Send a URL like:\nhttps://www.linkedin.com/in/username\n\n\
     Or use the buttons below."
}

pub fn help_text() -> &'static str {
    "LinkedIn Profile Sharing Bot\n\n\
     Send your profile URL to register, or use:\n\
     /users [page] - browse registered profiles\n\
     /search <terms> - search by name, headline, company or location\n\
     /stats - network statistics\n\
     /status - bot status\n\
     /update - replace your registered profile\n\
     /delete - remove your profile\n\
     /export - CSV export (admins)\n\
     /testlinkedin - test the LinkedIn connection (admins)\n\
     /help - this message"
}

/// The owner's current profile, shown before an update.
pub fn current_profile(profile: &RegisteredProfile) -> String {
    format!(
        "Your current profile:\n\n\
         Name: {}\n\
         Headline: {}\n\
         Company: {}\n\
         Location: {}\n\n\
         Send your LinkedIn URL to replace it.",
        profile.full_name.as_deref().unwrap_or("Not available"),
        profile.headline.as_deref().unwrap_or("Not available"),
        profile.current_company.as_deref().unwrap_or("Not available"),
        profile.location.as_deref().unwrap_or("Not available"),
    )
}

/// Network statistics summary.
pub fn stats_text(total: i64, companies: &[FieldCount], locations: &[FieldCount]) -> String {
    let mut text = format!("\u{1F4CA} Network statistics\n\nTotal profiles: {}\n", total);

    if !companies.is_empty() {
        text.push_str("\nTop companies:\n");
        for company in companies {
            text.push_str(&format!("\u{2022} {}: {}\n", company.value, company.count));
        }
    }

    if !locations.is_empty() {
        text.push_str("\nTop locations:\n");
        for location in locations {
            text.push_str(&format!("\u{2022} {}: {}\n", location.value, location.count));
        }
    }

    text
}

/// Render all profiles as CSV for the admin export.
pub fn export_csv(profiles: &[RegisteredProfile]) -> String {
    let mut csv = String::from("Full Name,LinkedIn URL,Headline,Company,Location\n");

    for profile in profiles {
        let row = [
            profile.full_name.as_deref().unwrap_or(""),
            &profile.profile_url,
            profile.headline.as_deref().unwrap_or(""),
            profile.current_company.as_deref().unwrap_or(""),
            profile.location.as_deref().unwrap_or(""),
        ];
        let escaped: Vec<String> = row.iter().map(|field| csv_field(field)).collect();
        csv.push_str(&escaped.join(","));
        csv.push('\n');
    }

    csv
}

fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(name: Option<&str>, company: Option<&str>) -> RegisteredProfile {
        RegisteredProfile {
            id: 1,
            owner_id: 10,
            profile_url: "https://www.linkedin.com/in/jdoe".into(),
            full_name: name.map(String::from),
            headline: None,
            location: None,
            current_company: company.map(String::from),
            summary: None,
            picture_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_card_skips_absent_fields() {
        let card = profile_card(&profile(Some("Jane Doe"), None));
        assert!(card.contains("Jane Doe"));
        assert!(card.contains("linkedin.com/in/jdoe"));
        assert!(!card.contains("\u{1F3E2}"));
    }

    #[test]
    fn test_profile_card_placeholder_name() {
        let card = profile_card(&profile(None, None));
        assert!(card.contains("Name not available"));
    }

    #[test]
    fn test_csv_escaping() {
        let csv = export_csv(&[profile(Some("Doe, Jane \"JD\""), Some("Acme"))]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Full Name,LinkedIn URL,Headline,Company,Location"
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"Doe, Jane \"\"JD\"\"\",https://www.linkedin.com/in/jdoe,,Acme,"
        );
    }

    #[test]
    fn test_stats_text() {
        let companies = vec![FieldCount {
            value: "Acme".into(),
            count: 2,
        }];
        let text = stats_text(3, &companies, &[]);
        assert!(text.contains("Total profiles: 3"));
        assert!(text.contains("Acme: 2"));
        assert!(!text.contains("Top locations"));
    }
}
