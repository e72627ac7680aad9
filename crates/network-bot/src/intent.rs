//! Inbound message classification.
//!
//! Commands, known button captions and free text are folded into one closed
//! [`Intent`] so dispatch is a plain `match` instead of string comparisons
//! scattered over handlers.

/// Button captions rendered on the main keyboard.
pub mod buttons {
    pub const ADD_PROFILE: &str = "\u{2795} Add Profile";
    pub const HELP: &str = "\u{1F4DA} Help";
    pub const STATUS: &str = "\u{2139}\u{FE0F} Status";
    pub const DELETE_PROFILE: &str = "\u{274C} Delete Profile";
    pub const UPDATE_PROFILE: &str = "\u{1F504} Update Profile";
    pub const VIEW_USERS: &str = "\u{1F465} View Users";
    pub const CONFIRM_DELETE: &str = "\u{2705} Yes, delete my profile";
    pub const CANCEL_DELETE: &str = "\u{274C} No, keep my profile";
}

/// What the sender asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    Help,
    Status,
    /// Prompt for a profile URL.
    AddProfile,
    /// Two-phase delete, first phase.
    DeleteRequest,
    /// Affirmative reply to a pending delete confirmation.
    ConfirmDelete,
    /// Negative reply to a pending delete confirmation.
    CancelDelete,
    UpdateRequest,
    /// Paginated user list; pages are zero-based.
    ListUsers { page: i64 },
    Search { query: String },
    Stats,
    ExportCsv,
    /// Admin diagnostic: run one live enrichment lookup.
    TestEnrichment,
    /// Free text that may be a profile URL; shape validation happens in the
    /// workflow.
    CandidateUrl(String),
    /// A slash command we do not know.
    UnknownCommand,
}

/// Classify one inbound message.
pub fn classify(text: &str) -> Intent {
    let trimmed = text.trim();

    match trimmed {
        buttons::ADD_PROFILE => return Intent::AddProfile,
        buttons::HELP => return Intent::Help,
        buttons::STATUS => return Intent::Status,
        buttons::DELETE_PROFILE => return Intent::DeleteRequest,
        buttons::UPDATE_PROFILE => return Intent::UpdateRequest,
        buttons::VIEW_USERS => return Intent::ListUsers { page: 0 },
        buttons::CONFIRM_DELETE => return Intent::ConfirmDelete,
        buttons::CANCEL_DELETE => return Intent::CancelDelete,
        _ => {}
    }

    // Bare yes/no also answer a pending confirmation.
    match trimmed.to_lowercase().as_str() {
        "yes" => return Intent::ConfirmDelete,
        "no" => return Intent::CancelDelete,
        _ => {}
    }

    if let Some(rest) = trimmed.strip_prefix('/') {
        let mut parts = rest.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or_default();
        let args = parts.next().unwrap_or("").trim();

        return match command {
            "start" => Intent::Start,
            "help" => Intent::Help,
            "status" => Intent::Status,
            "delete" => Intent::DeleteRequest,
            "update" => Intent::UpdateRequest,
            "stats" => Intent::Stats,
            "export" => Intent::ExportCsv,
            "testlinkedin" => Intent::TestEnrichment,
            "search" => Intent::Search {
                query: args.to_string(),
            },
            "users" => Intent::ListUsers {
                // Pages are presented one-based, stored zero-based.
                page: args.parse::<i64>().map(|p| (p - 1).max(0)).unwrap_or(0),
            },
            _ => Intent::UnknownCommand,
        };
    }

    Intent::CandidateUrl(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands() {
        assert_eq!(classify("/start"), Intent::Start);
        assert_eq!(classify("/help"), Intent::Help);
        assert_eq!(classify("/status"), Intent::Status);
        assert_eq!(classify("/delete"), Intent::DeleteRequest);
        assert_eq!(classify("/update"), Intent::UpdateRequest);
        assert_eq!(classify("/stats"), Intent::Stats);
        assert_eq!(classify("/export"), Intent::ExportCsv);
        assert_eq!(classify("/testlinkedin"), Intent::TestEnrichment);
        assert_eq!(classify("/bogus"), Intent::UnknownCommand);
    }

    #[test]
    fn test_search_carries_query() {
        assert_eq!(
            classify("/search software engineer"),
            Intent::Search {
                query: "software engineer".into()
            }
        );
        assert_eq!(classify("/search"), Intent::Search { query: "".into() });
    }

    #[test]
    fn test_users_pagination() {
        assert_eq!(classify("/users"), Intent::ListUsers { page: 0 });
        assert_eq!(classify("/users 3"), Intent::ListUsers { page: 2 });
        assert_eq!(classify("/users 0"), Intent::ListUsers { page: 0 });
        assert_eq!(classify("/users nope"), Intent::ListUsers { page: 0 });
    }

    #[test]
    fn test_buttons() {
        assert_eq!(classify(buttons::ADD_PROFILE), Intent::AddProfile);
        assert_eq!(classify(buttons::VIEW_USERS), Intent::ListUsers { page: 0 });
        assert_eq!(classify(buttons::CONFIRM_DELETE), Intent::ConfirmDelete);
        assert_eq!(classify(buttons::CANCEL_DELETE), Intent::CancelDelete);
    }

    #[test]
    fn test_bare_confirmation_words() {
        assert_eq!(classify("yes"), Intent::ConfirmDelete);
        assert_eq!(classify("YES"), Intent::ConfirmDelete);
        assert_eq!(classify("no"), Intent::CancelDelete);
    }

    #[test]
    fn test_free_text_is_candidate_url() {
        assert_eq!(
            classify("https://www.linkedin.com/in/jdoe"),
            Intent::CandidateUrl("https://www.linkedin.com/in/jdoe".into())
        );
        assert_eq!(
            classify("  hello there  "),
            Intent::CandidateUrl("hello there".into())
        );
    }
}
