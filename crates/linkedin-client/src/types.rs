//! Profile lookup response types.

use serde::Deserialize;

/// Raw profile view as returned by the unofficial endpoint. Every field is
/// optional; the response shape is not a contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub headline: Option<String>,
    pub location_name: Option<String>,
    pub company_name: Option<String>,
    pub summary: Option<String>,
    pub display_picture_url: Option<String>,
}

/// Normalized profile data handed to callers.
#[derive(Debug, Clone, Default)]
pub struct ProfileData {
    pub full_name: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub current_company: Option<String>,
    pub summary: Option<String>,
    pub picture_url: Option<String>,
}

impl From<ProfileView> for ProfileData {
    fn from(view: ProfileView) -> Self {
        let full_name = match (view.first_name, view.last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first),
            (None, Some(last)) => Some(last),
            (None, None) => None,
        };

        Self {
            full_name,
            headline: none_if_empty(view.headline),
            location: none_if_empty(view.location_name),
            current_company: none_if_empty(view.company_name),
            summary: none_if_empty(view.summary),
            picture_url: none_if_empty(view.display_picture_url),
        }
    }
}

fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
