//! Best-effort LinkedIn profile enrichment.
//!
//! Wraps the unofficial, cookie-session profile endpoint. The service is
//! untrusted and unreliable; callers get bounded retry with exponential
//! backoff and a small set of distinguished errors, and are expected to
//! treat any failure as "no enrichment data".

mod client;
mod error;
mod types;

pub use client::LinkedInClient;
pub use error::LinkedInError;
pub use types::{ProfileData, ProfileView};
