//! LinkedIn networking bot for Telegram.
//!
//! Collects LinkedIn profile URLs from group members, enriches them with
//! profile data, persists them, and announces new registrations to everyone
//! already registered.

pub mod commands;
pub mod config;
pub mod error;
pub mod intent;
pub mod rate_limit;
pub mod render;
pub mod sessions;
pub mod validate;
pub mod workflow;
