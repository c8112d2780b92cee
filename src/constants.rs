use std::time::Duration;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Both limiters share the same 15-minute window.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(15 * 60);
/// Accepted contact submissions per client address per window.
pub const CONTACT_LIMIT: u64 = 5;
/// Requests per client address per window, across all routes.
pub const GLOBAL_LIMIT: u64 = 50;
/// Idle limiter entries older than this are evicted.
pub const LIMITER_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

pub const MSG_SENT: &str = "Message sent successfully.";
pub const MSG_SEND_FAILED: &str = "Failed to send message.";
pub const MSG_CONTACT_RATE_LIMITED: &str =
    "Too many messages from this address. Please try again later.";
pub const MSG_GLOBAL_RATE_LIMITED: &str = "Too many requests. Please try again later.";

/// Rendered in the outbound email when no usable phone number was supplied.
pub const NO_PHONE_PLACEHOLDER: &str = "None Provided";
