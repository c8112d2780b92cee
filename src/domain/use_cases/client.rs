use serde::Deserialize;
use serde_json::json;

use crate::entities::contact::EMAIL_RE;

const MSG_ALREADY_SENT: &str = "Your message was already sent this session.";
const MSG_GENERIC_FAILURE: &str = "Something went wrong. Please try again later.";
const MSG_CONNECTION_FAILURE: &str =
    "Could not reach the server. Please check your connection and try again.";

/// Browser-session state, owned by the embedding application and passed in
/// explicitly. Set once on a confirmed success, cleared only when the
/// session ends.
#[derive(Debug, Default)]
pub struct Session {
    contact_sent: bool,
}

impl Session {
    pub fn contact_sent(&self) -> bool {
        self.contact_sent
    }

    /// Restore a session whose submission already happened, e.g. from
    /// session storage.
    pub fn mark_sent(&mut self) {
        self.contact_sent = true;
    }
}

#[derive(Debug, Clone)]
pub struct FormInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// This session already submitted once; no request was made.
    AlreadySent,
    Success,
    /// Local validation failed, or the server reported a failure.
    ValidationFailure(String),
    /// The request never completed; a connectivity problem, not a content one.
    NetworkFailure(String),
}

#[derive(Debug, Default, Deserialize)]
struct ServerReply {
    #[serde(default)]
    success: bool,
    message: Option<String>,
}

/// Client side of the contact flow: local validation, a single POST, and a
/// one-submission-per-session guard. No retries.
pub struct ContactFormClient {
    endpoint: String,
    http: reqwest::Client,
}

impl ContactFormClient {
    /// `origin` is the site's own origin, e.g. `https://example.com`.
    pub fn new(origin: &str) -> Self {
        ContactFormClient {
            endpoint: format!("{}/personaldata", origin.trim_end_matches('/')),
            http: reqwest::Client::new(),
        }
    }

    pub async fn submit(&self, session: &mut Session, input: &FormInput) -> Outcome {
        if session.contact_sent {
            return Outcome::AlreadySent;
        }

        if let Err(message) = validate_locally(input) {
            return Outcome::ValidationFailure(message);
        }

        let mut body = json!({
            "name": input.name,
            "email": input.email,
            "subject": input.subject,
            "message": input.message,
        });
        if let Some(phone) = &input.phone {
            body["phone"] = json!(phone);
        }

        let response = match self.http.post(&self.endpoint).json(&body).send().await {
            Ok(response) => response,
            Err(_) => return Outcome::NetworkFailure(MSG_CONNECTION_FAILURE.to_string()),
        };

        let status = response.status();
        let reply: ServerReply = response.json().await.unwrap_or_default();

        if status.is_success() && reply.success {
            session.contact_sent = true;
            Outcome::Success
        } else {
            // server-provided message is surfaced verbatim when present
            Outcome::ValidationFailure(
                reply
                    .message
                    .unwrap_or_else(|| MSG_GENERIC_FAILURE.to_string()),
            )
        }
    }
}

fn validate_locally(input: &FormInput) -> Result<(), String> {
    for (field, value) in [
        ("name", &input.name),
        ("email", &input.email),
        ("subject", &input.subject),
        ("message", &input.message),
    ] {
        if value.trim().is_empty() {
            return Err(format!("Please fill in the {} field.", field));
        }
    }
    if !EMAIL_RE.is_match(input.email.trim()) {
        return Err("Please enter a valid email address.".to_string());
    }
    Ok(())
}
