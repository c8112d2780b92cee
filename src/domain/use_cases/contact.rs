use chrono::{NaiveDate, Utc};
use validator::Validate;

use crate::{
    constants::MSG_SENT,
    entities::contact::{ContactSubmission, SubmissionResponse},
    errors::AppError,
    mailer::smtp::{Mailer, OutboundEmail},
    utils::{phone::format_phone, sanitize::strip_markup},
};

pub struct ContactHandler<M>
where
    M: Mailer,
{
    pub mailer: M,
}

impl<M> ContactHandler<M>
where
    M: Mailer,
{
    pub fn new(mailer: M) -> Self {
        ContactHandler { mailer }
    }

    /// Runs one submission through the full pipeline: normalize, validate,
    /// sanitize, format, dispatch. A single attempt; transport failure is
    /// terminal for the request.
    pub async fn submit(&self, form: ContactSubmission) -> Result<SubmissionResponse, AppError> {
        let form = form.normalized();
        form.validate()?;

        let form = sanitize_submission(form);
        let email = compose_email(&form, Utc::now().date_naive());

        // transport detail is logged once, by the error responder
        self.mailer
            .send(&email)
            .await
            .map_err(|e| AppError::MailTransport(e.to_string()))?;

        Ok(SubmissionResponse {
            success: true,
            message: MSG_SENT.to_string(),
        })
    }
}

fn sanitize_submission(form: ContactSubmission) -> ContactSubmission {
    ContactSubmission {
        name: strip_markup(&form.name),
        email: strip_markup(&form.email),
        phone: form.phone.map(|p| strip_markup(&p)),
        subject: strip_markup(&form.subject),
        message: strip_markup(&form.message),
    }
}

/// Builds the relayed HTML email. Field values arrive already sanitized;
/// residual entities are embedded as-is, matching how the receiving inbox
/// renders them.
pub fn compose_email(form: &ContactSubmission, date: NaiveDate) -> OutboundEmail {
    let formatted_phone = format_phone(form.phone.as_deref());

    let html_body = format!(
        "<html>\
         <body>\
         <h2>New Contact Form Submission</h2>\
         <p><strong>Date:</strong> {date}</p>\
         <p><strong>Name:</strong> {name}</p>\
         <p><strong>Email:</strong> {email}</p>\
         <p><strong>Phone:</strong> {phone}</p>\
         <p><strong>Message:</strong></p>\
         <p>{message}</p>\
         </body>\
         </html>",
        date = date,
        name = form.name,
        email = form.email,
        phone = formatted_phone,
        message = form.message,
    );

    OutboundEmail {
        subject: format!("Portfolio Contact: {}", form.subject),
        html_body,
    }
}
