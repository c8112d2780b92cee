use async_trait::async_trait;
use derive_more::Display;
use lettre::{
    message::{header, Mailbox},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use zeroize::Zeroizing;

use crate::settings::AppConfig;

/// A fully composed message ready for the relay. Addressing lives in the
/// mailer itself; the pipeline only decides subject and body.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub subject: String,
    pub html_body: String,
}

#[derive(Debug, Display)]
pub enum MailError {
    #[display("Invalid mailbox address: {_0}")]
    InvalidAddress(String),

    #[display("Message assembly failed: {_0}")]
    Assembly(String),

    #[display("SMTP transport error: {_0}")]
    Transport(String),

    #[display("Relay rejected the message: {_0}")]
    Rejected(String),
}

impl std::error::Error for MailError {}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

/// Single-attempt SMTP dispatch through the configured relay account.
#[derive(Clone)]
pub struct SmtpMailer {
    from: Mailbox,
    to: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &AppConfig) -> Result<Self, MailError> {
        let url = Zeroizing::new(config.smtp_url.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(&url)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .build();

        Ok(Self {
            from: parse_mailbox(&config.mail_from)?,
            to: parse_mailbox(&config.mail_to)?,
            transport,
        })
    }
}

fn parse_mailbox(addr: &str) -> Result<Mailbox, MailError> {
    addr.parse()
        .map_err(|_| MailError::InvalidAddress(addr.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(email.subject.clone())
            .header(header::ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .map_err(|e| MailError::Assembly(e.to_string()))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        if response.is_positive() {
            Ok(())
        } else {
            Err(MailError::Rejected(response.code().to_string()))
        }
    }
}
