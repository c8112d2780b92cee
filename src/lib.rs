mod domain;
mod infrastructure;
mod interfaces;
pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, use_cases};
pub use infrastructure::{limiter, mailer, utils};
pub use interfaces::{handlers, middlewares, routes};

use constants::{CONTACT_LIMIT, RATE_LIMIT_WINDOW};
use limiter::rate_limiter::SlidingWindowStore;
use mailer::smtp::SmtpMailer;
use use_cases::contact::ContactHandler;

pub struct AppState {
    pub contact_handler: AppContactHandler,
    pub contact_limiter: SlidingWindowStore,
    pub trust_proxy_headers: bool,
}

pub type AppContactHandler = ContactHandler<SmtpMailer>;

impl AppState {
    pub fn new(config: &settings::AppConfig) -> anyhow::Result<Self> {
        let mailer = SmtpMailer::new(config)?;
        let contact_handler = ContactHandler::new(mailer);
        let contact_limiter = SlidingWindowStore::new(RATE_LIMIT_WINDOW, CONTACT_LIMIT);

        Ok(AppState {
            contact_handler,
            contact_limiter,
            trust_proxy_headers: config.trust_proxy_headers,
        })
    }
}
