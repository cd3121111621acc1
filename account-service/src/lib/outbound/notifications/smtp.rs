use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;

use crate::account::errors::NotifierError;
use crate::account::ports::Notifier;
use crate::config::SmtpConfig;
use crate::domain::account::models::EmailAddress;

/// Plain-text mail delivery over SMTP.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Create a notifier from the SMTP section of the configuration.
    ///
    /// Uses STARTTLS when `starttls` is set, otherwise an unencrypted
    /// connection (local relays and mail catchers only). Credentials are sent
    /// only when a username is configured.
    ///
    /// # Errors
    /// * `InvalidAddress` - `from` is not a valid mailbox
    /// * `DeliveryFailed` - Relay could not be configured
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifierError> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e: lettre::address::AddressError| {
                NotifierError::InvalidAddress(e.to_string())
            })?;

        let mut builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| NotifierError::DeliveryFailed(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        builder = builder.port(config.port);

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        tracing::info!(
            host = %config.host,
            port = config.port,
            starttls = config.starttls,
            "SMTP notifier configured"
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_email(
        &self,
        to: &EmailAddress,
        subject: &str,
        body: &str,
    ) -> Result<(), NotifierError> {
        let to: Mailbox = to
            .as_str()
            .parse()
            .map_err(|e: lettre::address::AddressError| {
                NotifierError::InvalidAddress(e.to_string())
            })?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| NotifierError::MessageFailed(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifierError::DeliveryFailed(e.to_string()))?;

        tracing::debug!(subject = subject, "Email sent");
        Ok(())
    }
}
