//! SMTP transport authenticated with an OAuth access token (SASL XOAUTH2).
//! The token is obtained out of band; this module never runs an OAuth flow.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::Config;
use crate::dispatch::{DeliveryReceipt, DispatchError, MailTransport};

#[derive(Clone)]
pub struct SmtpMailer {
    host: String,
    port: u16,
    user: Option<String>,
    oauth_token: Option<String>,
}

impl SmtpMailer {
    pub fn from_config(config: &Config) -> Self {
        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            user: config.mailbox_user.clone(),
            oauth_token: config.mailbox_oauth_token.clone(),
        }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, DispatchError> {
        let (Some(user), Some(token)) = (&self.user, &self.oauth_token) else {
            return Err(DispatchError::MissingCredentials);
        };

        Ok(AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|e| {
                DispatchError::Transport(format!(
                    "Failed to initialize SMTP relay '{}': {e}",
                    self.host
                ))
            })?
            .port(self.port)
            .credentials(Credentials::new(user.clone(), token.clone()))
            .authentication(vec![Mechanism::Xoauth2])
            .build())
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, message: Message) -> Result<DeliveryReceipt, DispatchError> {
        let transport = self.transport()?;

        let response = transport
            .send(message)
            .await
            .map_err(|e| DispatchError::Transport(format!("SMTP send failed: {e}")))?;

        let receipt = DeliveryReceipt {
            code: response.code().to_string(),
            message: response.message().collect::<Vec<_>>().join(" "),
        };
        info!("Mail accepted by {}: {}", self.host, receipt.code);
        Ok(receipt)
    }
}
