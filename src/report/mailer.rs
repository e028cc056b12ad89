//! SMTP composition and delivery of the digest mailing.

use anyhow::{Context, Result};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

/// Delivery settings, resolved from config and environment.
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub send_to: String,
    pub from_name: String,
}

/// Build the multipart (text + HTML) mailing.
pub fn compose_mailing(
    settings: &MailSettings,
    subject: &str,
    text_body: String,
    html_body: String,
) -> Result<Message> {
    let from = Mailbox::new(
        Some(settings.from_name.clone()),
        settings
            .username
            .parse()
            .with_context(|| format!("invalid from address {:?}", settings.username))?,
    );
    let to: Mailbox = settings
        .send_to
        .parse()
        .with_context(|| format!("invalid recipient address {:?}", settings.send_to))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .multipart(MultiPart::alternative_plain_html(text_body, html_body))
        .context("composing mailing")
}

/// Deliver the mailing over SMTP with TLS.
pub async fn send_mailing(settings: &MailSettings, message: Message) -> Result<()> {
    let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.server)
        .with_context(|| format!("connecting to mail server {:?}", settings.server))?
        .port(settings.port)
        .credentials(Credentials::new(
            settings.username.clone(),
            settings.password.clone(),
        ))
        .build();

    transport
        .send(message)
        .await
        .context("sending the mailing")?;
    info!(to = %settings.send_to, "mailing sent");
    Ok(())
}
