//! Digest hand-off to a mail transport.
//!
//! Two transports are provided: a spool that writes RFC 5322 style `.eml`
//! files for an external MTA to pick up, and a dry run that only validates
//! the message and leaves display to the caller.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::config::MailConfig;

/// Sender used when none is configured.
pub const DEFAULT_FROM: &str = "refugee-digest@localhost";

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    #[error("invalid header value: {0:?}")]
    InvalidHeader(String),
}

/// A message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingMessage {
    pub fn new(to: &str, subject: &str, body: String) -> Self {
        Self {
            to: to.to_string(),
            subject: subject.to_string(),
            body,
        }
    }
}

/// Where a message ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivered {
    Spooled(PathBuf),
    /// Validated but not handed to any transport.
    DryRun,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &OutgoingMessage) -> Result<Delivered, DeliveryError>;
}

/// Pick the transport named by config.
pub fn mailer_from_config(config: &MailConfig) -> Box<dyn Mailer> {
    let from = config.from.as_deref().unwrap_or(DEFAULT_FROM);
    match &config.spool_dir {
        Some(dir) => Box::new(SpoolMailer::new(dir, from)),
        None => Box::new(DryRunMailer),
    }
}

fn check_address(address: &str) -> Result<(), DeliveryError> {
    let valid = match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !address.chars().any(|c| c.is_whitespace() || c == '<' || c == '>')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(DeliveryError::InvalidAddress(address.to_string()))
    }
}

fn check_header(value: &str) -> Result<(), DeliveryError> {
    if value.contains(['\r', '\n']) {
        return Err(DeliveryError::InvalidHeader(value.to_string()));
    }
    Ok(())
}

/// Writes one `.eml` file per message into a spool directory.
#[derive(Debug, Clone)]
pub struct SpoolMailer {
    dir: PathBuf,
    from: String,
}

impl SpoolMailer {
    pub fn new(dir: &Path, from: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            from: from.to_string(),
        }
    }

    fn render(&self, message: &OutgoingMessage, message_id: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("From: {}\r\n", self.from));
        out.push_str(&format!("To: {}\r\n", message.to));
        out.push_str(&format!("Subject: {}\r\n", message.subject));
        out.push_str(&format!("Date: {}\r\n", chrono::Utc::now().to_rfc2822()));
        out.push_str(&format!("Message-ID: {}\r\n", message_id));
        out.push_str("MIME-Version: 1.0\r\n");
        out.push_str("Content-Type: text/plain; charset=utf-8\r\n");
        out.push_str("Content-Transfer-Encoding: 8bit\r\n");
        out.push_str("\r\n");
        for line in message.body.lines() {
            out.push_str(line);
            out.push_str("\r\n");
        }
        out
    }
}

#[async_trait]
impl Mailer for SpoolMailer {
    async fn send(&self, message: &OutgoingMessage) -> Result<Delivered, DeliveryError> {
        check_address(&message.to)?;
        check_address(&self.from)?;
        check_header(&message.subject)?;

        let id = uuid::Uuid::new_v4();
        let domain = self.from.rsplit('@').next().unwrap_or("localhost");
        let contents = self.render(message, &format!("<{}@{}>", id, domain));

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| DeliveryError::Io {
                path: self.dir.clone(),
                source,
            })?;
        let path = self.dir.join(format!("{}.eml", id));
        tokio::fs::write(&path, contents)
            .await
            .map_err(|source| DeliveryError::Io {
                path: path.clone(),
                source,
            })?;

        info!("Spooled digest for {} to {}", message.to, path.display());
        Ok(Delivered::Spooled(path))
    }
}

/// Validates messages without delivering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunMailer;

#[async_trait]
impl Mailer for DryRunMailer {
    async fn send(&self, message: &OutgoingMessage) -> Result<Delivered, DeliveryError> {
        check_address(&message.to)?;
        check_header(&message.subject)?;
        info!("Dry run: digest for {} not sent", message.to);
        Ok(Delivered::DryRun)
    }
}
