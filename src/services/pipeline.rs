//! One digest per user: aggregate, render, hand off.

use tracing::{info, warn};

use super::aggregate::{AggregateReport, Aggregator};
use super::format::DigestFormatter;
use super::notify::{Delivered, DeliveryError, Mailer, OutgoingMessage};
use crate::config::Config;
use crate::models::{Digest, UserPreferences};

/// Result of a single user's run.
///
/// The digest stays valid whatever happened to delivery.
#[derive(Debug)]
pub struct RunOutcome {
    pub user: UserPreferences,
    pub digest: Digest,
    pub report: AggregateReport,
    pub message: OutgoingMessage,
    pub delivery: Result<Delivered, DeliveryError>,
}

impl RunOutcome {
    pub fn delivered(&self) -> bool {
        self.delivery.is_ok()
    }
}

pub struct DigestRunner<'a> {
    aggregator: Aggregator<'a>,
    formatter: DigestFormatter,
    mailer: &'a dyn Mailer,
    subject: String,
}

impl<'a> DigestRunner<'a> {
    pub fn new(config: &Config, aggregator: Aggregator<'a>, mailer: &'a dyn Mailer) -> Self {
        Self {
            aggregator,
            formatter: DigestFormatter::from_config(&config.digest),
            mailer,
            subject: config.digest.subject.clone(),
        }
    }

    /// Aggregate and render without sending.
    pub async fn prepare(&self, user: &UserPreferences) -> (Digest, AggregateReport, OutgoingMessage) {
        let outcome = self.aggregator.run(user).await;
        let body = self.formatter.format(&user.display_name, &outcome.digest);
        let message = OutgoingMessage::new(&user.contact_address, &self.subject, body);
        (outcome.digest, outcome.report, message)
    }

    /// Full run for one user. An empty digest still produces a message.
    pub async fn run_user(&self, user: &UserPreferences) -> RunOutcome {
        let (digest, report, message) = self.prepare(user).await;

        let delivery = self.mailer.send(&message).await;
        match &delivery {
            Ok(_) => info!("Digest delivered to {}", user.contact_address),
            Err(e) => warn!("Delivery to {} failed: {}", user.contact_address, e),
        }

        RunOutcome {
            user: user.clone(),
            digest,
            report,
            message,
            delivery,
        }
    }

    /// Run every user in order. One user's failure never stops the rest.
    pub async fn run_all(&self, users: &[UserPreferences]) -> Vec<RunOutcome> {
        let mut outcomes = Vec::with_capacity(users.len());
        for user in users {
            outcomes.push(self.run_user(user).await);
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::discovery::SearchProvider;
    use crate::relevance::KeywordClassifier;
    use crate::scrapers::{Fetch, FetchError, RawPage};
    use crate::services::format::NOTHING_FOUND;

    struct OfflineFetcher;

    #[async_trait]
    impl Fetch for OfflineFetcher {
        async fn fetch(&self, url: &str) -> Result<RawPage, FetchError> {
            Err(FetchError::Timeout {
                url: url.to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<OutgoingMessage>>,
        fail: bool,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, message: &OutgoingMessage) -> Result<Delivered, DeliveryError> {
            if self.fail {
                return Err(DeliveryError::InvalidAddress(message.to.clone()));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(Delivered::DryRun)
        }
    }

    #[tokio::test]
    async fn empty_digest_still_sends_fallback() {
        let config = Config::default();
        let classifier = KeywordClassifier::new(&config.keywords.relevance);
        let providers: Vec<Box<dyn SearchProvider>> = Vec::new();
        let fetcher = OfflineFetcher;
        let mailer = RecordingMailer::default();
        let runner = DigestRunner::new(
            &config,
            Aggregator::new(&config, &fetcher, &classifier, &providers),
            &mailer,
        );

        let user = UserPreferences::new("Amina", "amina@example.org", vec![]);
        let outcome = runner.run_user(&user).await;

        assert!(outcome.digest.is_empty());
        assert!(outcome.delivered());
        assert_eq!(outcome.report.failed_sources.len(), config.sites.len());
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Your Refugee Opportunity Updates");
        assert!(sent[0].body.contains(NOTHING_FOUND));
    }

    #[tokio::test]
    async fn delivery_failure_keeps_digest() {
        let config = Config::default();
        let classifier = KeywordClassifier::new(&config.keywords.relevance);
        let providers: Vec<Box<dyn SearchProvider>> = Vec::new();
        let fetcher = OfflineFetcher;
        let mailer = RecordingMailer {
            fail: true,
            ..Default::default()
        };
        let runner = DigestRunner::new(
            &config,
            Aggregator::new(&config, &fetcher, &classifier, &providers),
            &mailer,
        );

        let users = vec![
            UserPreferences::new("A", "a@example.org", vec![]),
            UserPreferences::new("B", "b@example.org", vec![]),
        ];
        let outcomes = runner.run_all(&users).await;
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| !o.delivered()));
        assert!(outcomes[1].message.body.starts_with("Hello B,"));
    }
}
