//! Digest pipeline services: categorization, staleness, aggregation,
//! rendering and delivery.

pub mod aggregate;
pub mod categorize;
pub mod format;
pub mod notify;
pub mod pipeline;
pub mod staleness;
pub mod users;

pub use aggregate::{AggregateOutcome, AggregateReport, Aggregator, FailedSource};
pub use categorize::Categorizer;
pub use format::{format_digest, DigestFormatter};
pub use notify::{
    mailer_from_config, Delivered, DeliveryError, DryRunMailer, Mailer, OutgoingMessage,
    SpoolMailer,
};
pub use pipeline::{DigestRunner, RunOutcome};
pub use staleness::{StaleReason, StalenessFilter};
pub use users::{load_users, parse_users, RegisteredUser, UserFileError};
