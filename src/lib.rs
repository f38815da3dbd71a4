//! refugee-digest: finds refugee-related opportunities on a fixed set of
//! organisation sites and through web search, filters them for relevance
//! and renders personalized plain-text digests.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod models;
pub mod relevance;
pub mod scrapers;
pub mod services;
pub mod utils;
