//! Data models for refugee opportunity digests.

mod candidate;
mod category;
mod digest;
mod user;

pub use candidate::Candidate;
pub use category::Category;
pub use digest::{Digest, DigestBucket, DigestEntry};
pub use user::UserPreferences;
