//! Plain-text digest rendering.
//!
//! The output is used verbatim as an email body.

use crate::config::DigestConfig;
use crate::models::Digest;

/// Intro line when the digest has entries.
pub const FOUND_INTRO: &str =
    "Here are some newly found refugee-related opportunities just for you:";

/// Body line when nothing was found.
pub const NOTHING_FOUND: &str =
    "We couldn't find matching opportunities this time, but we'll keep looking!";

/// Closing encouragement line.
pub const CLOSING: &str = "Stay hopeful, we'll keep sending you updates!";

/// Renders a digest as a plain-text message.
#[derive(Debug, Clone)]
pub struct DigestFormatter {
    signature: String,
}

impl Default for DigestFormatter {
    fn default() -> Self {
        Self::from_config(&DigestConfig::default())
    }
}

impl DigestFormatter {
    pub fn new(signature: &str) -> Self {
        Self {
            signature: signature.to_string(),
        }
    }

    pub fn from_config(config: &DigestConfig) -> Self {
        Self::new(&config.signature)
    }

    /// Render `digest` for `display_name`.
    ///
    /// Each non-empty bucket becomes a header line, then one two-line entry
    /// per candidate (title, indented URL), then a blank line.
    pub fn format(&self, display_name: &str, digest: &Digest) -> String {
        let mut body = format!("Hello {},\n\n", display_name);

        if digest.is_empty() {
            body.push_str(NOTHING_FOUND);
            body.push_str("\n\n");
        } else {
            body.push_str(FOUND_INTRO);
            body.push_str("\n\n");

            for bucket in digest.buckets().iter().filter(|b| !b.entries.is_empty()) {
                body.push_str(&format!("=== {} ===\n", bucket.label));
                for entry in &bucket.entries {
                    body.push_str(&format!(
                        "- {}\n  → {}\n",
                        single_line(&entry.candidate.display_text),
                        entry.candidate.url
                    ));
                }
                body.push('\n');
            }
        }

        body.push_str(CLOSING);
        body.push_str("\n\nWarm regards,\n");
        body.push_str(&self.signature);
        body
    }
}

/// Render with the default signature.
pub fn format_digest(display_name: &str, digest: &Digest) -> String {
    DigestFormatter::default().format(display_name, digest)
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
