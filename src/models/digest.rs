//! Grouped per-user digest.

use serde::Serialize;

use super::{Candidate, Category};

/// A candidate that passed filtering, with its assigned category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestEntry {
    pub candidate: Candidate,
    pub category: Category,
}

/// One labelled group of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestBucket {
    pub label: String,
    pub entries: Vec<DigestEntry>,
}

/// Ordered mapping from bucket label to entries.
///
/// Buckets keep insertion order and entries keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Digest {
    buckets: Vec<DigestBucket>,
}

impl Digest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the bucket with `label`, creating it at the end if needed.
    pub fn push(&mut self, label: &str, entry: DigestEntry) {
        match self.buckets.iter_mut().find(|b| b.label == label) {
            Some(bucket) => bucket.entries.push(entry),
            None => self.buckets.push(DigestBucket {
                label: label.to_string(),
                entries: vec![entry],
            }),
        }
    }

    /// Entries under `label`, if that bucket exists.
    pub fn bucket(&self, label: &str) -> Option<&[DigestEntry]> {
        self.buckets
            .iter()
            .find(|b| b.label == label)
            .map(|b| b.entries.as_slice())
    }

    pub fn buckets(&self) -> &[DigestBucket] {
        &self.buckets
    }

    /// True when no bucket holds any entry.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| b.entries.is_empty())
    }

    /// Total number of entries across buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.entries.len()).sum()
    }

    /// Iterate every entry in bucket order.
    pub fn entries(&self) -> impl Iterator<Item = &DigestEntry> {
        self.buckets.iter().flat_map(|b| b.entries.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str) -> DigestEntry {
        DigestEntry {
            candidate: Candidate::new(url.to_string(), url.to_string(), "test".to_string()),
            category: Category::Other,
        }
    }

    #[test]
    fn push_preserves_bucket_and_entry_order() {
        let mut digest = Digest::new();
        digest.push("b", entry("https://b.org/1"));
        digest.push("a", entry("https://a.org/1"));
        digest.push("b", entry("https://b.org/2"));

        let labels: Vec<_> = digest.buckets().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a"]);

        let urls: Vec<_> = digest
            .bucket("b")
            .unwrap()
            .iter()
            .map(|e| e.candidate.url.as_str())
            .collect();
        assert_eq!(urls, vec!["https://b.org/1", "https://b.org/2"]);
        assert_eq!(digest.len(), 3);
    }

    #[test]
    fn empty_digest() {
        let digest = Digest::new();
        assert!(digest.is_empty());
        assert!(digest.bucket("anything").is_none());
    }
}
