//! Availability classification of raw lookup responses.
//!
//! Registry responses are free text and differ between registries. A
//! response counts as "available" when it contains any phrase from the list,
//! compared case-insensitively. Anything else is "registered".

use crate::types::DEFAULT_AVAILABILITY_PHRASES;

/// Scans lookup responses for availability phrases.
#[derive(Debug, Clone)]
pub struct AvailabilityClassifier {
    phrases: Vec<String>,
}

impl AvailabilityClassifier {
    /// Classifier with the built-in phrase list.
    pub fn new() -> Self {
        Self::with_phrases(DEFAULT_AVAILABILITY_PHRASES.iter().copied())
    }

    /// Classifier with a custom phrase list. Blank phrases are ignored.
    pub fn with_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { phrases }
    }

    /// The first phrase found in `response`, if any.
    pub fn matched_phrase(&self, response: &str) -> Option<&str> {
        let response = response.to_lowercase();
        self.phrases
            .iter()
            .find(|phrase| response.contains(phrase.as_str()))
            .map(String::as_str)
    }

    /// Whether `response` says the domain is unregistered.
    pub fn is_available(&self, response: &str) -> bool {
        self.matched_phrase(response).is_some()
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

impl Default for AvailabilityClassifier {
    fn default() -> Self {
        Self::new()
    }
}
