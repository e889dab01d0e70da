//! Batched availability checker.
//!
//! This module provides the `DomainChecker` that looks domains up through a
//! [`DomainLookup`] transport, classifies each response and splits the
//! results into available and registered lists.
//!
//! Lookups within a batch run concurrently; the next batch starts only after
//! every lookup of the current one has settled and the configured pause has
//! elapsed. A lookup that fails or times out classifies its domain as
//! registered, so a run never reports a false positive because of a network
//! problem.

use crate::classify::AvailabilityClassifier;
use crate::concurrent::BatchPlan;
use crate::error::DomainCheckError;
use crate::protocols::{build_lookup, DomainLookup};
use crate::types::{
    CheckConfig, CheckSummary, DomainResult, LookupConfig, AVAILABLE_FILE, REGISTERED_FILE,
};
use crate::utils::{read_domain_file, write_domain_list};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Progress notifications emitted while a run is in flight.
#[derive(Debug, Clone, Copy)]
pub enum CheckEvent<'a> {
    /// A batch is about to be dispatched. `index` is zero-based.
    BatchStarted {
        index: usize,
        total: usize,
        size: usize,
    },

    /// A lookup settled and its domain was classified.
    DomainChecked(&'a DomainResult),

    /// The checker is pausing before the next batch.
    Pausing(Duration),
}

/// Availability checker over a pluggable lookup transport.
///
/// # Example
///
/// ```rust,no_run
/// use domain_sweep_lib::{CheckConfig, DomainChecker, WhoisClient};
///
/// #[tokio::main]
/// async fn main() {
///     let checker = DomainChecker::with_config(WhoisClient::new(), CheckConfig::default());
///     let domains = vec!["example.com".to_string(), "freecoolname.io".to_string()];
///     let summary = checker.check_domains(&domains).await;
///     println!("{} available", summary.available.len());
/// }
/// ```
pub struct DomainChecker {
    config: CheckConfig,
    lookup: Box<dyn DomainLookup>,
    classifier: AvailabilityClassifier,
}

impl DomainChecker {
    /// Create a checker with default settings (batches of 5, 2 second pause).
    pub fn new<L: DomainLookup + 'static>(lookup: L) -> Self {
        Self::with_config(lookup, CheckConfig::default())
    }

    /// Create a checker with custom settings.
    pub fn with_config<L: DomainLookup + 'static>(lookup: L, config: CheckConfig) -> Self {
        let classifier = AvailabilityClassifier::with_phrases(&config.availability_phrases);
        Self {
            config,
            lookup: Box::new(lookup),
            classifier,
        }
    }

    /// Create a checker whose transport is built from `lookup_config`.
    pub fn from_lookup_config(
        lookup_config: &LookupConfig,
        config: CheckConfig,
    ) -> Result<Self, DomainCheckError> {
        let lookup = build_lookup(lookup_config)?;
        Ok(Self::with_config(lookup, config))
    }

    /// Look up and classify a single domain.
    ///
    /// Never fails: a lookup error or timeout yields a registered result
    /// carrying the error message.
    pub async fn check_domain(&self, domain: &str) -> DomainResult {
        let start_time = Instant::now();

        let outcome = match self.config.lookup_timeout {
            Some(limit) => tokio::time::timeout(limit, self.lookup.lookup(domain))
                .await
                .unwrap_or_else(|_| {
                    Err(DomainCheckError::timeout(
                        format!("{} lookup of {}", self.lookup.method(), domain),
                        limit,
                    ))
                }),
            None => self.lookup.lookup(domain).await,
        };

        let check_duration = Some(start_time.elapsed());
        let method_used = self.lookup.method();

        match outcome {
            Ok(response) => {
                let matched_phrase = self.classifier.matched_phrase(&response).map(str::to_string);
                tracing::debug!(
                    domain,
                    available = matched_phrase.is_some(),
                    phrase = matched_phrase.as_deref().unwrap_or(""),
                    "lookup settled"
                );
                DomainResult {
                    domain: domain.to_string(),
                    available: matched_phrase.is_some(),
                    matched_phrase,
                    error_message: None,
                    check_duration,
                    method_used,
                }
            }
            Err(e) => {
                tracing::warn!(domain, error = %e, "lookup failed, classifying as registered");
                DomainResult {
                    domain: domain.to_string(),
                    available: false,
                    matched_phrase: None,
                    error_message: Some(e.to_string()),
                    check_duration,
                    method_used,
                }
            }
        }
    }

    /// Check every domain in `domains`, batch by batch.
    pub async fn check_domains(&self, domains: &[String]) -> CheckSummary {
        self.check_domains_with_progress(domains, |_| {}).await
    }

    /// Check every domain, reporting progress through `on_event`.
    ///
    /// Results in the summary keep input order. Exactly
    /// `ceil(len / batch_size) - 1` pauses are taken; none after the last
    /// batch.
    pub async fn check_domains_with_progress<F>(
        &self,
        domains: &[String],
        mut on_event: F,
    ) -> CheckSummary
    where
        F: FnMut(CheckEvent<'_>),
    {
        let started = Instant::now();
        let plan = BatchPlan::new(domains.len(), self.config.batch_size);
        let total = plan.batch_count();
        let mut summary = CheckSummary::default();

        for index in 0..total {
            let batch = &domains[plan.range(index)];
            on_event(CheckEvent::BatchStarted {
                index,
                total,
                size: batch.len(),
            });
            tracing::info!(batch = index + 1, total, size = batch.len(), "checking batch");

            let results = join_all(batch.iter().map(|domain| self.check_domain(domain))).await;
            for result in &results {
                on_event(CheckEvent::DomainChecked(result));
            }
            summary.absorb_batch(results);

            if plan.pause_after(index) {
                let delay = self.config.batch_delay;
                on_event(CheckEvent::Pausing(delay));
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                summary.pauses += 1;
            }
        }

        summary.duration = started.elapsed();
        tracing::info!(
            total = summary.total(),
            available = summary.available.len(),
            registered = summary.registered.len(),
            failures = summary.failures,
            "check complete"
        );
        summary
    }

    /// Read a domain list file and check it.
    ///
    /// # Errors
    ///
    /// Only reading the file can fail; lookups never abort the run.
    pub async fn check_file<P: AsRef<Path>>(&self, path: P) -> Result<CheckSummary, DomainCheckError> {
        let domains = read_domain_file(path)?;
        Ok(self.check_domains(&domains).await)
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    pub fn classifier(&self) -> &AvailabilityClassifier {
        &self.classifier
    }
}

/// Write `available_domains.txt` and `registered_domains.txt` into `dir`.
///
/// Both files are always written, replacing earlier runs, even when a list is
/// empty. Returns the two paths in that order.
pub fn write_results<P: AsRef<Path>>(
    dir: P,
    summary: &CheckSummary,
) -> Result<(PathBuf, PathBuf), DomainCheckError> {
    let dir = dir.as_ref();
    let available_path = dir.join(AVAILABLE_FILE);
    let registered_path = dir.join(REGISTERED_FILE);

    write_domain_list(&available_path, &summary.available)?;
    write_domain_list(&registered_path, &summary.registered)?;

    Ok((available_path, registered_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CheckMethod;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Answers "No match" for domains containing "free", fails for domains
    /// containing "down", hangs for "slow" and returns registrar data otherwise.
    struct ScriptedLookup {
        calls: AtomicUsize,
    }

    impl ScriptedLookup {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DomainLookup for ScriptedLookup {
        async fn lookup(&self, domain: &str) -> Result<String, DomainCheckError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if domain.contains("slow") {
                std::future::pending::<()>().await;
            }
            if domain.contains("down") {
                return Err(DomainCheckError::network("connection refused"));
            }
            if domain.contains("free") {
                Ok(format!("No match for \"{}\".", domain.to_uppercase()))
            } else {
                Ok(format!(
                    "Domain Name: {}\nRegistrar: Example Registrar, Inc.\nCreation Date: 2001-01-01",
                    domain.to_uppercase()
                ))
            }
        }
    }

    fn domains(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn quick_config() -> CheckConfig {
        CheckConfig::default().with_batch_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_classification() {
        let checker = DomainChecker::with_config(ScriptedLookup::new(), quick_config());

        let free = checker.check_domain("freecoolname.io").await;
        assert!(free.available);
        assert_eq!(free.matched_phrase.as_deref(), Some("no match"));
        assert_eq!(free.method_used, CheckMethod::Custom);

        let taken = checker.check_domain("google.com").await;
        assert!(!taken.available);
        assert!(taken.error_message.is_none());
    }

    #[tokio::test]
    async fn test_failure_is_registered() {
        let checker = DomainChecker::with_config(ScriptedLookup::new(), quick_config());
        let result = checker.check_domain("down.com").await;
        assert!(!result.available);
        assert!(result.is_failure());
        assert!(result
            .error_message
            .as_deref()
            .unwrap()
            .contains("connection refused"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_registered() {
        let config = quick_config().with_lookup_timeout(Duration::from_secs(3));
        let checker = DomainChecker::with_config(ScriptedLookup::new(), config);

        let result = checker.check_domain("slowfree.io").await;
        assert!(!result.available);
        assert!(result.error_message.as_deref().unwrap().contains("Timeout"));
    }

    #[tokio::test]
    async fn test_summary_partitions_input() {
        let checker = DomainChecker::with_config(ScriptedLookup::new(), quick_config());
        let input = domains(&[
            "freeone.com",
            "taken.com",
            "down.net",
            "freetwo.io",
            "other.org",
            "freethree.co",
            "last.app",
        ]);

        let summary = checker.check_domains(&input).await;
        assert_eq!(summary.available, vec!["freeone.com", "freetwo.io", "freethree.co"]);
        assert_eq!(
            summary.registered,
            vec!["taken.com", "down.net", "other.org", "last.app"]
        );
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.total(), input.len());
        assert_eq!(summary.batches, 2);
        assert_eq!(summary.pauses, 1);

        let order: Vec<_> = summary.results.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(order, input.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pauses_between_batches_only() {
        let config = CheckConfig::default()
            .with_batch_size(5)
            .with_batch_delay(Duration::from_millis(2000));
        let checker = DomainChecker::with_config(ScriptedLookup::new(), config);
        let input: Vec<String> = (0..12).map(|i| format!("name{}.com", i)).collect();

        let started = tokio::time::Instant::now();
        let summary = checker.check_domains(&input).await;
        let elapsed = started.elapsed();

        assert_eq!(summary.batches, 3);
        assert_eq!(summary.pauses, 2);
        assert!(elapsed >= Duration::from_millis(4000));
        assert!(elapsed < Duration::from_millis(4100));
    }

    #[tokio::test]
    async fn test_progress_events() {
        let config = quick_config().with_batch_size(2);
        let checker = DomainChecker::with_config(ScriptedLookup::new(), config);
        let input = domains(&["a.com", "b.com", "free.com"]);

        let mut batches = Vec::new();
        let mut checked = Vec::new();
        let mut pauses = 0;
        checker
            .check_domains_with_progress(&input, |event| match event {
                CheckEvent::BatchStarted { index, total, size } => batches.push((index, total, size)),
                CheckEvent::DomainChecked(result) => checked.push(result.domain.clone()),
                CheckEvent::Pausing(_) => pauses += 1,
            })
            .await;

        assert_eq!(batches, vec![(0, 2, 2), (1, 2, 1)]);
        assert_eq!(checked, input);
        assert_eq!(pauses, 1);
    }

    #[tokio::test]
    async fn test_each_domain_looked_up_once() {
        let lookup = Arc::new(ScriptedLookup::new());
        let checker = DomainChecker::with_config(lookup.clone(), quick_config().with_batch_size(3));
        let input: Vec<String> = (0..10).map(|i| format!("d{}.io", i)).collect();

        checker.check_domains(&input).await;
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_empty_input() {
        let checker = DomainChecker::new(ScriptedLookup::new());
        let summary = tokio_test::block_on(checker.check_domains(&[]));
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.batches, 0);
        assert_eq!(summary.pauses, 0);
    }

    #[tokio::test]
    async fn test_check_file_missing() {
        let checker = DomainChecker::with_config(ScriptedLookup::new(), quick_config());
        let result = checker.check_file("/definitely/not/here.txt").await;
        assert!(matches!(result, Err(DomainCheckError::FileError { .. })));
    }

    #[test]
    fn test_write_results_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let summary = CheckSummary {
            available: domains(&["free.io"]),
            ..Default::default()
        };

        let (available, registered) = write_results(dir.path(), &summary).unwrap();
        assert_eq!(std::fs::read_to_string(available).unwrap(), "free.io");
        assert_eq!(std::fs::read_to_string(registered).unwrap(), "");
    }
}
