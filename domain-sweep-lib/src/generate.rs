//! Candidate domain generation.
//!
//! Builds domain ideas from one seed keyword: the bare keyword, the keyword
//! with each prefix and suffix from the vocabulary, a handful of random
//! prefix+keyword+suffix mixes, and numeric variants. Labels are then
//! deduplicated, length-filtered and crossed with a TLD set.
//!
//! Nothing here touches the network.
//!
//! # Examples
//!
//! ```
//! use domain_sweep_lib::generate::{generate_domains, resolve_tlds};
//! use domain_sweep_lib::GenerateConfig;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let zones = vec!["com".to_string(), ".net".to_string()];
//! assert_eq!(resolve_tlds(Some(&zones), &[]), vec![".com", ".net"]);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let result = generate_domains("Coffee!", Some(&zones), &GenerateConfig::default(), &mut rng).unwrap();
//! assert!(result.domains.contains(&"coffee.com".to_string()));
//! assert_eq!(result.domains.len(), result.candidates.len() * 2);
//! ```

use crate::error::DomainCheckError;
use crate::types::{GenerateConfig, GenerationResult, DEFAULT_TLDS};
use crate::utils::write_domain_list;
use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Longest label kept. DNS caps a label at 63 octets.
pub const MAX_LABEL_LEN: usize = 62;

lazy_static! {
    static ref NON_ALPHANUMERIC: Regex =
        Regex::new(r"[^a-z0-9]").expect("static pattern is valid");
}

/// Lowercase the keyword and strip everything outside `[a-z0-9]`.
pub fn normalize_keyword(keyword: &str) -> String {
    NON_ALPHANUMERIC
        .replace_all(&keyword.to_lowercase(), "")
        .into_owned()
}

/// Build the deduplicated candidate labels for a keyword.
///
/// Vocabulary entries go through the same normalization as the keyword so
/// configured affixes cannot smuggle in uppercase letters or punctuation.
/// The random block draws from `rng`; everything else is deterministic and
/// keeps first-seen order.
pub fn build_candidates<R: Rng + ?Sized>(
    keyword: &str,
    config: &GenerateConfig,
    rng: &mut R,
) -> Vec<String> {
    let keyword = normalize_keyword(keyword);
    let normalize_all = |list: &[String]| -> Vec<String> {
        list.iter()
            .map(|s| normalize_keyword(s))
            .filter(|s| !s.is_empty())
            .collect()
    };
    let prefixes = normalize_all(&config.prefixes);
    let suffixes = normalize_all(&config.suffixes);
    let numbers = normalize_all(&config.numbers);

    let mut ideas = Vec::with_capacity(
        1 + prefixes.len() + suffixes.len() + config.random_combinations + numbers.len() * 2,
    );

    ideas.push(keyword.clone());
    ideas.extend(prefixes.iter().map(|p| format!("{}{}", p, keyword)));
    ideas.extend(suffixes.iter().map(|s| format!("{}{}", keyword, s)));

    for _ in 0..config.random_combinations {
        match (prefixes.choose(rng), suffixes.choose(rng)) {
            (Some(prefix), Some(suffix)) => ideas.push(format!("{}{}{}", prefix, keyword, suffix)),
            _ => break,
        }
    }

    ideas.extend(numbers.iter().map(|n| format!("{}{}", keyword, n)));
    ideas.extend(
        numbers
            .iter()
            .take(config.numeric_prefix_count)
            .map(|n| format!("{}{}", n, keyword)),
    );

    let mut seen = HashSet::with_capacity(ideas.len());
    ideas
        .into_iter()
        .filter(|label| !label.is_empty() && label.len() <= MAX_LABEL_LEN)
        .filter(|label| seen.insert(label.clone()))
        .collect()
}

/// Resolve the TLD set.
///
/// Supplied zones are trimmed, lowercased and given exactly one leading dot;
/// empty entries and repeats are dropped. With no usable zones the
/// `defaults` are used, or the built-in six when `defaults` is empty too.
pub fn resolve_tlds(zones: Option<&[String]>, defaults: &[String]) -> Vec<String> {
    let resolved = dotted_unique(zones.unwrap_or_default().iter().map(String::as_str));
    if !resolved.is_empty() {
        return resolved;
    }

    let resolved = dotted_unique(defaults.iter().map(String::as_str));
    if !resolved.is_empty() {
        return resolved;
    }

    dotted_unique(DEFAULT_TLDS.iter().copied())
}

fn dotted_unique<'a>(zones: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    zones
        .map(|zone| zone.trim().trim_start_matches('.').to_lowercase())
        .filter(|zone| !zone.is_empty())
        .map(|zone| format!(".{}", zone))
        .filter(|tld| seen.insert(tld.clone()))
        .collect()
}

/// Attach every TLD to every candidate, candidate-major.
pub fn expand_with_tlds(candidates: &[String], tlds: &[String]) -> Vec<String> {
    candidates
        .iter()
        .flat_map(|label| tlds.iter().map(move |tld| format!("{}{}", label, tld)))
        .collect()
}

/// Run the whole generator: candidates, TLD resolution, cross product.
///
/// Fails only when the keyword has no alphanumeric characters at all.
pub fn generate_domains<R: Rng + ?Sized>(
    keyword: &str,
    zones: Option<&[String]>,
    config: &GenerateConfig,
    rng: &mut R,
) -> Result<GenerationResult, DomainCheckError> {
    if normalize_keyword(keyword).is_empty() {
        return Err(DomainCheckError::invalid_domain(
            keyword,
            "keyword must contain at least one letter or digit",
        ));
    }

    let candidates = build_candidates(keyword, config, rng);
    let tlds = resolve_tlds(zones, &config.default_tlds);
    let domains = expand_with_tlds(&candidates, &tlds);

    tracing::info!(
        keyword,
        candidates = candidates.len(),
        tlds = tlds.len(),
        domains = domains.len(),
        "generated domain ideas"
    );

    Ok(GenerationResult {
        candidates,
        tlds,
        domains,
    })
}

/// Default output file for a keyword: `<keyword>_domains.txt`.
pub fn default_output_path(keyword: &str) -> PathBuf {
    PathBuf::from(format!("{}_domains.txt", keyword))
}

/// Generate domains and write them one per line.
///
/// `output` defaults to [`default_output_path`] relative to the current
/// working directory. Returns the result together with the path written.
pub fn generate_to_file<R: Rng + ?Sized>(
    keyword: &str,
    zones: Option<&[String]>,
    config: &GenerateConfig,
    output: Option<&Path>,
    rng: &mut R,
) -> Result<(GenerationResult, PathBuf), DomainCheckError> {
    let result = generate_domains(keyword, zones, config, rng)?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(keyword));

    write_domain_list(&path, &result.domains)?;
    tracing::info!(path = %path.display(), count = result.domains.len(), "saved generated domains");

    Ok((result, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn no_random() -> GenerateConfig {
        GenerateConfig {
            random_combinations: 0,
            ..Default::default()
        }
    }

    // ── Normalization ───────────────────────────────────────────────

    #[test]
    fn test_normalize_keyword() {
        assert_eq!(normalize_keyword("Coffee Shop!"), "coffeeshop");
        assert_eq!(normalize_keyword("my-app_2024"), "myapp2024");
        assert_eq!(normalize_keyword("Ünïcode"), "ncode");
        assert_eq!(normalize_keyword("???"), "");
    }

    // ── Candidates ──────────────────────────────────────────────────

    #[test]
    fn test_deterministic_candidate_count() {
        // 1 bare + 33 prefixed + 27 suffixed + 12 numbered + 5 number-prefixed
        let candidates = build_candidates("coffee", &no_random(), &mut seeded());
        assert_eq!(candidates.len(), 78);
        assert_eq!(candidates[0], "coffee");
        assert!(candidates.contains(&"mycoffee".to_string()));
        assert!(candidates.contains(&"coffeehub".to_string()));
        assert!(candidates.contains(&"coffee365".to_string()));
        assert!(candidates.contains(&"5coffee".to_string()));
        assert!(!candidates.contains(&"7coffee".to_string()));
    }

    #[test]
    fn test_random_block_shape() {
        let config = GenerateConfig::default();
        let candidates = build_candidates("coffee", &config, &mut seeded());
        let deterministic = build_candidates("coffee", &no_random(), &mut seeded());

        let extra: Vec<_> = candidates
            .iter()
            .filter(|c| !deterministic.contains(c))
            .collect();
        assert!(!extra.is_empty());
        assert!(extra.len() <= 20);
        for label in extra {
            let prefixed = config.prefixes.iter().any(|p| label.starts_with(p.as_str()));
            let suffixed = config.suffixes.iter().any(|s| label.ends_with(s.as_str()));
            assert!(prefixed && suffixed, "unexpected random label {}", label);
            assert!(label.contains("coffee"));
        }
    }

    #[test]
    fn test_candidates_are_unique() {
        let config = GenerateConfig {
            random_combinations: 500,
            prefixes: vec!["a".to_string(), "b".to_string()],
            suffixes: vec!["x".to_string()],
            ..Default::default()
        };
        let candidates = build_candidates("kw", &config, &mut seeded());
        let unique: HashSet<_> = candidates.iter().collect();
        assert_eq!(unique.len(), candidates.len());
    }

    #[test]
    fn test_labels_are_short_and_alphanumeric() {
        let long = "x".repeat(60);
        for keyword in ["Coffee", "A.B-C d", &long, "Über Café 24/7"] {
            for label in build_candidates(keyword, &GenerateConfig::default(), &mut seeded()) {
                assert!(!label.is_empty());
                assert!(label.len() <= MAX_LABEL_LEN, "{} too long", label);
                assert!(label
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
            }
        }
    }

    #[test]
    fn test_oversized_labels_dropped() {
        let keyword = "k".repeat(60);
        let candidates = build_candidates(&keyword, &no_random(), &mut seeded());
        assert!(candidates.contains(&keyword));
        assert!(candidates.contains(&format!("my{}", keyword))); // 62 chars
        assert!(!candidates.contains(&format!("the{}", keyword))); // 63 chars
    }

    #[test]
    fn test_configured_vocabulary_is_normalized() {
        let config = GenerateConfig {
            prefixes: vec!["Get-".to_string(), "!!".to_string()],
            suffixes: vec![" HQ".to_string()],
            numbers: vec![],
            random_combinations: 0,
            ..Default::default()
        };
        let candidates = build_candidates("shop", &config, &mut seeded());
        assert_eq!(candidates, vec!["shop", "getshop", "shophq"]);
    }

    // ── TLDs ────────────────────────────────────────────────────────

    #[test]
    fn test_resolve_tlds_normalizes_dots() {
        let zones = vec!["com".to_string(), ".net".to_string()];
        assert_eq!(resolve_tlds(Some(&zones), &[]), vec![".com", ".net"]);
    }

    #[test]
    fn test_resolve_tlds_defaults() {
        let tlds = resolve_tlds(None, &[]);
        assert_eq!(tlds, vec![".com", ".net", ".org", ".io", ".co", ".app"]);

        let empty: Vec<String> = vec![" ".to_string(), "".to_string()];
        assert_eq!(resolve_tlds(Some(&empty), &[]).len(), 6);
    }

    #[test]
    fn test_resolve_tlds_configured_defaults() {
        let defaults = vec!["dev".to_string(), ".ai".to_string()];
        assert_eq!(resolve_tlds(None, &defaults), vec![".dev", ".ai"]);
    }

    #[test]
    fn test_resolve_tlds_trims_and_dedupes() {
        let zones = vec![
            " IO ".to_string(),
            "..co".to_string(),
            ".io".to_string(),
            "cz".to_string(),
        ];
        assert_eq!(resolve_tlds(Some(&zones), &[]), vec![".io", ".co", ".cz"]);
    }

    // ── Pipeline ────────────────────────────────────────────────────

    #[test]
    fn test_domain_count_is_cross_product() {
        let zones = vec!["com".to_string(), "io".to_string(), "cz".to_string()];
        let result =
            generate_domains("coffee", Some(&zones), &GenerateConfig::default(), &mut seeded())
                .unwrap();
        assert_eq!(result.domains.len(), result.candidates.len() * 3);
        assert_eq!(&result.domains[..3], &["coffee.com", "coffee.io", "coffee.cz"]);
    }

    #[test]
    fn test_default_tld_cross_product() {
        let result =
            generate_domains("coffee", None, &no_random(), &mut seeded()).unwrap();
        assert_eq!(result.tlds.len(), 6);
        assert_eq!(result.domains.len(), 78 * 6);
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let result = generate_domains("!!!", None, &GenerateConfig::default(), &mut seeded());
        assert!(matches!(result, Err(DomainCheckError::InvalidDomain { .. })));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path("coffee"),
            PathBuf::from("coffee_domains.txt")
        );
    }

    #[test]
    fn test_generate_to_file_writes_one_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("ideas.txt");
        let zones = vec!["com".to_string()];

        let (result, path) = generate_to_file(
            "coffee",
            Some(&zones),
            &no_random(),
            Some(&output),
            &mut seeded(),
        )
        .unwrap();

        assert_eq!(path, output);
        let content = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), result.domains.len());
        assert_eq!(lines[0], "coffee.com");
        assert!(!content.ends_with('\n'));
    }

    #[test]
    fn test_generate_to_file_propagates_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("ideas.txt");

        let result = generate_to_file(
            "coffee",
            None,
            &no_random(),
            Some(&output),
            &mut seeded(),
        );
        assert!(matches!(result, Err(DomainCheckError::FileError { .. })));
    }
}
