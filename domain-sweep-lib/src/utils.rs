//! Helpers for the plain-text domain list format.
//!
//! One domain per line, no header, trailing newline optional on input.
//! Lists are written newline-joined without a trailing newline.

use crate::error::DomainCheckError;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a domain list: trimmed, non-empty lines.
///
/// A domain listed twice is kept once, at its first position, so that no
/// two batches ever look up the same name.
pub fn parse_domain_list(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(line.to_string()))
        .map(str::to_string)
        .collect()
}

/// Read and parse a domain list file.
///
/// A missing or unreadable file is a fatal [`DomainCheckError::FileError`].
pub fn read_domain_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, DomainCheckError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        DomainCheckError::file_error(
            path.to_string_lossy(),
            format!("Failed to read domain list: {}", e),
        )
    })?;

    Ok(parse_domain_list(&content))
}

/// Write a domain list, replacing any existing file.
pub fn write_domain_list<P: AsRef<Path>>(
    path: P,
    domains: &[String],
) -> Result<(), DomainCheckError> {
    let path = path.as_ref();
    fs::write(path, domains.join("\n")).map_err(|e| {
        DomainCheckError::file_error(
            path.to_string_lossy(),
            format!("Failed to write domain list: {}", e),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_domain_list() {
        let content = "example.com\n\n  spaced.io  \r\nlast.net";
        assert_eq!(
            parse_domain_list(content),
            vec!["example.com", "spaced.io", "last.net"]
        );
    }

    #[test]
    fn test_parse_domain_list_trailing_newline() {
        assert_eq!(parse_domain_list("a.com\nb.com\n"), vec!["a.com", "b.com"]);
        assert!(parse_domain_list("\n \n").is_empty());
    }

    #[test]
    fn test_parse_domain_list_collapses_repeats() {
        assert_eq!(
            parse_domain_list("a.com\nb.com\n a.com\nc.com\nb.com"),
            vec!["a.com", "b.com", "c.com"]
        );
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        let domains = vec!["a.com".to_string(), "b.io".to_string()];

        write_domain_list(&path, &domains).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a.com\nb.io");
        assert_eq!(read_domain_file(&path).unwrap(), domains);
    }

    #[test]
    fn test_write_empty_list_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        fs::write(&path, "stale.com").unwrap();

        write_domain_list(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_domain_file("/definitely/not/here.txt");
        assert!(matches!(result, Err(DomainCheckError::FileError { .. })));
    }
}
