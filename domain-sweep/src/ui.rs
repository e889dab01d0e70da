//! Terminal output for the domain-sweep CLI.
//!
//! Result lines, batch headers and summaries go to stdout with `console`
//! styling. Diagnostics are left to `tracing`, which writes to stderr.

use console::{pad_str, style, Alignment};
use domain_sweep_lib::{CheckConfig, CheckEvent, CheckSummary, DomainResult, GenerationResult};
use std::path::Path;

const DOMAIN_WIDTH: usize = 34;

// ── Generation ───────────────────────────────────────────────────────────────

/// Report a finished generation run and suggest the next command.
pub fn print_generation(result: &GenerationResult, path: &Path) {
    println!(
        "{} {} domain idea{} ({} name{} x {} TLD{})",
        style("Generated").green().bold(),
        style(result.domains.len()).bold(),
        plural(result.domains.len()),
        result.candidates.len(),
        plural(result.candidates.len()),
        result.tlds.len(),
        plural(result.tlds.len()),
    );
    println!("  {} {}", style("TLDs:").dim(), result.tlds.join(" "));
    println!("  {} {}", style("Saved to").dim(), path.display());
    println!();
    println!(
        "Next: {}",
        style(format!("domain-sweep check-available {}", path.display())).cyan()
    );
}

// ── Check run ────────────────────────────────────────────────────────────────

/// Print a header at the start of a check run.
pub fn print_check_header(domain_count: usize, config: &CheckConfig, method: &str) {
    println!(
        "{} {} {}",
        style("domain-sweep").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "checking {} domain{}",
            domain_count,
            plural(domain_count)
        ))
        .dim(),
    );

    let timeout = match config.lookup_timeout {
        Some(t) => format!("{}s", t.as_secs()),
        None => "none".to_string(),
    };
    println!(
        "{}",
        style(format!(
            "Lookup: {} | Batch size: {} | Delay: {}ms | Timeout: {}",
            method,
            config.batch_size,
            config.batch_delay.as_millis(),
            timeout
        ))
        .dim()
    );
    println!();
}

/// Render one progress event from the checker.
pub fn print_event(event: CheckEvent<'_>, debug: bool) {
    match event {
        CheckEvent::BatchStarted { index, total, size } => {
            println!(
                "{} {}",
                style(format!("Batch {}/{}", index + 1, total)).cyan().bold(),
                style(format!("({} domain{})", size, plural(size))).dim(),
            );
        }
        CheckEvent::DomainChecked(result) => print_result(result, debug),
        CheckEvent::Pausing(delay) => {
            if !delay.is_zero() {
                println!(
                    "  {}",
                    style(format!("waiting {:.1}s before next batch", delay.as_secs_f64())).dim()
                );
            }
        }
    }
}

/// Print a single classified domain.
pub fn print_result(result: &DomainResult, debug: bool) {
    let padded = pad_str(&result.domain, DOMAIN_WIDTH, Alignment::Left, Some(".."));

    if result.available {
        println!("  {} {}  {}", style("✓").green(), padded, style("Available").green().bold());
    } else if result.is_failure() {
        println!(
            "  {} {}  {}  {}",
            style("✗").red(),
            padded,
            style("Registered").red().bold(),
            style(brief_error(result)).yellow(),
        );
    } else {
        println!("  {} {}  {}", style("✗").red(), padded, style("Registered").red().bold());
    }

    if debug {
        if let Some(duration) = result.check_duration {
            println!(
                "    {} {}ms via {}{}",
                style("└─").dim(),
                duration.as_millis(),
                result.method_used,
                result
                    .matched_phrase
                    .as_deref()
                    .map(|p| format!(", matched \"{}\"", p))
                    .unwrap_or_default(),
            );
        }
        if let Some(message) = &result.error_message {
            println!("    {} {}", style("└─").dim(), style(message).dim());
        }
    }
}

/// Print the final counts and where the lists were written.
pub fn print_summary(summary: &CheckSummary, available_path: &Path, registered_path: &Path) {
    println!();
    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  {} domain{} in {:.1}s  {}  {}  {}  {}",
        style(summary.total()).bold(),
        plural(summary.total()),
        summary.duration.as_secs_f64(),
        style("|").dim(),
        style(format!("{} available", summary.available.len())).green(),
        style("|").dim(),
        style(format!("{} registered", summary.registered.len())).red(),
    );
    println!(
        "  {} {}",
        style("Available list: ").dim(),
        available_path.display()
    );
    println!(
        "  {} {}",
        style("Registered list:").dim(),
        registered_path.display()
    );
}

/// List domains that were classified registered only because the lookup failed.
pub fn print_failure_summary(summary: &CheckSummary) {
    let failed: Vec<String> = summary
        .results
        .iter()
        .filter(|r| r.is_failure())
        .map(|r| r.domain.clone())
        .collect();

    if failed.is_empty() {
        return;
    }

    println!();
    println!(
        "  {}",
        style(format!(
            "{} lookup{} failed and {} counted as registered:",
            failed.len(),
            plural(failed.len()),
            if failed.len() == 1 { "was" } else { "were" },
        ))
        .yellow()
    );
    println!("  {} {}", style("•").dim(), format_list(&failed, 5));
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Join up to `max_show` names, summarising the rest.
fn format_list(domains: &[String], max_show: usize) -> String {
    if domains.len() <= max_show {
        domains.join(", ")
    } else {
        let shown = &domains[..max_show];
        let remaining = domains.len() - max_show;
        format!("{}, ... and {} more", shown.join(", "), remaining)
    }
}

/// Short reason for a failed lookup.
fn brief_error(result: &DomainResult) -> &'static str {
    match &result.error_message {
        Some(msg) => {
            let m = msg.to_lowercase();
            if m.contains("timeout") || m.contains("timed out") {
                "(timeout)"
            } else if m.contains("network") || m.contains("dns") || m.contains("connect") {
                "(network error)"
            } else if m.contains("whois") {
                "(whois error)"
            } else if m.contains("http") {
                "(http error)"
            } else {
                "(lookup failed)"
            }
        }
        None => "",
    }
}
