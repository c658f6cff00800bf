//! cite command: Generate Harvard references for web pages
//!
//! Fetches each URL sequentially, infers author, title and publication
//! year from the page markup, and emits one reference per URL. Fetch
//! failures skip the URL with a diagnostic; the batch always completes.

use crate::extract::{publication_year, resolve_author, NO_TITLE};
use crate::fetch::{FetchConfig, Fetcher};
use crate::page::Page;
use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use serde::Serialize;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tokio::fs;

#[derive(Args)]
pub struct CiteArgs {
    /// File with URLs to cite, one per line
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Cite a single URL
    #[arg(long)]
    url: Option<String>,

    /// Read URLs from stdin (one per line)
    #[arg(long)]
    stdin: bool,

    /// Write references to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format when writing to a file: json (default) or yaml
    #[arg(long, short, default_value = "json")]
    format: String,

    /// Timeout per URL in milliseconds
    #[arg(long, default_value = "15000")]
    timeout: u64,

    /// Pause between requests in milliseconds
    #[arg(long, default_value = "0")]
    delay: u64,

    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,
}

/// Configuration for cite
pub struct CiteConfig {
    pub fetch: FetchConfig,
}

/// Result for a single cited URL (compact)
#[derive(Debug, Serialize)]
pub struct CiteResult {
    pub url: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Full report (compact)
#[derive(Debug, Serialize)]
pub struct CiteReport {
    pub ok: usize,
    pub failed: usize,
    pub results: Vec<CiteResult>,
}

/// Run the cite command
pub async fn run_cite(args: CiteArgs) -> Result<()> {
    let urls = get_urls(&args).await?;

    if urls.is_empty() {
        eprintln!("No URLs found.");
        std::process::exit(1);
    }

    eprintln!(
        "Citing {} URL{}...",
        urls.len(),
        if urls.len() == 1 { "" } else { "s" }
    );

    let config = CiteConfig {
        fetch: FetchConfig {
            timeout_ms: args.timeout,
            delay_ms: args.delay,
            insecure: args.insecure,
        },
    };

    let report = cite_urls(&urls, &config).await?;
    let text = references_text(&report);

    if let Some(path) = &args.output {
        fs::write(path, &text)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("References written to {}", path.display());

        // Machine-readable summary on stdout once the references are in a file
        let summary = match args.format.as_str() {
            "yaml" | "yml" => serde_yaml::to_string(&report)?,
            _ => serde_json::to_string(&report)?,
        };
        println!("{}", summary);
    } else {
        print!("{}", text);
    }

    eprintln!("Done: {}/{} OK", report.ok, report.ok + report.failed);

    Ok(())
}

/// Get URLs from file, --url, or stdin
async fn get_urls(args: &CiteArgs) -> Result<Vec<String>> {
    if let Some(url) = &args.url {
        return Ok(vec![url.clone()]);
    }

    if args.stdin {
        let stdin = io::stdin();
        let lines: Vec<String> = stdin.lock().lines().map_while(Result::ok).collect();
        return Ok(valid_urls(&lines));
    }

    if let Some(file) = &args.file {
        let content = fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read file: {}", file.display()))?;
        let lines: Vec<String> = content.lines().map(String::from).collect();
        return Ok(valid_urls(&lines));
    }

    eprintln!("Usage:");
    eprintln!("  autocite cite <urls.txt>    Cite URLs listed in a file");
    eprintln!("  autocite cite --url <URL>   Cite a single URL");
    eprintln!("  autocite cite --stdin       Read URLs from stdin");
    std::process::exit(1);
}

/// Keep non-blank lines that parse as URLs; diagnose the rest
fn valid_urls(lines: &[String]) -> Vec<String> {
    let mut urls = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if url::Url::parse(line).is_ok() {
            urls.push(line.to_string());
        } else {
            eprintln!("Skipping invalid URL: {}", line);
        }
    }
    urls
}

/// Cite multiple URLs and generate a report
pub async fn cite_urls(urls: &[String], config: &CiteConfig) -> Result<CiteReport> {
    let fetcher = Fetcher::new(&config.fetch)?;
    let mut results = Vec::with_capacity(urls.len());
    let mut ok_count = 0;
    let mut failed_count = 0;

    for (i, url) in urls.iter().enumerate() {
        if i > 0 {
            fetcher.pace().await;
        }
        eprintln!("  -> {}", truncate(url, 60));

        match fetcher.fetch(url).await {
            Ok(html) => {
                ok_count += 1;
                results.push(CiteResult {
                    url: url.clone(),
                    ok: true,
                    reference: Some(cite_page(url, &html)),
                    error: None,
                });
            }
            Err(e) => {
                eprintln!("Error fetching {}: {}", url, e);
                failed_count += 1;
                results.push(CiteResult {
                    url: url.clone(),
                    ok: false,
                    reference: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    Ok(CiteReport {
        ok: ok_count,
        failed: failed_count,
        results,
    })
}

/// Build one Harvard reference from fetched markup
pub fn cite_page(url: &str, html: &str) -> String {
    let page = Page::parse(html);
    let data = page.structured_data();

    let title = page.title().unwrap_or_else(|| NO_TITLE.to_string());
    let author = resolve_author(&page, data.as_ref());
    let year = publication_year(&page);
    let accessed = Local::now().format("%d %B %Y").to_string();

    format_reference(&author, &year, &title, url, &accessed)
}

/// Compose the final sentence. Template choice keys on non-emptiness of
/// author and year; both arrive as non-empty sentinels when unknown, so
/// the first template is the one seen in practice.
fn format_reference(author: &str, year: &str, title: &str, url: &str, accessed: &str) -> String {
    match (!author.is_empty(), !year.is_empty()) {
        (true, true) => format!(
            "{} ({}) {}. Available at: {} (Accessed: {}).",
            author, year, title, url, accessed
        ),
        (true, false) => format!(
            "{} {}. Available at: {} (Accessed: {}).",
            author, title, url, accessed
        ),
        (false, true) => format!(
            "({}) {}. Available at: {} (Accessed: {}).",
            year, title, url, accessed
        ),
        (false, false) => format!("{}. Available at: {} (Accessed: {}).", title, url, accessed),
    }
}

/// References joined in input order, each followed by a blank line
fn references_text(report: &CiteReport) -> String {
    let mut out = String::new();
    for result in &report.results {
        if let Some(reference) = &result.reference {
            out.push_str(reference);
            out.push_str("\n\n");
        }
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max - 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reference_both_present() {
        assert_eq!(
            format_reference(
                "Doe, J.",
                "2020",
                "Test Page",
                "http://x.test",
                "01 January 2024"
            ),
            "Doe, J. (2020) Test Page. Available at: http://x.test (Accessed: 01 January 2024)."
        );
    }

    #[test]
    fn test_format_reference_author_only() {
        assert_eq!(
            format_reference("Doe, J.", "", "Test Page", "http://x.test", "01 January 2024"),
            "Doe, J. Test Page. Available at: http://x.test (Accessed: 01 January 2024)."
        );
    }

    #[test]
    fn test_format_reference_year_only() {
        assert_eq!(
            format_reference("", "2020", "Test Page", "http://x.test", "01 January 2024"),
            "(2020) Test Page. Available at: http://x.test (Accessed: 01 January 2024)."
        );
    }

    #[test]
    fn test_format_reference_neither() {
        assert_eq!(
            format_reference("", "", "Test Page", "http://x.test", "01 January 2024"),
            "Test Page. Available at: http://x.test (Accessed: 01 January 2024)."
        );
    }

    #[test]
    fn test_cite_page_full_pipeline() {
        let html = r#"
            <html>
            <head>
                <title>Test Page</title>
                <meta property="article:published_time" content="2020-05-17T10:00:00+00:00">
                <script type="application/ld+json">{"author": {"name": "John Doe"}}</script>
            </head>
            <body><p>content</p></body>
            </html>
        "#;
        let reference = cite_page("http://x.test", html);
        assert!(
            reference.starts_with("Doe, J. (2020) Test Page. Available at: http://x.test (Accessed: "),
            "unexpected reference: {}",
            reference
        );
        assert!(reference.ends_with(")."));
    }

    #[test]
    fn test_cite_page_sentinels() {
        let reference = cite_page("http://x.test", "<html><body>bare</body></html>");
        assert!(reference.starts_with(
            "No author available (No date available) No title available. Available at: http://x.test"
        ));
    }

    #[test]
    fn test_cite_page_idempotent() {
        let html = r#"
            <html>
            <head>
                <title>Stable</title>
                <meta name="date" content="2019-02-03">
            </head>
            </html>
        "#;
        assert_eq!(cite_page("http://x.test", html), cite_page("http://x.test", html));
    }

    #[test]
    fn test_references_text_separator_and_skips() {
        let report = CiteReport {
            ok: 2,
            failed: 1,
            results: vec![
                CiteResult {
                    url: "http://a.test".to_string(),
                    ok: true,
                    reference: Some("A. Available at: http://a.test (Accessed: x).".to_string()),
                    error: None,
                },
                CiteResult {
                    url: "http://b.test".to_string(),
                    ok: false,
                    reference: None,
                    error: Some("HTTP 404 for http://b.test".to_string()),
                },
                CiteResult {
                    url: "http://c.test".to_string(),
                    ok: true,
                    reference: Some("C. Available at: http://c.test (Accessed: x).".to_string()),
                    error: None,
                },
            ],
        };
        let text = references_text(&report);
        assert_eq!(
            text,
            "A. Available at: http://a.test (Accessed: x).\n\nC. Available at: http://c.test (Accessed: x).\n\n"
        );
    }

    #[test]
    fn test_valid_urls() {
        let lines = vec![
            "https://example.com/post".to_string(),
            String::new(),
            "   ".to_string(),
            "not a url".to_string(),
            "http://other.test/page".to_string(),
        ];
        let urls = valid_urls(&lines);
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0], "https://example.com/post");
        assert_eq!(urls[1], "http://other.test/page");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a very long string", 10), "this is...");
    }
}
