// Report generation from a repository URL index

use crate::index::RepositoryUrlIndex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
        }
    }
}

/// One section per repository: a `Repository:` header, one `- url` line per
/// URL, then a blank line.
pub fn generate_text_report(index: &RepositoryUrlIndex) -> String {
    let mut report = String::new();

    for (repo, urls) in index.iter() {
        report.push_str(&format!("Repository: {}\n", repo));
        for url in urls {
            report.push_str(&format!("- {}\n", url));
        }
        report.push('\n');
    }

    report
}

pub fn generate_json_report(index: &RepositoryUrlIndex) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "metadata": {
            "generator": "repolinks",
            "version": env!("CARGO_PKG_VERSION"),
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "total_repositories": index.len(),
            "total_urls": index.total_urls(),
        },
        "repositories": index,
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_report(
    index: &RepositoryUrlIndex,
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(index)),
        ReportFormat::Json => generate_json_report(index),
    }
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
