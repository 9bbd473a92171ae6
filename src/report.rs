//! Plain-text rendering of a fetch outcome.
//!
//! A successful fetch renders as seven labelled lines in a fixed order; a
//! failed one as a single diagnostic line. The two are never mixed.

use crate::error::FetchError;
use crate::stats::RepositorySummary;

pub const ERROR_PREFIX: &str = "Error fetching repository stats";

pub fn render_summary(summary: &RepositorySummary) -> Vec<String> {
    vec![
        format!("Repository: {}", summary.full_name),
        format!(
            "Description: {}",
            summary.description.as_deref().unwrap_or_default()
        ),
        format!("Stars: {}", summary.stars),
        format!("Forks: {}", summary.forks),
        format!("Open Issues: {}", summary.open_issues),
        format!("Open Pull Requests: {}", summary.open_pull_requests),
        format!("Contributors: {}", summary.contributors),
    ]
}

pub fn render_error(err: &FetchError) -> String {
    format!("{ERROR_PREFIX}: {err}")
}

/// Render either outcome as one newline-separated block.
pub fn render_outcome(outcome: &Result<RepositorySummary, FetchError>) -> String {
    match outcome {
        Ok(summary) => render_summary(summary).join("\n"),
        Err(err) => render_error(err),
    }
}
