use std::io;

use tracing::{debug, warn};

use crate::console::Console;
use crate::error::FetchError;
use crate::github::RepoSource;
use crate::report::render_outcome;
use crate::stats::{IssueState, RepositoryIdentifier, RepositorySummary};

/// Fetches the statistics of one repository and prints them.
pub struct RepoStatsReporter<S> {
    source: S,
    id: RepositoryIdentifier,
    state: IssueState,
}

impl<S: RepoSource> RepoStatsReporter<S> {
    /// Stores the collaborator and target; performs no I/O.
    pub fn new(source: S, id: RepositoryIdentifier) -> Self {
        Self {
            source,
            id,
            state: IssueState::default(),
        }
    }

    /// State filter for the issue and pull request counts.
    pub fn with_state(mut self, state: IssueState) -> Self {
        self.state = state;
        self
    }

    /// Runs the four reads concurrently and assembles the summary once all
    /// of them have completed. The first failure aborts the rest.
    pub async fn fetch_summary(&self) -> Result<RepositorySummary, FetchError> {
        let (repo, contributors, issues, pull_requests) = tokio::try_join!(
            self.source.get_repository(&self.id),
            self.source.list_contributors(&self.id),
            self.source.list_issues(&self.id, self.state),
            self.source.list_pull_requests(&self.id, self.state),
        )?;

        Ok(RepositorySummary {
            full_name: repo.full_name,
            description: repo.description,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            open_issues: issues.len(),
            open_pull_requests: pull_requests.len(),
            contributors: contributors.len(),
        })
    }

    /// Fetch, then write either the full report or one error line.
    ///
    /// Remote failures are reported, not returned; only a failure to write
    /// to the console is an `Err`.
    pub async fn fetch_and_report<C: Console>(&self, console: &mut C) -> io::Result<()> {
        debug!(repo = %self.id, state = self.state.as_str(), "fetching repository stats");
        let outcome = self.fetch_summary().await;
        if let Err(err) = &outcome {
            warn!(repo = %self.id, error = ?err, "fetch failed");
        }
        console.write_line(&render_outcome(&outcome))
    }
}
