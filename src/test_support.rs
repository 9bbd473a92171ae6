//! Fakes shared by unit tests.

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::console::Console;
use crate::error::FetchError;
use crate::github::{Contributor, Issue, PullRequest, RepoSource, RepositoryMetadata};
use crate::stats::{IssueState, RepositoryIdentifier};

/// Console fed from a fixed script, recording everything written.
#[derive(Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn with_input(lines: &[&str]) -> Self {
        Self {
            input: lines.iter().map(|l| format!("{l}\n")).collect(),
            ..Self::default()
        }
    }

    pub fn printed(&self) -> String {
        self.output.join("\n")
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.input.pop_front())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}

/// Which listing a [`FakeSource`] should fail on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Repository,
    Contributors,
    Issues,
    PullRequests,
}

/// In-memory repository with a shared request counter.
#[derive(Clone)]
pub struct FakeSource {
    pub metadata: RepositoryMetadata,
    pub contributors: usize,
    pub issues: usize,
    pub pull_requests: usize,
    pub fail_on: Option<FailOn>,
    pub calls: Arc<AtomicUsize>,
    pub last_state: Arc<std::sync::Mutex<Option<IssueState>>>,
}

impl FakeSource {
    pub fn hello_world() -> Self {
        Self {
            metadata: RepositoryMetadata {
                full_name: "octocat/Hello-World".to_string(),
                description: Some("My first repository on GitHub!".to_string()),
                stargazers_count: 1500,
                forks_count: 900,
            },
            contributors: 5,
            issues: 17,
            pull_requests: 3,
            fail_on: None,
            calls: Arc::new(AtomicUsize::new(0)),
            last_state: Arc::default(),
        }
    }

    pub fn failing(fail_on: FailOn) -> Self {
        Self {
            fail_on: Some(fail_on),
            ..Self::hello_world()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self, which: FailOn) -> Result<(), FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on == Some(which) {
            return Err(FetchError::NotFound("/repos/octocat/Hello-World".to_string()));
        }
        Ok(())
    }

    fn record_state(&self, state: IssueState) {
        if let Ok(mut last) = self.last_state.lock() {
            *last = Some(state);
        }
    }
}

#[async_trait]
impl RepoSource for FakeSource {
    async fn get_repository(
        &self,
        _id: &RepositoryIdentifier,
    ) -> Result<RepositoryMetadata, FetchError> {
        self.hit(FailOn::Repository)?;
        Ok(self.metadata.clone())
    }

    async fn list_contributors(
        &self,
        _id: &RepositoryIdentifier,
    ) -> Result<Vec<Contributor>, FetchError> {
        self.hit(FailOn::Contributors)?;
        Ok((0..self.contributors)
            .map(|n| Contributor {
                login: Some(format!("user{n}")),
                contributions: 1,
            })
            .collect())
    }

    async fn list_issues(
        &self,
        _id: &RepositoryIdentifier,
        state: IssueState,
    ) -> Result<Vec<Issue>, FetchError> {
        self.hit(FailOn::Issues)?;
        self.record_state(state);
        Ok((0..self.issues as u64)
            .map(|number| Issue {
                number,
                pull_request: None,
            })
            .collect())
    }

    async fn list_pull_requests(
        &self,
        _id: &RepositoryIdentifier,
        state: IssueState,
    ) -> Result<Vec<PullRequest>, FetchError> {
        self.hit(FailOn::PullRequests)?;
        self.record_state(state);
        Ok((0..self.pull_requests as u64)
            .map(|number| PullRequest { number })
            .collect())
    }
}
