use std::fmt;

use clap::ValueEnum;
use secrecy::{ExposeSecret, SecretString};

use crate::error::InvalidInputError;

fn non_blank(value: &str, field: &'static str) -> Result<String, InvalidInputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InvalidInputError {
            field,
            reason: "must not be blank",
        });
    }
    Ok(trimmed.to_string())
}

/// A URL path segment of `.` or `..` would address a different resource.
fn path_part(value: &str, field: &'static str) -> Result<String, InvalidInputError> {
    let part = non_blank(value, field)?;
    if part == "." || part == ".." {
        return Err(InvalidInputError {
            field,
            reason: "must not be a relative path",
        });
    }
    Ok(part)
}

/// Owner-scoped repository name, e.g. `octocat/Hello-World`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentifier {
    owner: String,
    name: String,
}

impl RepositoryIdentifier {
    /// Both parts are trimmed; blank parts and `.`/`..` are rejected.
    pub fn new(owner: &str, name: &str) -> Result<Self, InvalidInputError> {
        Ok(Self {
            owner: path_part(owner, "owner")?,
            name: path_part(name, "repository")?,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepositoryIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// API access token. Never printed, never persisted.
#[derive(Debug)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(token: &str) -> Result<Self, InvalidInputError> {
        let token = non_blank(token, "token")?;
        Ok(Self(SecretString::from(token)))
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

/// State filter applied to the issue and pull request listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum IssueState {
    #[default]
    Open,
    Closed,
    All,
}

impl IssueState {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
            IssueState::All => "all",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositorySummary {
    pub full_name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: usize,
    pub open_pull_requests: usize,
    pub contributors: usize,
}
