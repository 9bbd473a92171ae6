//! Command-line surface: argument parsing and the two input adapters.
//!
//! `repo-stats <owner> <repo> <token>` takes everything from positionals;
//! `repo-stats --interactive` prompts for the same three values. Both end up
//! in the same [`Invocation`] and share one execution path.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::console::Console;
use crate::error::InvalidInputError;
use crate::github::{GithubClient, RepoSource};
use crate::reporter::RepoStatsReporter;
use crate::stats::{AccessToken, IssueState, RepositoryIdentifier};

pub const USAGE: &str = "Usage: repo-stats <owner> <repo> <token>";
pub const INVALID_INPUT: &str = "Invalid input. All fields must be filled.";

/// Print star, fork, issue, pull request and contributor counts for a
/// GitHub repository.
#[derive(Parser, Debug)]
#[command(name = "repo-stats", version)]
pub struct Cli {
    /// Repository owner (user or organisation).
    pub owner: Option<String>,

    /// Repository name.
    pub repo: Option<String>,

    /// GitHub access token.
    pub token: Option<String>,

    /// Prompt for token, owner and repository instead of reading arguments.
    #[arg(short, long, conflicts_with_all = ["owner", "repo", "token"])]
    pub interactive: bool,

    /// Which issues and pull requests to count.
    #[arg(long, value_enum, default_value_t = IssueState::Open)]
    pub state: IssueState,

    /// Base URL of the GitHub REST API.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Leave pull requests out of the issue count.
    #[arg(long)]
    pub exclude_pulls: bool,

    /// Per-request timeout in seconds.
    #[arg(
        long,
        env = "REPO_STATS_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            exclude_pulls: self.exclude_pulls,
        }
    }

    /// Argument-driven adapter.
    pub fn invocation(&self) -> Invocation {
        match (&self.owner, &self.repo, &self.token) {
            (Some(owner), Some(repo), Some(token)) => Invocation::resolve(owner, repo, token),
            _ => Invocation::Usage,
        }
    }
}

/// What a run should do once input has been collected.
#[derive(Debug)]
pub enum Invocation {
    Usage,
    Invalid(InvalidInputError),
    Report {
        id: RepositoryIdentifier,
        token: AccessToken,
    },
}

impl Invocation {
    fn resolve(owner: &str, repo: &str, token: &str) -> Self {
        let parsed = AccessToken::new(token)
            .and_then(|token| Ok((RepositoryIdentifier::new(owner, repo)?, token)));
        match parsed {
            Ok((id, token)) => Invocation::Report { id, token },
            Err(err) => Invocation::Invalid(err),
        }
    }
}

/// Interactive adapter: prompts for token, owner and name in that order.
pub fn prompt_interactive<C: Console>(console: &mut C) -> std::io::Result<Invocation> {
    let token = console.read_line("GitHub Token: ")?.unwrap_or_default();
    let owner = console.read_line("Repository Owner: ")?.unwrap_or_default();
    let repo = console.read_line("Repository Name: ")?.unwrap_or_default();
    Ok(Invocation::resolve(&owner, &repo, &token))
}

/// Carry out an invocation. `connect` builds the collaborator and is only
/// called when there is a report to fetch.
pub async fn execute<C, S, F>(
    invocation: Invocation,
    state: IssueState,
    console: &mut C,
    connect: F,
) -> Result<()>
where
    C: Console,
    S: RepoSource,
    F: FnOnce(AccessToken) -> Result<S>,
{
    match invocation {
        Invocation::Usage => console.write_line(USAGE)?,
        Invocation::Invalid(err) => {
            debug!(%err, "rejected input");
            console.write_line(INVALID_INPUT)?;
        }
        Invocation::Report { id, token } => {
            let source = connect(token)?;
            RepoStatsReporter::new(source, id)
                .with_state(state)
                .fetch_and_report(console)
                .await?;
        }
    }
    Ok(())
}

pub async fn run<C: Console>(cli: Cli, console: &mut C) -> Result<()> {
    let invocation = if cli.interactive {
        prompt_interactive(console)?
    } else {
        cli.invocation()
    };
    let config = cli.client_config();
    execute(invocation, cli.state, console, |token| {
        GithubClient::new(token, &config)
    })
    .await
}
