use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, LINK};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::stats::{AccessToken, IssueState, RepositoryIdentifier};

const PER_PAGE: &str = "100";
const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryMetadata {
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
}

/// Anonymous contributors have no login.
#[derive(Debug, Clone, Deserialize)]
pub struct Contributor {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub contributions: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    /// The issues endpoint also lists pull requests; they carry this key.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
}

/// Read-only view of a hosted repository.
#[async_trait]
pub trait RepoSource: Send + Sync {
    async fn get_repository(&self, id: &RepositoryIdentifier)
    -> Result<RepositoryMetadata, FetchError>;

    async fn list_contributors(
        &self,
        id: &RepositoryIdentifier,
    ) -> Result<Vec<Contributor>, FetchError>;

    async fn list_issues(
        &self,
        id: &RepositoryIdentifier,
        state: IssueState,
    ) -> Result<Vec<Issue>, FetchError>;

    async fn list_pull_requests(
        &self,
        id: &RepositoryIdentifier,
        state: IssueState,
    ) -> Result<Vec<PullRequest>, FetchError>;
}

pub struct GithubClient {
    token: AccessToken,
    base_url: Arc<Url>,
    http: Arc<Client>,
    exclude_pulls: bool,
}

impl GithubClient {
    /// Build a REST client; no request is sent until a fetch is awaited.
    pub fn new(token: AccessToken, config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url())
            .with_context(|| format!("Invalid API base URL: {}", config.api_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Invalid API base URL: {}", config.api_url);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );

        let http = Client::builder()
            .user_agent(concat!("repo-stats/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            token,
            base_url: Arc::new(base_url),
            http: Arc::new(http),
            exclude_pulls: config.exclude_pulls,
        })
    }

    /// `{base}/repos/{owner}/{name}/{tail..}`, each part percent-encoded as
    /// a single path segment.
    fn repo_url(&self, id: &RepositoryIdentifier, tail: &[&str]) -> Result<Url, FetchError> {
        let mut url = (*self.base_url).clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["repos", id.owner(), id.name()])
            .extend(tail);
        Ok(url)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, FetchError> {
        let resp = req.bearer_auth(self.token.expose()).send().await?;
        check_status(resp).await
    }

    /// Follow `Link: rel="next"` until the collection is exhausted.
    async fn get_all<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, FetchError> {
        let mut items = Vec::new();
        let mut pages = 0usize;
        let mut req = self.http.get(url.clone()).query(query);

        loop {
            let resp = self.send(req).await?;
            pages += 1;

            // Empty repositories answer 204 on /contributors.
            if resp.status() == StatusCode::NO_CONTENT {
                break;
            }

            let next = next_page_url(resp.headers());
            let bytes = resp.bytes().await?;
            let page: Vec<T> = serde_json::from_slice(&bytes)?;
            items.extend(page);

            match next {
                Some(next) => req = self.http.get(next),
                None => break,
            }
        }

        debug!(url = %url, pages, items = items.len(), "fetched collection");
        Ok(items)
    }
}

#[async_trait]
impl RepoSource for GithubClient {
    async fn get_repository(
        &self,
        id: &RepositoryIdentifier,
    ) -> Result<RepositoryMetadata, FetchError> {
        let resp = self.send(self.http.get(self.repo_url(id, &[])?)).await?;
        let bytes = resp.bytes().await?;
        let repo: RepositoryMetadata = serde_json::from_slice(&bytes)?;
        debug!(repo = %id, stars = repo.stargazers_count, "fetched repository");
        Ok(repo)
    }

    async fn list_contributors(
        &self,
        id: &RepositoryIdentifier,
    ) -> Result<Vec<Contributor>, FetchError> {
        self.get_all(self.repo_url(id, &["contributors"])?, &[("per_page", PER_PAGE)])
            .await
    }

    /// Everything the issues endpoint lists, which includes pull requests
    /// unless the client was configured to drop them.
    async fn list_issues(
        &self,
        id: &RepositoryIdentifier,
        state: IssueState,
    ) -> Result<Vec<Issue>, FetchError> {
        let mut issues: Vec<Issue> = self
            .get_all(
                self.repo_url(id, &["issues"])?,
                &[("state", state.as_str()), ("per_page", PER_PAGE)],
            )
            .await?;
        if self.exclude_pulls {
            issues.retain(|issue| !issue.is_pull_request());
        }
        Ok(issues)
    }

    async fn list_pull_requests(
        &self,
        id: &RepositoryIdentifier,
        state: IssueState,
    ) -> Result<Vec<PullRequest>, FetchError> {
        self.get_all(
            self.repo_url(id, &["pulls"])?,
            &[("state", state.as_str()), ("per_page", PER_PAGE)],
        )
        .await
    }
}

async fn check_status(resp: Response) -> Result<Response, FetchError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let remaining = resp
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let url = resp.url().path().to_owned();

    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }
    // Error payloads are best-effort; fall back to the status reason.
    let message = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|b| b.message);

    Err(classify_status(status, remaining.as_deref(), message, &url))
}

fn classify_status(
    status: StatusCode,
    rate_remaining: Option<&str>,
    message: Option<String>,
    path: &str,
) -> FetchError {
    match status {
        StatusCode::UNAUTHORIZED => FetchError::Unauthorized,
        StatusCode::NOT_FOUND => FetchError::NotFound(path.to_string()),
        StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited {
            status: status.as_u16(),
        },
        StatusCode::FORBIDDEN if rate_remaining == Some("0") => FetchError::RateLimited {
            status: status.as_u16(),
        },
        _ => FetchError::Status {
            status: status.as_u16(),
            message: message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            }),
        },
    }
}

/// Extract the `rel="next"` target from a GitHub `Link` header.
fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;
    link.split(',').find_map(|part| {
        let mut segments = part.split(';');
        let target = segments.next()?.trim();
        let is_next = segments.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_owned)
    })
}
