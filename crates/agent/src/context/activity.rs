//! Live activity context from the GitHub REST API.
//!
//! Best-effort: every failure (network, non-200, bad JSON) degrades to less
//! or no text. Callers never see an error.

use std::time::Duration;

use async_trait::async_trait;
use folio_config::GithubConfig;
use serde::Deserialize;
use tracing::{debug, warn};

const GITHUB_API: &str = "https://api.github.com";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const PAGE_SIZE: &str = "30";
/// Only the first commits of each push are considered.
const COMMITS_PER_PUSH: usize = 2;
const COMMIT_SUBJECT_CHARS: usize = 80;

/// A source of recent-activity text for the context blob.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// A summary of recent activity; empty when nothing could be fetched.
    async fn summary(&self) -> String;
}

/// Activity source that never has anything to say.
pub struct NoActivity;

#[async_trait]
impl ActivitySource for NoActivity {
    async fn summary(&self) -> String {
        String::new()
    }
}

// ── GitHub API payloads (only the fields we read) ─────────────────────────

#[derive(Debug, Deserialize)]
pub struct Repo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub fork: bool,
}

#[derive(Debug, Deserialize)]
pub struct Event {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub repo: EventRepo,
    #[serde(default)]
    pub payload: EventPayload,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventRepo {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub commits: Vec<Commit>,
    #[serde(default)]
    pub ref_type: Option<String>,
    #[serde(rename = "ref", default)]
    pub git_ref: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub author: CommitAuthor,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommitAuthor {
    #[serde(default)]
    pub name: String,
}

// ── Summaries ─────────────────────────────────────────────────────────────

/// Summarize the account's own repositories (forks skipped).
pub fn summarize_repos(repos: &[Repo]) -> String {
    let lines: Vec<String> = repos
        .iter()
        .filter(|r| !r.fork)
        .map(|r| {
            format!(
                "- {}: {} [{}] ⭐{}",
                r.name,
                r.description.as_deref().unwrap_or(""),
                r.language.as_deref().unwrap_or(""),
                r.stargazers_count
            )
        })
        .collect();

    format!("GITHUB REPOS (own, non-forked):\n{}", lines.join("\n"))
}

/// Summarize public events: the owner's own commits and repo/branch creation.
///
/// `author_fragments` must be lowercase; a commit counts as the owner's when
/// its author name contains any fragment.
pub fn summarize_events(events: &[Event], author_fragments: &[String]) -> String {
    let mut lines = Vec::new();

    for event in events {
        let repo = &event.repo.name;
        match event.kind.as_str() {
            "PushEvent" => {
                for commit in event.payload.commits.iter().take(COMMITS_PER_PUSH) {
                    let author = commit.author.name.to_lowercase();
                    if author_fragments.iter().any(|f| author.contains(f.as_str())) {
                        lines.push(format!("- Commit to {repo}: {}", commit_subject(&commit.message)));
                    }
                }
            }
            "CreateEvent" => match (event.payload.ref_type.as_deref(), event.payload.git_ref.as_deref()) {
                (Some("repository"), _) => lines.push(format!("- Created new repo: {repo}")),
                (Some("branch"), Some(r)) if !r.is_empty() => {
                    lines.push(format!("- Created branch '{r}' in {repo}"))
                }
                _ => {}
            },
            _ => {}
        }
    }

    if lines.is_empty() {
        "RECENT GITHUB ACTIVITY: No recent public commits found.".to_string()
    } else {
        format!(
            "RECENT GITHUB ACTIVITY (Pranav's own commits):\n{}",
            lines.join("\n")
        )
    }
}

fn commit_subject(message: &str) -> String {
    message
        .lines()
        .next()
        .unwrap_or("")
        .chars()
        .take(COMMIT_SUBJECT_CHARS)
        .collect()
}

// ── GitHub source ─────────────────────────────────────────────────────────

/// Fetches repositories and public events for one GitHub account.
pub struct GithubActivity {
    api_root: String,
    username: String,
    token: Option<String>,
    author_fragments: Vec<String>,
    client: reqwest::Client,
}

impl GithubActivity {
    /// Build from configuration. `None` when no username is configured.
    ///
    /// The username is always an author fragment; `extra_fragments` add the
    /// owner's display-name parts.
    pub fn from_config(config: &GithubConfig, extra_fragments: &[&str]) -> Option<Self> {
        let username = config.username.clone()?;
        Some(Self::new(GITHUB_API, username, config.token.clone(), extra_fragments))
    }

    pub fn new(
        api_root: impl Into<String>,
        username: impl Into<String>,
        token: Option<String>,
        extra_fragments: &[&str],
    ) -> Self {
        let username = username.into();
        let mut author_fragments = vec![username.to_lowercase()];
        author_fragments.extend(extra_fragments.iter().map(|f| f.to_lowercase()));

        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            api_root: api_root.into().trim_end_matches('/').to_string(),
            username,
            token,
            author_fragments,
            client,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Option<T> {
        let url = format!("{}{}", self.api_root, path);
        let mut request = self
            .client
            .get(&url)
            .query(query)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(url = %url, error = %e, "GitHub fetch failed");
                return None;
            }
        };

        if response.status() != reqwest::StatusCode::OK {
            warn!(url = %url, status = response.status().as_u16(), "GitHub returned non-200");
            return None;
        }

        match response.json::<T>().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(url = %url, error = %e, "GitHub response did not parse");
                None
            }
        }
    }
}

#[async_trait]
impl ActivitySource for GithubActivity {
    async fn summary(&self) -> String {
        let repos_path = format!("/users/{}/repos", self.username);
        let events_path = format!("/users/{}/events/public", self.username);

        let (repos, events) = tokio::join!(
            self.get_json::<Vec<Repo>>(&repos_path, &[("sort", "updated"), ("per_page", PAGE_SIZE)]),
            self.get_json::<Vec<Event>>(&events_path, &[("per_page", PAGE_SIZE)]),
        );

        let mut parts = Vec::new();
        if let Some(repos) = repos {
            parts.push(summarize_repos(&repos));
        }
        if let Some(events) = events {
            parts.push(summarize_events(&events, &self.author_fragments));
        }

        debug!(sections = parts.len(), "GitHub activity assembled");
        parts.join("\n\n")
    }
}
