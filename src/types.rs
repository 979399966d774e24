use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One repository as returned by `/search/repositories`.
#[derive(Deserialize, Debug, Clone)]
pub struct GitHubRepo {
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    pub pushed_at: Option<String>,
}

impl GitHubRepo {
    /// Last push time, or `None` when absent or not valid RFC 3339.
    pub fn pushed_at(&self) -> Option<DateTime<Utc>> {
        self.pushed_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|ts| ts.with_timezone(&Utc))
    }

    pub fn issues_url(&self) -> String {
        format!("{}/issues", self.html_url)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct GitHubSearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<GitHubRepo>,
}

/// `/search/issues` response; only the count is read.
#[derive(Deserialize, Debug)]
pub struct IssueCountResponse {
    #[serde(default)]
    pub total_count: u64,
}
