use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::{Settings, TokenSource};
use crate::error::SearchError;
use crate::query::SearchFilters;
use crate::types::{GitHubSearchResponse, IssueCountResponse};

pub const GOOD_FIRST_ISSUE_LABEL: &str = "good first issue";

/// Thin wrapper over the two search endpoints the tool uses.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    settings: Settings,
    token: TokenSource,
}

impl GitHubClient {
    pub fn new(settings: Settings, token: TokenSource) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let http = Client::builder()
            .user_agent(settings.user_agent.clone())
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, settings, token })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn token(&self) -> &TokenSource {
        &self.token
    }

    pub fn search_url(&self, filters: &SearchFilters, page: u32) -> String {
        format!(
            "{}/search/repositories?q={}&sort=best-match&order=desc&per_page={}&page={}",
            self.settings.api_url,
            filters.encoded(),
            self.settings.page_size,
            page
        )
    }

    pub fn good_first_issues_url(&self, full_name: &str) -> String {
        let query = format!(
            "repo:{} label:\"{}\" state:open",
            full_name, GOOD_FIRST_ISSUE_LABEL
        );
        format!(
            "{}/search/issues?q={}&per_page=1",
            self.settings.api_url,
            urlencoding::encode(&query)
        )
    }

    /// Token is looked up here, at send time, not when the client was built.
    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.http.get(url);
        match self.token.current() {
            Some(token) => request.header(AUTHORIZATION, format!("token {}", token)),
            None => request,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, SearchError> {
        tracing::debug!(%url, "sending request");
        let response: Response = self.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::upstream(status, body));
        }

        Ok(response.json::<T>().await?)
    }

    /// One page of `/search/repositories`, best match first.
    pub async fn search_repositories(
        &self,
        filters: &SearchFilters,
        page: u32,
    ) -> Result<GitHubSearchResponse, SearchError> {
        let url = self.search_url(filters, page);
        self.fetch(&url).await
    }

    /// Number of open issues labelled "good first issue" in `full_name`.
    pub async fn count_good_first_issues(&self, full_name: &str) -> Result<u64, SearchError> {
        let url = self.good_first_issues_url(full_name);
        let counted: IssueCountResponse = self.fetch(&url).await?;
        Ok(counted.total_count)
    }
}
