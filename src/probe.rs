//! On-demand "good first issues" lookup for a single repository.

use std::fmt;

use crate::client::GitHubClient;
use crate::error::SearchError;

/// Shown when GitHub rejected the probe.
pub const REJECTED_SENTINEL: &str = "error";
/// Shown when the probe request itself failed.
pub const FAILED_SENTINEL: &str = "err";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Count(u64),
    Rejected,
    Failed,
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Count(count) => write!(f, "{}", count),
            ProbeOutcome::Rejected => f.write_str(REJECTED_SENTINEL),
            ProbeOutcome::Failed => f.write_str(FAILED_SENTINEL),
        }
    }
}

/// The card's probe button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeState {
    #[default]
    Idle,
    Checking,
    Done(ProbeOutcome),
}

impl ProbeState {
    /// The button is disabled while its own request is in flight.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, ProbeState::Checking)
    }

    pub fn label(&self) -> String {
        match self {
            ProbeState::Idle => "Check good first issues".to_string(),
            ProbeState::Checking => "Checking…".to_string(),
            ProbeState::Done(outcome) => format!("Good first issues: {}", outcome),
        }
    }
}

/// Never fails: every error is folded into one of the two sentinels.
pub async fn good_first_issues(client: &GitHubClient, full_name: &str) -> ProbeOutcome {
    match client.count_good_first_issues(full_name).await {
        Ok(count) => ProbeOutcome::Count(count),
        Err(SearchError::Upstream { status, body, .. }) => {
            tracing::warn!(repo = full_name, status, %body, "good first issues lookup rejected");
            ProbeOutcome::Rejected
        }
        Err(err @ SearchError::Transport(_)) => {
            tracing::error!(repo = full_name, error = ?err, "good first issues lookup failed");
            ProbeOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Settings, TokenSource};
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn labels_follow_state() {
        assert_eq!(ProbeState::Idle.label(), "Check good first issues");
        assert_eq!(ProbeState::Checking.label(), "Checking…");
        assert_eq!(
            ProbeState::Done(ProbeOutcome::Count(7)).label(),
            "Good first issues: 7"
        );
        assert_eq!(
            ProbeState::Done(ProbeOutcome::Rejected).label(),
            "Good first issues: error"
        );
        assert_eq!(
            ProbeState::Done(ProbeOutcome::Failed).label(),
            "Good first issues: err"
        );
    }

    #[test]
    fn only_checking_is_disabled() {
        assert!(ProbeState::Idle.is_enabled());
        assert!(!ProbeState::Checking.is_enabled());
        assert!(ProbeState::Done(ProbeOutcome::Rejected).is_enabled());
    }

    #[test]
    fn count_from_total() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/search/issues")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({ "total_count": 12, "items": [] }).to_string())
            .create();

        let client = GitHubClient::new(Settings::new(&server.url()), TokenSource::default()).unwrap();
        let outcome = tokio_test::block_on(good_first_issues(&client, "octo/cat"));
        assert_eq!(outcome, ProbeOutcome::Count(12));
    }

    #[test]
    fn forbidden_maps_to_error_sentinel() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/search/issues")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body("{\"message\":\"API rate limit exceeded\"}")
            .create();

        let client = GitHubClient::new(Settings::new(&server.url()), TokenSource::default()).unwrap();
        let outcome = tokio_test::block_on(good_first_issues(&client, "octo/cat"));
        assert_eq!(outcome, ProbeOutcome::Rejected);
        assert_eq!(outcome.to_string(), "error");
    }

    #[test]
    fn broken_response_maps_to_err_sentinel() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/search/issues")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("total_count: twelve")
            .create();

        let client = GitHubClient::new(Settings::new(&server.url()), TokenSource::default()).unwrap();
        let outcome = tokio_test::block_on(good_first_issues(&client, "octo/cat"));
        assert_eq!(outcome, ProbeOutcome::Failed);
        assert_eq!(outcome.to_string(), "err");
    }
}
