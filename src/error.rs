use thiserror::Error;

/// Failures talking to the GitHub search endpoints.
#[derive(Debug, Error)]
pub enum SearchError {
    /// GitHub answered with a non-success status. The body is kept for logs
    /// and never shown in the status line.
    #[error("GitHub error: {status} — {reason}")]
    Upstream {
        status: u16,
        reason: String,
        body: String,
    },

    /// The request never produced a usable response (DNS, connection,
    /// malformed JSON, ...).
    #[error("Network error, check logs.")]
    Transport(#[from] reqwest::Error),
}

impl SearchError {
    pub fn upstream(status: reqwest::StatusCode, body: String) -> Self {
        Self::Upstream {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        }
    }

    /// Record the details that the status line leaves out.
    pub fn log(&self) {
        match self {
            Self::Upstream { status, body, .. } => {
                tracing::error!(status, %body, "GitHub rejected search");
            }
            Self::Transport(source) => {
                tracing::error!(error = ?source, "search request failed");
            }
        }
    }
}

/// Session actions refused because the matching control is disabled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("There is no result #{0} on this page.")]
    NoSuchCard(usize),

    #[error("Result #{0} is already checking.")]
    ProbeInFlight(usize),

    #[error("Already on the first page.")]
    PrevDisabled,

    #[error("No further results.")]
    NextDisabled,
}
