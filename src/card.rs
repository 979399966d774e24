use chrono::{DateTime, Local, Utc};
use std::fmt::Write;

use crate::health::{self, HealthScore, MAX_SCORE};
use crate::probe::{ProbeOutcome, ProbeState};
use crate::types::GitHubRepo;

const PLACEHOLDER: &str = "—";
const BAR_WIDTH: u32 = 20;

/// One rendered search result plus the state of its probe button.
#[derive(Debug, Clone)]
pub struct Card {
    pub repo: GitHubRepo,
    pub probe: ProbeState,
}

impl Card {
    pub fn new(repo: GitHubRepo) -> Self {
        Self {
            repo,
            probe: ProbeState::Idle,
        }
    }

    pub fn health(&self, now: DateTime<Utc>) -> HealthScore {
        health::compute(self.repo.stargazers_count, self.repo.pushed_at(), now)
    }

    /// Press the probe button. Returns `false` if it is disabled.
    pub fn begin_probe(&mut self) -> bool {
        if !self.probe.is_enabled() {
            return false;
        }
        self.probe = ProbeState::Checking;
        true
    }

    pub fn finish_probe(&mut self, outcome: ProbeOutcome) {
        self.probe = ProbeState::Done(outcome);
    }

    /// Multi-line text block; `position` is the 1-based number users type
    /// to address this card.
    pub fn render(&self, position: usize, now: DateTime<Utc>) -> String {
        let repo = &self.repo;
        let mut out = String::new();

        let _ = writeln!(out, "{}. {}  <{}>", position, repo.full_name, repo.html_url);
        let _ = writeln!(
            out,
            "   {}",
            repo.description
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or(PLACEHOLDER)
        );
        let _ = writeln!(
            out,
            "   ★ {}  🍴 {}  Issues: {}  Last push: {}",
            repo.stargazers_count,
            repo.forks_count,
            repo.open_issues_count,
            format_date(repo.pushed_at())
        );

        let health = self.health(now);
        let _ = writeln!(out, "   Health: {} {} {}", health_bar(health.score), health.score, health.label);

        let button = if self.probe.is_enabled() {
            format!("[{}]", self.probe.label())
        } else {
            format!("({})", self.probe.label())
        };
        let _ = writeln!(out, "   {}  View issues: {}", button, repo.issues_url());
        out
    }
}

/// Last push date in the local time zone.
pub fn format_date(pushed_at: Option<DateTime<Utc>>) -> String {
    match pushed_at {
        Some(ts) => ts.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn health_bar(score: u32) -> String {
    let filled = (score.min(MAX_SCORE) * BAR_WIDTH + MAX_SCORE / 2) / MAX_SCORE;
    format!(
        "[{}{}]",
        "#".repeat(filled as usize),
        ".".repeat((BAR_WIDTH - filled) as usize)
    )
}
