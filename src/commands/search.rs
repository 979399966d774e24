use anyhow::Context;
use chrono::Utc;
use tokio::task::JoinSet;

use crate::card::Card;
use crate::client::GitHubClient;
use crate::probe::{self, ProbeState};
use crate::query::SearchFilters;
use crate::session::results_status;

/// One-shot search: print a single page of cards and optionally probe
/// every card for good first issues, printing each count as it arrives.
pub async fn search_repos(
    client: &GitHubClient,
    filters: &SearchFilters,
    page: u32,
    probe_all: bool,
) -> anyhow::Result<()> {
    let page = page.max(1);
    tracing::info!(query = %filters.query(), page, "searching repositories");

    let response = match client.search_repositories(filters, page).await {
        Ok(response) => response,
        Err(err) => {
            err.log();
            return Err(err.into());
        }
    };

    if response.items.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    let shown = response.items.len();
    println!("{}\n", results_status(shown, response.total_count));

    let now = Utc::now();
    let cards: Vec<Card> = response.items.into_iter().map(Card::new).collect();
    for (index, card) in cards.iter().enumerate() {
        println!("{}", card.render(index + 1, now));
    }

    if shown >= client.settings().page_size as usize {
        println!("More results: --page {}", page + 1);
    }

    if !probe_all {
        return Ok(());
    }

    println!("\nChecking good first issues…");
    let mut probes = JoinSet::new();
    for (index, card) in cards.iter().enumerate() {
        let client = client.clone();
        let full_name = card.repo.full_name.clone();
        probes.spawn(async move {
            let outcome = probe::good_first_issues(&client, &full_name).await;
            (index, full_name, outcome)
        });
    }

    // Printed in completion order, not card order.
    while let Some(joined) = probes.join_next().await {
        let (index, full_name, outcome) = joined.context("Probe task did not finish")?;
        println!("  {}. {}  {}", index + 1, full_name, ProbeState::Done(outcome).label());
    }

    Ok(())
}
