//! In-memory state of one search session: the input fields, the current
//! page of cards, the status line and the pagination controls.

use chrono::{DateTime, Utc};
use std::fmt::Write;
use tokio::sync::mpsc;

use crate::card::Card;
use crate::client::GitHubClient;
use crate::error::SessionError;
use crate::probe::{self, ProbeOutcome};
use crate::query::SearchFilters;
use crate::types::GitHubSearchResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 1,
            prev_enabled: false,
            next_enabled: false,
        }
    }
}

/// A finished probe, addressed to the card it was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeEvent {
    pub generation: u64,
    pub index: usize,
    pub outcome: ProbeOutcome,
}

pub fn results_status(shown: usize, total: u64) -> String {
    format!("Showing {} results (approx {})", shown, total)
}

pub struct Session {
    client: GitHubClient,
    pub keyword: String,
    pub language: String,
    pub min_stars: u64,
    pager: Pager,
    status: String,
    cards: Vec<Card>,
    /// Bumped whenever the result set is replaced.
    generation: u64,
    probe_tx: mpsc::UnboundedSender<ProbeEvent>,
}

impl Session {
    pub fn new(client: GitHubClient) -> (Self, mpsc::UnboundedReceiver<ProbeEvent>) {
        let (probe_tx, probe_rx) = mpsc::unbounded_channel();
        let session = Self {
            client,
            keyword: String::new(),
            language: String::new(),
            min_stars: 0,
            pager: Pager::default(),
            status: String::new(),
            cards: Vec::new(),
            generation: 0,
            probe_tx,
        };
        (session, probe_rx)
    }

    pub fn client(&self) -> &GitHubClient {
        &self.client
    }

    pub fn pager(&self) -> Pager {
        self.pager
    }

    #[cfg(test)]
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn filters(&self) -> SearchFilters {
        SearchFilters::new(&self.keyword, &self.language, self.min_stars)
    }

    /// Submit button: always starts over from page 1.
    pub async fn submit(&mut self) {
        self.search_page(1).await;
    }

    pub async fn search_page(&mut self, page: u32) {
        self.pager.page = page.max(1);
        self.run_search().await;
    }

    pub async fn next_page(&mut self) -> Result<(), SessionError> {
        if !self.pager.next_enabled {
            return Err(SessionError::NextDisabled);
        }
        self.pager.page += 1;
        self.run_search().await;
        Ok(())
    }

    pub async fn prev_page(&mut self) -> Result<(), SessionError> {
        if !self.pager.prev_enabled || self.pager.page <= 1 {
            return Err(SessionError::PrevDisabled);
        }
        self.pager.page -= 1;
        self.run_search().await;
        Ok(())
    }

    async fn run_search(&mut self) {
        let filters = self.filters();
        let page = self.pager.page;

        self.status = format!("Searching… (page {})", page);
        self.replace_cards(Vec::new());
        tracing::info!(query = %filters.query(), page, "searching repositories");

        match self.client.search_repositories(&filters, page).await {
            Ok(response) => self.show_results(response),
            Err(err) => {
                err.log();
                self.status = err.to_string();
            }
        }
    }

    fn show_results(&mut self, response: GitHubSearchResponse) {
        self.pager.prev_enabled = self.pager.page > 1;

        if response.items.is_empty() {
            self.status = "No results found.".to_string();
            self.pager.next_enabled = false;
            return;
        }

        let shown = response.items.len();
        self.status = results_status(shown, response.total_count);
        self.pager.next_enabled = shown >= self.client.settings().page_size as usize;
        self.replace_cards(response.items.into_iter().map(Card::new).collect());
    }

    fn replace_cards(&mut self, cards: Vec<Card>) {
        self.generation += 1;
        self.cards = cards;
    }

    /// Clear button: empties every field, the token and the results.
    pub fn clear(&mut self) {
        self.keyword.clear();
        self.language.clear();
        self.min_stars = 0;
        self.client.token().clear();
        self.replace_cards(Vec::new());
        self.pager = Pager::default();
        self.status = "Cleared.".to_string();
    }

    fn card_index(&self, position: usize) -> Result<usize, SessionError> {
        if position == 0 || position > self.cards.len() {
            return Err(SessionError::NoSuchCard(position));
        }
        Ok(position - 1)
    }

    pub fn card(&self, position: usize) -> Result<&Card, SessionError> {
        let index = self.card_index(position)?;
        Ok(&self.cards[index])
    }

    /// Press a card's probe button. The lookup runs as its own task and
    /// reports back through the receiver returned by [`Session::new`].
    pub fn start_probe(&mut self, position: usize) -> Result<(), SessionError> {
        let index = self.card_index(position)?;
        let card = &mut self.cards[index];
        if !card.begin_probe() {
            return Err(SessionError::ProbeInFlight(position));
        }

        let client = self.client.clone();
        let full_name = card.repo.full_name.clone();
        let generation = self.generation;
        let tx = self.probe_tx.clone();

        tokio::spawn(async move {
            let outcome = probe::good_first_issues(&client, &full_name).await;
            // The session may already be gone on shutdown.
            let _ = tx.send(ProbeEvent {
                generation,
                index,
                outcome,
            });
        });
        Ok(())
    }

    /// Apply a finished probe. Results for cards that have since been
    /// replaced are dropped and `None` is returned.
    pub fn finish_probe(&mut self, event: ProbeEvent) -> Option<(usize, &Card)> {
        if event.generation != self.generation {
            tracing::debug!(?event, "dropping probe result for replaced results");
            return None;
        }
        let card = self.cards.get_mut(event.index)?;
        card.finish_probe(event.outcome);
        Some((event.index + 1, &*card))
    }

    pub fn render(&self, now: DateTime<Utc>) -> String {
        let mut out = String::new();
        if !self.status.is_empty() {
            let _ = writeln!(out, "{}\n", self.status);
        }
        for (index, card) in self.cards().iter().enumerate() {
            let _ = writeln!(out, "{}", card.render(index + 1, now));
        }
        out.push_str(&self.render_controls());
        out
    }

    pub fn render_controls(&self) -> String {
        let prev = if self.pager.prev_enabled { "[« prev]" } else { "(« prev)" };
        let next = if self.pager.next_enabled { "[next »]" } else { "(next »)" };
        format!("{}  page {}  {}\n", prev, self.pager.page, next)
    }
}
