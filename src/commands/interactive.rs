use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::client::GitHubClient;
use crate::query::parse_min_stars;
use crate::session::Session;

/// One line typed at the session prompt.
#[derive(Parser, Debug)]
#[command(
    name = "gitscout",
    no_binary_name = true,
    disable_version_flag = true,
    disable_help_flag = true,
    help_template = "Commands:\n{subcommands}"
)]
struct Line {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Action {
    /// Set the keyword field (empty to clear)
    #[command(visible_alias = "kw")]
    Keyword {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Set the language field (empty to clear)
    Lang {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        language: Vec<String>,
    },
    /// Set the minimum stars field
    Stars { value: Option<String> },
    /// Set the personal access token (empty to clear)
    Token { value: Option<String> },
    /// Run the search from page 1
    #[command(visible_alias = "go")]
    Search,
    /// Next page of results
    Next,
    /// Previous page of results
    Prev,
    /// Check good first issues for result N
    Probe { position: usize },
    /// Open result N in the browser
    Open { position: usize },
    /// Open the issue list of result N in the browser
    Issues { position: usize },
    /// Print the current results again
    Show,
    /// Reset every field and the results
    Clear,
    /// Leave the session
    #[command(visible_alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

fn parse_line(line: &str) -> Result<Option<Action>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    Line::try_parse_from(words).map(|parsed| Some(parsed.action))
}

fn prompt() {
    print!("gitscout> ");
    let _ = std::io::stdout().flush();
}

fn print_session(session: &Session) {
    println!("{}", session.render(Utc::now()));
}

fn open_in_browser(url: &str) {
    match open::that(url) {
        Ok(()) => println!("Opened {}", url),
        Err(err) => {
            tracing::warn!(%url, error = ?err, "failed to launch browser");
            println!("Couldn't open a browser, the link is {}", url);
        }
    }
}

async fn handle(session: &mut Session, action: Action) -> Flow {
    match action {
        Action::Keyword { text } => {
            session.keyword = text.join(" ");
            println!("Keyword: {}", session.keyword);
        }
        Action::Lang { language } => {
            session.language = language.join(" ");
            println!("Language: {}", session.language);
        }
        Action::Stars { value } => {
            session.min_stars = parse_min_stars(value.as_deref().unwrap_or_default());
            println!("Minimum stars: {}", session.min_stars);
        }
        Action::Token { value } => {
            session.client().token().set(value.as_deref().unwrap_or_default());
            match session.client().token().current() {
                Some(_) => println!("Token set."),
                None => println!("Token cleared."),
            }
        }
        Action::Search => {
            println!("Searching… (page 1)");
            session.submit().await;
            print_session(session);
        }
        Action::Next => {
            let page = session.pager().page + 1;
            if session.pager().next_enabled {
                println!("Searching… (page {})", page);
            }
            match session.next_page().await {
                Ok(()) => print_session(session),
                Err(refused) => println!("{}", refused),
            }
        }
        Action::Prev => {
            let page = session.pager().page.saturating_sub(1);
            if session.pager().prev_enabled {
                println!("Searching… (page {})", page);
            }
            match session.prev_page().await {
                Ok(()) => print_session(session),
                Err(refused) => println!("{}", refused),
            }
        }
        Action::Probe { position } => match session.start_probe(position) {
            Ok(()) => {
                if let Ok(card) = session.card(position) {
                    println!("{}. {}  {}", position, card.repo.full_name, card.probe.label());
                }
            }
            Err(refused) => println!("{}", refused),
        },
        Action::Open { position } => match session.card(position) {
            Ok(card) => open_in_browser(&card.repo.html_url),
            Err(refused) => println!("{}", refused),
        },
        Action::Issues { position } => match session.card(position) {
            Ok(card) => open_in_browser(&card.repo.issues_url()),
            Err(refused) => println!("{}", refused),
        },
        Action::Show => print_session(session),
        Action::Clear => {
            session.clear();
            print_session(session);
        }
        Action::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Interactive session. Searches run in the foreground; probes run as
/// background tasks and their results are printed as they come in.
pub async fn run_session(client: GitHubClient) -> anyhow::Result<()> {
    let (mut session, mut probes) = Session::new(client);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("gitscout {}: type `help` for commands.", env!("CARGO_PKG_VERSION"));
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    println!();
                    break;
                };
                match parse_line(&line) {
                    Ok(Some(action)) => {
                        if let Flow::Quit = handle(&mut session, action).await {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(err) => println!("{}", err.render()),
                }
                prompt();
            }
            Some(event) = probes.recv() => {
                if let Some((position, card)) = session.finish_probe(event) {
                    println!("\n{}. {}  {}", position, card.repo.full_name, card.probe.label());
                    prompt();
                }
            }
        }
    }

    Ok(())
}
