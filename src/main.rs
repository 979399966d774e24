mod card;
mod client;
mod commands;
mod config;
mod error;
mod health;
mod logging;
mod probe;
mod query;
mod session;
mod types;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use clap_complete::Shell;

use crate::client::GitHubClient;
use crate::config::{Settings, TokenSource, DEFAULT_API_URL};
use crate::query::{parse_min_stars, SearchFilters};

#[derive(Parser)]
#[command(name = "gitscout")]
#[command(about = "Search GitHub repositories, score their health, find good first issues", long_about = None)]
#[command(version)]
struct Cli {
    /// Personal access token sent with every request (never stored)
    #[arg(long, global = true)]
    token: Option<String>,
    /// GitHub API base URL
    #[arg(long, global = true, default_value = DEFAULT_API_URL, value_hint = ValueHint::Url)]
    api_url: String,
    /// Log more (repeat for even more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single search and print one page of results
    #[command(short_flag = 's', visible_alias = "find")]
    Search {
        /// Free-text keywords
        keyword: Vec<String>,
        /// Restrict to a language (e.g. rust)
        #[arg(long, short = 'l')]
        lang: Option<String>,
        /// Minimum number of stars
        #[arg(long, default_value = "0")]
        stars: String,
        /// Page of results to show
        #[arg(long, short = 'p', default_value_t = 1)]
        page: u32,
        /// Also count good first issues for every result
        #[arg(long)]
        probe: bool,
    },
    /// Start an interactive session (the default)
    #[command(short_flag = 'i')]
    Interactive,
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::install(cli.verbose)?;

    let settings = Settings::new(&cli.api_url);
    let client = GitHubClient::new(settings, TokenSource::new(cli.token))?;

    match cli.command {
        None | Some(Commands::Interactive) => commands::run_session(client).await,
        Some(Commands::Search {
            keyword,
            lang,
            stars,
            page,
            probe,
        }) => {
            let filters = SearchFilters::new(
                &keyword.join(" "),
                lang.as_deref().unwrap_or_default(),
                parse_min_stars(&stars),
            );
            commands::search_repos(&client, &filters, page, probe).await
        }
        Some(Commands::Completions { shell }) => {
            commands::generate_completions(shell);
            Ok(())
        }
    }
}
