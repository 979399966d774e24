pub mod interactive;
pub mod misc;
pub mod search;

pub use interactive::run_session;
pub use misc::generate_completions;
pub use search::search_repos;
