//! MyAnimeList client: the v2 API for search and forum topics, and the
//! rendered site for episode listings.

mod client;
mod error;
mod types;

pub use client::MalClient;
pub use error::MalError;
pub use types::{ForumTopicResponse, MalAlternativeTitles, MalAnimeNode, MalSearchResponse};
