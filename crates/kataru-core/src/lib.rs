//! Core logic for resolving an anime title and episode number to its
//! MyAnimeList forum discussion thread.

pub mod alias;
pub mod config;
pub mod episode;
pub mod error;
pub mod pipeline;
pub mod resolver;
pub mod score;
pub mod traits;
