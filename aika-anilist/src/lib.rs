/// GraphQL client for the AniList API.
pub mod client;
/// Response models for AniList queries.
pub mod model;
/// GraphQL query documents.
pub mod query;

pub use client::{ANILIST_ENDPOINT, AniListClient, MediaKind};
