//! # CLI Module
//!
//! User-facing command implementations for the Spotify backup CLI. Each
//! command coordinates the Spotify client, the backup store and the
//! manifest/token management layers, and presents progress and results
//! through the crate's logging macros.
//!
//! ## Commands
//!
//! - [`auth`] - OAuth 2.0 PKCE authentication flow
//! - [`profile`] - backs up the user profile (`/me`)
//! - [`following`] - backs up followed artists, sorted by name
//! - [`saved`] - backs up saved tracks, albums, shows and episodes
//! - [`sync_playlists`] - incremental playlist sync with orphan cleanup
//! - [`list_playlists`] - shows the current playlist export manifest
//!
//! Update-style commands fetch from the Spotify Web API and write through
//! the backup store; query-style commands read local state only. Errors
//! that make continuing pointless (missing token, store failures)
//! terminate the process via `error!`; per-resource problems surface as
//! warnings and leave the remaining resources to complete.

mod auth;
mod following;
mod playlists;
mod profile;
mod saved;

pub use auth::auth;
pub use following::following;
pub use playlists::list_playlists;
pub use playlists::sync_playlists;
pub use profile::profile;
pub use saved::saved;

use crate::{error, management::TokenManager, spotify::fetch::SpotifyFetcher};

/// Builds the authenticated page fetcher every backup command uses, or
/// exits with a hint to run `spobakcli auth` first.
pub(crate) async fn spotify_fetcher() -> SpotifyFetcher {
    match TokenManager::load().await {
        Ok(mgr) => SpotifyFetcher::new(mgr),
        Err(e) => {
            error!(
                "Failed to load token. Please run spobakcli auth\n Error: {}",
                e
            );
        }
    }
}
