//! Configuration management for the Spotify backup CLI.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. Configuration follows a
//! hierarchical approach:
//!
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use dotenv;

use crate::utils::OutputFormats;

/// Loads environment variables from a `.env` file in the local data
/// directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// variables from `spobakcli/.env` under the platform-specific local data
/// directory. A missing `.env` file is not an error; all settings may also
/// be supplied through the process environment.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spobakcli/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    // Settings may come from the plain environment instead
    let _ = dotenv::from_path(path);
    Ok(())
}

/// Returns the server address for the local OAuth callback server.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify API client ID for authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not
/// set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Spotify OAuth redirect URI. Must match the redirect URI
/// registered in the Spotify application settings.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the Spotify API scope permissions requested during OAuth
/// authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_SCOPE` environment variable is not set.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").expect("SPOTIFY_API_AUTH_SCOPE must be set")
}

/// Returns the Spotify OAuth authorization URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_URL` environment variable is not set.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").expect("SPOTIFY_API_AUTH_URL must be set")
}

/// Returns the Spotify Web API base URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the Spotify OAuth token exchange URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}

/// Returns the root directory of the backup store.
///
/// Reads `BACKUP_DIR`, falling back to `spobakcli/backup` under the
/// platform-specific local data directory.
pub fn backup_dir() -> PathBuf {
    match env::var("BACKUP_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push("spobakcli/backup");
            path
        }
    }
}

/// Returns the enabled output formats.
///
/// Reads `OUTPUT_FORMATS` as a comma-separated list (subset of
/// `raw,csv,xspf`), falling back to `raw` when unset or unparsable.
pub fn output_formats() -> OutputFormats {
    env::var("OUTPUT_FORMATS")
        .ok()
        .and_then(|v| crate::utils::parse_output_formats(&v).ok())
        .unwrap_or_default()
}

/// Whether playlist exports orphaned by upstream deletions should be
/// removed during a sync pass.
///
/// Reads `DELETE_ORPHANS`; anything other than `1`/`true`/`yes` leaves
/// orphaned exports untouched.
pub fn delete_orphans() -> bool {
    env::var("DELETE_ORPHANS")
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
