//! Spotify Backup CLI Library
//!
//! This library provides functionality for backing up a Spotify user's
//! library data (profile, followed artists, saved items, playlists) to a
//! local backup store, including incremental playlist synchronization
//! driven by Spotify's snapshot identifiers.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `collate` - Flattening of paginated responses into record sequences
//! - `config` - Configuration management and environment variables
//! - `error` - The crate-wide error taxonomy
//! - `export` - Playlist rendering (raw JSON, CSV, XSPF) and file output
//! - `management` - Token and playlist manifest persistence
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `store` - Backup file store abstraction and local implementation
//! - `sync` - Incremental playlist sync reconciler
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod cli;
pub mod collate;
pub mod config;
pub mod error;
pub mod export;
pub mod management;
pub mod server;
pub mod spotify;
pub mod store;
pub mod sync;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Should only be used for fatal
/// errors where recovery is not possible.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program
/// termination.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
