//! HTTP endpoints for the local OAuth callback server.
//!
//! The server only exists while `spobakcli auth` is waiting for the user's
//! browser to come back from Spotify:
//!
//! - [`callback`] - completes the PKCE flow by exchanging the authorization
//!   code for an access token.
//! - [`health`] - returns application status and version, mainly useful to
//!   verify the configured `SERVER_ADDRESS` actually binds.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
