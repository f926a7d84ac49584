//! Spotify Web API integration.
//!
//! Two concerns live here:
//!
//! - [`auth`] - the OAuth 2.0 PKCE flow: verifier/challenge generation,
//!   browser hand-off, local callback handling and token exchange/refresh.
//! - [`fetch`] - the paginator: a [`fetch::PageFetcher`] seam over plain
//!   authenticated GETs, plus cursor-following across `next` URLs with
//!   per-endpoint envelope handling.
//!
//! No retry policy is implemented at this layer; transport failures
//! propagate to the caller, which decides whether to abort the pass.

pub mod auth;
pub mod fetch;
