use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

use crate::utils;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Playlist metadata as returned by `/me/playlists`. Recreated fresh on
/// every sync pass; only the derived [`ManifestEntry`] is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub snapshot_id: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owner: PlaylistOwner,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub tracks: TracksLink,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistOwner {
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksLink {
    pub href: String,
}

/// One entry of a playlist's track collection. `track` is `None` when the
/// upstream catalog has nulled the track out after deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    #[serde(default)]
    pub added_at: String,
    #[serde(default)]
    pub track: Option<TrackBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub track_number: u32,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: AlbumRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub name: String,
}

/// A playlist plus its fully materialized track list. Constructed only when
/// a re-export is triggered and consumed immediately by the exporter.
#[derive(Debug, Clone)]
pub struct PlaylistDetail {
    /// The raw playlist record as fetched, all fields intact.
    pub raw: Value,
    pub summary: PlaylistSummary,
    /// Collated raw track records in playlist order, nulls already dropped.
    pub tracks: Vec<Value>,
}

impl PlaylistDetail {
    pub fn export_key(&self) -> String {
        utils::export_key(&self.summary.name, &self.summary.id)
    }

    /// Typed view of the track records for CSV/XSPF rendering. Records that
    /// do not deserialize are skipped.
    pub fn typed_tracks(&self) -> Vec<PlaylistTrack> {
        self.tracks
            .iter()
            .filter_map(|t| serde_json::from_value(t.clone()).ok())
            .collect()
    }
}

/// Persisted record of one exported playlist, keyed by export key in the
/// [`Manifest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    pub name: String,
    pub snapshot_id: String,
}

/// Export-key to entry mapping, serialized as one JSON object per sync
/// target.
pub type Manifest = BTreeMap<String, ManifestEntry>;

#[derive(Tabled)]
pub struct ManifestTableRow {
    pub name: String,
    pub id: String,
    pub snapshot: String,
}
