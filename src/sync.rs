//! Incremental playlist synchronization.
//!
//! One sync pass walks the live upstream playlist list in API order and
//! reconciles it against the persisted manifest:
//!
//! - unchanged snapshot id: the playlist is skipped without re-fetching
//!   its tracks,
//! - changed or unknown snapshot id: tracks are fetched, the export files
//!   rewritten and the manifest entry committed immediately,
//! - manifest entries not visited by the walk belonged to playlists that
//!   no longer exist upstream; with orphan deletion enabled their export
//!   files and entries are removed, otherwise they are left untouched.
//!
//! The manifest is persisted after every individual mutation, so an
//! aborted pass leaves it consistent with the exports actually written and
//! the next pass resumes from there. A failure on one playlist therefore
//! never corrupts the manifest state of another.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::{
    collate::{FieldPath, collate},
    error::BackupError,
    export, info,
    management::ManifestManager,
    spotify::fetch::{PageFetcher, ResponseShape, fetch_all},
    store::FileStore,
    types::{ManifestEntry, PlaylistDetail, PlaylistSummary},
    utils::{self, OutputFormats},
    warning,
};

/// Aggregate file listing all current playlists in upstream order.
pub const PLAYLIST_SUMMARY_FILE: &str = "playlists.json";

pub struct SyncOptions {
    /// Endpoint returning the user's playlist summaries (`/me/playlists`).
    pub playlists_url: String,
    pub formats: OutputFormats,
    pub delete_orphans: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub exported: usize,
    pub skipped: usize,
    pub deleted: usize,
}

enum Outcome {
    Skipped,
    Exported,
}

/// Runs one full sync pass against a sync target folder.
///
/// Fatal errors (auth, store, serialization) abort the pass immediately;
/// transport and shape errors scoped to a single playlist are logged and
/// the walk continues with the next one.
pub async fn sync_playlists<F: PageFetcher, S: FileStore>(
    fetcher: &mut F,
    store: &S,
    folder: &str,
    options: &SyncOptions,
) -> Result<SyncReport, BackupError> {
    store.find_or_create_folder(folder).await?;

    let items_path = FieldPath::new("items")?;

    // Live upstream playlist list, metadata only
    let pages = fetch_all(fetcher, &options.playlists_url, ResponseShape::Bare).await?;
    let summaries = collate(&items_path, &pages, false)?;

    let mut manifest = ManifestManager::load(store, folder).await?;

    // Keys not confirmed live by the end of the walk are orphans
    let mut kill_set: BTreeSet<String> = manifest.keys().into_iter().collect();

    // Aggregate listing, in upstream order
    let listing = serde_json::to_string_pretty(&Value::Array(summaries.clone()))?;
    store
        .update_or_create_file(folder, PLAYLIST_SUMMARY_FILE, &listing)
        .await?;

    let mut report = SyncReport::default();

    for record in &summaries {
        match sync_one(
            fetcher, store, folder, &items_path, &mut manifest, &mut kill_set, record, options,
        )
        .await
        {
            Ok(Outcome::Skipped) => report.skipped += 1,
            Ok(Outcome::Exported) => report.exported += 1,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => warning!("Skipping playlist: {}", e),
        }
    }

    if options.delete_orphans {
        for key in kill_set {
            export::delete_playlist(store, folder, &key, &options.formats).await?;
            manifest.remove(&key);
            manifest.persist().await?;
            report.deleted += 1;
            info!("Deleted orphaned export: {}", key);
        }
    }

    Ok(report)
}

#[allow(clippy::too_many_arguments)]
async fn sync_one<F: PageFetcher, S: FileStore>(
    fetcher: &mut F,
    store: &S,
    folder: &str,
    items_path: &FieldPath,
    manifest: &mut ManifestManager<'_, S>,
    kill_set: &mut BTreeSet<String>,
    record: &Value,
    options: &SyncOptions,
) -> Result<Outcome, BackupError> {
    let summary: PlaylistSummary = serde_json::from_value(record.clone())
        .map_err(|e| BackupError::Malformed(format!("playlist record: {}", e)))?;
    let key = utils::export_key(&summary.name, &summary.id);

    if let Some(entry) = manifest.get(&key) {
        if entry.snapshot_id == summary.snapshot_id {
            kill_set.remove(&key);
            return Ok(Outcome::Skipped);
        }
    }

    // Snapshot changed or playlist unknown: materialize the track list
    let tracks_url = utils::with_param(&summary.tracks.href, "limit=50");
    let pages = fetch_all(fetcher, &tracks_url, ResponseShape::Bare).await?;
    let tracks = collate(items_path, &pages, true)?;

    let entry = ManifestEntry {
        id: summary.id.clone(),
        name: summary.name.clone(),
        snapshot_id: summary.snapshot_id.clone(),
    };
    let detail = PlaylistDetail {
        raw: record.clone(),
        summary,
        tracks,
    };

    export::write_playlist(store, folder, &detail, &options.formats).await?;

    // Commit this playlist's manifest state before moving on
    manifest.upsert(key.clone(), entry);
    manifest.persist().await?;
    kill_set.remove(&key);

    info!("Exported playlist: {}", detail.summary.name);
    Ok(Outcome::Exported)
}
