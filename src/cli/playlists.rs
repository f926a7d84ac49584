use tabled::Table;

use crate::{
    config, error, info,
    management::ManifestManager,
    store::LocalStore,
    success,
    sync::{self, SyncOptions},
    types::ManifestTableRow,
    utils::OutputFormats,
};

/// Folder under the backup root holding playlist exports and the manifest.
pub const PLAYLISTS_FOLDER: &str = "playlists";

/// Runs an incremental playlist sync pass.
///
/// Format and orphan-deletion settings come from the command line when
/// given, otherwise from the environment configuration.
pub async fn sync_playlists(formats: Option<OutputFormats>, delete_orphans: bool) {
    let formats = formats.unwrap_or_else(config::output_formats);
    let delete_orphans = delete_orphans || config::delete_orphans();

    let mut fetcher = super::spotify_fetcher().await;
    let store = LocalStore::new(config::backup_dir());

    let options = SyncOptions {
        playlists_url: format!("{}/me/playlists?limit=50", config::spotify_apiurl()),
        formats,
        delete_orphans,
    };

    info!("Syncing playlists...");
    match sync::sync_playlists(&mut fetcher, &store, PLAYLISTS_FOLDER, &options).await {
        Ok(report) => success!(
            "Playlists synced: {} exported, {} skipped, {} deleted.",
            report.exported,
            report.skipped,
            report.deleted
        ),
        Err(e) => error!("Playlist sync failed: {}", e),
    }
}

/// Prints the current playlist export manifest as a table.
pub async fn list_playlists() {
    let store = LocalStore::new(config::backup_dir());

    let manifest = match ManifestManager::load(&store, PLAYLISTS_FOLDER).await {
        Ok(manifest) => manifest,
        Err(e) => error!("Failed to load playlist manifest: {}", e),
    };

    if manifest.is_empty() {
        info!("No playlists have been exported yet.");
        return;
    }

    let rows: Vec<ManifestTableRow> = manifest
        .entries()
        .values()
        .map(|entry| ManifestTableRow {
            name: entry.name.clone(),
            id: entry.id.clone(),
            snapshot: entry.snapshot_id.clone(),
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}
