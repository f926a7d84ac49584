use crate::{
    error::BackupError,
    store::FileStore,
    types::{Manifest, ManifestEntry},
};

/// Name of the manifest file inside a sync target folder.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Persistent mapping of export-key to last-seen playlist snapshot, one
/// file per sync target.
///
/// The store only supports whole-file writes, so callers persist after
/// every individual entry mutation; a crash mid-pass then leaves the
/// manifest consistent with whatever exports were actually written.
pub struct ManifestManager<'a, S: FileStore> {
    store: &'a S,
    folder: String,
    manifest: Manifest,
}

impl<'a, S: FileStore> ManifestManager<'a, S> {
    /// Loads the manifest for a sync target, returning an empty mapping
    /// when no manifest file exists yet.
    pub async fn load(store: &'a S, folder: &str) -> Result<Self, BackupError> {
        let manifest = match store.read_file(folder, MANIFEST_FILE).await? {
            Some(content) => serde_json::from_str(&content)?,
            None => Manifest::new(),
        };

        Ok(Self {
            store,
            folder: folder.to_string(),
            manifest,
        })
    }

    /// Writes the full serialized mapping back to the manifest file.
    pub async fn persist(&self) -> Result<(), BackupError> {
        let json = serde_json::to_string_pretty(&self.manifest)?;
        self.store
            .update_or_create_file(&self.folder, MANIFEST_FILE, &json)
            .await?;
        Ok(())
    }

    pub fn get(&self, export_key: &str) -> Option<&ManifestEntry> {
        self.manifest.get(export_key)
    }

    pub fn upsert(&mut self, export_key: String, entry: ManifestEntry) {
        self.manifest.insert(export_key, entry);
    }

    pub fn remove(&mut self, export_key: &str) {
        self.manifest.remove(export_key);
    }

    pub fn keys(&self) -> Vec<String> {
        self.manifest.keys().cloned().collect()
    }

    pub fn entries(&self) -> &Manifest {
        &self.manifest
    }

    pub fn len(&self) -> usize {
        self.manifest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifest.is_empty()
    }
}
