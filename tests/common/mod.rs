#![allow(dead_code)]

use std::{
    collections::{BTreeSet, HashMap},
    sync::Mutex,
};

use serde_json::{Value, json};

use spobakcli::{error::BackupError, spotify::fetch::PageFetcher, store::FileStore};

/// In-memory [`FileStore`] with a log of the writes that actually happened.
/// Writes skipped because the content was unchanged do not appear in the log.
#[derive(Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<(String, String), String>>,
    folders: Mutex<BTreeSet<String>>,
    write_log: Mutex<Vec<(String, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, folder: &str, name: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert((folder.to_string(), name.to_string()), content.to_string());
    }

    pub fn get(&self, folder: &str, name: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(&(folder.to_string(), name.to_string()))
            .cloned()
    }

    pub fn has_file(&self, folder: &str, name: &str) -> bool {
        self.get(folder, name).is_some()
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.write_log.lock().unwrap().clone()
    }

    pub fn clear_write_log(&self) {
        self.write_log.lock().unwrap().clear();
    }
}

impl FileStore for MemoryStore {
    async fn find_or_create_folder(&self, name: &str) -> Result<(), BackupError> {
        self.folders.lock().unwrap().insert(name.to_string());
        Ok(())
    }

    async fn read_file(&self, folder: &str, name: &str) -> Result<Option<String>, BackupError> {
        Ok(self.get(folder, name))
    }

    async fn update_or_create_file(
        &self,
        folder: &str,
        name: &str,
        content: &str,
    ) -> Result<bool, BackupError> {
        let key = (folder.to_string(), name.to_string());
        let mut files = self.files.lock().unwrap();
        if files.get(&key).map(|existing| existing == content) == Some(true) {
            return Ok(false);
        }
        files.insert(key.clone(), content.to_string());
        self.write_log.lock().unwrap().push(key);
        Ok(true)
    }

    async fn trash_file(&self, folder: &str, name: &str) -> Result<(), BackupError> {
        self.files
            .lock()
            .unwrap()
            .remove(&(folder.to_string(), name.to_string()));
        Ok(())
    }
}

/// [`FileStore`] delegating to a [`MemoryStore`] until the Nth write
/// attempt, which fails with a store error. Reads and deletes always
/// succeed.
pub struct FlakyStore {
    pub inner: MemoryStore,
    fail_on: usize,
    attempts: Mutex<usize>,
}

impl FlakyStore {
    pub fn failing_on(fail_on: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_on,
            attempts: Mutex::new(0),
        }
    }
}

impl FileStore for FlakyStore {
    async fn find_or_create_folder(&self, name: &str) -> Result<(), BackupError> {
        self.inner.find_or_create_folder(name).await
    }

    async fn read_file(&self, folder: &str, name: &str) -> Result<Option<String>, BackupError> {
        self.inner.read_file(folder, name).await
    }

    async fn update_or_create_file(
        &self,
        folder: &str,
        name: &str,
        content: &str,
    ) -> Result<bool, BackupError> {
        {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            if *attempts == self.fail_on {
                return Err(BackupError::Store(std::io::Error::other("disk full")));
            }
        }
        self.inner.update_or_create_file(folder, name, content).await
    }

    async fn trash_file(&self, folder: &str, name: &str) -> Result<(), BackupError> {
        self.inner.trash_file(folder, name).await
    }
}

/// [`PageFetcher`] serving canned pages from a URL map, recording every
/// request. An unknown URL yields a malformed-response error.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Value>,
    pub calls: Vec<String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, page: Value) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    pub fn set_page(&mut self, url: &str, page: Value) {
        self.pages.insert(url.to_string(), page);
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == url).count()
    }
}

impl PageFetcher for StaticFetcher {
    async fn fetch_page(&mut self, url: &str) -> Result<Value, BackupError> {
        self.calls.push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| BackupError::Malformed(format!("no page for url '{}'", url)))
    }
}

/// A `{items, next}` page as the paginated endpoints return it.
pub fn page(items: Vec<Value>, next: Option<&str>) -> Value {
    json!({
        "items": items,
        "next": next,
    })
}

/// A playlist record as `/me/playlists` returns it.
pub fn playlist(id: &str, name: &str, snapshot_id: &str, tracks_href: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "snapshot_id": snapshot_id,
        "uri": format!("spotify:playlist:{}", id),
        "description": "",
        "owner": { "display_name": "tester" },
        "external_urls": { "spotify": format!("https://open.spotify.com/playlist/{}", id) },
        "tracks": { "href": tracks_href },
    })
}

/// A playlist track record with one artist.
pub fn track(name: &str, artist: &str, album: &str, number: u32, added_at: &str) -> Value {
    json!({
        "added_at": added_at,
        "track": {
            "name": name,
            "uri": format!("spotify:track:{}", name.to_lowercase().replace(' ', "")),
            "track_number": number,
            "artists": [ { "name": artist } ],
            "album": { "name": album },
        },
    })
}
