use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use crate::{
    collate::{FieldPath, collate},
    config, error,
    error::BackupError,
    export,
    spotify::fetch::{PageFetcher, ResponseShape, fetch_all},
    store::{FileStore, LocalStore},
    success,
    types::PlaylistTrack,
    utils::{self, OutputFormat, OutputFormats},
    warning,
};

/// One saved-item collection: endpoint, output file stem and CSV renderer.
/// All four collections share the bare `{items: [...], next}` shape.
struct SavedResource {
    stem: &'static str,
    endpoint: &'static str,
    csv: fn(&[Value]) -> String,
}

const SAVED_RESOURCES: [SavedResource; 4] = [
    SavedResource {
        stem: "savedTracks",
        endpoint: "/me/tracks",
        csv: saved_tracks_csv,
    },
    SavedResource {
        stem: "savedAlbums",
        endpoint: "/me/albums",
        csv: saved_albums_csv,
    },
    SavedResource {
        stem: "savedShows",
        endpoint: "/me/shows",
        csv: saved_shows_csv,
    },
    SavedResource {
        stem: "savedEpisodes",
        endpoint: "/me/episodes",
        csv: saved_episodes_csv,
    },
];

/// Backs up the selected saved-item collections; selecting none backs up
/// all of them. A failure in one collection leaves the others to complete.
pub async fn saved(
    tracks: bool,
    albums: bool,
    shows: bool,
    episodes: bool,
    formats: Option<OutputFormats>,
) {
    let formats = formats.unwrap_or_else(config::output_formats);
    let all = !(tracks || albums || shows || episodes);
    let selected = [tracks, albums, shows, episodes];

    let mut fetcher = super::spotify_fetcher().await;
    let store = LocalStore::new(config::backup_dir());

    for (resource, enabled) in SAVED_RESOURCES.iter().zip(selected) {
        if !(all || enabled) {
            continue;
        }

        match backup_collection(&mut fetcher, &store, resource, &formats).await {
            Ok(count) => success!("Backed up {} {} items.", count, resource.stem),
            Err(e) if e.is_fatal() => error!("Failed to back up {}: {}", resource.stem, e),
            Err(e) => warning!("Skipping {}: {}", resource.stem, e),
        }
    }
}

async fn backup_collection<F: PageFetcher>(
    fetcher: &mut F,
    store: &LocalStore,
    resource: &SavedResource,
    formats: &OutputFormats,
) -> Result<usize, BackupError> {
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching {}...", resource.stem));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let url = format!("{}{}?limit=50", config::spotify_apiurl(), resource.endpoint);
    let result = fetch_all(fetcher, &url, ResponseShape::Bare).await;
    pb.finish_and_clear();
    let pages = result?;

    let path = FieldPath::new("items")?;
    let records = collate(&path, &pages, false)?;

    if formats.contains(OutputFormat::Raw) {
        let output = serde_json::to_string_pretty(&Value::Array(records.clone()))?;
        let filename = format!("{}.json", resource.stem);
        store.update_or_create_file("", &filename, &output).await?;
    }

    if formats.contains(OutputFormat::Csv) {
        let csv = (resource.csv)(&records);
        let filename = format!("{}.csv", resource.stem);
        store.update_or_create_file("", &filename, &csv).await?;
    }

    Ok(records.len())
}

fn saved_tracks_csv(records: &[Value]) -> String {
    let typed: Vec<PlaylistTrack> = records
        .iter()
        .filter_map(|r| serde_json::from_value(r.clone()).ok())
        .collect();
    export::tracks_csv(&typed)
}

fn saved_albums_csv(records: &[Value]) -> String {
    let mut csv = String::from("name, artist, uri, date added\n");

    for record in records {
        let album = &record["album"];
        let artists = album["artists"]
            .as_array()
            .map(|artists| {
                artists
                    .iter()
                    .map(|a| utils::csv_quote(a["name"].as_str().unwrap_or_default()))
                    .collect::<Vec<_>>()
                    .join(";")
            })
            .unwrap_or_default();

        csv.push_str(&format!(
            "{},{},{},{}\n",
            utils::csv_quote(album["name"].as_str().unwrap_or_default()),
            artists,
            album["uri"].as_str().unwrap_or_default(),
            record["added_at"].as_str().unwrap_or_default()
        ));
    }

    csv
}

fn saved_shows_csv(records: &[Value]) -> String {
    let mut csv = String::from("name, publisher, uri, date added\n");

    for record in records {
        let show = &record["show"];
        csv.push_str(&format!(
            "{},{},{},{}\n",
            utils::csv_quote(show["name"].as_str().unwrap_or_default()),
            utils::csv_quote(show["publisher"].as_str().unwrap_or_default()),
            show["uri"].as_str().unwrap_or_default(),
            record["added_at"].as_str().unwrap_or_default()
        ));
    }

    csv
}

fn saved_episodes_csv(records: &[Value]) -> String {
    let mut csv = String::from("name, show, uri, date added\n");

    for record in records {
        let episode = &record["episode"];
        csv.push_str(&format!(
            "{},{},{},{}\n",
            utils::csv_quote(episode["name"].as_str().unwrap_or_default()),
            utils::csv_quote(episode["show"]["name"].as_str().unwrap_or_default()),
            episode["uri"].as_str().unwrap_or_default(),
            record["added_at"].as_str().unwrap_or_default()
        ));
    }

    csv
}
