use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use crate::{
    collate::{FieldPath, collate},
    config, error,
    spotify::fetch::{ResponseShape, fetch_all},
    store::{FileStore, LocalStore},
    success,
    utils::{self, OutputFormat, OutputFormats},
};

/// Backs up the followed artists to `following.json`/`following.csv`,
/// sorted by artist name.
///
/// The following endpoint wraps its payload in an `artists` envelope, so
/// pagination uses [`ResponseShape::Enveloped`] and collation the full
/// `artists.items` path.
pub async fn following(formats: Option<OutputFormats>) {
    let formats = formats.unwrap_or_else(config::output_formats);

    let mut fetcher = super::spotify_fetcher().await;
    let store = LocalStore::new(config::backup_dir());

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching followed artists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let url = format!(
        "{}/me/following?type=artist&limit=50",
        config::spotify_apiurl()
    );
    let pages = match fetch_all(&mut fetcher, &url, ResponseShape::Enveloped).await {
        Ok(pages) => pages,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch followed artists: {}", e);
        }
    };
    pb.finish_and_clear();

    let path = match FieldPath::new("artists.items") {
        Ok(path) => path,
        Err(e) => error!("{}", e),
    };
    let mut artists = match collate(&path, &pages, false) {
        Ok(artists) => artists,
        Err(e) => error!("Failed to collate followed artists: {}", e),
    };

    utils::sort_artists(&mut artists);

    if formats.contains(OutputFormat::Raw) {
        let output = match serde_json::to_string_pretty(&Value::Array(artists.clone())) {
            Ok(output) => output,
            Err(e) => error!("Failed to serialize followed artists: {}", e),
        };
        if let Err(e) = store.update_or_create_file("", "following.json", &output).await {
            error!("Failed to write following.json: {}", e);
        }
    }

    if formats.contains(OutputFormat::Csv) {
        let csv = following_csv(&artists);
        if let Err(e) = store.update_or_create_file("", "following.csv", &csv).await {
            error!("Failed to write following.csv: {}", e);
        }
    }

    success!("Backed up {} followed artists.", artists.len());
}

fn following_csv(artists: &[Value]) -> String {
    let mut csv = String::from("name, uri, follower count, genres\n");

    for artist in artists {
        let genres = artist["genres"]
            .as_array()
            .map(|genres| {
                genres
                    .iter()
                    .filter_map(|g| g.as_str())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .unwrap_or_default();

        csv.push_str(&format!(
            "{},{},{},{}\n",
            utils::csv_quote(artist["name"].as_str().unwrap_or_default()),
            artist["uri"].as_str().unwrap_or_default(),
            artist["followers"]["total"].as_u64().unwrap_or(0),
            utils::csv_quote(&genres)
        ));
    }

    csv
}
