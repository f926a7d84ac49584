//! Playlist export rendering and file output.
//!
//! A fully materialized [`PlaylistDetail`] is rendered into each enabled
//! output format and written through the [`FileStore`], which skips writes
//! whose content is unchanged. The delete path removes one file per format
//! for a given export key; missing files are a no-op.

use serde_json::Value;

use crate::{
    error::BackupError,
    store::FileStore,
    types::{PlaylistDetail, PlaylistTrack},
    utils::{self, OutputFormat, OutputFormats},
};

/// Header shared by all track CSV exports.
pub const TRACKS_CSV_HEADER: &str = "name, artist, album, track number, uri, date added";

/// Writes one file per enabled format for the playlist.
pub async fn write_playlist<S: FileStore>(
    store: &S,
    folder: &str,
    detail: &PlaylistDetail,
    formats: &OutputFormats,
) -> Result<(), BackupError> {
    let key = detail.export_key();

    for format in formats.iter() {
        let content = match format {
            OutputFormat::Raw => render_raw(detail)?,
            OutputFormat::Csv => render_csv(detail),
            OutputFormat::Xspf => render_xspf(detail),
        };
        let filename = format!("{}.{}", key, format.ext());
        store
            .update_or_create_file(folder, &filename, &content)
            .await?;
    }

    Ok(())
}

/// Trashes the export files of one playlist, one per enabled format.
pub async fn delete_playlist<S: FileStore>(
    store: &S,
    folder: &str,
    export_key: &str,
    formats: &OutputFormats,
) -> Result<(), BackupError> {
    for format in formats.iter() {
        let filename = format!("{}.{}", export_key, format.ext());
        store.trash_file(folder, &filename).await?;
    }

    Ok(())
}

/// The full playlist record with its track collection folded in, exactly
/// as the upstream API shaped it.
pub fn render_raw(detail: &PlaylistDetail) -> Result<String, BackupError> {
    let mut output = detail.raw.clone();
    if let Some(map) = output.as_object_mut() {
        map.insert("tracks".to_string(), Value::Array(detail.tracks.clone()));
    }
    Ok(serde_json::to_string_pretty(&output)?)
}

pub fn render_csv(detail: &PlaylistDetail) -> String {
    tracks_csv(&detail.typed_tracks())
}

/// Renders track records into CSV rows. Records without a track body
/// (nulled upstream) are skipped.
pub fn tracks_csv(tracks: &[PlaylistTrack]) -> String {
    let mut csv = String::from(TRACKS_CSV_HEADER);
    csv.push('\n');

    for track in tracks {
        let Some(body) = &track.track else {
            continue;
        };

        let artists = body
            .artists
            .iter()
            .map(|a| utils::csv_quote(&a.name))
            .collect::<Vec<_>>()
            .join(";");

        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            utils::csv_quote(&body.name),
            artists,
            utils::csv_quote(&body.album.name),
            body.track_number,
            body.uri,
            track.added_at
        ));
    }

    csv
}

/// Renders the playlist into the XSPF playlist-exchange format.
pub fn render_xspf(detail: &PlaylistDetail) -> String {
    let summary = &detail.summary;
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");

    xml.push_str("<playlist version=\"1\" xmlns=\"http://xspf.org/ns/0/\">\n");
    push_element(&mut xml, 1, "creator", &summary.owner.display_name);
    push_element(&mut xml, 1, "annotation", &summary.description);
    push_element(&mut xml, 1, "title", &summary.name);
    push_element(&mut xml, 1, "location", &summary.external_urls.spotify);
    push_element(&mut xml, 1, "identifier", &summary.uri);

    xml.push_str("    <trackList>\n");
    for track in detail.typed_tracks() {
        let Some(body) = &track.track else {
            continue;
        };

        let artists = body
            .artists
            .iter()
            .map(|a| a.name.clone())
            .collect::<Vec<_>>()
            .join(";");

        xml.push_str("        <track>\n");
        push_element(&mut xml, 3, "identifier", &body.uri);
        push_element(&mut xml, 3, "title", &body.name);
        push_element(&mut xml, 3, "creator", &artists);
        push_element(&mut xml, 3, "album", &body.album.name);
        push_element(&mut xml, 3, "trackNum", &body.track_number.to_string());
        xml.push_str(&format!(
            "            <meta rel=\"date_added\">{}</meta>\n",
            utils::xml_escape(&track.added_at)
        ));
        xml.push_str("        </track>\n");
    }
    xml.push_str("    </trackList>\n");

    xml.push_str("</playlist>\n");
    xml
}

fn push_element(xml: &mut String, depth: usize, tag: &str, text: &str) {
    let indent = "    ".repeat(depth);
    xml.push_str(&format!(
        "{}<{}>{}</{}>\n",
        indent,
        tag,
        utils::xml_escape(text),
        tag
    ));
}
