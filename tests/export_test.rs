mod common;

use serde_json::{Value, json};

use common::{MemoryStore, playlist, track};
use spobakcli::{
    export::{self, TRACKS_CSV_HEADER},
    types::{PlaylistDetail, PlaylistSummary, PlaylistTrack},
    utils::parse_output_formats,
};

fn detail(name: &str, id: &str, tracks: Vec<Value>) -> PlaylistDetail {
    let raw = playlist(id, name, "snap1", "https://api.test/tracks");
    let summary: PlaylistSummary = serde_json::from_value(raw.clone()).unwrap();
    PlaylistDetail {
        raw,
        summary,
        tracks,
    }
}

fn typed(tracks: &[Value]) -> Vec<PlaylistTrack> {
    tracks
        .iter()
        .map(|t| serde_json::from_value(t.clone()).unwrap())
        .collect()
}

#[test]
fn test_tracks_csv_header_and_rows() {
    let tracks = vec![
        track("Song One", "Artist A", "Album X", 1, "2024-01-01T00:00:00Z"),
        track("Song Two", "Artist B", "Album Y", 7, "2024-02-01T00:00:00Z"),
    ];

    let csv = export::tracks_csv(&typed(&tracks));
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], TRACKS_CSV_HEADER);
    assert_eq!(
        lines[1],
        "\"Song One\",\"Artist A\",\"Album X\",1,spotify:track:songone,2024-01-01T00:00:00Z"
    );
    assert_eq!(
        lines[2],
        "\"Song Two\",\"Artist B\",\"Album Y\",7,spotify:track:songtwo,2024-02-01T00:00:00Z"
    );
}

#[test]
fn test_tracks_csv_quotes_embedded_commas_and_quotes() {
    let tracks = vec![track(
        "Hello, World",
        "The \"Band\"",
        "B-Sides, Vol. 2",
        3,
        "2024-01-01T00:00:00Z",
    )];

    let csv = export::tracks_csv(&typed(&tracks));
    let row = csv.lines().nth(1).unwrap();

    // Names with commas and quotes stay inside their quoted fields
    assert!(row.starts_with("\"Hello, World\""));
    assert!(row.contains("\"The \\\"Band\\\"\""));
    assert!(row.contains("\"B-Sides, Vol. 2\""));
}

#[test]
fn test_tracks_csv_joins_multiple_artists() {
    let mut record = track("Duet", "First", "Album", 1, "2024-01-01T00:00:00Z");
    record["track"]["artists"] = json!([{ "name": "First" }, { "name": "Second" }]);

    let csv = export::tracks_csv(&typed(&[record]));
    assert!(csv.contains("\"First\";\"Second\""));
}

#[test]
fn test_tracks_csv_skips_nulled_track_bodies() {
    let tracks = vec![
        track("Kept", "Artist", "Album", 1, "2024-01-01T00:00:00Z"),
        json!({ "added_at": "2024-01-02T00:00:00Z", "track": null }),
    ];

    let csv = export::tracks_csv(&typed(&tracks));

    // Only the header and the surviving row
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("\"Kept\""));
}

#[test]
fn test_render_raw_folds_tracks_into_record() {
    let tracks = vec![track("Song", "Artist", "Album", 1, "2024-01-01T00:00:00Z")];
    let detail = detail("Mix", "p1", tracks);

    let raw = export::render_raw(&detail).unwrap();
    let parsed: Value = serde_json::from_str(&raw).unwrap();

    // The summary fields survive and the track collection replaces the link
    assert_eq!(parsed["id"], "p1");
    assert_eq!(parsed["name"], "Mix");
    assert_eq!(parsed["tracks"].as_array().unwrap().len(), 1);
    assert_eq!(parsed["tracks"][0]["track"]["name"], "Song");
}

#[test]
fn test_render_xspf_structure() {
    let tracks = vec![track("Song", "Artist", "Album", 4, "2024-01-01T00:00:00Z")];
    let detail = detail("Mix", "p1", tracks);

    let xml = export::render_xspf(&detail);

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<playlist version=\"1\" xmlns=\"http://xspf.org/ns/0/\">"));
    assert!(xml.contains("<title>Mix</title>"));
    assert!(xml.contains("<creator>tester</creator>"));
    assert!(xml.contains("<identifier>spotify:playlist:p1</identifier>"));
    assert!(xml.contains("<trackList>"));
    assert!(xml.contains("<title>Song</title>"));
    assert!(xml.contains("<album>Album</album>"));
    assert!(xml.contains("<trackNum>4</trackNum>"));
    assert!(xml.contains("<meta rel=\"date_added\">2024-01-01T00:00:00Z</meta>"));
    assert!(xml.trim_end().ends_with("</playlist>"));
}

#[test]
fn test_render_xspf_escapes_special_characters() {
    let mut record = track("Rock & Roll", "A <B>", "Album", 1, "2024-01-01T00:00:00Z");
    record["track"]["artists"] = json!([{ "name": "A <B>" }]);
    let detail = detail("Mix & Match", "p1", vec![record]);

    let xml = export::render_xspf(&detail);

    assert!(xml.contains("<title>Mix &amp; Match</title>"));
    assert!(xml.contains("<title>Rock &amp; Roll</title>"));
    assert!(xml.contains("<creator>A &lt;B&gt;</creator>"));
    // No unescaped ampersands or angle brackets leak into the document
    assert!(!xml.contains("Rock & Roll"));
}

#[tokio::test]
async fn test_write_playlist_one_file_per_format() {
    let store = MemoryStore::new();
    let formats = parse_output_formats("all").unwrap();
    let tracks = vec![track("Song", "Artist", "Album", 1, "2024-01-01T00:00:00Z")];
    let detail = detail("My Mix", "p1", tracks);

    export::write_playlist(&store, "playlists", &detail, &formats)
        .await
        .unwrap();

    assert!(store.has_file("playlists", "my_mix_p1.json"));
    assert!(store.has_file("playlists", "my_mix_p1.csv"));
    assert!(store.has_file("playlists", "my_mix_p1.xspf"));
}

#[tokio::test]
async fn test_write_playlist_skips_unchanged_content() {
    let store = MemoryStore::new();
    let formats = parse_output_formats("raw,csv").unwrap();
    let tracks = vec![track("Song", "Artist", "Album", 1, "2024-01-01T00:00:00Z")];
    let detail = detail("Mix", "p1", tracks);

    export::write_playlist(&store, "playlists", &detail, &formats)
        .await
        .unwrap();
    assert_eq!(store.writes().len(), 2);

    // Writing identical content again touches nothing
    store.clear_write_log();
    export::write_playlist(&store, "playlists", &detail, &formats)
        .await
        .unwrap();
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn test_delete_playlist_removes_enabled_formats() {
    let store = MemoryStore::new();
    store.insert("playlists", "mix_p1.json", "{}");
    store.insert("playlists", "mix_p1.csv", "header");
    store.insert("playlists", "mix_p1.xspf", "<xml/>");

    let formats = parse_output_formats("raw,csv").unwrap();
    export::delete_playlist(&store, "playlists", "mix_p1", &formats)
        .await
        .unwrap();

    assert!(!store.has_file("playlists", "mix_p1.json"));
    assert!(!store.has_file("playlists", "mix_p1.csv"));
    // Formats not enabled are left alone
    assert!(store.has_file("playlists", "mix_p1.xspf"));
}

#[tokio::test]
async fn test_delete_playlist_missing_files_is_noop() {
    let store = MemoryStore::new();
    let formats = parse_output_formats("all").unwrap();

    // Deleting exports that never existed must not error
    let result = export::delete_playlist(&store, "playlists", "ghost", &formats).await;
    assert!(result.is_ok());
}
