use std::collections::BTreeSet;

use serde_json::json;
use spobakcli::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_export_key_sanitization() {
    // Lowercased, with everything outside [a-z0-9_-] replaced by underscores
    assert_eq!(export_key("My List!", "37i9"), "my_list__37i9");
    assert_eq!(export_key("Road Trip", "abc123"), "road_trip_abc123");

    // Allowed characters pass through unchanged
    assert_eq!(export_key("lo-fi_mix", "id-1"), "lo-fi_mix_id-1");

    // Non-ASCII characters are replaced, not dropped
    assert_eq!(export_key("café", "x"), "caf__x");

    // Only the name is sanitized; the id keeps its case
    assert_eq!(export_key("Mix", "4aBc"), "mix_4aBc");
}

#[test]
fn test_export_key_deterministic() {
    // Same (name, id) pair always yields the same key
    let key1 = export_key("Summer 2024", "4aBc");
    let key2 = export_key("Summer 2024", "4aBc");
    assert_eq!(key1, key2);

    // Different ids keep playlists with the same name apart
    assert_ne!(export_key("Mix", "a"), export_key("Mix", "b"));
}

#[test]
fn test_sort_artists_plain_string_ordering() {
    let mut artists = vec![
        json!({ "name": "alpha" }),
        json!({ "name": "Zeta" }),
        json!({ "name": "Alpha" }),
    ];

    sort_artists(&mut artists);

    // Case-sensitive ordering: all uppercase names before lowercase ones
    let names: Vec<&str> = artists.iter().map(|a| a["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Alpha", "Zeta", "alpha"]);

    // Already sorted input is left unchanged
    sort_artists(&mut artists);
    let again: Vec<&str> = artists.iter().map(|a| a["name"].as_str().unwrap()).collect();
    assert_eq!(again, vec!["Alpha", "Zeta", "alpha"]);
}

#[test]
fn test_csv_quote() {
    // Plain text is wrapped in quotes
    assert_eq!(csv_quote("hello"), "\"hello\"");

    // Embedded quotes and commas survive inside the quoted field
    assert_eq!(csv_quote("say \"hi\""), "\"say \\\"hi\\\"\"");
    assert_eq!(csv_quote("a,b"), "\"a,b\"");

    // Control characters are escaped
    assert_eq!(csv_quote("line\nbreak"), "\"line\\nbreak\"");
}

#[test]
fn test_xml_escape() {
    assert_eq!(xml_escape("Tom & Jerry"), "Tom &amp; Jerry");
    assert_eq!(xml_escape("<tag>"), "&lt;tag&gt;");
    assert_eq!(xml_escape("\"it's\""), "&quot;it&apos;s&quot;");

    // Text without special characters is unchanged
    assert_eq!(xml_escape("plain"), "plain");
}

#[test]
fn test_with_param() {
    // No existing query string
    assert_eq!(
        with_param("https://api.test/tracks", "limit=50"),
        "https://api.test/tracks?limit=50"
    );

    // Existing query string gets an ampersand
    assert_eq!(
        with_param("https://api.test/tracks?offset=100", "limit=50"),
        "https://api.test/tracks?offset=100&limit=50"
    );
}

#[test]
fn test_output_format_display_and_ext() {
    assert_eq!(OutputFormat::Raw.to_string(), "raw");
    assert_eq!(OutputFormat::Csv.to_string(), "csv");
    assert_eq!(OutputFormat::Xspf.to_string(), "xspf");

    assert_eq!(OutputFormat::Raw.ext(), "json");
    assert_eq!(OutputFormat::Csv.ext(), "csv");
    assert_eq!(OutputFormat::Xspf.ext(), "xspf");
}

#[test]
fn test_output_formats_default() {
    // Raw is the default export format
    let formats = OutputFormats::default();
    assert!(formats.contains(OutputFormat::Raw));
    assert!(!formats.contains(OutputFormat::Csv));
    assert!(!formats.contains(OutputFormat::Xspf));
}

#[test]
fn test_output_formats_display() {
    let mut set = BTreeSet::new();
    set.insert(OutputFormat::Xspf);
    set.insert(OutputFormat::Raw);
    let formats = OutputFormats(set);

    // Sorted by declaration order due to BTreeSet
    assert_eq!(formats.to_string(), "raw,xspf");
}

#[test]
fn test_parse_output_formats_valid_inputs() {
    // Single format
    let result = parse_output_formats("csv").unwrap();
    assert!(result.contains(OutputFormat::Csv));
    assert!(!result.contains(OutputFormat::Raw));

    // Multiple formats
    let result = parse_output_formats("raw,xspf").unwrap();
    assert!(result.contains(OutputFormat::Raw));
    assert!(result.contains(OutputFormat::Xspf));

    // "all" keyword enables everything
    let result = parse_output_formats("all").unwrap();
    let formats: Vec<OutputFormat> = result.iter().collect();
    assert_eq!(formats.len(), 3);

    // Whitespace and case are tolerated
    let result = parse_output_formats(" RAW , Csv ").unwrap();
    assert!(result.contains(OutputFormat::Raw));
    assert!(result.contains(OutputFormat::Csv));
}

#[test]
fn test_parse_output_formats_invalid_inputs() {
    // Empty string
    let result = parse_output_formats("");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("cannot be empty"));

    // Whitespace only
    let result = parse_output_formats("   ");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("cannot be empty"));

    // Invalid format name
    let result = parse_output_formats("vinyl");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("invalid value 'vinyl'"));

    // Malformed input (empty segment)
    let result = parse_output_formats("raw,,csv");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("empty segment"));
}

#[test]
fn test_parse_output_formats_deduplication() {
    let result = parse_output_formats("raw,raw,csv").unwrap();
    let formats: Vec<OutputFormat> = result.iter().collect();
    assert_eq!(formats, vec![OutputFormat::Raw, OutputFormat::Csv]);
}
