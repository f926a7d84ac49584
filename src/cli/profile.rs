use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config, error,
    spotify::fetch::fetch_one,
    store::{FileStore, LocalStore},
    success,
};

/// Backs up the user profile to `profile.json` in the backup root. The
/// profile endpoint is a single page; no pagination or collation applies.
pub async fn profile() {
    let mut fetcher = super::spotify_fetcher().await;
    let store = LocalStore::new(config::backup_dir());

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching profile...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let url = format!("{}/me", config::spotify_apiurl());
    let page = match fetch_one(&mut fetcher, &url).await {
        Ok(page) => page,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch profile: {}", e);
        }
    };
    pb.finish_and_clear();

    let output = match serde_json::to_string_pretty(&page) {
        Ok(output) => output,
        Err(e) => error!("Failed to serialize profile: {}", e),
    };

    match store.update_or_create_file("", "profile.json", &output).await {
        Ok(true) => success!("Profile backed up."),
        Ok(false) => success!("Profile unchanged."),
        Err(e) => error!("Failed to write profile: {}", e),
    }
}
