use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spobakcli::{cli, config, error, types::PkceToken, utils};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Back up the user profile
    Profile,

    /// Back up followed artists
    Following(FormatOptions),

    /// Back up saved tracks, albums, shows and episodes
    Saved(SavedOptions),

    /// Incrementally sync playlist exports
    Playlists(PlaylistsOptions),

    /// Run all backups in sequence
    All(AllOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct FormatOptions {
    /// Output formats (comma-separated subset of raw,csv,xspf)
    #[clap(long = "format", value_parser = utils::parse_output_formats)]
    pub format: Option<utils::OutputFormats>,
}

#[derive(Parser, Debug, Clone)]
pub struct SavedOptions {
    /// Saved tracks only
    #[clap(long)]
    pub tracks: bool,

    /// Saved albums only
    #[clap(long)]
    pub albums: bool,

    /// Saved shows only
    #[clap(long)]
    pub shows: bool,

    /// Saved episodes only
    #[clap(long)]
    pub episodes: bool,

    /// Output formats (comma-separated subset of raw,csv,xspf)
    #[clap(long = "format", value_parser = utils::parse_output_formats)]
    pub format: Option<utils::OutputFormats>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Incrementally sync playlist exports",
    args_conflicts_with_subcommands = true // disallow mixing sync flags with subcommands
)]
pub struct PlaylistsOptions {
    /// Output formats (comma-separated subset of raw,csv,xspf)
    #[clap(long = "format", value_parser = utils::parse_output_formats)]
    pub format: Option<utils::OutputFormats>,

    /// Delete exports of playlists removed upstream
    #[clap(long)]
    pub delete_orphans: bool,

    /// Subcommands under `playlists` (e.g., `list`)
    #[command(subcommand)]
    pub command: Option<PlaylistsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistsSubcommand {
    /// Show the current export manifest
    List,
}

#[derive(Parser, Debug, Clone)]
pub struct AllOptions {
    /// Output formats (comma-separated subset of raw,csv,xspf)
    #[clap(long = "format", value_parser = utils::parse_output_formats)]
    pub format: Option<utils::OutputFormats>,

    /// Delete exports of playlists removed upstream
    #[clap(long)]
    pub delete_orphans: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Profile => cli::profile().await,
        Command::Following(opt) => cli::following(opt.format).await,
        Command::Saved(opt) => {
            cli::saved(opt.tracks, opt.albums, opt.shows, opt.episodes, opt.format).await
        }
        Command::Playlists(opt) => match opt.command {
            Some(PlaylistsSubcommand::List) => cli::list_playlists().await,
            None => cli::sync_playlists(opt.format, opt.delete_orphans).await,
        },
        Command::All(opt) => {
            cli::profile().await;
            cli::following(opt.format.clone()).await;
            cli::saved(false, false, false, false, opt.format.clone()).await;
            cli::sync_playlists(opt.format, opt.delete_orphans).await;
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
