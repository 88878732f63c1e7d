// bases/download_cli/src/config.rs
use clap::{Args, Parser, Subcommand};
use media_downloader::TranscodeSettings;
use playlist_pipeline::{
    PipelinePaths, DEFAULT_DESTINATION, DEFAULT_FOUND, DEFAULT_NOT_FOUND, DEFAULT_PLAYLIST,
};
use std::path::PathBuf;
use track_resolver::{ResolverConfig, DEFAULT_WORKERS};

/// Which stages a run executes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Search,
    Download,
    All,
    Tag,
}

/// Download CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub paths: PipelinePaths,
    pub workers: usize,
    /// Write title/artist tags after downloading
    pub tag: bool,
    pub verbose: bool,
    pub resolver: ResolverConfig,
    pub transcode: TranscodeSettings,
}

/// Turn a playlist of song names into a folder of audio files
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Resolve every playlist line to a source URL and write the manifests
    Search {
        #[command(flatten)]
        playlist: PlaylistArgs,
        #[command(flatten)]
        manifests: ManifestArgs,
    },

    /// Download every entry of the found manifest
    Download {
        #[command(flatten)]
        manifests: ManifestArgs,
        #[command(flatten)]
        destination: DestinationArgs,
        /// Tag files with title and artist afterwards
        #[arg(long)]
        tag: bool,
    },

    /// Search, then download
    All {
        #[command(flatten)]
        playlist: PlaylistArgs,
        #[command(flatten)]
        manifests: ManifestArgs,
        #[command(flatten)]
        destination: DestinationArgs,
        /// Tag files with title and artist afterwards
        #[arg(long)]
        tag: bool,
    },

    /// Tag already downloaded files listed in the found manifest
    Tag {
        #[command(flatten)]
        manifests: ManifestArgs,
        #[command(flatten)]
        destination: DestinationArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PlaylistArgs {
    /// Playlist file, one "Title - Artist" per line
    #[arg(short = 'i', long, default_value = DEFAULT_PLAYLIST)]
    pub playlist: PathBuf,

    /// Concurrent searches; keep it low to avoid being rate limited
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,
}

#[derive(Args, Debug, Clone)]
pub struct ManifestArgs {
    /// Resolved tracks, "name | url" per line
    #[arg(long, default_value = DEFAULT_FOUND)]
    pub found: PathBuf,

    /// Tracks that could not be resolved
    #[arg(long, default_value = DEFAULT_NOT_FOUND)]
    pub not_found: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct DestinationArgs {
    /// Directory to store downloaded files
    #[arg(short, long, default_value = DEFAULT_DESTINATION)]
    pub output_dir: PathBuf,
}

impl Config {
    /// Create configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Self {
        let mut paths = PipelinePaths::default();
        let mut workers = DEFAULT_WORKERS;
        let mut tag = false;

        let mode = match args.command {
            Command::Search {
                playlist,
                manifests,
            } => {
                paths.playlist = playlist.playlist;
                workers = playlist.workers;
                paths.found = manifests.found;
                paths.not_found = manifests.not_found;
                Mode::Search
            }
            Command::Download {
                manifests,
                destination,
                tag: tag_after,
            } => {
                paths.found = manifests.found;
                paths.not_found = manifests.not_found;
                paths.destination = destination.output_dir;
                tag = tag_after;
                Mode::Download
            }
            Command::All {
                playlist,
                manifests,
                destination,
                tag: tag_after,
            } => {
                paths.playlist = playlist.playlist;
                workers = playlist.workers;
                paths.found = manifests.found;
                paths.not_found = manifests.not_found;
                paths.destination = destination.output_dir;
                tag = tag_after;
                Mode::All
            }
            Command::Tag {
                manifests,
                destination,
            } => {
                paths.found = manifests.found;
                paths.not_found = manifests.not_found;
                paths.destination = destination.output_dir;
                tag = true;
                Mode::Tag
            }
        };

        Self {
            mode,
            paths,
            // Zero workers would never make progress
            workers: workers.max(1),
            tag,
            verbose: args.verbose,
            resolver: ResolverConfig::default(),
            transcode: TranscodeSettings::default(),
        }
    }

    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "download_cli=debug,playlist_pipeline=debug,track_resolver=debug,media_downloader=debug,track_tagger=debug"
        } else {
            "download_cli=info,playlist_pipeline=info,track_resolver=warn,media_downloader=warn,track_tagger=warn"
        }
    }
}
