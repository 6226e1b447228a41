use clap::{Parser, Subcommand, ValueEnum};
use hls_streams::{NameKey, NameTemplate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "hls-streams",
    about = "List the playable streams of an HLS multivariant playlist",
    version,
    author
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select streams from a multivariant playlist
    Select(SelectArgs),

    /// Show configuration information
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct SelectArgs {
    /// Playlist file, `-` reads from stdin
    pub manifest: PathBuf,

    /// URL the playlist was fetched from, used to resolve relative URIs
    #[arg(short, long)]
    pub base_url: Option<Url>,

    /// Audio languages or rendition names to prefer, `*` for all
    #[arg(short, long, value_delimiter = ',')]
    pub audio_select: Vec<String>,

    /// Requested locale, e.g. `ja_JP`
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Label used for stream names (name, pixels, bitrate)
    #[arg(long)]
    pub name_key: Option<NameKey>,

    /// Prefix prepended to every stream name
    #[arg(long)]
    pub name_prefix: Option<String>,

    /// Stream name template over {name}, {pixels} and {bitrate}
    #[arg(long)]
    pub name_fmt: Option<NameTemplate>,

    /// Request every variant playlist and drop unreachable ones
    #[arg(long)]
    pub check_streams: bool,

    /// Start live streams from the beginning of the playlist window
    #[arg(long)]
    pub force_restart: bool,

    /// Seconds to skip from the start
    #[arg(long)]
    pub start_offset: Option<f64>,

    /// Seconds to play
    #[arg(long)]
    pub duration: Option<f64>,

    /// Extra request header, `Name=Value` or `Name: Value`
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Path to the ffmpeg executable
    #[arg(long)]
    pub ffmpeg: Option<PathBuf>,

    /// Never mux external audio
    #[arg(long)]
    pub no_mux: bool,

    /// Output format
    #[arg(short, long)]
    pub output: Option<OutputFormat>,

    /// Save output to file
    #[arg(short = 'O', long)]
    pub output_file: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Pretty-printed human-readable output
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// Compact JSON output
    JsonCompact,
}
