use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediago-player")]
#[command(author, version, about = "Local video library server with a web player")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Start {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Full listen address, used when host/port are not both given
        #[arg(long, env = "HTTP_ADDR")]
        addr: Option<String>,

        /// Directory to scan for videos
        #[arg(long, env = "VIDEO_ROOT_PATH")]
        video_root: Option<PathBuf>,

        /// Serve Swagger UI at /docs
        #[arg(long)]
        enable_docs: bool,
    },

    /// List the videos under a directory as JSON
    Scan {
        /// Media directory to scan
        #[arg(required = true)]
        dir: PathBuf,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
