mod cli;

use mediago_player::{config, server, video::VideoService};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

struct StartOptions {
    host: Option<String>,
    port: Option<u16>,
    addr: Option<String>,
    video_root: Option<PathBuf>,
    enable_docs: bool,
}

async fn start_server(opts: StartOptions, config_path: Option<&Path>) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    if let Some(root) = opts.video_root {
        config.video.root_path = Some(root);
    }
    if opts.enable_docs {
        config.server.enable_docs = true;
    }

    let default_addr = opts.addr.unwrap_or_else(|| config.server.addr());
    let addr = config::build_addr(opts.host.as_deref(), opts.port, &default_addr);

    tracing::info!("Starting MediaGo Player");
    tracing::info!("Server will listen on {}", addr);

    server::start_server(config, addr).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mediago_player=trace,mediago_common=debug,tower_http=debug".to_string()
        } else {
            "mediago_player=debug,mediago_common=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start {
            host,
            port,
            addr,
            video_root,
            enable_docs,
        } => {
            let opts = StartOptions {
                host,
                port,
                addr,
                video_root,
                enable_docs,
            };
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(opts, cli.config.as_deref()))
        }
        Commands::Scan { dir } => scan_dir(&dir),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("mediago-player {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn scan_dir(dir: &Path) -> Result<()> {
    let service = VideoService::new(dir, ":8080")?;
    let videos = service.list_videos()?;
    println!("{}", serde_json::to_string_pretty(&videos)?);
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Server: {}", config.server.addr());
            println!("  Docs enabled: {}", config.server.enable_docs);
            match &config.video.root_path {
                Some(root) => println!("  Video root: {}", root.display()),
                None => println!("  Video root: (not configured)"),
            }
            if let Some(dir) = &config.server.static_dir {
                println!("  Static dir: {}", dir.display());
            }
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}", config.server.addr());
        }
    }

    Ok(())
}
