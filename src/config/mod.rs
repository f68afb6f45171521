mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Host used when only a port is given and the default address has none.
const FALLBACK_HOST: &str = "0.0.0.0";
/// Port used when only a host is given and the default address has none.
const FALLBACK_PORT: &str = "8080";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./mediago.toml",
        "~/.config/mediago/config.toml",
        "/etc/mediago/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
///
/// Problems with the video root or static directory only disable those
/// features, so they are warnings rather than errors.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if let Some(root) = &config.video.root_path {
        if !root.exists() {
            tracing::warn!("Video root does not exist: {:?}", root);
        }
    }

    if let Some(dir) = &config.server.static_dir {
        if !dir.is_dir() {
            tracing::warn!("Static directory does not exist: {:?}", dir);
        }
    }

    Ok(())
}

/// Combine optional host/port overrides with a default `host:port` address.
///
/// Both given: `host:port`. Only the port: the host is taken from the default
/// address (text before its first `:`). Only the host: the port is taken from
/// the default address (text after its last `:`). Neither: the default.
pub fn build_addr(host: Option<&str>, port: Option<u16>, default_addr: &str) -> String {
    match (host, port) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (None, Some(port)) => {
            let host = match default_addr.find(':') {
                Some(idx) if idx > 0 => &default_addr[..idx],
                _ => FALLBACK_HOST,
            };
            format!("{host}:{port}")
        }
        (Some(host), None) => {
            let port = match default_addr.rfind(':') {
                Some(idx) => &default_addr[idx + 1..],
                None => FALLBACK_PORT,
            };
            format!("{host}:{port}")
        }
        (None, None) => default_addr.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.addr(), "0.0.0.0:8080");
        assert!(!config.server.enable_docs);
        assert!(config.video.root_path.is_none());
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 9000
enable_docs = true

[video]
root_path = "/srv/videos"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.server.addr(), "127.0.0.1:9000");
        assert!(config.server.enable_docs);
        assert_eq!(
            config.video.root_path.as_deref(),
            Some(Path::new("/srv/videos"))
        );
    }

    #[test]
    fn test_load_config_partial_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[video]\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.server.static_dir.is_none());
    }

    #[test]
    fn test_load_config_rejects_port_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 0\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/mediago.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_build_addr() {
        assert_eq!(build_addr(Some("127.0.0.1"), Some(9000), "0.0.0.0:8080"), "127.0.0.1:9000");
        assert_eq!(build_addr(None, Some(9000), "10.0.0.1:8080"), "10.0.0.1:9000");
        assert_eq!(build_addr(None, Some(9000), ":8080"), "0.0.0.0:9000");
        assert_eq!(build_addr(None, Some(9000), ""), "0.0.0.0:9000");
        assert_eq!(build_addr(Some("localhost"), None, "0.0.0.0:3000"), "localhost:3000");
        assert_eq!(build_addr(Some("localhost"), None, ""), "localhost:8080");
        assert_eq!(build_addr(None, None, "0.0.0.0:8080"), "0.0.0.0:8080");
    }
}
