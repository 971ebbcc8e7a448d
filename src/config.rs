// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use eyre::{WrapErr, eyre};
use serde::Deserialize;

use crate::cli::Args;

pub const DEFAULT_POLL_SECONDS: u64 = 30;

/// On-disk shape of `config.toml`; every field optional so a partial file
/// merges with env vars and flags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<String>,
    pub token: Option<String>,
    pub poll_seconds: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: String,
    pub token: Option<String>,
    pub poll_seconds: u64,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tempo").join("config.toml"))
}

pub fn load(args: &Args) -> eyre::Result<Config> {
    let file = match config_path() {
        Some(path) if path.exists() => {
            let raw = std::fs::read_to_string(&path)
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            parse_file(&raw).wrap_err_with(|| format!("invalid config {}", path.display()))?
        }
        _ => FileConfig::default(),
    };

    resolve(
        file,
        args.server.clone(),
        args.token.clone(),
        args.poll,
        std::env::var("TEMPO_SERVER").ok(),
        std::env::var("TEMPO_TOKEN").ok(),
        std::env::var("TEMPO_POLL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok()),
    )
}

pub fn parse_file(raw: &str) -> eyre::Result<FileConfig> {
    Ok(toml::from_str(raw)?)
}

/// Precedence: flag > environment > config file.
fn resolve(
    file: FileConfig,
    flag_server: Option<String>,
    flag_token: Option<String>,
    flag_poll: Option<u64>,
    env_server: Option<String>,
    env_token: Option<String>,
    env_poll: Option<u64>,
) -> eyre::Result<Config> {
    let server = flag_server
        .or(env_server)
        .or(file.server)
        .ok_or_else(|| {
            eyre!("no server configured (use --server, TEMPO_SERVER, or config.toml)")
        })?;

    let token = flag_token.or(env_token).or(file.token);

    let poll_seconds = flag_poll
        .or(env_poll)
        .or(file.poll_seconds)
        .unwrap_or(DEFAULT_POLL_SECONDS)
        .max(1);

    Ok(Config {
        server: server.trim_end_matches('/').to_string(),
        token,
        poll_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn parses_full_file() {
        let cfg = parse_file(
            r#"
server = "https://api.example.test"
token = "abc123"
poll_seconds = 10
"#,
        )
        .unwrap();

        assert_eq!(cfg.server.as_deref(), Some("https://api.example.test"));
        assert_eq!(cfg.token.as_deref(), Some("abc123"));
        assert_eq!(cfg.poll_seconds, Some(10));
    }

    #[test]
    fn parses_partial_file_from_disk() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "server = \"http://localhost:8080\"").unwrap();

        let raw = std::fs::read_to_string(f.path()).unwrap();
        let cfg = parse_file(&raw).unwrap();

        assert_eq!(cfg.server.as_deref(), Some("http://localhost:8080"));
        assert!(cfg.token.is_none());
    }

    #[test]
    fn flag_beats_env_beats_file() {
        let file = FileConfig {
            server: Some("http://file".into()),
            token: Some("file-token".into()),
            poll_seconds: Some(5),
        };

        let cfg = resolve(
            file,
            Some("http://flag".into()),
            None,
            None,
            Some("http://env".into()),
            Some("env-token".into()),
            Some(7),
        )
        .unwrap();

        assert_eq!(cfg.server, "http://flag");
        assert_eq!(cfg.token.as_deref(), Some("env-token"));
        assert_eq!(cfg.poll_seconds, 7);
    }

    #[test]
    fn missing_server_is_an_error() {
        let err = resolve(FileConfig::default(), None, None, None, None, None, None);
        assert!(err.is_err());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let cfg = resolve(
            FileConfig::default(),
            Some("http://host/".into()),
            None,
            None,
            None,
            None,
            None,
        )
        .unwrap();

        assert_eq!(cfg.server, "http://host");
        assert_eq!(cfg.poll_seconds, DEFAULT_POLL_SECONDS);
    }
}
