//! Run configuration
//!
//! A [`SyncConfig`] is assembled once per run. Branch names come from flags
//! only; credentials and repository identity come from a flag, else an
//! environment variable, else the optional TOML config file.

use crate::error::{Error, Result};
use crate::types::{Credentials, DEFAULT_API_URL, PlatformConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable holding the basic-auth username
pub const ENV_USERNAME: &str = "BITBUCKET_USERNAME";
/// Environment variable holding the basic-auth password
pub const ENV_PASSWORD: &str = "BITBUCKET_APP_PASSWORD";
/// Environment variable holding the repository owner
pub const ENV_REPO_OWNER: &str = "BITBUCKET_REPO_OWNER";
/// Environment variable holding the repository slug
pub const ENV_REPO_SLUG: &str = "BITBUCKET_REPO_SLUG";
/// Environment variable overriding the REST API base URL
pub const ENV_API_URL: &str = "BITBUCKET_API_URL";
/// Environment variable pointing at a config file
pub const ENV_CONFIG_PATH: &str = "BRANCH_SYNC_CONFIG";

/// Raw values as given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigArgs {
    /// `-s/--source`
    pub source: Option<String>,
    /// `-d/--destination`
    pub destination: Option<String>,
    /// `-u/--user`
    pub username: Option<String>,
    /// `-p/--password`
    pub password: Option<String>,
    /// `--repo-owner`
    pub repo_owner: Option<String>,
    /// `--repo-slug`
    pub repo_slug: Option<String>,
    /// `--api-url`
    pub api_url: Option<String>,
    /// `--config`
    pub config_path: Option<PathBuf>,
}

/// Contents of a `config.toml`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Basic-auth username
    pub username: Option<String>,
    /// Basic-auth password
    pub password: Option<String>,
    /// Repository owner
    pub repo_owner: Option<String>,
    /// Repository slug
    pub repo_slug: Option<String>,
    /// REST API base URL
    pub api_url: Option<String>,
}

/// Immutable configuration for one sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Branch to merge from
    pub source: String,
    /// Branch to merge into
    pub destination: String,
    /// Basic-auth credentials
    pub credentials: Credentials,
    /// Repository and API endpoint
    pub platform: PlatformConfig,
}

impl SyncConfig {
    /// Resolve against the process environment.
    ///
    /// Falls back to `<config dir>/branch-sync/config.toml` when neither
    /// `--config` nor `BRANCH_SYNC_CONFIG` names a file and that file exists.
    pub fn from_env(mut args: ConfigArgs) -> Result<Self> {
        let lookup = |key: &str| std::env::var(key).ok();

        if args.config_path.is_none() && non_empty(lookup(ENV_CONFIG_PATH)).is_none() {
            args.config_path = default_config_path().filter(|path| path.is_file());
        }

        Self::resolve(args, lookup)
    }

    /// Resolve using `env` for environment lookups.
    ///
    /// Source and destination are checked first so their distinct errors win
    /// over anything else that is missing.
    pub fn resolve<F>(args: ConfigArgs, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = non_empty(args.source).ok_or(Error::MissingSource)?;
        let destination = non_empty(args.destination).ok_or(Error::MissingDestination)?;

        let config_path = args
            .config_path
            .or_else(|| non_empty(env(ENV_CONFIG_PATH)).map(PathBuf::from));
        let file = match config_path {
            Some(path) => load_file_config(&path)?,
            None => FileConfig::default(),
        };

        let username = pick(args.username, &env, ENV_USERNAME, file.username).ok_or(
            Error::MissingSetting {
                name: "username",
                flag: "-u/--user",
                env: ENV_USERNAME,
            },
        )?;
        let password = pick(args.password, &env, ENV_PASSWORD, file.password).ok_or(
            Error::MissingSetting {
                name: "password",
                flag: "-p/--password",
                env: ENV_PASSWORD,
            },
        )?;
        let owner = pick(args.repo_owner, &env, ENV_REPO_OWNER, file.repo_owner).ok_or(
            Error::MissingSetting {
                name: "repository owner",
                flag: "--repo-owner",
                env: ENV_REPO_OWNER,
            },
        )?;
        let slug = pick(args.repo_slug, &env, ENV_REPO_SLUG, file.repo_slug).ok_or(
            Error::MissingSetting {
                name: "repository slug",
                flag: "--repo-slug",
                env: ENV_REPO_SLUG,
            },
        )?;
        let api_url = pick(args.api_url, &env, ENV_API_URL, file.api_url)
            .map_or_else(|| Ok(DEFAULT_API_URL.to_string()), |raw| normalize_api_url(&raw))?;

        Ok(Self {
            source,
            destination,
            credentials: Credentials { username, password },
            platform: PlatformConfig {
                owner,
                slug,
                api_url,
            },
        })
    }
}

/// Default config file location, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("branch-sync").join("config.toml"))
}

/// Read and parse a config file. The file must exist.
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Flag, then environment, then file. Blank values count as absent;
/// everything else passes through untouched.
fn pick<F>(flag: Option<String>, env: &F, key: &str, file: Option<String>) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(flag)
        .or_else(|| non_empty(env(key)))
        .or_else(|| non_empty(file))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn normalize_api_url(raw: &str) -> Result<String> {
    let invalid = |reason: String| Error::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}
