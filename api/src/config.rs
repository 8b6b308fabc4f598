use std::env;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_SERVE_AT: &str = "localhost:8390";
const DEFAULT_ENDPOINT: &str = "https://vas3k.club/";
const DEFAULT_BLOCKED_TYPES: &str = "intro";

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on
    pub serve_at: String,
    /// Base URL of the club API
    pub club_endpoint: String,
    /// Service token sent as `X-Service-Token`
    pub club_token: String,
    /// Content types removed from every feed
    pub blocked_types: Vec<String>,
    /// Author usernames removed from every feed
    pub blocked_authors: Vec<String>,
    /// Fetch full bodies of locked items while listing
    pub resolve_locked: bool,
    /// Upper bound for one upstream request
    pub request_timeout: Duration,
    /// Upstream requests allowed in flight at once
    pub upstream_connections: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let club_token = get("VAS3KCLUB_TOKEN").ok_or(ConfigError::Missing("VAS3KCLUB_TOKEN"))?;

        let request_timeout_secs: u64 = parse_or("REQUEST_TIMEOUT_SECS", get("REQUEST_TIMEOUT_SECS"), 30)?;
        let upstream_connections: usize = parse_or("UPSTREAM_CONNECTIONS", get("UPSTREAM_CONNECTIONS"), 1)?;

        Ok(Self {
            serve_at: get("SERVE_AT").unwrap_or_else(|| DEFAULT_SERVE_AT.to_string()),
            club_endpoint: get("VAS3KCLUB_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            club_token,
            blocked_types: parse_list(
                &get("BLOCKED_TYPES").unwrap_or_else(|| DEFAULT_BLOCKED_TYPES.to_string()),
            ),
            blocked_authors: parse_list(&get("BLOCKED_AUTHORS").unwrap_or_default()),
            resolve_locked: parse_flag("RESOLVE_LOCKED", get("RESOLVE_LOCKED"))?,
            request_timeout: Duration::from_secs(request_timeout_secs.max(1)),
            upstream_connections: upstream_connections.max(1),
        })
    }

    /// Deadline for a whole feed request: the page plus a few article fetches
    pub fn feed_deadline(&self) -> Duration {
        self.request_timeout * 2
    }
}

/// Split a block-list on whitespace, `,`, `;`, `|` and `/`
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c.is_whitespace() || ",;|/".contains(c))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

fn parse_flag(key: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(false);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value,
            reason: "expected true or false".to_string(),
        }),
    }
}
