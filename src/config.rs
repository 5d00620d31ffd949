use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Fixed relative path of the live JSON config written by the plugin that
/// invokes this binary. Resolved against the process working directory.
pub const CONFIG_RELATIVE_PATH: &str = "storage/cache/minecraft_currency_config.json";

/// Server-group tags follow the `an<number>` naming convention; the prefix
/// is what disambiguates the legacy CLI form.
pub const GROUP_TAG_PREFIX: &str = "an";

/// Effective configuration for one session.
///
/// Built once per invocation: hardcoded defaults, then the optional JSON
/// config file, then CLI overrides, last writer wins. Read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub username: String,
    pub password: String,
    /// Server-group tag used in slash commands (`/login <tag>`, `/<tag>`).
    pub anarchy: String,
    pub host: String,
    pub port: u16,
    /// Protocol version label. Accepted and reported for compatibility; the
    /// client library pins the actual wire version at build time.
    pub version: String,
    /// Accepted from the CLI but never consulted by the runner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_interval_ms: Option<u64>,
    /// Accepted from the CLI but never consulted by the runner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pay_attempts: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            username: "unk".to_string(),
            password: "unk".to_string(),
            anarchy: "an210".to_string(),
            host: "funtime.su".to_string(),
            port: 25565,
            version: "1.19.4".to_string(),
            retry_interval_ms: None,
            max_pay_attempts: None,
        }
    }
}

/// Shape of the consumed config file. Only the nested `minecraft_bot`
/// object is read; key names match what the plugin writes.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    minecraft_bot: Option<BotOverrides>,
}

#[derive(Debug, Default, Deserialize)]
struct BotOverrides {
    #[serde(default)]
    bot_username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    anarchy: Option<String>,
    #[serde(default)]
    server: Option<String>,
    #[serde(default)]
    port: Option<u16>,
}

impl SessionConfig {
    pub fn config_path() -> PathBuf {
        PathBuf::from(CONFIG_RELATIVE_PATH)
    }

    /// Defaults overlaid with the config file at the fixed path. A missing,
    /// unreadable, or malformed file falls back to defaults without raising.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &std::path::Path) -> Self {
        let mut config = Self::default();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No config file at {}: {}", path.display(), e);
                return config;
            }
        };

        match serde_json::from_str::<FileConfig>(&content) {
            Ok(file_config) => {
                if let Some(overrides) = file_config.minecraft_bot {
                    config.apply_file_overrides(overrides);
                    info!("Loaded config from {}", path.display());
                }
            }
            Err(e) => {
                debug!("Ignoring malformed config at {}: {}", path.display(), e);
            }
        }

        config
    }

    fn apply_file_overrides(&mut self, overrides: BotOverrides) {
        if let Some(username) = non_empty(overrides.bot_username) {
            self.username = username;
        }
        if let Some(password) = non_empty(overrides.password) {
            self.password = password;
        }
        if let Some(anarchy) = non_empty(overrides.anarchy) {
            self.anarchy = anarchy;
        }
        if let Some(host) = non_empty(overrides.server) {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            if port > 0 {
                self.port = port;
            }
        }
    }

    /// Applies the override tail of a transfer invocation: everything after
    /// `<player> <amount>`. Two shapes are accepted for backward
    /// compatibility:
    ///
    /// - legacy fixed-position `username password host port anarchy`,
    ///   recognized when a fifth trailing argument exists and carries the
    ///   group-tag prefix;
    /// - positional-optional `[anarchy] [retrySeconds] [maxAttempts]
    ///   [username] [password] [host] [port]`.
    ///
    /// Numeric arguments that fail to parse keep the prior value.
    pub fn apply_transfer_overrides(&mut self, rest: &[String]) {
        if is_legacy_form(rest) {
            self.apply_legacy_overrides(rest);
        } else {
            self.apply_positional_overrides(rest);
        }
    }

    fn apply_legacy_overrides(&mut self, rest: &[String]) {
        if let Some(username) = arg(rest, 0) {
            self.username = username;
        }
        if let Some(password) = arg(rest, 1) {
            self.password = password;
        }
        if let Some(host) = arg(rest, 2) {
            self.host = host;
        }
        if let Some(port) = parse_arg::<u16>(rest, 3) {
            if port > 0 {
                self.port = port;
            }
        }
        if let Some(anarchy) = arg(rest, 4) {
            self.anarchy = anarchy;
        }
    }

    fn apply_positional_overrides(&mut self, rest: &[String]) {
        if let Some(anarchy) = arg(rest, 0) {
            self.anarchy = anarchy;
        }
        self.apply_retry_overrides(arg(rest, 1), arg(rest, 2));
        if let Some(username) = arg(rest, 3) {
            self.username = username;
        }
        if let Some(password) = arg(rest, 4) {
            self.password = password;
        }
        if let Some(host) = arg(rest, 5) {
            self.host = host;
        }
        if let Some(port) = parse_arg::<u16>(rest, 6) {
            if port > 0 {
                self.port = port;
            }
        }
    }

    /// Applies the optional `[anarchy] [retrySeconds] [maxAttempts]` tail of
    /// a `test` invocation.
    pub fn apply_test_overrides(&mut self, rest: &[String]) {
        if let Some(anarchy) = arg(rest, 0) {
            self.anarchy = anarchy;
        }
        self.apply_retry_overrides(arg(rest, 1), arg(rest, 2));
    }

    fn apply_retry_overrides(&mut self, retry_secs: Option<String>, max_attempts: Option<String>) {
        if let Some(secs) = retry_secs.and_then(|s| s.parse::<u64>().ok()) {
            if secs > 0 {
                self.retry_interval_ms = Some(secs * 1000);
            }
        }
        if let Some(max) = max_attempts.and_then(|s| s.parse::<u32>().ok()) {
            if max > 0 {
                self.max_pay_attempts = Some(max);
            }
        }
    }
}

/// The legacy fixed-position form always supplied all five values, ending in
/// the server-group tag.
fn is_legacy_form(rest: &[String]) -> bool {
    rest.len() >= 5 && rest[4].starts_with(GROUP_TAG_PREFIX)
}

fn arg(rest: &[String], index: usize) -> Option<String> {
    rest.get(index).filter(|s| !s.is_empty()).cloned()
}

fn parse_arg<T: std::str::FromStr>(rest: &[String], index: usize) -> Option<T> {
    rest.get(index).and_then(|s| s.parse().ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
