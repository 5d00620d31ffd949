use serde::Serialize;
use tracing::error;

use crate::config::SessionConfig;
use crate::error::SessionError;

/// The one JSON object every invocation prints to stdout.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(rename = "isConnected", skip_serializing_if = "Option::is_none")]
    pub is_connected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
}

impl RunReport {
    pub fn transfer_success(player: &str, amount: i64) -> Self {
        Self {
            success: true,
            player: Some(player.to_string()),
            amount: Some(amount),
            is_connected: None,
            error: None,
            message: format!("Successfully transferred {} coins to {}", amount, player),
        }
    }

    pub fn transfer_failure(error: &SessionError) -> Self {
        Self {
            success: false,
            player: None,
            amount: None,
            is_connected: None,
            error: Some(error.code().to_string()),
            message: error.to_string(),
        }
    }

    pub fn test_success() -> Self {
        Self {
            success: true,
            player: None,
            amount: None,
            is_connected: Some(true),
            error: None,
            message: "Bot connection test successful".to_string(),
        }
    }

    pub fn test_failure(error: &SessionError) -> Self {
        Self {
            success: false,
            player: None,
            amount: None,
            is_connected: Some(false),
            error: Some(error.code().to_string()),
            message: error.to_string(),
        }
    }

    /// Invalid CLI input, reported before any connection is attempted.
    pub fn usage_error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            player: None,
            amount: None,
            is_connected: None,
            error: Some(code.to_string()),
            message: message.to_string(),
        }
    }

    /// Prints the report as a single JSON line on stdout.
    pub fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(line) => println!("{}", line),
            Err(e) => error!("Failed to serialize report: {}", e),
        }
    }
}

#[derive(Serialize)]
struct AppliedConfig<'a> {
    info: &'static str,
    config: &'a SessionConfig,
}

/// Prints the effective configuration as a JSON diagnostic on stderr,
/// credentials included, before a transfer is attempted.
pub fn emit_applied_config(config: &SessionConfig) {
    let diagnostic = AppliedConfig {
        info: "applied_config",
        config,
    };

    match serde_json::to_string(&diagnostic) {
        Ok(line) => eprintln!("{}", line),
        Err(e) => error!("Failed to serialize applied config: {}", e),
    }
}
