//! Daemon configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use curate_types::{CurationParams, Identity};
use curate_utils::LogFormat;

use crate::DaemonError;

/// Configuration for a curation daemon.
///
/// Deployment fields (`owner`, `escrow_account`, `initial_min_stake`) are only
/// read by `init`; afterwards the persisted world is authoritative.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Identity allowed to change governance parameters.
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Account that holds escrowed stakes and the protocol treasury.
    #[serde(default = "default_escrow_account")]
    pub escrow_account: String,

    /// Minimum stake at deployment.
    #[serde(default = "default_initial_min_stake")]
    pub initial_min_stake: u64,

    /// Snapshot file for the persisted world.
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_owner() -> String {
    "deployer".to_string()
}

fn default_escrow_account() -> String {
    "deployer.content-curation-dao".to_string()
}

fn default_initial_min_stake() -> u64 {
    100
}

fn default_state_path() -> PathBuf {
    PathBuf::from("./curate_data/world.bin")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DaemonConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DaemonError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DaemonError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, DaemonError> {
        let config: Self = toml::from_str(s).map_err(|e| DaemonError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, DaemonError> {
        toml::to_string_pretty(self).map_err(|e| DaemonError::Config(e.to_string()))
    }

    /// Reject values that would deploy an unusable world.
    pub fn validate(&self) -> Result<(), DaemonError> {
        if !Identity::new(self.owner.as_str()).is_valid() {
            return Err(DaemonError::Config("owner must be non-empty with no whitespace".into()));
        }
        if !Identity::new(self.escrow_account.as_str()).is_valid() {
            return Err(DaemonError::Config("escrow_account must be non-empty with no whitespace".into()));
        }
        if self.owner == self.escrow_account {
            return Err(DaemonError::Config(
                "escrow_account must differ from owner".into(),
            ));
        }
        self.log_format()?;
        Ok(())
    }

    pub fn log_format(&self) -> Result<LogFormat, DaemonError> {
        self.log_format
            .parse()
            .map_err(|e: curate_utils::logging::LoggingError| DaemonError::Config(e.to_string()))
    }

    pub fn params(&self) -> CurationParams {
        CurationParams::with_min_stake(u128::from(self.initial_min_stake))
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            escrow_account: default_escrow_account(),
            initial_min_stake: default_initial_min_stake(),
            state_path: default_state_path(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
