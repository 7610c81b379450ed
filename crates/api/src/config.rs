use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::http::HeaderName;

use gatehouse_auth::PolicySnapshot;

use crate::authz::DEFAULT_IDENTITY_HEADER;

// Server configuration sourced from environment variables.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Snapshot to load at startup, if any.
    pub policy_file: Option<PathBuf>,
    pub identity_header: HeaderName,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source (tests pass a closure).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = lookup("GATEHOUSE_BIND")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .with_context(|| "parse GATEHOUSE_BIND")?;
        let policy_file = lookup("GATEHOUSE_POLICY_FILE")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        let identity_header = lookup("GATEHOUSE_IDENTITY_HEADER")
            .unwrap_or_else(|| DEFAULT_IDENTITY_HEADER.to_string())
            .parse::<HeaderName>()
            .with_context(|| "parse GATEHOUSE_IDENTITY_HEADER")?;
        Ok(Self {
            bind_addr,
            policy_file,
            identity_header,
        })
    }
}

/// Read and validate a policy snapshot file.
pub fn load_snapshot(path: &Path) -> Result<PolicySnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read policy file: {}", path.display()))?;
    PolicySnapshot::from_json_str(&raw)
        .with_context(|| format!("parse policy file: {}", path.display()))
}
