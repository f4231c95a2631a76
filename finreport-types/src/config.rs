//! Configuration types shared by the reporter, server and client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Framing limits applied to every message on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireConfig {
    /// Maximum body length in bytes accepted by `decode` and produced by `encode`.
    ///
    /// A length prefix above this value is rejected before any body buffer is
    /// allocated.
    pub max_frame_len: u32,
}

impl WireConfig {
    /// Default maximum frame body length (16 MiB).
    pub const DEFAULT_MAX_FRAME_LEN: u32 = 16 * 1024 * 1024;
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            max_frame_len: Self::DEFAULT_MAX_FRAME_LEN,
        }
    }
}

/// Configuration for building reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Timeout applied to every individual data source call.
    ///
    /// A timeout is handled exactly like that source's failure.
    pub source_timeout: Duration,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source_timeout: Duration::from_secs(10),
        }
    }
}

/// Configuration for the report server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Framing limits for inbound commands and outbound responses.
    pub wire: WireConfig,
}

/// Configuration for a client session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Framing limits for outbound commands and inbound responses.
    pub wire: WireConfig,
    /// Upper bound on establishing the TCP connection.
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            wire: WireConfig::default(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}
