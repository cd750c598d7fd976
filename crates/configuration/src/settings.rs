use crate::error::ConfigError;
use analytics::{AggregationPolicy, ReportingZone};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// The largest offset from UTC any real timezone uses.
const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reporting: Reporting,
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let offset = self.reporting.utc_offset_minutes;
        if offset.abs() > MAX_OFFSET_MINUTES {
            return Err(ConfigError::ValidationError(format!(
                "reporting.utc_offset_minutes must be within ±{}, got {}",
                MAX_OFFSET_MINUTES, offset
            )));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must not be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// The fixed timezone every "today" is resolved in.
    pub fn reporting_zone(&self) -> Result<ReportingZone, ConfigError> {
        ReportingZone::from_offset_minutes(self.reporting.utc_offset_minutes)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Where "today" is.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Reporting {
    /// Minutes east of UTC. -300 is New York standard time.
    pub utc_offset_minutes: i32,
}

impl Default for Reporting {
    fn default() -> Self {
        Self {
            utc_offset_minutes: -300,
        }
    }
}

/// Contains the arithmetic choices of the analytics engine.
#[derive(Debug, Clone, Deserialize)]
pub struct Aggregation {
    #[serde(flatten)]
    pub policy: AggregationPolicy,
    /// Emit the 3-point smoothed year series for rendering.
    #[serde(default = "default_smooth_series")]
    pub smooth_series: bool,
}

fn default_smooth_series() -> bool {
    true
}

impl Default for Aggregation {
    fn default() -> Self {
        Self {
            policy: AggregationPolicy::default(),
            smooth_series: default_smooth_series(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Server {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("invalid server address: {}", e)))
    }
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Logging {
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
}
