use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Aggregation, Config, Logging, Reporting, Server};

/// Loads the application configuration from `config.toml` in the working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new("config.toml"))
}

/// Loads the configuration from `path`, overlaid by `LIFEINDEX__*` environment variables.
///
/// The file is optional: every section has defaults. The result is validated
/// before it is returned.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    load_with_environment(path, environment())
}

fn environment() -> config::Environment {
    // e.g. LIFEINDEX__SERVER__PORT=8080
    config::Environment::with_prefix("LIFEINDEX")
        .separator("__")
        .try_parsing(true)
}

fn load_with_environment(path: &Path, env: config::Environment) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{RoundingPolicy, Statistic, YearDerivation};
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_with_environment(Path::new("does-not-exist.toml"), env_with(&[])).unwrap();
        assert_eq!(config.reporting.utc_offset_minutes, -300);
        assert_eq!(config.aggregation.policy.statistic, Statistic::Mean);
        assert!(config.aggregation.smooth_series);
        assert_eq!(config.server.port, 3000);
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn reads_every_section() {
        let file = write_config(
            r#"
            [reporting]
            utc_offset_minutes = 60

            [aggregation]
            statistic = "median"
            year_derivation = "from_months"
            series_rounding = "ceiling"
            smooth_series = false

            [server]
            host = "127.0.0.1"
            port = 8080

            [logging]
            directory = "logs"
            "#,
        );

        let config = load_with_environment(file.path(), env_with(&[])).unwrap();
        assert_eq!(config.reporting.utc_offset_minutes, 60);
        assert_eq!(config.aggregation.policy.statistic, Statistic::Median);
        assert_eq!(config.aggregation.policy.year_derivation, YearDerivation::FromMonths);
        assert_eq!(config.aggregation.policy.series_rounding, RoundingPolicy::Ceiling);
        assert!(!config.aggregation.smooth_series);
        assert_eq!(config.server.socket_addr().unwrap().port(), 8080);
        assert_eq!(config.logging.directory.unwrap().to_str(), Some("logs"));
    }

    fn env_with(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn single_env_field_overlays_defaults_without_a_file() {
        let env = env_with(&[("LIFEINDEX__SERVER__PORT", "8080")]);
        let config = load_with_environment(Path::new("does-not-exist.toml"), env).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.reporting.utc_offset_minutes, -300);
    }

    #[test]
    fn env_overrides_one_field_of_a_file_section() {
        let file = write_config("[reporting]\nutc_offset_minutes = 60\n\n[server]\nport = 9000\n");
        let env = env_with(&[("LIFEINDEX__REPORTING__UTC_OFFSET_MINUTES", "-120")]);
        let config = load_with_environment(file.path(), env).unwrap();
        assert_eq!(config.reporting.utc_offset_minutes, -120);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn rejects_impossible_offsets() {
        let file = write_config("[reporting]\nutc_offset_minutes = 2000\n");
        assert!(matches!(
            load_with_environment(file.path(), env_with(&[])),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn rejects_unknown_statistics() {
        let file = write_config("[aggregation]\nstatistic = \"mode\"\n");
        assert!(matches!(
            load_with_environment(file.path(), env_with(&[])),
            Err(ConfigError::LoadError(_))
        ));
    }
}
