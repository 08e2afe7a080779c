use anyhow::{Result, anyhow};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api: Api,
    pub session: Session,
    pub log: Log,
}

#[derive(Debug, Deserialize)]
pub struct Api {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub refresh_timeout_secs: u64,
}

impl Api {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn refresh_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh_timeout_secs)
    }
}

#[derive(Debug, Deserialize)]
pub struct Session {
    pub backend: String, // "file" or "memory"
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

const ENV_PREFIX: &str = "EVENTBOARD";

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_settings_reads_all_sections() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[api]
base_url = "http://localhost:9000/api/v1"
request_timeout_secs = 3
refresh_timeout_secs = 2

[session]
backend = "memory"
path = "unused.json"

[log]
filter = "debug"
"#
        )
        .unwrap();

        let settings = parse_settings(file.path().to_str()).unwrap();

        assert_eq!(settings.api.base_url, "http://localhost:9000/api/v1");
        assert_eq!(settings.api.request_timeout(), Duration::from_secs(3));
        assert_eq!(settings.api.refresh_timeout(), Duration::from_secs(2));
        assert_eq!(settings.session.backend, "memory");
        assert_eq!(settings.log.filter, "debug");
    }

    #[test]
    fn parse_settings_fails_on_missing_file() {
        assert!(parse_settings(Some("does/not/exist.toml")).is_err());
    }
}
