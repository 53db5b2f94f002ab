use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config as ConfigBuilder, ConfigError, Environment, File, Map};
use serde::Deserialize;

use lichtrinh_core::request::Pace;
use lichtrinh_core::wizard::TripDefaults;

const DEFAULT_FILE: &str = "lichtrinh.toml";
const CONFIG_VAR: &str = "LICHTRINH_CONFIG";

// Unprefixed variables kept for deployments that predate the prefixed names.
const LEGACY_VARS: [(&str, &str); 2] = [
    ("API_BASE_URL", "api.base_url"),
    ("MAP_TILE_TOKEN", "map.tile_token"),
];

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Settings {
    pub api: ApiSettings,
    pub map: MapSettings,
    pub trip: TripSettings,
    pub export: ExportSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct MapSettings {
    #[serde(default)]
    pub tile_token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct TripSettings {
    pub destination_id: String,
    pub departure_province_id: String,
    #[serde(default)]
    pub departure_name: String,
    #[serde(default)]
    pub pace: Option<Pace>,
    #[serde(default)]
    pub keep_same_accommodation: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct ExportSettings {
    pub output_dir: PathBuf,
    #[serde(default)]
    pub font_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct LogSettings {
    pub level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Settings {
    /// Defaults, then the TOML file, then `LICHTRINH__SECTION__KEY`
    /// variables, then the legacy unprefixed variables.
    pub(crate) fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(config_path, None)
    }

    // `vars` replaces the process environment when given.
    fn load_with(
        config_path: Option<&Path>,
        vars: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let lookup = |name: &str| match &vars {
            Some(vars) => vars.get(name).cloned(),
            None => env::var(name).ok(),
        };

        let mut builder = ConfigBuilder::builder()
            .set_default("api.base_url", "")?
            .set_default("api.timeout_secs", 30)?
            .set_default("map.tile_token", "")?
            .set_default("trip.destination_id", "")?
            .set_default("trip.departure_province_id", "")?
            .set_default("trip.departure_name", "")?
            .set_default("export.output_dir", ".")?
            .set_default("log.level", "info")?;

        let explicit = config_path
            .map(Path::to_path_buf)
            .or_else(|| lookup(CONFIG_VAR).map(PathBuf::from));
        builder = match explicit {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => {
                let default_file = File::from(Path::new(DEFAULT_FILE)).required(false);
                builder.add_source(default_file)
            }
        };

        builder = builder.add_source(
            Environment::with_prefix("LICHTRINH")
                .separator("__")
                .try_parsing(true)
                .source(vars.clone()),
        );

        for (var, key) in LEGACY_VARS {
            if let Some(value) = lookup(var) {
                builder = builder.set_override(key, value)?;
            }
        }

        builder.build()?.try_deserialize()
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub(crate) fn trip_defaults(&self) -> TripDefaults {
        TripDefaults {
            destination_id: self.trip.destination_id.clone(),
            departure_province_id: self.trip.departure_province_id.clone(),
            departure_name: self.trip.departure_name.clone(),
            pace: self.trip.pace,
            keep_same_accommodation: self.trip.keep_same_accommodation,
        }
    }

    pub(crate) fn log_file(&self) -> PathBuf {
        self.log
            .file
            .clone()
            .unwrap_or_else(|| env::temp_dir().join("lichtrinh.log"))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
                .collect(),
        )
    }

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("lichtrinh.toml");
        fs::write(&path, body).expect("write config");
        path
    }

    #[test]
    fn defaults_apply_without_sources() {
        let settings = Settings::load_with(None, vars(&[])).expect("settings");
        assert_eq!(settings.api.base_url, "");
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert_eq!(settings.export.output_dir, PathBuf::from("."));
        assert_eq!(settings.log.level, "info");
        assert!(settings.trip.pace.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(
            &dir,
            r#"
[api]
base_url = "https://api.example.test"
timeout_secs = 5

[trip]
destination_id = "ha-giang"
departure_province_id = "ha-noi"
departure_name = "Hà Nội"
pace = "relaxed"
"#,
        );

        let settings = Settings::load_with(Some(&path), vars(&[])).expect("settings");
        assert_eq!(settings.api.base_url, "https://api.example.test");
        assert_eq!(settings.timeout(), Duration::from_secs(5));

        let defaults = settings.trip_defaults();
        assert_eq!(defaults.destination_id, "ha-giang");
        assert_eq!(defaults.departure_name, "Hà Nội");
        assert_eq!(defaults.pace, Some(Pace::Relaxed));
    }

    #[test]
    fn environment_overrides_file_and_legacy_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "[map]\ntile_token = \"from-file\"\n");

        let settings = Settings::load_with(
            Some(&path),
            vars(&[
                ("LICHTRINH__MAP__TILE_TOKEN", "from-env"),
                ("LICHTRINH__API__BASE_URL", "https://prefixed.test"),
                ("API_BASE_URL", "https://legacy.test"),
            ]),
        )
        .expect("settings");
        assert_eq!(settings.map.tile_token, "from-env");
        assert_eq!(settings.api.base_url, "https://legacy.test");
    }

    #[test]
    fn config_path_from_variable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "[log]\nlevel = \"debug\"\n");
        let path_text = path.to_string_lossy().into_owned();

        let settings =
            Settings::load_with(None, vars(&[(CONFIG_VAR, path_text.as_str())])).expect("settings");
        assert_eq!(settings.log.level, "debug");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("absent.toml");
        let err = Settings::load_with(Some(&missing), vars(&[])).expect_err("missing file");
        assert!(err.to_string().contains("absent"), "unexpected error: {err}");
    }
}
