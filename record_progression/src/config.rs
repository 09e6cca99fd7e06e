use config::{Config, ConfigError, File, FileFormat};
use std::{
    env,
    path::{Path, PathBuf},
};

use record_progression_cli_types::ErrorPolicy;

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".recordprogression.toml";

/// Settings that can be given in a configuration file instead of on the
/// command line. Unset or invalid entries are `None`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Settings {
    pub input_path: Option<PathBuf>,
    pub on_error: Option<ErrorPolicy>,
    pub gender: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub present: Option<f64>,
}

impl Settings {
    /// Read the settings from all configuration files. Problems reading the
    /// files are logged and result in empty settings.
    pub fn load() -> Settings {
        match read_hierarchical_config() {
            Ok(config) => Settings::from_config(&config),
            Err(e) => {
                log::warn!("Could not read configuration: {}", e);
                Settings::default()
            }
        }
    }

    pub fn from_config(config: &Config) -> Settings {
        let on_error = config.get_string("input.on_error").ok().and_then(|s| {
            s.parse::<ErrorPolicy>()
                .map_err(|e| log::warn!("Ignoring input.on_error: {}", e))
                .ok()
        });

        let present = match config.get_float("plot.present") {
            Ok(year) => Some(year),
            Err(ConfigError::NotFound(_)) => None,
            Err(e) => {
                log::warn!("Ignoring plot.present: {}", e);
                None
            }
        };

        Settings {
            input_path: config.get_string("input.path").ok().map(PathBuf::from),
            on_error,
            gender: config.get_string("plot.gender").ok(),
            output_dir: config.get_string("plot.output_dir").ok().map(PathBuf::from),
            present,
        }
    }
}

/// The user-wide configuration file (XDG_CONFIG_HOME or ~/.config).
pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
        return Some(
            Path::new(&xdg_config_home)
                .join("record-progression")
                .join("config.toml"),
        );
    }
    dirs_next::home_dir().map(|home| {
        home.join(".config")
            .join("record-progression")
            .join("config.toml")
    })
}

/// The closest local configuration file, searched upward from the current directory.
pub fn find_local_config_path() -> Option<PathBuf> {
    let mut current_dir = env::current_dir().ok()?;
    loop {
        let candidate = current_dir.join(LOCAL_CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current_dir.pop() {
            return None;
        }
    }
}

/// Read hierarchical configuration (user-wide -> local override)
pub fn read_hierarchical_config() -> Result<Config, ConfigError> {
    let mut builder = Config::builder();

    // 1. User-wide config
    if let Some(user_path) = user_config_path() {
        builder = builder.add_source(
            File::from(user_path)
                .format(FileFormat::Toml)
                .required(false),
        );
    }

    // 2. Local config overrides the user-wide one
    if let Some(local_path) = find_local_config_path() {
        log::debug!("Using local configuration {}", local_path.display());
        builder = builder.add_source(
            File::from(local_path)
                .format(FileFormat::Toml)
                .required(false),
        );
    }

    builder.build()
}
