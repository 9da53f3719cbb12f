use crate::core::ConfigError;
use ini::{Ini, ParseOption};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// File read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "database.ini";

/// Section holding the connection settings.
pub const DEFAULT_SECTION: &str = "postgresql";

/// Option name to value, as read from one section.
pub type DbConfig = HashMap<String, String>;

/// Loads every entry of `section` from the INI file at `path`.
///
/// Keys are lowercased; values are returned verbatim. No key is required at
/// this stage: missing connection settings surface when connecting.
///
/// # Example
///
/// ```no_run
/// let config = studentdb::config::load_config("database.ini", "postgresql")?;
/// println!("{:?}", config.get("database"));
/// # Ok::<(), studentdb::core::ConfigError>(())
/// ```
pub fn load_config<P: AsRef<Path>>(path: P, section: &str) -> Result<DbConfig, ConfigError> {
    let path = path.as_ref();
    let file = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        file: file.clone(),
        source,
    })?;
    load_config_from_str(&content, section, &file)
}

/// Parses INI `content` and returns the entries of `section`.
///
/// `origin` names the source in error messages.
pub fn load_config_from_str(
    content: &str,
    section: &str,
    origin: &str,
) -> Result<DbConfig, ConfigError> {
    // Quotes and backslashes are part of the value, e.g. in passwords.
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..Default::default()
    };
    let ini = Ini::load_from_str_opt(content, options).map_err(|e| ConfigError::Parse {
        file: origin.to_string(),
        message: e.to_string(),
    })?;

    let properties = ini
        .section(Some(section))
        .ok_or_else(|| ConfigError::SectionNotFound {
            section: section.to_string(),
            file: origin.to_string(),
        })?;

    // Keys are case-insensitive, so `Database` and `database` collide.
    let mut config = DbConfig::new();
    for (key, value) in properties.iter() {
        let key = key.to_lowercase();
        if config.contains_key(&key) {
            return Err(ConfigError::DuplicateKey {
                section: section.to_string(),
                key,
                file: origin.to_string(),
            });
        }
        config.insert(key, value.to_string());
    }
    debug!(file = origin, section, keys = config.len(), "loaded configuration");
    Ok(config)
}
