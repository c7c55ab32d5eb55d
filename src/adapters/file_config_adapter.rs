//! INI file configuration adapter.
//!
//! Section and key names are case-insensitive (configparser's default).

use crate::domain::error::FrontierError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;
use std::str::FromStr;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FrontierError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| FrontierError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, FrontierError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| FrontierError::ConfigParse {
                file: "<inline>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_typed<T: FromStr>(
        &self,
        section: &str,
        key: &str,
        kind: &str,
    ) -> Result<Option<T>, FrontierError> {
        let Some(raw) = self.config.get(section, key) else {
            return Ok(None);
        };
        raw.trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| invalid_value(section, key, &raw, kind))
    }
}

fn invalid_value(section: &str, key: &str, raw: &str, kind: &str) -> FrontierError {
    FrontierError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("'{}' is not {}", raw, kind),
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, FrontierError> {
        self.parse_typed(section, key, "an integer")
    }

    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, FrontierError> {
        self.parse_typed(section, key, "a number")
    }

    fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, FrontierError> {
        let Some(raw) = self.config.get(section, key) else {
            return Ok(None);
        };
        match raw.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            _ => Err(invalid_value(
                section,
                key,
                &raw,
                "a boolean (true/yes/1 or false/no/0)",
            )),
        }
    }
}
