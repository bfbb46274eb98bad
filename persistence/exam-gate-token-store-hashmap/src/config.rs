//! Config for the hashmap token store.

use serde::{Deserialize, Serialize};
use std::{path::Path, str::FromStr, time::Duration};

use crate::Error;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct Config {
    /// How long an authorized token record stays readable. Records never
    /// expire when unset.
    #[serde(default, with = "humantime_serde")]
    pub record_expiration: Option<Duration>,
}

impl Config {
    pub fn from_file(config_path: impl AsRef<Path>) -> Result<Self, Error> {
        let config_string = std::fs::read_to_string(&config_path)
            .map_err(|e| Error::ConfigFileReadFailure(e, config_path.as_ref().to_path_buf()))?;
        Self::from_str(&config_string)
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(config_string: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(config_string)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_str() {
        let config = Config::from_str(r#"record_expiration = "12h""#).unwrap();
        assert_eq!(config.record_expiration, Some(Duration::from_secs(12 * 60 * 60)));

        let config = Config::from_str("").unwrap();
        assert_eq!(config.record_expiration, None);
    }
}
