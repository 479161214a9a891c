use failure::Fail;
use log::LevelFilter;
use serde::{Deserialize, de::{Deserializer, Error, Unexpected}};
use std::{collections::HashMap, fs};

use crate::{permissions::Permission, utils::SingleInit};

static CONFIG: SingleInit<Config> = SingleInit::uninit();

pub fn load() -> crate::Result<&'static Config> {
    CONFIG.get_or_try_init(|| {
        let data = fs::read("config.toml").map_err(ReadConfigurationError)?;
        toml::from_slice(&data).map_err(|e| ConfigurationError(e).into())
    })
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub database: Option<Database>,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub lifecycle: Lifecycle,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Database {
    /// Database connection URL.
    pub url: String,
}

/// Logging configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Logging {
    /// Default logging level.
    #[serde(default = "default_level_filter")]
    pub level: LevelFilter,
    /// Custom filters.
    #[serde(default)]
    pub filters: HashMap<String, LevelFilter>,
}

impl Default for Logging {
    fn default() -> Logging {
        Logging {
            level: default_level_filter(),
            filters: HashMap::new(),
        }
    }
}

/// Review workflow configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Lifecycle {
    /// Permission required to withdraw a version from review, in addition to
    /// being its author. Set to `"none"` to make withdrawal ownership-only.
    #[serde(
        default = "default_cancel_permission",
        deserialize_with = "de_cancel_permission",
    )]
    pub cancel_permission: Option<Permission>,
}

impl Default for Lifecycle {
    fn default() -> Lifecycle {
        Lifecycle {
            cancel_permission: default_cancel_permission(),
        }
    }
}

#[derive(Debug, Fail)]
#[fail(display = "Cannot read configuration file")]
pub struct ReadConfigurationError(#[fail(cause)] std::io::Error);

#[derive(Debug, Fail)]
#[fail(display = "Invalid configuration: {}", _0)]
pub struct ConfigurationError(#[fail(cause)] toml::de::Error);

fn default_level_filter() -> LevelFilter {
    LevelFilter::Info
}

fn default_cancel_permission() -> Option<Permission> {
    Some(Permission::SubmitDocument)
}

/// Deserialize a permission name, with `"none"` disabling the check.
fn de_cancel_permission<'de, D>(d: D) -> Result<Option<Permission>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(d)?;

    if name == "none" {
        return Ok(None);
    }

    Permission::from_slug(&name)
        .map(Some)
        .ok_or_else(|| D::Error::invalid_value(
            Unexpected::Str(&name), &"a permission name or \"none\""))
}
