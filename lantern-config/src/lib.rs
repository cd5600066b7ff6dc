use log::warn;
use logging::LoggingConfig;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use std::{fs, path::Path, sync::LazyLock};

pub mod logging;
mod lookup;

pub use lookup::LookupConfig;

pub static ADVANCED_CONFIG: LazyLock<AdvancedConfiguration> =
    LazyLock::new(AdvancedConfiguration::load);

pub static BASIC_CONFIG: LazyLock<BasicConfiguration> = LazyLock::new(BasicConfiguration::load);

/// Knobs most setups never need to touch.
#[derive(Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AdvancedConfiguration {
    pub logging: LoggingConfig,
    pub lookup: LookupConfig,
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfiguration {
    /// Whether the bundled vanilla recipes are registered.
    pub vanilla_recipes: bool,
    /// Directory with additional recipe files, one recipe per `*.json` file.
    /// Leave blank for none.
    pub custom_recipes_path: String,
    /// Rows of the crafting grid the console fills.
    pub crafting_rows: usize,
    /// Columns of the crafting grid the console fills.
    pub crafting_columns: usize,
}

impl Default for BasicConfiguration {
    fn default() -> Self {
        Self {
            vanilla_recipes: true,
            custom_recipes_path: "recipes".to_string(),
            crafting_rows: 3,
            crafting_columns: 3,
        }
    }
}

trait LoadTomlConfiguration {
    fn load() -> Self
    where
        Self: Sized + Default + Serialize + DeserializeOwned,
    {
        let path = Self::get_path();

        let config = if path.exists() {
            let file_content = fs::read_to_string(path)
                .unwrap_or_else(|_| panic!("Couldn't read configuration file at {:?}", path));

            toml::from_str(&file_content).unwrap_or_else(|err: toml::de::Error| {
                panic!(
                    "Couldn't parse config at {:?}. Reason: {}. This is probably caused by a config update, just delete the old config and start Lantern again",
                    path,
                    err.message()
                )
            })
        } else {
            let content = Self::default();

            match toml::to_string(&content) {
                Ok(serialized) => {
                    if let Err(err) = fs::write(path, serialized) {
                        warn!(
                            "Couldn't write default config to {:?}. Reason: {}",
                            path, err
                        );
                    }
                }
                Err(err) => warn!("Couldn't serialize default config {:?}. Reason: {}", path, err),
            }

            content
        };

        config.validate();
        config
    }

    fn get_path() -> &'static Path;

    fn validate(&self);
}

impl LoadTomlConfiguration for AdvancedConfiguration {
    fn get_path() -> &'static Path {
        Path::new("features.toml")
    }

    fn validate(&self) {
        self.lookup.validate()
    }
}

impl LoadTomlConfiguration for BasicConfiguration {
    fn get_path() -> &'static Path {
        Path::new("configuration.toml")
    }

    fn validate(&self) {
        assert!(
            (1..=9).contains(&self.crafting_rows),
            "Crafting rows must be between 1 and 9"
        );
        assert!(
            (1..=9).contains(&self.crafting_columns),
            "Crafting columns must be between 1 and 9"
        );
    }
}
