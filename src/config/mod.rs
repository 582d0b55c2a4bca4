use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::paths::ProjectPaths;
use crate::vod::{LoadOptions, PLATFORM_HOME_URL};
use crate::{Error, Result};

/// Contents of `config/main.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MainConfig {
    /// Read for the mail notifier, which is not part of this crate.
    pub notifications: bool,
    pub mailto: Option<String>,
    /// Default missing stream and archive URLs to the platform home page.
    pub vod_fallback: bool,
}

impl MainConfig {
    /// A missing file or an empty document yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("{} not found, using defaults", path.display());
                return Ok(MainConfig::default());
            }
            Err(err) => return Err(Error::io(path, err)),
        };
        from_yaml_document(&text).map_err(|err| Error::yaml(path, err))
    }
}

/// Everything a tool needs, loaded once at startup and handed down.
#[derive(Debug, Clone)]
pub struct Context {
    pub paths: ProjectPaths,
    pub main: MainConfig,
}

impl Context {
    pub fn load(paths: ProjectPaths) -> Result<Self> {
        let main = MainConfig::load(&paths.main_config_file())?;
        Ok(Context { paths, main })
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            thumbnails_dir: self.paths.generated_thumbnails_dir.clone(),
            url_fallback: self
                .main
                .vod_fallback
                .then(|| PLATFORM_HOME_URL.to_string()),
        }
    }
}

/// Deserializes the first YAML document of `text`. An empty stream or a
/// null document (`~`, `--- # comment`) yields `T::default()`.
pub(crate) fn from_yaml_document<T>(text: &str) -> std::result::Result<T, serde_yaml::Error>
where
    T: DeserializeOwned + Default,
{
    match serde_yaml::Deserializer::from_str(text).next() {
        None => Ok(T::default()),
        Some(document) => Ok(Option::<T>::deserialize(document)?.unwrap_or_default()),
    }
}
