use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::error;

use crate::{Error, Result};

static PLAYLIST_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]{34}$").expect("playlist id pattern is valid"));

/// Whether `s` looks like a platform playlist id rather than a name.
///
/// ```
/// assert!(snh48live::playlists::is_playlist_id("PL2K0eMHSUjhfKSyMxDVN7HUyOrbp0Z0ul"));
/// assert!(!snh48live::playlists::is_playlist_id("Team SII"));
/// ```
pub fn is_playlist_id(s: &str) -> bool {
    PLAYLIST_ID_PATTERN.is_match(s)
}

/// Playlist names to platform ids, from `data/playlists.json`.
#[derive(Debug, Clone, Default)]
pub struct PlaylistMap {
    source: PathBuf,
    ids: HashMap<String, String>,
}

impl PlaylistMap {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        let ids = serde_json::from_str(&text).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(PlaylistMap {
            source: path.to_path_buf(),
            ids,
        })
    }

    pub fn from_entries<I, S, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let ids = entries
            .into_iter()
            .map(|(name, id)| (name.into(), id.into()))
            .collect();
        PlaylistMap {
            source: PathBuf::new(),
            ids,
        }
    }

    pub fn try_name_to_id(&self, name: &str) -> Result<&str> {
        self.ids
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::PlaylistNotFound(name.to_string()))
    }

    pub fn name_to_id(&self, name: &str, report_error: bool) -> Option<&str> {
        match self.try_name_to_id(name) {
            Ok(id) => Some(id),
            Err(err) => {
                if report_error {
                    error!("{} in {}", err, self.source.display());
                }
                None
            }
        }
    }

    /// Ids of `names` in order. Entries that already are playlist ids pass
    /// through; unknown names are logged and left out.
    pub fn resolve<'a, I>(&'a self, names: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a String>,
    {
        names
            .into_iter()
            .filter_map(|name| match self.name_to_id(name, false) {
                Some(id) => Some(id),
                None if is_playlist_id(name) => Some(name.as_str()),
                None => self.name_to_id(name, true),
            })
            .collect()
    }
}
