// Hierarchy:
//
// root
// ├── bin
// ├── config
// │   └── videos
// ├── data
// │   └── videos
// ├── thumbnails
// │   └── generated
// └── videos
use std::env;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub const ROOT_ENV: &str = "SNH48LIVE_ROOT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub bin: PathBuf,
    pub configs_dir: PathBuf,
    pub video_configs_dir: PathBuf,
    pub data_dir: PathBuf,
    pub video_metadata_dir: PathBuf,
    pub thumbnails_dir: PathBuf,
    pub generated_thumbnails_dir: PathBuf,
    pub videos_dir: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let configs_dir = root.join("config");
        let data_dir = root.join("data");
        let thumbnails_dir = root.join("thumbnails");
        ProjectPaths {
            bin: root.join("bin"),
            video_configs_dir: configs_dir.join("videos"),
            video_metadata_dir: data_dir.join("videos"),
            generated_thumbnails_dir: thumbnails_dir.join("generated"),
            videos_dir: root.join("videos"),
            configs_dir,
            data_dir,
            thumbnails_dir,
            root,
        }
    }

    /// Resolves the project root from an explicit argument, then
    /// `SNH48LIVE_ROOT`, then the current directory.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(root) = explicit {
            return Ok(Self::new(root));
        }
        if let Some(root) = env::var_os(ROOT_ENV) {
            return Ok(Self::new(root));
        }
        let cwd = env::current_dir().map_err(|err| Error::io(".", err))?;
        Ok(Self::new(cwd))
    }

    pub fn main_config_file(&self) -> PathBuf {
        self.configs_dir.join("main.yml")
    }

    pub fn stages_file(&self) -> PathBuf {
        self.data_dir.join("stages.yml")
    }

    pub fn playlists_file(&self) -> PathBuf {
        self.data_dir.join("playlists.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_layout_from_root() {
        let paths = ProjectPaths::new("/srv/live");
        assert_eq!(paths.video_configs_dir, Path::new("/srv/live/config/videos"));
        assert_eq!(
            paths.generated_thumbnails_dir,
            Path::new("/srv/live/thumbnails/generated")
        );
        assert_eq!(paths.stages_file(), Path::new("/srv/live/data/stages.yml"));
        assert_eq!(
            paths.playlists_file(),
            Path::new("/srv/live/data/playlists.json")
        );
        assert_eq!(paths.main_config_file(), Path::new("/srv/live/config/main.yml"));
    }

    #[test]
    fn explicit_root_wins() {
        let paths = ProjectPaths::discover(Some(Path::new("/tmp/elsewhere"))).unwrap();
        assert_eq!(paths.root, Path::new("/tmp/elsewhere"));
    }
}
