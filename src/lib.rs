//! Tooling for preparing recorded SNH48 livestream performances for upload:
//! config file discovery and loading, stage/team classification, playlist
//! lookup and a terminal progress bar.

mod error;

pub mod config;
pub mod logging;
pub mod paths;
pub mod playlists;
pub mod progress;
pub mod stages;
pub mod vod;

pub use config::{Context, MainConfig};
pub use error::{Error, Result};
pub use paths::ProjectPaths;
pub use playlists::PlaylistMap;
pub use progress::ProgressBar;
pub use stages::StageRegistry;
pub use vod::{list_configs, load_config, ConfigFileDescriptor, LoadOptions, VodMetadata};
