mod filename;
pub use filename::{list_configs, scan_configs, ConfigFileDescriptor, ConfigScan};

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::from_yaml_document;
use crate::{Error, Result};

/// Tag present on every upload.
pub const BRAND_TAG: &str = "SNH48";

pub const PLATFORM_HOME_URL: &str = "http://live.snh48.com/";

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%dT%H:%M%:z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Upload metadata of a single performance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VodMetadata {
    pub title: String,
    pub m3u8: Option<String>,
    pub vod: Option<String>,
    pub starting_time: DateTime<FixedOffset>,
    pub tags: Vec<String>,
    pub thumbnail: Option<PathBuf>,
    pub playlists: Vec<String>,
    pub public: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawVodConfig {
    title: Option<String>,
    m3u8: Option<String>,
    vod: Option<String>,
    datetime: Option<String>,
    tags: Option<Vec<String>>,
    thumbnail: Option<String>,
    playlists: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Directory bare thumbnail filenames are resolved against.
    pub thumbnails_dir: PathBuf,
    /// Substituted for missing `m3u8` and `vod` keys when set.
    pub url_fallback: Option<String>,
}

/// Loads a performance config and normalizes it into upload metadata.
///
/// A missing `title` is reported as [`Error::MissingRequiredField`]; the
/// caller decides whether that ends the process.
pub fn load_config(path: &Path, options: &LoadOptions) -> Result<VodMetadata> {
    let text = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
    let raw: RawVodConfig = from_yaml_document(&text).map_err(|err| Error::yaml(path, err))?;

    let title = match raw.title {
        Some(title) => title,
        None => {
            return Err(Error::MissingRequiredField {
                field: "title",
                path: path.to_path_buf(),
            })
        }
    };

    let starting_time = match raw.datetime {
        Some(value) => parse_datetime(&value).ok_or_else(|| Error::InvalidDatetime {
            value,
            path: path.to_path_buf(),
        })?,
        None => Utc::now().into(),
    };

    let fallback = || options.url_fallback.clone();
    let m3u8 = raw.m3u8.or_else(fallback);
    let vod = raw.vod.or_else(fallback);

    let mut tags = raw.tags.unwrap_or_default();
    if !tags.iter().any(|tag| tag == BRAND_TAG) {
        tags.insert(0, BRAND_TAG.to_string());
    }

    // Path::join keeps absolute paths as they are.
    let thumbnail = raw
        .thumbnail
        .filter(|name| !name.is_empty())
        .map(|name| options.thumbnails_dir.join(name));

    debug!("loaded {}: {}", path.display(), title);
    Ok(VodMetadata {
        title,
        m3u8,
        vod,
        starting_time,
        tags,
        thumbnail,
        playlists: raw.playlists.unwrap_or_default(),
        public: None,
    })
}

/// Parses the timestamp formats accepted in config files; naive values are UTC.
///
/// ```
/// let t = snh48live::vod::parse_datetime("2018-01-01 19:00:00+08:00").unwrap();
/// assert_eq!(t.to_rfc3339(), "2018-01-01T19:00:00+08:00");
///
/// let t = snh48live::vod::parse_datetime("2018-01-01").unwrap();
/// assert_eq!(t.to_rfc3339(), "2018-01-01T00:00:00+00:00");
/// ```
pub fn parse_datetime(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed);
    }
    if let Some(parsed) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
    {
        return Some(parsed);
    }
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Some(Utc.from_utc_datetime(&naive).into())
}
