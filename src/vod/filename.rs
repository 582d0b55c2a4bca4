use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::{Error, Result};

static CONFIG_FILE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?P<date>\d{8})",
        // live_id 0 means there is no corresponding live.snh48.com entry
        r"-(?P<branch>bej|gnz|shy|ckg)?(?P<live_id>\d+)-",
        // one-off specials put the (abbreviated) title here
        r"(?P<stage>.*?)",
        // only for performances within a regular stage
        r"(-(?P<perf_num>\d{2}))?",
        r"\.yml$",
    ))
    .expect("config filename pattern is valid")
});

/// Structured form of a config filename,
/// `{date}-{live_id}-{stage}[-{perf_num}].yml`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigFileDescriptor {
    /// `YYYYMMDD`
    pub date: String,
    /// Sister-group prefix of the live id, if any.
    pub branch: Option<String>,
    pub live_id: String,
    pub stage: String,
    pub perf_num: Option<String>,
}

impl ConfigFileDescriptor {
    /// # Example
    ///
    /// ```
    /// use snh48live::vod::ConfigFileDescriptor;
    ///
    /// let desc = ConfigFileDescriptor::parse("20180101-421-心的旅程-02.yml").unwrap();
    /// assert_eq!(desc.live_id, "421");
    /// assert_eq!(desc.stage, "心的旅程");
    /// assert_eq!(desc.perf_num.as_deref(), Some("02"));
    ///
    /// assert!(ConfigFileDescriptor::parse("notes.yml").is_none());
    /// ```
    pub fn parse(file_name: &str) -> Option<Self> {
        let caps = CONFIG_FILE_PATTERN.captures(file_name)?;
        let group = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
        Some(ConfigFileDescriptor {
            date: group("date")?,
            branch: group("branch"),
            live_id: group("live_id")?,
            stage: group("stage")?,
            perf_num: group("perf_num"),
        })
    }

    /// Inverse of [`ConfigFileDescriptor::parse`] for parsed descriptors.
    ///
    /// ```
    /// use snh48live::vod::ConfigFileDescriptor;
    ///
    /// let name = "20180101-0-SNH48 Group 年度总决选";
    /// let desc = ConfigFileDescriptor::parse(&format!("{}.yml", name)).unwrap();
    /// assert_eq!(desc.perf_num, None);
    /// assert_eq!(desc.reconstruct_filename(), format!("{}.yml", name));
    /// ```
    pub fn reconstruct_filename(&self) -> String {
        self.to_string()
    }

    /// Orders by date, then by live id as an integer.
    pub fn sort_key_cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| cmp_numeric(&self.live_id, &other.live_id))
    }
}

impl fmt::Display for ConfigFileDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-", self.date)?;
        if let Some(branch) = &self.branch {
            f.write_str(branch)?;
        }
        write!(f, "{}-{}", self.live_id, self.stage)?;
        if let Some(perf_num) = &self.perf_num {
            write!(f, "-{}", perf_num)?;
        }
        f.write_str(".yml")
    }
}

// Compares digit strings by value, whatever their length.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[derive(Debug, Default)]
pub struct ConfigScan {
    pub configs: Vec<(PathBuf, ConfigFileDescriptor)>,
    pub malformed: Vec<PathBuf>,
}

/// Globs `dir` for config files and parses their names, sorted by date and
/// live id. Files with malformed names are collected separately.
pub fn scan_configs(
    dir: &Path,
    include_past: bool,
    glob_pattern: Option<&str>,
) -> Result<ConfigScan> {
    let glob_pattern = glob_pattern.unwrap_or(if include_past { "**/*.yml" } else { "*.yml" });
    let full_pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        glob_pattern
    );
    let entries = glob::glob(&full_pattern).map_err(|source| Error::Pattern {
        pattern: full_pattern.clone(),
        source,
    })?;

    let mut scan = ConfigScan::default();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                warn!("could not read {}: {}", err.path().display(), err.error());
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        let descriptor = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(ConfigFileDescriptor::parse);
        match descriptor {
            Some(descriptor) => scan.configs.push((path, descriptor)),
            None => scan.malformed.push(path),
        }
    }
    scan.configs.sort_by(|(_, a), (_, b)| a.sort_key_cmp(b));
    Ok(scan)
}

/// Like [`scan_configs`], warning once per malformed filename.
pub fn list_configs(
    dir: &Path,
    include_past: bool,
    glob_pattern: Option<&str>,
) -> Result<Vec<(PathBuf, ConfigFileDescriptor)>> {
    let scan = scan_configs(dir, include_past, glob_pattern)?;
    for path in &scan.malformed {
        let name = path.file_name().unwrap_or(path.as_os_str());
        warn!("malformed filename '{}'", name.to_string_lossy());
    }
    Ok(scan.configs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str) -> ConfigFileDescriptor {
        ConfigFileDescriptor::parse(name).unwrap()
    }

    #[test]
    fn parses_perf_num_only_when_two_digits() {
        let desc = parse("20180101-5-foo-01.yml");
        assert_eq!(desc.stage, "foo");
        assert_eq!(desc.perf_num.as_deref(), Some("01"));

        let desc = parse("20180101-5-foo-123.yml");
        assert_eq!(desc.stage, "foo-123");
        assert_eq!(desc.perf_num, None);
    }

    #[test]
    fn parses_branch_prefix() {
        let desc = parse("20180101-gnz12-bar.yml");
        assert_eq!(desc.branch.as_deref(), Some("gnz"));
        assert_eq!(desc.live_id, "12");
        assert_eq!(desc.reconstruct_filename(), "20180101-gnz12-bar.yml");
    }

    #[test]
    fn rejects_malformed_names() {
        for name in [
            "2018011-5-foo.yml",
            "20180101-foo.yml",
            "20180101-5-foo.yaml",
            "20180101-x5-foo.yml",
            "main.yml",
        ] {
            assert!(ConfigFileDescriptor::parse(name).is_none(), "{}", name);
        }
    }

    #[test]
    fn reconstruct_inverts_parse() {
        for name in [
            "20180101-5-foo.yml",
            "20180101-0-Team X 《梦想的旗帜》-03.yml",
            "20181231-bej100-新春特别公演.yml",
            "20180101-5--01.yml",
        ] {
            assert_eq!(parse(name).reconstruct_filename(), name);
        }
    }

    #[test]
    fn live_ids_compare_numerically() {
        assert_eq!(cmp_numeric("5", "10"), Ordering::Less);
        assert_eq!(cmp_numeric("010", "9"), Ordering::Greater);
        assert_eq!(cmp_numeric("007", "7"), Ordering::Equal);
        assert_eq!(
            cmp_numeric("99999999999999999999999", "100000000000000000000000"),
            Ordering::Less
        );
    }
}
