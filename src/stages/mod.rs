use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

/// Team of performances that don't belong to a registered stage.
pub const JOINT_TEAM: &str = "joint";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StageInfo {
    pub team: String,
}

/// Stage name to team, kept in the order stages are declared in
/// `data/stages.yml`.
#[derive(Debug, Clone, Default)]
pub struct StageRegistry {
    stages: Vec<(String, StageInfo)>,
}

impl StageRegistry {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        Self::from_yaml_str(&text).map_err(|err| Error::yaml(path, err))
    }

    pub fn from_yaml_str(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // Mapping preserves insertion order, which title_to_stage relies on.
        let mapping: serde_yaml::Mapping = serde_yaml::from_str(text)?;
        let stages = mapping
            .into_iter()
            .map(|(name, info)| -> std::result::Result<_, serde_yaml::Error> {
                let name: String = serde_yaml::from_value(name)?;
                let info: StageInfo = serde_yaml::from_value(info)?;
                Ok((name, info))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(StageRegistry { stages })
    }

    pub fn from_entries<I, S, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let stages = entries
            .into_iter()
            .map(|(name, team)| (name.into(), StageInfo { team: team.into() }))
            .collect();
        StageRegistry { stages }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn get(&self, stage: &str) -> Option<&StageInfo> {
        self.stages
            .iter()
            .find(|(name, _)| name == stage)
            .map(|(_, info)| info)
    }

    /// Returns the first registered stage whose name occurs in `title`.
    ///
    /// # Example
    ///
    /// ```
    /// use snh48live::stages::StageRegistry;
    ///
    /// let registry = StageRegistry::from_entries([("美丽世界", "NII"), ("世界", "X")]);
    /// assert_eq!(registry.title_to_stage("Team NII《美丽世界》公演"), Some("美丽世界"));
    /// assert_eq!(registry.title_to_stage("Team HII 公演"), None);
    /// ```
    pub fn title_to_stage(&self, title: &str) -> Option<&str> {
        self.stages
            .iter()
            .map(|(name, _)| name.as_str())
            .find(|name| title.contains(name))
    }

    pub fn stage_to_team(&self, stage: Option<&str>) -> Result<&str> {
        match stage {
            None => Ok(JOINT_TEAM),
            Some(stage) => self
                .get(stage)
                .map(|info| info.team.as_str())
                .ok_or_else(|| Error::UnrecognizedStage(stage.to_string())),
        }
    }
}
