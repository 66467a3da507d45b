//! Analysis settings and static source constants.

use std::{fs, path::Path, str::FromStr};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::grouping::CustomGrouping;

/// County GeoJSON (one feature per län, `name` property).
pub const COUNTY_GEOJSON_URL: &str =
    "https://raw.githubusercontent.com/okfse/sweden-geojson/master/swedish_regions.geojson";

/// Eurostat GISCO NUTS level-2 regions, 1:60M, EPSG:3035.
pub const NUTS2_GEOJSON_URL: &str =
    "https://gisco-services.ec.europa.eu/distribution/v2/nuts/geojson/NUTS_RG_60M_2021_3035_LEVL_2.geojson";

/// Reference system of the county feed (WGS84 lon/lat).
pub const COUNTY_EPSG: u32 = 4326;

/// Reference system of the GISCO feed (ETRS89 / LAEA Europe).
pub const NUTS2_EPSG: u32 = 3035;

/// Aggregation level of a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    County,
    Nuts2,
    Transport,
    Custom,
}

impl Level {
    pub fn to_str(&self) -> &'static str {
        match self {
            Level::County => "county",
            Level::Nuts2 => "nuts2",
            Level::Transport => "transport",
            Level::Custom => "custom",
        }
    }
}

impl FromStr for Level {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "county" => Ok(Level::County),
            "nuts2" => Ok(Level::Nuts2),
            "transport" => Ok(Level::Transport),
            "custom" => Ok(Level::Custom),
            _ => bail!("[config] Unknown level: {name}"),
        }
    }
}

/// Settings for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub region_column: Option<String>,
    pub value_column: Option<String>,
    pub level: Level,
    pub groups: Option<CustomGrouping>,
}

impl AnalysisConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("[config] Failed to parse analysis config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read config file: {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// A custom level needs groups to aggregate over.
    pub fn validate(&self) -> Result<()> {
        if self.level == Level::Custom && self.groups.as_ref().is_none_or(CustomGrouping::is_empty) {
            bail!("[config] Level 'custom' requires a non-empty 'groups' object");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::Grouping;

    #[test]
    fn parses_full_config() {
        let config = AnalysisConfig::from_json_str(r#"{
            "region_column": "lan_kod",
            "value_column": "befolkning",
            "level": "custom",
            "groups": {"Norra": ["Norrbotten"], "Södra": ["Skåne", "Blekinge"]}
        }"#).unwrap();
        assert_eq!(config.region_column.as_deref(), Some("lan_kod"));
        assert_eq!(config.level, Level::Custom);
        assert_eq!(config.groups.unwrap().labels(), ["Norra", "Södra"]);
    }

    #[test]
    fn defaults_apply() {
        let config = AnalysisConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.level, Level::County);
    }

    #[test]
    fn custom_without_groups_is_rejected() {
        assert!(AnalysisConfig::from_json_str(r#"{"level": "custom"}"#).is_err());
        assert!(AnalysisConfig::from_json_str(r#"{"level": "lan"}"#).is_err());
    }

    #[test]
    fn file_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"level": "nuts2"}"#).unwrap();
        assert_eq!(AnalysisConfig::from_json_file(&path).unwrap().level, Level::Nuts2);
        assert!(AnalysisConfig::from_json_file(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn level_names_round_trip() {
        for level in [Level::County, Level::Nuts2, Level::Transport, Level::Custom] {
            assert_eq!(level.to_str().parse::<Level>().unwrap(), level);
        }
    }
}
