//! Configuration record with defaults and RON persistence.

use std::path::{Path, PathBuf};

use dymaxion_globe::{AnimationBlend, DrapeConfig, GroupLayout, SurfaceFeatureProjector};
use dymaxion_mesh::TessellationConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name used inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Tessellation style, fidelity and globe radius.
    pub tessellation: TessellationConfig,
    /// Starting inflation and unfold blend.
    pub animation: AnimationBlend,
    /// Whole faces or the split Dymaxion outline.
    pub layout: GroupLayout,
    /// Feature draping settings.
    pub drape: DrapeConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter (e.g., "debug", "info,dymaxion_globe=trace").
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Platform config directory joined with `dymaxion`, if one exists.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dymaxion"))
    }

    /// Check the numeric settings without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tessellation.validate()?;
        SurfaceFeatureProjector::from_config(&self.drape)?;
        Ok(())
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        log::debug!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use dymaxion_mesh::TessellationStyle;

    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("style: Recursive"));
        assert!(ron_str.contains("fidelity: 3"));
        assert!(ron_str.contains("layout: Whole"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.layout = GroupLayout::Split;
        config.animation = AnimationBlend::new(0.5, 0.25);
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let ron_str = "(tessellation: (style: Strip, fidelity: 4))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.tessellation.style, TessellationStyle::Strip);
        assert_eq!(config.tessellation.radius, 1.0);
        assert_eq!(config.drape, DrapeConfig::default());
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.tessellation.fidelity = 12;
        assert!(matches!(config.validate(), Err(ConfigError::Tessellation(_))));

        config.tessellation.fidelity = 2;
        config.drape.max_angle_step_deg = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Drape(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.tessellation.style = TessellationStyle::Independent;
        config.tessellation.fidelity = 10;
        config.tessellation.radius = 6371.0;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("dymaxion");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.layout = GroupLayout::Split;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.layout), Some(GroupLayout::Split));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_default_dir_is_namespaced() {
        if let Some(dir) = Config::default_dir() {
            assert!(dir.ends_with("dymaxion"));
        }
    }
}
