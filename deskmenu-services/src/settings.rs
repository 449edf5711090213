// SPDX-License-Identifier: MIT OR Apache-2.0
use anyhow::Result;
use deskmenu_core::config::MenuConfig;
use deskmenu_core::math::Vector2;
use serde::Deserialize;
use smol::fs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use xdg::BaseDirectories;

/// XDG prefix under which settings files are looked up.
pub const SETTINGS_PREFIX: &str = "deskmenu-0";

/// Errors produced while reading a settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("failed to read settings file {path:?}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The XDG base directories could not be resolved.
    #[error("failed to resolve XDG base directories: {0}")]
    BaseDirs(#[from] xdg::BaseDirectoriesError),
    /// The file is not valid TOML for [Settings].
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of its allowed range.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Offending key.
        key: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// The settings file structure. Every field is optional; missing fields keep earlier values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,
    /// Menu settings
    #[serde(default)]
    pub menu: MenuSettings,
    /// Any other sections are captured here
    #[serde(flatten)]
    pub other: HashMap<String, toml::Value>,
}

/// The `[general]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralSettings {
    /// Enable debug mode.
    pub debug: Option<bool>,
    /// Log level requested for the host application.
    pub log_level: Option<String>,
}

/// The `[menu]` section. Each field overrides the matching [MenuConfig] value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuSettings {
    /// Padding around each label, in pixels.
    pub label_padding: Option<f64>,
    /// Extra width added to the widest item.
    pub width_reserve: Option<f64>,
    /// Glyph shown after labels of items that own a submenu.
    pub submenu_indicator: Option<String>,
    /// Right-edge margin of the viewport check.
    pub edge_margin_x: Option<f64>,
    /// Bottom-edge margin of the viewport check.
    pub edge_margin_y: Option<f64>,
    /// Hover reconciliation interval, in milliseconds.
    pub reconcile_interval_ms: Option<u64>,
    /// Initial viewport width.
    pub viewport_width: Option<f64>,
    /// Initial viewport height.
    pub viewport_height: Option<f64>,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let menu = &self.menu;
        for (key, value) in [
            ("menu.label_padding", menu.label_padding),
            ("menu.width_reserve", menu.width_reserve),
            ("menu.edge_margin_x", menu.edge_margin_x),
            ("menu.edge_margin_y", menu.edge_margin_y),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(SettingsError::Invalid {
                        key,
                        reason: format!("expected a non-negative number, got {}", value),
                    });
                }
            }
        }
        for (key, value) in [
            ("menu.viewport_width", menu.viewport_width),
            ("menu.viewport_height", menu.viewport_height),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value <= 0.0 {
                    return Err(SettingsError::Invalid {
                        key,
                        reason: format!("expected a positive number, got {}", value),
                    });
                }
            }
        }
        if menu.reconcile_interval_ms == Some(0) {
            return Err(SettingsError::Invalid {
                key: "menu.reconcile_interval_ms",
                reason: "interval must be at least 1ms".to_string(),
            });
        }
        Ok(())
    }
}

/// Registry for managing menu settings.
pub struct SettingsRegistry {
    general: GeneralSettings,
    menu: MenuConfig,
    other: HashMap<String, toml::Value>,
}

impl Default for SettingsRegistry {
    fn default() -> Self {
        Self {
            general: GeneralSettings {
                debug: Some(false),
                log_level: None,
            },
            menu: MenuConfig::default(),
            other: HashMap::new(),
        }
    }
}

impl SettingsRegistry {
    /// Create a new SettingsRegistry and load configuration from standard locations.
    pub async fn new() -> Result<Self> {
        let mut registry = Self::default();
        registry.load().await?;
        Ok(registry)
    }

    /// Load configuration from standard locations in precedence order.
    ///
    /// Order (later overrides earlier):
    /// 1. System Data: /usr/share/deskmenu-0/config.toml (and XDG_DATA_DIRS)
    /// 2. System Config: /etc/deskmenu-0/config.toml (and XDG_CONFIG_DIRS)
    /// 3. User Config: ~/.config/deskmenu-0/config.toml (XDG_CONFIG_HOME)
    pub async fn load(&mut self) -> Result<()> {
        let xdg_dirs = BaseDirectories::with_prefix(SETTINGS_PREFIX).map_err(SettingsError::from)?;
        let filename = "config.toml";

        // 1. Load from system data directories
        for path in xdg_dirs.find_data_files(filename).rev() {
            self.load_file(&path).await;
        }

        // 2. Load from system config directories
        for path in xdg_dirs.find_config_files(filename).rev() {
            self.load_file(&path).await;
        }

        // 3. Load from user config directory
        let user_config_path = xdg_dirs.get_config_home().join(filename);
        if user_config_path.exists() {
            self.load_file(&user_config_path).await;
        }

        Ok(())
    }

    async fn load_file(&mut self, path: &Path) {
        log::info!("Loading menu settings from: {:?}", path);
        match read_settings(path).await {
            Ok(settings) => self.merge(settings),
            Err(SettingsError::Read { source, .. }) => {
                log::warn!("Failed to read settings file {:?}: {}", path, source);
            },
            Err(e) => {
                log::error!("Failed to load settings file {:?}: {}", path, e);
            },
        }
    }

    /// Merge loaded settings into the current configuration.
    pub fn merge(&mut self, other: Settings) {
        // General
        if let Some(debug) = other.general.debug {
            self.general.debug = Some(debug);
        }
        if other.general.log_level.is_some() {
            self.general.log_level = other.general.log_level;
        }

        // Menu
        let menu = other.menu;
        let style = &mut self.menu.style;
        if let Some(padding) = menu.label_padding {
            style.label_padding = padding;
        }
        if let Some(reserve) = menu.width_reserve {
            style.width_reserve = reserve;
        }
        if let Some(indicator) = menu.submenu_indicator {
            style.submenu_indicator = indicator;
        }
        if let Some(margin) = menu.edge_margin_x {
            style.edge_margin_x = margin;
        }
        if let Some(margin) = menu.edge_margin_y {
            style.edge_margin_y = margin;
        }
        if let Some(interval) = menu.reconcile_interval_ms {
            self.menu.reconcile_interval = Duration::from_millis(interval);
        }
        let viewport = self.menu.viewport;
        self.menu.viewport = Vector2::new(
            menu.viewport_width.unwrap_or(viewport.x),
            menu.viewport_height.unwrap_or(viewport.y),
        );

        // Other
        self.other.extend(other.other);
    }

    /// The merged menu configuration.
    pub fn menu_config(&self) -> &MenuConfig {
        &self.menu
    }

    /// Whether debug mode was requested.
    pub fn debug(&self) -> bool {
        self.general.debug.unwrap_or(false)
    }

    /// Requested log level, if any.
    pub fn log_level(&self) -> Option<&str> {
        self.general.log_level.as_deref()
    }

    /// Unrecognised top-level sections.
    pub fn other(&self) -> &HashMap<String, toml::Value> {
        &self.other
    }

    /// Load configuration from multiple custom paths asynchronously.
    pub async fn load_from_paths_async(&mut self, paths: Vec<PathBuf>) -> Vec<Result<()>> {
        let mut results = Vec::new();

        for path in paths {
            let result = read_settings(&path).await.map(|settings| self.merge(settings));
            if let Err(e) = &result {
                log::warn!("Skipping settings file {:?}: {}", path, e);
            }
            results.push(result.map_err(anyhow::Error::from));
        }

        results
    }

    /// Reload configuration asynchronously (re-runs the full load process).
    pub async fn reload_async(&mut self) -> Result<()> {
        // Reset to defaults
        *self = Self::default();

        // Reload everything
        self.load().await
    }
}

async fn read_settings(path: &Path) -> Result<Settings, SettingsError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Settings::from_toml(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides_only_present_fields() {
        let mut registry = SettingsRegistry::default();
        let settings = Settings::from_toml(
            r#"
            [general]
            debug = true

            [menu]
            edge_margin_x = 4.0
            viewport_width = 1280.0
            reconcile_interval_ms = 80
            "#,
        )
        .unwrap();

        registry.merge(settings);

        let config = registry.menu_config();
        assert!(registry.debug());
        assert_eq!(config.style.edge_margin_x, 4.0);
        assert_eq!(config.style.edge_margin_y, MenuConfig::default().style.edge_margin_y);
        assert_eq!(config.viewport, Vector2::new(1280.0, MenuConfig::default().viewport.y));
        assert_eq!(config.reconcile_interval, Duration::from_millis(80));
    }

    #[test]
    fn test_merge_boolean_override() {
        let mut registry = SettingsRegistry::default();
        registry.merge(Settings::from_toml("[general]\ndebug = true").unwrap());
        registry.merge(Settings::from_toml("[general]\ndebug = false").unwrap());
        assert!(!registry.debug(), "Debug should be false");
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = Settings::from_toml("[menu]\nreconcile_interval_ms = 0").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { key: "menu.reconcile_interval_ms", .. }));
    }

    #[test]
    fn test_rejects_negative_padding() {
        let err = Settings::from_toml("[menu]\nlabel_padding = -1.0").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { .. }));
    }

    #[test]
    fn test_unknown_sections_are_kept() {
        let mut registry = SettingsRegistry::default();
        registry.merge(Settings::from_toml("[desktop]\nicon_grid = 8").unwrap());
        assert!(registry.other().contains_key("desktop"));
    }
}
