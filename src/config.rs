use crate::graph::{GraphError, GraphLayout};
use crate::model::AnimationDirection;
use anyhow::{Context, Result};
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Text attributes for column labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelFont {
    pub bold: bool,
    pub italic: bool,
    pub underlined: bool,
}

impl LabelFont {
    pub fn modifiers(&self) -> Modifier {
        let mut modifier = Modifier::empty();
        if self.bold {
            modifier |= Modifier::BOLD;
        }
        if self.italic {
            modifier |= Modifier::ITALIC;
        }
        if self.underlined {
            modifier |= Modifier::UNDERLINED;
        }
        modifier
    }
}

/// User configuration, all sizes in terminal cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bar_length: f64,
    pub label_size: f64,
    pub bar_width: f64,
    pub column_width: f64,
    pub column_spacing: f64,
    pub label_font: LabelFont,
    pub label_color: Color,
    /// Fill for fractions that carry no color of their own
    pub default_color: Color,
    pub animation_direction: AnimationDirection,
    pub animation_duration_ms: u64,
    /// Event poll timeout, which is also the animation frame interval
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bar_length: 16.0,
            label_size: 2.0,
            bar_width: 4.0,
            column_width: 8.0,
            column_spacing: 2.0,
            label_font: LabelFont {
                bold: true,
                ..LabelFont::default()
            },
            label_color: Color::White,
            default_color: Color::DarkGray,
            animation_direction: AnimationDirection::BottomUp,
            animation_duration_ms: 600,
            tick_rate_ms: 33,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".stackbar"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the config from the default location, or defaults if absent
    pub fn load() -> Result<Config> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Load a config file; YAML when the extension says so, JSON otherwise
    pub fn load_from(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse config {}", path.display()))?,
            _ => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config {}", path.display()))?,
        };

        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save the config to disk
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_dir.join("config.json"))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config {}", path.display()))?;

        Ok(())
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    /// Widget layout described by this config
    pub fn layout(&self) -> Result<GraphLayout, GraphError> {
        let layout = GraphLayout {
            bar_length: self.bar_length,
            label_size: self.label_size,
            bar_width: self.bar_width,
            column_width: self.column_width,
            column_spacing: self.column_spacing,
            label_style: Style::default()
                .fg(self.label_color)
                .add_modifier(self.label_font.modifiers()),
            default_color: self.default_color,
            direction: self.animation_direction,
            duration: Duration::from_millis(self.animation_duration_ms),
        };
        layout.validate()?;
        Ok(layout)
    }
}
