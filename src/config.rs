use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::ColumnLayout;
use crate::data::range::EnergyWindow;

/// Environment variable naming a settings file.
pub const CONFIG_ENV: &str = "RUSTY_COHP_CONFIG";
/// Settings file picked up from the working directory.
pub const CONFIG_FILE: &str = "rusty-cohp.json";

/// Plotting defaults. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Curve-axis bounds applied by "Reset axes".
    pub reset_x_min: f64,
    pub reset_x_max: f64,
    /// Initial energy window; also applied by "Reset axes".
    pub energy_window: EnergyWindow,
    /// Default colours, assigned to pairs by index.
    pub color_cycle: Vec<String>,
    /// Colours offered in the pair table.
    pub color_options: Vec<String>,
    /// Dataset name used when an upload carries no usable file name.
    pub demo_name: String,
    pub line_width: f32,
    pub column_layout: ColumnLayout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reset_x_min: -30.0,
            reset_x_max: 30.0,
            energy_window: EnergyWindow::new(-8.0, 2.0),
            color_cycle: ["red", "green", "blue", "orange"].map(String::from).to_vec(),
            color_options: [
                "blue", "red", "green", "gray", "black", "orange", "purple", "pink", "silver",
            ]
            .map(String::from)
            .to_vec(),
            demo_name: String::from("CeCoAl4"),
            line_width: 2.5,
            column_layout: ColumnLayout::Lobster,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(settings.sanitized())
    }

    /// Settings for this process: `$RUSTY_COHP_CONFIG`, else `rusty-cohp.json`
    /// in the working directory, else the built-in defaults. A broken file is
    /// logged and ignored.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from(CONFIG_FILE)).filter(|p| p.exists()));
        let Some(path) = path else {
            return Settings::default();
        };
        match Settings::from_file(&path) {
            Ok(settings) => {
                log::info!("settings loaded from {}", path.display());
                settings
            }
            Err(e) => {
                log::error!("ignoring settings file: {e:#}");
                Settings::default()
            }
        }
    }

    /// Drop colour names that do not resolve; restore defaults for lists
    /// that end up empty.
    fn sanitized(mut self) -> Self {
        let defaults = Settings::default();
        self.color_cycle = crate::color::valid_names(&self.color_cycle);
        if self.color_cycle.is_empty() {
            self.color_cycle = defaults.color_cycle;
        }
        self.color_options = crate::color::valid_names(&self.color_options);
        if self.color_options.is_empty() {
            self.color_options = defaults.color_options;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "energy_window": {{ "min": -12.0, "max": 4.0 }}, "column_layout": "bare" }}"#
        )
        .unwrap();
        let s = Settings::from_file(file.path()).unwrap();
        assert_eq!(s.energy_window, EnergyWindow::new(-12.0, 4.0));
        assert_eq!(s.column_layout, ColumnLayout::Bare);
        assert_eq!(s.reset_x_max, 30.0);
        assert_eq!(s.color_cycle, Settings::default().color_cycle);
    }

    #[test]
    fn unknown_colours_are_dropped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "color_cycle": ["teal", "nope"], "color_options": ["nope"] }}"#).unwrap();
        let s = Settings::from_file(file.path()).unwrap();
        assert_eq!(s.color_cycle, vec!["teal"]);
        assert_eq!(s.color_options, Settings::default().color_options);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(Settings::from_file(file.path()).is_err());
    }
}
