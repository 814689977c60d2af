use crate::theme::Theme;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometry constants used when turning keys into rectangles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Gap left around each keycap, in drawing units.
    pub keycap_margin: f64,
    pub key_corner_radius: f64,
    pub plate_corner_radius: f64,
    /// Extra canvas added to the layout size; the view box starts at `-view_margin`.
    pub view_margin: f64,
    /// Lightness factor applied to the keycap color for the outer bezel.
    pub shade_factor: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            keycap_margin: 2.0,
            key_corner_radius: 2.0,
            plate_corner_radius: 5.0,
            view_margin: 10.0,
            shade_factor: 0.8,
        }
    }
}

/// Values a decoded key starts with before KLE properties apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyDefaults {
    /// One key pitch in drawing units (millimetres).
    pub key_width: f64,
    pub keycap_color: String,
    pub label_color: String,
    pub border_color: String,
    pub label_size: f64,
    pub label_style: u8,
}

impl Default for KeyDefaults {
    fn default() -> Self {
        Self {
            key_width: 19.05,
            keycap_color: "grey".to_string(),
            label_color: "black".to_string(),
            border_color: "none".to_string(),
            label_size: 3.0,
            label_style: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub keys: KeyDefaults,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    plate_stroke: Option<String>,
    plate_fill: Option<String>,
    plate_fill_opacity: Option<f64>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    keycap_margin: Option<f64>,
    key_corner_radius: Option<f64>,
    plate_corner_radius: Option<f64>,
    view_margin: Option<f64>,
    shade_factor: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyDefaultsFile {
    key_width: Option<f64>,
    keycap_color: Option<String>,
    label_color: Option<String>,
    border_color: Option<String>,
    label_size: Option<f64>,
    label_style: Option<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    keyboard: Option<LayoutConfigFile>,
    keys: Option<KeyDefaultsFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&contents, config)
        .with_context(|| format!("invalid config {}", path.display()))
}

/// Overlays a JSON config document onto `config`.
pub fn parse_config(contents: &str, mut config: Config) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::by_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => tracing::warn!(theme = theme_name, "unknown theme, keeping current"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = Some(v);
        }
        if let Some(v) = vars.plate_stroke {
            config.theme.plate_stroke = v;
        }
        if let Some(v) = vars.plate_fill {
            config.theme.plate_fill = v;
        }
        if let Some(v) = vars.plate_fill_opacity {
            config.theme.plate_fill_opacity = v;
        }
        if let Some(v) = vars.background {
            config.render.background = v.clone();
            config.theme.background = Some(v);
        }
    }

    if let Some(layout) = parsed.keyboard {
        if let Some(v) = layout.keycap_margin {
            config.layout.keycap_margin = v;
        }
        if let Some(v) = layout.key_corner_radius {
            config.layout.key_corner_radius = v;
        }
        if let Some(v) = layout.plate_corner_radius {
            config.layout.plate_corner_radius = v;
        }
        if let Some(v) = layout.view_margin {
            config.layout.view_margin = v;
        }
        if let Some(v) = layout.shade_factor {
            config.layout.shade_factor = v;
        }
    }

    if let Some(keys) = parsed.keys {
        if let Some(v) = keys.key_width {
            anyhow::ensure!(v > 0.0, "keys.keyWidth must be positive, got {v}");
            config.keys.key_width = v;
        }
        if let Some(v) = keys.keycap_color {
            config.keys.keycap_color = v;
        }
        if let Some(v) = keys.label_color {
            config.keys.label_color = v;
        }
        if let Some(v) = keys.border_color {
            config.keys.border_color = v;
        }
        if let Some(v) = keys.label_size {
            config.keys.label_size = v;
        }
        if let Some(v) = keys.label_style {
            config.keys.label_style = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_keeps_defaults() {
        let config = parse_config("{}", Config::default()).unwrap();
        assert_eq!(config.keys.key_width, 19.05);
        assert_eq!(config.layout.keycap_margin, 2.0);
        assert_eq!(config.theme.plate_stroke, "black");
    }

    #[test]
    fn overlays_sections() {
        let json = r##"{
            "theme": "dark",
            "themeVariables": { "plateStroke": "#ff0000" },
            "keyboard": { "viewMargin": 4, "shadeFactor": 0.5 },
            "keys": { "keyWidth": 18, "keycapColor": "#eeeeee", "labelStyle": 0 }
        }"##;
        let config = parse_config(json, Config::default()).unwrap();
        assert_eq!(config.theme.plate_stroke, "#ff0000");
        assert_eq!(config.theme.plate_fill, Theme::dark().plate_fill);
        assert_eq!(config.layout.view_margin, 4.0);
        assert_eq!(config.layout.shade_factor, 0.5);
        assert_eq!(config.layout.key_corner_radius, 2.0);
        assert_eq!(config.keys.key_width, 18.0);
        assert_eq!(config.keys.keycap_color, "#eeeeee");
        assert_eq!(config.keys.label_style, 0);
    }

    #[test]
    fn rejects_non_positive_key_width() {
        let err = parse_config(r#"{"keys": {"keyWidth": 0}}"#, Config::default()).unwrap_err();
        assert!(err.to_string().contains("keyWidth"));
    }

    #[test]
    fn missing_path_returns_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.render.width, 1200.0);
    }
}
