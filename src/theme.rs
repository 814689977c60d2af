use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: Option<String>,
    pub plate_stroke: String,
    pub plate_fill: String,
    pub plate_fill_opacity: f64,
    pub background: Option<String>,
}

impl Theme {
    /// Black outline plate on a transparent canvas.
    pub fn classic() -> Self {
        Self {
            font_family: None,
            plate_stroke: "black".to_string(),
            plate_fill: "none".to_string(),
            plate_fill_opacity: 0.0,
            background: None,
        }
    }

    /// Dark canvas with a filled plate. The classic plate is outline only;
    /// this one sets `plate_fill_opacity` to 1 on purpose.
    pub fn dark() -> Self {
        Self {
            font_family: Some("Inter, Segoe UI, system-ui, sans-serif".to_string()),
            plate_stroke: "#9AA4B2".to_string(),
            plate_fill: "#2B2F36".to_string(),
            plate_fill_opacity: 1.0,
            background: Some("#1E2127".to_string()),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" => Some(Self::classic()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_plate_is_outline_only() {
        let theme = Theme::default();
        assert_eq!(theme.plate_fill, "none");
        assert_eq!(theme.plate_fill_opacity, 0.0);
        assert!(theme.background.is_none());
    }

    #[test]
    fn dark_plate_is_filled() {
        let theme = Theme::by_name("dark").unwrap();
        assert_eq!(theme.plate_fill_opacity, 1.0);
        assert_ne!(theme.plate_fill, "none");
        assert!(Theme::by_name("neon").is_none());
    }
}
