mod error;
pub mod styles;
pub mod zones;

pub use error::LayoutError;
pub use styles::{LABEL_SLOTS, LabelStyle, Placement, Zone};

use crate::color;
use crate::config::LayoutConfig;
use crate::drawing::{Drawing, Group, Rect, Text, ViewBox};
use crate::ir::{Key, Keyboard};
use crate::text::unescape_entities;
use crate::theme::Theme;

const SIZE_UNIT: &str = "mm";

/// Turns a decoded keyboard into drawing primitives.
///
/// The plate comes first, then one group per key in row order, so later keys
/// paint over earlier ones. Any invalid key fails the whole call.
pub fn compute_layout(
    keyboard: &Keyboard,
    theme: &Theme,
    config: &LayoutConfig,
) -> Result<Drawing, LayoutError> {
    let kw = keyboard.key_width;
    let width = keyboard.width();
    let height = keyboard.height();
    let view_width = width + config.view_margin;
    let view_height = height + config.view_margin;

    let mut drawing = Drawing::new(
        view_width,
        view_height,
        SIZE_UNIT,
        ViewBox {
            x: -config.view_margin,
            y: -config.view_margin,
            width: view_width,
            height: view_height,
        },
    );
    drawing.title = keyboard.metadata.name.clone();
    drawing.background = theme.background.clone();
    drawing.font_family = theme.font_family.clone();

    drawing.add_rect(Rect {
        x: -kw / 4.0,
        y: -kw / 4.0,
        width,
        height,
        rx: config.plate_corner_radius,
        ry: config.plate_corner_radius,
        stroke: theme.plate_stroke.clone(),
        fill: theme.plate_fill.clone(),
        fill_opacity: Some(theme.plate_fill_opacity),
    });

    for row in &keyboard.rows {
        for key in row {
            let group = drawing.add_group();
            layout_key(group, key, kw, config)?;
        }
    }

    tracing::debug!(
        keys = keyboard.key_count(),
        width = view_width,
        height = view_height,
        "computed keyboard layout"
    );

    Ok(drawing)
}

/// Top-left corner and pixel size of a key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl KeyBounds {
    pub fn of(key: &Key, key_width: f64) -> Self {
        let width = key.width * key_width;
        let height = key.height * key_width;
        Self {
            left: key.x - width / 2.0,
            top: key.y - height / 2.0,
            width,
            height,
        }
    }
}

fn layout_key(
    group: &mut Group,
    key: &Key,
    kw: f64,
    config: &LayoutConfig,
) -> Result<(), LayoutError> {
    let style = LabelStyle::new(key.label_style).ok_or_else(|| LayoutError::LabelStyle {
        label: key.label.clone(),
        row: key.row,
        column: key.column,
        style: key.label_style,
    })?;
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(key.width) || !valid(key.height) {
        return Err(LayoutError::KeySize {
            label: key.label.clone(),
            row: key.row,
            column: key.column,
            width: key.width,
            height: key.height,
        });
    }

    let color_error = |source| LayoutError::Color {
        label: key.label.clone(),
        source,
    };
    let keycap = color::normalize(&key.keycap_color).map_err(color_error)?;
    let bezel = color::darken(&key.keycap_color, config.shade_factor).map_err(color_error)?;

    let bounds = KeyBounds::of(key, kw);
    tracing::trace!(label = key.label.as_str(), ?bounds, "laying out key");

    if !key.decal {
        let margin = config.keycap_margin;
        group.add_rect(Rect {
            x: bounds.left,
            y: bounds.top,
            width: bounds.width - margin / 2.0,
            height: bounds.height - margin / 2.0,
            rx: config.key_corner_radius,
            ry: config.key_corner_radius,
            stroke: key.border_color.clone(),
            fill: bezel,
            fill_opacity: None,
        });
        group.add_rect(Rect {
            x: bounds.left + margin / 4.0,
            y: bounds.top + margin / 4.0,
            width: bounds.width - margin,
            height: bounds.height - margin,
            rx: config.key_corner_radius,
            ry: config.key_corner_radius,
            stroke: key.border_color.clone(),
            fill: keycap,
            fill_opacity: None,
        });
    }

    for (line_idx, line) in key.label.split('\n').take(LABEL_SLOTS).enumerate() {
        let Some(placement) = style.placement(line_idx) else {
            continue;
        };
        group.add_text(Text {
            content: unescape_entities(line).into_owned(),
            x: (placement.horizontal)(bounds.left, bounds.width, kw),
            y: (placement.vertical)(bounds.top, bounds.height, kw),
            fill: key.label_color.clone(),
            stroke: "none".to_string(),
            font_size: key.label_size,
            anchor: placement.anchor,
            baseline: placement.baseline,
        });
    }

    Ok(())
}
