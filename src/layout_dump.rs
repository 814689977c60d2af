use crate::drawing::{Drawing, Rect, Text};
use crate::ir::Keyboard;
use crate::layout::KeyBounds;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub name: Option<String>,
    pub author: Option<String>,
    pub key_width: f64,
    pub width: f64,
    pub height: f64,
    pub view_box: [f64; 4],
    pub plate: Option<Rect>,
    pub keys: Vec<KeyDump>,
}

#[derive(Debug, Serialize)]
pub struct KeyDump {
    pub label_lines: Vec<String>,
    pub row: f64,
    pub column: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub bounds: [f64; 4],
    pub label_style: u8,
    pub decal: bool,
    pub rects: Vec<Rect>,
    pub labels: Vec<Text>,
}

impl LayoutDump {
    pub fn from_layout(drawing: &Drawing, keyboard: &Keyboard) -> Self {
        let keys = keyboard
            .keys()
            .zip(drawing.groups())
            .map(|(key, group)| {
                let bounds = KeyBounds::of(key, keyboard.key_width);
                KeyDump {
                    label_lines: key.label.split('\n').map(str::to_string).collect(),
                    row: key.row,
                    column: key.column,
                    x: key.x,
                    y: key.y,
                    width: key.width,
                    height: key.height,
                    bounds: [bounds.left, bounds.top, bounds.width, bounds.height],
                    label_style: key.label_style,
                    decal: key.decal,
                    rects: group.rects().cloned().collect(),
                    labels: group.texts().cloned().collect(),
                }
            })
            .collect();

        let vb = drawing.view_box;
        LayoutDump {
            name: keyboard.metadata.name.clone(),
            author: keyboard.metadata.author.clone(),
            key_width: keyboard.key_width,
            width: keyboard.width(),
            height: keyboard.height(),
            view_box: [vb.x, vb.y, vb.width, vb.height],
            plate: drawing.rects().next().cloned(),
            keys,
        }
    }
}

pub fn write_layout_dump(
    path: &Path,
    drawing: &Drawing,
    keyboard: &Keyboard,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(drawing, keyboard);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KeyDefaults, LayoutConfig};
    use crate::layout::compute_layout;
    use crate::parser::parse_kle;
    use crate::theme::Theme;

    #[test]
    fn dump_pairs_keys_with_groups() {
        let parsed =
            parse_kle(r#"{name:"Two"},["Q\nW",{d:true},"note"]"#, &KeyDefaults::default())
                .unwrap();
        let drawing =
            compute_layout(&parsed.keyboard, &Theme::classic(), &LayoutConfig::default()).unwrap();
        let dump = LayoutDump::from_layout(&drawing, &parsed.keyboard);
        assert_eq!(dump.name.as_deref(), Some("Two"));
        assert_eq!(dump.keys.len(), 2);
        assert_eq!(dump.keys[0].label_lines, vec!["Q", "W"]);
        assert_eq!(dump.keys[0].rects.len(), 2);
        assert_eq!(dump.keys[0].labels.len(), 2);
        assert!(dump.keys[1].decal);
        assert!(dump.keys[1].rects.is_empty());
        assert_eq!(dump.view_box[0], -10.0);

        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["keys"][0]["labels"][0]["anchor"], "start");
        assert_eq!(json["keys"][0]["labels"][1]["baseline"], "after-edge");
        assert!(json["plate"].is_object());
    }
}
