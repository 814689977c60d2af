//! Decoder for keyboard-layout-editor (KLE) raw data.
//!
//! Accepts either the "raw data" text shown in the KLE editor (rows without
//! the enclosing brackets, JSON5 syntax) or a downloaded KLE JSON document.

use crate::config::KeyDefaults;
use crate::ir::{Key, Keyboard, KeyboardMetadata};
use anyhow::{Context, Result, anyhow, bail};
use serde_json::{Map, Value};

const MAX_LABEL_STYLE: i64 = 9;
const MIN_LABEL_SIZE: f64 = 1.0;
const MAX_LABEL_SIZE: f64 = 9.0;

/// Properties that only make sense for rotated or stepped keys.
const UNSUPPORTED_PROPS: &[&str] = &["r", "rx", "ry", "x2", "y2", "w2", "h2", "l", "n"];

#[derive(Debug)]
pub struct ParseOutput {
    pub keyboard: Keyboard,
    /// Property names that were present but not applied.
    pub ignored: Vec<String>,
}

/// Attributes that carry over from one key to the next.
#[derive(Debug, Clone)]
struct KeyTemplate {
    keycap_color: String,
    label_color: String,
    border_color: String,
    label_size: f64,
    label_style: u8,
}

/// Attributes that reset after every key.
#[derive(Debug, Clone)]
struct PendingKey {
    sticky: KeyTemplate,
    width: f64,
    height: f64,
    decal: bool,
}

impl PendingKey {
    fn from_template(template: &KeyTemplate) -> Self {
        Self {
            sticky: template.clone(),
            width: 1.0,
            height: 1.0,
            decal: false,
        }
    }
}

struct Cursor {
    key_width: f64,
    row: f64,
    column: f64,
    x: f64,
    y: f64,
}

pub fn parse_kle(input: &str, defaults: &KeyDefaults) -> Result<ParseOutput> {
    anyhow::ensure!(
        defaults.key_width > 0.0,
        "key width must be positive, got {}",
        defaults.key_width
    );
    let rows = load_rows(input)?;

    let mut keyboard = Keyboard::new(defaults.key_width);
    let mut ignored = Vec::new();
    let mut template = KeyTemplate {
        keycap_color: defaults.keycap_color.clone(),
        label_color: defaults.label_color.clone(),
        border_color: defaults.border_color.clone(),
        label_size: defaults.label_size,
        label_style: defaults.label_style,
    };
    let mut pending = PendingKey::from_template(&template);
    let mut cursor = Cursor {
        key_width: defaults.key_width,
        row: 0.0,
        column: 0.0,
        x: 0.0,
        y: defaults.key_width / 2.0,
    };

    let mut rows = rows.into_iter().peekable();
    if let Some(Value::Object(meta)) = rows.peek() {
        keyboard.metadata = parse_metadata(meta);
        rows.next();
    }

    for (row_idx, row) in rows.enumerate() {
        let items = match row {
            Value::Array(items) => items,
            other => bail!("row {row_idx}: expected an array, found {}", kind_of(&other)),
        };
        let mut keys = Vec::new();

        for (item_idx, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(props) => {
                    apply_props(&props, &mut template, &mut pending, &mut cursor, &mut ignored)
                        .with_context(|| format!("row {row_idx}, item {item_idx}"))?;
                }
                Value::String(label) => {
                    let key = place_key(label, &pending, &mut cursor);
                    // Extent covers every key rectangle, tall keys included.
                    keyboard.columns = keyboard.columns.max(key.column + key.width);
                    keyboard.row_count = keyboard.row_count.max(key.row + key.height);
                    tracing::trace!(
                        row = row_idx,
                        label = key.label.as_str(),
                        x = key.x,
                        y = key.y,
                        "decoded key"
                    );
                    keys.push(key);
                    pending = PendingKey::from_template(&template);
                }
                other => bail!(
                    "row {row_idx}, item {item_idx}: expected a key label or property object, \
                     found {}",
                    kind_of(&other)
                ),
            }
        }

        keyboard.rows.push(keys);
        cursor.x = 0.0;
        cursor.y += cursor.key_width;
        cursor.column = 0.0;
        cursor.row += 1.0;
        keyboard.row_count = keyboard.row_count.max(cursor.row);
    }

    tracing::debug!(
        rows = keyboard.rows.len(),
        keys = keyboard.key_count(),
        width = keyboard.width(),
        height = keyboard.height(),
        "decoded KLE layout"
    );

    Ok(ParseOutput { keyboard, ignored })
}

/// Parses the input into the list of top-level KLE entries.
fn load_rows(input: &str) -> Result<Vec<Value>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let wrapped = format!("[{trimmed}]");
    let parsed: Value =
        json5::from_str(&wrapped).map_err(|err| anyhow!("invalid KLE data: {err}"))?;
    let Value::Array(mut entries) = parsed else {
        bail!("invalid KLE data: expected a list of rows");
    };

    // A full KLE document already has the outer brackets.
    let is_document = entries.len() == 1
        && entries[0].as_array().is_some_and(|inner| {
            inner.iter().any(Value::is_array) && inner.iter().all(|v| v.is_array() || v.is_object())
        });
    if is_document {
        if let Some(Value::Array(inner)) = entries.pop() {
            return Ok(inner);
        }
    }
    Ok(entries)
}

fn parse_metadata(meta: &Map<String, Value>) -> KeyboardMetadata {
    let text = |name: &str| meta.get(name).and_then(Value::as_str).map(str::to_string);
    KeyboardMetadata {
        name: text("name"),
        author: text("author"),
    }
}

fn apply_props(
    props: &Map<String, Value>,
    template: &mut KeyTemplate,
    pending: &mut PendingKey,
    cursor: &mut Cursor,
    ignored: &mut Vec<String>,
) -> Result<()> {
    for (name, value) in props {
        match name.as_str() {
            "w" => pending.width = number(name, value)?,
            "h" => pending.height = number(name, value)?,
            "x" => {
                let offset = number(name, value)?;
                cursor.column += offset;
                cursor.x += offset * cursor.key_width;
            }
            "y" => {
                let offset = number(name, value)?;
                cursor.row += offset;
                cursor.y += offset * cursor.key_width;
            }
            "d" => pending.decal = value.as_bool().unwrap_or(true),
            "a" => {
                let raw = number(name, value)? as i64;
                let style = raw.clamp(0, MAX_LABEL_STYLE);
                if style != raw {
                    tracing::warn!(requested = raw, used = style, "label style out of range");
                }
                template.label_style = style as u8;
                pending.sticky.label_style = template.label_style;
            }
            "f" => {
                let raw = number(name, value)?.trunc();
                let size = raw.clamp(MIN_LABEL_SIZE, MAX_LABEL_SIZE);
                if size != raw {
                    tracing::warn!(requested = raw, used = size, "label size out of range");
                }
                template.label_size = size;
                pending.sticky.label_size = size;
            }
            "c" => {
                template.keycap_color = string(name, value)?;
                pending.sticky.keycap_color = template.keycap_color.clone();
            }
            "t" => {
                let raw = string(name, value)?;
                // Per-label colors are not supported; the first one wins.
                let first = raw.split('\n').next().unwrap_or_default();
                let color = if first == "0" { "#000000" } else { first };
                template.label_color = color.to_string();
                pending.sticky.label_color = template.label_color.clone();
            }
            other => {
                if UNSUPPORTED_PROPS.contains(&other) {
                    tracing::warn!(property = other, "ignoring unsupported KLE property");
                } else {
                    tracing::debug!(property = other, "ignoring KLE property");
                }
                if !ignored.iter().any(|seen| seen == other) {
                    ignored.push(other.to_string());
                }
            }
        }
    }
    Ok(())
}

fn place_key(label: String, pending: &PendingKey, cursor: &mut Cursor) -> Key {
    let kw = cursor.key_width;
    let half_width = pending.width * kw / 2.0;
    cursor.x += half_width;
    let x = cursor.x;
    cursor.x += half_width;

    let half_height = pending.height * kw / 2.0;
    let y = cursor.y + half_height - kw / 2.0;

    let key = Key {
        label,
        row: cursor.row,
        column: cursor.column,
        x,
        y,
        width: pending.width,
        height: pending.height,
        label_style: pending.sticky.label_style,
        label_size: pending.sticky.label_size,
        label_color: pending.sticky.label_color.clone(),
        keycap_color: pending.sticky.keycap_color.clone(),
        border_color: pending.sticky.border_color.clone(),
        decal: pending.decal,
    };
    cursor.column += pending.width;
    key
}

fn number(name: &str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| anyhow!("property {name:?}: expected a number, found {}", kind_of(value)))
}

fn string(name: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("property {name:?}: expected a string, found {}", kind_of(value)))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Keyboard {
        parse_kle(input, &KeyDefaults::default()).unwrap().keyboard
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn parses_raw_rows() {
        let keyboard = parse(r#"["Q","W"],["A"]"#);
        assert_eq!(keyboard.rows.len(), 2);
        assert_eq!(keyboard.rows[0].len(), 2);
        assert!(close(keyboard.columns, 2.0));
        assert!(close(keyboard.row_count, 2.0));
        let q = &keyboard.rows[0][0];
        assert!(close(q.x, 9.525));
        assert!(close(q.y, 9.525));
        let w = &keyboard.rows[0][1];
        assert!(close(w.x, 28.575));
        let a = &keyboard.rows[1][0];
        assert!(close(a.y, 28.575));
    }

    #[test]
    fn parses_full_document_with_metadata() {
        let keyboard = parse(r#"[{name:"Pad",author:"me"},["7","8"],["4","5"]]"#);
        assert_eq!(keyboard.metadata.name.as_deref(), Some("Pad"));
        assert_eq!(keyboard.metadata.author.as_deref(), Some("me"));
        assert_eq!(keyboard.rows.len(), 2);
    }

    #[test]
    fn single_raw_row_is_not_unwrapped() {
        let keyboard = parse(r#"["A","B","C"]"#);
        assert_eq!(keyboard.rows.len(), 1);
        assert_eq!(keyboard.rows[0].len(), 3);
    }

    #[test]
    fn width_and_offsets_advance_cursor() {
        let keyboard = parse(r#"[{w:2},"Shift",{x:0.5},"Z"]"#);
        let shift = &keyboard.rows[0][0];
        let z = &keyboard.rows[0][1];
        assert!(close(shift.width, 2.0));
        assert!(close(shift.x, 19.05));
        // 2u shift, half-unit gap, then half of Z
        assert!(close(z.x, 19.05 * 3.0));
        assert!(close(z.width, 1.0));
        assert!(close(keyboard.columns, 3.5));
    }

    #[test]
    fn tall_keys_center_below_row() {
        let keyboard = parse(r#"[{h:2},"+"]"#);
        let plus = &keyboard.rows[0][0];
        assert!(close(plus.y, 19.05));
    }

    #[test]
    fn tall_key_in_last_row_extends_height() {
        let keyboard = parse(r#"["A"],[{h:2},"B"]"#);
        assert!(close(keyboard.row_count, 3.0));
        assert!(close(keyboard.height(), 3.0 * 19.05));
        let b = &keyboard.rows[1][0];
        assert!(b.y + b.height * 19.05 / 2.0 <= keyboard.height() + 1e-9);
    }

    #[test]
    fn wide_key_after_offset_extends_width() {
        let keyboard = parse(r#"["A"],[{x:1,w:2.75},"Shift"]"#);
        assert!(close(keyboard.columns, 3.75));
    }

    #[test]
    fn vertical_offset_adds_rows() {
        let keyboard = parse(r#"["Esc"],[{y:0.5},"`"]"#);
        assert!(close(keyboard.row_count, 2.5));
        assert!(close(keyboard.rows[1][0].y, 9.525 + 19.05 * 1.5));
    }

    #[test]
    fn sticky_properties_persist_and_per_key_reset() {
        let keyboard =
            parse(r##"[{c:"#cccccc",t:"#111111\n#222222",a:7,f:5,w:1.5,d:true},"A","B"]"##);
        let a = &keyboard.rows[0][0];
        let b = &keyboard.rows[0][1];
        assert_eq!(a.keycap_color, "#cccccc");
        assert_eq!(b.keycap_color, "#cccccc");
        assert_eq!(a.label_color, "#111111");
        assert_eq!(b.label_style, 7);
        assert!(close(b.label_size, 5.0));
        assert!(a.decal);
        assert!(!b.decal);
        assert!(close(a.width, 1.5));
        assert!(close(b.width, 1.0));
    }

    #[test]
    fn label_color_zero_means_black() {
        let keyboard = parse(r#"[{t:"0"},"A"]"#);
        assert_eq!(keyboard.rows[0][0].label_color, "#000000");
    }

    #[test]
    fn clamps_label_style_and_size() {
        let keyboard = parse(r#"[{a:12,f:20},"A",{a:-3,f:0},"B"]"#);
        assert_eq!(keyboard.rows[0][0].label_style, 9);
        assert!(close(keyboard.rows[0][0].label_size, 9.0));
        assert_eq!(keyboard.rows[0][1].label_style, 0);
        assert!(close(keyboard.rows[0][1].label_size, 1.0));
    }

    #[test]
    fn defaults_apply_without_properties() {
        let keyboard = parse(r#"["A"]"#);
        let a = &keyboard.rows[0][0];
        assert_eq!(a.keycap_color, "grey");
        assert_eq!(a.label_color, "black");
        assert_eq!(a.border_color, "none");
        assert_eq!(a.label_style, 4);
        assert!(close(a.label_size, 3.0));
    }

    #[test]
    fn records_ignored_properties() {
        let output =
            parse_kle(r#"[{r:15,rx:1,p:"DSA",sm:"cherry"},"A"]"#, &KeyDefaults::default())
                .unwrap();
        assert!(output.ignored.contains(&"r".to_string()));
        assert!(output.ignored.contains(&"p".to_string()));
        assert!(output.ignored.contains(&"rx".to_string()));
        assert!(output.ignored.contains(&"sm".to_string()));
        assert_eq!(output.keyboard.key_count(), 1);
    }

    #[test]
    fn rejects_bad_items() {
        let defaults = KeyDefaults::default();
        assert!(parse_kle(r#"["A", 5]"#, &defaults).is_err());
        assert!(parse_kle(r#"[{w:"wide"},"A"]"#, &defaults).is_err());
        assert!(parse_kle(r#"["A",,"#, &defaults).is_err());
    }

    #[test]
    fn empty_input_is_empty_keyboard() {
        let keyboard = parse("  ");
        assert_eq!(keyboard.key_count(), 0);
        assert!(close(keyboard.width(), 0.0));
    }
}
